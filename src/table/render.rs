use super::RecordTable;
use crate::api::Backend;
use crate::schema::Schema;
use crate::ui::output::{error_line, hint, loading_line, title_line};
use crate::ui::TableBuilder;

impl<S: Schema, B: Backend> RecordTable<S, B> {
    /// Text rendering of the whole page: title, status lines, the visible
    /// rows, the pager and, when open, the edit form.
    pub fn render(&self) -> String {
        let mut out = Vec::new();
        out.push(title_line(S::TITLE));

        if self.is_loading() {
            out.push(loading_line());
        }
        if let Some(error) = self.error() {
            out.push(error_line(error));
        }

        let columns = S::columns();
        let mut grid = TableBuilder::new(
            columns
                .iter()
                .map(|c| c.label)
                .chain(std::iter::once("Actions")),
        );
        for (i, record) in self.page_items().iter().enumerate() {
            let mut cells: Vec<String> = columns.iter().map(|c| record.display(c.key)).collect();
            cells.push(format!("edit {0} | delete {0}", i + 1));
            grid.add_row(cells);
        }
        grid.placeholder("No data");
        out.push(grid.build());

        out.push(self.pager_line());

        if let Some(form) = self.render_form() {
            out.push(form);
        }
        out.join("\n")
    }

    fn pager_line(&self) -> String {
        let prev = if self.can_prev() { "prev" } else { "-" };
        let next = if self.can_next() { "next" } else { "-" };
        format!("[{}]  Page {} / {}  [{}]", prev, self.page(), self.total_pages(), next)
    }

    fn render_form(&self) -> Option<String> {
        let title = self.editor().title()?;
        let info = S::info();
        let mut lines = vec![title_line(title)];
        for column in info.editable_columns() {
            lines.push(format!(
                "  {} ({}): {}",
                column.label,
                column.key,
                self.editor().value(column.key)
            ));
        }
        lines.push(hint("set <field> <value>, then save or cancel"));
        Some(lines.join("\n"))
    }
}
