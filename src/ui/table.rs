use tabled::builder::Builder;
use tabled::settings::object::Cell;
use tabled::settings::{Span, Style};

/// Grid of text cells under a header row, drawn with rounded borders.
pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    placeholder: Option<String>,
}

impl TableBuilder {
    pub fn new<I, T>(headers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            placeholder: None,
        }
    }

    pub fn add_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Text shown in one full-width row when no rows were added.
    pub fn placeholder(&mut self, text: &str) {
        self.placeholder = Some(text.to_string());
    }

    pub fn build(&self) -> String {
        let width = self.headers.len();
        if width == 0 {
            return String::new();
        }

        let mut builder = Builder::default();
        builder.push_record(self.headers.clone());
        for row in &self.rows {
            let mut cells = row.clone();
            cells.resize(width, String::new());
            builder.push_record(cells);
        }

        let placeholder = match (&self.placeholder, self.rows.is_empty()) {
            (Some(text), true) => {
                let mut cells = vec![String::new(); width];
                cells[0] = text.clone();
                builder.push_record(cells);
                true
            }
            _ => false,
        };

        let mut table = builder.build();
        table.with(Style::rounded());
        if placeholder && width > 1 {
            table.modify(Cell::new(1, 0), Span::column(width as _));
        }
        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_render_under_headers() {
        let mut builder = TableBuilder::new(["Code", "Name"]);
        builder.add_row(vec!["ENG".into(), "Engineering".into()]);
        let out = builder.build();
        assert!(out.contains("Code"));
        assert!(out.contains("Engineering"));
    }

    #[test]
    fn test_placeholder_only_when_empty() {
        let mut builder = TableBuilder::new(["Code", "Name"]);
        builder.placeholder("No data");
        assert!(builder.build().contains("No data"));

        builder.add_row(vec!["OPS".into(), "Operations".into()]);
        assert!(!builder.build().contains("No data"));
    }

    #[test]
    fn test_no_headers_renders_nothing() {
        let builder = TableBuilder::new(Vec::<String>::new());
        assert!(builder.build().is_empty());
    }
}
