use super::command::Command;
use crate::api::Backend;
use crate::query::QueryRunner;
use crate::schema::Schema;
use crate::table::RecordTable;
use crate::ui::Confirm;
use crate::{Error, Result};
use async_trait::async_trait;

/// A mounted shell page. Failures of the page's own operations stay inline
/// in its rendering; an `Err` here only means the command does not apply.
#[async_trait]
pub trait Page: Send {
    async fn handle(&mut self, command: Command, confirm: &dyn Confirm) -> Result<()>;

    fn render(&self) -> String;
}

fn unsupported(command: &Command) -> Error {
    Error::Validation(format!("'{}' is not available on this page", command.verb()))
}

fn missing_row(position: usize) -> Error {
    Error::Validation(format!("no row {} on this page", position))
}

#[async_trait]
impl<S: Schema, B: Backend> Page for RecordTable<S, B> {
    async fn handle(&mut self, command: Command, confirm: &dyn Confirm) -> Result<()> {
        match command {
            Command::Refresh => self.load().await,
            Command::Next if !self.can_next() => {
                return Err(Error::Validation("already on the last page".into()));
            }
            Command::Next => self.next_page(),
            Command::Prev if !self.can_prev() => {
                return Err(Error::Validation("already on the first page".into()));
            }
            Command::Prev => self.prev_page(),
            Command::Page(page) => self.go_to_page(page),
            Command::New => self.start_create(),
            Command::Edit(position) => {
                let row = self.row(position).cloned().ok_or_else(|| missing_row(position))?;
                self.start_edit(&row);
            }
            Command::Set { field, value } => {
                self.set_field(&field, &value).ok();
            }
            Command::Save => {
                self.save().await;
            }
            Command::Cancel => self.cancel_edit(),
            Command::Delete(position) => {
                let row = self.row(position).cloned().ok_or_else(|| missing_row(position))?;
                self.remove(&row, confirm).await;
            }
            other => return Err(unsupported(&other)),
        }
        Ok(())
    }

    fn render(&self) -> String {
        RecordTable::render(self)
    }
}

#[async_trait]
impl<B: Backend> Page for QueryRunner<B> {
    async fn handle(&mut self, command: Command, _confirm: &dyn Confirm) -> Result<()> {
        match command {
            Command::Run(name) => {
                self.run(&name).await;
                Ok(())
            }
            other => Err(unsupported(&other)),
        }
    }

    fn render(&self) -> String {
        QueryRunner::render(self)
    }
}
