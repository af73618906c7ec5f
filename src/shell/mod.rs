//! Interactive navigation shell.
//!
//! Holds one mounted page at a time. Switching tabs drops the current page,
//! edit state included, and mounts the new one, which fetches fresh data.

pub mod command;
pub mod page;

pub use command::{Command, Tab, HELP};
pub use page::Page;

use crate::api::Backend;
use crate::entities::{Department, Employee, Location, Tier};
use crate::query::QueryRunner;
use crate::table::RecordTable;
use crate::ui::output::{dim, error_line, tab_bar};
use crate::ui::prompt::read_line;
use crate::ui::{Confirm, Spinner, Suspended};
use console::Term;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<B: Backend + Clone + 'static> {
    backend: B,
    tab: Tab,
    page: Box<dyn Page>,
    confirm: Box<dyn Confirm>,
    notice: Option<String>,
}

async fn mount<B: Backend + Clone + 'static>(tab: Tab, backend: B) -> Box<dyn Page> {
    match tab {
        Tab::Employees => Box::new(RecordTable::<Employee, B>::mount(backend).await),
        Tab::Departments => Box::new(RecordTable::<Department, B>::mount(backend).await),
        Tab::Locations => Box::new(RecordTable::<Location, B>::mount(backend).await),
        Tab::Tiers => Box::new(RecordTable::<Tier, B>::mount(backend).await),
        Tab::Queries => Box::new(QueryRunner::new(backend)),
    }
}

impl<B: Backend + Clone + 'static> Shell<B> {
    /// Open on the Employees tab.
    pub async fn open(backend: B, confirm: Box<dyn Confirm>) -> Self {
        let page = Spinner::wrap("Loading...", mount(Tab::Employees, backend.clone())).await;
        Self {
            backend,
            tab: Tab::Employees,
            page,
            confirm,
            notice: None,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub async fn switch(&mut self, tab: Tab) {
        tracing::debug!("switching to {}", tab.label());
        self.page = Spinner::wrap("Loading...", mount(tab, self.backend.clone())).await;
        self.tab = tab;
    }

    /// Run one line of input against the shell.
    pub async fn execute(&mut self, line: &str) -> Flow {
        self.notice = None;
        match line.parse::<Command>() {
            Err(message) => self.notice = Some(message),
            Ok(Command::Quit) => return Flow::Quit,
            Ok(Command::Help) => self.notice = Some(HELP.to_string()),
            Ok(Command::Show) => {}
            Ok(Command::Switch(tab)) => self.switch(tab).await,
            Ok(command) => {
                let spinner = Spinner::new("Working...");
                let confirm = Suspended::new(&spinner, self.confirm.as_ref());
                let result = self.page.handle(command, &confirm).await;
                spinner.finish_and_clear();
                if let Err(e) = result {
                    self.notice = Some(e.to_string());
                }
            }
        }
        Flow::Continue
    }

    pub fn render(&self) -> String {
        let labels: Vec<_> = Tab::ALL.iter().map(|t| t.label()).collect();
        let mut out = vec![tab_bar(&labels, self.tab.index()), self.page.render()];
        if let Some(notice) = &self.notice {
            out.push(error_line(notice));
        }
        out.join("\n")
    }

    /// Read-eval loop on the terminal until `quit` or end of input.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let term = Term::stdout();
        println!("{}", self.render());
        loop {
            term.write_str(&dim("opsconsole> "))?;
            let Some(line) = read_line(&term)? else {
                break;
            };
            if self.execute(&line).await == Flow::Quit {
                break;
            }
            println!("{}", self.render());
        }
        Ok(())
    }
}
