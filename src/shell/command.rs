use std::str::FromStr;

/// Navigation tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Employees,
    Departments,
    Locations,
    Tiers,
    Queries,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Employees,
        Tab::Departments,
        Tab::Locations,
        Tab::Tiers,
        Tab::Queries,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Employees => "Employees",
            Tab::Departments => "Departments",
            Tab::Locations => "Locations",
            Tab::Tiers => "Tiers",
            Tab::Queries => "Queries",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

impl FromStr for Tab {
    type Err = String;

    /// Accepts the tab label or the resource name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "employees" | "employee" => Ok(Tab::Employees),
            "departments" | "department" => Ok(Tab::Departments),
            "locations" | "location" => Ok(Tab::Locations),
            "tiers" | "tier" => Ok(Tab::Tiers),
            "queries" | "query" => Ok(Tab::Queries),
            other => Err(format!("unknown tab '{}'", other)),
        }
    }
}

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Switch(Tab),
    Show,
    Refresh,
    Next,
    Prev,
    Page(usize),
    New,
    Edit(usize),
    Set { field: String, value: String },
    Save,
    Cancel,
    Delete(usize),
    Run(String),
    Quit,
}

impl Command {
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Switch(_) => "tab",
            Command::Show => "show",
            Command::Refresh => "refresh",
            Command::Next => "next",
            Command::Prev => "prev",
            Command::Page(_) => "page",
            Command::New => "new",
            Command::Edit(_) => "edit",
            Command::Set { .. } => "set",
            Command::Save => "save",
            Command::Cancel => "cancel",
            Command::Delete(_) => "delete",
            Command::Run(_) => "run",
            Command::Quit => "quit",
        }
    }
}

pub const HELP: &str = "\
Commands:
  tab <name> | employees | departments | locations | tiers | queries
  refresh                 re-fetch the current page
  next | prev | page <n>  move between pages
  new                     open an empty create form
  edit <row>              edit a row of the visible page
  set <field> <value>     change a form field (plain text)
  save | cancel           submit or discard the form
  delete <row>            delete a row of the visible page
  run <query>             run a predefined query (q1, q2, q3)
  show | help | quit";

fn row_number(verb: &str, arg: Option<&str>) -> Result<usize, String> {
    let arg = arg.ok_or_else(|| format!("usage: {} <row>", verb))?;
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("'{}' is not a row number", arg)),
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let arg = Some(rest).filter(|r| !r.is_empty());

        let command = match verb.to_ascii_lowercase().as_str() {
            "" | "show" | "ls" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "tab" | "go" => {
                let name = arg.ok_or("usage: tab <name>")?;
                Command::Switch(name.parse()?)
            }
            "refresh" | "reload" => Command::Refresh,
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Prev,
            "page" => Command::Page(row_number("page", arg)?),
            "new" | "create" => Command::New,
            "edit" => Command::Edit(row_number("edit", arg)?),
            "delete" | "rm" => Command::Delete(row_number("delete", arg)?),
            "save" => Command::Save,
            "cancel" => Command::Cancel,
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (rest, ""),
                };
                if field.is_empty() {
                    return Err("usage: set <field> <value>".to_string());
                }
                Command::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                }
            }
            "run" => Command::Run(arg.ok_or("usage: run <query>")?.to_string()),
            other => match other.parse::<Tab>() {
                Ok(tab) => Command::Switch(tab),
                Err(_) => return Err(format!("unknown command '{}' (try help)", other)),
            },
        };
        Ok(command)
    }
}
