use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn title_line(title: &str) -> String {
    format!("━{}━", title.style(theme().title.clone()))
}

/// Inline error text shown inside a page.
pub fn error_line(message: &str) -> String {
    format!("{} {}", Icons::CROSS, message.style(theme().error.clone()))
}

pub fn loading_line() -> String {
    format!("{} {}", Icons::HOURGLASS, "Loading...".style(theme().dim.clone()))
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

pub fn hint(text: &str) -> String {
    format!("  {}", text.style(theme().hint.clone()))
}

/// Navigation bar with the active tab highlighted.
pub fn tab_bar(tabs: &[&str], active: usize) -> String {
    tabs.iter()
        .enumerate()
        .map(|(i, label)| {
            if i == active {
                format!("[{}]", label).style(theme().active_tab.clone()).to_string()
            } else {
                format!(" {} ", label).style(theme().dim.clone()).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
