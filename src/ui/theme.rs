use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles for the console's output roles.
#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub hint: Style,
    pub dim: Style,
    pub active_tab: Style,
}

impl Theme {
    /// Colors only when stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        let colored =
            console::Term::stdout().is_term() && std::env::var_os("NO_COLOR").is_none();
        Self::new(colored)
    }

    pub fn new(colored: bool) -> Self {
        let style = |s: Style| if colored { s } else { Style::new() };
        Self {
            title: style(Style::new().cyan().bold()),
            success: style(Style::new().green().bold()),
            error: style(Style::new().red().bold()),
            warn: style(Style::new().yellow()),
            hint: style(Style::new().magenta()),
            dim: style(Style::new().dimmed()),
            active_tab: style(Style::new().black().on_cyan().bold()),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
