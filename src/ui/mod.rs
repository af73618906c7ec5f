pub mod icons;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, error, hint, success, tab_bar, warn};
pub use progress::Spinner;
pub use prompt::{AssumeYes, Confirm, Suspended, TermConfirm};
pub use table::TableBuilder;
pub use theme::{theme, Theme};
