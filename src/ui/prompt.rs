//! Interactive confirmation before destructive actions.

use super::Spinner;
use console::Term;
use std::io::BufRead;

pub trait Confirm: Sync {
    /// Ask `prompt`; true means go ahead.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool + Sync> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Reads a `y`/`yes` answer from the terminal. Anything else, including a
/// read failure, declines.
pub struct TermConfirm {
    term: Term,
}

impl TermConfirm {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Default for TermConfirm {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirm for TermConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.term.write_str(&format!("{} [y/N] ", prompt)).is_err() {
            return false;
        }
        match read_line(&self.term) {
            Ok(answer) => answer.is_some_and(|a| is_yes(&a)),
            Err(e) => {
                tracing::debug!("confirmation read failed: {}", e);
                false
            }
        }
    }
}

/// Confirms everything; used for `--yes`.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!("auto-confirmed: {}", prompt);
        true
    }
}

/// Asks through an inner hook with the spinner hidden, so the prompt is
/// not drawn over while the operator types.
pub struct Suspended<'a> {
    spinner: &'a Spinner,
    inner: &'a dyn Confirm,
}

impl<'a> Suspended<'a> {
    pub fn new(spinner: &'a Spinner, inner: &'a dyn Confirm) -> Self {
        Self { spinner, inner }
    }
}

impl Confirm for Suspended<'_> {
    fn confirm(&self, prompt: &str) -> bool {
        self.spinner.suspend(|| self.inner.confirm(prompt))
    }
}

/// One line of operator input. On a terminal this goes through `console`;
/// piped input is read from stdin. `None` means end of input.
pub fn read_line(term: &Term) -> std::io::Result<Option<String>> {
    if term.is_term() {
        return term.read_line().map(Some);
    }
    let mut line = String::new();
    match std::io::stdin().lock().read_line(&mut line)? {
        0 => Ok(None),
        _ => Ok(Some(line)),
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES \n"));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_suspended_confirm_asks_inner_hook() {
        let spinner = Spinner::new("Working...");
        let asked = std::sync::Mutex::new(Vec::new());
        let inner = |prompt: &str| {
            asked.lock().unwrap().push(prompt.to_string());
            false
        };

        assert!(!Suspended::new(&spinner, &inner).confirm("Delete tier 3?"));
        assert!(Suspended::new(&spinner, &AssumeYes).confirm("Delete tier 4?"));
        assert_eq!(*asked.lock().unwrap(), vec!["Delete tier 3?".to_string()]);
        spinner.finish_and_clear();
    }

    #[test]
    fn test_closure_confirm() {
        let decline = |_: &str| false;
        assert!(!decline.confirm("Delete tier 1?"));
        assert!(AssumeYes.confirm("Delete tier 1?"));
    }
}
