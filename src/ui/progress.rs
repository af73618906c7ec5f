use indicatif::ProgressBar;
use std::future::Future;
use std::time::Duration;

/// Spinner shown while a network call is outstanding. Hidden when stdout is
/// not a terminal.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = if console::Term::stdout().is_term() {
            let pb = ProgressBar::new_spinner();
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message(message.to_string());
        Self { pb }
    }

    /// Hide the spinner while `f` runs, e.g. around a terminal prompt.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.pb.suspend(f)
    }

    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }

    /// Run `fut` with a spinner, clearing it once the future settles.
    pub async fn wrap<F: Future>(message: &str, fut: F) -> F::Output {
        let spinner = Self::new(message);
        let out = fut.await;
        spinner.finish_and_clear();
        out
    }
}
