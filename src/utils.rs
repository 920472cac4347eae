use std::borrow::Cow;
use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Run `work` behind a spinner on stderr, cleared once it settles.
///
/// indicatif draws nothing when stderr isn't a terminal, so piped
/// `--json` output stays clean.
pub async fn with_spinner<F: Future>(message: impl Into<Cow<'static, str>>, work: F) -> F::Output {
    let spinner = ProgressBar::new_spinner().with_message(message);
    if let Ok(style) = ProgressStyle::with_template("{msg} {spinner}") {
        spinner.set_style(style.tick_strings(&["-", "\\", "|", "/", "-"]));
    }
    spinner.enable_steady_tick(TICK_INTERVAL);

    let output = work.await;
    spinner.finish_and_clear();
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn output_of_the_wrapped_work_is_returned() {
        let value = with_spinner("Loading", async { 42 }).await;
        assert_eq!(value, 42);
    }
}
