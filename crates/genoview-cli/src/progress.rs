//! Spinners for requests the user waits on

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for an indeterminate request.
///
/// Hidden when `enabled` is false (JSON output, non-terminal stdout).
pub fn create_spinner(message: &str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run `future` behind a spinner that is cleared when it finishes
pub async fn with_spinner<F, T>(message: &str, enabled: bool, future: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let spinner = create_spinner(message, enabled);
    let output = future.await;
    spinner.finish_and_clear();
    output
}
