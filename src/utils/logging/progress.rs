//! Progress reporting for bootstrap replications, using the indicatif crate.

use indicatif::{ProgressBar, ProgressStyle};

/// Default style for the replication progress bar
pub const DEFAULT_REPLICATION_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}) {msg}";

/// Create a progress bar for `length` replications
///
/// A hidden bar is returned when `visible` is false so callers can tick it
/// unconditionally.
///
/// # Arguments
/// * `length` - Number of replications
/// * `description` - Optional description to display as the initial message
/// * `visible` - Whether the bar is drawn at all
///
/// # Returns
/// A configured `ProgressBar`
#[must_use]
pub fn create_replication_progress_bar(
    length: u64,
    description: Option<&str>,
    visible: bool,
) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(length);
    let style = ProgressStyle::with_template(DEFAULT_REPLICATION_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);

    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }

    pb
}

/// Finish a progress bar with an optional completion message
///
/// # Arguments
/// * `pb` - The progress bar to finish
/// * `message` - Optional completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    if let Some(msg) = message {
        pb.finish_with_message(msg.to_string());
    } else {
        pb.finish();
    }
}

/// Stop a progress bar where it is, leaving it on screen with a message
///
/// # Arguments
/// * `pb` - The progress bar to abandon
/// * `message` - Message replacing the bar's description
pub fn abandon_progress_bar(pb: &ProgressBar, message: &str) {
    pb.abandon_with_message(message.to_string());
}
