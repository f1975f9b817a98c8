//! Progress spinner helpers using indicatif

use indicatif::{ProgressBar, ProgressStyle};

/// Create a spinner for indeterminate progress
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("    {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Finish a spinner with a success message
pub fn finish_with_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✅ {}", message));
}

/// Clear the spinner when `result` is an error, so the error message is not
/// drawn over a live spinner. Successful results pass through untouched.
pub fn clear_on_error<T, E>(pb: &ProgressBar, result: Result<T, E>) -> Result<T, E> {
    if result.is_err() {
        pb.finish_and_clear();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_on_error_stops_spinner() {
        let pb = create_spinner("Reading...");
        let result: Result<(), &str> = clear_on_error(&pb, Err("bad input"));

        assert_eq!(result, Err("bad input"));
        assert!(pb.is_finished());
    }

    #[test]
    fn test_clear_on_error_leaves_spinner_running_on_success() {
        let pb = create_spinner("Reading...");
        let result: Result<u32, &str> = clear_on_error(&pb, Ok(3));

        assert_eq!(result, Ok(3));
        assert!(!pb.is_finished());
        pb.finish_and_clear();
    }
}
