//! Spinner shown while waiting on the network

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::OutputFormat;

/// Spinner on stderr; only drawn for pretty output.
pub struct Spinner(Option<ProgressBar>);

impl Spinner {
    pub fn start(format: OutputFormat, message: &str) -> Self {
        if format != OutputFormat::Pretty {
            return Self(None);
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::default_spinner());
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self(Some(bar))
    }

    pub fn finish(self) {
        if let Some(bar) = self.0 {
            bar.finish_and_clear();
        }
    }
}
