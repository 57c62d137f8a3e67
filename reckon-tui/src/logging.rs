//! Tracing subscriber setup.
//!
//! The terminal belongs to the TUI, so log output goes to the configured log
//! file. Filtering follows `RUST_LOG` when set.

use crate::config::TuiConfig;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub fn init(config: &TuiConfig) -> Result<(), std::io::Error> {
    if let Some(parent) = config.error_log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.error_log_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // try_init so repeated initialization (tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
