use std::fs::OpenOptions;
use std::path::PathBuf;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::config::Settings;
use crate::eval::{Classification, Decision};

/// Install a file logger appending to `settings.log_file`.
/// Best-effort: any failure leaves the hook running without a logger
/// (logging must never block the hook).
pub fn init(settings: &Settings) {
    let level = level_filter(&settings.log_level);
    if !settings.log_decisions || level == LevelFilter::Off {
        return;
    }
    let Some(path) = log_path(&settings.log_file) else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let _ = WriteLogger::init(level, config, file);
}

/// Parse a level name, falling back to `info` on anything unrecognized.
fn level_filter(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Expand `~` and environment variables in the configured log path.
fn log_path(raw: &str) -> Option<PathBuf> {
    if raw.trim().is_empty() {
        return None;
    }
    let expanded = shellexpand::full(raw).ok()?;
    Some(PathBuf::from(expanded.as_ref()))
}

/// Record one classified command. Allowed commands log at `debug`,
/// flagged ones at `info`, blocked ones at `warn`.
pub fn log_decision(command: &str, decision: Decision, classification: &Classification) {
    // Compact single-line command for the log
    let cmd: String = command.replace('\n', "; ").chars().take(200).collect();

    match classification {
        Classification::NoConcern => {
            log::debug!("{}\t-\t{cmd}", decision.label());
        }
        Classification::NeedsConfirmation { reason, category } => {
            let level = if decision == Decision::Deny {
                log::Level::Warn
            } else {
                log::Level::Info
            };
            log::log!(level, "{}\t{category}\t{cmd}\t{reason}", decision.label());
        }
    }
}
