//! bash-safety-hook: a PreToolUse hook for Claude Code that asks for
//! confirmation before dangerous Bash commands run.
//!
//! Commands are matched lexically against an ordered list of rules (remote
//! code execution, catastrophic deletion, exfiltration, persistence,
//! privilege escalation, system file writes). The first matching rule
//! produces a [`eval::Classification::NeedsConfirmation`]; everything else is
//! [`eval::Classification::NoConcern`]. This is a heuristic filter, not a
//! sandbox: no shell parsing, no execution, and it can be bypassed.
//!
//! # Architecture
//!
//! - **[`rules`]** — Detection rules and their priority order.
//! - **[`eval`]** — Normalization, classification types, the [`eval::Classifier`].
//! - **[`hook`]** — PreToolUse stdin/stdout protocol.
//! - **[`config`]** — Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]** — Decision logging to `~/.local/share/bash-safety-hook/decisions.log`.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Classification engine: normalization, result types, rule ordering.
pub mod eval;
/// PreToolUse hook protocol.
pub mod hook;
/// File-based decision logging.
pub mod logging;
/// Detection rules.
pub mod rules;

use eval::Classification;

/// Build the classifier from default config and classify a command string.
///
/// This is the main entry point for tests and simple usage.
/// For CLI usage with user config, build the classifier directly.
pub fn classify(command: &str) -> Classification {
    let config = config::Config::default_config();
    let classifier = eval::Classifier::from_config(&config);
    classifier.classify(command)
}
