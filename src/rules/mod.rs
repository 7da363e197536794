//! Detection rules: one `Rule` per dangerous command shape.
//!
//! Rules are evaluated in the order of [`RULES`]; the first match wins.
//! Single-regex rules are plain [`PatternRule`] records; rules that need
//! more than one condition implement [`Rule`] directly.

/// Catastrophic `rm -rf` / `find -delete` against root or home.
pub mod deletion;
/// Sensitive data sent over the network (curl/wget/scp/rsync, netcat).
pub mod exfiltration;
/// authorized_keys, crontab, launchd and shell profile tampering.
pub mod persistence;
/// setuid/setgid via chmod.
pub mod privilege;
/// Downloads piped, substituted, eval'd or sourced into a shell.
pub mod rce;
/// Writes under /etc/.
pub mod system;

use std::sync::LazyLock;

use regex::Regex;

use crate::eval::{Category, CommandContext};

/// Trait for detection rules.
///
/// `check` returns the human-readable reason when the rule fires.
pub trait Rule: Send + Sync {
    /// Short stable identifier, used in logs and tests.
    fn name(&self) -> &'static str;
    fn category(&self) -> Category;
    fn check(&self, ctx: &CommandContext) -> Option<String>;
}

/// Which normalized copy of the command a pattern runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Raw,
    Lower,
    Normalized,
}

impl View {
    pub fn select<'c>(self, ctx: &'c CommandContext) -> &'c str {
        match self {
            View::Raw => ctx.raw,
            View::Lower => &ctx.lower,
            View::Normalized => &ctx.normalized,
        }
    }
}

/// A rule that fires when a single regex matches one view of the command.
pub struct PatternRule {
    pub name: &'static str,
    pub category: Category,
    pub view: View,
    pub regex: &'static LazyLock<Regex>,
    pub reason: &'static str,
}

impl Rule for PatternRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn category(&self) -> Category {
        self.category
    }

    fn check(&self, ctx: &CommandContext) -> Option<String> {
        self.regex
            .is_match(self.view.select(ctx))
            .then(|| self.reason.to_string())
    }
}

/// Compile a built-in pattern. Only called from `LazyLock` initializers
/// with literal patterns.
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("built-in pattern {pattern:?} must compile: {e}"))
}

/// All rules in evaluation order.
pub static RULES: &[&dyn Rule] = &[
    &rce::PIPED_DOWNLOAD,
    &rce::PROCESS_SUBSTITUTION,
    &rce::EVAL_DOWNLOAD,
    &rce::SHELL_C_DOWNLOAD,
    &rce::SOURCE_DOWNLOAD,
    &deletion::CATASTROPHIC_RM,
    &deletion::FIND_DELETE,
    &exfiltration::NETWORK_SEND,
    &exfiltration::NETCAT,
    &persistence::AUTHORIZED_KEYS,
    &persistence::CRONTAB_EDIT,
    &persistence::LAUNCHCTL_LOAD,
    &persistence::SHELL_PROFILE,
    &privilege::CHMOD_SYMBOLIC_SETUID,
    &privilege::CHMOD_NUMERIC_SETUID,
    &system::ETC_REDIRECT,
    &system::ETC_TEE,
];
