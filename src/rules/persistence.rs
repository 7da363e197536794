use std::sync::LazyLock;

use regex::Regex;

use super::{PatternRule, Rule, View, compile};
use crate::eval::{Category, CommandContext};

/// Shell startup files. `.bash_profile` precedes `.profile` so it is named
/// first when both substrings are present.
pub const SHELL_PROFILES: &[&str] = &[".bashrc", ".bash_profile", ".zshrc", ".profile", ".zprofile"];

// Redirect (`>`, `>>`) or tee.
static WRITE_RE: LazyLock<Regex> = LazyLock::new(|| compile(r">|\btee\b"));

// Write indicators for profiles: redirect, tee, in-place sed, or an editor.
static PROFILE_WRITE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r">|\btee\b|\bsed\s+(?:[^|;&]*\s)?-(?:[A-Za-z]*i|-in-place)|\b(?:n?vim?|nano|emacs)\b")
});

// `crontab -e`, `crontab -u bob -e`, `... | crontab -`
static CRONTAB_EDIT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\bcrontab\s+(?:[^\s|;&]+\s+)*-(?:[a-z]*e[a-z]*)?(?:\s|$)"));

static LAUNCHCTL_LOAD_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\blaunchctl\s+(?:load|submit)\b"));

pub struct AuthorizedKeys;

pub static AUTHORIZED_KEYS: AuthorizedKeys = AuthorizedKeys;

impl Rule for AuthorizedKeys {
    fn name(&self) -> &'static str {
        "persistence-authorized-keys"
    }

    fn category(&self) -> Category {
        Category::Persistence
    }

    fn check(&self, ctx: &CommandContext) -> Option<String> {
        (ctx.lower.contains("authorized_keys") && WRITE_RE.is_match(ctx.raw))
            .then(|| "Modification of SSH authorized_keys (persistence mechanism)".to_string())
    }
}

pub static CRONTAB_EDIT: PatternRule = PatternRule {
    name: "persistence-crontab",
    category: Category::Persistence,
    view: View::Lower,
    regex: &CRONTAB_EDIT_RE,
    reason: "Crontab modification (persistence mechanism)",
};

pub static LAUNCHCTL_LOAD: PatternRule = PatternRule {
    name: "persistence-launchctl",
    category: Category::Persistence,
    view: View::Lower,
    regex: &LAUNCHCTL_LOAD_RE,
    reason: "Launchctl load/submit (persistence mechanism)",
};

pub struct ShellProfile;

pub static SHELL_PROFILE: ShellProfile = ShellProfile;

impl Rule for ShellProfile {
    fn name(&self) -> &'static str {
        "persistence-shell-profile"
    }

    fn category(&self) -> Category {
        Category::Persistence
    }

    fn check(&self, ctx: &CommandContext) -> Option<String> {
        let profile = SHELL_PROFILES
            .iter()
            .copied()
            .find(|p| ctx.lower.contains(p))?;
        PROFILE_WRITE_RE.is_match(ctx.raw).then(|| {
            format!("Modification of shell profile '{profile}' (persistence mechanism)")
        })
    }
}
