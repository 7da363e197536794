use std::sync::LazyLock;

use regex::Regex;

use super::{PatternRule, View, compile};
use crate::eval::Category;

// `chmod +s`, `chmod u+s`, `chmod -R g+rxs`, `chmod o-w,u+s`
static SYMBOLIC_SETUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\bchmod\s+(?:-\S+\s+)*(?:[ugoa]*[-+=][rwxXtsS]*,)*[ugoa]*\+[rwxXt]*[sS]")
});

// Four-digit octal mode with the setuid bit in the leading digit: 4755, 6755,
// optionally zero-prefixed (04755).
static NUMERIC_SETUID_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\bchmod\s+(?:-\S+\s+)*0?[4-7][0-7]{3}\b"));

pub static CHMOD_SYMBOLIC_SETUID: PatternRule = PatternRule {
    name: "privilege-chmod-symbolic",
    category: Category::PrivilegeEscalation,
    view: View::Raw,
    regex: &SYMBOLIC_SETUID_RE,
    reason: "chmod +s (setuid - privilege escalation)",
};

pub static CHMOD_NUMERIC_SETUID: PatternRule = PatternRule {
    name: "privilege-chmod-numeric",
    category: Category::PrivilegeEscalation,
    view: View::Raw,
    regex: &NUMERIC_SETUID_RE,
    reason: "chmod with setuid bit (privilege escalation)",
};
