use std::sync::LazyLock;

use regex::Regex;

use super::{PatternRule, View, compile};
use crate::eval::Category;

// `curl ... | bash`, also `| sudo bash`
static PIPED_DOWNLOAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"\b(?:curl|wget)\s+.*\|\s*(?:sudo\s+(?:-\S+\s+)*)?(?:bash|sh|zsh|python[0-9.]*|perl|ruby)\b",
    )
});

// `bash <(curl ...)`, `source <(wget ...)`
static PROCESS_SUBSTITUTION_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:bash|sh|zsh|source)\s+<\s*\(\s*(?:curl|wget)\b"));

// `eval "$(curl ...)"`, `eval `wget ...``
static EVAL_DOWNLOAD_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\beval\s+.*(?:\$\(|`).*\b(?:curl|wget)\b"));

static SHELL_C_DOWNLOAD_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:bash|sh|zsh)\s+-c\s+.*(?:\$\(|`).*\b(?:curl|wget)\b"));

static SOURCE_DOWNLOAD_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\bsource\s+.*(?:\$\(|`).*\b(?:curl|wget)\b"));

pub static PIPED_DOWNLOAD: PatternRule = PatternRule {
    name: "rce-piped-download",
    category: Category::Rce,
    view: View::Lower,
    regex: &PIPED_DOWNLOAD_RE,
    reason: "Piping download to shell (potential RCE)",
};

pub static PROCESS_SUBSTITUTION: PatternRule = PatternRule {
    name: "rce-process-substitution",
    category: Category::Rce,
    view: View::Lower,
    regex: &PROCESS_SUBSTITUTION_RE,
    reason: "Process substitution with download (potential RCE)",
};

pub static EVAL_DOWNLOAD: PatternRule = PatternRule {
    name: "rce-eval-download",
    category: Category::Rce,
    view: View::Lower,
    regex: &EVAL_DOWNLOAD_RE,
    reason: "Eval with download (potential RCE)",
};

pub static SHELL_C_DOWNLOAD: PatternRule = PatternRule {
    name: "rce-shell-c-download",
    category: Category::Rce,
    view: View::Lower,
    regex: &SHELL_C_DOWNLOAD_RE,
    reason: "Shell -c with download (potential RCE)",
};

pub static SOURCE_DOWNLOAD: PatternRule = PatternRule {
    name: "rce-source-download",
    category: Category::Rce,
    view: View::Lower,
    regex: &SOURCE_DOWNLOAD_RE,
    reason: "Source with download (potential RCE)",
};
