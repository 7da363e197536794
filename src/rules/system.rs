use std::sync::LazyLock;

use regex::Regex;

use super::{PatternRule, View, compile};
use crate::eval::Category;

static ETC_REDIRECT_RE: LazyLock<Regex> = LazyLock::new(|| compile(r">\s*/etc/"));

static ETC_TEE_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"\btee\s+(?:-\S+\s+)*/etc/"));

pub static ETC_REDIRECT: PatternRule = PatternRule {
    name: "system-etc-redirect",
    category: Category::SystemModification,
    view: View::Raw,
    regex: &ETC_REDIRECT_RE,
    reason: "Redirect to /etc/ (system file modification)",
};

pub static ETC_TEE: PatternRule = PatternRule {
    name: "system-etc-tee",
    category: Category::SystemModification,
    view: View::Raw,
    regex: &ETC_TEE_RE,
    reason: "tee to /etc/ (system file modification)",
};
