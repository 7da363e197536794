use std::sync::LazyLock;

use regex::Regex;

use super::{PatternRule, Rule, View, compile};
use crate::eval::{Category, CommandContext};

// Flags before the target are captured in group 1, flags after it in group 2.
// The target must be the last non-flag word of the command.
static RM_ROOT_OR_HOME_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\brm\s+((?:-[A-Za-z-]*\s+)+)(?:/\*?|~(?:/\*?)?|\$HOME(?:/\*?)?)((?:\s+-[A-Za-z-]*)*)$")
});

static FIND_DELETE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\bfind\s+(?:/|~/?|\$HOME/?)\s.*-delete\b"));

/// `rm` with both recursive and force flags whose target is `/`, `~` or `$HOME`
/// (optionally with `/` or `/*`).
pub struct CatastrophicRm;

pub static CATASTROPHIC_RM: CatastrophicRm = CatastrophicRm;

impl Rule for CatastrophicRm {
    fn name(&self) -> &'static str {
        "deletion-rm-root-or-home"
    }

    fn category(&self) -> Category {
        Category::Deletion
    }

    fn check(&self, ctx: &CommandContext) -> Option<String> {
        let caps = RM_ROOT_OR_HOME_RE.captures(&ctx.normalized)?;
        let flags = caps.iter().skip(1).flatten().map(|m| m.as_str());
        recursive_and_forced(flags)
            .then(|| "Catastrophic deletion (rm -rf on root or home)".to_string())
    }
}

/// True when the flag words carry both recursive and force, in any order:
/// `-rf`, `-fr`, `-r -f`, `-Rf`, `--recursive --force`.
fn recursive_and_forced<'a>(groups: impl Iterator<Item = &'a str>) -> bool {
    let (mut recursive, mut force) = (false, false);
    for flag in groups.flat_map(str::split_whitespace) {
        if let Some(long) = flag.strip_prefix("--") {
            recursive |= long == "recursive";
            force |= long == "force";
        } else if let Some(short) = flag.strip_prefix('-') {
            recursive |= short.contains(['r', 'R']);
            force |= short.contains('f');
        }
    }
    recursive && force
}

pub static FIND_DELETE: PatternRule = PatternRule {
    name: "deletion-find-delete",
    category: Category::Deletion,
    view: View::Normalized,
    regex: &FIND_DELETE_RE,
    reason: "Catastrophic deletion (find -delete on root or home)",
};
