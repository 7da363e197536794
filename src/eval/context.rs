/// Normalized views of a single command string, computed once per classification.
#[derive(Debug)]
pub struct CommandContext<'a> {
    /// The command exactly as received. Used for case-sensitive checks
    /// (`/etc/` paths, `-F`, exact flag casing).
    pub raw: &'a str,
    /// Lowercased copy for tool and keyword matching.
    pub lower: String,
    /// Whitespace runs collapsed to single spaces and trimmed, case preserved.
    pub normalized: String,
}

impl<'a> CommandContext<'a> {
    pub fn from_command(raw: &'a str) -> Self {
        Self {
            raw,
            lower: raw.to_lowercase(),
            normalized: raw.split_whitespace().collect::<Vec<_>>().join(" "),
        }
    }
}
