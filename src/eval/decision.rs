use serde::{Deserialize, Serialize};
use std::fmt;

/// Hook-level outcome tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Decision {
    Allow,
    Ask,
    Deny,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Ask => "ask",
            Decision::Deny => "deny",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Decision::Allow => "ALLOW",
            Decision::Ask => "ASK",
            Decision::Deny => "DENY",
        }
    }
}

/// Closed set of danger categories a rule can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Rce,
    Deletion,
    Exfiltration,
    Persistence,
    PrivilegeEscalation,
    SystemModification,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Rce => "rce",
            Category::Deletion => "deletion",
            Category::Exfiltration => "exfiltration",
            Category::Persistence => "persistence",
            Category::PrivilegeEscalation => "privilege_escalation",
            Category::SystemModification => "system_modification",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    NoConcern,
    NeedsConfirmation { reason: String, category: Category },
}

impl Classification {
    pub fn category(&self) -> Option<Category> {
        match self {
            Classification::NoConcern => None,
            Classification::NeedsConfirmation { category, .. } => Some(*category),
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Classification::NoConcern => None,
            Classification::NeedsConfirmation { reason, .. } => Some(reason),
        }
    }
}
