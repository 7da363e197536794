pub mod context;
pub mod decision;

pub use context::CommandContext;
pub use decision::{Category, Classification, Decision};

use crate::config::Config;
use crate::rules::{RULES, Rule};

/// Ordered rule set built from configuration.
pub struct Classifier {
    rules: Vec<&'static dyn Rule>,
    deny_categories: Vec<Category>,
}

impl Classifier {
    /// Build the classifier from configuration, dropping rules whose category
    /// is disabled. Remaining rules keep their priority order.
    pub fn from_config(config: &Config) -> Self {
        let settings = &config.settings;
        let rules = RULES
            .iter()
            .copied()
            .filter(|rule| !settings.disabled_categories.contains(&rule.category()))
            .collect();

        Self {
            rules,
            deny_categories: settings.deny_categories.clone(),
        }
    }

    /// Classify a command. The first matching rule wins.
    pub fn classify(&self, command: &str) -> Classification {
        let ctx = CommandContext::from_command(command);
        for rule in &self.rules {
            if let Some(reason) = rule.check(&ctx) {
                log::trace!("rule {} matched", rule.name());
                return Classification::NeedsConfirmation {
                    reason,
                    category: rule.category(),
                };
            }
        }
        Classification::NoConcern
    }

    /// Map a classification onto the hook's decision tier.
    pub fn decide(&self, classification: &Classification) -> Decision {
        match classification.category() {
            None => Decision::Allow,
            Some(category) if self.deny_categories.contains(&category) => Decision::Deny,
            Some(_) => Decision::Ask,
        }
    }
}
