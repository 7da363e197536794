use serde::{Deserialize, Serialize};

use crate::eval::Category;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Settings {
    /// Append classified commands to `log_file`.
    #[serde(default)]
    pub log_decisions: bool,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    #[serde(default)]
    pub log_level: String,
    /// Log destination; `~` and `$VAR` are expanded.
    #[serde(default)]
    pub log_file: String,
    /// Categories whose rules are not evaluated.
    #[serde(default)]
    pub disabled_categories: Vec<Category>,
    /// Categories that block (exit 2) instead of asking.
    #[serde(default)]
    pub deny_categories: Vec<Category>,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    #[serde(default)]
    replace: bool,
    log_decisions: Option<bool>,
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default)]
    disabled_categories: Vec<Category>,
    #[serde(default)]
    remove_disabled_categories: Vec<Category>,
    #[serde(default)]
    deny_categories: Vec<Category>,
    #[serde(default)]
    remove_deny_categories: Vec<Category>,
}

// ── Merge logic ──

/// Merge a user list into a default list.
/// In replace mode: user list replaces default entirely.
/// In merge mode: remove items first, then extend with additions (deduped).
fn merge_list<T: PartialEq>(base: &mut Vec<T>, add: Vec<T>, remove: &[T], replace: bool) {
    if replace {
        *base = add;
    } else {
        base.retain(|item| !remove.contains(item));
        for item in add {
            if !base.contains(&item) {
                base.push(item);
            }
        }
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/bash-safety-hook/config.toml (if exists)
    ///
    /// Scalars override, lists extend. Set `replace = true` in a section to
    /// replace its lists, or use `remove_<field>` lists to subtract items.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Try to load user overlay from ~/.config/bash-safety-hook/config.toml.
    fn load_overlay() -> Option<ConfigOverlay> {
        let home = std::env::var_os("HOME")?;
        let path = std::path::Path::new(&home).join(".config/bash-safety-hook/config.toml");
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("bash-safety-hook: config parse error: {e}");
                None
            }
        }
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let s = overlay.settings;
        if let Some(v) = s.log_decisions {
            self.settings.log_decisions = v;
        }
        if let Some(v) = s.log_level {
            self.settings.log_level = v;
        }
        if let Some(v) = s.log_file {
            self.settings.log_file = v;
        }
        merge_list(
            &mut self.settings.disabled_categories,
            s.disabled_categories,
            &s.remove_disabled_categories,
            s.replace,
        );
        merge_list(
            &mut self.settings.deny_categories,
            s.deny_categories,
            &s.remove_deny_categories,
            s.replace,
        );
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    pub(crate) fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = Config::default_config();
        assert!(config.settings.log_decisions);
        assert_eq!(config.settings.log_level, "info");
        assert!(config.settings.log_file.ends_with("decisions.log"));
    }

    #[test]
    fn default_categories_empty() {
        let config = Config::default_config();
        assert!(config.settings.disabled_categories.is_empty());
        assert!(config.settings.deny_categories.is_empty());
    }

    // ── Merge semantics ──

    #[test]
    fn overlay_scalar_override() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [settings]
            log_decisions = false
            log_level = "debug"
        "#,
        );
        assert!(!config.settings.log_decisions);
        assert_eq!(config.settings.log_level, "debug");
        // Untouched scalar keeps its default
        assert!(config.settings.log_file.ends_with("decisions.log"));
    }

    #[test]
    fn overlay_extends_and_dedups() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [settings]
            deny_categories = ["rce", "deletion", "rce"]
        "#,
        );
        assert_eq!(
            config.settings.deny_categories,
            vec![Category::Rce, Category::Deletion]
        );
    }

    #[test]
    fn overlay_remove() {
        let mut config = Config::default_config();
        config.settings.disabled_categories = vec![Category::Persistence, Category::Rce];
        config.apply_overlay_str(
            r#"
            [settings]
            remove_disabled_categories = ["rce"]
        "#,
        );
        assert_eq!(config.settings.disabled_categories, vec![Category::Persistence]);
    }

    #[test]
    fn overlay_replace() {
        let mut config = Config::default_config();
        config.settings.deny_categories = vec![Category::Exfiltration];
        config.apply_overlay_str(
            r#"
            [settings]
            replace = true
            deny_categories = ["system_modification"]
        "#,
        );
        assert_eq!(
            config.settings.deny_categories,
            vec![Category::SystemModification]
        );
    }

    #[test]
    fn overlay_rejects_unknown_category() {
        let result: Result<ConfigOverlay, _> = toml::from_str(
            r#"
            [settings]
            deny_categories = ["malware"]
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn empty_overlay_is_noop() {
        let mut config = Config::default_config();
        config.apply_overlay_str("");
        assert!(config.settings.log_decisions);
        assert!(config.settings.deny_categories.is_empty());
    }

    #[test]
    fn config_round_trips_as_toml() {
        let config = Config::default_config();
        let dumped = toml::to_string_pretty(&config).unwrap();
        assert!(dumped.contains("log_level"));
    }
}
