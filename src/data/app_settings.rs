use crate::data::persistence::Persistable;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the background photo client key.
pub const BACKGROUND_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";
/// Placeholder shipped in sample env files; treated as "not configured".
pub const BACKGROUND_KEY_PLACEHOLDER: &str = "Your_Access_Key_Here";

/// Which day is selected on mount and after changing year.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Select today whenever the current year is displayed.
    #[default]
    TodayOnCurrentYear,
    /// Start every year without a selection.
    None,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub country_code: String,
    pub holiday_api_url: String,
    pub background_api_url: String,
    pub background_query: String,
    pub selection_policy: SelectionPolicy,
    pub request_timeout_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            country_code: "KR".to_string(),
            holiday_api_url: "https://date.nager.at/api/v3".to_string(),
            background_api_url: "https://api.unsplash.com".to_string(),
            background_query: "coding,technology,developer".to_string(),
            selection_policy: SelectionPolicy::default(),
            request_timeout_secs: 10,
        }
    }
}

/// Wrapper that reads the `settings` key from config.yaml.
#[derive(Serialize, Deserialize, Default, Debug)]
pub(crate) struct SettingsWrapper {
    #[serde(default)]
    pub(crate) settings: AppSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
}

impl AppSettings {
    pub fn load_from(dir: &Path) -> Result<Self> {
        Ok(SettingsWrapper::load_from(dir)?.settings)
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        wrapper.save_to(dir)
    }
}

/// Reads the background client key from the environment.
///
/// Returns `None` when unset, blank, or still the placeholder value.
pub fn background_access_key() -> Option<String> {
    normalize_access_key(std::env::var(BACKGROUND_KEY_ENV).ok())
}

pub(crate) fn normalize_access_key(raw: Option<String>) -> Option<String> {
    let key = raw?.trim().to_string();
    if key.is_empty() || key == BACKGROUND_KEY_PLACEHOLDER {
        None
    } else {
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_settings_default_values() {
        let settings = AppSettings::default();
        assert_eq!(settings.country_code, "KR");
        assert_eq!(settings.holiday_api_url, "https://date.nager.at/api/v3");
        assert_eq!(settings.selection_policy, SelectionPolicy::TodayOnCurrentYear);
        assert_eq!(settings.request_timeout_secs, 10);
    }

    #[test]
    fn test_settings_wrapper_yaml_roundtrip() {
        let wrapper = SettingsWrapper {
            settings: AppSettings {
                country_code: "DE".to_string(),
                selection_policy: SelectionPolicy::None,
                ..Default::default()
            },
        };
        let yaml = serde_norway::to_string(&wrapper).unwrap();
        assert!(yaml.contains("selection_policy: none"));
        let parsed: SettingsWrapper = serde_norway::from_str(&yaml).unwrap();
        assert_eq!(parsed.settings, wrapper.settings);
    }

    #[test]
    fn test_missing_settings_key_uses_default() {
        let wrapper: SettingsWrapper = serde_norway::from_str("other: 1").unwrap();
        assert_eq!(wrapper.settings, AppSettings::default());
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let yaml = "settings:\n  country_code: JP\n";
        let wrapper: SettingsWrapper = serde_norway::from_str(yaml).unwrap();
        assert_eq!(wrapper.settings.country_code, "JP");
        assert_eq!(wrapper.settings.background_query, "coding,technology,developer");
    }

    #[test]
    fn test_save_to_and_load_from() {
        let tmp = tempfile::TempDir::new().unwrap();
        let settings = AppSettings {
            request_timeout_secs: 3,
            ..Default::default()
        };
        settings.save_to(tmp.path()).unwrap();
        assert_eq!(AppSettings::load_from(tmp.path()).unwrap(), settings);
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert_eq!(AppSettings::load_from(tmp.path()).unwrap(), AppSettings::default());
    }

    #[test]
    fn test_normalize_access_key() {
        assert_eq!(normalize_access_key(None), None);
        assert_eq!(normalize_access_key(Some("".to_string())), None);
        assert_eq!(normalize_access_key(Some("  ".to_string())), None);
        assert_eq!(
            normalize_access_key(Some(BACKGROUND_KEY_PLACEHOLDER.to_string())),
            None
        );
        assert_eq!(
            normalize_access_key(Some(" abc ".to_string())),
            Some("abc".to_string())
        );
    }
}
