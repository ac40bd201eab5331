//! Binder configuration
//!
//! Attribute names and sentinels. All fields default, so a partial JSON
//! document only overrides what it names.

use crate::BindResult;
use fieldbind_net::ApiConfig;
use serde::{Deserialize, Serialize};

/// Placeholder sentinel: writing it is the same as writing the widget's
/// empty value
pub const DEFAULT_FIELD_VALUE: &str = "--";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindConfig {
    /// Attribute carrying a dotted key path
    pub field_attr: String,
    /// Attribute naming a list region
    pub list_attr: String,
    /// Attribute naming an item key inside a list row
    pub item_attr: String,
    pub placeholder: String,
    /// Where an image remembers its original `src`
    pub origin_src_attr: String,
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            field_attr: "data-field".to_string(),
            list_attr: "data-list".to_string(),
            item_attr: "data-item".to_string(),
            placeholder: DEFAULT_FIELD_VALUE.to_string(),
            origin_src_attr: "data-origin-src".to_string(),
        }
    }
}

impl BindConfig {
    pub fn from_json(text: &str) -> BindResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Everything a binder session needs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bind: BindConfig,
    pub api: ApiConfig,
}

impl Settings {
    pub fn from_json(text: &str) -> BindResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BindError;

    #[test]
    fn test_defaults() {
        let config = BindConfig::default();
        assert_eq!(config.field_attr, "data-field");
        assert_eq!(config.list_attr, "data-list");
        assert_eq!(config.item_attr, "data-item");
        assert_eq!(config.placeholder, "--");
    }

    #[test]
    fn test_partial_override() {
        let config = BindConfig::from_json(r#"{"field_attr": "bind"}"#).unwrap();
        assert_eq!(config.field_attr, "bind");
        assert_eq!(config.list_attr, "data-list");
    }

    #[test]
    fn test_settings_sections() {
        let settings =
            Settings::from_json(r#"{"api": {"prefix": "api/"}, "bind": {"placeholder": "n/a"}}"#)
                .unwrap();
        assert_eq!(settings.api.prefix, "api/");
        assert_eq!(settings.api.payload_key, "payload");
        assert_eq!(settings.bind.placeholder, "n/a");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            BindConfig::from_json("{"),
            Err(BindError::Config(_))
        ));
    }
}
