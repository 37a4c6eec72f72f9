//! App Config Model

use serde::{Deserialize, Serialize};

/// Configuration value, tagged so consumers pattern-match instead of
/// guessing the JSON shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ConfigValue {
    StringList(Vec<String>),
    String(String),
}

impl ConfigValue {
    /// The list form, or None for plain strings.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ConfigValue::StringList(list) => Some(list),
            ConfigValue::String(_) => None,
        }
    }

    /// Exact membership test against the list form. Plain strings never
    /// contain anything.
    pub fn contains(&self, needle: &str) -> bool {
        self.as_list()
            .map(|list| list.iter().any(|v| v == needle))
            .unwrap_or(false)
    }
}

/// Well-known config keys
pub const ALLOWED_CATEGORIES_KEY: &str = "allowed_categories";
pub const ALLOWED_PINCODES_KEY: &str = "allowed_pincodes";

/// App config entry (key/value, last write wins)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub id: i64,
    pub key: String,
    pub value: ConfigValue,
    pub description: Option<String>,
}

/// Upsert payload (admin)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigUpsert {
    pub key: String,
    pub value: ConfigValue,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_union_wire_shape() {
        let v = ConfigValue::StringList(vec!["560001".into(), "560002".into()]);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["kind"], "stringList");
        assert_eq!(json["value"][0], "560001");

        let s: ConfigValue =
            serde_json::from_str(r#"{"kind":"string","value":"v2"}"#).unwrap();
        assert_eq!(s, ConfigValue::String("v2".into()));
    }

    #[test]
    fn contains_is_exact_membership() {
        let v = ConfigValue::StringList(vec!["560001".into()]);
        assert!(v.contains("560001"));
        assert!(!v.contains("56000"));
        assert!(!ConfigValue::String("560001".into()).contains("560001"));
    }
}
