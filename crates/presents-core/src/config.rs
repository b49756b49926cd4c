use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Raw roster as written in a TOML file, before validation.
///
/// People and families are referenced by their `id` keys; declaration order
/// is kept and becomes the listing order of the validated roster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub exempt_from_children_gifts: Vec<String>,
    #[serde(default)]
    pub adults: Vec<AdultEntry>,
    #[serde(default)]
    pub children: Vec<ChildEntry>,
    #[serde(default)]
    pub families: Vec<FamilyEntry>,
    #[serde(default)]
    pub godparents: Vec<GodparentEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdultEntry {
    pub id: String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildEntry {
    pub id: String,
    pub first_name: String,
}

/// A couple and their (possibly empty) set of children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyEntry {
    pub id: String,
    pub father: String,
    pub mother: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GodparentEntry {
    pub child: String,
    #[serde(default)]
    pub adults: Vec<String>,
}

impl RosterConfig {
    /// Parse a roster from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_roster() {
        let config = RosterConfig::from_toml_str(
            r#"
            [[adults]]
            id = "a"
            first_name = "Anna"
            nickname = "Nana"

            [[adults]]
            id = "b"
            first_name = "Bob"

            [[families]]
            id = "ab"
            father = "b"
            mother = "a"
            "#,
        )
        .expect("parse roster");

        assert_eq!(config.adults.len(), 2);
        assert_eq!(config.adults[0].nickname.as_deref(), Some("Nana"));
        assert!(config.adults[1].nickname.is_none());
        assert!(config.families[0].children.is_empty());
        assert!(config.godparents.is_empty());
        assert!(config.exempt_from_children_gifts.is_empty());
    }

    #[test]
    fn rejects_missing_required_field() {
        let result = RosterConfig::from_toml_str(
            r#"
            [[adults]]
            id = "a"
            "#,
        );
        assert!(matches!(result, Err(crate::RosterError::TomlDecode(_))));
    }
}
