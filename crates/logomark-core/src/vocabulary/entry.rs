use serde::{Deserialize, Serialize};

use crate::types::{AssetType, AttributeGroup, AttributeValue};

/// Priority given to entries that do not declare one.
pub const DEFAULT_PRIORITY: u16 = 10;

fn default_priority() -> u16 {
    DEFAULT_PRIORITY
}

/// Maps one raw filename token to a `(group, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// Normalized token as it appears between separators.
    pub token: String,
    pub group: AttributeGroup,
    /// Value assigned to the group; the token itself when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AttributeValue>,
    /// Label shown in the manifest legend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Higher wins when several entries claim the same token or value.
    #[serde(default = "default_priority")]
    pub priority: u16,
    /// Legal vocabulary that is illegal for asset types requiring `group`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub sentinel: bool,
}

impl VocabularyEntry {
    pub fn new(
        token: impl Into<String>,
        group: AttributeGroup,
        value: impl Into<AttributeValue>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            group,
            value: Some(value.into()),
            display_name: Some(display_name.into()),
            priority: DEFAULT_PRIORITY,
            sentinel: false,
        }
    }

    /// Entry whose value is the token text itself.
    pub fn named(
        token: impl Into<String>,
        group: AttributeGroup,
        display_name: impl Into<String>,
    ) -> Self {
        let token = token.into();
        let value = AttributeValue::Text(token.clone());
        Self::new(token, group, value, display_name)
    }

    #[must_use]
    pub fn with_priority(mut self, priority: u16) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn as_sentinel(mut self) -> Self {
        self.sentinel = true;
        self
    }

    /// The resolved value this entry assigns.
    #[must_use]
    pub fn value(&self) -> AttributeValue {
        self.value
            .clone()
            .unwrap_or_else(|| AttributeValue::Text(self.token.clone()))
    }
}

/// A key that can legally start a filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandKey {
    pub key: String,
    pub asset_type: AssetType,
    /// Division assigned to files under this key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    pub display_name: String,
    /// Canonical top-level folder; also the stem of the brand-wide archive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

impl BrandKey {
    pub fn division(
        key: impl Into<String>,
        asset_type: AssetType,
        display_name: impl Into<String>,
        folder: impl Into<String>,
    ) -> Self {
        let key = key.into();
        Self {
            division: Some(key.clone()),
            key,
            asset_type,
            display_name: display_name.into(),
            folder: Some(folder.into()),
        }
    }

    pub fn standalone(
        key: impl Into<String>,
        asset_type: AssetType,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            asset_type,
            division: None,
            display_name: display_name.into(),
            folder: None,
        }
    }

    /// Key filed under another brand's division, without a folder of its own.
    ///
    /// Display names and folders come from the division's canonical key,
    /// which must be declared first.
    pub fn alias(
        key: impl Into<String>,
        asset_type: AssetType,
        division: impl Into<String>,
    ) -> Self {
        let key = key.into();
        Self {
            display_name: key.clone(),
            key,
            asset_type,
            division: Some(division.into()),
            folder: None,
        }
    }
}

/// A token in the stem remainder that promotes the asset type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMarker {
    pub token: String,
    pub asset_type: AssetType,
}

impl AssetMarker {
    pub fn new(token: impl Into<String>, asset_type: AssetType) -> Self {
        Self {
            token: token.into(),
            asset_type,
        }
    }
}

/// A deprecated token rewritten into a modern `(group, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyAlias {
    pub token: String,
    /// Asset types for which the rewrite applies.
    pub asset_types: Vec<AssetType>,
    pub group: AttributeGroup,
    pub value: AttributeValue,
}

impl LegacyAlias {
    pub fn new(
        token: impl Into<String>,
        asset_types: Vec<AssetType>,
        group: AttributeGroup,
        value: impl Into<AttributeValue>,
    ) -> Self {
        Self {
            token: token.into(),
            asset_types,
            group,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn applies_to(&self, asset_type: AssetType) -> bool {
        self.asset_types.contains(&asset_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_value_defaults_to_token() {
        let entry: VocabularyEntry =
            serde_json::from_str(r#"{"token":"black","group":"color"}"#).unwrap();
        assert_eq!(entry.value(), AttributeValue::text("black"));
        assert_eq!(entry.priority, DEFAULT_PRIORITY);
        assert!(!entry.sentinel);
    }

    #[test]
    fn flag_entry_keeps_explicit_value() {
        let entry = VocabularyEntry::new("no-bar", AttributeGroup::Bar, false, "No Bar");
        assert_eq!(entry.value(), AttributeValue::Flag(false));
    }

    #[test]
    fn brand_alias_has_no_folder() {
        let alias = BrandKey::alias("group", AssetType::StandardLogo, "gruppe");
        assert_eq!(alias.division.as_deref(), Some("gruppe"));
        assert_eq!(alias.folder, None);
    }

    #[test]
    fn legacy_alias_scope() {
        let alias = LegacyAlias::new(
            "compact",
            vec![AssetType::StandardLogo],
            AttributeGroup::Lockup,
            "center-compact",
        );
        assert!(alias.applies_to(AssetType::StandardLogo));
        assert!(!alias.applies_to(AssetType::Wordmark));
    }
}
