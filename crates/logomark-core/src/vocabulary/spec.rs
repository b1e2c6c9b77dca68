use serde::{Deserialize, Serialize};

use crate::types::{AssetType, AttributeGroup};

/// One segment of a destination folder path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSegment {
    /// Rendered from the attribute value; skipped when the group is absent.
    Group(AttributeGroup),
    /// Fixed folder name.
    Literal(String),
}

/// Boolean-optional group and the value assumed when a filename omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagDefault {
    pub group: AttributeGroup,
    #[serde(default)]
    pub value: bool,
}

impl FlagDefault {
    #[must_use]
    pub fn off(group: AttributeGroup) -> Self {
        Self { group, value: false }
    }
}

/// The naming contract of one asset type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTypeSpec {
    pub asset_type: AssetType,
    /// Groups that must be present after defaulting.
    pub required: Vec<AttributeGroup>,
    #[serde(default)]
    pub defaults: Vec<FlagDefault>,
    /// Ordered schema for the destination folder path.
    #[serde(default)]
    pub folder_schema: Vec<PathSegment>,
}

impl AssetTypeSpec {
    pub fn new(asset_type: AssetType, required: Vec<AttributeGroup>) -> Self {
        Self {
            asset_type,
            required,
            defaults: Vec::new(),
            folder_schema: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_defaults(mut self, groups: &[AttributeGroup]) -> Self {
        self.defaults = groups.iter().copied().map(FlagDefault::off).collect();
        self
    }

    #[must_use]
    pub fn with_folder_schema(mut self, schema: Vec<PathSegment>) -> Self {
        self.folder_schema = schema;
        self
    }

    #[must_use]
    pub fn requires(&self, group: AttributeGroup) -> bool {
        self.required.contains(&group)
    }

    #[must_use]
    pub fn default_for(&self, group: AttributeGroup) -> Option<bool> {
        self.defaults
            .iter()
            .find(|d| d.group == group)
            .map(|d| d.value)
    }

    /// Whether tokens of `group` carry meaning for this asset type.
    ///
    /// Identity groups and the color-mode modifier are relevant to every type.
    #[must_use]
    pub fn is_relevant(&self, group: AttributeGroup) -> bool {
        matches!(
            group,
            AttributeGroup::AssetType | AttributeGroup::Division | AttributeGroup::ColorMode
        ) || self.requires(group)
            || self.default_for(group).is_some()
    }
}
