use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A category of meaning that a filename token can carry.
///
/// The declaration order is the canonical order: it drives attribute-key
/// sorting, manifest ordering and the token order of synthesized filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeGroup {
    /// Functional category of the file (see [`AssetType`]).
    AssetType,
    /// Sub-brand the asset belongs to.
    Division,
    /// Arrangement of the logo elements.
    Lockup,
    /// Presence of the divider bar.
    Bar,
    /// Compact logotype form.
    Compact,
    /// Optical size class.
    OpticalSize,
    /// Color scheme.
    Color,
    /// Presence of the ® symbol.
    Trademark,
    /// Clearspace padding baked into the artboard.
    Clearspace,
    /// RGB/CMYK modifier, used only to tell file slots apart.
    ColorMode,
}

impl AttributeGroup {
    /// Every group, in canonical order.
    pub const ALL: [AttributeGroup; 10] = [
        Self::AssetType,
        Self::Division,
        Self::Lockup,
        Self::Bar,
        Self::Compact,
        Self::OpticalSize,
        Self::Color,
        Self::Trademark,
        Self::Clearspace,
        Self::ColorMode,
    ];

    /// Stable identifier used in serialized output and rejection messages.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::AssetType => "asset_type",
            Self::Division => "division",
            Self::Lockup => "lockup",
            Self::Bar => "bar",
            Self::Compact => "compact",
            Self::OpticalSize => "optical_size",
            Self::Color => "color",
            Self::Trademark => "trademark",
            Self::Clearspace => "clearspace",
            Self::ColorMode => "color_mode",
        }
    }

    /// Human-readable group title for the manifest legend.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::AssetType => "Asset Type",
            Self::Division => "Division",
            Self::Lockup => "Lockup",
            Self::Bar => "Bar",
            Self::Compact => "Compact",
            Self::OpticalSize => "Optical Size",
            Self::Color => "Color",
            Self::Trademark => "Trademark",
            Self::Clearspace => "Clearspace",
            Self::ColorMode => "Color Mode",
        }
    }

    /// Label used for `Label=Value` folder segments.
    #[must_use]
    pub fn folder_label(self) -> &'static str {
        match self {
            Self::OpticalSize => "Size",
            other => other.display_name(),
        }
    }

    /// Groups that take boolean values in filenames.
    #[must_use]
    pub fn is_flag(self) -> bool {
        matches!(
            self,
            Self::Bar | Self::Compact | Self::Trademark | Self::Clearspace
        )
    }

    /// Groups that participate in classification but never reach the manifest.
    #[must_use]
    pub fn is_internal(self) -> bool {
        matches!(self, Self::ColorMode)
    }
}

impl fmt::Display for AttributeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Functional category of a logo file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    /// Division logo with lockup and optional bar.
    StandardLogo,
    /// Parent-brand logotype, optionally compact.
    Wordmark,
    /// One-off logo outside the division system.
    SpecialLogo,
    Favicon,
    Monogram,
}

impl AssetType {
    pub const ALL: [AssetType; 5] = [
        Self::StandardLogo,
        Self::Wordmark,
        Self::SpecialLogo,
        Self::Favicon,
        Self::Monogram,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::StandardLogo => "standard_logo",
            Self::Wordmark => "wordmark",
            Self::SpecialLogo => "special_logo",
            Self::Favicon => "favicon",
            Self::Monogram => "monogram",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::StandardLogo => "Standard Logo",
            Self::Wordmark => "Wordmark",
            Self::SpecialLogo => "Special Logo",
            Self::Favicon => "Favicon",
            Self::Monogram => "Monogram",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.id() == s)
            .ok_or_else(|| format!("unknown asset type `{s}`"))
    }
}

/// Value assigned to an [`AttributeGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Flag(bool),
    Text(String),
}

impl AttributeValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Attribute assignments decoded from one filename.
///
/// Backed by an ordered map so equal attribute sets compare, hash and
/// serialize identically regardless of the token order they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassifiedAttributes(BTreeMap<AttributeGroup, AttributeValue>);

impl ClassifiedAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `group` and returns the value it previously held, if any.
    pub fn insert(
        &mut self,
        group: AttributeGroup,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.0.insert(group, value.into())
    }

    /// Sets `group` only when it is absent.
    pub fn insert_default(&mut self, group: AttributeGroup, value: impl Into<AttributeValue>) {
        self.0.entry(group).or_insert_with(|| value.into());
    }

    #[must_use]
    pub fn get(&self, group: AttributeGroup) -> Option<&AttributeValue> {
        self.0.get(&group)
    }

    #[must_use]
    pub fn contains(&self, group: AttributeGroup) -> bool {
        self.0.contains_key(&group)
    }

    /// Boolean value of a group; absent counts as `false`.
    #[must_use]
    pub fn flag(&self, group: AttributeGroup) -> bool {
        self.get(group).and_then(AttributeValue::as_flag).unwrap_or(false)
    }

    #[must_use]
    pub fn text(&self, group: AttributeGroup) -> Option<&str> {
        self.get(group).and_then(AttributeValue::as_text)
    }

    #[must_use]
    pub fn asset_type(&self) -> Option<AssetType> {
        self.text(AttributeGroup::AssetType)
            .and_then(|s| s.parse().ok())
    }

    #[must_use]
    pub fn division(&self) -> Option<&str> {
        self.text(AttributeGroup::Division)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeGroup, &AttributeValue)> {
        self.0.iter().map(|(g, v)| (*g, v))
    }

    pub fn groups(&self) -> impl Iterator<Item = AttributeGroup> + '_ {
        self.0.keys().copied()
    }

    /// Copy of the set with the given groups removed.
    #[must_use]
    pub fn without(&self, excluded: &[AttributeGroup]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(g, _)| !excluded.contains(g))
                .map(|(g, v)| (*g, v.clone()))
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(AttributeGroup, AttributeValue)> for ClassifiedAttributes {
    fn from_iter<I: IntoIterator<Item = (AttributeGroup, AttributeValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
