use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use tracing::warn;

use crate::types::{AcceptedRecord, AttributeGroup, AttributeValue, ClassifiedAttributes};

/// Slot name shared by every archive-type file of a variant.
pub const BUNDLE_SLOT: &str = "bundle";

const ARCHIVE_EXTENSIONS: &[&str] = &["zip"];

/// Formats tried, in order, when choosing a variant's preview link.
const PREVIEW_FORMATS: &[&str] = &["png", "jpg", "jpeg", "svg", "pdf"];

/// Groups that never distinguish variants.
pub const SLOT_GROUPS: &[AttributeGroup] = &[AttributeGroup::ColorMode];

/// One physical file position within a variant: format plus color mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub format: String,
    pub color_mode: Option<String>,
}

impl SlotKey {
    /// Slot for a file with `extension` and optional color-mode modifier.
    ///
    /// Archives share the bundle slot regardless of color mode. With
    /// `unify_jpeg`, `jpeg` files land in the `jpg` slot.
    #[must_use]
    pub fn for_file(extension: &str, color_mode: Option<&str>, unify_jpeg: bool) -> Self {
        let ext = extension.to_lowercase();
        if ARCHIVE_EXTENSIONS.contains(&ext.as_str()) {
            return Self {
                format: BUNDLE_SLOT.to_string(),
                color_mode: None,
            };
        }
        let format = if unify_jpeg && ext == "jpeg" {
            "jpg".to_string()
        } else {
            ext
        };
        Self {
            format,
            color_mode: color_mode.map(str::to_string),
        }
    }

    #[must_use]
    pub fn is_bundle(&self) -> bool {
        self.format == BUNDLE_SLOT
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.color_mode {
            Some(mode) => write!(f, "{}_{mode}", self.format),
            None => f.write_str(&self.format),
        }
    }
}

impl Serialize for SlotKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Order-independent identity of a variant: sorted `(group, value)` pairs
/// without the slot groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantKey(Vec<(AttributeGroup, AttributeValue)>);

impl VariantKey {
    #[must_use]
    pub fn from_attributes(attributes: &ClassifiedAttributes) -> Self {
        Self(
            attributes
                .without(SLOT_GROUPS)
                .iter()
                .map(|(g, v)| (g, v.clone()))
                .collect(),
        )
    }

    pub fn pairs(&self) -> &[(AttributeGroup, AttributeValue)] {
        &self.0
    }
}

/// How a second file for an occupied slot is resolved.
///
/// Records are grouped in locator order, so both policies pick the same
/// file however the input list was ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Keep the lexicographically smallest locator.
    KeepFirst,
    /// Keep the lexicographically largest locator.
    #[default]
    KeepLast,
}

impl CollisionPolicy {
    /// Whether a later locator replaces the current occupant of a slot.
    #[must_use]
    pub fn replaces(self) -> bool {
        matches!(self, Self::KeepLast)
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::KeepFirst => "first",
            Self::KeepLast => "last",
        })
    }
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" | "keep-first" | "smallest" => Ok(Self::KeepFirst),
            "last" | "keep-last" | "largest" => Ok(Self::KeepLast),
            other => Err(format!("unknown collision policy `{other}`")),
        }
    }
}

/// A slot that received more than one distinct locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotCollision {
    pub variant: ClassifiedAttributes,
    pub slot: SlotKey,
    pub kept: String,
    pub discarded: String,
}

/// The canonical catalog unit: one attribute set, many file slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    #[serde(flatten)]
    pub attributes: ClassifiedAttributes,
    /// Canonical filename stem, without color mode.
    pub slug: String,
    pub links: BTreeMap<SlotKey, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl Variant {
    #[must_use]
    pub fn new(attributes: ClassifiedAttributes) -> Self {
        Self {
            attributes,
            slug: String::new(),
            links: BTreeMap::new(),
            preview: None,
        }
    }

    #[must_use]
    pub fn key(&self) -> VariantKey {
        VariantKey::from_attributes(&self.attributes)
    }

    /// Recomputes the preview link from the current slots.
    pub fn refresh_preview(&mut self) {
        self.preview = PREVIEW_FORMATS.iter().find_map(|format| {
            self.links
                .iter()
                .find(|(slot, _)| slot.format == *format)
                .map(|(_, locator)| locator.clone())
        });
    }

    fn sort_key(&self) -> (String, String, VariantKey) {
        (
            self.attributes
                .text(AttributeGroup::AssetType)
                .unwrap_or_default()
                .to_string(),
            self.attributes.division().unwrap_or_default().to_string(),
            self.key(),
        )
    }
}

/// Output of grouping: ordered variants plus every slot collision seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    pub variants: Vec<Variant>,
    pub collisions: Vec<SlotCollision>,
}

/// Merges accepted records that differ only in format or color mode.
///
/// Records are visited in locator order, so variants, slot occupants and
/// the collision list do not depend on input order. Variants are ordered by
/// asset type, then division, then the remaining attribute pairs.
pub fn group_variants(
    records: &[AcceptedRecord],
    policy: CollisionPolicy,
    unify_jpeg: bool,
) -> Grouping {
    let mut ordered: Vec<&AcceptedRecord> = records.iter().collect();
    ordered.sort_by(|a, b| a.record.locator().cmp(b.record.locator()));

    let mut variants: BTreeMap<VariantKey, Variant> = BTreeMap::new();
    let mut collisions = Vec::new();

    for accepted in ordered {
        let key = VariantKey::from_attributes(&accepted.attributes);
        let slot = SlotKey::for_file(
            accepted.record.extension(),
            accepted.attributes.text(AttributeGroup::ColorMode),
            unify_jpeg,
        );
        let locator = accepted.record.locator();

        let variant = variants
            .entry(key)
            .or_insert_with(|| Variant::new(accepted.attributes.without(SLOT_GROUPS)));

        match variant.links.get_mut(&slot) {
            None => {
                variant.links.insert(slot, locator.to_string());
            }
            Some(current) if current.as_str() == locator => {}
            Some(current) => {
                let (kept, discarded) = if policy.replaces() {
                    let previous = std::mem::replace(current, locator.to_string());
                    (locator.to_string(), previous)
                } else {
                    (current.clone(), locator.to_string())
                };
                warn!(slot = %slot, kept = %kept, discarded = %discarded, "slot collision");
                collisions.push(SlotCollision {
                    variant: variant.attributes.clone(),
                    slot,
                    kept,
                    discarded,
                });
            }
        }
    }

    let mut variants: Vec<Variant> = variants.into_values().collect();
    for variant in &mut variants {
        variant.refresh_preview();
    }
    variants.sort_by_cached_key(Variant::sort_key);

    Grouping {
        variants,
        collisions,
    }
}
