//! Opt-in rules that drop files from the catalog after grouping.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::catalog::grouper::{SlotKey, Variant};
use crate::types::{AttributeGroup, ClassifiedAttributes};

/// Decides whether one variant slot stays in the catalog.
pub trait RetentionPredicate: fmt::Debug + Send + Sync {
    /// Stable rule name used in discard reports.
    fn name(&self) -> &str;

    /// `false` drops the file at `slot`.
    fn retain(&self, attributes: &ClassifiedAttributes, slot: &SlotKey, locator: &str) -> bool;
}

/// White artwork has no visible background in JPEG.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhiteJpeg;

impl RetentionPredicate for WhiteJpeg {
    fn name(&self) -> &str {
        "white-jpeg"
    }

    fn retain(&self, attributes: &ClassifiedAttributes, slot: &SlotKey, _locator: &str) -> bool {
        let jpeg = matches!(slot.format.as_str(), "jpg" | "jpeg");
        let white = attributes
            .text(AttributeGroup::Color)
            .is_some_and(|c| c.starts_with("white"));
        !(jpeg && white)
    }
}

/// The ® symbol is illegible at the smallest optical size.
#[derive(Debug, Clone)]
pub struct SmallTrademark {
    pub optical_size: String,
}

impl Default for SmallTrademark {
    fn default() -> Self {
        Self {
            optical_size: "xxs".into(),
        }
    }
}

impl RetentionPredicate for SmallTrademark {
    fn name(&self) -> &str {
        "small-trademark"
    }

    fn retain(&self, attributes: &ClassifiedAttributes, _slot: &SlotKey, _locator: &str) -> bool {
        let small =
            attributes.text(AttributeGroup::OpticalSize) == Some(self.optical_size.as_str());
        !(small && attributes.flag(AttributeGroup::Trademark))
    }
}

/// Divisions that carry no accent color.
#[derive(Debug, Clone)]
pub struct AccentBan {
    pub divisions: Vec<String>,
}

impl Default for AccentBan {
    fn default() -> Self {
        Self {
            divisions: vec!["korte-hoffmann".into(), "gruppe".into()],
        }
    }
}

impl RetentionPredicate for AccentBan {
    fn name(&self) -> &str {
        "accent-ban"
    }

    fn retain(&self, attributes: &ClassifiedAttributes, _slot: &SlotKey, _locator: &str) -> bool {
        let banned = attributes
            .division()
            .is_some_and(|d| self.divisions.iter().any(|b| b == d));
        let accent = attributes
            .text(AttributeGroup::Color)
            .is_some_and(|c| c.ends_with("+accent"));
        !(banned && accent)
    }
}

/// Built-in rules by name, for configuration surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinRule {
    WhiteJpeg,
    SmallTrademark,
    AccentBan,
}

impl BuiltinRule {
    pub const ALL: [BuiltinRule; 3] = [Self::WhiteJpeg, Self::SmallTrademark, Self::AccentBan];

    #[must_use]
    pub fn predicate(self) -> Arc<dyn RetentionPredicate> {
        match self {
            Self::WhiteJpeg => Arc::new(WhiteJpeg),
            Self::SmallTrademark => Arc::new(SmallTrademark::default()),
            Self::AccentBan => Arc::new(AccentBan::default()),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::WhiteJpeg => "white-jpeg",
            Self::SmallTrademark => "small-trademark",
            Self::AccentBan => "accent-ban",
        }
    }
}

impl fmt::Display for BuiltinRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|r| r.name()).collect();
                format!("unknown retention rule `{s}` (known: {})", known.join(", "))
            })
    }
}

/// A file removed by a retention rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetentionDiscard {
    pub rule: String,
    /// Slug of the variant the file belonged to.
    pub variant: String,
    pub slot: SlotKey,
    pub locator: String,
}

/// Applies every predicate to every slot.
///
/// A slot survives only if all predicates retain it. Variants left without
/// any slot are removed.
pub fn apply_retention(
    variants: &mut Vec<Variant>,
    predicates: &[Arc<dyn RetentionPredicate>],
) -> Vec<RetentionDiscard> {
    if predicates.is_empty() {
        return Vec::new();
    }

    let mut discards = Vec::new();
    for variant in variants.iter_mut() {
        let attributes = &variant.attributes;
        let slug = &variant.slug;
        variant.links.retain(|slot, locator| {
            match predicates.iter().find(|p| !p.retain(attributes, slot, locator)) {
                Some(rule) => {
                    warn!(
                        rule = rule.name(),
                        variant = %slug,
                        locator = %locator,
                        "retention discard"
                    );
                    discards.push(RetentionDiscard {
                        rule: rule.name().to_string(),
                        variant: slug.clone(),
                        slot: slot.clone(),
                        locator: locator.clone(),
                    });
                    false
                }
                None => true,
            }
        });
        variant.refresh_preview();
    }
    variants.retain(|v| !v.links.is_empty());
    discards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttributeValue;

    fn variant(color: &str, size: &str, trademark: bool, formats: &[&str]) -> Variant {
        let attrs: ClassifiedAttributes = [
            (AttributeGroup::AssetType, AttributeValue::text("standard_logo")),
            (AttributeGroup::Division, AttributeValue::text("gruppe")),
            (AttributeGroup::Color, AttributeValue::text(color)),
            (AttributeGroup::OpticalSize, AttributeValue::text(size)),
            (AttributeGroup::Trademark, AttributeValue::Flag(trademark)),
        ]
        .into_iter()
        .collect();
        let mut v = Variant::new(attrs);
        for f in formats {
            v.links.insert(SlotKey::for_file(f, None, false), format!("{color}.{f}"));
        }
        v.refresh_preview();
        v
    }

    #[test]
    fn no_rules_keeps_everything() {
        let mut variants = vec![variant("white", "m", false, &["jpg"])];
        assert!(apply_retention(&mut variants, &[]).is_empty());
        assert_eq!(variants.len(), 1);
    }

    #[test]
    fn white_jpeg_drops_only_jpeg_slot() {
        let mut variants = vec![
            variant("white", "m", false, &["jpg", "png"]),
            variant("black", "m", false, &["jpg"]),
        ];
        let discards = apply_retention(&mut variants, &[BuiltinRule::WhiteJpeg.predicate()]);
        assert_eq!(discards.len(), 1);
        assert_eq!(discards[0].rule, "white-jpeg");
        assert_eq!(discards[0].locator, "white.jpg");
        assert_eq!(variants[0].links.len(), 1);
        assert_eq!(variants[0].preview.as_deref(), Some("white.png"));
    }

    #[test]
    fn emptied_variants_are_removed() {
        let mut variants = vec![
            variant("black", "xxs", true, &["svg", "pdf"]),
            variant("black", "xxs", false, &["svg"]),
        ];
        let discards = apply_retention(&mut variants, &[BuiltinRule::SmallTrademark.predicate()]);
        assert_eq!(discards.len(), 2);
        assert_eq!(variants.len(), 1);
        assert!(!variants[0].attributes.flag(AttributeGroup::Trademark));
    }

    #[test]
    fn accent_ban_applies_to_listed_divisions() {
        let mut variants = vec![variant("black+accent", "m", false, &["svg"])];
        apply_retention(&mut variants, &[BuiltinRule::AccentBan.predicate()]);
        assert!(variants.is_empty());

        let custom: Arc<dyn RetentionPredicate> = Arc::new(AccentBan {
            divisions: vec!["immobilien".into()],
        });
        let mut variants = vec![variant("black+accent", "m", false, &["svg"])];
        apply_retention(&mut variants, &[custom]);
        assert_eq!(variants.len(), 1);
    }

    #[test]
    fn rule_names_parse() {
        assert_eq!("White-JPEG".parse::<BuiltinRule>().unwrap(), BuiltinRule::WhiteJpeg);
        let err = "everything".parse::<BuiltinRule>().unwrap_err();
        assert!(err.contains("accent-ban"));
    }
}
