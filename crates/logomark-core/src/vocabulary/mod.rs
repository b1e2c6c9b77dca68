//! # Vocabulary
//!
//! Process-wide, read-only naming configuration: which tokens exist, which
//! keys may start a filename, and what each asset type must declare.
//!
//! A [`Vocabulary`] is validated once on construction and never mutated
//! afterwards, so one instance can be shared by any number of classifiers.

pub mod builtin;
pub mod entry;
pub mod spec;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{LogomarkError, Result};
use crate::types::{AssetType, AttributeGroup, AttributeValue};

pub use entry::{AssetMarker, BrandKey, DEFAULT_PRIORITY, LegacyAlias, VocabularyEntry};
pub use spec::{AssetTypeSpec, FlagDefault, PathSegment};

/// Separator between filename tokens.
pub const TOKEN_SEPARATOR: char = '_';

/// Serializable form of a vocabulary, as authored in a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyDocument {
    pub entries: Vec<VocabularyEntry>,
    pub brands: Vec<BrandKey>,
    #[serde(default)]
    pub markers: Vec<AssetMarker>,
    #[serde(default)]
    pub legacy_aliases: Vec<LegacyAlias>,
    pub asset_types: Vec<AssetTypeSpec>,
    /// Stem prefixes stripped after normalization (e.g. old folder prefixes).
    #[serde(default)]
    pub strip_prefixes: Vec<String>,
}

/// Validated lookup tables built from a [`VocabularyDocument`].
#[derive(Debug, Clone)]
pub struct Vocabulary {
    doc: VocabularyDocument,
    /// Token -> index of the winning entry.
    token_index: BTreeMap<String, usize>,
    /// Brand indices, longest key first.
    prefix_order: Vec<usize>,
}

impl Vocabulary {
    /// Validates `doc` and builds the lookup tables.
    ///
    /// # Errors
    ///
    /// Returns `LogomarkError::InvalidVocabulary` when a token maps to
    /// conflicting values within one group, when two entries for the same
    /// token tie on priority across groups, or when keys are duplicated.
    /// Returns `LogomarkError::UnknownAssetType` when a brand or marker
    /// refers to an asset type without an `AssetTypeSpec`.
    pub fn new(doc: VocabularyDocument) -> Result<Self> {
        let token_index = build_token_index(&doc.entries)?;

        let mut seen_specs = Vec::new();
        for spec in &doc.asset_types {
            if seen_specs.contains(&spec.asset_type) {
                return Err(LogomarkError::InvalidVocabulary(format!(
                    "asset type {} is specified twice",
                    spec.asset_type
                )));
            }
            seen_specs.push(spec.asset_type);
        }

        let referenced = doc
            .brands
            .iter()
            .map(|b| b.asset_type)
            .chain(doc.markers.iter().map(|m| m.asset_type));
        for asset_type in referenced {
            if !seen_specs.contains(&asset_type) {
                return Err(LogomarkError::UnknownAssetType(asset_type));
            }
        }

        for (i, brand) in doc.brands.iter().enumerate() {
            if brand.key.is_empty() {
                return Err(LogomarkError::InvalidVocabulary("empty brand key".into()));
            }
            if doc.brands[..i].iter().any(|b| b.key == brand.key) {
                return Err(LogomarkError::InvalidVocabulary(format!(
                    "brand key `{}` is declared twice",
                    brand.key
                )));
            }
        }

        let mut prefix_order: Vec<usize> = (0..doc.brands.len()).collect();
        prefix_order.sort_by(|&a, &b| {
            let (ka, kb) = (&doc.brands[a].key, &doc.brands[b].key);
            kb.len().cmp(&ka.len()).then_with(|| ka.cmp(kb))
        });

        Ok(Self {
            doc,
            token_index,
            prefix_order,
        })
    }

    /// Parses and validates a JSON vocabulary document.
    ///
    /// # Errors
    ///
    /// Returns `LogomarkError::Json` for malformed input, otherwise the same
    /// errors as [`Vocabulary::new`].
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: VocabularyDocument = serde_json::from_str(json)?;
        Self::new(doc)
    }

    /// The built-in Korte-Hoffmann catalog vocabulary.
    ///
    /// # Errors
    ///
    /// Never fails in practice; validation runs like for any other document.
    pub fn korte_hoffmann() -> Result<Self> {
        Self::new(builtin::korte_hoffmann())
    }

    #[must_use]
    pub fn document(&self) -> &VocabularyDocument {
        &self.doc
    }

    /// The entry a raw token resolves to, if any.
    #[must_use]
    pub fn lookup(&self, token: &str) -> Option<&VocabularyEntry> {
        self.token_index.get(token).map(|&i| &self.doc.entries[i])
    }

    /// Brand keys in the order prefix detection must try them.
    pub fn prefix_candidates(&self) -> impl Iterator<Item = &BrandKey> {
        self.prefix_order.iter().map(|&i| &self.doc.brands[i])
    }

    #[must_use]
    pub fn brands(&self) -> &[BrandKey] {
        &self.doc.brands
    }

    #[must_use]
    pub fn markers(&self) -> &[AssetMarker] {
        &self.doc.markers
    }

    pub fn legacy_aliases_for<'a>(
        &'a self,
        token: &'a str,
    ) -> impl Iterator<Item = &'a LegacyAlias> {
        self.doc
            .legacy_aliases
            .iter()
            .filter(move |a| a.token == token)
    }

    #[must_use]
    pub fn strip_prefixes(&self) -> &[String] {
        &self.doc.strip_prefixes
    }

    /// The identity assignment a brand key or marker stands for.
    ///
    /// A marker sets the asset type. A brand key sets its division, or the
    /// asset type when it has none.
    #[must_use]
    pub fn identity_of(&self, token: &str) -> Option<(AttributeGroup, AttributeValue)> {
        if let Some(marker) = self.doc.markers.iter().find(|m| m.token == token) {
            return Some((
                AttributeGroup::AssetType,
                AttributeValue::text(marker.asset_type.id()),
            ));
        }
        let brand = self.doc.brands.iter().find(|b| b.key == token)?;
        Some(match &brand.division {
            Some(division) => (AttributeGroup::Division, AttributeValue::text(division.as_str())),
            None => (
                AttributeGroup::AssetType,
                AttributeValue::text(brand.asset_type.id()),
            ),
        })
    }

    /// The contract for `asset_type`.
    ///
    /// # Errors
    ///
    /// Returns `LogomarkError::UnknownAssetType` if none is configured.
    pub fn spec(&self, asset_type: AssetType) -> Result<&AssetTypeSpec> {
        self.doc
            .asset_types
            .iter()
            .find(|s| s.asset_type == asset_type)
            .ok_or(LogomarkError::UnknownAssetType(asset_type))
    }

    /// Manifest label for a value, when one is known.
    #[must_use]
    pub fn display_name(&self, group: AttributeGroup, value: &AttributeValue) -> Option<&str> {
        match group {
            AttributeGroup::AssetType => value
                .as_text()
                .and_then(|s| s.parse::<AssetType>().ok())
                .map(AssetType::display_name),
            AttributeGroup::Division => {
                let division = value.as_text()?;
                self.doc
                    .brands
                    .iter()
                    .find(|b| b.division.as_deref() == Some(division))
                    .map(|b| b.display_name.as_str())
            }
            _ => self
                .best_entry_for(group, value)
                .and_then(|e| e.display_name.as_deref()),
        }
    }

    /// Highest-priority token that encodes `(group, value)`.
    #[must_use]
    pub fn canonical_token(&self, group: AttributeGroup, value: &AttributeValue) -> Option<&str> {
        self.best_entry_for(group, value).map(|e| e.token.as_str())
    }

    fn best_entry_for(
        &self,
        group: AttributeGroup,
        value: &AttributeValue,
    ) -> Option<&VocabularyEntry> {
        // Stable on ties: the first declared entry of the highest priority wins.
        self.doc
            .entries
            .iter()
            .filter(|e| e.group == group && &e.value() == value)
            .fold(None, |best: Option<&VocabularyEntry>, e| match best {
                Some(b) if b.priority >= e.priority => Some(b),
                _ => Some(e),
            })
    }

    /// Filename prefix that identifies `asset_type` (and `division`).
    ///
    /// A promoted type under a division renders as `<brand>_<marker>`.
    #[must_use]
    pub fn prefix_for(&self, asset_type: AssetType, division: Option<&str>) -> Option<String> {
        let marker = self
            .doc
            .markers
            .iter()
            .find(|m| m.asset_type == asset_type)
            .map(|m| m.token.as_str());

        let direct = self
            .doc
            .brands
            .iter()
            .find(|b| b.asset_type == asset_type && b.division.as_deref() == division);
        if let Some(brand) = direct {
            return Some(brand.key.clone());
        }

        match division {
            Some(d) => {
                let brand = self
                    .doc
                    .brands
                    .iter()
                    .find(|b| b.division.as_deref() == Some(d))?;
                marker.map(|m| format!("{}{TOKEN_SEPARATOR}{m}", brand.key))
            }
            None => marker.map(str::to_string),
        }
    }

    /// Canonical top-level folder names, in declaration order.
    pub fn brand_folders(&self) -> impl Iterator<Item = &str> {
        self.doc.brands.iter().filter_map(|b| b.folder.as_deref())
    }

    /// Canonical folder name for a division.
    #[must_use]
    pub fn division_folder(&self, division: &str) -> Option<&str> {
        self.doc
            .brands
            .iter()
            .filter(|b| b.division.as_deref() == Some(division))
            .find_map(|b| b.folder.as_deref())
    }

    /// Filename of the brand-wide archive for a division.
    #[must_use]
    pub fn brand_archive_name(&self, division: &str) -> Option<String> {
        self.division_folder(division).map(|f| format!("{f}.zip"))
    }

    /// Serializes the document back to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns `LogomarkError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.doc)?)
    }
}

fn build_token_index(entries: &[VocabularyEntry]) -> Result<BTreeMap<String, usize>> {
    let mut index: BTreeMap<String, usize> = BTreeMap::new();

    for (i, entry) in entries.iter().enumerate() {
        if entry.token.is_empty() || entry.token.contains(TOKEN_SEPARATOR) {
            return Err(LogomarkError::InvalidVocabulary(format!(
                "token `{}` is empty or contains the separator",
                entry.token
            )));
        }

        let Some(&current) = index.get(&entry.token) else {
            index.insert(entry.token.clone(), i);
            continue;
        };

        let existing = &entries[current];
        if existing.group == entry.group {
            if existing.value() != entry.value() {
                return Err(LogomarkError::InvalidVocabulary(format!(
                    "token `{}` maps {} to both `{}` and `{}`",
                    entry.token,
                    entry.group,
                    existing.value(),
                    entry.value()
                )));
            }
        } else if existing.priority == entry.priority {
            return Err(LogomarkError::InvalidVocabulary(format!(
                "token `{}` is ambiguous between {} and {} at priority {}",
                entry.token, existing.group, entry.group, entry.priority
            )));
        }

        if entry.priority > existing.priority {
            index.insert(entry.token.clone(), i);
        }
    }

    Ok(index)
}
