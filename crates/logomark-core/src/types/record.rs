use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use super::attribute::{AssetType, AttributeGroup, ClassifiedAttributes};

/// One candidate asset file as supplied by the file-listing collaborator.
///
/// Immutable once built; read it through the accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RawFileRecord {
    locator: String,
    extension: String,
    stem: String,
}

impl RawFileRecord {
    #[must_use]
    pub fn new(
        locator: impl Into<String>,
        extension: impl AsRef<str>,
        stem: impl Into<String>,
    ) -> Self {
        Self {
            locator: locator.into(),
            extension: extension.as_ref().trim_start_matches('.').to_lowercase(),
            stem: stem.into(),
        }
    }

    /// Derives extension and stem from the last segment of a path or URL.
    ///
    /// Query strings and fragments are ignored. A name without a dot yields
    /// an empty extension.
    #[must_use]
    pub fn from_locator(locator: impl Into<String>) -> Self {
        let locator = locator.into();
        let path = locator
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        let (stem, extension) = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), ext),
            _ => (name.to_string(), ""),
        };
        Self::new(locator.clone(), extension, stem)
    }

    /// Path or URL the file is reachable at.
    #[must_use]
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// File extension, lowercased, without leading dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Filename without extension, exactly as found.
    #[must_use]
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// The original filename (stem plus extension).
    #[must_use]
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.stem.clone()
        } else {
            format!("{}.{}", self.stem, self.extension)
        }
    }
}

/// A file whose name satisfied its asset type's contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptedRecord {
    pub record: RawFileRecord,
    pub attributes: ClassifiedAttributes,
}

impl AcceptedRecord {
    #[must_use]
    pub fn asset_type(&self) -> Option<AssetType> {
        self.attributes.asset_type()
    }
}

/// Why a single file was not accepted into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Error)]
pub enum RejectionReason {
    /// No brand or asset-type key starts the filename.
    #[error("unrecognized asset/brand prefix")]
    UnrecognizedPrefix,

    /// The file is a whole-brand archive, not an individual asset.
    #[error("top-level brand archive")]
    BrandArchive,

    /// Tokens outside every vocabulary entry.
    #[error("unmatched tokens: {}", .tokens.join(", "))]
    UnmatchedTokens { tokens: Vec<String> },

    /// The same group was assigned twice within one filename.
    #[error("duplicate attribute: {group} ({first}, {second})")]
    DuplicateAttribute {
        group: AttributeGroup,
        first: String,
        second: String,
    },

    /// Groups the asset type requires but the filename never declared.
    #[error("missing required attributes for {asset_type}: {}", join_groups(.groups))]
    MissingRequired {
        asset_type: AssetType,
        groups: Vec<AttributeGroup>,
    },

    /// A sentinel token used where the asset type requires a real value.
    #[error("`{token}` is not allowed for {asset_type}: {group} is required")]
    SentinelNotAllowed {
        asset_type: AssetType,
        group: AttributeGroup,
        token: String,
    },
}

fn join_groups(groups: &[AttributeGroup]) -> String {
    groups
        .iter()
        .map(|g| g.id())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Serialize for RejectionReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A rejected file together with every reason it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectionEntry {
    /// Original filename.
    pub file: String,
    pub reasons: Vec<RejectionReason>,
}

impl RejectionEntry {
    #[must_use]
    pub fn new(file: impl Into<String>, reasons: Vec<RejectionReason>) -> Self {
        Self {
            file: file.into(),
            reasons,
        }
    }

    /// Reasons rendered as text, in the order they were found.
    #[must_use]
    pub fn reason_texts(&self) -> Vec<String> {
        self.reasons.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_locator_splits_url() {
        let r = RawFileRecord::from_locator(
            "https://raw.example.com/Logo/KH-Gruppe/gruppe_left_black_size-m.SVG?raw=1",
        );
        assert_eq!(r.stem(), "gruppe_left_black_size-m");
        assert_eq!(r.extension(), "svg");
        assert!(r.locator().ends_with("?raw=1"));
    }

    #[test]
    fn from_locator_handles_plain_names() {
        let r = RawFileRecord::from_locator("favicon_black.png");
        assert_eq!(r.stem(), "favicon_black");
        assert_eq!(r.extension(), "png");

        let r = RawFileRecord::from_locator("dir/README");
        assert_eq!(r.stem(), "README");
        assert_eq!(r.extension(), "");

        let r = RawFileRecord::from_locator(r"C:\assets\.hidden");
        assert_eq!(r.stem(), ".hidden");
        assert_eq!(r.extension(), "");
    }

    #[test]
    fn new_normalizes_extension() {
        let r = RawFileRecord::new("a/b.PNG", ".PNG", "b");
        assert_eq!(r.extension(), "png");
        assert_eq!(r.file_name(), "b.png");
    }

    #[test]
    fn rejection_reason_messages() {
        assert_eq!(
            RejectionReason::UnrecognizedPrefix.to_string(),
            "unrecognized asset/brand prefix"
        );
        let dup = RejectionReason::DuplicateAttribute {
            group: AttributeGroup::Color,
            first: "black".into(),
            second: "white".into(),
        };
        assert!(dup.to_string().starts_with("duplicate attribute: color"));

        let missing = RejectionReason::MissingRequired {
            asset_type: AssetType::StandardLogo,
            groups: vec![AttributeGroup::Lockup, AttributeGroup::OpticalSize],
        };
        assert_eq!(
            missing.to_string(),
            "missing required attributes for standard_logo: lockup, optical_size"
        );
    }

    #[test]
    fn rejection_entry_serializes_reasons_as_text() {
        let entry = RejectionEntry::new(
            "mystery_black.svg",
            vec![RejectionReason::UnrecognizedPrefix],
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["file"], "mystery_black.svg");
        assert_eq!(json["reasons"][0], "unrecognized asset/brand prefix");
    }
}
