use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::parser::legacy::rewrite_legacy;
use crate::parser::normalize::Normalizer;
use crate::parser::resolver::resolve_prefix;
use crate::parser::tokens::classify_tokens;
use crate::parser::validator::validate;
use crate::types::{
    AcceptedRecord, AttributeGroup, AttributeValue, ClassifiedAttributes, RawFileRecord,
    RejectionEntry, RejectionReason,
};
use crate::vocabulary::Vocabulary;

/// Result of classifying one file: exactly one of accepted or rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Accepted(AcceptedRecord),
    Rejected(RejectionEntry),
}

impl Classification {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Per-file classifier: resolve, rewrite, classify, validate.
///
/// Stateless across files, so one instance classifies any number of
/// records in any order (or from several threads) with identical results.
#[derive(Debug, Clone)]
pub struct Classifier {
    vocabulary: Arc<Vocabulary>,
    normalizer: Normalizer,
    /// Brand folder names, normalized.
    archive_stems: BTreeSet<String>,
}

impl Classifier {
    /// # Errors
    ///
    /// Returns `LogomarkError::RegexError` if the normalizer fails to build.
    pub fn new(vocabulary: Arc<Vocabulary>) -> Result<Self> {
        let normalizer = Normalizer::new()?;
        let archive_stems = vocabulary
            .brand_folders()
            .map(|folder| normalizer.normalize(folder))
            .collect();
        Ok(Self {
            vocabulary,
            normalizer,
            archive_stems,
        })
    }

    /// Whether a raw stem names a whole-brand archive (e.g. `KH-Gruppe`).
    ///
    /// Both sides are normalized, so spacing, case and umlauts do not matter.
    #[must_use]
    pub fn is_brand_archive(&self, raw_stem: &str) -> bool {
        self.archive_stems.contains(&self.normalizer.normalize(raw_stem))
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The normalized stem prefix detection sees for `raw_stem`.
    #[must_use]
    pub fn normalize(&self, raw_stem: &str) -> String {
        self.normalizer
            .normalize_stem(raw_stem, self.vocabulary.strip_prefixes())
    }

    /// Classifies one file.
    pub fn classify(&self, record: &RawFileRecord) -> Classification {
        let file = record.file_name();
        match self.classify_stem(record.stem()) {
            Ok(attributes) => {
                debug!(file = %file, attributes = attributes.len(), "accepted");
                Classification::Accepted(AcceptedRecord {
                    record: record.clone(),
                    attributes,
                })
            }
            Err(reasons) => {
                debug!(file = %file, reasons = reasons.len(), "rejected");
                Classification::Rejected(RejectionEntry::new(file, reasons))
            }
        }
    }

    /// Classifies a raw stem into its attribute set, or every reason it fails.
    pub fn classify_stem(
        &self,
        raw_stem: &str,
    ) -> std::result::Result<ClassifiedAttributes, Vec<RejectionReason>> {
        let vocabulary = self.vocabulary.as_ref();

        if self.is_brand_archive(raw_stem) {
            return Err(vec![RejectionReason::BrandArchive]);
        }

        let stem = self.normalize(raw_stem);
        let Some(prefix) = resolve_prefix(vocabulary, &stem) else {
            return Err(vec![RejectionReason::UnrecognizedPrefix]);
        };

        // Brands and markers are validated against specs at load time.
        let Ok(spec) = vocabulary.spec(prefix.asset_type) else {
            return Err(vec![RejectionReason::UnrecognizedPrefix]);
        };

        let mut attributes = ClassifiedAttributes::new();
        attributes.insert(
            AttributeGroup::AssetType,
            AttributeValue::text(prefix.asset_type.id()),
        );
        if let Some(division) = &prefix.division {
            attributes.insert(AttributeGroup::Division, division.as_str());
        }

        let tokens = rewrite_legacy(vocabulary, spec, &prefix.remainder);
        let findings = classify_tokens(vocabulary, &tokens, &mut attributes);
        let reasons = validate(spec, &mut attributes, findings);

        if reasons.is_empty() {
            Ok(attributes)
        } else {
            Err(reasons)
        }
    }
}
