//! # Catalog Engine
//!
//! Runs a batch of file records through classification, grouping,
//! retention and placement, producing everything a catalog consumer needs.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::{
    BuiltinRule, CollisionPolicy, ImportSheet, Manifest, Placement, RejectionSummary,
    RetentionDiscard, RetentionPredicate, SlotCollision, Variant, apply_retention, canonical_stem,
    group_variants, synthesize,
};
use crate::error::{LogomarkError, Result};
use crate::parser::{Classification, Classifier};
use crate::types::{AcceptedRecord, ClassifiedAttributes, RawFileRecord, RejectionEntry};
use crate::vocabulary::Vocabulary;

/// Default number of example filenames kept per rejection reason.
pub const DEFAULT_MAX_EXAMPLES: usize = 5;

/// Configuration for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How a second file for an occupied variant slot is resolved
    pub collision_policy: CollisionPolicy,
    /// Rules that drop files after grouping; empty keeps every file
    pub retention: Vec<Arc<dyn RetentionPredicate>>,
    /// Example filenames listed per rejection reason
    pub max_examples: usize,
    /// Whether `jpeg` files share the `jpg` slot
    pub unify_jpeg: bool,
    /// Rules that blank import spreadsheet link cells without discarding files
    pub sheet_rules: Vec<Arc<dyn RetentionPredicate>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            collision_policy: CollisionPolicy::default(),
            retention: Vec::new(),
            max_examples: DEFAULT_MAX_EXAMPLES,
            unify_jpeg: true,
            sheet_rules: vec![BuiltinRule::WhiteJpeg.predicate()],
        }
    }
}

impl EngineConfig {
    /// Create a new engine configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slot collision policy.
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Add a retention predicate.
    pub fn with_retention(mut self, predicate: Arc<dyn RetentionPredicate>) -> Self {
        self.retention.push(predicate);
        self
    }

    /// Add a built-in retention rule.
    pub fn with_rule(self, rule: BuiltinRule) -> Self {
        self.with_retention(rule.predicate())
    }

    /// Set how many example filenames each rejection reason lists.
    pub fn with_max_examples(mut self, max: usize) -> Self {
        self.max_examples = max;
        self
    }

    /// Keep `jpeg` and `jpg` files in separate slots when `false`.
    pub fn with_unified_jpeg(mut self, unify: bool) -> Self {
        self.unify_jpeg = unify;
        self
    }

    /// Replace the rules applied to import spreadsheet link cells.
    pub fn with_sheet_rules(mut self, rules: Vec<Arc<dyn RetentionPredicate>>) -> Self {
        self.sheet_rules = rules;
        self
    }
}

/// Everything produced by one engine run.
#[derive(Debug, Clone)]
pub struct CatalogRun {
    /// Accepted files, ordered by locator.
    pub accepted: Vec<AcceptedRecord>,
    /// Rejected files, ordered by filename.
    pub rejections: Vec<RejectionEntry>,
    pub variants: Vec<Variant>,
    pub collisions: Vec<SlotCollision>,
    pub discards: Vec<RetentionDiscard>,
    pub manifest: Manifest,
    /// One placement per accepted file, in `accepted` order.
    pub placements: Vec<Placement>,
    pub summary: RejectionSummary,
}

impl CatalogRun {
    /// Every input ends up in exactly one of these.
    #[must_use]
    pub fn total(&self) -> usize {
        self.accepted.len() + self.rejections.len()
    }

    /// The `{ manifest, variants }` document catalog consumers read.
    #[must_use]
    pub fn export(&self) -> CatalogExport<'_> {
        CatalogExport {
            manifest: &self.manifest,
            variants: &self.variants,
        }
    }
}

/// Serialized catalog: the manifest and variant list.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogExport<'a> {
    pub manifest: &'a Manifest,
    pub variants: &'a [Variant],
}

/// Batch catalog builder over one vocabulary.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    classifier: Classifier,
}

impl Engine {
    /// Create an engine over `vocabulary` with the given configuration.
    pub fn new(vocabulary: Arc<Vocabulary>, config: EngineConfig) -> Result<Self> {
        Ok(Self {
            config,
            classifier: Classifier::new(vocabulary)?,
        })
    }

    /// Create an engine over the built-in Korte-Hoffmann vocabulary.
    pub fn korte_hoffmann() -> Result<Self> {
        Self::new(Arc::new(Vocabulary::korte_hoffmann()?), EngineConfig::default())
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        self.classifier.vocabulary()
    }

    /// Classifies every record, splitting accepted from rejected.
    ///
    /// Accepted records are sorted by locator and rejections by filename,
    /// so neither list depends on input order.
    pub fn classify_all(
        &self,
        records: &[RawFileRecord],
    ) -> (Vec<AcceptedRecord>, Vec<RejectionEntry>) {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        for record in records {
            match self.classifier.classify(record) {
                Classification::Accepted(a) => accepted.push(a),
                Classification::Rejected(r) => rejected.push(r),
            }
        }
        accepted.sort_by(|a, b| a.record.locator().cmp(b.record.locator()));
        rejected.sort_by(|a, b| a.file.cmp(&b.file));
        (accepted, rejected)
    }

    /// Import spreadsheet rows for `variants`, with the configured sheet rules.
    #[must_use]
    pub fn import_sheet(&self, variants: &[Variant]) -> ImportSheet {
        ImportSheet::build(self.vocabulary(), variants, &self.config.sheet_rules)
    }

    /// Runs the full pipeline over `records`.
    ///
    /// # Errors
    ///
    /// Returns `LogomarkError::EmptyInput` when `records` is empty.
    pub fn run(&self, records: &[RawFileRecord]) -> Result<CatalogRun> {
        if records.is_empty() {
            return Err(LogomarkError::EmptyInput);
        }

        let (accepted, rejections) = self.classify_all(records);
        info!(
            total = records.len(),
            accepted = accepted.len(),
            rejected = rejections.len(),
            "classified"
        );

        let grouping =
            group_variants(&accepted, self.config.collision_policy, self.config.unify_jpeg);
        let mut variants = grouping.variants;
        for variant in &mut variants {
            variant.slug = self.slug_for(&variant.attributes);
        }

        let discards = apply_retention(&mut variants, &self.config.retention);
        info!(
            variants = variants.len(),
            collisions = grouping.collisions.len(),
            discarded = discards.len(),
            "grouped"
        );

        let manifest = Manifest::build(self.vocabulary(), accepted.iter().map(|a| &a.attributes));

        let mut placements = Vec::with_capacity(accepted.len());
        for record in &accepted {
            match synthesize(self.vocabulary(), record) {
                Ok(p) => placements.push(p),
                Err(e) => warn!(locator = record.record.locator(), error = %e, "no placement"),
            }
        }

        let summary = RejectionSummary::from_entries(&rejections, self.config.max_examples);
        info!(
            groups = manifest.groups().count(),
            placements = placements.len(),
            "catalog built"
        );

        Ok(CatalogRun {
            accepted,
            rejections,
            variants,
            collisions: grouping.collisions,
            discards,
            manifest,
            placements,
            summary,
        })
    }

    fn slug_for(&self, attributes: &ClassifiedAttributes) -> String {
        canonical_stem(self.vocabulary(), attributes, false).unwrap_or_else(|e| {
            warn!(error = %e, "falling back to attribute slug");
            attributes
                .iter()
                .map(|(_, v)| v.to_string())
                .collect::<Vec<_>>()
                .join("-")
        })
    }
}
