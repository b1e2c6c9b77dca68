//! # Logomark Core
//!
//! Deterministic filename taxonomy for brand-asset catalogs. Decodes logo
//! filenames into attribute sets, rejects non-conforming names with every
//! reason at once, merges format and color-mode siblings into variants, and
//! computes canonical destination paths.
//!
//! ## Quick Start
//!
//! ```rust
//! use logomark_core::{Engine, RawFileRecord};
//!
//! let engine = Engine::korte_hoffmann().unwrap();
//! let run = engine
//!     .run(&[
//!         RawFileRecord::from_locator("logos/Gruppe_Left_Black_Size-M_rgb.svg"),
//!         RawFileRecord::from_locator("logos/Gruppe_Left_Black_Size-M_cmyk.pdf"),
//!         RawFileRecord::from_locator("logos/mystery_black.svg"),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(run.variants.len(), 1);
//! assert_eq!(run.variants[0].links.len(), 2);
//! assert_eq!(run.rejections[0].file, "mystery_black.svg");
//! ```
pub mod catalog;
pub mod engine;
pub mod error;
pub mod parser;
pub mod types;
pub mod vocabulary;

// Re-export primary API
pub use catalog::{
    BuiltinRule, CollisionPolicy, ImportSheet, Manifest, Placement, RejectionSummary,
    RetentionDiscard, RetentionPredicate, SlotCollision, SlotKey, Variant, VariantKey,
};
pub use engine::{CatalogExport, CatalogRun, Engine, EngineConfig};
pub use error::{LogomarkError, Result};
pub use parser::{Classification, Classifier};
pub use types::{
    AcceptedRecord, AssetType, AttributeGroup, AttributeValue, ClassifiedAttributes, RawFileRecord,
    RejectionEntry, RejectionReason,
};
pub use vocabulary::{AssetTypeSpec, Vocabulary, VocabularyDocument, VocabularyEntry};
