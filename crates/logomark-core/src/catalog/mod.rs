//! Catalog assembly: variants, manifest, placements, retention, the import
//! spreadsheet and the rejection summary.

pub mod grouper;
pub mod manifest;
pub mod rejection;
pub mod retention;
pub mod spreadsheet;
pub mod synthesizer;

pub use grouper::{
    CollisionPolicy, Grouping, SlotCollision, SlotKey, Variant, VariantKey, group_variants,
};
pub use manifest::{Manifest, ManifestGroup, ManifestOption};
pub use rejection::{ReasonGroup, RejectionSummary};
pub use retention::{
    AccentBan, BuiltinRule, RetentionDiscard, RetentionPredicate, SmallTrademark, WhiteJpeg,
    apply_retention,
};
pub use spreadsheet::ImportSheet;
pub use synthesizer::{Placement, canonical_stem, folder_segments, synthesize};
