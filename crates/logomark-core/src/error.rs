use thiserror::Error;

use crate::types::AssetType;

/// Errors that can occur during Logomark core operations.
///
/// Per-file classification failures are not errors: they are reported as
/// [`RejectionReason`](crate::types::RejectionReason) values and never abort
/// a run.
#[derive(Debug, Error)]
pub enum LogomarkError {
    /// The run received no file locators at all.
    #[error("no input locators to process")]
    EmptyInput,

    /// The vocabulary configuration is contradictory.
    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    /// No `AssetTypeSpec` is configured for the requested asset type.
    #[error("no asset type spec configured for {0}")]
    UnknownAssetType(AssetType),

    /// An attribute set cannot be rendered into a folder path and filename.
    #[error("cannot synthesize placement: {0}")]
    Synthesis(String),

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// A vocabulary document could not be decoded.
    #[error("vocabulary decoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// The import spreadsheet could not be written.
    #[error("spreadsheet error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for Logomark operations.
pub type Result<T> = std::result::Result<T, LogomarkError>;
