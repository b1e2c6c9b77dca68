//! # Logomark
//!
//! Deterministic classification, grouping and placement of brand-asset
//! files. This crate re-exports [`logomark_core`]; see its documentation for
//! the pipeline stages.
//!
//! ```rust
//! use logomark::{Engine, RawFileRecord};
//!
//! let engine = Engine::korte_hoffmann().unwrap();
//! let run = engine
//!     .run(&[RawFileRecord::from_locator("favicon_black.png")])
//!     .unwrap();
//! assert_eq!(
//!     run.placements[0].destination(),
//!     "KORTE-HOFFMANN/Favicons/favicon_black.png"
//! );
//! ```
pub use logomark_core::*;
