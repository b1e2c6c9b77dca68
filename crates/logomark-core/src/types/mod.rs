pub mod attribute;
pub mod record;

pub use attribute::{AssetType, AttributeGroup, AttributeValue, ClassifiedAttributes};
pub use record::{AcceptedRecord, RawFileRecord, RejectionEntry, RejectionReason};
