//! # Domain Entities
//!
//! Catalog entities read by the resolution pipeline.
//!
//! ## Entities
//!
//! - [`StoreRecord`]: distribution point or retail store record

pub mod store;

pub use store::{StoreKind, StoreRecord, StoreRecordBuilder};
