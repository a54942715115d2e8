//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity and Location Types
//!
//! - [`StoreId`]: natural record key for stores and pickup points
//! - [`PostalCode`]: normalized 8-digit Brazilian CEP
//! - [`RegionCode`]: two-letter federative unit code
//! - [`Coordinate`]: validated geographic coordinate
//!
//! ## Quoting Types
//!
//! - [`Money`]: non-negative BRL amount with fixed two-decimal rendering
//! - [`LeadTime`]: delivery estimate in business days

pub mod coordinate;
pub mod lead_time;
pub mod money;
pub mod postal_code;
pub mod region_code;
pub mod store_id;

pub use coordinate::Coordinate;
pub use lead_time::LeadTime;
pub use money::Money;
pub use postal_code::PostalCode;
pub use region_code::RegionCode;
pub use store_id::StoreId;
