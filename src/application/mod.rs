//! # Application Layer
//!
//! Orchestration services and the error taxonomy for resolution requests.

pub mod error;
pub mod services;

pub use error::{CandidateError, ResolutionError, ResolutionResult};
pub use services::{FulfillmentResolver, FulfillmentResult, QuoteAggregator, ShippingOption};
