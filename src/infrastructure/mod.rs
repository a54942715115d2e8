//! # Infrastructure Layer
//!
//! Adapters for every external collaborator the resolver talks to.
//!
//! ## Modules
//!
//! - [`http`]: shared HTTP client plumbing and [`http::ProviderError`]
//! - [`geocoding`]: postal code → coordinate + normalized address
//! - [`routing`]: coordinate pair → road distance
//! - [`carriers`]: carrier rate quoting
//! - [`persistence`]: store catalog port and in-memory implementation

pub mod carriers;
pub mod geocoding;
pub mod http;
pub mod persistence;
pub mod routing;
