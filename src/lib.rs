//! # Store Fulfillment
//!
//! Fulfillment resolution engine. Given a Brazilian postal code, it
//! resolves the ranked set of fulfillment options a customer may use,
//! physical pickup points with flat-rate local courier and online-shippable
//! stores quoted through a carrier, each annotated with shipping price and
//! delivery estimate.
//!
//! # Architecture
//!
//! The crate is layered:
//!
//! - [`domain`]: value objects, the store entity, and the proximity
//!   classifier. Pure, no I/O.
//! - [`application`]: the quote aggregator and the fulfillment resolver,
//!   orchestrating ports with bounded fan-out concurrency.
//! - [`infrastructure`]: HTTP adapters for the geocoder, the routing
//!   provider, and the carrier, plus the store catalog port.
//! - [`api`]: the axum REST surface.
//!
//! # Resolution pipeline
//!
//! ```text
//! CEP -> geocoder -> origin coordinate
//!     -> catalog: candidate distribution points
//!     -> per candidate (concurrent, bounded):
//!        road distance -> tier (<= 50 km: LOCAL, else CARRIER)
//!        LOCAL:   flat-rate courier, quoted lead time
//!        CARRIER: associated store -> Sedex + PAC quoted concurrently
//!     -> drop failed candidates -> sort by distance -> respond
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
