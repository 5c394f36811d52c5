//! # studiobook core
//!
//! Domain types and the availability & pricing calculator shared by the
//! storefront service and the backend client. Everything here is pure and
//! synchronous; the caller supplies the clock.

pub mod availability;
pub mod catalog;
pub mod currency;
pub mod errors;
pub mod hold;
pub mod models;
pub mod pricing;
pub mod session;
pub mod tenant;
pub mod totals;
