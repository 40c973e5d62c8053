//! Identity and principal types shared by the authentication server.
//!
//! - [`identity`] -- the durable identity record as storage hands it over.
//! - [`principal`] -- the immutable per-attempt principal and its adapter.
//! - [`store`] -- the storage seam and the principal loader built on it.

pub mod error;
pub mod identity;
pub mod principal;
pub mod store;
pub mod types;
