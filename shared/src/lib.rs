//! Shared types for the storefront
//!
//! Wire models exchanged between store-server and store-client,
//! plus small id/time utilities.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
