//! Store Client - HTTP client and session cart store
//!
//! Provides network-based HTTP calls to the store server API, plus the
//! client-side cart state engine with pluggable persistence.

pub mod cart;
pub mod config;
pub mod error;
pub mod http;

pub use cart::{CartStorage, CartStore, FileCartStorage, MemoryCartStorage, PersistedCart};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
