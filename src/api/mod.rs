//! Outbound HTTP: the single backend client and its error taxonomy.

pub mod client;
pub mod error;

pub use client::{ApiClient, RegisterAck, RegisterRequest, SessionExpired, TokenGrant};
pub use error::ApiError;
