//! Gradebook REST API access
//!
//! - `client`: `ApiClient`, one method per endpoint
//! - `models`: request/response bodies
//! - `error`: `ApiError`

mod client;
mod error;
pub mod models;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ApiClient;
pub use error::ApiError;
