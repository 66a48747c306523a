//! # shopper-cli
//!
//! A command-line client for the `shopper-server` API.

pub mod api_client;
pub mod render;

pub use api_client::{ApiClient, DEFAULT_BASE_URL};
