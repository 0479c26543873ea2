//! HTTP client module
//!
//! Thin wrapper over `reqwest` used by the page fetcher.
//!
//! # Features
//!
//! - **Default Headers**: User-Agent and custom headers on every request
//! - **Timeouts**: Per-client request timeout
//! - **Error Classification**: Non-2xx statuses and transport failures map to
//!   distinct [`Error`](crate::error::Error) variants
//!
//! Requests are sent once. Retrying is left to the caller.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};

#[cfg(test)]
mod tests;
