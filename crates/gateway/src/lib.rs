//! Client for the remote AI content-generation API (PRD-02).
//!
//! [`RemoteApiClient`] wraps every outbound call: it adds the API-key
//! header, classifies the outcome into [`GatewayError`] variants that
//! callers cannot ignore, hands each call to the audit logger, and
//! records credit consumption for generation calls.

pub mod client;
pub mod error;
pub mod generation;
pub mod logging;

pub use client::{GatewayConfig, RemoteApiClient};
pub use error::GatewayError;
pub use logging::CallLogger;
