//! Domain types and pure business rules for the BlueBoost platform.
//!
//! This crate has no I/O. Persistence lives in `blueboost-db`, the remote
//! API client in `blueboost-gateway`, HTTP handling in `blueboost-api`.

pub mod catalog;
pub mod error;
pub mod jobs;
pub mod localized;
pub mod masking;
pub mod review;
pub mod staging;
pub mod types;
