//! KRIXO Core - Shared types library.
//!
//! This crate provides the types used across the KRIXO admin components:
//! - `admin` - Admin dashboard and worker profile server
//! - `cli` - Command-line tool for listing and approving records
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Everything that talks to the backend lives in `krixo-admin`.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, statuses, emails
//! - [`models`] - Canonical service order and worker records
//! - [`normalize`] - Schema-tolerant ingestion of backend listing payloads
//! - [`reducer`] - Pure status transitions over record snapshots
//! - [`sample`] - Fixed sample datasets used in degraded mode and demos

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod normalize;
pub mod reducer;
pub mod sample;
pub mod types;

pub use models::*;
pub use types::*;
