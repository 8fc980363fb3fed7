//! KRIXO Admin library.
//!
//! Review service orders and worker job applications submitted to the
//! KRIXO home-services platform. The crate is a library so the binary,
//! the CLI and the integration tests share one implementation.
//!
//! # Security
//!
//! The login gate is a non-production stub: the configured admin pair
//! opens the dashboard and every other login sees a sample worker profile.
//! Do not expose this service publicly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod backend;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod notify;
pub mod routes;
pub mod services;
pub mod state;
