//! KRIXO backend integration.
//!
//! This module provides:
//! - [`BackendClient`] for listing and updating commands and worker applications
//! - [`AdminBackend`], the seam the admin services are written against
//! - Request bodies for the status update endpoints
//!
//! # Endpoints
//!
//! ```text
//! GET  {api_url}/GetCommands          primary command listing
//! GET  {backend_url}/GetCommands      "direct" command listing
//! GET  {backend_url}/GetWorkers       worker application listing
//! PUT  {backend_url}/UpdateCommandStatus
//! PUT  {backend_url}/UpdateWorkerStatus
//! ```

use std::future::Future;

use krixo_core::{CommandId, Decision, WorkerId};
use serde_json::Value;

mod client;
mod error;
mod types;

pub use client::BackendClient;
pub use error::BackendError;
pub use types::{ListingRoute, UpdateCommandStatus, UpdateWorkerStatus};

/// Operations the admin needs from the KRIXO backend.
///
/// Listing calls return the raw JSON payload; shaping it is the
/// normalizer's job.
pub trait AdminBackend: Send + Sync {
    /// Fetch the service order listing through `route`.
    fn list_commands(
        &self,
        route: ListingRoute,
    ) -> impl Future<Output = Result<Value, BackendError>> + Send;

    /// Fetch the worker application listing.
    fn list_workers(&self) -> impl Future<Output = Result<Value, BackendError>> + Send;

    /// Record an admin decision on a service order.
    fn update_command_status(
        &self,
        id: &CommandId,
        decision: Decision,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    /// Record an admin decision on a worker application.
    ///
    /// `password` is the initial account password handed to an approved worker.
    fn update_worker_status(
        &self,
        id: &WorkerId,
        decision: Decision,
        password: Option<&str>,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;
}
