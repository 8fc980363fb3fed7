//! Service order review commands.
//!
//! # Usage
//!
//! ```bash
//! # List orders with their status
//! krixo commands list
//!
//! # Approve or reject a pending order (emails the customer when EmailJS is configured)
//! krixo commands approve cmd-001
//! krixo commands reject cmd-001
//! ```
//!
//! # Environment Variables
//!
//! - `KRIXO_BACKEND_URL` - Backend base URL
//! - `KRIXO_API_URL` - Listing URL (defaults to the backend URL)
//! - `EMAILJS_PUBLIC_KEY` - Enables customer decision emails

use krixo_core::{CommandId, Decision};

use super::{CliError, Context, report};

/// Log every service order in the current listing.
///
/// # Errors
///
/// Returns error if configuration is invalid or the backend cannot be reached.
pub async fn list() -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    ctx.load().await?;

    let snapshot = ctx.dashboard.snapshot();
    tracing::info!(
        total = snapshot.commands.len(),
        pending = snapshot.pending_commands(),
        sample_data = snapshot.sample_data,
        via_proxy = snapshot.via_proxy,
        "Service orders"
    );
    for order in &snapshot.commands {
        tracing::info!(
            id = %order.id,
            status = %order.status,
            name = %order.name,
            services = %order.services_display(),
            price = %order.price,
            "order"
        );
    }
    Ok(())
}

/// Approve or reject one service order.
///
/// The listing is loaded first so already decided orders are refused
/// and the customer email has a recipient.
///
/// # Errors
///
/// Returns error if the order was already decided or the backend rejects the update.
pub async fn decide(id: &str, decision: Decision) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    ctx.load().await?;

    let id = CommandId::new(id);
    let transitions = ctx.transitions();
    let result = match decision {
        Decision::Approve => transitions.approve_command(&id).await?,
        Decision::Reject => transitions.reject_command(&id).await?,
    };

    tracing::info!(id = %id, decision = %decision, email = ?result.email, "Order updated");
    report(&result.notices);
    Ok(())
}
