//! Notification-related errors.

use thiserror::Error;

/// Errors that can occur when dispatching a customer notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The order has no usable recipient address.
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    /// HTTP request failed.
    #[error("EmailJS request failed: {0}")]
    Request(String),

    /// EmailJS rejected the send.
    #[error("EmailJS API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },
}
