//! EmailJS REST client.
//!
//! Sends templated emails through `POST /api/v1.0/email/send`.

use krixo_core::{Decision, ServiceOrder};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, error, instrument};

use super::Notifier;
use super::error::NotificationError;
use crate::config::EmailJsConfig;

/// EmailJS send endpoint.
pub const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Template parameters for the order decision emails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionEmail {
    pub to_email: String,
    pub to_name: String,
    /// Arabic status label ("مقبول" / "مرفوض").
    pub status: String,
    pub service_details: String,
    pub price: String,
    pub start_location: String,
    pub end_location: String,
}

impl DecisionEmail {
    /// Build the template parameters for `order`.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::InvalidRecipient`] if the order carries no
    /// parseable email address.
    pub fn for_order(order: &ServiceOrder, decision: Decision) -> Result<Self, NotificationError> {
        let recipient = order
            .recipient()
            .ok_or_else(|| NotificationError::InvalidRecipient(format!("{:?}", order.email)))?;

        Ok(Self {
            to_email: recipient.as_str().to_owned(),
            to_name: order.name.clone(),
            status: decision.command_status().label().to_owned(),
            service_details: order.services_display(),
            price: order.price.clone(),
            start_location: order.start.clone(),
            end_location: order.end.clone(),
        })
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a DecisionEmail,
}

/// EmailJS client for order decision emails.
#[derive(Clone)]
pub struct EmailJsClient {
    client: Client,
    send_url: String,
    public_key: SecretString,
    service_id: String,
    approved_template: String,
    rejected_template: String,
}

impl std::fmt::Debug for EmailJsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailJsClient")
            .field("send_url", &self.send_url)
            .field("public_key", &"[REDACTED]")
            .field("service_id", &self.service_id)
            .finish_non_exhaustive()
    }
}

impl EmailJsClient {
    /// Create a new EmailJS client against the public API.
    #[must_use]
    pub fn new(config: &EmailJsConfig) -> Self {
        Self::with_send_url(config, EMAILJS_SEND_URL)
    }

    /// Create a client that posts to a custom send URL.
    #[must_use]
    pub fn with_send_url(config: &EmailJsConfig, send_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            send_url: send_url.into(),
            public_key: config.public_key.clone(),
            service_id: config.service_id.clone(),
            approved_template: config.approved_template.clone(),
            rejected_template: config.rejected_template.clone(),
        }
    }

    /// Template id for a decision.
    #[must_use]
    pub fn template_for(&self, decision: Decision) -> &str {
        match decision {
            Decision::Approve => &self.approved_template,
            Decision::Reject => &self.rejected_template,
        }
    }
}

impl Notifier for EmailJsClient {
    #[instrument(skip(self, order), fields(command_id = %order.id))]
    async fn send_decision(
        &self,
        order: &ServiceOrder,
        decision: Decision,
    ) -> Result<(), NotificationError> {
        let params = DecisionEmail::for_order(order, decision)?;
        let request = SendRequest {
            service_id: &self.service_id,
            template_id: self.template_for(decision),
            user_id: self.public_key.expose_secret(),
            template_params: &params,
        };

        let response = self
            .client
            .post(&self.send_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotificationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), message = %message, "EmailJS send failed");
            return Err(NotificationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!(template = request.template_id, "Decision email sent");
        Ok(())
    }
}
