//! Service order ("command") record.

use serde::{Deserialize, Serialize};

use crate::types::{CommandId, CommandStatus, Email};

/// A customer request for a home service.
///
/// Serialized in the backend's camelCase shape so that a normalized record
/// fed back through the normalizer comes out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrder {
    pub id: CommandId,
    pub name: String,
    pub phone: String,
    /// May be empty; see [`ServiceOrder::recipient`].
    pub email: String,
    pub floor: String,
    pub item_type: String,
    pub services: Vec<String>,
    pub workers: String,
    pub start: String,
    pub end: String,
    pub price: String,
    pub status: CommandStatus,
    pub created_at: String,
    pub description: String,
}

impl ServiceOrder {
    /// Services joined for display and email templates.
    #[must_use]
    pub fn services_display(&self) -> String {
        self.services.join(", ")
    }

    /// Parsed contact email, if the record carries a usable one.
    #[must_use]
    pub fn recipient(&self) -> Option<Email> {
        Email::parse(&self.email).ok()
    }

    /// Whether the order still awaits an admin decision.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Copy of this order with a new status; every other field is untouched.
    #[must_use]
    pub fn with_status(&self, status: CommandStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}
