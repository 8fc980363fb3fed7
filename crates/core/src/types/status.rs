//! Status enums for service orders and worker applications.

use serde::{Deserialize, Serialize};

/// Review status of a service order ("command").
///
/// Moves only `Pending -> Approved` or `Pending -> Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl CommandStatus {
    /// Wire value used by the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Arabic label shown in the dashboard and sent in customer emails.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "في الانتظار",
            Self::Approved => "مقبول",
            Self::Rejected => "مرفوض",
        }
    }

    /// Whether the order still awaits a decision.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Lenient parse used by the normalizer: unknown values are pending.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        s.trim().parse().unwrap_or_default()
    }
}

impl std::fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommandStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("invalid command status: {s}")),
        }
    }
}

/// Review status of a worker application, derived from its tri-state
/// `is_accepted` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Map the backend's `isAccepted` tri-state.
    #[must_use]
    pub const fn from_accepted(is_accepted: Option<bool>) -> Self {
        match is_accepted {
            None => Self::Pending,
            Some(true) => Self::Approved,
            Some(false) => Self::Rejected,
        }
    }

    /// Inverse of [`ApplicationStatus::from_accepted`].
    #[must_use]
    pub const fn as_accepted(self) -> Option<bool> {
        match self {
            Self::Pending => None,
            Self::Approved => Some(true),
            Self::Rejected => Some(false),
        }
    }

    /// Arabic label shown in the dashboard.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "في الانتظار",
            Self::Approved => "مقبول",
            Self::Rejected => "مرفوض",
        }
    }

    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// An admin decision on a pending record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Status a command ends up in after this decision.
    #[must_use]
    pub const fn command_status(self) -> CommandStatus {
        match self {
            Self::Approve => CommandStatus::Approved,
            Self::Reject => CommandStatus::Rejected,
        }
    }

    /// Status a worker application ends up in after this decision.
    #[must_use]
    pub const fn application_status(self) -> ApplicationStatus {
        match self {
            Self::Approve => ApplicationStatus::Approved,
            Self::Reject => ApplicationStatus::Rejected,
        }
    }

    /// Wire value sent in update requests.
    #[must_use]
    pub const fn wire_status(self) -> &'static str {
        self.command_status().as_str()
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approve => write!(f, "approve"),
            Self::Reject => write!(f, "reject"),
        }
    }
}
