//! Worker job application and worker profile records.

use serde::{Deserialize, Serialize};

use crate::types::{ApplicationStatus, WorkerId};

/// A job application submitted by a prospective worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerApplication {
    pub id: WorkerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub experience: String,
    pub message: String,
    /// `None` while pending, `Some(true)` approved, `Some(false)` rejected.
    pub is_accepted: Option<bool>,
    pub created_at: String,
}

impl WorkerApplication {
    #[must_use]
    pub const fn status(&self) -> ApplicationStatus {
        ApplicationStatus::from_accepted(self.is_accepted)
    }

    /// Whether the dashboard still offers the approve form (with its
    /// password input) for this application.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.is_accepted.is_none()
    }

    /// Copy of this application with a new status; every other field is untouched.
    #[must_use]
    pub fn with_status(&self, status: ApplicationStatus) -> Self {
        Self {
            is_accepted: status.as_accepted(),
            ..self.clone()
        }
    }
}

/// Profile shown to a worker after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfile {
    #[serde(flatten)]
    pub application: WorkerApplication,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub availability: String,
    pub salary: String,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use crate::sample::{sample_worker_profile, sample_workers};

    use super::*;

    #[test]
    fn test_status_tracks_is_accepted() {
        let workers = sample_workers();
        assert_eq!(workers[0].status(), ApplicationStatus::Pending);
        assert_eq!(workers[1].status(), ApplicationStatus::Approved);
    }

    #[test]
    fn test_with_status_rejected() {
        let worker = sample_workers()[0].with_status(ApplicationStatus::Rejected);
        assert_eq!(worker.is_accepted, Some(false));
        assert!(!worker.is_pending());
    }

    #[test]
    fn test_profile_flattens_application() {
        let value = serde_json::to_value(sample_worker_profile()).expect("serialize");
        assert_eq!(value["id"], "worker-001");
        assert_eq!(value["isAccepted"], true);
        assert!(value["skills"].is_array());
    }
}
