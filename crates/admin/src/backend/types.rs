//! Request bodies and routing options for the backend API.

use serde::Serialize;

/// Which base URL a listing call goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingRoute {
    /// The configured API URL (may be a proxy).
    Primary,
    /// The backend URL itself.
    Direct,
}

/// Body of `PUT /UpdateCommandStatus`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommandStatus<'a> {
    pub command_id: &'a str,
    pub status: &'static str,
}

/// Body of `PUT /UpdateWorkerStatus`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkerStatus<'a> {
    pub worker_id: &'a str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
}

impl std::fmt::Debug for UpdateWorkerStatus<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateWorkerStatus")
            .field("worker_id", &self.worker_id)
            .field("status", &self.status)
            .field("password", &self.password.map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_command_body_shape() {
        let body = UpdateCommandStatus {
            command_id: "cmd-001",
            status: "approved",
        };
        assert_eq!(
            serde_json::to_value(&body).expect("serialize"),
            json!({"commandId": "cmd-001", "status": "approved"})
        );
    }

    #[test]
    fn test_worker_body_omits_missing_password() {
        let body = UpdateWorkerStatus {
            worker_id: "worker-001",
            status: "rejected",
            password: None,
        };
        assert_eq!(
            serde_json::to_value(&body).expect("serialize"),
            json!({"workerId": "worker-001", "status": "rejected"})
        );
    }

    #[test]
    fn test_worker_body_debug_redacts_password() {
        let body = UpdateWorkerStatus {
            worker_id: "worker-001",
            status: "approved",
            password: Some("s3cret-pw"),
        };
        assert!(!format!("{body:?}").contains("s3cret-pw"));
    }
}
