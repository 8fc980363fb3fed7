//! One-shot user notices.
//!
//! A notice is queued by an action and shown once on the next rendered
//! page. All user-facing texts are Arabic.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    /// CSS class suffix used by the templates.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A message shown once to the admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Error notice for a failed action.
    ///
    /// Prefers the backend's own message, then the failure reason, then
    /// `fallback`.
    #[must_use]
    pub fn from_error(err: &AppError, fallback: &str) -> Self {
        let message = match err {
            AppError::Backend(e) => e.reason(),
            AppError::Validation(m) => m.clone(),
            AppError::Busy => messages::BUSY.to_owned(),
            other => other.to_string(),
        };
        if message.trim().is_empty() {
            Self::error(fallback)
        } else {
            Self::error(message)
        }
    }
}

/// Notice texts.
pub mod messages {
    pub const COMMAND_APPROVED: &str = "تم قبول الطلب وإرسال إيميل للعميل";
    pub const COMMAND_REJECTED: &str = "تم رفض الطلب وإرسال إيميل للعميل";
    pub const COMMAND_APPROVED_NO_EMAIL: &str = "تم قبول الطلب";
    pub const COMMAND_REJECTED_NO_EMAIL: &str = "تم رفض الطلب";
    pub const COMMAND_APPROVE_FAILED: &str = "حدث خطأ أثناء قبول الطلب";
    pub const COMMAND_REJECT_FAILED: &str = "حدث خطأ أثناء رفض الطلب";

    pub const WORKER_APPROVED: &str = "تم قبول العامل بنجاح";
    pub const WORKER_REJECTED: &str = "تم رفض العامل بنجاح";
    pub const WORKER_APPROVE_FAILED: &str = "حدث خطأ أثناء قبول العامل";
    pub const WORKER_REJECT_FAILED: &str = "حدث خطأ أثناء رفض العامل";
    pub const WORKER_PASSWORD_REQUIRED: &str = "يرجى إدخال كلمة مرور للعامل";

    pub const EMAIL_FAILED: &str = "فشل في إرسال الإيميل للعميل";
    pub const ALREADY_DECIDED: &str = "تم اتخاذ قرار بشأن هذا الطلب مسبقاً";
    pub const BUSY: &str = "جاري تنفيذ عملية أخرى، يرجى الانتظار";

    pub const SAMPLE_DATA: &str = "الخادم يحتوي على خطأ في قاعدة البيانات. يتم عرض بيانات تجريبية.";
    pub const LOAD_FAILED_PREFIX: &str = "فشل في تحميل البيانات: ";
    pub const UNEXPECTED: &str = "خطأ غير متوقع";
    pub const WORKERS_LOAD_FAILED: &str = "تعذر تحميل طلبات العمال";

    pub const LOGIN_REQUIRED: &str = "يرجى إدخال اسم المستخدم وكلمة المرور";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;

    #[test]
    fn test_from_error_prefers_backend_message() {
        let err = AppError::Backend(BackendError::Status {
            status: 404,
            message: Some("command not found".to_string()),
        });
        let notice = Notice::from_error(&err, messages::COMMAND_APPROVE_FAILED);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "command not found");
    }

    #[test]
    fn test_from_error_uses_reason_without_message() {
        let err = AppError::Backend(BackendError::Request("connection refused".to_string()));
        let notice = Notice::from_error(&err, messages::COMMAND_APPROVE_FAILED);
        assert_eq!(notice.message, "Backend request failed: connection refused");
    }

    #[test]
    fn test_from_error_falls_back() {
        let err = AppError::Validation("  ".to_string());
        let notice = Notice::from_error(&err, messages::WORKER_REJECT_FAILED);
        assert_eq!(notice.message, messages::WORKER_REJECT_FAILED);
    }

    #[test]
    fn test_busy_notice() {
        let notice = Notice::from_error(&AppError::Busy, messages::COMMAND_REJECT_FAILED);
        assert_eq!(notice.message, messages::BUSY);
    }
}
