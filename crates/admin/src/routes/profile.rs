//! Worker profile page.

use askama::Template;
use axum::response::Html;
use krixo_core::{ApplicationStatus, WorkerProfile};
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::{RequireWorker, take_notices};
use crate::services::Notice;

/// Worker profile template.
#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub notices: Vec<Notice>,
    pub profile: WorkerProfile,
    pub headline: &'static str,
    pub status_class: &'static str,
}

impl ProfileTemplate {
    #[must_use]
    pub fn new(profile: WorkerProfile, notices: Vec<Notice>) -> Self {
        let (headline, status_class) = match profile.application.status() {
            ApplicationStatus::Approved => ("تم قبول طلبك!", "approved"),
            ApplicationStatus::Rejected => ("لم يتم قبول طلبك", "rejected"),
            ApplicationStatus::Pending => ("طلبك قيد المراجعة", "pending"),
        };
        Self {
            notices,
            profile,
            headline,
            status_class,
        }
    }
}

/// Profile page for a worker login.
pub async fn profile(
    RequireWorker(profile): RequireWorker,
    session: Session,
) -> Result<Html<String>, AppError> {
    let notices = take_notices(&session).await;
    Ok(Html(ProfileTemplate::new(*profile, notices).render()?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use krixo_core::sample::sample_worker_profile;

    use super::*;

    #[test]
    fn test_profile_renders_sample() {
        let html = ProfileTemplate::new(sample_worker_profile(), Vec::new())
            .render()
            .unwrap();
        assert!(html.contains("محمد علي أحمد"));
        assert!(html.contains("تم قبول طلبك!"));
        assert!(html.contains("تنظيف السجاد"));
        assert!(html.contains("2000-2500 دج شهرياً"));
    }
}
