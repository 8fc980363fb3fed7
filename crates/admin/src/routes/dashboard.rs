//! Dashboard route handlers.

use askama::Template;
use axum::{
    Form,
    extract::{Query, State},
    response::{Html, Redirect},
};
use chrono::DateTime;
use krixo_core::{CommandStatus, ServiceOrder, WorkerApplication};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::{RequireAdmin, queue_notices, take_notices};
use crate::services::{DashboardSnapshot, Notice};
use crate::state::AppState;

/// Dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Commands,
    Workers,
}

impl Tab {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Commands => "commands",
            Self::Workers => "workers",
        }
    }

    /// Dashboard URL with this tab selected.
    #[must_use]
    pub fn location(self) -> String {
        format!("/?tab={}", self.as_str())
    }
}

/// Query string for the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub tab: Tab,
}

/// Form data for the refresh button.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshForm {
    #[serde(default)]
    pub tab: Tab,
}

/// Service order card.
#[derive(Debug, Clone)]
pub struct CommandView {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub floor: String,
    pub item_type: String,
    pub services: String,
    pub workers: String,
    pub start: String,
    pub end: String,
    pub price: String,
    pub description: String,
    pub created_at: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub is_pending: bool,
}

impl From<&ServiceOrder> for CommandView {
    fn from(order: &ServiceOrder) -> Self {
        Self {
            id: order.id.to_string(),
            name: order.name.clone(),
            phone: order.phone.clone(),
            email: order.email.clone(),
            floor: order.floor.clone(),
            item_type: order.item_type.clone(),
            services: order.services_display(),
            workers: order.workers.clone(),
            start: order.start.clone(),
            end: order.end.clone(),
            price: order.price.clone(),
            description: order.description.clone(),
            created_at: format_date(&order.created_at),
            status_label: order.status.label(),
            status_class: order.status.as_str(),
            is_pending: order.is_pending(),
        }
    }
}

/// Worker application card.
#[derive(Debug, Clone)]
pub struct WorkerView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub experience: String,
    pub message: String,
    pub created_at: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub is_pending: bool,
}

impl From<&WorkerApplication> for WorkerView {
    fn from(worker: &WorkerApplication) -> Self {
        let status = worker.status();
        Self {
            id: worker.id.to_string(),
            name: worker.name.clone(),
            email: worker.email.clone(),
            phone: worker.phone.clone(),
            position: worker.position.clone(),
            experience: worker.experience.clone(),
            message: worker.message.clone(),
            created_at: format_date(&worker.created_at),
            status_label: status.label(),
            status_class: match status.as_accepted() {
                None => CommandStatus::Pending.as_str(),
                Some(true) => CommandStatus::Approved.as_str(),
                Some(false) => CommandStatus::Rejected.as_str(),
            },
            is_pending: worker.is_pending(),
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub username: String,
    pub notices: Vec<Notice>,
    pub tab: &'static str,
    pub commands: Vec<CommandView>,
    pub workers: Vec<WorkerView>,
    pub pending_commands: usize,
    pub pending_workers: usize,
    pub via_proxy: bool,
    pub sample_data: bool,
    pub busy: bool,
}

/// Connection error panel, shown while the backend is unreachable.
#[derive(Template)]
#[template(path = "backend_error.html")]
pub struct BackendErrorTemplate {
    pub notices: Vec<Notice>,
    pub reason: String,
    pub tab: &'static str,
}

/// Render an RFC 3339 timestamp as a date, or pass it through unchanged.
fn format_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map_or_else(|_| raw.to_owned(), |dt| dt.format("%Y-%m-%d").to_string())
}

fn render_dashboard(
    username: String,
    notices: Vec<Notice>,
    tab: Tab,
    snapshot: &DashboardSnapshot,
    busy: bool,
) -> Result<String, AppError> {
    if let Some(reason) = &snapshot.backend_error {
        let template = BackendErrorTemplate {
            notices,
            reason: reason.clone(),
            tab: tab.as_str(),
        };
        return Ok(template.render()?);
    }

    let template = DashboardTemplate {
        username,
        notices,
        tab: tab.as_str(),
        commands: snapshot.commands.iter().map(CommandView::from).collect(),
        workers: snapshot.workers.iter().map(WorkerView::from).collect(),
        pending_commands: snapshot.pending_commands(),
        pending_workers: snapshot.pending_workers(),
        via_proxy: snapshot.via_proxy,
        sample_data: snapshot.sample_data,
        busy,
    };
    Ok(template.render()?)
}

/// Dashboard page handler.
///
/// The first visit after startup loads both collections.
#[instrument(skip(state, session))]
pub async fn dashboard(
    RequireAdmin(username): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let mut notices = take_notices(&session).await;
    if !state.dashboard().snapshot().loaded {
        notices.extend(state.refresh().await);
    }

    let snapshot = state.dashboard().snapshot();
    let html = render_dashboard(
        username,
        notices,
        query.tab,
        &snapshot,
        state.dashboard().is_busy(),
    )?;
    Ok(Html(html))
}

/// Reload both collections from the backend.
#[instrument(skip(state, session))]
pub async fn refresh(
    RequireAdmin(_username): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RefreshForm>,
) -> Redirect {
    let notices = state.refresh().await;
    queue_notices(&session, notices).await;
    Redirect::to(&form.tab.location())
}
