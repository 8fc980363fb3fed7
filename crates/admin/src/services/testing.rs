//! In-memory fakes for service tests.

use std::sync::Mutex;

use krixo_core::{CommandId, Decision, ServiceOrder, WorkerId};
use serde_json::{Value, json};

use crate::backend::{AdminBackend, BackendError, ListingRoute};
use crate::notify::{NotificationError, Notifier};

/// Scripted [`AdminBackend`] that records every call.
pub struct FakeBackend {
    primary: Result<Value, BackendError>,
    direct: Result<Value, BackendError>,
    workers: Result<Value, BackendError>,
    update: Result<(), BackendError>,
    calls: Mutex<Vec<String>>,
    passwords: Mutex<Vec<Option<String>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            primary: Ok(json!([])),
            direct: Ok(json!([])),
            workers: Ok(json!([])),
            update: Ok(()),
            calls: Mutex::new(Vec::new()),
            passwords: Mutex::new(Vec::new()),
        }
    }

    pub fn with_primary(mut self, result: Result<Value, BackendError>) -> Self {
        self.primary = result;
        self
    }

    pub fn with_direct(mut self, result: Result<Value, BackendError>) -> Self {
        self.direct = result;
        self
    }

    pub fn with_workers(mut self, result: Result<Value, BackendError>) -> Self {
        self.workers = result;
        self
    }

    pub fn with_update(mut self, result: Result<(), BackendError>) -> Self {
        self.update = result;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn passwords(&self) -> Vec<Option<String>> {
        self.passwords.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl AdminBackend for FakeBackend {
    async fn list_commands(&self, route: ListingRoute) -> Result<Value, BackendError> {
        match route {
            ListingRoute::Primary => {
                self.record("list_commands:primary".to_string());
                self.primary.clone()
            }
            ListingRoute::Direct => {
                self.record("list_commands:direct".to_string());
                self.direct.clone()
            }
        }
    }

    async fn list_workers(&self) -> Result<Value, BackendError> {
        self.record("list_workers".to_string());
        self.workers.clone()
    }

    async fn update_command_status(
        &self,
        id: &CommandId,
        decision: Decision,
    ) -> Result<(), BackendError> {
        self.record(format!("update_command:{id}:{}", decision.wire_status()));
        self.update.clone()
    }

    async fn update_worker_status(
        &self,
        id: &WorkerId,
        decision: Decision,
        password: Option<&str>,
    ) -> Result<(), BackendError> {
        self.record(format!("update_worker:{id}:{}", decision.wire_status()));
        self.passwords
            .lock()
            .unwrap()
            .push(password.map(str::to_owned));
        self.update.clone()
    }
}

/// [`Notifier`] that records sends and optionally fails them.
pub struct FakeNotifier {
    fail: bool,
    sent: Mutex<Vec<(String, Decision)>>,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self {
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(String, Decision)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for FakeNotifier {
    async fn send_decision(
        &self,
        order: &ServiceOrder,
        decision: Decision,
    ) -> Result<(), NotificationError> {
        self.sent
            .lock()
            .unwrap()
            .push((order.id.to_string(), decision));
        if self.fail {
            return Err(NotificationError::Api {
                status: 400,
                message: "The template ID is invalid".to_string(),
            });
        }
        Ok(())
    }
}
