//! Schema-tolerant ingestion of backend listing payloads.
//!
//! The KRIXO backend has shipped several shapes for the same listing
//! (bare arrays, arrays wrapped in an object, renamed fields). This module
//! turns any JSON value into canonical [`ServiceOrder`] /
//! [`WorkerApplication`] records.
//!
//! # Rules
//!
//! - A bare array is taken as the record list.
//! - An object contributes its first array-valued property (in document
//!   order); an object without one yields no records.
//! - Anything else yields no records.
//! - Each record is mapped 1:1; every canonical attribute is resolved through
//!   the alias table below, falling back to [`UNSPECIFIED`], an empty string,
//!   or the current time.
//!
//! Normalization is total: malformed input never panics and never errors.

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::models::{ServiceOrder, UNSPECIFIED, WorkerApplication};
use crate::types::{CommandId, CommandStatus, WorkerId};

/// What to substitute when none of a field's sources is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// The "unspecified" placeholder.
    Unspecified,
    /// An empty string (free text, optional contact fields).
    Empty,
    /// The current time as RFC 3339.
    Now,
}

impl Fallback {
    fn produce(self) -> String {
        match self {
            Self::Unspecified => UNSPECIFIED.to_owned(),
            Self::Empty => String::new(),
            Self::Now => Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Mapping from one canonical attribute to its source aliases, tried in order.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub sources: &'static [&'static str],
    pub fallback: Fallback,
}

impl FieldRule {
    const fn new(sources: &'static [&'static str], fallback: Fallback) -> Self {
        Self { sources, fallback }
    }

    /// Resolve this attribute on a raw record.
    #[must_use]
    pub fn apply(&self, record: &Value) -> String {
        resolve(record, self.sources).unwrap_or_else(|| self.fallback.produce())
    }
}

const ID_SOURCES: &[&str] = &["id", "_id"];
const SERVICE_SOURCES: &[&str] = &["services", "service"];
const STATUS_SOURCES: &[&str] = &["status"];
const ACCEPTED_SOURCES: &[&str] = &["isAccepted", "is_accepted"];

const NO_RECORDS: &[Value] = &[];

/// Alias table for service orders.
pub mod command_fields {
    use super::{Fallback, FieldRule};

    pub const NAME: FieldRule = FieldRule::new(&["name", "fullname", "firstName"], Fallback::Unspecified);
    pub const PHONE: FieldRule = FieldRule::new(&["phone", "number"], Fallback::Unspecified);
    pub const EMAIL: FieldRule = FieldRule::new(&["email"], Fallback::Empty);
    pub const FLOOR: FieldRule = FieldRule::new(&["floor", "flor"], Fallback::Unspecified);
    pub const ITEM_TYPE: FieldRule = FieldRule::new(&["itemType", "itemtype"], Fallback::Unspecified);
    pub const WORKERS: FieldRule = FieldRule::new(&["workers"], Fallback::Unspecified);
    pub const START: FieldRule = FieldRule::new(&["start"], Fallback::Unspecified);
    pub const END: FieldRule = FieldRule::new(&["end", "distination"], Fallback::Unspecified);
    pub const PRICE: FieldRule = FieldRule::new(&["price"], Fallback::Unspecified);
    pub const CREATED_AT: FieldRule = FieldRule::new(&["createdAt", "created_at"], Fallback::Now);
    pub const DESCRIPTION: FieldRule = FieldRule::new(&["description"], Fallback::Empty);
}

/// Alias table for worker applications.
pub mod worker_fields {
    use super::{Fallback, FieldRule};

    pub const NAME: FieldRule = FieldRule::new(&["name", "fullname"], Fallback::Unspecified);
    pub const EMAIL: FieldRule = FieldRule::new(&["email"], Fallback::Unspecified);
    pub const PHONE: FieldRule = FieldRule::new(&["number", "phone"], Fallback::Unspecified);
    pub const POSITION: FieldRule = FieldRule::new(&["position"], Fallback::Unspecified);
    pub const EXPERIENCE: FieldRule = FieldRule::new(&["experience"], Fallback::Unspecified);
    pub const MESSAGE: FieldRule = FieldRule::new(&["message"], Fallback::Empty);
    pub const CREATED_AT: FieldRule = FieldRule::new(&["createdAt", "created_at"], Fallback::Now);
}

/// Locate the record list inside an arbitrary listing payload.
#[must_use]
pub fn extract_records(payload: &Value) -> &[Value] {
    match payload {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .values()
            .find_map(Value::as_array)
            .map_or(NO_RECORDS, Vec::as_slice),
        _ => NO_RECORDS,
    }
}

/// Normalize a service order listing.
#[must_use]
pub fn normalize_commands(payload: &Value) -> Vec<ServiceOrder> {
    extract_records(payload).iter().map(normalize_command).collect()
}

/// Normalize a worker application listing.
#[must_use]
pub fn normalize_workers(payload: &Value) -> Vec<WorkerApplication> {
    extract_records(payload).iter().map(normalize_worker).collect()
}

/// Normalize one raw service order.
#[must_use]
pub fn normalize_command(record: &Value) -> ServiceOrder {
    use command_fields as f;

    ServiceOrder {
        id: resolve(record, ID_SOURCES).map_or_else(CommandId::synthesize, CommandId::new),
        name: f::NAME.apply(record),
        phone: f::PHONE.apply(record),
        email: f::EMAIL.apply(record),
        floor: f::FLOOR.apply(record),
        item_type: f::ITEM_TYPE.apply(record),
        services: resolve_services(record),
        workers: f::WORKERS.apply(record),
        start: f::START.apply(record),
        end: f::END.apply(record),
        price: f::PRICE.apply(record),
        status: resolve(record, STATUS_SOURCES)
            .map(|s| CommandStatus::parse_lenient(&s))
            .unwrap_or_default(),
        created_at: f::CREATED_AT.apply(record),
        description: f::DESCRIPTION.apply(record),
    }
}

/// Normalize one raw worker application.
#[must_use]
pub fn normalize_worker(record: &Value) -> WorkerApplication {
    use worker_fields as f;

    WorkerApplication {
        id: resolve(record, ID_SOURCES).map_or_else(WorkerId::synthesize, WorkerId::new),
        name: f::NAME.apply(record),
        email: f::EMAIL.apply(record),
        phone: f::PHONE.apply(record),
        position: f::POSITION.apply(record),
        experience: f::EXPERIENCE.apply(record),
        message: f::MESSAGE.apply(record),
        is_accepted: resolve_accepted(record),
        created_at: f::CREATED_AT.apply(record),
    }
}

/// Split a comma-separated service list, trimming every segment.
///
/// Empty segments are kept so the result always has `commas + 1` entries.
#[must_use]
pub fn split_services(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_owned()).collect()
}

/// Render a scalar as a display string. Empty strings, `null`, booleans,
/// arrays and objects count as absent.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Array entries are kept verbatim, empty strings included.
fn service_entry(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn resolve(record: &Value, sources: &[&str]) -> Option<String> {
    sources
        .iter()
        .find_map(|key| record.get(*key).and_then(scalar))
}

fn resolve_services(record: &Value) -> Vec<String> {
    SERVICE_SOURCES
        .iter()
        .find_map(|key| match record.get(*key)? {
            Value::Array(items) => Some(items.iter().filter_map(service_entry).collect()),
            Value::String(s) if !s.is_empty() => Some(split_services(s)),
            _ => None,
        })
        .unwrap_or_else(|| vec![UNSPECIFIED.to_owned()])
}

fn resolve_accepted(record: &Value) -> Option<bool> {
    ACCEPTED_SOURCES
        .iter()
        .find_map(|key| match record.get(*key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;
    use crate::sample::{sample_commands, sample_workers};

    fn malformed_payloads() -> Vec<Value> {
        vec![
            json!(null),
            json!(42),
            json!("GetCommands"),
            json!(true),
            json!({}),
            json!({"message": "ok", "count": 3}),
            json!([]),
            json!([null, 1, "x", [], {}]),
            json!([{"id": null, "name": "", "services": null, "status": 7}]),
            json!([{"services": [1, null, "move", {"a": 1}], "price": 0, "workers": 2.5}]),
            json!({"data": [{"fullname": "Sara", "number": 555, "distination": "Oran"}]}),
        ]
    }

    fn assert_populated(order: &ServiceOrder) {
        assert!(!order.id.as_str().is_empty());
        for field in [
            &order.name,
            &order.phone,
            &order.floor,
            &order.item_type,
            &order.workers,
            &order.start,
            &order.end,
            &order.price,
            &order.created_at,
        ] {
            assert!(!field.is_empty(), "empty field in {order:?}");
        }
    }

    #[test]
    fn test_extract_records_array() {
        let payload = json!([{"id": "a"}, {"id": "b"}]);
        assert_eq!(extract_records(&payload).len(), 2);
    }

    #[test]
    fn test_extract_records_first_array_property() {
        let payload = json!({"total": 2, "commands": [{"id": "a"}], "other": [1, 2, 3]});
        let records = extract_records(&payload);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], "a");
    }

    #[test]
    fn test_extract_records_object_without_array() {
        assert!(extract_records(&json!({"error": "none"})).is_empty());
    }

    #[test]
    fn test_extract_records_scalar() {
        assert!(extract_records(&json!("text")).is_empty());
        assert!(extract_records(&Value::Null).is_empty());
    }

    #[test]
    fn test_every_field_populated_for_malformed_input() {
        for payload in malformed_payloads() {
            let expected = extract_records(&payload).len();
            let orders = normalize_commands(&payload);
            assert_eq!(orders.len(), expected);
            orders.iter().for_each(assert_populated);

            let workers = normalize_workers(&payload);
            assert_eq!(workers.len(), expected);
            for worker in &workers {
                assert!(!worker.name.is_empty());
                assert!(!worker.phone.is_empty());
                assert!(!worker.position.is_empty());
                assert!(!worker.created_at.is_empty());
            }
        }
    }

    #[test]
    fn test_missing_status_is_pending() {
        let order = normalize_command(&json!({"id": "cmd-1"}));
        assert_eq!(order.status, CommandStatus::Pending);
    }

    #[test]
    fn test_unknown_status_is_pending() {
        let order = normalize_command(&json!({"status": "archived"}));
        assert_eq!(order.status, CommandStatus::Pending);
    }

    #[test]
    fn test_comma_separated_services() {
        let order = normalize_command(&json!({"services": "cleaning, delivery"}));
        assert_eq!(order.services, vec!["cleaning", "delivery"]);
    }

    #[test]
    fn test_singular_service_alias() {
        let order = normalize_command(&json!({"service": " moving ,packing,  "}));
        assert_eq!(order.services, vec!["moving", "packing", ""]);
    }

    #[test]
    fn test_split_length_matches_comma_count() {
        for raw in ["a", "a,b", " a , b , c ", ",", "x,,y", "  spaced  out  ,z"] {
            let parts = split_services(raw);
            assert_eq!(parts.len(), raw.matches(',').count() + 1, "input {raw:?}");
            assert!(parts.iter().all(|p| p.trim() == p));
        }
    }

    #[test]
    fn test_services_array_kept_as_is() {
        let order = normalize_command(&json!({"services": [" cleaning ", "delivery"]}));
        assert_eq!(order.services, vec![" cleaning ", "delivery"]);
    }

    #[test]
    fn test_missing_services_wraps_sentinel() {
        let order = normalize_command(&json!({}));
        assert_eq!(order.services, vec![UNSPECIFIED]);
    }

    #[test]
    fn test_name_alias_chain() {
        assert_eq!(normalize_command(&json!({"fullname": "Amina"})).name, "Amina");
        assert_eq!(normalize_command(&json!({"firstName": "Yacine"})).name, "Yacine");
        assert_eq!(
            normalize_command(&json!({"name": "", "fullname": "Amina"})).name,
            "Amina"
        );
        assert_eq!(normalize_command(&json!({})).name, UNSPECIFIED);
    }

    #[test]
    fn test_end_aliases_distination() {
        let order = normalize_command(&json!({"distination": "Oran"}));
        assert_eq!(order.end, "Oran");
    }

    #[test]
    fn test_numbers_rendered_as_strings() {
        let order = normalize_command(&json!({"id": 17, "price": 0, "workers": 3}));
        assert_eq!(order.id.as_str(), "17");
        assert_eq!(order.price, "0");
        assert_eq!(order.workers, "3");
    }

    #[test]
    fn test_mongo_style_id() {
        let order = normalize_command(&json!({"_id": "65a1"}));
        assert_eq!(order.id.as_str(), "65a1");
    }

    #[test]
    fn test_synthesized_ids_unique() {
        let payload = Value::Array(vec![json!({}); 200]);
        let ids: HashSet<_> = normalize_commands(&payload).into_iter().map(|o| o.id).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_email_defaults_empty() {
        assert_eq!(normalize_command(&json!({})).email, "");
    }

    #[test]
    fn test_created_at_defaults_to_now() {
        let order = normalize_command(&json!({}));
        assert!(chrono::DateTime::parse_from_rfc3339(&order.created_at).is_ok());
    }

    #[test]
    fn test_command_normalization_idempotent() {
        let first = normalize_commands(&json!([
            {"name": "Sara", "services": "a, b"},
            {"service": "x,, y"},
            {"_id": 9, "distination": "Oran", "status": "approved", "flor": 2},
            {}
        ]));
        let reserialized = serde_json::to_value(&first).unwrap();
        assert_eq!(normalize_commands(&reserialized), first);

        let samples = sample_commands();
        let reserialized = serde_json::to_value(&samples).unwrap();
        assert_eq!(normalize_commands(&reserialized), samples);
    }

    #[test]
    fn test_worker_normalization_idempotent() {
        let first = normalize_workers(&json!({"workers": [
            {"fullname": "Karim", "number": "0550", "isAccepted": false},
            {"name": "Lina", "isAccepted": null}
        ]}));
        let reserialized = serde_json::to_value(&first).unwrap();
        assert_eq!(normalize_workers(&reserialized), first);

        let samples = sample_workers();
        let reserialized = serde_json::to_value(&samples).unwrap();
        assert_eq!(normalize_workers(&reserialized), samples);
    }

    #[test]
    fn test_worker_is_accepted_tri_state() {
        assert_eq!(normalize_worker(&json!({})).is_accepted, None);
        assert_eq!(normalize_worker(&json!({"isAccepted": null})).is_accepted, None);
        assert_eq!(normalize_worker(&json!({"isAccepted": true})).is_accepted, Some(true));
        assert_eq!(normalize_worker(&json!({"isAccepted": "false"})).is_accepted, Some(false));
    }

    #[test]
    fn test_worker_phone_prefers_number() {
        let worker = normalize_worker(&json!({"number": "0550", "phone": "0660"}));
        assert_eq!(worker.phone, "0550");
    }
}
