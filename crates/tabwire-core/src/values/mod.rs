//! Primitive field helpers shared by every record conversion table.
//!
//! The host represents absence as a missing key, `null`, or `undefined`
//! depending on the API; by the time a payload reaches this layer the first
//! two are observable and must read identically. Outbound, absent fields are
//! omitted entirely — some host APIs distinguish an omitted key from an
//! explicit `null`, and omission is always the safe form.
//!
//! None of these helpers can fail. A required field missing from a host
//! payload reads as that type's default; field-table completeness is a test
//! concern, not a runtime error path.

use serde_json::{Map, Value};

/// The host's native object shape.
pub type HostObject = Map<String, Value>;

/// Normalize a host value: `null` reads as absent.
pub fn non_null(value: &Value) -> Option<&Value> {
    match value {
        Value::Null => None,
        other => Some(other),
    }
}

/// Look up a field, treating a missing key and `null` identically.
pub fn field<'a>(obj: &'a HostObject, key: &str) -> Option<&'a Value> {
    obj.get(key).and_then(non_null)
}

pub fn opt_bool(obj: &HostObject, key: &str) -> Option<bool> {
    field(obj, key).and_then(Value::as_bool)
}

pub fn opt_i64(obj: &HostObject, key: &str) -> Option<i64> {
    field(obj, key).and_then(Value::as_i64)
}

pub fn opt_f64(obj: &HostObject, key: &str) -> Option<f64> {
    field(obj, key).and_then(Value::as_f64)
}

pub fn opt_str(obj: &HostObject, key: &str) -> Option<String> {
    field(obj, key).and_then(Value::as_str).map(str::to_owned)
}

pub fn req_bool(obj: &HostObject, key: &str) -> bool {
    opt_bool(obj, key).unwrap_or_default()
}

pub fn req_i64(obj: &HostObject, key: &str) -> i64 {
    opt_i64(obj, key).unwrap_or_default()
}

pub fn req_f64(obj: &HostObject, key: &str) -> f64 {
    opt_f64(obj, key).unwrap_or_default()
}

/// Insert a field unconditionally.
pub fn set(obj: &mut HostObject, key: &str, value: Value) {
    obj.insert(key.to_owned(), value);
}

/// Insert a field only when present; absent fields leave no key behind.
pub fn set_opt(obj: &mut HostObject, key: &str, value: Option<Value>) {
    if let Some(v) = value {
        obj.insert(key.to_owned(), v);
    }
}
