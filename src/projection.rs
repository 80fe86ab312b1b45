/// Conversion of success payloads into caller-declared types.
///
/// Payloads come in three shapes: a scalar (`1`, `"text"`), a single object,
/// or a listing (`{"count": n, "items": [...]}`, sometimes a bare array).
/// Every conversion either yields a fully populated value or a
/// [`VkError::Projection`]; missing fields are never defaulted silently.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::json_type;
use crate::errors::VkError;

/// A page of items. `count` is the server-side total and is informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing<T> {
    pub count: Option<u64>,
    pub items: Vec<T>,
}

impl<T> Listing<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Listing<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

fn mismatch(expected: &str, payload: &Value) -> VkError {
    VkError::Projection(format!("expected {expected}, got {}", json_type(payload)))
}

/// `1`/`0` or `true`/`false`.
pub fn to_bool(payload: &Value) -> Result<bool, VkError> {
    match payload {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Ok(true),
            Some(0) => Ok(false),
            _ => Err(VkError::Projection(format!("expected 0 or 1, got {n}"))),
        },
        other => Err(mismatch("boolean flag", other)),
    }
}

/// An integer, also accepted when the server sends it as a numeric string.
pub fn to_i64(payload: &Value) -> Result<i64, VkError> {
    match payload {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| VkError::Projection(format!("expected integer, got {n}"))),
        Value::String(s) => s
            .parse()
            .map_err(|_| VkError::Projection(format!("expected integer, got {s:?}"))),
        other => Err(mismatch("integer", other)),
    }
}

pub fn to_string(payload: &Value) -> Result<String, VkError> {
    match payload {
        Value::String(s) => Ok(s.clone()),
        other => Err(mismatch("string", other)),
    }
}

/// A single object deserialized into `T`.
pub fn to_object<T: DeserializeOwned>(payload: Value) -> Result<T, VkError> {
    serde_json::from_value(payload).map_err(|e| {
        VkError::Projection(format!(
            "failed to project {}: {e}",
            std::any::type_name::<T>()
        ))
    })
}

/// A named field of an object payload, e.g. `market_album_id`.
pub fn field<T: DeserializeOwned>(payload: Value, name: &str) -> Result<T, VkError> {
    match payload {
        Value::Object(mut map) => {
            let value = map
                .remove(name)
                .ok_or_else(|| VkError::Projection(format!("missing field `{name}`")))?;
            to_object(value)
        }
        other => Err(mismatch("object", &other)),
    }
}

/// A listing, from `{count, items}`, a bare array, or `null` (empty).
pub fn to_listing<T: DeserializeOwned>(payload: Value) -> Result<Listing<T>, VkError> {
    match payload {
        Value::Null => Ok(Listing {
            count: None,
            items: Vec::new(),
        }),
        Value::Array(items) => Ok(Listing {
            count: None,
            items: project_items(items)?,
        }),
        Value::Object(mut map) => {
            let count = match map.remove("count") {
                None | Some(Value::Null) => None,
                Some(Value::Number(n)) => Some(n.as_u64().ok_or_else(|| {
                    VkError::Projection(format!("expected non-negative count, got {n}"))
                })?),
                Some(other) => return Err(mismatch("integer count", &other)),
            };
            let items = match map.remove("items") {
                Some(Value::Array(items)) => project_items(items)?,
                Some(other) => return Err(mismatch("items array", &other)),
                None => return Err(VkError::Projection("missing field `items`".into())),
            };
            Ok(Listing { count, items })
        }
        other => Err(mismatch("listing", &other)),
    }
}

/// A listing flattened to its items.
pub fn to_vec<T: DeserializeOwned>(payload: Value) -> Result<Vec<T>, VkError> {
    Ok(to_listing(payload)?.items)
}

fn project_items<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>, VkError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| {
                VkError::Projection(format!(
                    "failed to project item {index} as {}: {e}",
                    std::any::type_name::<T>()
                ))
            })
        })
        .collect()
}
