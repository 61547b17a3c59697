//! On-disk shape of the fechas collection and its load-time normalisation.
//!
//! Written shape is always `{"fechas": [...]}`. On load a bare array is
//! accepted too, and records are normalised once:
//! - records that don't deserialize are dropped;
//! - records without an integer `id` are numbered in document order from
//!   `max(explicit ids) + 1`, and dropped once that would pass `i64::MAX`;
//! - records repeating an earlier `id` are dropped.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::errors::ServiceError;
use super::model::{Fecha, FechaInput};

/// Borrowed view written on save.
#[derive(Serialize)]
pub struct FechasDocument<'a> {
    pub fechas: &'a [Fecha],
}

#[derive(Deserialize)]
struct StoredFecha {
    #[serde(default)]
    id: Option<Value>,
    #[serde(flatten)]
    fields: FechaInput,
}

/// Next id for an append: one above the current maximum, or 1 when empty.
/// Fails once the maximum is `i64::MAX`.
pub fn next_id(fechas: &[Fecha]) -> Result<i64, ServiceError> {
    match fechas.iter().map(|f| f.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| ServiceError::IdExhausted(format!("no id above {max}"))),
    }
}

/// Turn a parsed document into the canonical collection.
pub fn normalize(doc: Value) -> Vec<Fecha> {
    let items = match doc {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("fechas") {
            Some(Value::Array(items)) => items,
            _ => {
                warn!("document has no `fechas` array; treating as empty");
                return Vec::new();
            }
        },
        _ => {
            warn!("document is neither an object nor an array; treating as empty");
            return Vec::new();
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<StoredFecha>(item) {
            Ok(r) => records.push((r.id.as_ref().and_then(Value::as_i64), r.fields)),
            Err(e) => warn!(index, error = %e, "dropping malformed record"),
        }
    }

    // `None` once the id space above the largest explicit id is used up
    let mut next = match records.iter().filter_map(|(id, _)| *id).max() {
        None => Some(1),
        Some(max) => max.checked_add(1),
    };
    let mut seen = HashSet::with_capacity(records.len());
    let mut fechas = Vec::with_capacity(records.len());
    for (id, fields) in records {
        let id = match id {
            Some(id) => id,
            None => match next {
                Some(id) => {
                    next = id.checked_add(1);
                    warn!(id, "record without id; assigned one");
                    id
                }
                None => {
                    warn!("dropping record without id; no ids left to assign");
                    continue;
                }
            },
        };
        if !seen.insert(id) {
            warn!(id, "dropping record with duplicate id");
            continue;
        }
        fechas.push(Fecha::from_input(id, fields));
    }
    fechas
}
