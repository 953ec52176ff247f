//! Hashing System - SHA-256 Ticket Fingerprints
//!
//! Equal tickets hash equal regardless of key order, so a host can skip
//! regenerating a preview when nothing that reaches the backend changed.
//! Every object's keys are sorted before hashing: a ticket's settings
//! serialize in catalog order, and `serde_json::Map` keeps insertion order
//! whenever `preserve_order` is enabled anywhere in the build. Without the
//! sort a stored fingerprint would change with either.

use sha2::{Sha256, Digest};
use serde::Serialize;
use serde_json::{Value, to_string};

use crate::ticket::PrintTicket;

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Convert to canonical JSON (sorted keys, no whitespace)
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    to_string(&sort_value(&v))
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_value(v)))
                    .collect(),
            )
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        _ => v.clone(),
    }
}

pub fn compute_ticket_fingerprint(ticket: &PrintTicket) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(ticket)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}
