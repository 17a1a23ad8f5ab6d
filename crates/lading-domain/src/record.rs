//! Record module - one extracted shipment with provenance

use crate::schema::FieldSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Unique identifier for an extracted record.
///
/// Random UUIDv4; records are never ordered by id, they keep the order the
/// extraction produced them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(uuid::Uuid);

impl RecordId {
    /// Generate a fresh RecordId.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Parse a RecordId from its string form.
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid record id: {}", e))
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One extracted shipment.
///
/// Field values live in a flat map keyed by schema field name (plus any
/// extra keys the model volunteered); the three provenance attributes are
/// added by the system when the record is created. Serializes flat, so a
/// record is a single JSON object with fields and provenance side by side.
///
/// Invariants:
/// - every schema field is present, with `""` standing in for "not found"
/// - values are always strings, never null
/// - `record_id` is unique per record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Extracted field values (schema fields plus pass-through extras).
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,

    /// Name of the upload this record came from.
    pub source_file: String,

    /// RFC 3339 timestamp of the extraction.
    pub processed_at: String,

    /// Unique id for client-side tracking.
    pub record_id: RecordId,
}

/// Keys reserved for provenance; stripped from raw mappings so the system
/// always controls them.
const RESERVED_KEYS: &[&str] = &["source_file", "processed_at", "record_id"];

impl Record {
    /// Build a record from a raw extracted mapping.
    ///
    /// Every schema field is populated (missing or null values become empty
    /// strings), scalar values are rendered as strings, and unknown keys are
    /// carried through untouched apart from the same stringification.
    /// Provenance keys in the raw mapping are discarded.
    pub fn from_raw(raw: &serde_json::Map<String, Value>, source_file: &str) -> Self {
        let mut fields = BTreeMap::new();

        for &name in FieldSchema::fields() {
            let value = raw.get(name).map(render_value).unwrap_or_default();
            fields.insert(name.to_string(), value);
        }

        for (key, value) in raw {
            if FieldSchema::contains(key) || RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            fields.insert(key.clone(), render_value(value));
        }

        Self {
            fields,
            source_file: source_file.to_string(),
            processed_at: chrono::Utc::now().to_rfc3339(),
            record_id: RecordId::new(),
        }
    }

    /// Look up a field value.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// Render a JSON value as the string form stored in a record.
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Nested structures are rare model noise; keep them readable.
        other => other.to_string(),
    }
}
