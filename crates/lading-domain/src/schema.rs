//! The fixed shipment field schema

/// Literal separator written between per-page text segments of a document.
///
/// The text extractor joins pages with this marker (padded by blank lines)
/// and the chunker splits on it; both sides must agree on the exact string.
pub const PAGE_BREAK_MARKER: &str = "=== PAGE BREAK ===";

/// Ordered list of fields extracted from every shipping document.
///
/// Order is significant only for display and export column ordering. The
/// last three entries keep their historical capitalization; downstream
/// consumers expect these exact key names.
pub const TABLE_FIELDS: &[&str] = &[
    "office_name",
    "batch_no",
    "customer",
    "type",
    "reference_number",
    "booking_number",
    "bol_number",
    "po_number",
    "container_number",
    "container_size",
    "container_type",
    "pickup_location_name",
    "delivery_location_name",
    "delivery_street_address",
    "delivery_city",
    "delivery_state",
    "delivery_zip",
    "return_location",
    "container_weight",
    "commodity",
    "number_of_packages",
    "eta_date",
    "steam_ship_line",
    "vessel",
    "voyage",
    "cut_off_date",
    "early_release_date",
    "seal",
    "pickup_number",
    "pickup_appointment_date_time",
    "delivery_appointment_date_time",
    "Options",
    "Tags",
    "Notes",
];

/// View over the shipment field schema.
///
/// A zero-sized handle so callers can write `FieldSchema::fields()` instead
/// of reaching for the raw constant, and so prompt/export helpers have an
/// obvious home.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema;

impl FieldSchema {
    /// All field names, in schema order.
    pub fn fields() -> &'static [&'static str] {
        TABLE_FIELDS
    }

    /// Number of fields in the schema.
    pub fn len() -> usize {
        TABLE_FIELDS.len()
    }

    /// Whether `name` is one of the schema fields.
    pub fn contains(name: &str) -> bool {
        TABLE_FIELDS.contains(&name)
    }

    /// Bulleted field list for embedding in an extraction prompt.
    ///
    /// One `- field_name` line per field, in schema order.
    pub fn prompt_field_list() -> String {
        TABLE_FIELDS
            .iter()
            .map(|field| format!("- {}", field))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_has_34_fields() {
        assert_eq!(FieldSchema::len(), 34);
    }

    #[test]
    fn test_schema_order_is_stable() {
        assert_eq!(TABLE_FIELDS[0], "office_name");
        assert_eq!(TABLE_FIELDS[8], "container_number");
        assert_eq!(TABLE_FIELDS[21], "eta_date");
        assert_eq!(TABLE_FIELDS[33], "Notes");
    }

    #[test]
    fn test_contains() {
        assert!(FieldSchema::contains("container_number"));
        assert!(FieldSchema::contains("Notes"));
        assert!(!FieldSchema::contains("notes"));
        assert!(!FieldSchema::contains("source_file"));
    }

    #[test]
    fn test_prompt_field_list() {
        let list = FieldSchema::prompt_field_list();
        assert!(list.starts_with("- office_name\n"));
        assert!(list.ends_with("- Notes"));
        assert_eq!(list.lines().count(), 34);
    }

    #[test]
    fn test_no_duplicate_fields() {
        let mut seen = std::collections::HashSet::new();
        for field in TABLE_FIELDS {
            assert!(seen.insert(field), "duplicate field {}", field);
        }
    }
}
