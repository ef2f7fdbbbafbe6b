//! OpenAPI-only schema definitions.
//!
//! [`pagination::Slice`] serialises itself by hand and stays free of utoipa,
//! so its wire shape is described here for the generated document.

use utoipa::ToSchema;

/// One page of results without a total count.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SliceSchema<T: ToSchema> {
    /// Items on this page, at most `size`.
    content: Vec<T>,
    /// Zero-based page number.
    number: u32,
    /// Requested page size.
    size: u32,
    /// Whether another page follows.
    has_next: bool,
    /// Whether this is page zero.
    first: bool,
    /// Whether no page follows.
    last: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use utoipa::PartialSchema;

    use super::*;

    #[test]
    fn slice_schema_matches_wire_fields() {
        let schema = serde_json::to_value(SliceSchema::<String>::schema()).expect("schema json");
        let properties = schema
            .get("properties")
            .and_then(Value::as_object)
            .expect("object schema");
        for field in ["content", "number", "size", "hasNext", "first", "last"] {
            assert!(properties.contains_key(field), "missing {field}");
        }
    }
}
