//! Aggregation pipelines for slice-paginated listings.
//!
//! Stages: `$match` → optional `$addFields` for computed sort keys → `$sort`
//! → `$skip` → `$limit(size + 1)`. The extra record lets the service decide
//! whether a following page exists without a count query.

use bson::{Bson, Document, doc};
use pagination::{PageRequest, SortDirection};

/// Ordered sort specification.
#[derive(Debug, Clone, Default)]
pub(crate) struct SortSpec(Vec<(String, SortDirection)>);

impl SortSpec {
    pub(crate) fn by(field: impl Into<String>, direction: SortDirection) -> Self {
        Self(vec![(field.into(), direction)])
    }

    pub(crate) fn then(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.0.push((field.into(), direction));
        self
    }

    fn to_document(&self) -> Document {
        let mut sort = Document::new();
        for (field, direction) in &self.0 {
            sort.insert(field.as_str(), direction.as_i32());
        }
        if !sort.contains_key("_id") {
            let tiebreak = self.0.first().map_or(SortDirection::Asc, |(_, d)| *d);
            sort.insert("_id", tiebreak.as_i32());
        }
        sort
    }
}

/// Computed field holding the number of entries in `array_field`.
pub(crate) fn array_size(array_field: &str) -> Bson {
    Bson::Document(doc! {
        "$size": { "$ifNull": [format!("${array_field}"), []] }
    })
}

/// Computed field holding the code-point length of `string_field`.
pub(crate) fn string_length(string_field: &str) -> Bson {
    Bson::Document(doc! { "$strLenCP": format!("${string_field}") })
}

/// Build a slice pipeline.
///
/// `computed` fields are added before sorting so sort keys may refer to them.
pub(crate) fn build(
    predicate: Document,
    computed: Vec<(&str, Bson)>,
    sort: &SortSpec,
    page: PageRequest,
) -> Vec<Document> {
    let mut pipeline = vec![doc! { "$match": predicate }];
    if !computed.is_empty() {
        let mut fields = Document::new();
        for (name, expression) in computed {
            fields.insert(name, expression);
        }
        pipeline.push(doc! { "$addFields": fields });
    }
    pipeline.push(doc! { "$sort": sort.to_document() });
    pipeline.push(doc! { "$skip": to_i64(page.offset()) });
    pipeline.push(doc! { "$limit": to_i64(page.peek_limit()) });
    pipeline
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn page(number: u32, size: u32) -> PageRequest {
        PageRequest::new(number, size).expect("valid page")
    }

    #[rstest]
    fn stages_follow_match_sort_skip_limit() {
        let pipeline = build(
            doc! { "isCompleted": false },
            Vec::new(),
            &SortSpec::by("createdAt", SortDirection::Desc),
            page(1, 10),
        );
        assert_eq!(
            pipeline,
            vec![
                doc! { "$match": { "isCompleted": false } },
                doc! { "$sort": { "createdAt": -1, "_id": -1 } },
                doc! { "$skip": 10_i64 },
                doc! { "$limit": 11_i64 },
            ]
        );
    }

    #[rstest]
    fn computed_fields_precede_sort() {
        let pipeline = build(
            Document::new(),
            vec![("bookmarkCount", array_size("bookmarks"))],
            &SortSpec::by("bookmarkCount", SortDirection::Desc),
            page(0, 5),
        );
        assert_eq!(
            pipeline[1],
            doc! { "$addFields": {
                "bookmarkCount": { "$size": { "$ifNull": ["$bookmarks", []] } }
            } }
        );
        assert_eq!(pipeline[2], doc! { "$sort": { "bookmarkCount": -1, "_id": -1 } });
    }

    #[rstest]
    fn secondary_keys_keep_their_order() {
        let sort = SortSpec::by("nameLength", SortDirection::Asc).then("name", SortDirection::Asc);
        let pipeline = build(
            Document::new(),
            vec![("nameLength", string_length("name"))],
            &sort,
            page(0, 20),
        );
        let keys: Vec<&str> = pipeline[2]
            .get_document("$sort")
            .expect("sort stage")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["nameLength", "name", "_id"]);
    }
}
