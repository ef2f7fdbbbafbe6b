//! Keyword criteria for listing queries.
//!
//! A [`KeywordFilter`] becomes a `$regex` predicate over the fields its filter
//! type names. Keywords are literal substrings: regex metacharacters are
//! escaped before the pattern reaches the server. The result is always
//! combined with the caller's base predicate.

use bson::{Document, doc};

use crate::domain::{KeywordFilter, ProjectFilterType, ResumeFilterType};

/// Whether substring matches ignore letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CaseSensitivity {
    Sensitive,
    Insensitive,
}

/// Filter types that know which document fields they search.
pub(crate) trait SearchFields: Copy {
    fn fields(self) -> &'static [&'static str];
}

impl SearchFields for ProjectFilterType {
    fn fields(self) -> &'static [&'static str] {
        match self {
            Self::All => &["title", "recruitments.jobName", "techStacks"],
            Self::Title => &["title"],
            Self::JobName => &["recruitments.jobName"],
            Self::TechStack => &["techStacks"],
        }
    }
}

impl SearchFields for ResumeFilterType {
    fn fields(self) -> &'static [&'static str] {
        match self {
            Self::All => &["title", "desiredJobs", "userNickname"],
            Self::Title => &["title"],
            Self::JobName => &["desiredJobs"],
            Self::Nickname => &["userNickname"],
        }
    }
}

fn substring(field: &str, keyword: &str, case: CaseSensitivity) -> Document {
    let mut pattern = doc! { "$regex": regex::escape(keyword) };
    if case == CaseSensitivity::Insensitive {
        pattern.insert("$options", "i");
    }
    let mut predicate = Document::new();
    predicate.insert(field, pattern);
    predicate
}

/// Predicate matching `keyword` as a substring of any of `fields`.
///
/// Returns `None` when there is nothing to filter on.
pub(crate) fn keyword_predicate(
    fields: &[&str],
    keyword: &str,
    case: CaseSensitivity,
) -> Option<Document> {
    if keyword.is_empty() {
        return None;
    }
    match fields {
        [] => None,
        [field] => Some(substring(field, keyword, case)),
        many => {
            let alternatives: Vec<Document> = many
                .iter()
                .map(|field| substring(field, keyword, case))
                .collect();
            Some(doc! { "$or": alternatives })
        }
    }
}

/// Build the match predicate for a keyword filter, AND-combined with `base`.
///
/// An absent filter type or an empty keyword matches everything `base`
/// matches.
pub(crate) fn build<T: SearchFields>(
    base: Document,
    filter: &KeywordFilter<T>,
    case: CaseSensitivity,
) -> Document {
    let criteria = filter
        .active()
        .and_then(|(filter_type, keyword)| keyword_predicate(filter_type.fields(), keyword, case));
    combine(base, criteria)
}

/// AND-combine a base predicate with optional criteria.
pub(crate) fn combine(base: Document, criteria: Option<Document>) -> Document {
    match criteria {
        None => base,
        Some(criteria) if base.is_empty() => criteria,
        Some(criteria) => doc! { "$and": [base, criteria] },
    }
}
