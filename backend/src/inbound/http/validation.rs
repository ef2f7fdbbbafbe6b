//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use pagination::{DEFAULT_PAGE_SIZE, PageRequest, SortDirection};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::{Error, IdError, KeywordFilter, SortOrder};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    InvalidPage,
    InvalidFilter,
    InvalidSort,
    InvalidField,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidPage => "invalid_page",
            ErrorCode::InvalidFilter => "invalid_filter",
            ErrorCode::InvalidSort => "invalid_sort",
            ErrorCode::InvalidField => "invalid_field",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Parse a path or body identifier into one of the domain id newtypes.
pub(crate) fn parse_id<T>(value: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = IdError>,
{
    value.parse().map_err(|_| {
        field_error(
            field,
            ErrorCode::InvalidId,
            format!("{} must be a valid UUID", field.as_str()),
            value,
        )
    })
}

/// Map a domain validation failure onto a field-scoped request error.
pub(crate) fn invalid_field(field: FieldName, error: impl std::fmt::Display) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field.as_str(),
        "code": ErrorCode::InvalidField.as_str(),
    }))
}

/// Zero-based page query shared by every sliced listing.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page number.
    pub page: Option<u32>,
    /// Page size, 1 to 100. Defaults to 10.
    pub size: Option<u32>,
}

impl PageQuery {
    pub(crate) fn to_page_request(self) -> Result<PageRequest, Error> {
        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE);
        PageRequest::new(self.page.unwrap_or(0), size).map_err(|error| {
            field_error(
                FieldName::new("size"),
                ErrorCode::InvalidPage,
                error.to_string(),
                &size.to_string(),
            )
        })
    }
}

/// Parse `filterType` / `filterValue` into a keyword filter.
pub(crate) fn parse_filter<T>(
    filter_type: Option<&str>,
    filter_value: Option<String>,
) -> Result<KeywordFilter<T>, Error>
where
    T: FromStr + Copy,
    T::Err: std::fmt::Display,
{
    let filter_type = filter_type
        .map(|raw| {
            raw.parse::<T>().map_err(|error| {
                field_error(
                    FieldName::new("filterType"),
                    ErrorCode::InvalidFilter,
                    error.to_string(),
                    raw,
                )
            })
        })
        .transpose()?;
    Ok(KeywordFilter::new(filter_type, filter_value))
}

/// Parse `sortBy` / `direction`, falling back to the key's default ordering.
pub(crate) fn parse_sort<K>(
    sort_by: Option<&str>,
    direction: Option<&str>,
) -> Result<SortOrder<K>, Error>
where
    K: FromStr,
    K::Err: std::fmt::Display,
    SortOrder<K>: Default,
{
    let default = SortOrder::<K>::default();
    let key = match sort_by {
        Some(raw) => raw.parse::<K>().map_err(|error| {
            field_error(
                FieldName::new("sortBy"),
                ErrorCode::InvalidSort,
                error.to_string(),
                raw,
            )
        })?,
        None => default.key,
    };
    let direction = match direction {
        Some(raw) => raw.parse::<SortDirection>().map_err(|error| {
            field_error(
                FieldName::new("direction"),
                ErrorCode::InvalidSort,
                error.to_string(),
                raw,
            )
        })?,
        None => default.direction,
    };
    Ok(SortOrder::new(key, direction))
}
