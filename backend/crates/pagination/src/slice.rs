//! Has-next aware result slices.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::PageRequest;

/// One page of results plus whether further results exist, without a total
/// count.
///
/// ## Invariants
/// - `content.len() <= size`.
/// - `has_next` is true only when the source held more than `size` records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice<T> {
    content: Vec<T>,
    number: u32,
    size: u32,
    has_next: bool,
}

impl<T> Slice<T> {
    /// Assemble a slice from records fetched with [`PageRequest::peek_limit`].
    ///
    /// When more than `size` records are supplied the slice reports a next
    /// page and the records beyond `size` are dropped. The function is pure:
    /// the same input always produces the same slice.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, Slice};
    ///
    /// let page = PageRequest::new(1, 3).expect("valid page request");
    /// let last = Slice::from_peeked(vec!["a", "b"], page);
    /// assert!(!last.has_next());
    /// assert!(last.is_last());
    /// assert!(!last.is_first());
    /// ```
    #[must_use]
    pub fn from_peeked(mut records: Vec<T>, page: PageRequest) -> Self {
        let size = usize::try_from(page.size()).unwrap_or(usize::MAX);
        let has_next = records.len() > size;
        records.truncate(size);
        Self {
            content: records,
            number: page.number(),
            size: page.size(),
            has_next,
        }
    }

    /// An empty slice for the given page.
    #[must_use]
    pub const fn empty(page: PageRequest) -> Self {
        Self {
            content: Vec::new(),
            number: page.number(),
            size: page.size(),
            has_next: false,
        }
    }

    /// Records on this page.
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consume the slice and return its records.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Zero-based page number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Requested page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Whether a further page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    /// Whether this is the first page.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.number == 0
    }

    /// Whether this is the last page.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        !self.has_next
    }

    /// Transform every record while keeping the page metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Slice<U>
    where
        F: FnMut(T) -> U,
    {
        Slice {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            has_next: self.has_next,
        }
    }

    /// Fallible variant of [`Slice::map`].
    ///
    /// # Errors
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E, F>(self, f: F) -> Result<Slice<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(Slice {
            content: self.content.into_iter().map(f).collect::<Result<_, _>>()?,
            number: self.number,
            size: self.size,
            has_next: self.has_next,
        })
    }
}

impl<T: Serialize> Serialize for Slice<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Slice", 6)?;
        state.serialize_field("content", &self.content)?;
        state.serialize_field("number", &self.number)?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("hasNext", &self.has_next)?;
        state.serialize_field("first", &self.is_first())?;
        state.serialize_field("last", &self.is_last())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    //! Slice bound and trim behaviour.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn page(number: u32, size: u32) -> PageRequest {
        PageRequest::new(number, size).expect("valid page")
    }

    #[rstest]
    #[case(0, false, 0)]
    #[case(3, false, 3)]
    #[case(10, false, 10)]
    #[case(11, true, 10)]
    fn has_next_only_when_peeked_record_present(
        #[case] fetched: usize,
        #[case] has_next: bool,
        #[case] kept: usize,
    ) {
        let records: Vec<usize> = (0..fetched).collect();
        let slice = Slice::from_peeked(records, page(0, 10));
        assert_eq!(slice.has_next(), has_next);
        assert_eq!(slice.content().len(), kept);
        assert_eq!(slice.is_last(), !has_next);
    }

    #[rstest]
    fn trims_only_the_trailing_record() {
        let slice = Slice::from_peeked(vec![20, 19, 18], page(0, 2));
        assert_eq!(slice.content(), &[20, 19]);
    }

    #[rstest]
    fn assembling_twice_is_identical() {
        let records = vec!["a", "b", "c"];
        let first = Slice::from_peeked(records.clone(), page(2, 2));
        let second = Slice::from_peeked(records, page(2, 2));
        assert_eq!(first, second);
        assert!(!first.is_first());
    }

    #[rstest]
    fn try_map_propagates_errors() {
        let slice = Slice::from_peeked(vec![1, 2], page(0, 5));
        let result: Result<Slice<u8>, &str> =
            slice.try_map(|value| if value == 2 { Err("two") } else { Ok(0) });
        assert_eq!(result, Err("two"));
    }

    #[rstest]
    fn serialises_page_flags() {
        let slice = Slice::from_peeked(vec![1, 2, 3], page(0, 2));
        let value = serde_json::to_value(&slice).expect("serialise slice");
        assert_eq!(
            value,
            json!({
                "content": [1, 2],
                "number": 0,
                "size": 2,
                "hasNext": true,
                "first": true,
                "last": false
            })
        );
    }
}
