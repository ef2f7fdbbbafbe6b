//! Slice pagination primitives shared by pmeet backend endpoints.
//!
//! Listings in the backend never compute a total count. Instead a repository
//! fetches one record more than the requested page size ("peek ahead") and
//! [`Slice::from_peeked`] uses that extra record to decide whether another
//! page exists before trimming it from the exposed content.
//!
//! ```
//! use pagination::{PageRequest, Slice};
//!
//! let page = PageRequest::new(0, 2).expect("valid page request");
//! // The repository returned size + 1 records, so a further page exists.
//! let slice = Slice::from_peeked(vec![1, 2, 3], page);
//! assert_eq!(slice.content(), &[1, 2]);
//! assert!(slice.has_next());
//! assert!(slice.is_first());
//! ```

mod page;
mod slice;

pub use page::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, PageRequestError, SortDirection,
    UnknownSortDirection,
};
pub use slice::Slice;
