//! Page/limit arithmetic for the notes listing.

use crate::models::{ListMetadata, ListQuery};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// A page request after defaults and clamping have been applied.
///
/// Both `page` and `limit` are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).max(1),
        }
    }

    pub fn from_query(query: &ListQuery) -> Self {
        Self::new(query.page, query.limit)
    }

    /// Number of matching notes to skip before this page starts.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Metadata for this page given the total number of matches.
    ///
    /// `current_page` is clamped to the last page even though the data slice
    /// for an out-of-range page is empty.
    pub fn metadata(&self, total_notes: i64) -> ListMetadata {
        let total_pages = if total_notes > 0 {
            total_notes / self.limit + i64::from(total_notes % self.limit != 0)
        } else {
            0
        };

        ListMetadata {
            total_notes,
            total_pages,
            current_page: self.page.min(total_pages),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req = PageRequest::new(None, None);
        assert_eq!(req, PageRequest { page: 1, limit: 10 });
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_non_positive_values_clamped() {
        assert_eq!(
            PageRequest::new(Some(0), Some(-5)),
            PageRequest { page: 1, limit: 1 }
        );
        assert_eq!(PageRequest::new(Some(-3), Some(0)).offset(), 0);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(Some(3), Some(10)).offset(), 20);
        assert_eq!(PageRequest::new(Some(i64::MAX), Some(i64::MAX)).offset(), i64::MAX);
    }

    #[test]
    fn test_metadata_fifteen_notes() {
        let meta = PageRequest::new(Some(1), Some(10)).metadata(15);
        assert_eq!(meta.total_pages, 2);
        assert_eq!(meta.current_page, 1);

        let meta = PageRequest::new(Some(3), Some(10)).metadata(15);
        assert_eq!(meta.total_notes, 15);
        assert_eq!(meta.total_pages, 2);
        assert_eq!(meta.current_page, 2);
    }

    #[test]
    fn test_metadata_exact_multiple() {
        let meta = PageRequest::new(Some(1), Some(5)).metadata(10);
        assert_eq!(meta.total_pages, 2);
    }

    #[test]
    fn test_metadata_empty() {
        let meta = PageRequest::new(Some(4), None).metadata(0);
        assert_eq!(
            meta,
            ListMetadata {
                total_notes: 0,
                total_pages: 0,
                current_page: 0,
            }
        );
    }
}
