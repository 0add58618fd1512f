//! Offset pagination shared by the listing endpoints.

use serde::Deserialize;
use validator::Validate;

pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 100;

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// `limit` in 1..=100 (default 20), `offset` from 0.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct PageParams {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// One page of an already-sorted listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub has_more: bool,
}

/// Slice `items` to the requested window.
pub fn paginate<T>(items: Vec<T>, params: PageParams) -> Page<T> {
    let total = items.len();
    let items = items
        .into_iter()
        .skip(params.offset)
        .take(params.limit)
        .collect();
    Page {
        items,
        total,
        has_more: params.offset.saturating_add(params.limit) < total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let page = paginate((0..10).collect(), PageParams { limit: 3, offset: 3 });
        assert_eq!(page.items, vec![3, 4, 5]);
        assert_eq!(page.total, 10);
        assert!(page.has_more);
    }

    #[test]
    fn test_last_page_and_past_end() {
        let last = paginate((0..10).collect::<Vec<_>>(), PageParams { limit: 5, offset: 5 });
        assert_eq!(last.items.len(), 5);
        assert!(!last.has_more);

        let past = paginate((0..10).collect::<Vec<_>>(), PageParams { limit: 5, offset: 50 });
        assert!(past.items.is_empty());
        assert_eq!(past.total, 10);
    }

    #[test]
    fn test_limit_bounds_validated() {
        assert!(PageParams { limit: 0, offset: 0 }.validate().is_err());
        assert!(PageParams { limit: 101, offset: 0 }.validate().is_err());
        assert!(PageParams::default().validate().is_ok());
    }

    #[test]
    fn test_huge_offset_does_not_overflow() {
        let page = paginate(vec![1], PageParams { limit: 100, offset: usize::MAX });
        assert!(page.items.is_empty());
        assert!(!page.has_more);
    }
}
