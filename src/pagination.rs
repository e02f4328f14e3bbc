//! Page/offset arithmetic shared by the repository and the list endpoint.

/// Page size applied when the caller does not pass `limit`.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    pub fn offset(&self) -> i64 {
        ((self.page.max(1) - 1) * self.per_page) as i64
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based_and_clamped() {
        assert_eq!(Pagination::new(1, 100).offset(), 0);
        assert_eq!(Pagination::new(3, 25).offset(), 50);
        // Page 0 is treated as page 1.
        assert_eq!(Pagination::new(0, 25).offset(), 0);
    }
}
