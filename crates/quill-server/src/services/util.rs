use quill_api_types::routes::Pagination;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 50;

/// Pagination parameters resolved into a SQL window. Out-of-range
/// requests are clamped instead of rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

impl PageWindow {
    #[must_use]
    pub fn new(pagination: &Pagination) -> Self {
        let limit = pagination
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let page = pagination.page.unwrap_or(1).max(1);
        let offset = (page - 1).saturating_mul(limit);

        Self {
            limit: i64::try_from(limit).unwrap_or(i64::MAX),
            offset: i64::try_from(offset).unwrap_or(i64::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(page: Option<u64>, limit: Option<u64>) -> PageWindow {
        PageWindow::new(&Pagination { page, limit })
    }

    #[test]
    fn defaults_to_the_first_page() {
        assert_eq!(window(None, None), PageWindow { limit: 10, offset: 0 });
    }

    #[test]
    fn clamps_the_limit() {
        assert_eq!(window(None, Some(0)).limit, 1);
        assert_eq!(window(None, Some(500)).limit, 50);
        assert_eq!(window(None, Some(25)).limit, 25);
    }

    #[test]
    fn pages_start_at_one() {
        assert_eq!(window(Some(0), None).offset, 0);
        assert_eq!(window(Some(1), None).offset, 0);
        assert_eq!(window(Some(3), Some(20)).offset, 40);
    }

    #[test]
    fn huge_pages_do_not_overflow() {
        let window = window(Some(u64::MAX), Some(50));
        assert_eq!(window.offset, i64::MAX);
    }
}
