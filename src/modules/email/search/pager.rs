// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::utils::parse_leading_int;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// A 1-based page number and page size, translated into a LIMIT/OFFSET window.
///
/// Values below 1 fall back to the defaults, so the window is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: i64,
    limit: i64,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pager {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: if page < 1 { DEFAULT_PAGE } else { page },
            limit: if limit < 1 { DEFAULT_LIMIT } else { limit },
        }
    }

    /// Reads raw query-string values; anything without a numeric prefix uses the default.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(
            page.and_then(parse_leading_int).unwrap_or(DEFAULT_PAGE),
            limit.and_then(parse_leading_int).unwrap_or(DEFAULT_LIMIT),
        )
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// `ceil(total / limit)`; zero when nothing matched.
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total - 1) / self.limit + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        for page in 1..=12 {
            for limit in 1..=25 {
                assert_eq!(Pager::new(page, limit).offset(), (page - 1) * limit);
            }
        }
    }

    #[test]
    fn total_pages_rounds_up() {
        for limit in 1..=15i64 {
            let pager = Pager::new(1, limit);
            for total in 0..=100i64 {
                let expected = (total as f64 / limit as f64).ceil() as i64;
                assert_eq!(pager.total_pages(total), expected, "total={total} limit={limit}");
            }
        }
    }

    #[test]
    fn defaults_apply_to_missing_or_unusable_values() {
        assert_eq!(Pager::parse(None, None), Pager::new(1, 10));
        assert_eq!(Pager::parse(Some("abc"), Some("")), Pager::new(1, 10));
        assert_eq!(Pager::parse(Some("0"), Some("0")), Pager::new(1, 10));
        assert_eq!(Pager::parse(Some("-4"), Some("-20")), Pager::new(1, 10));
        assert_eq!(Pager::parse(Some("3"), Some("25")), Pager::new(3, 25));
        assert_eq!(Pager::parse(Some("2nd"), Some("5 per page")), Pager::new(2, 5));
    }

    #[test]
    fn huge_pages_do_not_overflow() {
        let pager = Pager::new(i64::MAX, 50);
        assert_eq!(pager.offset(), i64::MAX);
        assert_eq!(Pager::new(1, i64::MAX).total_pages(i64::MAX), 1);
    }
}
