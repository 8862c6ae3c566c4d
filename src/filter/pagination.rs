use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 20;

const MAX_SKIP: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Zero values fall back to the defaults.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    /// Lenient parse of `page`/`limit` query values; anything that is not a
    /// positive integer falls back to the default.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(positive(page).unwrap_or(DEFAULT_PAGE), positive(limit).unwrap_or(DEFAULT_LIMIT))
    }

    /// Offset of the first record on this page. Capped at `i64::MAX`, the
    /// largest skip the store accepts; pages that far out are simply empty.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit).min(MAX_SKIP)
    }
}

fn positive(value: Option<&str>) -> Option<u64> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .map(|v| v as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_missing() {
        assert_eq!(Pagination::from_query(None, None), Pagination { page: 1, limit: 20 });
    }

    #[test]
    fn invalid_values_fall_back_silently() {
        assert_eq!(Pagination::from_query(Some("0"), Some("-5")), Pagination::default());
        assert_eq!(Pagination::from_query(Some("abc"), Some("1.5")), Pagination::default());
    }

    #[test]
    fn skip_is_page_offset() {
        let p = Pagination::from_query(Some("3"), Some("7"));
        assert_eq!(p.skip(), 14);
        assert_eq!(Pagination::new(1, 50).skip(), 0);
    }

    #[test]
    fn huge_page_skip_fits_store_offset() {
        let p = Pagination::from_query(Some("9223372036854775807"), Some("2"));
        assert_eq!(p.page, i64::MAX as u64);
        assert_eq!(p.skip(), i64::MAX as u64);
        assert!(i64::try_from(p.skip()).is_ok());
    }
}
