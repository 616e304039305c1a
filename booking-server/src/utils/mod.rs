//! Utility module — common helpers and re-exported error types
//!
//! # Contents
//!
//! - [`AppError`] / [`ApiResponse`] — unified error system (from `shared::error`)
//! - [`Pagination`] — query-string paging for list endpoints
//! - Logging and validation helpers

pub mod logger;
pub mod validation;

// Re-export the error system from shared so server code has one import path
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use serde::Deserialize;

/// Paging parameters for list endpoints, deserialized from the query string.
///
/// `page` is 1-based; out-of-range values are clamped rather than rejected.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    pub const MAX_PER_PAGE: u32 = 100;

    /// Row limit for the SQL query, clamped to `1..=MAX_PER_PAGE`
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page.clamp(1, Self::MAX_PER_PAGE))
    }

    /// Row offset for the SQL query
    pub fn offset(&self) -> i64 {
        i64::from(self.page.max(1) - 1) * self.limit()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamping() {
        let p = Pagination::default();
        assert_eq!(p.limit(), 20);
        assert_eq!(p.offset(), 0);

        let p = Pagination {
            page: 3,
            per_page: 50,
        };
        assert_eq!(p.limit(), 50);
        assert_eq!(p.offset(), 100);

        // per_page of zero and a huge page still yield sane SQL values
        let p = Pagination {
            page: 0,
            per_page: 0,
        };
        assert_eq!(p.limit(), 1);
        assert_eq!(p.offset(), 0);

        let p = Pagination {
            page: 2,
            per_page: 1000,
        };
        assert_eq!(p.limit(), i64::from(Pagination::MAX_PER_PAGE));
        assert_eq!(p.offset(), 100);
    }

    #[test]
    fn pagination_deserializes_with_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 20);

        let p: Pagination = serde_json::from_str(r#"{"page": 4}"#).unwrap();
        assert_eq!(p.page, 4);
        assert_eq!(p.per_page, 20);
    }
}
