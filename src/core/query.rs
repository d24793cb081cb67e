//! Request parameters and pagination utilities

use crate::config::ListingConfig;
use crate::core::error::QueryError;
use crate::core::filter::{RawParams, first_value};
use serde::Serialize;

/// Validated `(offset, limit)` window over an ordered result set
///
/// Pages are zero-based: page `p` of size `s` starts at row `p * s`.
///
/// # Example
/// ```rust,ignore
/// let window = PageWindow::from_request(2, 10)?;
/// assert_eq!(window.offset(), 20);
/// assert_eq!(window.limit(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    offset: usize,
    limit: usize,
}

impl PageWindow {
    /// Build a window from a zero-based page index and a page size.
    ///
    /// Fails when `page` is negative, `size` is not positive, or
    /// `page * size` does not fit; nothing is clamped.
    pub fn from_request(page: i64, size: i64) -> Result<Self, QueryError> {
        if page < 0 {
            return Err(QueryError::invalid_pagination(
                page,
                size,
                "page must not be negative",
            ));
        }
        if size <= 0 {
            return Err(QueryError::invalid_pagination(
                page,
                size,
                "size must be positive",
            ));
        }

        let offset = page
            .checked_mul(size)
            .and_then(|offset| usize::try_from(offset).ok())
            .ok_or_else(|| QueryError::invalid_pagination(page, size, "offset overflows"))?;
        let limit = usize::try_from(size)
            .map_err(|_| QueryError::invalid_pagination(page, size, "size overflows"))?;

        Ok(Self { offset, limit })
    }

    /// Number of rows to skip
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Maximum number of rows to return
    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// One listing request, parsed out of a raw parameter map
///
/// `page` and `size` fall back to the configured defaults when absent; a
/// present value that is not an integer is a pagination error. Everything
/// else in `params` is left for the sort and filter parsers.
#[derive(Debug, Clone)]
pub struct ListingRequest {
    pub params: RawParams,
    pub window: PageWindow,
}

impl ListingRequest {
    /// Parse `page`/`size` out of `params` using `config` for names and defaults
    pub fn from_params(params: RawParams, config: &ListingConfig) -> Result<Self, QueryError> {
        let names = &config.params;
        let page_raw = first_value(&params, &names.page);
        let size_raw = first_value(&params, &names.size);

        let page = parse_int(page_raw, config.pagination.default_page, page_raw, size_raw)?;
        let size = parse_int(size_raw, config.pagination.default_size, page_raw, size_raw)?;
        let window = PageWindow::from_request(page, size)?;

        Ok(Self { params, window })
    }

    /// Build a request from an already-validated `(page, size)` pair
    pub fn new(params: RawParams, page: i64, size: i64) -> Result<Self, QueryError> {
        Ok(Self {
            params,
            window: PageWindow::from_request(page, size)?,
        })
    }

    /// First trimmed, non-blank value of `key`
    pub fn param(&self, key: &str) -> Option<&str> {
        first_value(&self.params, key)
    }
}

fn parse_int(
    raw: Option<&str>,
    default: i64,
    page: Option<&str>,
    size: Option<&str>,
) -> Result<i64, QueryError> {
    match raw {
        None => Ok(default),
        Some(text) => text.parse::<i64>().map_err(|_| {
            QueryError::invalid_pagination(
                page.unwrap_or_default(),
                size.unwrap_or_default(),
                format!("'{}' is not an integer", text),
            )
        }),
    }
}
