//! Query shaping: page-parameter parsing, in-memory pagination, and the
//! case-insensitive name filter used by the search listing.
//!
//! # Count semantics
//!
//! The paginated listings deliberately report two different kinds of totals:
//! the plain listing (and the empty-search branch) pushes skip/limit to the
//! store and reports the store's cheap *approximate global* item count, while
//! the non-empty-search branch filters the whole collection in memory and
//! reports the *exact filtered* length. Callers depend on this asymmetry.

use serde::Serialize;
use thiserror::Error;

/// Malformed request parameter: parsed as text, expected an integer.
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("invalid {name} parameter: {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{name} parameter must be greater than zero")]
    ZeroLimit { name: &'static str },
    #[error("page and limit combination is out of range")]
    OutOfRange,
}

/// Parsed pagination parameters. `page` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u64,
    pub limit: u64,
}

impl PageParams {
    /// Parse `page` and `limit` from their textual query-string form.
    ///
    /// Both parameters are attacker-controlled, so the skip product is
    /// validated here: a `page * limit` that does not fit in a u64 is
    /// rejected up front rather than left to overflow later.
    ///
    /// # Errors
    ///
    /// Returns `ParamError` for non-numeric input, a zero limit, or an
    /// out-of-range page/limit combination.
    pub fn parse(page: &str, limit: &str) -> Result<Self, ParamError> {
        let page = parse_count("page", page)?;
        let limit = parse_count("limit", limit)?;
        if limit == 0 {
            return Err(ParamError::ZeroLimit { name: "limit" });
        }
        if page.checked_mul(limit).is_none() {
            return Err(ParamError::OutOfRange);
        }
        Ok(Self { page, limit })
    }

    /// Number of records to skip for this page. Saturates rather than
    /// wrapping; `parse` has already rejected overflowing combinations.
    #[must_use]
    pub const fn skip(self) -> u64 {
        self.page.saturating_mul(self.limit)
    }
}

/// Parse a non-negative integer parameter from its textual form.
///
/// # Errors
///
/// Returns `ParamError::InvalidNumber` if the text is not an integer.
pub fn parse_count(name: &'static str, raw: &str) -> Result<u64, ParamError> {
    raw.trim().parse::<u64>().map_err(|_| ParamError::InvalidNumber {
        name,
        value: raw.to_string(),
    })
}

/// A page of results with its total count.
#[derive(Debug, Clone, Serialize)]
pub struct FoodPage<T> {
    #[serde(rename = "totalCount")]
    pub total_count: u64,
    pub items: Vec<T>,
}

/// Apply skip/take pagination over an already-filtered in-memory sequence.
///
/// Returns the filtered total alongside the page, since the in-memory path
/// reports the exact filtered count rather than the global one.
#[must_use]
pub fn paginate<T>(items: Vec<T>, params: PageParams) -> FoodPage<T> {
    let total_count = items.len() as u64;
    let skip = usize::try_from(params.skip()).unwrap_or(usize::MAX);
    let take = usize::try_from(params.limit).unwrap_or(usize::MAX);
    let items = items.into_iter().skip(skip).take(take).collect();
    FoodPage { total_count, items }
}

/// Case-insensitive substring match on a food name.
#[must_use]
pub fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_params() {
        let params = PageParams::parse("2", "10").unwrap();
        assert_eq!(params, PageParams { page: 2, limit: 10 });
        assert_eq!(params.skip(), 20);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(matches!(
            PageParams::parse("abc", "10"),
            Err(ParamError::InvalidNumber { name: "page", .. })
        ));
        assert!(matches!(
            PageParams::parse("0", "ten"),
            Err(ParamError::InvalidNumber { name: "limit", .. })
        ));
        assert!(matches!(
            PageParams::parse("-1", "10"),
            Err(ParamError::InvalidNumber { name: "page", .. })
        ));
    }

    #[test]
    fn test_parse_rejects_overflowing_skip() {
        assert!(matches!(
            PageParams::parse("9223372036854775807", "1000"),
            Err(ParamError::OutOfRange)
        ));
        assert!(matches!(
            PageParams::parse("18446744073709551615", "1000"),
            Err(ParamError::OutOfRange)
        ));
        // The largest representable skip is still accepted.
        assert!(PageParams::parse("18446744073709551615", "1").is_ok());
    }

    #[test]
    fn test_skip_saturates_instead_of_wrapping() {
        let params = PageParams {
            page: u64::MAX,
            limit: 2,
        };
        assert_eq!(params.skip(), u64::MAX);
    }

    #[test]
    fn test_parse_rejects_zero_limit() {
        assert!(matches!(
            PageParams::parse("0", "0"),
            Err(ParamError::ZeroLimit { .. })
        ));
    }

    #[test]
    fn test_paginate_skips_and_takes() {
        let items: Vec<u32> = (0..25).collect();
        let page = paginate(items, PageParams { page: 2, limit: 10 });
        assert_eq!(page.total_count, 25);
        assert_eq!(page.items, (20..25).collect::<Vec<u32>>());
    }

    #[test]
    fn test_paginate_returns_at_most_limit() {
        let items: Vec<u32> = (0..25).collect();
        let page = paginate(items, PageParams { page: 0, limit: 10 });
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total_count, 25);
    }

    #[test]
    fn test_paginate_past_the_end_is_empty() {
        let items: Vec<u32> = (0..5).collect();
        let page = paginate(items, PageParams { page: 3, limit: 10 });
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 5);
    }

    #[test]
    fn test_filtered_total_is_filtered_length() {
        let names = vec!["Pizza", "Pasta", "Ramen", "Pizza Bianca"];
        let filtered: Vec<&str> = names
            .into_iter()
            .filter(|n| name_matches(n, "pizza"))
            .collect();
        let page = paginate(filtered, PageParams { page: 0, limit: 10 });
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn test_name_matches_is_case_insensitive() {
        assert!(name_matches("Spicy Ramen", "RAMEN"));
        assert!(name_matches("Spicy Ramen", "spicy"));
        assert!(!name_matches("Spicy Ramen", "pizza"));
    }

    #[test]
    fn test_empty_needle_matches_everything() {
        assert!(name_matches("anything", ""));
    }

    #[test]
    fn test_food_page_serializes_camel_case_total() {
        let page = paginate(vec![1, 2, 3], PageParams { page: 0, limit: 2 });
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["totalCount"], 3);
        assert_eq!(value["items"], serde_json::json!([1, 2]));
    }
}
