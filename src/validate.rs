//! Input validation for tool arguments.
//!
//! Pure, stateless checks with no I/O. Each function reports failure as a
//! value; callers decide how to surface it (normally as a tool-level
//! `Outcome::Failure`).

use std::sync::OnceLock;

use regex::Regex;

/// Maximum value accepted by [`validate_limit`] unless a caller overrides it.
pub const MAX_LIMIT: usize = 1000;

/// Years outside this range are rejected by [`validate_year_range`].
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2100;

fn series_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Z]{2,4}[A-Z0-9]{6,16}$").expect("series ID pattern is valid")
    })
}

/// Validates a series identifier.
///
/// Identifiers are 2-4 leading letters followed by 6-16 alphanumeric
/// characters (e.g. `CUUR0000SA0`, `CES0000000001`). The check is
/// case-insensitive: the candidate is uppercased before matching.
#[must_use]
pub fn validate_series_id(series_id: &str) -> bool {
    if series_id.is_empty() {
        return false;
    }
    series_id_pattern().is_match(&series_id.to_uppercase())
}

/// Validates an optional year range.
///
/// Each year, when present, must fall within [`YEAR_RANGE`]. When both are
/// present the start must not exceed the end.
///
/// # Errors
///
/// Returns a human-readable reason when the range is invalid.
pub fn validate_year_range(start_year: Option<i32>, end_year: Option<i32>) -> Result<(), String> {
    if let Some(start) = start_year {
        if !YEAR_RANGE.contains(&start) {
            return Err(format!(
                "Start year must be between {} and {}",
                YEAR_RANGE.start(),
                YEAR_RANGE.end()
            ));
        }
    }

    if let Some(end) = end_year {
        if !YEAR_RANGE.contains(&end) {
            return Err(format!(
                "End year must be between {} and {}",
                YEAR_RANGE.start(),
                YEAR_RANGE.end()
            ));
        }
    }

    if let (Some(start), Some(end)) = (start_year, end_year) {
        if start > end {
            return Err("Start year must be before or equal to end year".to_string());
        }
    }

    Ok(())
}

/// Validates a result-count limit against a maximum.
///
/// # Errors
///
/// Returns a human-readable reason when the limit is out of bounds.
pub fn validate_limit(limit: usize, max_limit: usize) -> Result<(), String> {
    if limit < 1 {
        return Err("Limit must be at least 1".to_string());
    }

    if limit > max_limit {
        return Err(format!("Limit cannot exceed {max_limit}"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_series_ids() {
        assert!(validate_series_id("CUUR0000SA0"));
        assert!(validate_series_id("CES0000000001"));
        assert!(validate_series_id("LNS14000000"));
    }

    #[test]
    fn series_id_is_case_insensitive() {
        assert!(validate_series_id("cuur0000sa0"));
    }

    #[test]
    fn rejects_malformed_series_ids() {
        assert!(!validate_series_id(""));
        assert!(!validate_series_id("NOPE"));
        assert!(!validate_series_id("1UUR0000SA0"));
        assert!(!validate_series_id("C0000SA0"));
        assert!(!validate_series_id("CUUR0000SA0-EXTRA-LONG-SUFFIX"));
        assert!(!validate_series_id("CUUR 0000SA0"));
    }

    #[test]
    fn year_range_accepts_open_ends() {
        assert!(validate_year_range(None, None).is_ok());
        assert!(validate_year_range(Some(2020), None).is_ok());
        assert!(validate_year_range(None, Some(2024)).is_ok());
        assert!(validate_year_range(Some(2020), Some(2020)).is_ok());
    }

    #[test]
    fn year_range_rejects_inverted_bounds() {
        let err = validate_year_range(Some(2024), Some(2020)).unwrap_err();
        assert!(err.contains("before or equal"));
    }

    #[test]
    fn year_range_rejects_out_of_bounds_years() {
        assert!(validate_year_range(Some(1899), None).is_err());
        assert!(validate_year_range(Some(2101), None).is_err());
        assert!(validate_year_range(None, Some(1899)).is_err());
        assert!(validate_year_range(None, Some(2101)).is_err());
    }

    #[test]
    fn limit_bounds() {
        assert!(validate_limit(1, MAX_LIMIT).is_ok());
        assert!(validate_limit(MAX_LIMIT, MAX_LIMIT).is_ok());
        assert!(validate_limit(0, MAX_LIMIT).is_err());
        assert!(validate_limit(MAX_LIMIT + 1, MAX_LIMIT).is_err());
    }
}
