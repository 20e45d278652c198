//! Partial ISO date handling.
//!
//! Normalized dates are `YYYY-MM-DD` where the month or day component may be
//! the literal placeholder `XX` when unknown. Anything else is treated as
//! unnormalizable: the `date` field becomes `None` and the raw source text
//! survives in `original_date`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder token for an unknown month or day component.
pub const UNKNOWN_SEGMENT: &str = "XX";

static PARTIAL_ISO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(\d{2}|XX)-(\d{2}|XX)$").unwrap());

/// Whether `date` is a well-formed partial ISO date.
pub fn is_partial_iso(date: &str) -> bool {
    PARTIAL_ISO_RE.is_match(date)
}

/// Validate an already-normalized date field: well-formed values pass
/// through, anything else is dropped (the caller keeps `original_date`).
pub fn validate(date: Option<String>) -> Option<String> {
    date.filter(|d| is_partial_iso(d))
}

/// Format a partial ISO date for display, dropping `XX` segments instead of
/// rendering them. Non-ISO input is returned unchanged.
pub fn format_for_display(date: &str) -> String {
    if !is_partial_iso(date) {
        return date.to_string();
    }
    let kept: Vec<&str> = date
        .split('-')
        .filter(|segment| *segment != UNKNOWN_SEGMENT)
        .collect();
    kept.join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_and_partial_dates() {
        assert!(is_partial_iso("1898-04-02"));
        assert!(is_partial_iso("1898-XX-02"));
        assert!(is_partial_iso("1898-04-XX"));
        assert!(is_partial_iso("1898-XX-XX"));
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(!is_partial_iso("明治31年4月2日"));
        assert!(!is_partial_iso("1898"));
        assert!(!is_partial_iso("1898-4-2"));
        assert!(!is_partial_iso("1898-04-02T00:00"));
    }

    #[test]
    fn validate_nulls_out_bad_values() {
        assert_eq!(
            validate(Some("1898-04-02".to_string())),
            Some("1898-04-02".to_string())
        );
        assert_eq!(validate(Some("circa 1900".to_string())), None);
        assert_eq!(validate(None), None);
    }

    #[test]
    fn display_drops_placeholder_segments() {
        assert_eq!(format_for_display("1898-04-02"), "1898-04-02");
        assert_eq!(format_for_display("1898-XX-02"), "1898-02");
        assert_eq!(format_for_display("1898-04-XX"), "1898-04");
        assert_eq!(format_for_display("1898-XX-XX"), "1898");
        // Unnormalized text passes through untouched.
        assert_eq!(format_for_display("明治31年"), "明治31年");
    }
}
