//! Quarter strings ("Q1 2026", "2026 Q3", "Q2") to close dates.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static QUARTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Q([1-4])").expect("valid regex"));
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"20\d{2}").expect("valid regex"));

/// Last day of the quarter, falling back to the current calendar year when
/// the text carries no year.
pub fn parse_quarter_to_date(quarter: &str) -> Option<NaiveDate> {
    parse_quarter_with_fallback(quarter, Local::now().year())
}

/// Last day of the quarter named in `quarter`, or `None` without a
/// `Q1`..`Q4` token. The year is the first `20xx` in the text; without
/// one it resolves to `fallback_year`.
pub fn parse_quarter_with_fallback(quarter: &str, fallback_year: i32) -> Option<NaiveDate> {
    let text = quarter.trim().to_uppercase();

    let q: u32 = QUARTER_RE.captures(&text)?.get(1)?.as_str().parse().ok()?;

    let year = YEAR_RE
        .find(&text)
        .and_then(|m| m.as_str().parse::<i32>().ok())
        .unwrap_or(fallback_year);

    quarter_end(year, q)
}

fn quarter_end(year: i32, quarter: u32) -> Option<NaiveDate> {
    let (month, day) = match quarter {
        1 => (3, 31),
        2 => (6, 30),
        3 => (9, 30),
        4 => (12, 31),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_quarter_with_year() {
        assert_eq!(
            parse_quarter_to_date("Q2 2027").map(|d| d.to_string()),
            Some("2027-06-30".to_string())
        );
        assert_eq!(parse_quarter_to_date("2026 Q3"), Some(ymd(2026, 9, 30)));
        assert_eq!(parse_quarter_to_date("q4 2026"), Some(ymd(2026, 12, 31)));
        assert_eq!(parse_quarter_to_date("FY2028-Q1"), Some(ymd(2028, 3, 31)));
    }

    #[test]
    fn test_no_quarter_token() {
        assert_eq!(parse_quarter_to_date("no quarter here"), None);
        assert_eq!(parse_quarter_to_date("Q5 2026"), None);
        assert_eq!(parse_quarter_to_date(""), None);
    }

    #[test]
    fn test_missing_year_uses_fallback() {
        assert_eq!(parse_quarter_with_fallback("Q1", 2026), Some(ymd(2026, 3, 31)));
        assert_eq!(parse_quarter_with_fallback("Q3 next year", 2031), Some(ymd(2031, 9, 30)));
    }

    #[test]
    fn test_missing_year_defaults_to_current_year() {
        let this_year = Local::now().year();
        assert_eq!(parse_quarter_to_date("Q2"), Some(ymd(this_year, 6, 30)));
    }

    #[test]
    fn test_two_digit_year_is_not_a_year() {
        assert_eq!(parse_quarter_with_fallback("Q1'27", 2026), Some(ymd(2026, 3, 31)));
        assert_eq!(parse_quarter_with_fallback("Q4 '27", 2030), Some(ymd(2030, 12, 31)));
    }

    #[test]
    fn test_first_full_year_wins() {
        assert_eq!(
            parse_quarter_with_fallback("Q1'26 (slipped to 2027)", 2030),
            Some(ymd(2027, 3, 31))
        );
    }
}
