use chrono::{Datelike, Local};
use regex::Regex;
use std::sync::LazyLock;

static FULL_DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());
static FULL_SLASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}/[0-9]{2}/[0-9]{2}$").unwrap());
static MONTH_DAY_DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}-[0-9]{2}$").unwrap());
static MONTH_DAY_SLASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}$").unwrap());

/// Converts `YYYY-MM-DD`, `YYYY/MM/DD`, `MM-DD` or `MM/DD` into `YYYY-MM-DD`,
/// filling a missing year with the current local year. Anything else is
/// returned unchanged.
pub fn normalize_date(input: &str) -> String {
    normalize_date_for_year(input, Local::now().year())
}

pub fn normalize_date_for_year(input: &str, year: i32) -> String {
    // Four-digit years first: both shapes share separators with MM-DD.
    if FULL_DASH_RE.is_match(input) || FULL_SLASH_RE.is_match(input) {
        return input.replace('/', "-");
    }

    if MONTH_DAY_DASH_RE.is_match(input) || MONTH_DAY_SLASH_RE.is_match(input) {
        return format!("{:04}-{}", year, input.replace('/', "-"));
    }

    input.to_string()
}
