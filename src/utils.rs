use once_cell::sync::Lazy;
use regex::Regex;

// Leading integer, the part of the input a browser's parseInt would consume
static LEADING_INT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?)(?:0[xX]([0-9a-fA-F]*)|(\d+))").unwrap());

/// Parse the leading integer of `input` the way form fields and URL values
/// are read by the page: surrounding garbage after the digits is ignored.
///
/// A `0x` prefix switches to hexadecimal. Returns `None` where the browser
/// would produce `NaN`, and also for values outside `i64`.
///
/// # Examples
/// ```
/// use storefront_widgets::utils::parse_int_prefix;
/// assert_eq!(parse_int_prefix("150"), Some(150));
/// assert_eq!(parse_int_prefix("  42px"), Some(42));
/// assert_eq!(parse_int_prefix("10,20"), Some(10));
/// assert_eq!(parse_int_prefix("0x1f"), Some(31));
/// assert_eq!(parse_int_prefix("abc"), None);
/// ```
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let captures = LEADING_INT_REGEX.captures(input)?;
    let magnitude = match (captures.get(2), captures.get(3)) {
        (Some(hex), _) => i64::from_str_radix(hex.as_str(), 16).ok()?,
        (None, Some(digits)) => digits.as_str().parse::<i64>().ok()?,
        (None, None) => return None,
    };
    match &captures[1] {
        "-" => magnitude.checked_neg(),
        _ => Some(magnitude),
    }
}

/// Percentage of `value` along `[lo, hi]`. A degenerate range maps to 0.
pub fn percent_along(value: i64, lo: i64, hi: i64) -> f64 {
    if hi <= lo {
        return 0.0;
    }
    (value - lo) as f64 / (hi - lo) as f64 * 100.0
}
