//! Price display formatting.

/// Currency suffix appended to formatted prices.
pub const CURRENCY_SUFFIX: &str = " ₮";

/// Most fraction digits kept when rendering a price.
const MAX_FRACTION_DIGITS: usize = 3;

/// Format a raw sheet price for display.
///
/// Everything except digits, `.` and `-` is stripped and the longest
/// leading decimal number is parsed. Unparseable input comes back
/// unchanged; empty input stays empty.
///
/// ```
/// use partmatch_catalog::format_price;
///
/// assert_eq!(format_price("125000"), "125,000 ₮");
/// assert_eq!(format_price("1 234 567.5₮"), "1,234,567.5 ₮");
/// assert_eq!(format_price("асуух"), "асуух");
/// ```
pub fn format_price(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    match leading_number(&cleaned).and_then(|n| n.parse::<f64>().ok()) {
        Some(value) if value.is_finite() => format!("{}{CURRENCY_SUFFIX}", group_thousands(value)),
        _ => raw.to_string(),
    }
}

/// Longest prefix of the form `-?digits(.digits)?` containing a digit.
fn leading_number(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    if bytes.first() == Some(&b'-') {
        end = 1;
    }

    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }

    Some(s[..end].trim_end_matches('.'))
}

fn group_thousands(value: f64) -> String {
    let rendered = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((&rendered, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    let sign = if value.is_sign_negative() && !is_zero { "-" } else { "" };

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(format_price(""), "");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(format_price("0"), "0 ₮");
        assert_eq!(format_price("999"), "999 ₮");
        assert_eq!(format_price("1000"), "1,000 ₮");
        assert_eq!(format_price("1234567"), "1,234,567 ₮");
    }

    #[test]
    fn test_strips_noise() {
        assert_eq!(format_price("₮ 45,000"), "45,000 ₮");
        assert_eq!(format_price("45 000 төг"), "45,000 ₮");
    }

    #[test]
    fn test_fraction_digits() {
        assert_eq!(format_price("12.50"), "12.5 ₮");
        assert_eq!(format_price("0.1236"), "0.124 ₮");
        assert_eq!(format_price("7."), "7 ₮");
    }

    #[test]
    fn test_leading_number_only() {
        assert_eq!(format_price("1.2.3"), "1.2 ₮");
        assert_eq!(format_price("150-200"), "150 ₮");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_price("-2500"), "-2,500 ₮");
        assert_eq!(format_price("-0"), "0 ₮");
    }

    #[test]
    fn test_unparseable_kept() {
        assert_eq!(format_price("Үнэ тохирно"), "Үнэ тохирно");
        assert_eq!(format_price("-"), "-");
        assert_eq!(format_price("..."), "...");
    }
}
