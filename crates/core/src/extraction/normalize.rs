//! Numeric cell normalization.
//!
//! Turns printed figures such as `"1,234.50"` or `"(1,234.50)"` into
//! numbers. Anything that cannot be read is `None`; nothing here fails.

/// Parses a printed figure.
///
/// Commas are dropped, then every character other than digits,
/// parentheses, `.` and `-` is discarded. A value wrapped in parentheses
/// is negative (accounting convention).
#[must_use]
pub fn normalize(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '(' | ')' | '.' | '-'))
        .collect();

    let signed = match cleaned
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => format!("-{inner}"),
        None => cleaned,
    };

    signed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parses an optional table cell.
#[must_use]
pub fn normalize_cell(cell: Option<&str>) -> Option<f64> {
    cell.and_then(normalize)
}

/// Parses a year cell by keeping only its digits.
#[must_use]
pub fn parse_year(cell: Option<&str>) -> Option<i32> {
    let digits: String = cell?.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("(1,234.50)", -1234.50)]
    #[case("1,000", 1000.0)]
    #[case("  220000 ", 220_000.0)]
    #[case("$ 1,200.75", 1200.75)]
    #[case("-35", -35.0)]
    #[case("(500)", -500.0)]
    #[case("12.5%", 12.5)]
    #[case("1234.", 1234.0)]
    fn test_normalize_parses(#[case] input: &str, #[case] expected: f64) {
        let value = normalize(input).unwrap();
        assert!((value - expected).abs() < 1e-9, "{input} -> {value}");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("N/A")]
    #[case("-")]
    #[case("()")]
    #[case("1.2.3")]
    #[case("--5")]
    fn test_normalize_rejects(#[case] input: &str) {
        assert_eq!(normalize(input), None);
    }

    #[test]
    fn test_normalize_cell_none() {
        assert_eq!(normalize_cell(None), None);
        assert_eq!(normalize_cell(Some("7")), Some(7.0));
    }

    #[rstest]
    #[case(Some("2023"), Some(2023))]
    #[case(Some("FY 2022"), Some(2022))]
    #[case(Some("2021*"), Some(2021))]
    #[case(Some("Total"), None)]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn test_parse_year(#[case] cell: Option<&str>, #[case] expected: Option<i32>) {
        assert_eq!(parse_year(cell), expected);
    }
}
