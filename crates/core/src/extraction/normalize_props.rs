//! Property-based tests for figure normalization.

use proptest::prelude::*;

use super::normalize::{normalize, parse_year};

/// Formats a whole number with thousands separators.
fn with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Thousands separators never change the value.
    #[test]
    fn prop_commas_are_ignored(value in 0u64..1_000_000_000_000) {
        let plain = normalize(&value.to_string());
        let grouped = normalize(&with_commas(value));

        prop_assert_eq!(plain, grouped);
        #[allow(clippy::cast_precision_loss)]
        let expected = value as f64;
        prop_assert_eq!(plain, Some(expected));
    }

    /// A parenthesised figure is the negation of the bare one.
    #[test]
    fn prop_parentheses_negate(value in 1u64..1_000_000_000, cents in 0u32..100) {
        let bare = format!("{}.{cents:02}", with_commas(value));
        let wrapped = format!("({bare})");

        let positive = normalize(&bare).unwrap();
        let negative = normalize(&wrapped).unwrap();

        prop_assert!(positive > 0.0);
        prop_assert_eq!(negative, -positive);
    }

    /// Text without a single digit never parses.
    #[test]
    fn prop_no_digits_is_none(text in "[^0-9]{0,24}") {
        prop_assert_eq!(normalize(&text), None);
        prop_assert_eq!(parse_year(Some(&text)), None);
    }

    /// Surrounding whitespace is irrelevant.
    #[test]
    fn prop_whitespace_is_trimmed(value in -1_000_000i64..1_000_000, pad in " {0,4}") {
        let padded = format!("{pad}{value}{pad}");
        prop_assert_eq!(normalize(&padded), normalize(&value.to_string()));
    }
}
