//! Monetary value normalization.

/// Remove thousands-separator commas from a captured amount ("1,234.56" -> "1234.56").
pub fn strip_thousands(s: &str) -> String {
    s.chars().filter(|&c| c != ',').collect()
}

/// Parse a normalized numeric field value.
pub fn parse_amount(s: &str) -> Option<f64> {
    let value: f64 = s.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_thousands() {
        assert_eq!(strip_thousands("1,234.56"), "1234.56");
        assert_eq!(strip_thousands("12,345,678.90"), "12345678.90");
        assert_eq!(strip_thousands("50.00"), "50.00");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1234.56"), Some(1234.56));
        assert_eq!(parse_amount(" 10 "), Some(10.0));
        assert_eq!(parse_amount("null"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("12-Jan"), None);
    }
}
