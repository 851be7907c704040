use crate::error::{ProcessingError, Result};

/// Normalize a raw cell for numeric parsing: trim and convert the
/// decimal comma to a decimal point.
pub fn normalize_decimal(raw: &str) -> String {
    raw.trim().replace(',', ".")
}

/// Parse a decimal-comma (or decimal-point) number, returning `None`
/// for anything non-numeric.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    normalize_decimal(raw).parse::<f64>().ok()
}

/// Parse a coordinate-like field (latitude, longitude, altitude) from
/// decimal-comma notation. Unlike [`parse_decimal`], failure here is fatal
/// for the file being processed.
pub fn parse_coordinate(field: &'static str, raw: &str) -> Result<f64> {
    parse_decimal(raw).ok_or_else(|| ProcessingError::CoordinateParseFailure {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_comma_notation() {
        assert_eq!(parse_decimal("-15,78"), Some(-15.78));
        assert_eq!(parse_decimal(" 1160,07 "), Some(1160.07));
        assert_eq!(parse_decimal("25.4"), Some(25.4));
        assert_eq!(parse_decimal("42"), Some(42.0));
    }

    #[test]
    fn test_parse_decimal_rejects_non_numeric() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("n/a"), None);
        assert_eq!(parse_decimal("12,3,4"), None);
    }

    #[test]
    fn test_parse_coordinate() {
        assert!((parse_coordinate("latitude", "-15,78961111").unwrap() - -15.78961111).abs() < 1e-9);

        let err = parse_coordinate("altitude", "alto").unwrap_err();
        assert!(err.to_string().contains("altitude"));
        assert!(err.to_string().contains("alto"));
    }
}
