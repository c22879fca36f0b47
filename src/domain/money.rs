use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Amounts are exact decimals. The scale a value was written with is kept,
/// so `12.50` prints as `12.50` and zero prints as `0`.
pub type Amount = Decimal;

/// Parse a plain decimal string into an amount.
/// Example: "50.00" -> 50.00, "12.5" -> 12.5, ".5" -> 0.5, "100" -> 100
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    // rust_decimal rejects a bare leading dot
    let normalized = match input.strip_prefix('.') {
        Some(rest) => format!("0.{}", rest),
        None => match input.strip_prefix("-.") {
            Some(rest) => format!("-0.{}", rest),
            None => input.to_string(),
        },
    };

    Decimal::from_str(&normalized).map_err(|_| ParseAmountError::InvalidFormat(input.to_string()))
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid money format: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("50.00"), Ok(dec!(50.00)));
        assert_eq!(parse_amount("50"), Ok(dec!(50)));
        assert_eq!(parse_amount("12.5"), Ok(dec!(12.5)));
        assert_eq!(parse_amount(" 0.01 "), Ok(dec!(0.01)));
        assert_eq!(parse_amount(".50"), Ok(dec!(0.50)));
        assert_eq!(parse_amount("-6.00"), Ok(dec!(-6.00)));
    }

    #[test]
    fn test_parse_amount_keeps_scale() {
        assert_eq!(parse_amount("12.50").unwrap().to_string(), "12.50");
        assert_eq!(parse_amount("6.00").unwrap().to_string(), "6.00");
    }

    #[test]
    fn test_parse_amount_invalid() {
        assert_eq!(parse_amount(""), Err(ParseAmountError::Empty));
        assert_eq!(parse_amount("   "), Err(ParseAmountError::Empty));
        assert!(matches!(
            parse_amount("abc"),
            Err(ParseAmountError::InvalidFormat(_))
        ));
        assert!(parse_amount("12.34.56").is_err());
    }
}
