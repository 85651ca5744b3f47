use num_bigint::BigInt;
use num_traits::Zero;
use stepplex_solver::Rational;

use crate::error::FormatError;

/// Largest power of ten a decimal may scale by, counting both the exponent
/// and the digits after the point.
pub const MAX_DECIMAL_SCALE: u32 = 1000;

/// Parse an exact rational from user text.
///
/// Accepts integers (`-3`), fractions (`7/2`) and decimals with an optional
/// exponent (`0.25`, `.5`, `2.5e-1`). Decimals scaling by more than
/// [`MAX_DECIMAL_SCALE`] powers of ten are rejected.
pub fn parse_rational(text: &str) -> Result<Rational, FormatError> {
    let text = text.trim();
    let invalid = || FormatError::InvalidNumber(text.to_string());

    if let Some((numerator, denominator)) = text.split_once('/') {
        let numerator = parse_integer(numerator.trim()).ok_or_else(invalid)?;
        let denominator = parse_integer(denominator.trim()).ok_or_else(invalid)?;
        if denominator.is_zero() {
            return Err(invalid());
        }
        return Ok(Rational::new(numerator, denominator));
    }

    parse_decimal(text).ok_or_else(invalid)
}

fn parse_integer(text: &str) -> Option<BigInt> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.strip_prefix('+').unwrap_or(text).parse().ok()
}

fn parse_decimal(text: &str) -> Option<Rational> {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(pos) => (&text[..pos], text[pos + 1..].parse::<i32>().ok()?),
        None => (text, 0),
    };

    let (negative, unsigned) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits: BigInt = format!("{whole}{fraction}").parse().ok()?;
    let scale = exponent.checked_sub(i32::try_from(fraction.len()).ok()?)?;
    if scale.unsigned_abs() > MAX_DECIMAL_SCALE {
        return None;
    }
    let ten = BigInt::from(10);
    let mut value = Rational::from_integer(digits);
    if scale >= 0 {
        value *= Rational::from_integer(ten.pow(scale.unsigned_abs()));
    } else {
        value /= Rational::from_integer(ten.pow(scale.unsigned_abs()));
    }

    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepplex_solver::{integer, ratio};

    #[test]
    fn test_integers() {
        assert_eq!(parse_rational("42").unwrap(), integer(42));
        assert_eq!(parse_rational(" -7 ").unwrap(), integer(-7));
        assert_eq!(parse_rational("+3").unwrap(), integer(3));
    }

    #[test]
    fn test_fractions() {
        assert_eq!(parse_rational("3/4").unwrap(), ratio(3, 4));
        assert_eq!(parse_rational("-6/4").unwrap(), ratio(-3, 2));
        assert_eq!(parse_rational("1 / 3").unwrap(), ratio(1, 3));
    }

    #[test]
    fn test_decimals() {
        assert_eq!(parse_rational("0.25").unwrap(), ratio(1, 4));
        assert_eq!(parse_rational(".5").unwrap(), ratio(1, 2));
        assert_eq!(parse_rational("-1.5").unwrap(), ratio(-3, 2));
        assert_eq!(parse_rational("2.").unwrap(), integer(2));
        assert_eq!(parse_rational("1e3").unwrap(), integer(1000));
        assert_eq!(parse_rational("2.5e-1").unwrap(), ratio(1, 4));
    }

    #[test]
    fn test_scale_limit() {
        let big = BigInt::from(10).pow(MAX_DECIMAL_SCALE);
        assert_eq!(parse_rational("1e1000").unwrap(), Rational::from_integer(big.clone()));
        assert_eq!(parse_rational("0.5e-999").unwrap(), Rational::new(BigInt::from(5), big));
        for text in ["1e2000000000", "1e1001", "0.5e-1000", "1e-2147483648"] {
            assert!(
                matches!(parse_rational(text), Err(FormatError::InvalidNumber(_))),
                "accepted {:?}",
                text
            );
        }
    }

    #[test]
    fn test_rejects_garbage() {
        for text in ["", "abc", "1/0", "1.2.3", "3/x", "-", ".", "1e", "--1"] {
            assert!(
                matches!(parse_rational(text), Err(FormatError::InvalidNumber(_))),
                "accepted {:?}",
                text
            );
        }
    }
}
