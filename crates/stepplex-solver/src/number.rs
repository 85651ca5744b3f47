use num_bigint::BigInt;
use num_rational::BigRational;

/// Exact value stored in every tableau cell.
pub type Rational = BigRational;

/// Whole number as a [`Rational`].
pub fn integer(value: i64) -> Rational {
    Rational::from_integer(BigInt::from(value))
}

/// `numerator / denominator` as a reduced [`Rational`].
///
/// Panics when `denominator` is zero, like `BigRational::new`.
pub fn ratio(numerator: i64, denominator: i64) -> Rational {
    Rational::new(BigInt::from(numerator), BigInt::from(denominator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_is_reduced() {
        assert_eq!(ratio(6, -4), ratio(-3, 2));
        assert_eq!(ratio(4, 2), integer(2));
    }
}
