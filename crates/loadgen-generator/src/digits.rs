//! Decimal digit counting for byte bookkeeping.

/// Number of decimal digits in `n` (`0` has one digit).
///
/// Ids up to ten digits resolve through the comparison ladder; longer values
/// peel off ten digits at a time.
pub const fn digit_count(n: u64) -> usize {
    if n < 10 {
        1
    } else if n < 100 {
        2
    } else if n < 1_000 {
        3
    } else if n < 10_000 {
        4
    } else if n < 100_000 {
        5
    } else if n < 1_000_000 {
        6
    } else if n < 10_000_000 {
        7
    } else if n < 100_000_000 {
        8
    } else if n < 1_000_000_000 {
        9
    } else if n < 10_000_000_000 {
        10
    } else {
        10 + digit_count(n / 10_000_000_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let mut power: u64 = 1;
        for digits in 1..=19 {
            // power = 10^(digits-1) is the smallest value with `digits` digits
            assert_eq!(digit_count(power), digits, "10^{}", digits - 1);
            assert_eq!(digit_count(power * 10 - 1), digits, "10^{} - 1", digits);
            power *= 10;
        }
        assert_eq!(digit_count(power), 20);
    }

    #[test]
    fn test_matches_formatting() {
        for n in [0, 1, 9, 10, 99, 12_345, 9_999_999_999, u64::MAX] {
            assert_eq!(digit_count(n), n.to_string().len(), "{n}");
        }
    }
}
