//! Lenient number parsing for message payloads
//!
//! The motor controller has always been parsed with C `atol`/`atof`
//! semantics: leading whitespace is skipped, the longest numeric prefix is
//! used, and anything unparseable reads as zero. Peers rely on that, so no
//! error ever comes out of here.

/// Parse the integer prefix of `text`, zero if there is none
///
/// Saturates at the `i32` range instead of overflowing.
pub fn parse_int(text: &str) -> i32 {
    let bytes = text.trim_start().as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let mut value: i32 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = (b - b'0') as i32;
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Parse the floating-point prefix of `text`, zero if there is none
pub fn parse_float(text: &str) -> f32 {
    let trimmed = text.trim_start();
    let prefix = &trimmed[..float_prefix_len(trimmed.as_bytes())];
    prefix.parse::<f32>().unwrap_or(0.0)
}

/// Length of the longest `[+-]digits[.digits][(e|E)[+-]digits]` prefix
fn float_prefix_len(bytes: &[u8]) -> usize {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        mantissa_digits += j - frac_start;
        i = j;
    }

    if mantissa_digits == 0 {
        return 0;
    }

    // Exponent only counts if at least one digit follows it
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_plain() {
        assert_eq!(parse_int("3"), 3);
        assert_eq!(parse_int("  42"), 42);
        assert_eq!(parse_int("-7"), -7);
        assert_eq!(parse_int("+15"), 15);
    }

    #[test]
    fn test_int_prefix_and_garbage() {
        assert_eq!(parse_int("12abc"), 12);
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("-"), 0);
        assert_eq!(parse_int("7\r"), 7);
    }

    #[test]
    fn test_int_saturates() {
        assert_eq!(parse_int("99999999999"), i32::MAX);
        assert_eq!(parse_int("-99999999999"), i32::MIN);
    }

    #[test]
    fn test_float_plain() {
        assert_eq!(parse_float("12.5"), 12.5);
        assert_eq!(parse_float("-0.25"), -0.25);
        assert_eq!(parse_float(" 3"), 3.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
    }

    #[test]
    fn test_float_exponent() {
        assert_eq!(parse_float("1e2"), 100.0);
        // Dangling exponent is not part of the number
        assert_eq!(parse_float("4e"), 4.0);
        assert_eq!(parse_float("4e+x"), 4.0);
    }

    #[test]
    fn test_float_garbage_is_zero() {
        assert_eq!(parse_float("abc"), 0.0);
        assert_eq!(parse_float("."), 0.0);
        assert_eq!(parse_float("-"), 0.0);
        assert_eq!(parse_float(""), 0.0);
        assert_eq!(parse_float("12.5mm\r"), 12.5);
    }

    mod props {
        use crate::number::{parse_float, parse_int};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_int_matches_std(n in any::<i32>(), tail in "[a-z \r]{0,4}") {
                let text = format!("{}{}", n, tail);
                prop_assert_eq!(parse_int(&text), n);
            }

            #[test]
            fn prop_float_never_panics(text in "\\PC{0,16}") {
                let _ = parse_float(&text);
                let _ = parse_int(&text);
            }
        }
    }
}
