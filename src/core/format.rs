//! SI-prefixed number formatting for axis and legend labels.

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Formats `value` with two significant digits and an SI suffix
/// (`1234.0` -> `1.2k`, `0.5` -> `500m`, `0.0` -> `0.0`).
#[must_use]
pub fn format_si(value: f64) -> String {
    format_si_with_precision(value, 2)
}

/// Formats `value` with `significant` digits and an SI suffix.
#[must_use]
pub fn format_si_with_precision(value: f64, significant: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let precision = significant.max(1);
    let negative = value < 0.0;
    let magnitude = value.abs();

    let (digits, exponent) = decimal_parts(magnitude, Some(precision));
    let prefix_exponent = exponent.div_euclid(3).clamp(-8, 8);
    let integer_digits = exponent - prefix_exponent * 3 + 1;
    let digit_count = digits.len() as i32;

    let body = if integer_digits == digit_count {
        digits
    } else if integer_digits > digit_count {
        let mut padded = digits;
        padded.push_str(&"0".repeat((integer_digits - digit_count) as usize));
        padded
    } else if integer_digits > 0 {
        let split = integer_digits as usize;
        format!("{}.{}", &digits[..split], &digits[split..])
    } else {
        let leading_zeros = "0".repeat((-integer_digits) as usize);
        let refined = (precision as i32 + integer_digits - 1).max(0) as usize;
        let (refined_digits, _) = decimal_parts(magnitude, (refined > 0).then_some(refined));
        format!("0.{leading_zeros}{refined_digits}")
    };

    let suffix = SI_PREFIXES[(prefix_exponent + 8) as usize];
    let sign = if negative { "-" } else { "" };
    format!("{sign}{body}{suffix}")
}

/// Splits `value` into its significant digits and decimal exponent, so that
/// `value ≈ d1.d2d3… × 10^exponent`.
fn decimal_parts(value: f64, precision: Option<usize>) -> (String, i32) {
    let formatted = match precision {
        Some(precision) => format!("{:.*e}", precision.saturating_sub(1), value),
        None => format!("{value:e}"),
    };
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    (digits, exponent.parse().unwrap_or(0))
}
