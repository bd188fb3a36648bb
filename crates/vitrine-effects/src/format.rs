//! Number rendering for counters.

/// Render `value` with comma thousands separators and at most three
/// fraction digits, e.g. `1234.5` as `1,234.5`.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let mut integer = rounded.trunc() as u64;
    let mut fraction = ((rounded - rounded.trunc()) * 1000.0).round() as u64;
    if fraction >= 1000 {
        integer += 1;
        fraction = 0;
    }

    let digits = integer.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 6);
    if value < 0.0 && (integer > 0 || fraction > 0) {
        out.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if fraction > 0 {
        let fraction = format!("{fraction:03}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(100.0), "100");
        assert_eq!(format_grouped(1000.0), "1,000");
        assert_eq!(format_grouped(999_999.0), "999,999");
        assert_eq!(format_grouped(1_234_567.0), "1,234,567");
        assert_eq!(format_grouped(-12_500.0), "-12,500");
    }

    #[test]
    fn test_fraction_digits() {
        assert_eq!(format_grouped(1234.5), "1,234.5");
        assert_eq!(format_grouped(0.125), "0.125");
        assert_eq!(format_grouped(2.0004), "2");
        assert_eq!(format_grouped(9.9996), "10");
    }
}
