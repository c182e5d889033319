use std::fmt;

/// Scientific notation with a signed, at least two-digit exponent (`-2.50000e-01`).
///
/// Rust's `{:e}` writes `-2.5e-1`; exchange formats expect the C `%e` layout. Width and
/// alignment flags of the surrounding format string are honoured.
#[derive(Debug, Clone, Copy)]
pub struct Scientific {
    value: f64,
    precision: usize,
}

impl Scientific {
    pub fn new(value: f64, precision: usize) -> Self {
        Self { value, precision }
    }
}

impl fmt::Display for Scientific {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plain = format!("{:.*e}", self.precision, self.value);
        // inf and NaN carry no exponent
        let Some((mantissa, exponent)) = plain.split_once('e') else {
            return f.pad(&plain);
        };
        let Ok(exponent) = exponent.parse::<i32>() else {
            return f.pad(&plain);
        };
        let sign = if exponent < 0 { '-' } else { '+' };
        f.pad(&format!("{}e{}{:02}", mantissa, sign, exponent.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponent_is_signed_with_two_digits() {
        assert_eq!(Scientific::new(1.0, 5).to_string(), "1.00000e+00");
        assert_eq!(Scientific::new(-0.25, 5).to_string(), "-2.50000e-01");
        assert_eq!(Scientific::new(0.0, 5).to_string(), "0.00000e+00");
        assert_eq!(Scientific::new(12345.0, 2).to_string(), "1.23e+04");
    }

    #[test]
    fn three_digit_exponents_are_kept_whole() {
        assert_eq!(Scientific::new(5e-300, 5).to_string(), "5.00000e-300");
        assert_eq!(Scientific::new(1e200, 1).to_string(), "1.0e+200");
    }

    #[test]
    fn width_flags_pad_the_whole_number() {
        assert_eq!(format!("{:>13}", Scientific::new(1.0, 5)), "  1.00000e+00");
        assert_eq!(format!("{:>13}", Scientific::new(-0.25, 5)), " -2.50000e-01");
    }

    #[test]
    fn non_finite_values_pass_through() {
        assert_eq!(Scientific::new(f64::INFINITY, 5).to_string(), "inf");
        assert_eq!(Scientific::new(f64::NAN, 5).to_string(), "NaN");
    }
}
