/// Convert an absolute temperature in Kelvin to Celsius, rounded to one
/// decimal place.
///
/// Rounding happens on the scaled value (`f64::round`, half away from
/// zero), so `300.0 K` comes out as `26.9` and `287.0 K` as `13.9`. Pure
/// and total for finite input.
pub fn to_celsius(kelvin: f64) -> f64 {
    ((kelvin - 273.15) * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freezing_point_is_zero() {
        assert_eq!(to_celsius(273.15), 0.0);
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(to_celsius(300.0), 26.9);
        assert_eq!(to_celsius(287.0), 13.9);
    }

    #[test]
    fn exact_values_pass_through() {
        assert_eq!(to_celsius(288.15), 15.0);
        assert_eq!(to_celsius(283.15), 10.0);
    }

    #[test]
    fn below_freezing() {
        assert_eq!(to_celsius(263.15), -10.0);
    }
}
