/// Straight-line mapping from sensor output voltage to temperature.
///
/// Belongs to the analog sensor wired to the input, not to the ADC.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinearCalibration {
    /// Degrees Celsius per millivolt.
    pub slope: f64,
    /// Degrees Celsius at zero millivolts.
    pub offset: f64,
}

impl LinearCalibration {
    /// TMP36: 750 mV at 25 °C, 10 mV/°C.
    pub const TMP36: Self = Self {
        slope: 0.1,
        offset: -50.0,
    };

    pub const fn new(slope: f64, offset: f64) -> Self {
        Self { slope, offset }
    }

    /// Line through two `(millivolts, celsius)` reference points.
    ///
    /// `None` if the points share a voltage or anything in the fit is not finite.
    pub fn from_points(a: (f64, f64), b: (f64, f64)) -> Option<Self> {
        let (mv_a, celsius_a) = a;
        let (mv_b, celsius_b) = b;

        if ![mv_a, celsius_a, mv_b, celsius_b].iter().all(|v| v.is_finite()) || mv_a == mv_b {
            return None;
        }

        let slope = (celsius_b - celsius_a) / (mv_b - mv_a);
        let offset = celsius_a - slope * mv_a;

        if !slope.is_finite() || !offset.is_finite() {
            return None;
        }

        Some(Self { slope, offset })
    }

    pub fn celsius(&self, millivolts: f64) -> f64 {
        millivolts * self.slope + self.offset
    }
}

impl Default for LinearCalibration {
    fn default() -> Self {
        Self::TMP36
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn tmp36_reference_points() {
        let tmp36 = LinearCalibration::TMP36;
        assert!(close(tmp36.celsius(750.0), 25.0));
        assert!(close(tmp36.celsius(1000.0), 50.0));
        assert!(close(tmp36.celsius(500.0), 0.0));
    }

    #[test]
    fn two_point_fit() {
        let fitted = LinearCalibration::from_points((750.0, 25.0), (1000.0, 50.0)).unwrap();
        assert!(close(fitted.slope, LinearCalibration::TMP36.slope));
        assert!(close(fitted.offset, LinearCalibration::TMP36.offset));
    }

    #[test]
    fn point_order_does_not_matter() {
        let forward = LinearCalibration::from_points((100.0, -40.0), (1750.0, 125.0)).unwrap();
        let reverse = LinearCalibration::from_points((1750.0, 125.0), (100.0, -40.0)).unwrap();
        assert!(close(forward.slope, reverse.slope));
        assert!(close(forward.offset, reverse.offset));
        assert!(close(forward.celsius(100.0), -40.0));
    }

    #[test]
    fn same_voltage_has_no_line() {
        assert_eq!(
            LinearCalibration::from_points((750.0, 25.0), (750.0, 30.0)),
            None
        );
        assert_eq!(
            LinearCalibration::from_points((750.0, 25.0), (750.0, 25.0)),
            None
        );
    }

    #[test]
    fn non_finite_points_have_no_line() {
        assert_eq!(
            LinearCalibration::from_points((f64::NAN, 25.0), (1000.0, 50.0)),
            None
        );
        assert_eq!(
            LinearCalibration::from_points((750.0, 25.0), (f64::INFINITY, 50.0)),
            None
        );
        assert_eq!(
            LinearCalibration::from_points((750.0, f64::NAN), (1000.0, 50.0)),
            None
        );
        // Voltages so close that the slope overflows.
        assert_eq!(
            LinearCalibration::from_points((0.0, 0.0), (f64::MIN_POSITIVE, f64::MAX)),
            None
        );
    }
}
