//! Trigonometry in degrees.
//!
//! Inverse functions report out-of-range arguments instead of clamping them:
//! the hour-angle solver relies on that signal to detect days on which the
//! Sun never reaches a given altitude.

use crate::error::AstroError;

/// Cotangent is treated as singular within this distance of a multiple of 180°.
const COT_SINGULAR_EPS_DEG: f64 = 1e-12;

pub fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

pub fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

pub fn tan_deg(deg: f64) -> f64 {
    deg.to_radians().tan()
}

/// Cotangent; fails at 0° and 180° (and every multiple of 180°).
pub fn cot_deg(deg: f64) -> Result<f64, AstroError> {
    let r = deg.rem_euclid(180.0);
    if r < COT_SINGULAR_EPS_DEG || 180.0 - r < COT_SINGULAR_EPS_DEG {
        return Err(AstroError::DivisionByZero {
            function: "cot",
            angle_deg: deg,
        });
    }
    Ok(1.0 / tan_deg(deg))
}

/// Arcsine in degrees, range [-90, 90].
pub fn asin_deg(x: f64) -> Result<f64, AstroError> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(AstroError::Domain {
            function: "asin",
            value: x,
        });
    }
    Ok(x.asin().to_degrees())
}

/// Arccosine in degrees, range [0, 180].
pub fn acos_deg(x: f64) -> Result<f64, AstroError> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(AstroError::Domain {
            function: "acos",
            value: x,
        });
    }
    Ok(x.acos().to_degrees())
}

/// Arc-cotangent in degrees, range (0, 180); `acot(0) = 90`.
pub fn acot_deg(x: f64) -> f64 {
    1.0_f64.atan2(x).to_degrees()
}

/// Two-argument arctangent as a bearing in [0, 360).
pub fn atan2_deg(y: f64, x: f64) -> f64 {
    normalize_360(y.atan2(x).to_degrees())
}

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-17 % 360 + 360 rounds to exactly 360.0
    if r >= 360.0 { 0.0 } else { r }
}

/// Wrap an angle to (-180, 180] degrees.
pub fn wrap_180(deg: f64) -> f64 {
    let r = normalize_360(deg);
    if r > 180.0 { r - 360.0 } else { r }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sin_cos_tan_known() {
        assert!((sin_deg(30.0) - 0.5).abs() < 1e-15);
        assert!((cos_deg(60.0) - 0.5).abs() < 1e-15);
        assert!((tan_deg(45.0) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn cot_singular_at_zero_and_180() {
        assert!(matches!(
            cot_deg(0.0),
            Err(AstroError::DivisionByZero { .. })
        ));
        assert!(matches!(
            cot_deg(180.0),
            Err(AstroError::DivisionByZero { .. })
        ));
        assert!(matches!(
            cot_deg(-360.0),
            Err(AstroError::DivisionByZero { .. })
        ));
        assert!((cot_deg(45.0).unwrap() - 1.0).abs() < 1e-12);
        assert!(cot_deg(90.0).unwrap().abs() < 1e-12);
    }

    #[test]
    fn inverse_rejects_out_of_range() {
        assert_eq!(
            acos_deg(1.000_001),
            Err(AstroError::Domain {
                function: "acos",
                value: 1.000_001
            })
        );
        assert!(asin_deg(-1.5).is_err());
        assert!(acos_deg(f64::NAN).is_err());
    }

    #[test]
    fn inverse_bounds() {
        assert!((acos_deg(-1.0).unwrap() - 180.0).abs() < 1e-12);
        assert!((acos_deg(1.0).unwrap()).abs() < 1e-12);
        assert!((asin_deg(1.0).unwrap() - 90.0).abs() < 1e-12);
    }

    #[test]
    fn acot_branch() {
        assert!((acot_deg(1.0) - 45.0).abs() < 1e-12);
        assert!((acot_deg(0.0) - 90.0).abs() < 1e-12);
        assert!((acot_deg(-1.0) - 135.0).abs() < 1e-12);
        // acot(2) = atan(1/2)
        assert!((acot_deg(2.0) - 26.565_051_177_077_99).abs() < 1e-9);
    }

    #[test]
    fn atan2_is_a_bearing() {
        assert!((atan2_deg(1.0, 0.0) - 90.0).abs() < 1e-12);
        assert!((atan2_deg(-1.0, 0.0) - 270.0).abs() < 1e-12);
        assert!((atan2_deg(0.0, -1.0) - 180.0).abs() < 1e-12);
        assert!(atan2_deg(-1e-300, 1.0) < 360.0);
    }

    #[test]
    fn normalize_negative() {
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-15);
        assert!((normalize_360(730.0) - 10.0).abs() < 1e-10);
        assert_eq!(normalize_360(360.0), 0.0);
        assert_eq!(normalize_360(-1e-17), 0.0);
    }

    #[test]
    fn wrap_half_open() {
        assert_eq!(wrap_180(180.0), 180.0);
        assert_eq!(wrap_180(-180.0), 180.0);
        assert!((wrap_180(359.0) + 1.0).abs() < 1e-12);
        assert!((wrap_180(-359.0) - 1.0).abs() < 1e-12);
    }
}
