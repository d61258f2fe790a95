use crate::{TkError, TkResult};

pub fn ensure_finite(v: f64, what: &'static str) -> TkResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TkError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: f64, what: &'static str) -> TkResult<f64> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(TkError::NonPositive { what, value: v })
    }
}

/// Clamp to [0, 1]. NaN maps to 0.
#[inline]
pub fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(f64::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(1.2, "area").is_ok());
        assert_eq!(
            ensure_positive(0.0, "area"),
            Err(TkError::NonPositive {
                what: "area",
                value: 0.0
            })
        );
        assert!(ensure_positive(-1.0, "area").is_err());
        assert!(ensure_positive(f64::INFINITY, "area").is_err());
    }

    #[test]
    fn clamp_unit_range() {
        assert_eq!(clamp_unit(-0.5), 0.0);
        assert_eq!(clamp_unit(0.5), 0.5);
        assert_eq!(clamp_unit(1.5), 1.0);
        assert_eq!(clamp_unit(f64::NAN), 0.0);
    }
}
