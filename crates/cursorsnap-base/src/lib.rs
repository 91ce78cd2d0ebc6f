use thiserror::Error;

pub mod math;
pub mod screen;
pub mod spline;

pub use math::{Transform, Vec3};
pub use screen::{Point2, Rect, Vec2, pos2};
pub use spline::{BezierPoint, Spline};

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn ensure_non_negative(name: &str, value: f64) -> Result<()> {
    if !(value >= 0.0) {
        return Err(Error::InvalidParameter(format!("{name} must be >= 0")));
    }
    Ok(())
}

pub fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if !(value > 0.0) {
        return Err(Error::InvalidParameter(format!("{name} must be > 0")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_checks_reject_nan() {
        assert!(ensure_positive("radius", f64::NAN).is_err());
        assert!(ensure_non_negative("epsilon", -0.1).is_err());
        assert!(ensure_non_negative("epsilon", 0.0).is_ok());
    }
}
