use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Bezier anchor with its two tangent handles, all in the curve's local space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BezierPoint {
    pub co: Vec3,
    pub handle_left: Vec3,
    pub handle_right: Vec3,
}

impl BezierPoint {
    pub fn new(co: Vec3, handle_left: Vec3, handle_right: Vec3) -> Self {
        Self {
            co,
            handle_left,
            handle_right,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "points", rename_all = "snake_case")]
pub enum Spline {
    Bezier(Vec<BezierPoint>),
    Poly(Vec<Vec3>),
}

impl Spline {
    pub fn point_count(&self) -> usize {
        match self {
            Spline::Bezier(points) => points.len(),
            Spline::Poly(points) => points.len(),
        }
    }
}
