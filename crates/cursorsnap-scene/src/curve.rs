use cursorsnap_base::{BezierPoint, Spline, Vec3};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const DEFAULT_CURVE_RESOLUTION: usize = 12;

fn default_resolution() -> usize {
    DEFAULT_CURVE_RESOLUTION
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveData {
    pub splines: Vec<Spline>,
    #[serde(default)]
    pub cyclic: bool,
    /// Samples per Bezier span.
    #[serde(default = "default_resolution")]
    pub resolution: usize,
}

impl Default for CurveData {
    fn default() -> Self {
        Self {
            splines: Vec::new(),
            cyclic: false,
            resolution: DEFAULT_CURVE_RESOLUTION,
        }
    }
}

impl CurveData {
    pub fn new(splines: Vec<Spline>) -> Self {
        Self {
            splines,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.resolution == 0 {
            return Err(Error::InvalidCurve("resolution must be > 0".to_string()));
        }
        if let Some(idx) = self.splines.iter().position(|s| s.point_count() == 0) {
            return Err(Error::InvalidCurve(format!("spline {idx} has no points")));
        }
        Ok(())
    }

    /// Local-space tessellation of every spline.
    pub fn evaluate(&self) -> Vec<Vec3> {
        let mut out = Vec::new();
        for spline in &self.splines {
            match spline {
                Spline::Bezier(points) => self.tessellate_bezier(points, &mut out),
                Spline::Poly(points) => out.extend_from_slice(points),
            }
        }
        out
    }

    fn tessellate_bezier(&self, points: &[BezierPoint], out: &mut Vec<Vec3>) {
        if points.len() < 2 {
            out.extend(points.iter().map(|p| p.co));
            return;
        }

        let spans = if self.cyclic { points.len() } else { points.len() - 1 };
        for span in 0..spans {
            let a = &points[span];
            let b = &points[(span + 1) % points.len()];
            for step in 0..self.resolution {
                let t = step as f64 / self.resolution as f64;
                out.push(cubic_bezier(a.co, a.handle_right, b.handle_left, b.co, t));
            }
        }
        if !self.cyclic {
            if let Some(last) = points.last() {
                out.push(last.co);
            }
        }
    }
}

fn cubic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f64) -> Vec3 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}
