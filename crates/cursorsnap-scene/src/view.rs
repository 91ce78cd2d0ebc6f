use cursorsnap_base::{Point2, Rect, Vec2, Vec3, ensure_positive, pos2};
use cursorsnap_snap::{Projector, Ray};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const NEAR_PLANE: f64 = 1.0e-4;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Projection {
    /// Vertical field of view of the shorter viewport side, in degrees.
    Perspective { fov_deg: f64 },
    /// Pixels per world unit.
    Orthographic { scale: f64 },
}

/// Camera over a viewport rect. Screen `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub viewport: Rect,
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub projection: Projection,
}

#[derive(Clone, Copy, Debug)]
struct CameraBasis {
    right: Vec3,
    up: Vec3,
    forward: Vec3,
}

impl View {
    pub fn perspective(width: f32, height: f32, eye: Vec3, target: Vec3, fov_deg: f64) -> Self {
        Self {
            viewport: Rect::from_min_size(pos2(0.0, 0.0), Vec2::new(width, height)),
            eye,
            target,
            up: Vec3::new(0.0, 0.0, 1.0),
            projection: Projection::Perspective { fov_deg },
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("viewport width", f64::from(self.viewport.width()))?;
        ensure_positive("viewport height", f64::from(self.viewport.height()))?;
        if (self.target - self.eye).length() <= f64::EPSILON {
            return Err(Error::Base(cursorsnap_base::Error::InvalidParameter(
                "view eye and target coincide".to_string(),
            )));
        }
        match self.projection {
            Projection::Perspective { fov_deg } => {
                ensure_positive("fov_deg", fov_deg)?;
                ensure_positive("180 - fov_deg", 180.0 - fov_deg)?;
            }
            Projection::Orthographic { scale } => ensure_positive("scale", scale)?,
        }
        Ok(())
    }

    fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalized()
    }

    fn camera_basis(&self) -> CameraBasis {
        let forward = self.forward();
        let mut right = forward.cross(self.up);
        if right.length() <= 1.0e-6 {
            right = forward.cross(default_up(forward));
        }
        let right = right.normalized();
        let up = right.cross(forward).normalized();
        CameraBasis { right, up, forward }
    }

    /// Perspective focal length in pixels.
    fn focal_length(&self, fov_deg: f64) -> f64 {
        let view_size = f64::from(self.viewport.width().min(self.viewport.height()));
        view_size * 0.5 / (fov_deg.to_radians() * 0.5).tan()
    }
}

impl Projector for View {
    fn project(&self, point: Vec3) -> Option<Point2> {
        let basis = self.camera_basis();
        let rel = point - self.eye;
        let camera = Vec3::new(rel.dot(basis.right), rel.dot(basis.up), rel.dot(basis.forward));
        if camera.z <= NEAR_PLANE {
            return None;
        }
        let scale = match self.projection {
            Projection::Perspective { fov_deg } => self.focal_length(fov_deg) / camera.z,
            Projection::Orthographic { scale } => scale,
        };
        let center = self.viewport.center();
        let screen = pos2(
            center.x + (camera.x * scale) as f32,
            center.y - (camera.y * scale) as f32,
        );
        self.viewport.contains(screen).then_some(screen)
    }

    fn unproject(&self, screen: Point2) -> Ray {
        let basis = self.camera_basis();
        let center = self.viewport.center();
        let dx = f64::from(screen.x - center.x);
        let dy = f64::from(center.y - screen.y);
        match self.projection {
            Projection::Perspective { fov_deg } => {
                let focal = self.focal_length(fov_deg);
                let dir = basis.forward + basis.right * (dx / focal) + basis.up * (dy / focal);
                Ray::new(self.eye, dir)
            }
            Projection::Orthographic { scale } => {
                let origin = self.eye + basis.right * (dx / scale) + basis.up * (dy / scale);
                Ray::new(origin, basis.forward)
            }
        }
    }

    fn view_origin(&self) -> Vec3 {
        self.eye
    }
}

fn default_up(forward: Vec3) -> Vec3 {
    let mut up = Vec3::new(0.0, 0.0, 1.0);
    if forward.cross(up).length() <= 1.0e-6 {
        up = Vec3::new(0.0, 1.0, 0.0);
    }
    let right = forward.cross(up).normalized();
    right.cross(forward).normalized()
}
