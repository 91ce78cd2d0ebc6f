use cgmath::{Deg, Matrix4, Point3, SquareMatrix, Transform as _, Vector3};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= f64::EPSILON {
            Self::ZERO
        } else {
            self / len
        }
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }

    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    pub fn axis(self, axis: usize) -> f64 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    pub fn mean(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut sum = Self::ZERO;
        let mut count = 0usize;
        for p in points {
            sum = sum + p;
            count += 1;
        }
        (count > 0).then(|| sum / count as f64)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl std::ops::Div<f64> for Vec3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

/// Object-to-world affine transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform(Matrix4<f64>);

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self(Matrix4::identity())
    }

    pub fn from_translation(offset: Vec3) -> Self {
        Self(Matrix4::from_translation(Vector3::new(offset.x, offset.y, offset.z)))
    }

    /// Translation, XYZ euler rotation (degrees) and scale, applied scale first.
    pub fn from_location_rotation_scale(location: Vec3, rotation_deg: Vec3, scale: Vec3) -> Self {
        let translation =
            Matrix4::from_translation(Vector3::new(location.x, location.y, location.z));
        let rotation = Matrix4::from_angle_z(Deg(rotation_deg.z))
            * Matrix4::from_angle_y(Deg(rotation_deg.y))
            * Matrix4::from_angle_x(Deg(rotation_deg.x));
        let scale = Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
        Self(translation * rotation * scale)
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        let p = self.0.transform_point(Point3::new(point.x, point.y, point.z));
        Vec3::new(p.x, p.y, p.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1.0e-9
    }

    #[test]
    fn location_rotation_scale_applies_scale_first() {
        let t = Transform::from_location_rotation_scale(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 90.0),
            Vec3::new(2.0, 2.0, 2.0),
        );
        let p = t.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(close(p, Vec3::new(10.0, 2.0, 0.0)), "{p:?}");
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(Vec3::mean(Vec::new()), None);
        let m = Vec3::mean([Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0)]);
        assert_eq!(m, Some(Vec3::new(1.0, 2.0, 3.0)));
    }
}
