//! Host services the snapping core reads from. Nothing here is mutated by a
//! query.

use cursorsnap_base::{Point2, Spline, Transform, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalized(),
        }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub position: Vec3,
    /// Polygon index in the object's evaluated mesh.
    pub face_index: usize,
    pub object: ObjectId,
}

pub trait Projector {
    /// `None` when the point is behind the camera or lands outside the viewport.
    fn project(&self, point: Vec3) -> Option<Point2>;

    fn unproject(&self, screen: Point2) -> Ray;

    fn view_origin(&self) -> Vec3;
}

pub trait Raycaster {
    /// Nearest hit along the ray, `None` on a miss.
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit>;
}

pub trait MeshGeometry {
    fn world_matrix(&self) -> Transform;

    /// Local-space vertex positions.
    fn vertices(&self) -> &[Vec3];

    /// Vertex indices of a polygon in loop order.
    fn polygon(&self, index: usize) -> Option<&[usize]>;
}

pub trait CurveGeometry {
    fn world_matrix(&self) -> Transform;

    fn splines(&self) -> &[Spline];

    /// Local-space samples of the evaluated curve.
    fn evaluated_points(&self) -> &[Vec3];
}

pub trait GeometryProvider {
    fn mesh(&self, object: ObjectId) -> Option<&dyn MeshGeometry>;
}

pub trait SnapScene {
    /// Un-evaluated meshes of every visible mesh object.
    fn visible_meshes(&self) -> Vec<&dyn MeshGeometry>;

    /// Visible curve objects in registration order.
    fn visible_curves(&self) -> Vec<&dyn CurveGeometry>;

    fn is_editing(&self, object: ObjectId) -> bool;

    fn raw_geometry(&self) -> &dyn GeometryProvider;

    fn evaluated_geometry(&self) -> &dyn GeometryProvider;
}

/// Objects under interactive edit expose their raw data; everything else is
/// read post-modifier.
pub fn geometry_for(scene: &dyn SnapScene, object: ObjectId) -> &dyn GeometryProvider {
    if scene.is_editing(object) {
        scene.raw_geometry()
    } else {
        scene.evaluated_geometry()
    }
}
