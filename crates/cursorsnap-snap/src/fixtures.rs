//! Synthetic services for unit tests: an orthographic top-down camera over
//! flat, axis-aligned geometry.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use cursorsnap_base::{Point2, Rect, Spline, Transform, Vec2, Vec3, pos2};

use crate::services::{
    CurveGeometry, GeometryProvider, MeshGeometry, ObjectId, Projector, Ray, RayHit, Raycaster,
    SnapScene,
};

/// Replays hit distances measured from each ray's own origin.
pub struct ScriptedRaycaster {
    hits: RefCell<VecDeque<Option<f64>>>,
    calls: Cell<usize>,
}

impl ScriptedRaycaster {
    pub fn new(hits: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self {
            hits: RefCell::new(hits.into_iter().collect()),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Raycaster for ScriptedRaycaster {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        self.calls.set(self.calls.get() + 1);
        let distance = self.hits.borrow_mut().pop_front().flatten()?;
        Some(RayHit {
            position: origin + direction * distance,
            face_index: 0,
            object: ObjectId(0),
        })
    }
}

pub const EYE_HEIGHT: f64 = 10.0;
pub const PIXELS_PER_UNIT: f64 = 100.0;

/// Looks down -z from `z = 10`, 100 px per world unit, 800x600 viewport.
pub struct TopDownProjector {
    rect: Rect,
}

impl Default for TopDownProjector {
    fn default() -> Self {
        Self {
            rect: Rect::from_min_size(pos2(0.0, 0.0), Vec2::new(800.0, 600.0)),
        }
    }
}

impl Projector for TopDownProjector {
    fn project(&self, point: Vec3) -> Option<Point2> {
        if point.z >= EYE_HEIGHT {
            return None;
        }
        let center = self.rect.center();
        let screen = pos2(
            center.x + (point.x * PIXELS_PER_UNIT) as f32,
            center.y - (point.y * PIXELS_PER_UNIT) as f32,
        );
        self.rect.contains(screen).then_some(screen)
    }

    fn unproject(&self, screen: Point2) -> Ray {
        let center = self.rect.center();
        let x = f64::from(screen.x - center.x) / PIXELS_PER_UNIT;
        let y = f64::from(center.y - screen.y) / PIXELS_PER_UNIT;
        Ray::new(Vec3::new(x, y, EYE_HEIGHT), Vec3::new(0.0, 0.0, -1.0))
    }

    fn view_origin(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, EYE_HEIGHT)
    }
}

/// Horizontal rectangle at height `z`, bounds inclusive.
#[derive(Clone, Copy, Debug)]
pub struct Slab {
    pub z: f64,
    pub min: (f64, f64),
    pub max: (f64, f64),
    pub object: ObjectId,
    pub face_index: usize,
}

#[derive(Default)]
pub struct SlabRaycaster {
    pub slabs: Vec<Slab>,
}

impl Raycaster for SlabRaycaster {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        const TOL: f64 = 1.0e-9;
        let mut best: Option<(f64, RayHit)> = None;
        for slab in &self.slabs {
            if direction.z.abs() <= TOL {
                continue;
            }
            let t = (slab.z - origin.z) / direction.z;
            if t <= TOL {
                continue;
            }
            let p = origin + direction * t;
            let inside = p.x >= slab.min.0 - TOL
                && p.x <= slab.max.0 + TOL
                && p.y >= slab.min.1 - TOL
                && p.y <= slab.max.1 + TOL;
            if !inside {
                continue;
            }
            if best.is_none_or(|(best_t, _)| t < best_t) {
                best = Some((
                    t,
                    RayHit {
                        position: p,
                        face_index: slab.face_index,
                        object: slab.object,
                    },
                ));
            }
        }
        best.map(|(_, hit)| hit)
    }
}

#[derive(Clone, Debug, Default)]
pub struct FakeMesh {
    pub world: Transform,
    pub vertices: Vec<Vec3>,
    pub polygons: Vec<Vec<usize>>,
}

impl FakeMesh {
    /// Axis-aligned square of half-size `half` at height `z`, one polygon.
    pub fn square(half: f64, z: f64) -> Self {
        Self {
            world: Transform::identity(),
            vertices: vec![
                Vec3::new(-half, -half, z),
                Vec3::new(half, -half, z),
                Vec3::new(half, half, z),
                Vec3::new(-half, half, z),
            ],
            polygons: vec![vec![0, 1, 2, 3]],
        }
    }

    pub fn slab(&self, object: ObjectId) -> Slab {
        let min = self
            .vertices
            .iter()
            .fold(Vec3::new(f64::MAX, f64::MAX, 0.0), |acc, v| acc.min(*v));
        let max = self
            .vertices
            .iter()
            .fold(Vec3::new(f64::MIN, f64::MIN, 0.0), |acc, v| acc.max(*v));
        Slab {
            z: self.vertices.first().map_or(0.0, |v| v.z),
            min: (min.x, min.y),
            max: (max.x, max.y),
            object,
            face_index: 0,
        }
    }
}

impl MeshGeometry for FakeMesh {
    fn world_matrix(&self) -> Transform {
        self.world
    }

    fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    fn polygon(&self, index: usize) -> Option<&[usize]> {
        self.polygons.get(index).map(Vec::as_slice)
    }
}

#[derive(Clone, Debug, Default)]
pub struct FakeCurve {
    pub world: Transform,
    pub splines: Vec<Spline>,
    pub evaluated: Vec<Vec3>,
}

impl CurveGeometry for FakeCurve {
    fn world_matrix(&self) -> Transform {
        self.world
    }

    fn splines(&self) -> &[Spline] {
        &self.splines
    }

    fn evaluated_points(&self) -> &[Vec3] {
        &self.evaluated
    }
}

#[derive(Default)]
pub struct MeshSet(pub Vec<FakeMesh>);

impl GeometryProvider for MeshSet {
    fn mesh(&self, object: ObjectId) -> Option<&dyn MeshGeometry> {
        self.0.get(object.0).map(|mesh| mesh as &dyn MeshGeometry)
    }
}

/// Object ids index into both mesh sets.
#[derive(Default)]
pub struct FakeScene {
    pub raw: MeshSet,
    pub evaluated: MeshSet,
    pub curves: Vec<FakeCurve>,
    pub editing: Vec<ObjectId>,
}

impl FakeScene {
    pub fn with_meshes(meshes: Vec<FakeMesh>) -> Self {
        Self {
            raw: MeshSet(meshes.clone()),
            evaluated: MeshSet(meshes),
            ..Self::default()
        }
    }

    pub fn slabs(&self) -> SlabRaycaster {
        SlabRaycaster {
            slabs: self
                .evaluated
                .0
                .iter()
                .enumerate()
                .map(|(idx, mesh)| mesh.slab(ObjectId(idx)))
                .collect(),
        }
    }
}

impl SnapScene for FakeScene {
    fn visible_meshes(&self) -> Vec<&dyn MeshGeometry> {
        self.raw.0.iter().map(|mesh| mesh as &dyn MeshGeometry).collect()
    }

    fn visible_curves(&self) -> Vec<&dyn CurveGeometry> {
        self.curves.iter().map(|curve| curve as &dyn CurveGeometry).collect()
    }

    fn is_editing(&self, object: ObjectId) -> bool {
        self.editing.contains(&object)
    }

    fn raw_geometry(&self) -> &dyn GeometryProvider {
        &self.raw
    }

    fn evaluated_geometry(&self) -> &dyn GeometryProvider {
        &self.evaluated
    }
}
