use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use cursorsnap_base::{Spline, Transform, Vec3};
use cursorsnap_snap::{
    CurveGeometry, GeometryProvider, MeshGeometry, ObjectId, RayHit, Raycaster, SnapConfig,
    SnapScene, Snapper,
};
use tracing::{debug, warn};

use crate::bvh::TriangleBvh;
use crate::mesh::MeshData;
use crate::modifier::apply_stack;
use crate::object::ObjectData;
use crate::scene::Scene;
use crate::view::View;

/// Mesh data placed in the world by its object's matrix.
#[derive(Clone, Debug)]
pub struct MeshInstance<'a> {
    world: Transform,
    data: Cow<'a, MeshData>,
}

impl MeshGeometry for MeshInstance<'_> {
    fn world_matrix(&self) -> Transform {
        self.world
    }

    fn vertices(&self) -> &[Vec3] {
        &self.data.vertices
    }

    fn polygon(&self, index: usize) -> Option<&[usize]> {
        self.data.polygons.get(index).map(Vec::as_slice)
    }
}

#[derive(Clone, Debug)]
pub struct CurveInstance<'a> {
    world: Transform,
    splines: &'a [Spline],
    evaluated: Vec<Vec3>,
}

impl CurveGeometry for CurveInstance<'_> {
    fn world_matrix(&self) -> Transform {
        self.world
    }

    fn splines(&self) -> &[Spline] {
        self.splines
    }

    fn evaluated_points(&self) -> &[Vec3] {
        &self.evaluated
    }
}

/// Mesh data as stored on the objects, before modifiers.
#[derive(Debug, Default)]
pub struct RawGeometry<'a> {
    meshes: BTreeMap<ObjectId, MeshInstance<'a>>,
}

impl GeometryProvider for RawGeometry<'_> {
    fn mesh(&self, object: ObjectId) -> Option<&dyn MeshGeometry> {
        self.meshes
            .get(&object)
            .map(|mesh| mesh as &dyn MeshGeometry)
    }
}

#[derive(Debug)]
struct EvaluatedMesh<'a> {
    instance: MeshInstance<'a>,
    bvh: TriangleBvh,
}

/// Post-modifier meshes, with the acceleration structure the raycaster uses.
#[derive(Debug, Default)]
pub struct EvaluatedGeometry<'a> {
    meshes: BTreeMap<ObjectId, EvaluatedMesh<'a>>,
}

impl GeometryProvider for EvaluatedGeometry<'_> {
    fn mesh(&self, object: ObjectId) -> Option<&dyn MeshGeometry> {
        self.meshes
            .get(&object)
            .map(|mesh| &mesh.instance as &dyn MeshGeometry)
    }
}

/// Everything one snap query reads, frozen at construction. Hidden objects
/// are left out entirely, so they neither snap nor occlude.
#[derive(Debug)]
pub struct SceneSnapshot<'a> {
    view: &'a View,
    raw: RawGeometry<'a>,
    evaluated: EvaluatedGeometry<'a>,
    curves: Vec<CurveInstance<'a>>,
    editing: BTreeSet<ObjectId>,
}

impl<'a> SceneSnapshot<'a> {
    pub fn evaluate(scene: &'a Scene) -> Self {
        let mut raw = RawGeometry::default();
        let mut evaluated = EvaluatedGeometry::default();
        let mut curves = Vec::new();
        let mut editing = BTreeSet::new();

        for (idx, object) in scene.objects.iter().enumerate() {
            if !object.visible {
                continue;
            }
            if let Err(err) = object.validate() {
                warn!(object = %object.name, error = %err, "skipping invalid object");
                continue;
            }
            let id = ObjectId(idx);
            let world = object.transform.matrix();
            if object.is_editing() {
                editing.insert(id);
            }

            match &object.data {
                ObjectData::Mesh(mesh) => {
                    let data = if object.modifiers.is_empty() {
                        Cow::Borrowed(mesh)
                    } else {
                        Cow::Owned(apply_stack(mesh, &object.modifiers))
                    };
                    let positions = data
                        .vertices
                        .iter()
                        .map(|&v| world.transform_point(v))
                        .collect();
                    let bvh = TriangleBvh::build(positions, data.triangles());
                    evaluated.meshes.insert(
                        id,
                        EvaluatedMesh {
                            instance: MeshInstance { world, data },
                            bvh,
                        },
                    );
                    raw.meshes.insert(
                        id,
                        MeshInstance {
                            world,
                            data: Cow::Borrowed(mesh),
                        },
                    );
                }
                ObjectData::Curve(curve) => curves.push(CurveInstance {
                    world,
                    splines: &curve.splines,
                    evaluated: curve.evaluate(),
                }),
            }
        }

        debug!(
            meshes = raw.meshes.len(),
            curves = curves.len(),
            editing = editing.len(),
            "scene snapshot evaluated"
        );

        Self {
            view: &scene.view,
            raw,
            evaluated,
            curves,
            editing,
        }
    }

    pub fn snapper<'s>(&'s self, config: &'s SnapConfig) -> Snapper<'s> {
        Snapper::new(self, self.view, self, config)
    }
}

impl SnapScene for SceneSnapshot<'_> {
    fn visible_meshes(&self) -> Vec<&dyn MeshGeometry> {
        self.raw
            .meshes
            .values()
            .map(|mesh| mesh as &dyn MeshGeometry)
            .collect()
    }

    fn visible_curves(&self) -> Vec<&dyn CurveGeometry> {
        self.curves
            .iter()
            .map(|curve| curve as &dyn CurveGeometry)
            .collect()
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

impl Raycaster for SceneSnapshot<'_> {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        let dir = direction.normalized();
        let mut best: Option<(f64, RayHit)> = None;
        for (&object, mesh) in &self.evaluated.meshes {
            let Some(hit) = mesh.bvh.ray_pick(origin, dir) else {
                continue;
            };
            if best.is_none_or(|(best_t, _)| hit.t < best_t) {
                best = Some((
                    hit.t,
                    RayHit {
                        position: hit.point,
                        face_index: hit.polygon,
                        object,
                    },
                ));
            }
        }
        best.map(|(_, hit)| hit)
    }
}
