use cursorsnap_base::{BezierPoint, Spline, Vec3};

use crate::curve::CurveData;
use crate::mesh::MeshData;
use crate::modifier::{Axis, Modifier};
use crate::object::{ObjectTransform, SceneObject};
use crate::scene::Scene;
use crate::view::View;

/// A cube, a mirrored floor tile and a Bezier guide under a perspective camera.
pub fn demo_scene() -> Scene {
    let view = View::perspective(
        1280.0,
        720.0,
        Vec3::new(6.0, -8.0, 5.0),
        Vec3::ZERO,
        50.0,
    );
    let mut scene = Scene::new(view);

    scene.add_object(SceneObject::mesh("Cube", MeshData::cube(2.0)));
    scene.add_object(
        SceneObject::mesh("Tile", MeshData::plane(2.0))
            .with_transform(ObjectTransform::at(Vec3::new(0.0, 0.0, -1.0)))
            .with_modifier(Modifier::Array {
                count: 2,
                offset: Vec3::new(2.0, 0.0, 0.0),
            })
            .with_modifier(Modifier::Mirror { axis: Axis::X }),
    );
    scene.add_object(
        SceneObject::curve(
            "Guide",
            CurveData::new(vec![Spline::Bezier(vec![
                BezierPoint::new(
                    Vec3::new(-3.0, 2.0, 0.0),
                    Vec3::new(-4.0, 2.0, 0.0),
                    Vec3::new(-2.0, 3.0, 0.0),
                ),
                BezierPoint::new(
                    Vec3::new(0.0, 3.0, 1.0),
                    Vec3::new(-1.0, 3.0, 1.0),
                    Vec3::new(1.0, 3.0, 1.0),
                ),
            ])]),
        ),
    );
    scene
}
