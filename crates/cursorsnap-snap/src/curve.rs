use cursorsnap_base::{Point2, Spline, Vec3};

use crate::config::CurveMatch;
use crate::services::CurveGeometry;
use crate::snapper::Snapper;

/// World-space snap candidates of one curve object, in collection order:
/// per spline the Bezier anchor and both handles (or the raw control
/// points), followed by the evaluated samples.
pub fn collect_curve_points(curve: &dyn CurveGeometry) -> Vec<Vec3> {
    let world = curve.world_matrix();
    let mut points = Vec::new();

    for spline in curve.splines() {
        match spline {
            Spline::Bezier(bezier) => {
                for p in bezier {
                    points.push(world.transform_point(p.co));
                    points.push(world.transform_point(p.handle_left));
                    points.push(world.transform_point(p.handle_right));
                }
            }
            Spline::Poly(control) => {
                points.extend(control.iter().map(|&p| world.transform_point(p)));
            }
        }
    }
    points.extend(
        curve
            .evaluated_points()
            .iter()
            .map(|&p| world.transform_point(p)),
    );
    points
}

impl Snapper<'_> {
    /// Curve points are construction aids and skip the occlusion test.
    pub fn find_nearest_curve_point(&self, mouse: Point2) -> Option<Vec3> {
        let radius = self.config.vertex_radius;
        let mut best: Option<(Vec3, f32)> = None;

        for curve in self.scene.visible_curves() {
            for point in collect_curve_points(curve) {
                let Some(screen) = self.projector.project(point) else {
                    continue;
                };
                let distance = screen.distance(mouse);
                if distance > radius {
                    continue;
                }
                match self.config.curve_match {
                    CurveMatch::First => return Some(point),
                    CurveMatch::Nearest => {
                        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                            best = Some((point, distance));
                        }
                    }
                }
            }
        }

        best.map(|(point, _)| point)
    }
}
