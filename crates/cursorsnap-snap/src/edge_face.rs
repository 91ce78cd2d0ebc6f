use cursorsnap_base::{Point2, Vec3};

use crate::services::geometry_for;
use crate::snapper::Snapper;

impl Snapper<'_> {
    /// Snaps to a midpoint of the face under the cursor, or to its centroid.
    ///
    /// Edges are scored by a few interior samples so a partially hidden edge
    /// still qualifies, but the returned point is always the edge midpoint.
    /// A face index the selected geometry does not have passes the raw hit
    /// position through.
    pub fn resolve_edge_or_face(&self, mouse: Point2) -> Option<Vec3> {
        let ray = self.projector.unproject(mouse);
        let hit = self.raycaster.raycast(ray.origin, ray.direction)?;
        let mesh = geometry_for(self.scene, hit.object).mesh(hit.object)?;

        let Some(face) = mesh.polygon(hit.face_index) else {
            return Some(hit.position);
        };
        let vertices = mesh.vertices();
        let Some(local) = face
            .iter()
            .map(|&idx| vertices.get(idx).copied())
            .collect::<Option<Vec<Vec3>>>()
        else {
            return Some(hit.position);
        };
        let world = mesh.world_matrix();
        let corners: Vec<Vec3> = local.iter().map(|&p| world.transform_point(p)).collect();

        let oracle = self.visibility();
        let mut best: Option<(Vec3, f32)> = None;
        for (idx, &start) in corners.iter().enumerate() {
            let end = corners[(idx + 1) % corners.len()];
            let midpoint = (start + end) * 0.5;

            for &factor in &self.config.edge_sample_factors {
                let sample = start.lerp(end, factor);
                let Some(screen) = self.projector.project(sample) else {
                    continue;
                };
                let distance = screen.distance(mouse);
                if best.is_some_and(|(_, best_distance)| distance >= best_distance) {
                    continue;
                }
                if oracle.is_visible(sample) {
                    best = Some((midpoint, distance));
                }
            }
        }

        if let Some((midpoint, distance)) = best {
            if distance <= self.config.edge_radius {
                return Some(midpoint);
            }
        }

        let center = world.transform_point(Vec3::mean(local)?);
        let screen = self.projector.project(center)?;
        (screen.distance(mouse) <= self.config.face_radius).then_some(center)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SnapConfig;
    use crate::fixtures::{FakeMesh, FakeScene, Slab, TopDownProjector};
    use crate::services::ObjectId;
    use crate::snapper::Snapper;
    use cursorsnap_base::{Vec3, pos2};

    fn square_scene(half: f64) -> FakeScene {
        FakeScene::with_meshes(vec![FakeMesh::square(half, 0.0)])
    }

    #[test]
    fn edge_sample_in_radius_snaps_to_midpoint() {
        let scene = square_scene(1.0);
        let raycaster = scene.slabs();
        let projector = TopDownProjector::default();
        let config = SnapConfig::default();
        let snapper = Snapper::new(&scene, &projector, &raycaster, &config);

        // Top edge midpoint (0, 1, 0) projects to (400, 200).
        assert_eq!(
            snapper.resolve_edge_or_face(pos2(400.0, 215.0)),
            Some(Vec3::new(0.0, 1.0, 0.0))
        );
    }

    #[test]
    fn off_center_sample_still_returns_midpoint() {
        let scene = square_scene(1.0);
        let raycaster = scene.slabs();
        let projector = TopDownProjector::default();
        let config = SnapConfig::default();
        let snapper = Snapper::new(&scene, &projector, &raycaster, &config);

        // Nearest sample is (0.5, 1, 0) at (450, 200); the midpoint is 52 px away.
        assert_eq!(
            snapper.resolve_edge_or_face(pos2(452.0, 210.0)),
            Some(Vec3::new(0.0, 1.0, 0.0))
        );
    }

    #[test]
    fn centroid_when_edges_are_far() {
        let scene = square_scene(1.0);
        let raycaster = scene.slabs();
        let projector = TopDownProjector::default();
        let config = SnapConfig::default();
        let snapper = Snapper::new(&scene, &projector, &raycaster, &config);

        assert_eq!(
            snapper.resolve_edge_or_face(pos2(405.0, 310.0)),
            Some(Vec3::new(0.0, 0.0, 0.0))
        );
        // Over the face, but neither an edge nor the centroid is close.
        assert_eq!(snapper.resolve_edge_or_face(pos2(340.0, 250.0)), None);
    }

    #[test]
    fn qualifying_edge_beats_a_closer_centroid() {
        let scene = square_scene(0.15);
        let raycaster = scene.slabs();
        let projector = TopDownProjector::default();
        let config = SnapConfig::default();
        let snapper = Snapper::new(&scene, &projector, &raycaster, &config);

        // Centroid is under the cursor; edge samples are 15 px away.
        let snapped = snapper.resolve_edge_or_face(pos2(400.0, 300.0));
        assert!(snapped.is_some_and(|p| p != Vec3::ZERO), "{snapped:?}");
        let p = snapped.unwrap_or(Vec3::ZERO);
        assert!((p.x.abs() - 0.15).abs() < 1.0e-12 || (p.y.abs() - 0.15).abs() < 1.0e-12);
    }

    #[test]
    fn occluded_edge_samples_are_ignored() {
        let scene = square_scene(1.0);
        let mut raycaster = scene.slabs();
        // A thin bar above the face: the cursor ray passes beside it, but every
        // sight line from the eye to the top edge crosses it.
        raycaster.slabs.push(Slab {
            z: 5.0,
            min: (-2.0, 0.45),
            max: (2.0, 0.55),
            object: ObjectId(7),
            face_index: 0,
        });
        let projector = TopDownProjector::default();
        let config = SnapConfig::default();
        let snapper = Snapper::new(&scene, &projector, &raycaster, &config);

        assert!(!snapper.is_visible(Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(snapper.resolve_edge_or_face(pos2(400.0, 215.0)), None);
    }

    #[test]
    fn missing_face_passes_hit_through() {
        let mut scene = square_scene(1.0);
        scene.raw.0[0].polygons.clear();
        scene.editing.push(ObjectId(0));
        let raycaster = scene.slabs();
        let projector = TopDownProjector::default();
        let config = SnapConfig::default();
        let snapper = Snapper::new(&scene, &projector, &raycaster, &config);

        let snapped = snapper.resolve_edge_or_face(pos2(450.0, 250.0));
        assert_eq!(snapped, Some(Vec3::new(0.5, 0.5, 0.0)));
    }

    #[test]
    fn dangling_vertex_index_passes_hit_through() {
        let mut scene = square_scene(1.0);
        scene.raw.0[0].polygons = vec![vec![0, 1, 2, 9]];
        scene.editing.push(ObjectId(0));
        let raycaster = scene.slabs();
        let projector = TopDownProjector::default();
        let config = SnapConfig::default();
        let snapper = Snapper::new(&scene, &projector, &raycaster, &config);

        // Right on the centroid; a valid loop would snap to (0, 0, 0).
        let snapped = snapper.resolve_edge_or_face(pos2(400.0, 300.0));
        assert_eq!(snapped, Some(Vec3::ZERO));
        let snapped = snapper.resolve_edge_or_face(pos2(470.0, 240.0));
        assert_eq!(snapped, Some(Vec3::new(0.7, 0.6, 0.0)));
    }

    #[test]
    fn miss_returns_none() {
        let scene = square_scene(1.0);
        let raycaster = scene.slabs();
        let projector = TopDownProjector::default();
        let config = SnapConfig::default();
        let snapper = Snapper::new(&scene, &projector, &raycaster, &config);

        assert_eq!(snapper.resolve_edge_or_face(pos2(10.0, 10.0)), None);
    }
}
