use cursorsnap_base::{Point2, Vec3};

use crate::snapper::Snapper;

impl Snapper<'_> {
    /// Screen-nearest visible vertex strictly inside the vertex radius.
    ///
    /// Reads un-evaluated mesh data so the snap targets match the topology
    /// the user edits, not modifier output.
    ///
    /// Visibility is only tested for vertices that would beat the current best.
    pub fn find_nearest_vertex(&self, mouse: Point2) -> Option<Vec3> {
        let oracle = self.visibility();
        let radius = self.config.vertex_radius;
        let mut best: Option<(Vec3, f32)> = None;

        for mesh in self.scene.visible_meshes() {
            let world = mesh.world_matrix();
            for &local in mesh.vertices() {
                let point = world.transform_point(local);
                let Some(screen) = self.projector.project(point) else {
                    continue;
                };
                let distance = screen.distance(mouse);
                if distance >= radius {
                    continue;
                }
                if best.is_some_and(|(_, best_distance)| distance >= best_distance) {
                    continue;
                }
                if oracle.is_visible(point) {
                    best = Some((point, distance));
                }
            }
        }

        best.map(|(point, _)| point)
    }
}
