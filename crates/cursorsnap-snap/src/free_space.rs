use cursorsnap_base::{Point2, Vec3};

use crate::snapper::Snapper;

impl Snapper<'_> {
    /// Surface under the cursor, or a fixed distance along the view ray.
    pub fn free_space_point(&self, mouse: Point2) -> Vec3 {
        let ray = self.projector.unproject(mouse);
        match self.raycaster.raycast(ray.origin, ray.direction) {
            Some(hit) => hit.position,
            None => ray.at(self.config.free_space_distance),
        }
    }
}
