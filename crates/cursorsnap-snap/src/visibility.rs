use cursorsnap_base::Vec3;

use crate::config::SnapConfig;
use crate::services::Raycaster;

/// Answers "can the viewer see this point" with a single raycast, plus one
/// retry from slightly in front of the eye when the first hit is inconclusive.
///
/// The same test serves mesh vertices and arbitrary edge samples.
pub struct VisibilityOracle<'a> {
    raycaster: &'a dyn Raycaster,
    origin: Vec3,
    occlusion_epsilon: f64,
    coincidence_epsilon: f64,
    retry_offset: f64,
}

impl<'a> VisibilityOracle<'a> {
    pub fn new(raycaster: &'a dyn Raycaster, origin: Vec3, config: &SnapConfig) -> Self {
        Self {
            raycaster,
            origin,
            occlusion_epsilon: config.occlusion_epsilon,
            coincidence_epsilon: config.coincidence_epsilon,
            retry_offset: config.retry_offset,
        }
    }

    pub fn is_visible(&self, point: Vec3) -> bool {
        let offset = point - self.origin;
        let target_distance = offset.length();
        if target_distance == 0.0 {
            return true;
        }
        let direction = offset / target_distance;

        let Some(hit) = self.raycaster.raycast(self.origin, direction) else {
            return true;
        };
        let hit_distance = hit.position.distance(self.origin);
        if hit_distance < target_distance - self.occlusion_epsilon {
            return false;
        }
        if (hit_distance - target_distance).abs() <= self.coincidence_epsilon {
            return true;
        }

        // Grazing hit past the target: step off the first surface and look again.
        let retry_origin = self.origin + direction * self.retry_offset;
        match self.raycaster.raycast(retry_origin, direction) {
            Some(hit) => {
                let hit_distance = hit.position.distance(retry_origin);
                let target_distance = point.distance(retry_origin);
                hit_distance >= target_distance - self.occlusion_epsilon
            }
            None => true,
        }
    }
}
