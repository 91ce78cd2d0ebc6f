use cursorsnap_base::{Point2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::SnapConfig;
use crate::services::{Projector, Raycaster, SnapScene};
use crate::visibility::VisibilityOracle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapKind {
    Vertex,
    EdgeOrFace,
    Curve,
    FreeSpace,
}

/// Which resolver(s) a query runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SnapTier {
    #[default]
    All,
    Vertex,
    EdgeOrFace,
    Curve,
    FreeSpace,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapHit {
    pub kind: SnapKind,
    pub position: Vec3,
}

/// One snapping query context over a consistent scene snapshot.
///
/// Every operation is read-only; build a new `Snapper` per pointer sample if
/// the scene or view changes in between.
#[derive(Clone, Copy)]
pub struct Snapper<'a> {
    pub(crate) scene: &'a dyn SnapScene,
    pub(crate) projector: &'a dyn Projector,
    pub(crate) raycaster: &'a dyn Raycaster,
    pub(crate) config: &'a SnapConfig,
}

impl<'a> Snapper<'a> {
    pub fn new(
        scene: &'a dyn SnapScene,
        projector: &'a dyn Projector,
        raycaster: &'a dyn Raycaster,
        config: &'a SnapConfig,
    ) -> Self {
        Self {
            scene,
            projector,
            raycaster,
            config,
        }
    }

    pub fn visibility(&self) -> VisibilityOracle<'a> {
        VisibilityOracle::new(self.raycaster, self.projector.view_origin(), self.config)
    }

    pub fn is_visible(&self, point: Vec3) -> bool {
        self.visibility().is_visible(point)
    }

    /// Vertex, then edge/face, then curve, then free space. Never fails.
    pub fn resolve_snap(&self, mouse: Point2) -> Vec3 {
        self.resolve(mouse).position
    }

    pub fn resolve(&self, mouse: Point2) -> SnapHit {
        let hit = self.snap_feature(mouse).unwrap_or_else(|| SnapHit {
            kind: SnapKind::FreeSpace,
            position: self.free_space_point(mouse),
        });
        debug!(kind = ?hit.kind, position = ?hit.position, "snap resolved");
        hit
    }

    pub fn resolve_tier(&self, mouse: Point2, tier: SnapTier) -> Option<SnapHit> {
        let (kind, position) = match tier {
            SnapTier::All => return Some(self.resolve(mouse)),
            SnapTier::Vertex => (SnapKind::Vertex, self.find_nearest_vertex(mouse)?),
            SnapTier::EdgeOrFace => (SnapKind::EdgeOrFace, self.resolve_edge_or_face(mouse)?),
            SnapTier::Curve => (SnapKind::Curve, self.find_nearest_curve_point(mouse)?),
            SnapTier::FreeSpace => (SnapKind::FreeSpace, self.free_space_point(mouse)),
        };
        Some(SnapHit { kind, position })
    }

    fn snap_feature(&self, mouse: Point2) -> Option<SnapHit> {
        if let Some(position) = self.find_nearest_vertex(mouse) {
            return Some(SnapHit {
                kind: SnapKind::Vertex,
                position,
            });
        }
        trace!("no vertex in range");

        if let Some(position) = self.resolve_edge_or_face(mouse) {
            return Some(SnapHit {
                kind: SnapKind::EdgeOrFace,
                position,
            });
        }
        trace!("no edge or face in range");

        if let Some(position) = self.find_nearest_curve_point(mouse) {
            return Some(SnapHit {
                kind: SnapKind::Curve,
                position,
            });
        }
        trace!("no curve point in range");
        None
    }
}
