//! Occlusion-aware feature snapping for placing a 3D cursor from a 2D
//! pointer position.
//!
//! The host provides projection, raycasting and scene geometry through the
//! traits in [`services`]; [`Snapper`] runs the vertex, edge/face, curve and
//! free-space tiers in priority order against one consistent snapshot.

pub mod config;
pub mod curve;
pub mod edge_face;
pub mod free_space;
pub mod services;
pub mod snapper;
pub mod vertex;
pub mod visibility;

#[cfg(test)]
mod fixtures;

pub use config::{CurveMatch, SnapConfig};
pub use curve::collect_curve_points;
pub use services::{
    CurveGeometry, GeometryProvider, MeshGeometry, ObjectId, Projector, Ray, RayHit, Raycaster,
    SnapScene, geometry_for,
};
pub use snapper::{SnapHit, SnapKind, SnapTier, Snapper};
pub use visibility::VisibilityOracle;
