//! Host-side scene for the snapping core: objects, modifiers, a camera
//! view, and the per-query evaluated snapshot that answers raycasts.

use thiserror::Error;

pub mod bvh;
pub mod curve;
pub mod demo;
pub mod mesh;
pub mod modifier;
pub mod object;
pub mod scene;
pub mod snapshot;
pub mod view;

pub use curve::{CurveData, DEFAULT_CURVE_RESOLUTION};
pub use demo::demo_scene;
pub use mesh::MeshData;
pub use modifier::{Axis, Modifier};
pub use object::{ObjectData, ObjectMode, ObjectTransform, SceneObject};
pub use scene::Scene;
pub use snapshot::{EvaluatedGeometry, RawGeometry, SceneSnapshot};
pub use view::{Projection, View};

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
    #[error("invalid curve: {0}")]
    InvalidCurve(String),
    #[error("invalid modifier: {0}")]
    InvalidModifier(String),
    #[error(transparent)]
    Base(#[from] cursorsnap_base::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
