use cursorsnap_base::Vec3;
use serde::{Deserialize, Serialize};

use crate::mesh::MeshData;
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Non-destructive mesh operations. They only affect evaluated geometry;
/// the vertex tier and edit mode keep reading the raw mesh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Modifier {
    /// Appends a copy reflected across the local plane normal to `axis`.
    Mirror { axis: Axis },
    /// `count` copies in total, each shifted by `offset` from the previous.
    Array { count: usize, offset: Vec3 },
}

impl Modifier {
    pub fn validate(&self) -> Result<()> {
        match self {
            Modifier::Array { count: 0, .. } => Err(Error::InvalidModifier(
                "array count must be >= 1".to_string(),
            )),
            _ => Ok(()),
        }
    }

    pub fn apply(&self, mesh: &MeshData) -> MeshData {
        match *self {
            Modifier::Mirror { axis } => mirror(mesh, axis),
            Modifier::Array { count, offset } => array(mesh, count, offset),
        }
    }
}

pub fn apply_stack(mesh: &MeshData, modifiers: &[Modifier]) -> MeshData {
    modifiers
        .iter()
        .fold(mesh.clone(), |acc, modifier| modifier.apply(&acc))
}

fn mirror(mesh: &MeshData, axis: Axis) -> MeshData {
    let base = mesh.vertices.len();
    let mut out = mesh.clone();
    out.vertices.extend(mesh.vertices.iter().map(|v| {
        let mut c: [f64; 3] = (*v).into();
        c[axis.index()] = -c[axis.index()];
        Vec3::from(c)
    }));
    // Reflection flips handedness; reverse loops to keep winding outward.
    out.polygons.extend(
        mesh.polygons
            .iter()
            .map(|poly| poly.iter().rev().map(|&v| v + base).collect()),
    );
    out
}

fn array(mesh: &MeshData, count: usize, offset: Vec3) -> MeshData {
    let stride = mesh.vertices.len();
    let mut out = MeshData::default();
    for copy in 0..count {
        let shift = offset * copy as f64;
        out.vertices
            .extend(mesh.vertices.iter().map(|&v| v + shift));
        out.polygons.extend(
            mesh.polygons
                .iter()
                .map(|poly| poly.iter().map(|&v| v + copy * stride).collect()),
        );
    }
    out
}
