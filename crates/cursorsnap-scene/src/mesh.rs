use cursorsnap_base::Vec3;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Polygon mesh in local space. Each polygon lists vertex indices in loop
/// order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub polygons: Vec<Vec<usize>>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vec3>, polygons: Vec<Vec<usize>>) -> Self {
        Self { vertices, polygons }
    }

    /// Axis-aligned cube centred on the origin, outward winding.
    pub fn cube(size: f64) -> Self {
        let h = size * 0.5;
        let vertices = vec![
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];
        let polygons = vec![
            vec![0, 3, 2, 1],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![1, 2, 6, 5],
            vec![2, 3, 7, 6],
            vec![3, 0, 4, 7],
        ];
        Self { vertices, polygons }
    }

    /// Single quad in the XY plane, facing +Z.
    pub fn plane(size: f64) -> Self {
        let h = size * 0.5;
        let vertices = vec![
            Vec3::new(-h, -h, 0.0),
            Vec3::new(h, -h, 0.0),
            Vec3::new(h, h, 0.0),
            Vec3::new(-h, h, 0.0),
        ];
        Self {
            vertices,
            polygons: vec![vec![0, 1, 2, 3]],
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (idx, polygon) in self.polygons.iter().enumerate() {
            if polygon.len() < 3 {
                return Err(Error::InvalidMesh(format!(
                    "polygon {idx} has {} corners, expected at least 3",
                    polygon.len()
                )));
            }
            if let Some(&bad) = polygon.iter().find(|&&v| v >= self.vertices.len()) {
                return Err(Error::InvalidMesh(format!(
                    "polygon {idx} references vertex {bad}, mesh has {}",
                    self.vertices.len()
                )));
            }
        }
        Ok(())
    }

    /// Fan triangulation; each triangle carries its source polygon index.
    pub fn triangles(&self) -> impl Iterator<Item = ([usize; 3], usize)> + '_ {
        self.polygons
            .iter()
            .enumerate()
            .flat_map(|(poly_idx, polygon)| {
                (1..polygon.len().saturating_sub(1))
                    .map(move |i| ([polygon[0], polygon[i], polygon[i + 1]], poly_idx))
            })
    }
}
