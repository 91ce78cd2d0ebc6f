use std::cmp::Ordering;

use cursorsnap_base::Vec3;

const BVH_LEAF_SIZE: usize = 8;
const RAY_EPSILON: f64 = 1.0e-9;

/// World-space triangle soup with a bounding volume hierarchy, answering
/// nearest-hit queries. Each triangle remembers the polygon it came from.
#[derive(Clone, Debug, Default)]
pub struct TriangleBvh {
    positions: Vec<Vec3>,
    triangles: Vec<[usize; 3]>,
    polygons: Vec<usize>,
    nodes: Vec<BvhNode>,
    indices: Vec<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BvhHit {
    pub t: f64,
    pub point: Vec3,
    pub polygon: usize,
}

#[derive(Clone, Copy, Debug)]
struct BvhNode {
    bounds: (Vec3, Vec3),
    left: Option<usize>,
    right: Option<usize>,
    start: usize,
    count: usize,
}

impl TriangleBvh {
    /// Triangles referencing a vertex outside `positions` are dropped.
    pub fn build(
        positions: Vec<Vec3>,
        triangles: impl IntoIterator<Item = ([usize; 3], usize)>,
    ) -> Self {
        let (triangles, polygons): (Vec<[usize; 3]>, Vec<usize>) = triangles
            .into_iter()
            .filter(|(tri, _)| tri.iter().all(|&v| v < positions.len()))
            .unzip();
        let (nodes, indices) = build_nodes(&positions, &triangles);
        Self {
            positions,
            triangles,
            polygons,
            nodes,
            indices,
        }
    }

    pub fn ray_pick(&self, origin: Vec3, dir: Vec3) -> Option<BvhHit> {
        if self.nodes.is_empty() {
            return None;
        }

        let mut best: Option<BvhHit> = None;
        let mut stack = vec![0usize];

        while let Some(node_idx) = stack.pop() {
            let best_t = best.map_or(f64::INFINITY, |hit| hit.t);
            let node = &self.nodes[node_idx];
            if ray_aabb_interval(origin, dir, node.bounds, best_t).is_none() {
                continue;
            }

            if node.count > 0 {
                for &tri_idx in &self.indices[node.start..node.start + node.count] {
                    let [a, b, c] = self.triangles[tri_idx];
                    let Some(t) = ray_intersect_triangle(
                        origin,
                        dir,
                        self.positions[a],
                        self.positions[b],
                        self.positions[c],
                    ) else {
                        continue;
                    };
                    if best.is_none_or(|hit| t < hit.t) {
                        best = Some(BvhHit {
                            t,
                            point: origin + dir * t,
                            polygon: self.polygons[tri_idx],
                        });
                    }
                }
                continue;
            }

            let best_t = best.map_or(f64::INFINITY, |hit| hit.t);
            let child_hit = |idx: usize| {
                ray_aabb_interval(origin, dir, self.nodes[idx].bounds, best_t)
                    .map(|(tmin, _)| (idx, tmin))
            };
            match (node.left.and_then(&child_hit), node.right.and_then(&child_hit)) {
                (Some((left_idx, left_t)), Some((right_idx, right_t))) => {
                    if left_t <= right_t {
                        stack.push(right_idx);
                        stack.push(left_idx);
                    } else {
                        stack.push(left_idx);
                        stack.push(right_idx);
                    }
                }
                (Some((left_idx, _)), None) => stack.push(left_idx),
                (None, Some((right_idx, _))) => stack.push(right_idx),
                (None, None) => {}
            }
        }

        best
    }
}

/// Two-sided Moller-Trumbore test; returns the ray parameter of the hit.
pub fn ray_intersect_triangle(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f64> {
    let edge1 = b - a;
    let edge2 = c - a;
    let pvec = dir.cross(edge2);
    let det = edge1.dot(pvec);
    if det.abs() < RAY_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let tvec = origin - a;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let qvec = tvec.cross(edge1);
    let v = dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = edge2.dot(qvec) * inv_det;
    (t > RAY_EPSILON).then_some(t)
}

fn build_nodes(positions: &[Vec3], triangles: &[[usize; 3]]) -> (Vec<BvhNode>, Vec<usize>) {
    if triangles.is_empty() || positions.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let mut tri_bounds = Vec::with_capacity(triangles.len());
    let mut centroids = Vec::with_capacity(triangles.len());
    for &[a, b, c] in triangles {
        let (p0, p1, p2) = (positions[a], positions[b], positions[c]);
        tri_bounds.push((p0.min(p1).min(p2), p0.max(p1).max(p2)));
        centroids.push((p0 + p1 + p2) * (1.0 / 3.0));
    }

    let mut indices: Vec<usize> = (0..triangles.len()).collect();
    let mut nodes = Vec::new();
    let mut out_indices = Vec::with_capacity(triangles.len());
    build_node(&mut indices, &tri_bounds, &centroids, &mut nodes, &mut out_indices);
    (nodes, out_indices)
}

fn build_node(
    indices: &mut [usize],
    tri_bounds: &[(Vec3, Vec3)],
    centroids: &[Vec3],
    nodes: &mut Vec<BvhNode>,
    out_indices: &mut Vec<usize>,
) -> usize {
    let node_index = nodes.len();
    nodes.push(BvhNode {
        bounds: bounds_of(indices.iter().map(|&idx| tri_bounds[idx])),
        left: None,
        right: None,
        start: 0,
        count: 0,
    });

    if indices.len() <= BVH_LEAF_SIZE {
        nodes[node_index].start = out_indices.len();
        nodes[node_index].count = indices.len();
        out_indices.extend_from_slice(indices);
        return node_index;
    }

    let (cmin, cmax) = bounds_of(indices.iter().map(|&idx| (centroids[idx], centroids[idx])));
    let extent = cmax - cmin;
    let axis = if extent.x >= extent.y && extent.x >= extent.z {
        0
    } else if extent.y >= extent.z {
        1
    } else {
        2
    };
    indices.sort_unstable_by(|a, b| {
        centroids[*a]
            .axis(axis)
            .partial_cmp(&centroids[*b].axis(axis))
            .unwrap_or(Ordering::Equal)
    });
    let mid = indices.len() / 2;
    let (left, right) = indices.split_at_mut(mid);
    let left_idx = build_node(left, tri_bounds, centroids, nodes, out_indices);
    let right_idx = build_node(right, tri_bounds, centroids, nodes, out_indices);
    nodes[node_index].left = Some(left_idx);
    nodes[node_index].right = Some(right_idx);
    node_index
}

fn bounds_of(mut boxes: impl Iterator<Item = (Vec3, Vec3)>) -> (Vec3, Vec3) {
    let Some(first) = boxes.next() else {
        return (Vec3::ZERO, Vec3::ZERO);
    };
    boxes.fold(first, |(min, max), (bmin, bmax)| (min.min(bmin), max.max(bmax)))
}

fn ray_aabb_interval(
    origin: Vec3,
    dir: Vec3,
    bounds: (Vec3, Vec3),
    max_t: f64,
) -> Option<(f64, f64)> {
    let (min, max) = bounds;
    let mut tmin: f64 = 0.0;
    let mut tmax: f64 = max_t;

    for axis in 0..3 {
        let (o, d) = (origin.axis(axis), dir.axis(axis));
        let (lo, hi) = (min.axis(axis), max.axis(axis));
        if d.abs() <= 1.0e-9 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let t1 = (lo - o) * inv;
        let t2 = (hi - o) * inv;
        tmin = tmin.max(t1.min(t2));
        tmax = tmax.min(t1.max(t2));
        if tmax < tmin {
            return None;
        }
    }
    Some((tmin, tmax))
}
