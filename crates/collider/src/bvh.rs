//! Bounding-volume hierarchy over a triangle soup.
//!
//! Binned surface-area-heuristic build, leaf size 4. The tree stores
//! indices into the caller's triangle slice; triangles themselves are not
//! copied. Traversal pushes onto a caller-owned stack so a hot query loop
//! never allocates.

use crate::ray::{intersect_triangle, Ray};
use glam::Vec3;
use mesh::{Aabb, Triangle};

const MAX_LEAF_TRIANGLES: usize = 4;
const SAH_BINS: usize = 12;

#[derive(Debug, Clone, Copy)]
struct Node {
    aabb: Aabb,
    /// Left child index for internal nodes, first entry in
    /// `triangle_order` for leaves.
    left_or_start: u32,
    /// Right child index for internal nodes, triangle count for leaves.
    right_or_count: u32,
    is_leaf: bool,
}

#[derive(Debug)]
pub struct Bvh {
    nodes: Vec<Node>,
    triangle_order: Vec<u32>,
}

impl Bvh {
    #[must_use]
    pub fn build(triangles: &[Triangle]) -> Self {
        if triangles.is_empty() {
            return Self {
                nodes: vec![Node {
                    aabb: Aabb::EMPTY,
                    left_or_start: 0,
                    right_or_count: 0,
                    is_leaf: true,
                }],
                triangle_order: Vec::new(),
            };
        }

        let centroids: Vec<Vec3> = triangles.iter().map(Triangle::centroid).collect();
        let tri_aabbs: Vec<Aabb> = triangles.iter().map(Triangle::aabb).collect();
        let mut order: Vec<u32> = (0..u32::try_from(triangles.len()).expect("mesh too large")).collect();

        let mut nodes = Vec::new();
        let end = order.len();
        build_recursive(&mut nodes, &mut order, &centroids, &tri_aabbs, 0, end);

        Self {
            nodes,
            triangle_order: order,
        }
    }

    /// Root bound of the indexed triangles.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        self.nodes[0].aabb
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Append the distance of every triangle hit along `ray` to `hits`,
    /// in traversal order (unsorted). `stack` is scratch; both are cleared
    /// by the caller's policy, not here.
    pub fn collect_hits(
        &self,
        triangles: &[Triangle],
        ray: &Ray,
        stack: &mut Vec<u32>,
        hits: &mut Vec<f32>,
    ) {
        if self.triangle_order.is_empty() {
            return;
        }
        let inv_dir = ray.dir.recip();
        stack.push(0);
        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx as usize];
            if !slab_hit(&node.aabb, ray.origin, inv_dir) {
                continue;
            }
            if node.is_leaf {
                let start = node.left_or_start as usize;
                let count = node.right_or_count as usize;
                for &tri_idx in &self.triangle_order[start..start + count] {
                    if let Some(t) = intersect_triangle(ray, &triangles[tri_idx as usize]) {
                        hits.push(t);
                    }
                }
            } else {
                stack.push(node.left_or_start);
                stack.push(node.right_or_count);
            }
        }
    }
}

/// Slab test against an AABB for a ray with precomputed reciprocal
/// direction. Zero direction components produce infinities that fall out
/// of the min/max folding.
fn slab_hit(aabb: &Aabb, origin: Vec3, inv_dir: Vec3) -> bool {
    let t1 = (aabb.min - origin) * inv_dir;
    let t2 = (aabb.max - origin) * inv_dir;
    let t_near = t1.min(t2).max_element();
    let t_far = t1.max(t2).min_element();
    t_far >= t_near.max(0.0)
}

fn build_recursive(
    nodes: &mut Vec<Node>,
    order: &mut [u32],
    centroids: &[Vec3],
    tri_aabbs: &[Aabb],
    start: usize,
    end: usize,
) -> u32 {
    let count = end - start;
    let mut bound = Aabb::EMPTY;
    for &idx in &order[start..end] {
        bound.merge(&tri_aabbs[idx as usize]);
    }

    let make_leaf = |nodes: &mut Vec<Node>| {
        let node_idx = u32::try_from(nodes.len()).expect("bvh too deep");
        nodes.push(Node {
            aabb: bound,
            left_or_start: u32::try_from(start).expect("mesh too large"),
            right_or_count: u32::try_from(count).expect("mesh too large"),
            is_leaf: true,
        });
        node_idx
    };

    if count <= MAX_LEAF_TRIANGLES {
        return make_leaf(nodes);
    }

    let Some((axis, split)) = find_best_split(&order[start..end], centroids, tri_aabbs, &bound)
    else {
        return make_leaf(nodes);
    };

    order[start..end].sort_by(|&a, &b| {
        let ca = centroids[a as usize][axis];
        let cb = centroids[b as usize][axis];
        ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
    });
    let mid = start + split;

    let node_idx = u32::try_from(nodes.len()).expect("bvh too deep");
    nodes.push(Node {
        aabb: bound,
        left_or_start: 0,
        right_or_count: 0,
        is_leaf: false,
    });
    let left = build_recursive(nodes, order, centroids, tri_aabbs, start, mid);
    let right = build_recursive(nodes, order, centroids, tri_aabbs, mid, end);
    nodes[node_idx as usize].left_or_start = left;
    nodes[node_idx as usize].right_or_count = right;
    node_idx
}

/// Binned SAH split. Returns `(axis, left-count)` or `None` when no split
/// beats keeping the node whole.
fn find_best_split(
    order: &[u32],
    centroids: &[Vec3],
    tri_aabbs: &[Aabb],
    bound: &Aabb,
) -> Option<(usize, usize)> {
    let node_sa = bound.surface_area();
    if node_sa <= 0.0 {
        return Some((0, order.len() / 2));
    }

    let mut best_cost = f32::INFINITY;
    let mut best: Option<(usize, usize)> = None;
    for axis in 0..3 {
        let lo = bound.min[axis];
        let extent = bound.max[axis] - lo;
        if extent <= 0.0 {
            continue;
        }

        let mut bin_counts = [0usize; SAH_BINS];
        let mut bin_bounds = [Aabb::EMPTY; SAH_BINS];
        for &idx in order {
            let c = centroids[idx as usize][axis];
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let bin = (((c - lo) / extent * SAH_BINS as f32) as usize).min(SAH_BINS - 1);
            bin_counts[bin] += 1;
            bin_bounds[bin].merge(&tri_aabbs[idx as usize]);
        }

        // Prefix sweep for the left side of each candidate split.
        let mut left_counts = [0usize; SAH_BINS];
        let mut left_bounds = [Aabb::EMPTY; SAH_BINS];
        let mut running = Aabb::EMPTY;
        let mut running_count = 0;
        for i in 0..SAH_BINS {
            running_count += bin_counts[i];
            running.merge(&bin_bounds[i]);
            left_counts[i] = running_count;
            left_bounds[i] = running;
        }

        // Suffix sweep evaluating cost at each boundary.
        let mut right = Aabb::EMPTY;
        let mut right_count = 0;
        for i in (1..SAH_BINS).rev() {
            right_count += bin_counts[i];
            right.merge(&bin_bounds[i]);
            let left_n = left_counts[i - 1];
            if left_n == 0 || right_count == 0 {
                continue;
            }
            #[allow(clippy::cast_precision_loss)]
            let cost = 1.0
                + (left_bounds[i - 1].surface_area() * left_n as f32
                    + right.surface_area() * right_count as f32)
                    / node_sa;
            if cost < best_cost {
                best_cost = cost;
                best = Some((axis, left_n));
            }
        }
    }

    best.filter(|&(_, split)| split > 0 && split < order.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh::primitives::box_mesh;

    fn all_hits(bvh: &Bvh, tris: &[Triangle], ray: &Ray) -> Vec<f32> {
        let mut stack = Vec::new();
        let mut hits = Vec::new();
        bvh.collect_hits(tris, ray, &mut stack, &mut hits);
        hits.sort_by(f32::total_cmp);
        hits
    }

    #[test]
    fn ray_through_box_crosses_two_faces() {
        let mesh = box_mesh(Vec3::new(1.0, 1.0, 1.0));
        let bvh = Bvh::build(&mesh.triangles);
        let ray = Ray::new(Vec3::new(0.3, 0.2, 5.0), Vec3::NEG_Z);
        let hits = all_hits(&bvh, &mesh.triangles, &ray);
        assert_eq!(hits.len(), 2);
        assert!((hits[0] - 4.0).abs() < 1e-4);
        assert!((hits[1] - 6.0).abs() < 1e-4);
    }

    #[test]
    fn ray_from_inside_crosses_one_face() {
        let mesh = box_mesh(Vec3::new(1.0, 1.0, 1.0));
        let bvh = Bvh::build(&mesh.triangles);
        let ray = Ray::new(Vec3::new(0.3, 0.2, 0.0), Vec3::NEG_Z);
        assert_eq!(all_hits(&bvh, &mesh.triangles, &ray).len(), 1);
    }

    #[test]
    fn missing_ray_reports_nothing() {
        let mesh = box_mesh(Vec3::new(1.0, 1.0, 1.0));
        let bvh = Bvh::build(&mesh.triangles);
        let ray = Ray::new(Vec3::new(5.0, 5.0, 5.0), Vec3::NEG_Z);
        assert!(all_hits(&bvh, &mesh.triangles, &ray).is_empty());
    }

    #[test]
    fn bvh_matches_brute_force_on_scattered_triangles() {
        // Deterministic pseudo-random soup; no RNG dependency.
        let mut tris = Vec::new();
        let mut seed = 0x1234_5678_u32;
        let mut next = || {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            #[allow(clippy::cast_precision_loss)]
            let v = (seed >> 8) as f32 / f32::from(u16::MAX);
            v * 8.0 - 4.0
        };
        for _ in 0..200 {
            let a = Vec3::new(next(), next(), next());
            tris.push(Triangle::new(
                a,
                a + Vec3::new(next().abs() * 0.2 + 0.05, 0.0, 0.0),
                a + Vec3::new(0.0, next().abs() * 0.2 + 0.05, 0.0),
            ));
        }
        let bvh = Bvh::build(&tris);
        for i in 0..20 {
            #[allow(clippy::cast_precision_loss)]
            let x = -3.0 + i as f32 * 0.3;
            let ray = Ray::new(Vec3::new(x, 0.1 * x, 10.0), Vec3::NEG_Z);
            let mut brute: Vec<f32> = tris
                .iter()
                .filter_map(|t| intersect_triangle(&ray, t))
                .collect();
            brute.sort_by(f32::total_cmp);
            assert_eq!(all_hits(&bvh, &tris, &ray), brute);
        }
    }

    #[test]
    fn empty_build_is_queryable() {
        let bvh = Bvh::build(&[]);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(all_hits(&bvh, &[], &ray).is_empty());
    }
}
