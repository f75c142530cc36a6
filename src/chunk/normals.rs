//! Smooth normals and the skirt continuity fix.
//!
//! Normals are built in two passes over the vertex arena: every triangle adds
//! its unnormalized face normal into its three vertices, then each
//! accumulator is normalized once. Keeping the passes apart makes the result
//! independent of triangle order; faces are weighted by area implicitly.

use bevy::math::Vec3;

use super::grid::ChunkGrid;

/// Sum `(v2 - v1) × (v0 - v1)` of every triangle into its vertices.
pub(crate) fn accumulate_face_normals(grid: &mut ChunkGrid) {
    for v in grid.vertices.iter_mut() {
        v.normal = Vec3::ZERO;
    }

    for &[a, b, c] in &grid.triangles {
        let p0 = grid.vertices[a].position;
        let p1 = grid.vertices[b].position;
        let p2 = grid.vertices[c].position;
        let face = (p2 - p1).cross(p0 - p1);

        grid.vertices[a].normal += face;
        grid.vertices[b].normal += face;
        grid.vertices[c].normal += face;
    }
}

/// Pull the padding ring down by `depth` and give it the accumulated normal of
/// its nearest interior neighbor.
///
/// Must run after [`accumulate_face_normals`] and before
/// [`normalize_normals`]. Each ring vertex is lowered exactly once, corners
/// included. Interior accumulators are only read, so visiting order does not
/// matter.
pub(crate) fn apply_skirt(grid: &mut ChunkGrid, depth: f32) {
    let ring: Vec<usize> = grid.ring_indices().collect();
    for idx in ring {
        let (i, j) = grid.coords(idx);
        let (ni, nj) = grid.interior_neighbor(i, j);
        let proxy = grid.vertices[grid.index(ni, nj)].normal;

        let vertex = &mut grid.vertices[idx];
        vertex.position.y -= depth;
        vertex.normal = proxy;
    }
}

/// Normalize every accumulator in place. A zero accumulator becomes +Y.
pub(crate) fn normalize_normals(grid: &mut ChunkGrid) {
    for v in grid.vertices.iter_mut() {
        v.normal = v.normal.try_normalize().unwrap_or(Vec3::Y);
    }
}
