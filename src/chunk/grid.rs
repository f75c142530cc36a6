//! Vertex arena and triangle indices of a chunk grid.
//!
//! The grid spans logical coordinates `-1..=resolution + 1` on both axes: the
//! visible `resolution × resolution` cells plus one ring of padding that later
//! becomes the skirt. Ring vertices are clamped onto the tile edge, so before
//! the skirt is lowered they coincide with their interior neighbor.

use bevy::math::Vec3;

/// One vertex record of the arena.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct GridVertex {
    /// Height-displaced mesh position.
    pub position: Vec3,
    /// Pre-displacement world position fed to the generators.
    pub world: Vec3,
    pub height: f32,
    /// Accumulated face normal; normalized only in the final pass.
    pub normal: Vec3,
    pub color: [f32; 3],
    pub uv: [f32; 2],
}

impl GridVertex {
    /// World position lifted onto the terrain surface, ignoring the skirt.
    #[inline]
    pub fn surface(&self) -> Vec3 {
        self.world + Vec3::Y * self.height
    }
}

/// Arena of grid vertices addressed by grid index, plus the shared triangle
/// list.
#[derive(Clone, Debug)]
pub(crate) struct ChunkGrid {
    resolution: u32,
    side: usize,
    pub vertices: Vec<GridVertex>,
    pub triangles: Vec<[usize; 3]>,
}

impl ChunkGrid {
    /// Lay out the undisplaced grid for a tile centered on `offset`.
    pub fn new(offset: Vec3, width: f32, resolution: u32) -> Self {
        let side = resolution as usize + 3;
        let half = width / 2.0;
        let res = resolution as f32;

        let mut vertices = Vec::with_capacity(side * side);
        for i in -1..=resolution as i32 + 1 {
            let u = (i as f32 / res).clamp(0.0, 1.0) * width;
            for j in -1..=resolution as i32 + 1 {
                let v = (j as f32 / res).clamp(0.0, 1.0) * width;
                let world = Vec3::new(u - half, 0.0, v - half) + offset;
                vertices.push(GridVertex {
                    position: world,
                    world,
                    ..Default::default()
                });
            }
        }

        let mut grid = Self {
            resolution,
            side,
            vertices,
            triangles: Vec::new(),
        };
        grid.triangles = grid.build_triangles();
        grid
    }

    fn build_triangles(&self) -> Vec<[usize; 3]> {
        let last = self.resolution as i32;
        let mut triangles = Vec::with_capacity(Self::triangle_count(self.resolution));
        for i in -1..=last {
            for j in -1..=last {
                let a = self.index(i, j);
                let b = self.index(i, j + 1);
                let c = self.index(i + 1, j + 1);
                let d = self.index(i + 1, j);
                // Both wind so that (v2 - v1) x (v0 - v1) points up on flat ground.
                triangles.push([a, b, c]);
                triangles.push([d, a, c]);
            }
        }
        triangles
    }

    /// Triangles in a grid of the given resolution, padding ring included.
    #[inline]
    pub fn triangle_count(resolution: u32) -> usize {
        let cells = resolution as usize + 2;
        2 * cells * cells
    }

    /// Arena index of logical cell `(i, j)`, both in `-1..=resolution + 1`.
    #[inline]
    pub fn index(&self, i: i32, j: i32) -> usize {
        (i + 1) as usize * self.side + (j + 1) as usize
    }

    /// Logical cell of an arena index.
    #[inline]
    pub fn coords(&self, index: usize) -> (i32, i32) {
        (
            (index / self.side) as i32 - 1,
            (index % self.side) as i32 - 1,
        )
    }

    /// Whether a logical cell lies on the padding ring.
    #[inline]
    pub fn is_ring(&self, i: i32, j: i32) -> bool {
        let last = self.resolution as i32;
        i < 0 || j < 0 || i > last || j > last
    }

    /// Nearest interior cell, one step inward from a ring cell (diagonally for
    /// corners). Interior cells map to themselves.
    #[inline]
    pub fn interior_neighbor(&self, i: i32, j: i32) -> (i32, i32) {
        let last = self.resolution as i32;
        (i.clamp(0, last), j.clamp(0, last))
    }

    /// Arena indices of every padding ring vertex.
    pub fn ring_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.vertices.len()).filter(|&idx| {
            let (i, j) = self.coords(idx);
            self.is_ring(i, j)
        })
    }
}
