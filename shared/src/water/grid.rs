//! Regular grid over the water plane.
//!
//! The grid lies in the XZ plane, centered on the origin, with Y up. UVs run
//! from 0 to 1 along X and Z. The same layout is used for the GPU mesh and for
//! CPU evaluation, so vertex `i` always refers to the same surface point.

use bevy::math::{Vec2, Vec3, Vec4};

use super::config::SurfaceParams;
use super::ripples::Ripple;
use super::shading::{ShadingInput, ShadingModel};
use super::surface::HeightFieldSynthesizer;
use crate::constants::{MAX_SURFACE_SEGMENTS, WATER_LEVEL};

/// One evaluated vertex. Recomputed every frame, never stored across frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceVertex {
    pub base_position: Vec3,
    pub height: f32,
    pub normal: Vec3,
    pub color: Vec4,
}

impl SurfaceVertex {
    /// Base position raised by the height.
    pub fn displaced_position(&self) -> Vec3 {
        self.base_position + Vec3::Y * self.height
    }
}

/// Mesh buffers ready to be handed to a renderer.
#[derive(Debug, Default, Clone)]
pub struct SurfaceMeshData {
    pub positions: Vec<[f32; 3]>,
    /// Initially up, modified by the shader or by [`SurfaceMeshData::apply`]
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

impl SurfaceMeshData {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Copies evaluated vertices into the buffers. Lengths must match.
    pub fn apply(&mut self, vertices: &[SurfaceVertex]) {
        debug_assert_eq!(vertices.len(), self.positions.len());
        let targets = self
            .positions
            .iter_mut()
            .zip(self.normals.iter_mut())
            .zip(self.colors.iter_mut());
        for (((position, normal), color), v) in targets.zip(vertices) {
            *position = v.displaced_position().to_array();
            *normal = v.normal.to_array();
            *color = v.color.to_array();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGrid {
    size: f32,
    segments: u32,
}

impl Default for SurfaceGrid {
    fn default() -> Self {
        Self::new(SurfaceParams::default())
    }
}

impl SurfaceGrid {
    pub fn new(params: SurfaceParams) -> Self {
        Self {
            size: params.size.max(f32::EPSILON),
            segments: params.segments.clamp(1, MAX_SURFACE_SEGMENTS),
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Vertices along one side.
    #[inline]
    pub fn side(&self) -> u32 {
        self.segments + 1
    }

    pub fn vertex_count(&self) -> usize {
        let side = self.side() as usize;
        side * side
    }

    pub fn half_extent(&self) -> f32 {
        self.size * 0.5
    }

    #[inline]
    fn index(&self, i: u32, j: u32) -> u32 {
        j * self.side() + i
    }

    /// Base position and UV of grid vertex `(i, j)`.
    pub fn vertex(&self, i: u32, j: u32) -> (Vec3, Vec2) {
        let step = self.size / self.segments as f32;
        let h = self.half_extent();
        let position = Vec3::new(i as f32 * step - h, WATER_LEVEL, j as f32 * step - h);
        let uv = Vec2::new(
            i as f32 / self.segments as f32,
            j as f32 / self.segments as f32,
        );
        (position, uv)
    }

    /// Iterates `(base_position, uv)` in vertex buffer order.
    pub fn vertices(&self) -> impl Iterator<Item = (Vec3, Vec2)> + '_ {
        let side = self.side();
        (0..side).flat_map(move |j| (0..side).map(move |i| self.vertex(i, j)))
    }

    /// Flat mesh buffers. Triangles wind counter-clockwise seen from above.
    pub fn mesh_data(&self) -> SurfaceMeshData {
        let count = self.vertex_count();
        let mut data = SurfaceMeshData {
            positions: Vec::with_capacity(count),
            normals: vec![[0.0, 1.0, 0.0]; count],
            uvs: Vec::with_capacity(count),
            colors: vec![[1.0, 1.0, 1.0, 1.0]; count],
            indices: Vec::with_capacity(self.segments as usize * self.segments as usize * 6),
        };

        for (position, uv) in self.vertices() {
            data.positions.push(position.to_array());
            data.uvs.push(uv.to_array());
        }

        for j in 0..self.segments {
            for i in 0..self.segments {
                let a = self.index(i, j);
                let b = self.index(i, j + 1);
                let c = self.index(i + 1, j);
                let d = self.index(i + 1, j + 1);
                data.indices.extend_from_slice(&[a, b, c, c, b, d]);
            }
        }

        data
    }

    /// Evaluates height, normal and color for every vertex on the CPU.
    pub fn evaluate_into(
        &self,
        out: &mut Vec<SurfaceVertex>,
        synthesizer: &HeightFieldSynthesizer,
        shading: &ShadingModel,
        ripples: &[Ripple],
        time: f32,
        camera_position: Vec3,
    ) {
        out.clear();
        out.reserve(self.vertex_count());

        for (base_position, uv) in self.vertices() {
            let sample = synthesizer.sample(base_position.x, base_position.z, time, ripples);
            let displaced = base_position + Vec3::Y * sample.height;
            let view_dir = (displaced - camera_position).normalize_or(Vec3::NEG_Y);
            let color = shading.shade(&ShadingInput {
                height: sample.height,
                normal: sample.normal,
                view_dir,
                uv,
                time,
            });
            out.push(SurfaceVertex {
                base_position,
                height: sample.height,
                normal: sample.normal,
                color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SURFACE_SEGMENTS, SURFACE_SIZE};

    fn small_grid() -> SurfaceGrid {
        SurfaceGrid::new(SurfaceParams {
            size: 10.0,
            segments: 4,
        })
    }

    #[test]
    fn test_default_grid_resolution() {
        let grid = SurfaceGrid::default();
        assert_eq!(grid.size(), SURFACE_SIZE);
        assert_eq!(grid.segments(), SURFACE_SEGMENTS);
        assert_eq!(grid.vertex_count(), 161 * 161);
    }

    #[test]
    fn test_segments_are_bounded() {
        let grid = SurfaceGrid::new(SurfaceParams {
            size: 10.0,
            segments: u32::MAX,
        });
        assert_eq!(grid.segments(), MAX_SURFACE_SEGMENTS);
        let side = MAX_SURFACE_SEGMENTS as usize + 1;
        assert_eq!(grid.vertex_count(), side * side);
        assert!(grid.vertex_count() <= u32::MAX as usize);

        let grid = SurfaceGrid::new(SurfaceParams {
            size: 10.0,
            segments: 0,
        });
        assert_eq!(grid.segments(), 1);
    }

    #[test]
    fn test_mesh_buffers_are_consistent() {
        let grid = small_grid();
        let data = grid.mesh_data();
        assert_eq!(data.positions.len(), 25);
        assert_eq!(data.uvs.len(), 25);
        assert_eq!(data.normals.len(), 25);
        assert_eq!(data.colors.len(), 25);
        assert_eq!(data.indices.len(), 4 * 4 * 6);
        assert!(data.indices.iter().all(|&i| (i as usize) < data.positions.len()));
    }

    #[test]
    fn test_grid_corners_and_uvs() {
        let grid = small_grid();
        let (p0, uv0) = grid.vertex(0, 0);
        let (p1, uv1) = grid.vertex(4, 4);
        assert_eq!(p0, Vec3::new(-5.0, WATER_LEVEL, -5.0));
        assert_eq!(p1, Vec3::new(5.0, WATER_LEVEL, 5.0));
        assert_eq!(uv0, Vec2::ZERO);
        assert_eq!(uv1, Vec2::ONE);
    }

    #[test]
    fn test_triangles_face_up() {
        let data = small_grid().mesh_data();
        for tri in data.indices.chunks_exact(3) {
            let a = Vec3::from_array(data.positions[tri[0] as usize]);
            let b = Vec3::from_array(data.positions[tri[1] as usize]);
            let c = Vec3::from_array(data.positions[tri[2] as usize]);
            let n = (b - a).cross(c - a);
            assert!(n.y > 0.0, "triangle {tri:?} faces down");
        }
    }

    #[test]
    fn test_evaluate_and_apply() {
        let grid = small_grid();
        let synth = HeightFieldSynthesizer::default();
        let shading = ShadingModel::default();
        let mut vertices = Vec::new();
        grid.evaluate_into(
            &mut vertices,
            &synth,
            &shading,
            &[],
            1.0,
            Vec3::new(0.0, 30.0, 60.0),
        );
        assert_eq!(vertices.len(), grid.vertex_count());

        let mut data = grid.mesh_data();
        data.apply(&vertices);
        for (v, p) in vertices.iter().zip(&data.positions) {
            assert!((p[1] - v.height).abs() < 1e-6);
            assert!(v.color.w >= 0.9 && v.color.w <= 0.98);
        }
    }
}
