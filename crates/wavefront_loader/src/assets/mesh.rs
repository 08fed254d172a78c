//! Mesh buckets: interleaved triangle data grouped by face format and material

use std::collections::BTreeMap;

use serde::Serialize;

use super::face::{FaceFormat, VertexLayout};
use crate::foundation::math::{Vec2, Vec3};

/// Material name used when no `usemtl` is active
pub const DEFAULT_MATERIAL: &str = "default";

/// Buckets keyed by [`MeshBucket::id`]
pub type MeshMap = BTreeMap<String, MeshBucket>;

/// Triangle list sharing one face format and one material.
///
/// Vertices are interleaved as position, then uv (if the format has one),
/// then normal (if emitted). Three consecutive vertices form a triangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshBucket {
    format: FaceFormat,
    material: String,
    layout: VertexLayout,
    vertices: Vec<f32>,
}

impl MeshBucket {
    /// Empty bucket for `(format, material)`
    pub fn new(format: FaceFormat, material: impl Into<String>, emit_normals: bool) -> Self {
        Self {
            format,
            material: material.into(),
            layout: format.layout(emit_normals),
            vertices: Vec::new(),
        }
    }

    /// Deterministic id for a `(format, material)` pair
    pub fn id_for(format: FaceFormat, material: &str) -> String {
        format!("mesh-vtype{}-material{}", format.code(), material)
    }

    /// This bucket's id
    pub fn id(&self) -> String {
        Self::id_for(self.format, &self.material)
    }

    /// Face format of every triangle in the bucket
    pub const fn format(&self) -> FaceFormat {
        self.format
    }

    /// Material name active when the triangles were read.
    ///
    /// Not guaranteed to exist in any loaded material library.
    pub fn material(&self) -> &str {
        &self.material
    }

    /// Interleaved vertex layout
    pub const fn layout(&self) -> VertexLayout {
        self.layout
    }

    /// Interleaved vertex data
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Vertex data as raw bytes, ready for a GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.layout.stride
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append one triangle's worth of interleaved data
    pub(crate) fn extend(&mut self, vertices: &[f32]) {
        debug_assert_eq!(vertices.len() % self.layout.stride, 0);
        self.vertices.extend_from_slice(vertices);
    }
}

/// One resolved corner of a triangle
#[derive(Debug, Clone, Copy)]
pub(crate) struct Corner {
    pub position: Vec3,
    pub tex_coord: Option<Vec2>,
    pub normal: Option<Vec3>,
}

/// Interleave corners in order into a flat buffer
pub(crate) fn interleave(corners: &[Corner], layout: VertexLayout) -> Vec<f32> {
    let mut out = Vec::with_capacity(corners.len() * layout.stride);
    for corner in corners {
        out.extend_from_slice(corner.position.as_slice());
        if let Some(uv) = corner.tex_coord {
            out.extend_from_slice(uv.as_slice());
        }
        if let Some(normal) = corner.normal {
            out.extend_from_slice(normal.as_slice());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_id() {
        assert_eq!(
            MeshBucket::id_for(FaceFormat::PositionUVNormal, "wood"),
            "mesh-vtype2-materialwood"
        );
        let bucket = MeshBucket::new(FaceFormat::PositionNormal, DEFAULT_MATERIAL, false);
        assert_eq!(bucket.id(), "mesh-vtype3-materialdefault");
    }

    #[test]
    fn test_interleave_order() {
        let corners = [Corner {
            position: Vec3::new(1.0, 2.0, 3.0),
            tex_coord: Some(Vec2::new(0.5, 0.25)),
            normal: Some(Vec3::new(0.0, 0.0, 1.0)),
        }];
        let layout = FaceFormat::PositionUVNormal.layout(true);
        assert_eq!(
            interleave(&corners, layout),
            vec![1.0, 2.0, 3.0, 0.5, 0.25, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_counts_and_bytes() {
        let mut bucket = MeshBucket::new(FaceFormat::PositionOnly, "m", false);
        assert!(bucket.is_empty());
        bucket.extend(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(bucket.vertex_count(), 3);
        assert_eq!(bucket.triangle_count(), 1);
        assert_eq!(bucket.as_bytes().len(), 9 * 4);
        assert_eq!(&bucket.as_bytes()[12..16], &1.0f32.to_ne_bytes());
    }
}
