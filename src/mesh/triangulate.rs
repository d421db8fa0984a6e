//! Conversion of polygon meshes to flat triangle meshes.
//!
//! The triangle layout matches what rendering back ends consume: a point
//! buffer, a texture coordinate buffer, and six indices per triangle
//! (`p0, t0, p1, t1, p2, t2`).

use super::point_array::SymbolicPointArray;
use super::polygon_mesh::SymbolicPolygonMesh;

/// A triangle mesh in flat buffer form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Flat `x, y, z` positions.
    pub points: Vec<f32>,
    /// Flat `u, v` texture coordinates.
    pub tex_coords: Vec<f32>,
    /// Six indices per triangle, alternating point and texture coordinate.
    pub faces: Vec<usize>,
    /// Smoothing group of every triangle.
    pub face_smoothing_groups: Vec<u32>,
}

impl TriangleMesh {
    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.faces.len() / 6
    }
}

impl SymbolicPolygonMesh {
    /// Fan-triangulate every face.
    ///
    /// A face of arity `n` yields `n - 2` triangles sharing its first
    /// corner. Faces with fewer than three corners are dropped.
    pub fn to_triangle_mesh(&self) -> TriangleMesh {
        let num_triangles = self
            .faces()
            .iter()
            .map(|face| (face.len() / 2).saturating_sub(2))
            .sum::<usize>();

        let mut faces = Vec::with_capacity(num_triangles * 6);
        let mut face_smoothing_groups = Vec::with_capacity(num_triangles);

        for (face, &group) in self.faces().iter().zip(self.face_smoothing_groups()) {
            let n = face.len() / 2;
            for i in 1..n.saturating_sub(1) {
                faces.extend_from_slice(&face[0..2]);
                faces.extend_from_slice(&face[i * 2..i * 2 + 4]);
                face_smoothing_groups.push(group);
            }
        }

        TriangleMesh {
            points: self.points().data().to_vec(),
            tex_coords: self.tex_coords().to_vec(),
            faces,
            face_smoothing_groups,
        }
    }
}
