//! Face-indexed polygon mesh.

use std::cell::OnceCell;

use nalgebra::{Point2, Point3};

use super::point_array::{OriginalPointArray, PointArray, SymbolicPointArray};
use crate::error::{MeshError, Result};

/// A polygon mesh whose points may be derived from a coarser mesh.
///
/// Each face is a flat list alternating point index and texture coordinate
/// index, so a face of arity `n` has length `2 * n`. Faces with fewer than
/// three corners are kept but contribute nothing to subdivision.
///
/// The mesh is read-only after construction except for its points, which
/// can be recomputed with [`update`](Self::update).
#[derive(Debug, Clone)]
pub struct SymbolicPolygonMesh {
    points: PointArray,
    tex_coords: Vec<f32>,
    faces: Vec<Vec<usize>>,
    face_smoothing_groups: Vec<u32>,
    num_edges_in_faces: OnceCell<usize>,
}

impl SymbolicPolygonMesh {
    /// Build a mesh from flat point and texture coordinate buffers.
    ///
    /// `face_smoothing_groups` may be empty, in which case every face is in
    /// group 0.
    ///
    /// # Example
    ///
    /// ```
    /// use symsubdiv::mesh::SymbolicPolygonMesh;
    ///
    /// let points = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0];
    /// let tex_coords = vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0];
    /// let faces = vec![vec![0, 0, 1, 1, 2, 2]];
    ///
    /// let mesh = SymbolicPolygonMesh::new(points, tex_coords, faces, vec![]).unwrap();
    /// assert_eq!(mesh.num_faces(), 1);
    /// assert_eq!(mesh.num_corners(), 3);
    /// ```
    pub fn new(
        points: Vec<f32>,
        tex_coords: Vec<f32>,
        faces: Vec<Vec<usize>>,
        face_smoothing_groups: Vec<u32>,
    ) -> Result<Self> {
        let points = OriginalPointArray::new(points)?;
        MeshError::check_stride("texture coordinate", tex_coords.len(), 2)?;

        let face_smoothing_groups = if face_smoothing_groups.is_empty() {
            vec![0; faces.len()]
        } else {
            face_smoothing_groups
        };
        if face_smoothing_groups.len() != faces.len() {
            return Err(MeshError::SmoothingGroupMismatch {
                faces: faces.len(),
                groups: face_smoothing_groups.len(),
            });
        }

        let num_points = points.num_points();
        let num_tex_coords = tex_coords.len() / 2;
        for (f, face) in faces.iter().enumerate() {
            if face.len() % 2 != 0 {
                return Err(MeshError::OddFaceLength {
                    face: f,
                    len: face.len(),
                });
            }
            for corner in face.chunks_exact(2) {
                if corner[0] >= num_points {
                    return Err(MeshError::InvalidPointIndex {
                        face: f,
                        point: corner[0],
                    });
                }
                if corner[1] >= num_tex_coords {
                    return Err(MeshError::InvalidTexCoordIndex {
                        face: f,
                        tex_coord: corner[1],
                    });
                }
            }
        }

        Ok(Self::from_parts(
            points.into(),
            tex_coords,
            faces,
            face_smoothing_groups,
        ))
    }

    /// Build a mesh without texture coordinates from point-index polygons.
    ///
    /// Every corner references a single texture coordinate at the origin.
    pub fn from_polygons(points: &[Point3<f32>], polygons: &[Vec<usize>]) -> Result<Self> {
        let data = points.iter().flat_map(|p| [p.x, p.y, p.z]).collect();
        let faces = polygons
            .iter()
            .map(|polygon| polygon.iter().flat_map(|&p| [p, 0]).collect())
            .collect();
        Self::new(data, vec![0.0, 0.0], faces, Vec::new())
    }

    /// Assemble a mesh from trusted parts. Indices are not validated.
    pub(crate) fn from_parts(
        points: PointArray,
        tex_coords: Vec<f32>,
        faces: Vec<Vec<usize>>,
        face_smoothing_groups: Vec<u32>,
    ) -> Self {
        Self {
            points,
            tex_coords,
            faces,
            face_smoothing_groups,
            num_edges_in_faces: OnceCell::new(),
        }
    }

    /// The point array.
    pub fn points(&self) -> &PointArray {
        &self.points
    }

    /// Flat `u, v` texture coordinates.
    pub fn tex_coords(&self) -> &[f32] {
        &self.tex_coords
    }

    /// Faces as alternating point and texture coordinate indices.
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Smoothing group of every face.
    pub fn face_smoothing_groups(&self) -> &[u32] {
        &self.face_smoothing_groups
    }

    /// Number of points.
    pub fn num_points(&self) -> usize {
        self.points.num_points()
    }

    /// Number of texture coordinates.
    pub fn num_tex_coords(&self) -> usize {
        self.tex_coords.len() / 2
    }

    /// Number of faces, degenerate ones included.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Sum of face arities.
    pub fn num_corners(&self) -> usize {
        self.faces.iter().map(|face| face.len() / 2).sum()
    }

    /// Half the sum of face arities.
    ///
    /// On a closed manifold mesh this is the number of edges. It is not a
    /// bound on the number of faces produced by subdivision; use
    /// [`num_corners`](Self::num_corners) for that.
    pub fn num_edges_in_faces(&self) -> usize {
        *self
            .num_edges_in_faces
            .get_or_init(|| self.num_corners() / 2)
    }

    /// Position of point `i`.
    pub fn point(&self, i: usize) -> Option<Point3<f32>> {
        self.points.point(i)
    }

    /// Texture coordinate `i`.
    pub fn tex_coord(&self, i: usize) -> Option<Point2<f32>> {
        self.tex_coords
            .get(i * 2..i * 2 + 2)
            .map(|t| Point2::new(t[0], t[1]))
    }

    /// Axis-aligned bounding box of the points, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let mut iter = (0..self.num_points()).filter_map(|i| self.point(i));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| {
            (min.inf(&p), max.sup(&p))
        }))
    }

    /// Recompute derived points from the control level's flat buffer.
    pub fn update(&mut self, control: &[f32]) -> Result<()> {
        self.points.update(control)
    }

    /// Replace the source points of an original mesh.
    ///
    /// The new buffer must hold the same number of points.
    pub fn replace_original_points(&mut self, data: Vec<f32>) -> Result<()> {
        if !self.points.is_original() {
            return Err(MeshError::InvalidState(
                "only original meshes accept new source points".to_string(),
            ));
        }
        let points = OriginalPointArray::new(data)?;
        if points.num_points() != self.num_points() {
            return Err(MeshError::ControlPointMismatch {
                expected: self.num_points(),
                actual: points.num_points(),
            });
        }
        self.points = points.into();
        Ok(())
    }
}
