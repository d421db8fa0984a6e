//! Symbolic Catmull-Clark subdivision of polygon meshes.

use log::debug;

use crate::error::Result;
use crate::mesh::{SubdividedPointArray, SymbolicPointArray, SymbolicPolygonMesh};

use super::topology::Topology;
use super::{BoundaryMode, MapBorderMode};

/// Subdivide `mesh` once.
///
/// Shorthand for [`SymbolicSubdivisionBuilder::new`] followed by
/// [`SymbolicSubdivisionBuilder::subdivide`].
///
/// # Example
///
/// ```
/// use symsubdiv::algo::subdivide::{subdivide, BoundaryMode, MapBorderMode};
/// use symsubdiv::mesh::shapes;
///
/// let quad = shapes::quad();
/// let fine = subdivide(&quad, BoundaryMode::CreaseEdges, MapBorderMode::NotSmooth).unwrap();
///
/// assert_eq!(fine.num_faces(), 4);
/// assert_eq!(fine.num_points(), 9);
/// ```
pub fn subdivide(
    mesh: &SymbolicPolygonMesh,
    boundary_mode: BoundaryMode,
    map_border_mode: MapBorderMode,
) -> Result<SymbolicPolygonMesh> {
    SymbolicSubdivisionBuilder::new(mesh, boundary_mode, map_border_mode).subdivide()
}

/// Builds the next subdivision level of a mesh.
///
/// The new mesh has one quad per corner of every face with at least three
/// corners. Its points are a [`SubdividedPointArray`] over the old mesh's
/// points, laid out as face points, then edge points, then control points.
/// Each quad is `[corner, edge after corner, face, edge before corner]`,
/// keeping the winding of the old face.
#[derive(Debug, Clone, Copy)]
pub struct SymbolicSubdivisionBuilder<'a> {
    old_mesh: &'a SymbolicPolygonMesh,
    boundary_mode: BoundaryMode,
    map_border_mode: MapBorderMode,
}

impl<'a> SymbolicSubdivisionBuilder<'a> {
    /// Create a builder for one pass over `old_mesh`.
    pub fn new(
        old_mesh: &'a SymbolicPolygonMesh,
        boundary_mode: BoundaryMode,
        map_border_mode: MapBorderMode,
    ) -> Self {
        Self {
            old_mesh,
            boundary_mode,
            map_border_mode,
        }
    }

    /// Run the pass and return the refined mesh.
    ///
    /// The returned mesh is already evaluated against the old mesh's current
    /// points. Call [`SymbolicPolygonMesh::update`] on it when those change.
    pub fn subdivide(&self) -> Result<SymbolicPolygonMesh> {
        let old = self.old_mesh;
        let capacity = old.num_points() + old.num_faces() + old.num_edges_in_faces();
        let mut points = SubdividedPointArray::new(old.num_points(), capacity);
        let topology = Topology::collect(old, &mut points)?;

        // One quad per corner. `num_edges_in_faces` is only half of this.
        let num_new_faces: usize = topology.faces().iter().map(|face| face.arity()).sum();

        let mut pass = Pass {
            builder: self,
            topology,
            points,
            tex_coords: Vec::with_capacity((num_new_faces * 3 + old.num_faces()) * 2),
            reindex: vec![None; old.num_points()],
        };
        let mut quads = vec![[0usize; 8]; num_new_faces];
        let mut groups = Vec::with_capacity(num_new_faces);

        let mut q = 0;
        for (f, &group) in old.face_smoothing_groups().iter().enumerate() {
            let n = pass.topology.faces()[f].arity();
            if n == 0 {
                continue;
            }
            let face_point = pass.topology.face_point(f)?;
            let face_tex_coord = pass.face_tex_coord(f);
            for quad in &mut quads[q..q + n] {
                quad[4] = face_point;
                quad[5] = face_tex_coord;
                groups.push(group);
            }
            q += n;
        }
        debug_assert_eq!(q, num_new_faces);

        q = 0;
        for f in 0..old.num_faces() {
            let n = pass.topology.faces()[f].arity();
            for i in 0..n {
                let next = (i + 1) % n;
                let face = &pass.topology.faces()[f];
                let (edge_after, uv_after) = (face.edges[next], face.edge_tex_coords[next]);
                let (edge_before, uv_before) = (face.edges[i], face.edge_tex_coords[i]);

                quads[q][2] = pass.topology.edge_point(edge_after)?;
                quads[q][3] = pass.push_tex_coord(uv_after);
                quads[q][6] = pass.topology.edge_point(edge_before)?;
                quads[q][7] = pass.push_tex_coord(uv_before);
                q += 1;
            }
        }
        debug_assert_eq!(q, num_new_faces);

        q = 0;
        for (f, face) in old.faces().iter().enumerate() {
            if pass.topology.faces()[f].arity() == 0 {
                continue;
            }
            for (i, corner) in face.chunks_exact(2).enumerate() {
                quads[q][0] = pass.control_point(corner[0])?;
                quads[q][1] = pass.control_tex_coord(f, i, corner[0], corner[1]);
                q += 1;
            }
        }
        debug_assert_eq!(q, num_new_faces);

        let Pass {
            mut points,
            tex_coords,
            ..
        } = pass;
        points.update(old.points().data())?;

        debug!(
            "subdivided {} faces / {} points into {} faces / {} points",
            old.num_faces(),
            old.num_points(),
            num_new_faces,
            points.num_points()
        );

        let faces = quads.iter().map(|quad| quad.to_vec()).collect();
        Ok(SymbolicPolygonMesh::from_parts(
            points.into(),
            tex_coords,
            faces,
            groups,
        ))
    }
}

/// Mutable state of one subdivision pass.
struct Pass<'b, 'a> {
    builder: &'b SymbolicSubdivisionBuilder<'a>,
    topology: Topology,
    points: SubdividedPointArray,
    tex_coords: Vec<f32>,
    /// Old point index to control point index.
    reindex: Vec<Option<usize>>,
}

impl Pass<'_, '_> {
    fn push_tex_coord(&mut self, uv: [f32; 2]) -> usize {
        self.tex_coords.extend_from_slice(&uv);
        self.tex_coords.len() / 2 - 1
    }

    /// Texture coordinate of the face point, shared by all quads of a face.
    fn face_tex_coord(&mut self, f: usize) -> usize {
        if let Some(index) = self.topology.faces()[f].new_tex_coord_index {
            return index;
        }
        let uv = self.topology.faces()[f].tex_coord;
        let index = self.push_tex_coord(uv);
        self.topology.faces_mut()[f].new_tex_coord_index = Some(index);
        index
    }

    /// Control point of old point `p`, allocated on first use.
    fn control_point(&mut self, p: usize) -> Result<usize> {
        if let Some(index) = self.reindex[p] {
            return Ok(index);
        }
        let index = self.calc_control_point(p)?;
        self.reindex[p] = Some(index);
        Ok(index)
    }

    fn calc_control_point(&mut self, p: usize) -> Result<usize> {
        let topology = &self.topology;
        let info = &topology.points()[p];

        if info.is_boundary() {
            if self.builder.boundary_mode == BoundaryMode::CreaseEdges || info.has_internal_edge() {
                let same_level = info
                    .edges
                    .iter()
                    .filter(|&&e| topology.edges()[e].is_boundary())
                    .map(|&e| Ok((topology.edge_point(e)?, 0.25)))
                    .collect::<Result<Vec<_>>>()?;
                return self.points.add_control_point(vec![(p, 0.5)], same_level);
            }
            return self.points.add_control_point(vec![(p, 1.0)], Vec::new());
        }

        let n = info.valence();
        if n == 0 {
            return self.points.add_control_point(vec![(p, 1.0)], Vec::new());
        }

        // (Q + 2R + (n - 3)S) / n, with R spread over both ends of every edge
        let nf = n as f32;
        let w = 1.0 / (nf * nf);
        let mut control = Vec::with_capacity(1 + 2 * info.edges.len());
        control.push((p, (nf - 3.0) / nf));
        for &e in &info.edges {
            let edge = topology.edges()[e].edge;
            control.push((edge.first(), w));
            control.push((edge.second(), w));
        }
        let same_level = info
            .faces
            .iter()
            .map(|&f| Ok((topology.face_point(f)?, w)))
            .collect::<Result<Vec<_>>>()?;
        self.points.add_control_point(control, same_level)
    }

    /// Texture coordinate of corner `i` of face `f` in its new quad.
    ///
    /// Interior points keep their texture coordinate. Boundary points are
    /// pulled towards the midpoints of the two face edges at the corner when
    /// the map border mode asks for it.
    fn control_tex_coord(&mut self, f: usize, i: usize, p: usize, t: usize) -> usize {
        let old_tex = self.builder.old_mesh.tex_coords();
        let uv = [old_tex[t * 2], old_tex[t * 2 + 1]];

        let info = &self.topology.points()[p];
        let smooth = info.is_boundary()
            && match self.builder.map_border_mode {
                MapBorderMode::NotSmooth => false,
                MapBorderMode::SmoothInternal => info.has_internal_edge(),
                MapBorderMode::SmoothAll => true,
            };
        if !smooth {
            return self.push_tex_coord(uv);
        }

        let face = &self.topology.faces()[f];
        let before = face.edge_tex_coords[i];
        let after = face.edge_tex_coords[(i + 1) % face.arity()];
        self.push_tex_coord([
            0.5 * uv[0] + 0.25 * (before[0] + after[0]),
            0.5 * uv[1] + 0.25 * (before[1] + after[1]),
        ])
    }
}
