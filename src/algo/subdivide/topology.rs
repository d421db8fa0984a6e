//! Face, edge and point adjacency for one subdivision pass.
//!
//! The adjacency is rebuilt on every pass into flat arrays indexed by face,
//! point and edge id, plus a map from canonical [`Edge`] to edge id.

use std::collections::HashMap;

use log::trace;

use crate::error::{MeshError, Result};
use crate::mesh::{SubdividedPointArray, SymbolicPolygonMesh};

/// An undirected edge, stored with the smaller point index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    first: usize,
    second: usize,
}

impl Edge {
    /// Create the canonical edge between two points.
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// The smaller endpoint.
    pub fn first(&self) -> usize {
        self.first
    }

    /// The larger endpoint.
    pub fn second(&self) -> usize {
        self.second
    }

    /// Whether `point` is an endpoint.
    pub fn contains(&self, point: usize) -> bool {
        self.first == point || self.second == point
    }
}

/// Adjacency of one edge.
#[derive(Debug, Clone)]
pub struct EdgeInfo {
    /// The edge itself.
    pub edge: Edge,
    /// Faces using this edge, in encounter order.
    pub faces: Vec<usize>,
    /// Index of the edge point in the subdivided point array.
    pub edge_point: Option<usize>,
}

impl EdgeInfo {
    /// An edge with a single adjacent face.
    pub fn is_boundary(&self) -> bool {
        self.faces.len() == 1
    }
}

/// Adjacency of one face.
///
/// `edges[i]` joins corner `i - 1` to corner `i` (cyclically), so corner `i`
/// touches `edges[i]` and `edges[(i + 1) % n]`.
#[derive(Debug, Clone, Default)]
pub struct FaceInfo {
    /// Edge ids around the face.
    pub edges: Vec<usize>,
    /// Texture coordinate at the middle of each edge, as seen from this face.
    pub edge_tex_coords: Vec<[f32; 2]>,
    /// Average texture coordinate of the corners.
    pub tex_coord: [f32; 2],
    /// Index of the face point in the subdivided point array.
    pub face_point: Option<usize>,
    /// Index of the face texture coordinate in the subdivided mesh.
    pub new_tex_coord_index: Option<usize>,
}

impl FaceInfo {
    /// Number of corners taking part in subdivision. Zero for faces with
    /// fewer than three corners.
    pub fn arity(&self) -> usize {
        self.edges.len()
    }
}

/// Adjacency of one point.
#[derive(Debug, Clone, Default)]
pub struct PointInfo {
    /// Incident edge ids, without duplicates.
    pub edges: Vec<usize>,
    /// Incident face ids, in encounter order.
    pub faces: Vec<usize>,
    boundary: bool,
    internal_edge: bool,
}

impl PointInfo {
    /// Whether any incident edge is a boundary edge.
    pub fn is_boundary(&self) -> bool {
        self.boundary
    }

    /// Whether any incident edge is shared by more than one face.
    pub fn has_internal_edge(&self) -> bool {
        self.internal_edge
    }

    /// Number of incident faces.
    pub fn valence(&self) -> usize {
        self.faces.len()
    }

    fn add_edge(&mut self, edge: usize) {
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
    }
}

/// Adjacency of a whole mesh.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    edge_index: HashMap<Edge, usize>,
    edges: Vec<EdgeInfo>,
    faces: Vec<FaceInfo>,
    points: Vec<PointInfo>,
}

impl Topology {
    /// Collect the adjacency of `mesh` and allocate its face points and edge
    /// points in `points`.
    ///
    /// Face points are added first, one per face with at least three corners,
    /// then one edge point per distinct edge in first-encounter order. Faces
    /// with fewer than three corners are skipped entirely.
    pub fn collect(mesh: &SymbolicPolygonMesh, points: &mut SubdividedPointArray) -> Result<Self> {
        let tex = mesh.tex_coords();
        let mut topology = Topology {
            edge_index: HashMap::with_capacity(mesh.num_edges_in_faces()),
            edges: Vec::with_capacity(mesh.num_edges_in_faces()),
            faces: Vec::with_capacity(mesh.num_faces()),
            points: vec![PointInfo::default(); mesh.num_points()],
        };

        for (f, face) in mesh.faces().iter().enumerate() {
            let n = face.len() / 2;
            let mut info = FaceInfo::default();
            if n < 3 {
                trace!("skipping degenerate face {} with {} corners", f, n);
                topology.faces.push(info);
                continue;
            }

            info.edges.reserve(n);
            info.edge_tex_coords.reserve(n);
            let mut from = face[(n - 1) * 2];
            let mut tex_from = face[(n - 1) * 2 + 1];
            let mut sum = [0.0f64; 2];

            for corner in face.chunks_exact(2) {
                let (to, tex_to) = (corner[0], corner[1]);
                let edge = topology.register_edge(Edge::new(from, to), f);
                info.edges.push(edge);
                info.edge_tex_coords.push([
                    (tex[tex_from * 2] + tex[tex_to * 2]) * 0.5,
                    (tex[tex_from * 2 + 1] + tex[tex_to * 2 + 1]) * 0.5,
                ]);

                let to_info = &mut topology.points[to];
                to_info.faces.push(f);
                to_info.add_edge(edge);
                topology.points[from].add_edge(edge);

                sum[0] += f64::from(tex[tex_to * 2]);
                sum[1] += f64::from(tex[tex_to * 2 + 1]);
                from = to;
                tex_from = tex_to;
            }

            info.tex_coord = [(sum[0] / n as f64) as f32, (sum[1] / n as f64) as f32];
            topology.faces.push(info);
        }

        let edges = &topology.edges;
        for info in &mut topology.points {
            info.boundary = info.edges.iter().any(|&e| edges[e].is_boundary());
            info.internal_edge = info.edges.iter().any(|&e| !edges[e].is_boundary());
        }

        for (info, face) in topology.faces.iter_mut().zip(mesh.faces()) {
            if info.arity() < 3 {
                continue;
            }
            let corners: Vec<usize> = face.iter().step_by(2).copied().collect();
            info.face_point = Some(points.add_face_point(&corners)?);
        }

        for e in 0..topology.edges.len() {
            let edge = topology.edges[e].edge;
            let face_points = if topology.edges[e].is_boundary() {
                Vec::new()
            } else {
                topology.edges[e]
                    .faces
                    .iter()
                    .map(|&f| topology.face_point(f))
                    .collect::<Result<Vec<_>>>()?
            };
            topology.edges[e].edge_point =
                Some(points.add_edge_point(edge.first, edge.second, &face_points)?);
        }

        Ok(topology)
    }

    fn register_edge(&mut self, edge: Edge, face: usize) -> usize {
        let id = match self.edge_index.get(&edge) {
            Some(&id) => id,
            None => {
                let id = self.edges.len();
                self.edges.push(EdgeInfo {
                    edge,
                    faces: Vec::new(),
                    edge_point: None,
                });
                self.edge_index.insert(edge, id);
                id
            }
        };
        self.edges[id].faces.push(face);
        id
    }

    /// Face point index of face `f`.
    pub fn face_point(&self, f: usize) -> Result<usize> {
        self.faces
            .get(f)
            .and_then(|info| info.face_point)
            .ok_or_else(|| MeshError::InvalidState(format!("face {f} has no face point")))
    }

    /// Edge point index of edge id `e`.
    pub fn edge_point(&self, e: usize) -> Result<usize> {
        self.edges
            .get(e)
            .and_then(|info| info.edge_point)
            .ok_or_else(|| MeshError::InvalidState(format!("edge {e} has no edge point")))
    }

    /// Look up the edge between two points.
    pub fn edge_info(&self, a: usize, b: usize) -> Result<&EdgeInfo> {
        let edge = Edge::new(a, b);
        self.edge_index
            .get(&edge)
            .map(|&e| &self.edges[e])
            .ok_or(MeshError::MissingEdge {
                from: edge.first,
                to: edge.second,
            })
    }

    /// All edges, indexed by edge id.
    pub fn edges(&self) -> &[EdgeInfo] {
        &self.edges
    }

    /// All faces, indexed like the mesh faces.
    pub fn faces(&self) -> &[FaceInfo] {
        &self.faces
    }

    /// Mutable access to the faces, for memoizing texture coordinate indices.
    pub(crate) fn faces_mut(&mut self) -> &mut [FaceInfo] {
        &mut self.faces
    }

    /// All points, indexed like the mesh points.
    pub fn points(&self) -> &[PointInfo] {
        &self.points
    }

    /// Number of distinct edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{shapes, SymbolicPointArray};

    fn collect(mesh: &SymbolicPolygonMesh) -> (Topology, SubdividedPointArray) {
        let capacity = mesh.num_points() + mesh.num_faces() + mesh.num_edges_in_faces();
        let mut points = SubdividedPointArray::new(mesh.num_points(), capacity);
        let topology = Topology::collect(mesh, &mut points).unwrap();
        (topology, points)
    }

    #[test]
    fn test_edge_is_canonical() {
        assert_eq!(Edge::new(5, 2), Edge::new(2, 5));
        assert_eq!(Edge::new(5, 2).first(), 2);
        assert_eq!(Edge::new(5, 2).second(), 5);
        assert!(Edge::new(5, 2).contains(5));
        assert!(!Edge::new(5, 2).contains(3));
    }

    #[test]
    fn test_closed_cube_has_no_boundary() {
        let mesh = shapes::cube();
        let (topology, points) = collect(&mesh);

        assert_eq!(topology.num_edges(), 12);
        assert!(topology.edges().iter().all(|e| !e.is_boundary()));
        assert!(topology.edges().iter().all(|e| e.faces.len() == 2));
        for info in topology.points() {
            assert!(!info.is_boundary());
            assert!(info.has_internal_edge());
            assert_eq!(info.valence(), 3);
            assert_eq!(info.edges.len(), 3);
        }
        // 6 face points + 12 edge points, control points come later
        assert_eq!(points.num_points(), 18);
    }

    #[test]
    fn test_single_quad_is_all_boundary() {
        let mesh = shapes::quad();
        let (topology, _) = collect(&mesh);

        assert_eq!(topology.num_edges(), 4);
        assert!(topology.edges().iter().all(EdgeInfo::is_boundary));
        for info in topology.points() {
            assert!(info.is_boundary());
            assert!(!info.has_internal_edge());
            assert_eq!(info.valence(), 1);
            assert_eq!(info.edges.len(), 2);
        }
    }

    #[test]
    fn test_face_edges_follow_corners() {
        let mesh = shapes::quad();
        let (topology, _) = collect(&mesh);
        let face = &topology.faces()[0];

        assert_eq!(face.arity(), 4);
        // edges[i] joins corner i - 1 to corner i
        assert_eq!(topology.edges()[face.edges[0]].edge, Edge::new(3, 0));
        assert_eq!(topology.edges()[face.edges[1]].edge, Edge::new(0, 1));
        assert_eq!(face.edge_tex_coords[1], [0.5, 0.0]);
        assert_eq!(face.tex_coord, [0.5, 0.5]);
    }

    #[test]
    fn test_points_are_allocated_faces_first() {
        let mesh = shapes::plane(2, 1).unwrap();
        let (topology, points) = collect(&mesh);

        assert_eq!(topology.face_point(0).unwrap(), 0);
        assert_eq!(topology.face_point(1).unwrap(), 1);
        assert_eq!(topology.num_edges(), 7);
        for e in 0..topology.num_edges() {
            assert_eq!(topology.edge_point(e).unwrap(), 2 + e);
        }

        let shared = topology.edge_info(1, 4).unwrap();
        assert!(!shared.is_boundary());
        let mask = points.mask(shared.edge_point.unwrap()).unwrap();
        assert_eq!(mask.same_level, vec![(0, 0.25), (1, 0.25)]);

        let border = topology.edge_info(0, 1).unwrap();
        assert!(border.is_boundary());
        let mask = points.mask(border.edge_point.unwrap()).unwrap();
        assert_eq!(mask.control, vec![(0, 0.5), (1, 0.5)]);
        assert!(mask.same_level.is_empty());
    }

    #[test]
    fn test_degenerate_face_is_skipped() {
        let mesh = SymbolicPolygonMesh::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0],
            vec![vec![0, 0, 1, 0]],
            vec![],
        )
        .unwrap();
        let (topology, points) = collect(&mesh);

        assert_eq!(topology.num_edges(), 0);
        assert_eq!(topology.faces()[0].arity(), 0);
        assert!(topology.face_point(0).is_err());
        assert!(topology.points().iter().all(|p| p.edges.is_empty() && p.faces.is_empty()));
        assert_eq!(points.num_points(), 0);
    }

    #[test]
    fn test_missing_edge() {
        let (topology, _) = collect(&shapes::quad());
        assert_eq!(
            topology.edge_info(2, 0).unwrap_err(),
            MeshError::MissingEdge { from: 0, to: 2 }
        );
    }
}
