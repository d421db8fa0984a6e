//! Catmull-Clark subdivision of polygon meshes.
//!
//! Catmull-Clark subdivision (Catmull & Clark, 1978) is an approximating
//! scheme for meshes of arbitrary polygons. Each pass:
//!
//! 1. Creates a face point at each face centroid
//! 2. Creates an edge point per edge, averaging its endpoints with the
//!    adjacent face points (or taking the midpoint on a boundary)
//! 3. Moves each original vertex to a weighted average of its neighbors
//! 4. Splits every face of arity `n` into `n` quads
//!
//! The subdivision here is *symbolic*: instead of storing the new positions
//! only, every new point keeps its weights over the coarser level. When the
//! coarse points move, [`SymbolicPolygonMesh::update`](crate::mesh::SymbolicPolygonMesh::update) (or
//! [`SubdivisionMesh::update`] across several levels) recomputes the fine
//! points without rebuilding the topology.
//!
//! # Vertex Rules
//!
//! - **Face point**: centroid of the face corners
//! - **Edge point**: midpoint on a boundary; otherwise the average of both
//!   endpoints and the adjacent face points
//! - **Interior vertex**: `(Q + 2R + (n-3)S) / n` where:
//!   - Q = average of adjacent face points
//!   - R = average of incident edge midpoints
//!   - S = original position
//!   - n = valence
//! - **Boundary vertex**: `S/2 + (E1 + E2)/4` over the boundary edge points,
//!   or `S` for corners under [`BoundaryMode::CreaseAll`]
//!
//! # Example
//!
//! ```
//! use symsubdiv::algo::subdivide::{SubdivideOptions, SubdivisionMesh};
//! use symsubdiv::mesh::{shapes, SymbolicPointArray};
//!
//! let options = SubdivideOptions::new(2);
//! let mut mesh = SubdivisionMesh::new(shapes::cube(), &options).unwrap();
//! assert_eq!(mesh.finest().num_faces(), 96);
//!
//! // Move one control point and refresh every level
//! let mut points = mesh.original().points().data().to_vec();
//! points[0] -= 0.5;
//! mesh.set_points(points).unwrap();
//! ```
//!
//! # References
//!
//! - Catmull, E. & Clark, J. (1978). "Recursively generated B-spline surfaces
//!   on arbitrary topological meshes." Computer-Aided Design, 10(6), 350-355.

mod builder;
mod hierarchy;
mod topology;

pub use builder::{subdivide, SymbolicSubdivisionBuilder};
pub use hierarchy::SubdivisionMesh;
pub use topology::{Edge, EdgeInfo, FaceInfo, PointInfo, Topology};

/// Deepest supported subdivision level.
///
/// Every level multiplies the face count by four, so a cube at this depth
/// already has 393 216 faces.
pub const MAX_LEVELS: usize = 8;

/// How mesh boundaries are treated when placing control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoundaryMode {
    /// Boundary edges are creased; boundary vertices slide along them.
    #[default]
    CreaseEdges,
    /// Boundary edges are creased and boundary corners (vertices without an
    /// internal edge) stay where they are.
    CreaseAll,
}

/// How texture coordinates on the mesh border are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MapBorderMode {
    /// Border texture coordinates are copied unchanged.
    #[default]
    NotSmooth,
    /// Border texture coordinates are smoothed, except at corners.
    SmoothInternal,
    /// All border texture coordinates are smoothed.
    SmoothAll,
}

/// Options for subdivision.
#[derive(Debug, Clone)]
pub struct SubdivideOptions {
    /// Number of subdivision levels.
    pub levels: usize,

    /// Boundary handling for point positions.
    pub boundary_mode: BoundaryMode,

    /// Border handling for texture coordinates.
    pub map_border_mode: MapBorderMode,
}

impl Default for SubdivideOptions {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SubdivideOptions {
    /// Create options with the specified number of levels.
    pub fn new(levels: usize) -> Self {
        Self {
            levels,
            boundary_mode: BoundaryMode::default(),
            map_border_mode: MapBorderMode::default(),
        }
    }

    /// Set the boundary mode.
    pub fn with_boundary_mode(mut self, mode: BoundaryMode) -> Self {
        self.boundary_mode = mode;
        self
    }

    /// Set the map border mode.
    pub fn with_map_border_mode(mut self, mode: MapBorderMode) -> Self {
        self.map_border_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = SubdivideOptions::new(3)
            .with_boundary_mode(BoundaryMode::CreaseAll)
            .with_map_border_mode(MapBorderMode::SmoothAll);
        assert_eq!(options.levels, 3);
        assert_eq!(options.boundary_mode, BoundaryMode::CreaseAll);
        assert_eq!(options.map_border_mode, MapBorderMode::SmoothAll);

        let defaults = SubdivideOptions::default();
        assert_eq!(defaults.levels, 1);
        assert_eq!(defaults.boundary_mode, BoundaryMode::CreaseEdges);
        assert_eq!(defaults.map_border_mode, MapBorderMode::NotSmooth);
    }
}
