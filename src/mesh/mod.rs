//! Core mesh data structures.
//!
//! This module provides the symbolic polygon mesh consumed and produced by
//! subdivision, and the point arrays that back it.
//!
//! # Overview
//!
//! The primary type is [`SymbolicPolygonMesh`]: a flat point buffer, a flat
//! texture coordinate buffer, faces of arbitrary arity and per-face
//! smoothing groups. Its points live in a [`PointArray`], which is either
//! an [`OriginalPointArray`] holding source data or a
//! [`SubdividedPointArray`] recomputed from a coarser level.
//!
//! # Face Layout
//!
//! A face is a `Vec<usize>` alternating point index and texture coordinate
//! index:
//!
//! ```
//! use symsubdiv::mesh::SymbolicPolygonMesh;
//!
//! let points = vec![
//!     0.0, 0.0, 0.0,
//!     1.0, 0.0, 0.0,
//!     1.0, 1.0, 0.0,
//!     0.0, 1.0, 0.0,
//! ];
//! let tex_coords = vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
//! // (point 0, uv 0), (point 1, uv 1), ...
//! let faces = vec![vec![0, 0, 1, 1, 2, 2, 3, 3]];
//!
//! let mesh = SymbolicPolygonMesh::new(points, tex_coords, faces, vec![]).unwrap();
//! assert_eq!(mesh.num_points(), 4);
//! ```

mod point_array;
mod polygon_mesh;
pub mod shapes;
mod triangulate;

pub use point_array::{
    OriginalPointArray, PointArray, PointMask, SubdividedPointArray, SymbolicPointArray,
};
pub use polygon_mesh::SymbolicPolygonMesh;
pub use triangulate::TriangleMesh;
