//! # symsubdiv
//!
//! Symbolic Catmull-Clark subdivision surfaces for polygon meshes.
//!
//! A subdivided mesh keeps, for every new point, the weights that produce it
//! from the coarser level. Moving the coarse control points and calling
//! `update` refreshes the fine mesh without recomputing its topology, which
//! makes the crate suitable for interactive editing of subdivision surfaces.
//!
//! ## Features
//!
//! - **Arbitrary polygons**: faces of any arity, split into one quad per corner
//! - **Boundary creasing**: boundary edges and, optionally, corners are kept sharp
//! - **Texture coordinates**: re-mapped per corner, with optional border smoothing
//! - **Flat buffers**: points and texture coordinates live in contiguous `f32` arrays
//!
//! ## Quick Start
//!
//! ```
//! use symsubdiv::prelude::*;
//!
//! let points = vec![
//!     0.0, 0.0, 0.0,
//!     1.0, 0.0, 0.0,
//!     1.0, 1.0, 0.0,
//!     0.0, 1.0, 0.0,
//! ];
//! let tex_coords = vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
//! let faces = vec![vec![0, 0, 1, 1, 2, 2, 3, 3]];
//! let quad = SymbolicPolygonMesh::new(points, tex_coords, faces, vec![]).unwrap();
//!
//! let fine = subdivide(&quad, BoundaryMode::CreaseEdges, MapBorderMode::NotSmooth).unwrap();
//! assert_eq!(fine.num_faces(), 4);
//! assert_eq!(fine.num_points(), 9);
//! ```
//!
//! ## Live Editing
//!
//! ```
//! use symsubdiv::prelude::*;
//! use symsubdiv::mesh::shapes;
//!
//! let mut mesh = SubdivisionMesh::new(shapes::plane(4, 4).unwrap(), &SubdivideOptions::new(2)).unwrap();
//!
//! // Lift the center control point; every level follows
//! let mut points = mesh.original().points().data().to_vec();
//! points[12 * 3 + 2] = 1.0;
//! mesh.set_points(points).unwrap();
//!
//! let triangles = mesh.to_triangle_mesh();
//! assert_eq!(triangles.num_triangles(), 16 * 16 * 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use symsubdiv::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::subdivide::{
        subdivide, BoundaryMode, MapBorderMode, SubdivideOptions, SubdivisionMesh,
        SymbolicSubdivisionBuilder,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        OriginalPointArray, PointArray, SubdividedPointArray, SymbolicPointArray,
        SymbolicPolygonMesh, TriangleMesh,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
