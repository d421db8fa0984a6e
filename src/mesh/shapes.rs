//! Procedural meshes.
//!
//! Small parametric shapes for tests, benchmarks and the command-line tool.

use std::f32::consts::TAU;

use super::point_array::OriginalPointArray;
use super::polygon_mesh::SymbolicPolygonMesh;
use crate::error::{MeshError, Result};

/// A unit quad in the XY plane with UVs covering `[0, 1]²`.
pub fn quad() -> SymbolicPolygonMesh {
    let points = vec![
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        1.0, 1.0, 0.0, //
        0.0, 1.0, 0.0,
    ];
    let tex_coords = vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
    let faces = vec![vec![0, 0, 1, 1, 2, 2, 3, 3]];
    SymbolicPolygonMesh::from_parts(
        OriginalPointArray { data: points }.into(),
        tex_coords,
        faces,
        vec![0],
    )
}

/// A single regular polygon with `n` corners on the unit circle.
pub fn polygon(n: usize) -> Result<SymbolicPolygonMesh> {
    if n < 3 {
        return Err(MeshError::invalid_param("n", n, "a polygon needs at least 3 corners"));
    }
    let mut points = Vec::with_capacity(n * 3);
    let mut tex_coords = Vec::with_capacity(n * 2);
    let mut face = Vec::with_capacity(n * 2);
    for i in 0..n {
        let (sin, cos) = (TAU * i as f32 / n as f32).sin_cos();
        points.extend_from_slice(&[cos, sin, 0.0]);
        tex_coords.extend_from_slice(&[0.5 + 0.5 * cos, 0.5 + 0.5 * sin]);
        face.extend_from_slice(&[i, i]);
    }
    Ok(SymbolicPolygonMesh::from_parts(
        OriginalPointArray { data: points }.into(),
        tex_coords,
        vec![face],
        vec![0],
    ))
}

/// An open `nx` by `ny` grid of quads over `[0, 1]²`, UVs matching XY.
pub fn plane(nx: usize, ny: usize) -> Result<SymbolicPolygonMesh> {
    if nx == 0 || ny == 0 {
        return Err(MeshError::invalid_param(
            "resolution",
            format!("{nx}x{ny}"),
            "a plane needs at least one quad in each direction",
        ));
    }
    let mut points = Vec::with_capacity((nx + 1) * (ny + 1) * 3);
    let mut tex_coords = Vec::with_capacity((nx + 1) * (ny + 1) * 2);
    for j in 0..=ny {
        for i in 0..=nx {
            let u = i as f32 / nx as f32;
            let v = j as f32 / ny as f32;
            points.extend_from_slice(&[u, v, 0.0]);
            tex_coords.extend_from_slice(&[u, v]);
        }
    }

    let mut faces = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            let v00 = j * (nx + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (nx + 1);
            let v11 = v01 + 1;
            faces.push(vec![v00, v00, v10, v10, v11, v11, v01, v01]);
        }
    }

    let groups = vec![0; faces.len()];
    Ok(SymbolicPolygonMesh::from_parts(
        OriginalPointArray { data: points }.into(),
        tex_coords,
        faces,
        groups,
    ))
}

/// A closed unit cube of six quads. Each face maps the full texture and
/// has its own smoothing group.
pub fn cube() -> SymbolicPolygonMesh {
    let points = vec![
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        1.0, 1.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.0, 0.0, 1.0, //
        1.0, 0.0, 1.0, //
        1.0, 1.0, 1.0, //
        0.0, 1.0, 1.0,
    ];
    let tex_coords = vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
    let quads: [[usize; 4]; 6] = [
        [0, 3, 2, 1], // bottom
        [4, 5, 6, 7], // top
        [0, 1, 5, 4], // front
        [2, 3, 7, 6], // back
        [0, 4, 7, 3], // left
        [1, 2, 6, 5], // right
    ];
    let faces = quads
        .iter()
        .map(|q| q.iter().enumerate().flat_map(|(t, &p)| [p, t]).collect())
        .collect();
    let groups = (0..6u32).map(|f| 1 << f).collect();
    SymbolicPolygonMesh::from_parts(
        OriginalPointArray { data: points }.into(),
        tex_coords,
        faces,
        groups,
    )
}
