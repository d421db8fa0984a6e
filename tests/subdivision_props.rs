//! Property-based tests for symbolic subdivision
//!
//! These tests generate random grids, polygons and control point edits and
//! verify the counting and weighting invariants of Catmull-Clark subdivision.

use proptest::prelude::*;
use symsubdiv::mesh::shapes;
use symsubdiv::prelude::*;

// ============================================================================
// Generators
// ============================================================================

fn boundary_mode_strategy() -> impl Strategy<Value = BoundaryMode> {
    prop_oneof![Just(BoundaryMode::CreaseEdges), Just(BoundaryMode::CreaseAll)]
}

fn map_border_mode_strategy() -> impl Strategy<Value = MapBorderMode> {
    prop_oneof![
        Just(MapBorderMode::NotSmooth),
        Just(MapBorderMode::SmoothInternal),
        Just(MapBorderMode::SmoothAll),
    ]
}

/// Finite coordinates in a modest range so f32 error stays small
fn coord_strategy() -> impl Strategy<Value = f32> {
    -10.0f32..10.0
}

fn offset_strategy() -> impl Strategy<Value = [f32; 3]> {
    (coord_strategy(), coord_strategy(), coord_strategy()).prop_map(|(x, y, z)| [x, y, z])
}

fn assert_close(a: &[f32], b: &[f32], tolerance: f32) -> std::result::Result<(), TestCaseError> {
    prop_assert_eq!(a.len(), b.len());
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        prop_assert!(
            (x - y).abs() <= tolerance,
            "component {} differs: {} vs {}",
            i,
            x,
            y
        );
    }
    Ok(())
}

// ============================================================================
// Counting
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// One level over a grid yields V + E + F points and four quads per quad
    #[test]
    fn prop_plane_counts(
        nx in 1usize..8,
        ny in 1usize..8,
        boundary_mode in boundary_mode_strategy(),
        map_border_mode in map_border_mode_strategy(),
    ) {
        let mesh = shapes::plane(nx, ny).unwrap();
        let fine = subdivide(&mesh, boundary_mode, map_border_mode).unwrap();

        let v = (nx + 1) * (ny + 1);
        let e = nx * (ny + 1) + ny * (nx + 1);
        let f = nx * ny;
        prop_assert_eq!(fine.num_points(), v + e + f);
        prop_assert_eq!(fine.num_faces(), 4 * f);
        prop_assert!(fine.faces().iter().all(|face| face.len() == 8));
    }

    /// A single n-gon splits into n quads around one face point
    #[test]
    fn prop_polygon_counts(n in 3usize..16) {
        let mesh = shapes::polygon(n).unwrap();
        let fine = subdivide(&mesh, BoundaryMode::CreaseEdges, MapBorderMode::SmoothAll).unwrap();

        prop_assert_eq!(fine.num_faces(), n);
        prop_assert_eq!(fine.num_points(), 2 * n + 1);
        prop_assert_eq!(fine.to_triangle_mesh().num_triangles(), 2 * n);
    }
}

// ============================================================================
// Weights
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every mask is an affine combination
    #[test]
    fn prop_masks_sum_to_one(
        nx in 1usize..6,
        ny in 1usize..6,
        boundary_mode in boundary_mode_strategy(),
    ) {
        let mesh = shapes::plane(nx, ny).unwrap();
        let fine = subdivide(&mesh, boundary_mode, MapBorderMode::NotSmooth).unwrap();
        let points = fine.points().as_subdivided().unwrap();

        for (i, mask) in points.masks().iter().enumerate() {
            prop_assert!(
                (mask.total_weight() - 1.0).abs() < 1e-5,
                "mask {} sums to {}",
                i,
                mask.total_weight()
            );
        }
    }

    /// Translating the control mesh translates every subdivided point
    #[test]
    fn prop_translation_invariance(
        offset in offset_strategy(),
        levels in 1usize..3,
        boundary_mode in boundary_mode_strategy(),
    ) {
        let options = SubdivideOptions::new(levels).with_boundary_mode(boundary_mode);
        let mut mesh = SubdivisionMesh::new(shapes::cube(), &options).unwrap();
        let before = mesh.finest().points().data().to_vec();

        let moved: Vec<f32> = mesh
            .original()
            .points()
            .data()
            .chunks_exact(3)
            .flat_map(|p| [p[0] + offset[0], p[1] + offset[1], p[2] + offset[2]])
            .collect();
        mesh.set_points(moved).unwrap();

        let expected: Vec<f32> = before
            .chunks_exact(3)
            .flat_map(|p| [p[0] + offset[0], p[1] + offset[1], p[2] + offset[2]])
            .collect();
        assert_close(mesh.finest().points().data(), &expected, 1e-3)?;
    }
}

// ============================================================================
// Live editing
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Editing then updating gives the same points as subdividing from scratch
    #[test]
    fn prop_set_points_matches_rebuild(
        heights in prop::collection::vec(coord_strategy(), 16),
        boundary_mode in boundary_mode_strategy(),
    ) {
        let options = SubdivideOptions::new(2).with_boundary_mode(boundary_mode);
        let mut mesh = SubdivisionMesh::new(shapes::plane(3, 3).unwrap(), &options).unwrap();

        let mut moved = mesh.original().points().data().to_vec();
        for (p, h) in moved.chunks_exact_mut(3).zip(&heights) {
            p[2] = *h;
        }
        mesh.set_points(moved.clone()).unwrap();

        let mut base = shapes::plane(3, 3).unwrap();
        base.replace_original_points(moved).unwrap();
        let rebuilt = SubdivisionMesh::new(base, &options).unwrap();

        prop_assert_eq!(mesh.finest().points().data(), rebuilt.finest().points().data());
    }

    /// Repeated updates without edits leave the points unchanged
    #[test]
    fn prop_update_is_idempotent(nx in 1usize..5, ny in 1usize..5) {
        let mut mesh =
            SubdivisionMesh::new(shapes::plane(nx, ny).unwrap(), &SubdivideOptions::new(2)).unwrap();
        let before = mesh.finest().points().data().to_vec();
        mesh.update().unwrap();
        prop_assert_eq!(before.as_slice(), mesh.finest().points().data());
    }
}
