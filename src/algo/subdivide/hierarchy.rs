//! A chain of subdivision levels over one control mesh.

use crate::algo::Progress;
use crate::error::{MeshError, Result};
use crate::mesh::{SymbolicPointArray, SymbolicPolygonMesh, TriangleMesh};

use super::{subdivide, BoundaryMode, MapBorderMode, SubdivideOptions, MAX_LEVELS};

/// A control mesh together with its subdivided levels.
///
/// Level 0 is the control mesh; level `k + 1` is derived from level `k`.
/// Editing the control points and calling [`update`](Self::update)
/// refreshes every level without rebuilding any topology.
#[derive(Debug, Clone)]
pub struct SubdivisionMesh {
    levels: Vec<SymbolicPolygonMesh>,
    boundary_mode: BoundaryMode,
    map_border_mode: MapBorderMode,
}

impl SubdivisionMesh {
    /// Subdivide `original` `options.levels` times.
    ///
    /// Fails with [`MeshError::InvalidParameter`] when `options.levels`
    /// exceeds [`MAX_LEVELS`].
    pub fn new(original: SymbolicPolygonMesh, options: &SubdivideOptions) -> Result<Self> {
        Self::with_progress(original, options, &Progress::none())
    }

    /// Subdivide with progress reporting, one step per level.
    pub fn with_progress(
        original: SymbolicPolygonMesh,
        options: &SubdivideOptions,
        progress: &Progress,
    ) -> Result<Self> {
        let mut mesh = Self {
            levels: vec![original],
            boundary_mode: options.boundary_mode,
            map_border_mode: options.map_border_mode,
        };
        mesh.extend_to(options.levels, progress)?;
        Ok(mesh)
    }

    fn extend_to(&mut self, level: usize, progress: &Progress) -> Result<()> {
        if level > MAX_LEVELS {
            return Err(MeshError::invalid_param(
                "levels",
                level,
                "exceeds the maximum subdivision depth",
            ));
        }
        let start = self.subdivision_level();
        if level <= start {
            return Ok(());
        }
        let total = level - start;
        for step in 0..total {
            progress.level_started(step, total, start + step + 1);
            let next = subdivide(self.finest(), self.boundary_mode, self.map_border_mode)?;
            self.levels.push(next);
        }
        progress.finished(total);
        Ok(())
    }

    /// Number of subdivided levels on top of the control mesh.
    pub fn subdivision_level(&self) -> usize {
        self.levels.len() - 1
    }

    /// Drop finer levels or build missing ones.
    pub fn set_subdivision_level(&mut self, level: usize) -> Result<()> {
        if level < self.subdivision_level() {
            self.levels.truncate(level + 1);
            Ok(())
        } else {
            self.extend_to(level, &Progress::none())
        }
    }

    /// Boundary mode used for every level.
    pub fn boundary_mode(&self) -> BoundaryMode {
        self.boundary_mode
    }

    /// Map border mode used for every level.
    pub fn map_border_mode(&self) -> MapBorderMode {
        self.map_border_mode
    }

    /// The control mesh.
    pub fn original(&self) -> &SymbolicPolygonMesh {
        &self.levels[0]
    }

    /// Level `k`, where 0 is the control mesh.
    pub fn level(&self, k: usize) -> Option<&SymbolicPolygonMesh> {
        self.levels.get(k)
    }

    /// The finest level.
    pub fn finest(&self) -> &SymbolicPolygonMesh {
        &self.levels[self.levels.len() - 1]
    }

    /// Replace the control points and refresh every level.
    pub fn set_points(&mut self, data: Vec<f32>) -> Result<()> {
        self.levels[0].replace_original_points(data)?;
        self.update()
    }

    /// Recompute every level from the one below it, coarsest first.
    pub fn update(&mut self) -> Result<()> {
        for k in 1..self.levels.len() {
            let (coarse, fine) = self.levels.split_at_mut(k);
            fine[0].update(coarse[k - 1].points().data())?;
        }
        Ok(())
    }

    /// Fan-triangulate the finest level.
    pub fn to_triangle_mesh(&self) -> TriangleMesh {
        self.finest().to_triangle_mesh()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::mesh::shapes;

    #[test]
    fn test_levels() {
        let mesh = SubdivisionMesh::new(shapes::cube(), &SubdivideOptions::new(2)).unwrap();
        assert_eq!(mesh.subdivision_level(), 2);
        assert_eq!(mesh.original().num_faces(), 6);
        assert_eq!(mesh.level(1).unwrap().num_faces(), 24);
        assert_eq!(mesh.finest().num_faces(), 96);
        assert!(mesh.level(3).is_none());
        // V + E + F on the first level
        assert_eq!(mesh.level(1).unwrap().num_points(), 26);
    }

    #[test]
    fn test_zero_levels() {
        let mesh = SubdivisionMesh::new(shapes::quad(), &SubdivideOptions::new(0)).unwrap();
        assert_eq!(mesh.subdivision_level(), 0);
        assert_eq!(mesh.finest().num_faces(), 1);
        assert!(mesh.finest().points().is_original());
    }

    #[test]
    fn test_set_subdivision_level() {
        let mut mesh = SubdivisionMesh::new(shapes::quad(), &SubdivideOptions::new(1)).unwrap();
        mesh.set_subdivision_level(3).unwrap();
        assert_eq!(mesh.finest().num_faces(), 64);
        mesh.set_subdivision_level(1).unwrap();
        assert_eq!(mesh.finest().num_faces(), 4);
    }

    #[test]
    fn test_set_points_matches_rebuild() {
        let options = SubdivideOptions::new(2).with_boundary_mode(BoundaryMode::CreaseAll);
        let mut mesh = SubdivisionMesh::new(shapes::plane(2, 2).unwrap(), &options).unwrap();

        let mut moved = mesh.original().points().data().to_vec();
        moved[4 * 3 + 2] = 1.0; // lift the center
        mesh.set_points(moved.clone()).unwrap();

        let mut base = shapes::plane(2, 2).unwrap();
        base.replace_original_points(moved).unwrap();
        let rebuilt = SubdivisionMesh::new(base, &options).unwrap();

        assert_eq!(mesh.finest().points().data(), rebuilt.finest().points().data());
        assert!(mesh.finest().points().data().iter().any(|&c| c > 0.0));
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut mesh = SubdivisionMesh::new(shapes::cube(), &SubdivideOptions::new(2)).unwrap();
        let before = mesh.finest().points().data().to_vec();
        mesh.update().unwrap();
        mesh.update().unwrap();
        assert_eq!(before, mesh.finest().points().data());
    }

    #[test]
    fn test_set_points_rejects_wrong_size() {
        let mut mesh = SubdivisionMesh::new(shapes::quad(), &SubdivideOptions::new(1)).unwrap();
        assert!(matches!(
            mesh.set_points(vec![0.0; 9]),
            Err(MeshError::ControlPointMismatch { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn test_rejects_levels_above_cap() {
        let err = SubdivisionMesh::new(shapes::cube(), &SubdivideOptions::new(MAX_LEVELS + 7))
            .unwrap_err();
        assert!(matches!(
            err,
            MeshError::InvalidParameter { name: "levels", .. }
        ));

        let mut mesh = SubdivisionMesh::new(shapes::quad(), &SubdivideOptions::new(1)).unwrap();
        assert!(mesh.set_subdivision_level(MAX_LEVELS + 1).is_err());
        assert_eq!(mesh.subdivision_level(), 1);
    }

    #[test]
    fn test_progress_reports_each_level() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let progress = Progress::new(move |_, total, _| {
            assert_eq!(total, 3);
            counter.fetch_add(1, Ordering::Relaxed);
        });

        SubdivisionMesh::with_progress(shapes::quad(), &SubdivideOptions::new(3), &progress).unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 4);
    }

    #[test]
    fn test_triangle_output() {
        let mesh = SubdivisionMesh::new(shapes::cube(), &SubdivideOptions::new(1)).unwrap();
        let tris = mesh.to_triangle_mesh();
        assert_eq!(tris.num_triangles(), 48);
        assert_eq!(tris.points.len(), 26 * 3);
    }
}
