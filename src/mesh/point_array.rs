//! Flat point buffers for symbolic meshes.
//!
//! Points are stored as contiguous `x, y, z` triples rather than as point
//! objects. A buffer is either *original* (fixed source data) or
//! *subdivided*: every point of a subdivided array is a weighted sum of
//! points from the previous level (control sources) and of points earlier
//! in the same array (same-level sources).
//!
//! # Evaluation Order
//!
//! [`SubdividedPointArray::update`] walks the points in ascending index
//! order and reads same-level sources from the buffer being written. A
//! same-level source must therefore have a smaller index than the point
//! that reads it. The `add_*` methods reject masks that break this.

use nalgebra::Point3;

use crate::error::{MeshError, Result};

/// Common interface of original and subdivided point arrays.
pub trait SymbolicPointArray {
    /// Number of points in the array.
    fn num_points(&self) -> usize;

    /// The flat `x, y, z` buffer, `3 * num_points()` long.
    fn data(&self) -> &[f32];

    /// Whether the array holds source data rather than derived points.
    fn is_original(&self) -> bool;

    /// Position of point `i`, or `None` if out of range.
    fn point(&self, i: usize) -> Option<Point3<f32>> {
        let data = self.data();
        data.get(i * 3..i * 3 + 3)
            .map(|p| Point3::new(p[0], p[1], p[2]))
    }
}

/// Point positions supplied from outside the subdivision pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct OriginalPointArray {
    pub(super) data: Vec<f32>,
}

impl OriginalPointArray {
    /// Wrap a flat `x, y, z` buffer.
    pub fn new(data: Vec<f32>) -> Result<Self> {
        MeshError::check_stride("points", data.len(), 3)?;
        Ok(Self { data })
    }

    /// Build from a slice of points.
    pub fn from_points(points: &[Point3<f32>]) -> Self {
        let data = points.iter().flat_map(|p| [p.x, p.y, p.z]).collect();
        Self { data }
    }
}

impl SymbolicPointArray for OriginalPointArray {
    fn num_points(&self) -> usize {
        self.data.len() / 3
    }

    fn data(&self) -> &[f32] {
        &self.data
    }

    fn is_original(&self) -> bool {
        true
    }
}

/// Weighted sources of one subdivided point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointMask {
    /// `(index, weight)` pairs into the previous level.
    pub control: Vec<(usize, f32)>,
    /// `(index, weight)` pairs into the same array.
    pub same_level: Vec<(usize, f32)>,
}

impl PointMask {
    /// Sum of all weights in the mask.
    pub fn total_weight(&self) -> f32 {
        self.control
            .iter()
            .chain(&self.same_level)
            .map(|&(_, w)| w)
            .sum()
    }
}

/// Points derived from a coarser level by Catmull-Clark masks.
#[derive(Debug, Clone, PartialEq)]
pub struct SubdividedPointArray {
    data: Vec<f32>,
    masks: Vec<PointMask>,
    num_control_points: usize,
}

impl SubdividedPointArray {
    /// Create an empty array whose control sources live in a level of
    /// `num_control_points` points. `capacity` is a hint for the number of
    /// points that will be added.
    pub fn new(num_control_points: usize, capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity * 3),
            masks: Vec::with_capacity(capacity),
            num_control_points,
        }
    }

    /// Number of points in the level this array is derived from.
    pub fn num_control_points(&self) -> usize {
        self.num_control_points
    }

    /// The mask of point `i`.
    pub fn mask(&self, i: usize) -> Option<&PointMask> {
        self.masks.get(i)
    }

    /// All masks, in evaluation order.
    pub fn masks(&self) -> &[PointMask] {
        &self.masks
    }

    /// Add a face point: the centroid of the face corners.
    pub fn add_face_point(&mut self, corners: &[usize]) -> Result<usize> {
        if corners.is_empty() {
            return Err(MeshError::invalid_param(
                "corners",
                0,
                "a face point needs at least one corner",
            ));
        }
        let w = 1.0 / corners.len() as f32;
        let control = corners.iter().map(|&c| (c, w)).collect();
        self.add_point(PointMask {
            control,
            same_level: Vec::new(),
        })
    }

    /// Add an edge point.
    ///
    /// With no adjacent face points this is the edge midpoint. Otherwise the
    /// two endpoints and the face points are averaged with equal weights.
    pub fn add_edge_point(&mut self, from: usize, to: usize, face_points: &[usize]) -> Result<usize> {
        if face_points.is_empty() {
            return self.add_point(PointMask {
                control: vec![(from, 0.5), (to, 0.5)],
                same_level: Vec::new(),
            });
        }
        let w = 1.0 / (face_points.len() + 2) as f32;
        self.add_point(PointMask {
            control: vec![(from, w), (to, w)],
            same_level: face_points.iter().map(|&f| (f, w)).collect(),
        })
    }

    /// Add a control (vertex) point with an explicit mask.
    pub fn add_control_point(
        &mut self,
        control: Vec<(usize, f32)>,
        same_level: Vec<(usize, f32)>,
    ) -> Result<usize> {
        self.add_point(PointMask {
            control,
            same_level,
        })
    }

    fn add_point(&mut self, mask: PointMask) -> Result<usize> {
        let index = self.masks.len();
        if let Some(&(source_index, _)) = mask.same_level.iter().find(|&&(s, _)| s >= index) {
            return Err(MeshError::ForwardReference {
                point: index,
                source_index,
            });
        }
        if let Some(&(source_index, _)) = mask
            .control
            .iter()
            .find(|&&(c, _)| c >= self.num_control_points)
        {
            return Err(MeshError::InvalidControlIndex {
                point: index,
                source_index,
                num_control_points: self.num_control_points,
            });
        }
        self.masks.push(mask);
        self.data.extend_from_slice(&[0.0; 3]);
        Ok(index)
    }

    /// Recompute every point from the control level's flat buffer.
    ///
    /// Calling this repeatedly with the same control data yields identical
    /// output.
    pub fn update(&mut self, control: &[f32]) -> Result<()> {
        MeshError::check_stride("control points", control.len(), 3)?;
        if control.len() / 3 != self.num_control_points {
            return Err(MeshError::ControlPointMismatch {
                expected: self.num_control_points,
                actual: control.len() / 3,
            });
        }

        let Self { data, masks, .. } = self;
        for (i, mask) in masks.iter().enumerate() {
            let mut acc = [0.0f64; 3];
            for &(c, w) in &mask.control {
                for (k, a) in acc.iter_mut().enumerate() {
                    *a += f64::from(w) * f64::from(control[c * 3 + k]);
                }
            }
            for &(s, w) in &mask.same_level {
                for (k, a) in acc.iter_mut().enumerate() {
                    *a += f64::from(w) * f64::from(data[s * 3 + k]);
                }
            }
            for (k, a) in acc.iter().enumerate() {
                data[i * 3 + k] = *a as f32;
            }
        }
        Ok(())
    }
}

impl SymbolicPointArray for SubdividedPointArray {
    fn num_points(&self) -> usize {
        self.masks.len()
    }

    fn data(&self) -> &[f32] {
        &self.data
    }

    fn is_original(&self) -> bool {
        false
    }
}

/// Either kind of point array, as owned by a mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum PointArray {
    /// Source data.
    Original(OriginalPointArray),
    /// Points derived from a coarser level.
    Subdivided(SubdividedPointArray),
}

impl PointArray {
    /// Recompute derived points from `control`. A no-op for original data.
    pub fn update(&mut self, control: &[f32]) -> Result<()> {
        match self {
            PointArray::Original(_) => Ok(()),
            PointArray::Subdivided(points) => points.update(control),
        }
    }

    /// The subdivided array, if this is one.
    pub fn as_subdivided(&self) -> Option<&SubdividedPointArray> {
        match self {
            PointArray::Original(_) => None,
            PointArray::Subdivided(points) => Some(points),
        }
    }
}

impl SymbolicPointArray for PointArray {
    fn num_points(&self) -> usize {
        match self {
            PointArray::Original(points) => points.num_points(),
            PointArray::Subdivided(points) => points.num_points(),
        }
    }

    fn data(&self) -> &[f32] {
        match self {
            PointArray::Original(points) => points.data(),
            PointArray::Subdivided(points) => points.data(),
        }
    }

    fn is_original(&self) -> bool {
        matches!(self, PointArray::Original(_))
    }
}

impl From<OriginalPointArray> for PointArray {
    fn from(points: OriginalPointArray) -> Self {
        PointArray::Original(points)
    }
}

impl From<SubdividedPointArray> for PointArray {
    fn from(points: SubdividedPointArray) -> Self {
        PointArray::Subdivided(points)
    }
}
