//! Error types for symsubdiv.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building or subdividing meshes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// A flat buffer does not hold a whole number of elements.
    #[error("{buffer} buffer has length {len}, which is not a multiple of {stride}")]
    InvalidBufferLength {
        /// Which buffer is malformed.
        buffer: &'static str,
        /// Actual buffer length.
        len: usize,
        /// Number of scalars per element.
        stride: usize,
    },

    /// A face does not alternate point and texture coordinate indices.
    #[error("face {face} has odd length {len}")]
    OddFaceLength {
        /// The face index.
        face: usize,
        /// The face array length.
        len: usize,
    },

    /// A face references a point that does not exist.
    #[error("face {face} references invalid point index {point}")]
    InvalidPointIndex {
        /// The face index.
        face: usize,
        /// The invalid point index.
        point: usize,
    },

    /// A face references a texture coordinate that does not exist.
    #[error("face {face} references invalid texture coordinate index {tex_coord}")]
    InvalidTexCoordIndex {
        /// The face index.
        face: usize,
        /// The invalid texture coordinate index.
        tex_coord: usize,
    },

    /// The number of smoothing groups does not match the number of faces.
    #[error("expected {faces} smoothing groups, got {groups}")]
    SmoothingGroupMismatch {
        /// Number of faces.
        faces: usize,
        /// Number of smoothing groups supplied.
        groups: usize,
    },

    /// An edge referenced by a face was never registered in the topology.
    #[error("edge ({from}, {to}) is missing from the mesh topology")]
    MissingEdge {
        /// Smaller endpoint.
        from: usize,
        /// Larger endpoint.
        to: usize,
    },

    /// A point mask reads a same-level point that is not computed before it.
    #[error("point {point} reads same-level point {source_index}, which is not computed before it")]
    ForwardReference {
        /// Index of the point being added.
        point: usize,
        /// Offending same-level source index.
        source_index: usize,
    },

    /// A control source index is outside the previous level.
    #[error("point {point} reads control point {source_index}, but the control level has {num_control_points} points")]
    InvalidControlIndex {
        /// Index of the point being added.
        point: usize,
        /// Offending control source index.
        source_index: usize,
        /// Number of points in the control level.
        num_control_points: usize,
    },

    /// The control buffer passed to an update has the wrong size.
    #[error("expected {expected} control points, got {actual}")]
    ControlPointMismatch {
        /// Number of control points the masks were built against.
        expected: usize,
        /// Number of points supplied.
        actual: usize,
    },

    /// Invalid mesh state for the requested operation.
    #[error("invalid mesh state: {0}")]
    InvalidState(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Check that a flat buffer holds whole elements of `stride` scalars.
    pub(crate) fn check_stride(buffer: &'static str, len: usize, stride: usize) -> Result<()> {
        if len % stride == 0 {
            Ok(())
        } else {
            Err(MeshError::InvalidBufferLength {
                buffer,
                len,
                stride,
            })
        }
    }
}
