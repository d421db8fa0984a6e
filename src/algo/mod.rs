//! Mesh processing algorithms.
//!
//! - **Subdivision**: symbolic Catmull-Clark subdivision with boundary
//!   creasing and texture coordinate re-mapping

pub mod progress;
pub mod subdivide;

pub use progress::Progress;
