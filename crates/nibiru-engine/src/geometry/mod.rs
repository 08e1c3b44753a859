//! Geometry buffer builders.
//!
//! Simple data-marshaling utilities: each accepts an ordered sequence of
//! single-precision 3D points (local-frame coordinates; world-scale
//! magnitude lives in the entity transform) and exposes counts plus raw byte
//! views for upload.
//!
//! Mutators bump a revision counter and return the new count; that counter is
//! the change notification renderers watch to re-upload.

mod billboard;
mod instanced;
mod line_mesh;

pub use billboard::BillboardData;
pub use instanced::InstanceData;
pub use line_mesh::{LineMeshData, RESTART_INDEX};
