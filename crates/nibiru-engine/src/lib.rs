//! Nibiru engine crate.
//!
//! Core of a "relative-to-center" renderer: model-view-projection math runs
//! in `f64` on the CPU and narrows to `f32` exactly once, at the GPU
//! boundary. Keeping every intermediate product in double precision avoids
//! the jitter that single-precision transforms exhibit at planetary-scale
//! coordinates.

pub mod camera;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod math;
pub mod scene;
pub mod time;
