//! MVP update pipeline.
//!
//! For each binding: `mv = view * model`, `mvp = projection * mv`, both in
//! `f64`, then one element-wise narrowing to `f32`, delivered to the
//! binding's sink under its uniform name.
//!
//! The whole point of this subsystem is *when* the narrowing happens.
//! Performing any intermediate multiply in single precision reintroduces
//! catastrophic cancellation for coordinates far from the origin; the
//! [`MvpPrecision::Single`] path exists precisely to keep that failure mode
//! demonstrable and testable next to the correct one.

use crate::camera::Camera;
use crate::math::Mat4F;

use super::{Binding, BindingTable, SinkTable, Transform};

/// Where in the composition chain values narrow to `f32`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MvpPrecision {
    /// Compose in `f64`, narrow the finished MVP once. The correct path.
    Double,
    /// Narrow projection/view/model first, compose in `f32`. The jittering
    /// baseline, kept selectable so both paths are exercised by one build.
    Single,
}

/// Composes and delivers MVP matrices for a camera and a binding table.
///
/// The pipeline owns no scene state: camera, bindings and sinks all belong
/// to the caller. Re-run it on camera change (resize) and on each animation
/// tick.
#[derive(Debug, Copy, Clone)]
pub struct MvpPipeline {
    precision: MvpPrecision,
}

impl MvpPipeline {
    pub fn new(precision: MvpPrecision) -> Self {
        Self { precision }
    }

    pub fn precision(&self) -> MvpPrecision {
        self.precision
    }

    /// Composes one MVP matrix for `transform` under `camera`.
    pub fn compose(&self, camera: &Camera, transform: &Transform) -> Mat4F {
        match self.precision {
            MvpPrecision::Double => {
                let mv = *camera.view() * *transform.matrix();
                let mvp = *camera.projection() * mv;
                // The single narrowing point of the whole pipeline.
                mvp.to_f32()
            }
            MvpPrecision::Single => {
                let p = camera.projection().to_f32();
                let v = camera.view().to_f32();
                let m = transform.matrix().to_f32();
                p * (v * m)
            }
        }
    }

    /// Composes and delivers the MVP for one binding.
    ///
    /// Returns `false` (after a warning) when the sink handle no longer
    /// resolves; the rendering layer owns sink lifetimes, so a stale handle
    /// is its bug to surface, not a panic.
    pub fn update(&self, camera: &Camera, binding: &Binding, sinks: &mut dyn SinkTable) -> bool {
        let mvp = self.compose(camera, &binding.transform);
        match sinks.sink_mut(binding.sink) {
            Some(sink) => {
                sink.set_matrix(&binding.uniform, mvp);
                true
            }
            None => {
                log::warn!("no sink for handle {:?}; skipping {:?}", binding.sink, binding.uniform);
                false
            }
        }
    }

    /// Re-runs the pipeline for every binding in the table.
    pub fn update_all(&self, camera: &Camera, table: &BindingTable, sinks: &mut dyn SinkTable) {
        for (entity, binding) in table.iter() {
            if !self.update(camera, binding, sinks) {
                log::debug!("entity {entity:?} skipped");
            }
        }
    }
}
