//! Scene-side state for the relative-to-center pipeline.
//!
//! Responsibilities:
//! - own per-entity model transforms and their sink bindings
//! - compose MVP matrices in double precision, narrowing once at delivery
//! - keep animation state explicit and caller-owned (no globals)

mod anim;
mod binding;
mod pipeline;
mod transform;

pub use anim::{AnimationState, OrbitAnimation};
pub use binding::{Binding, BindingTable, EntityId, ParameterSink, SinkHandle, SinkTable};
pub use pipeline::{MvpPipeline, MvpPrecision};
pub use transform::Transform;
