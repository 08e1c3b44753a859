//! Tick timing.

mod tick;

pub use tick::TickTimer;
