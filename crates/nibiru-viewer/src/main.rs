//! Relative-to-center rendering demo.
//!
//! A sphere and two planes sit roughly two million units from the origin;
//! the camera orbits them with a 0.1-unit wobble. Composed in `f64` the
//! scene is stable; rerun with `NIBIRU_PRECISION=single` to watch the same
//! scene jitter when MVP matrices are composed in `f32`.

mod app;
mod gpu;
mod line_pass;
mod scene;

use anyhow::{Context, Result};
use winit::event_loop::EventLoop;

use nibiru_engine::scene::MvpPrecision;

use crate::app::ViewerApp;

fn main() -> Result<()> {
    nibiru_engine::logging::init(None);

    let precision = match std::env::var("NIBIRU_PRECISION").as_deref() {
        Ok("single") => MvpPrecision::Single,
        _ => MvpPrecision::Double,
    };
    log::info!("MVP composition precision: {precision:?}");
    log::info!("SPACE toggles the camera orbit");

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut app = ViewerApp::new(precision, scene::demo_scene())?;

    event_loop
        .run_app(&mut app)
        .context("winit event loop terminated with error")?;

    Ok(())
}
