//! The winit application driving the RTC demo.
//!
//! Event handling is the whole pipeline contract in miniature:
//! - resize → aspect ratio update → full MVP re-run
//! - SPACE → `Action::ToggleAnimation` dispatch
//! - timer deadline → orbit tick(s) → camera update → full MVP re-run

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use nibiru_engine::camera::Camera;
use nibiru_engine::input::{Action, ActionRegistry};
use nibiru_engine::math::Vec3;
use nibiru_engine::scene::{
    AnimationState, Binding, BindingTable, EntityId, MvpPipeline, MvpPrecision, OrbitAnimation,
    Transform,
};
use nibiru_engine::time::TickTimer;

use crate::gpu::{Gpu, SurfaceErrorAction};
use crate::line_pass::{LinePass, ParamSet};
use crate::scene::{SceneEntity, MEGA_OFFSET, MVP_UNIFORM};

const FOV_Y_DEG: f64 = 25.0;
const NEAR: f64 = 0.1;
const FAR: f64 = 1024.0;
const INITIAL_ASPECT: f64 = 4.0 / 3.0;

const TICK_INTERVAL: Duration = Duration::from_millis(20);
const ORBIT_PERIOD: u32 = 50;
const ORBIT_AMPLITUDE: f64 = 0.1;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.5,
    g: 0.5,
    b: 0.5,
    a: 1.0,
};

pub struct ViewerApp {
    /// Scene description, consumed when the window comes up.
    pending_scene: Vec<SceneEntity>,

    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    pass: Option<LinePass>,

    params: ParamSet,
    bindings: BindingTable,
    camera: Camera,
    pipeline: MvpPipeline,

    orbit: OrbitAnimation,
    anim: AnimationState,
    timer: TickTimer,
    actions: ActionRegistry<AnimationState>,
}

impl ViewerApp {
    pub fn new(precision: MvpPrecision, scene: Vec<SceneEntity>) -> Result<Self> {
        let mut camera = Camera::new(FOV_Y_DEG, INITIAL_ASPECT, NEAR, FAR)
            .context("camera configuration rejected")?;

        let orbit = OrbitAnimation::new(
            ORBIT_PERIOD,
            ORBIT_AMPLITUDE,
            MEGA_OFFSET + Vec3::new(1.0, 10.0, 0.0),
            MEGA_OFFSET,
        );
        camera
            .look_at(orbit.base_eye, orbit.base_center)
            .context("initial camera pose rejected")?;

        let mut actions = ActionRegistry::new();
        actions.register(Action::ToggleAnimation, |anim: &mut AnimationState| {
            let running = anim.toggle();
            log::info!("orbit {}", if running { "running" } else { "paused" });
        });

        Ok(Self {
            pending_scene: scene,
            window: None,
            gpu: None,
            pass: None,
            params: ParamSet::new(),
            bindings: BindingTable::new(),
            camera,
            pipeline: MvpPipeline::new(precision),
            orbit,
            anim: AnimationState::new(true),
            timer: TickTimer::new(TICK_INTERVAL),
            actions,
        })
    }

    fn update_aspect_from(&mut self, width: u32, height: u32) {
        let aspect = f64::from(width) / f64::from(height.max(1));
        if let Err(e) = self.camera.set_aspect_ratio(aspect) {
            log::warn!("aspect update rejected: {e}");
            return;
        }
        self.pipeline
            .update_all(&self.camera, &self.bindings, &mut self.params);
    }

    /// Advances the orbit by any due ticks, then re-runs the pipeline.
    fn advance_animation(&mut self, now: Instant) {
        if !self.anim.running() {
            return;
        }
        let fired = self.timer.poll(now);
        if fired == 0 {
            return;
        }
        for _ in 0..fired {
            self.anim.advance(self.orbit.period);
        }

        let (eye, center) = self.orbit.eye_center_at(self.anim.phase());
        match self.camera.look_at(eye, center) {
            Ok(()) => {
                self.pipeline
                    .update_all(&self.camera, &self.bindings, &mut self.params);
            }
            Err(e) => log::error!("orbit produced a bad camera pose: {e}"),
        }
    }

    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gpu), Some(pass)) = (self.gpu.as_mut(), self.pass.as_ref()) else {
            return;
        };

        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                match gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        log::error!("fatal surface error; exiting");
                        event_loop.exit();
                    }
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {}
                }
                return;
            }
        };

        pass.draw(
            gpu.queue(),
            &mut frame.encoder,
            &frame.view,
            CLEAR_COLOR,
            &mut self.params,
        );

        if let Some(window) = &self.window {
            window.pre_present_notify();
        }
        gpu.submit(frame);
    }

    fn toggle_animation(&mut self) {
        self.actions.dispatch(Action::ToggleAnimation, &mut self.anim);
        if self.anim.running() {
            // Fresh cadence so the first tick lands one interval from now
            // instead of firing a stale backlog.
            self.timer.reset();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("nibiru relative-to-center demo")
            .with_inner_size(LogicalSize::new(1024.0, 768.0));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let gpu = match pollster::block_on(Gpu::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("failed to initialize GPU: {e:#}");
                event_loop.exit();
                return;
            }
        };

        let mut pass = LinePass::new(gpu.device(), gpu.surface_format());
        for (i, entity) in self.pending_scene.drain(..).enumerate() {
            let sink = pass.add_entity(
                gpu.device(),
                entity.label,
                &entity.mesh,
                entity.color,
                MVP_UNIFORM,
                &mut self.params,
            );
            self.bindings.insert(
                EntityId(i as u32),
                Binding {
                    transform: Transform::from_translation(entity.position),
                    uniform: MVP_UNIFORM.to_string(),
                    sink,
                },
            );
        }

        let size = gpu.size();
        self.gpu = Some(gpu);
        self.pass = Some(pass);
        self.window = Some(window.clone());

        self.update_aspect_from(size.width, size.height);
        window.request_redraw();
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size);
                }
                self.update_aspect_from(new_size.width, new_size.height);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let pressed = event.state == ElementState::Pressed && !event.repeat;
                if pressed && event.physical_key == PhysicalKey::Code(KeyCode::Space) {
                    self.toggle_animation();
                }
            }

            WindowEvent::RedrawRequested => {
                self.advance_animation(Instant::now());
                self.render(event_loop);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.anim.running() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.timer.deadline()));
        } else {
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }
}
