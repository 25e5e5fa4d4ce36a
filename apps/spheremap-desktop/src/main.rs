use anyhow::Result;
use clap::Parser;
use glam::{Vec2, Vec3};
use spheremap_camera::{CameraMode, OrientationState};
use spheremap_common::Extent;
use spheremap_input::{Action, InputBuffer, Key, KeyBindings};
use spheremap_kernel::{FixedStepScheduler, SchedulerConfig, SchedulerHandle};
use spheremap_render_wgpu::WgpuBackend;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

const START_POSITION: Vec3 = Vec3::new(0.0, 0.0, 5.0);

#[derive(Parser)]
#[command(name = "spheremap-desktop", about = "Fly around the sphere-map scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Navigation mode: free or clamped
    #[arg(long, default_value_t = CameraMode::Clamped)]
    camera: CameraMode,

    /// Window width in physical pixels
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Window height in physical pixels
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Cap on catch-up ticks per pass; unbounded when omitted
    #[arg(long)]
    max_catch_up_ticks: Option<NonZeroU32>,
}

/// Owns the window and both threads. Runs on the platform (main) thread,
/// where it only forwards events into the input buffer.
struct Supervisor {
    cli: Cli,
    input: Arc<InputBuffer>,
    bindings: KeyBindings,
    window: Option<Arc<Window>>,
    scheduler: Option<SchedulerHandle<WgpuBackend>>,
    // Mouse motion summed into an absolute position.
    cursor: Vec2,
}

impl Supervisor {
    fn new(cli: Cli) -> Self {
        Self {
            cli,
            input: Arc::new(InputBuffer::new()),
            bindings: KeyBindings::default(),
            window: None,
            scheduler: None,
            cursor: Vec2::ZERO,
        }
    }

    fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            max_ticks_per_pass: self.cli.max_catch_up_ticks,
            ..SchedulerConfig::default()
        }
    }

    fn start_simulation(&mut self, event_loop: &ActiveEventLoop, window: &Arc<Window>) {
        let size = window.inner_size();
        let extent = Extent::new(size.width, size.height);

        let backend = match WgpuBackend::new(Arc::clone(window), extent) {
            Ok(backend) => backend,
            Err(e) => {
                tracing::error!("render backend initialisation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let scheduler = FixedStepScheduler::new(
            self.scheduler_config(),
            Arc::clone(&self.input),
            backend,
            OrientationState::for_mode(self.cli.camera, START_POSITION),
        )
        .with_bindings(self.bindings.clone());

        match scheduler.start() {
            Ok(handle) => {
                tracing::info!(camera = %self.cli.camera, "simulation started");
                self.scheduler = Some(handle);
            }
            Err(e) => {
                tracing::error!("{e}");
                event_loop.exit();
            }
        }
    }

    /// Stop and join the simulation thread, then drop its backend here,
    /// before the window goes away.
    fn stop_simulation(&mut self) {
        let Some(handle) = self.scheduler.take() else {
            return;
        };
        tracing::info!("telling simulation loop to finish");
        match handle.stop() {
            Ok(scheduler) => drop(scheduler.into_backend()),
            Err(e) => tracing::error!("{e}"),
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.stop_simulation();
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode, pressed: bool) {
        let Some(key) = map_key(code) else {
            return;
        };
        if pressed && self.bindings.action(key) == Some(Action::Quit) {
            self.shutdown(event_loop);
            return;
        }
        self.input.push_key(key, pressed);
    }
}

impl ApplicationHandler for Supervisor {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("sphere-map")
            .with_inner_size(PhysicalSize::new(self.cli.width, self.cli.height));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        grab_cursor(&window);

        self.start_simulation(event_loop, &window);
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }
            WindowEvent::Resized(new_size) => {
                self.input.push_resize(new_size.width, new_size.height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.handle_key(event_loop, code, state == ElementState::Pressed);
            }
            WindowEvent::Focused(true) => {
                if let Some(window) = &self.window {
                    grab_cursor(window);
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.cursor += Vec2::new(delta.0 as f32, delta.1 as f32);
            self.input.push_cursor(self.cursor.x, self.cursor.y);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.stop_simulation();
    }
}

fn grab_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(e) = grabbed {
        tracing::warn!("cursor grab unavailable: {e}");
    }
    window.set_cursor_visible(false);
}

fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::Space => Key::Space,
        KeyCode::ShiftLeft => Key::LeftShift,
        KeyCode::ControlLeft => Key::LeftControl,
        KeyCode::Escape => Key::Escape,
        _ => return None,
    };
    Some(key)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("spheremap-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = Supervisor::new(cli);
    event_loop.run_app(&mut app)?;

    tracing::info!("spheremap-desktop finished");
    Ok(())
}
