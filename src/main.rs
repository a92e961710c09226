//! Coaster Ride entry point
//!
//! Opens the window, brings up the GPU and runs the ride at a fixed frame
//! cadence: queued input is applied, the ride is ticked, and a fresh scene
//! is drawn.

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowId};

use coaster_ride::consts::TARGET_FPS;
use coaster_ride::input::{Command, InputEvent, map_input};
use coaster_ride::platform::{FrameLimiter, cursor_source, cursor_to_world, ride_key};
use coaster_ride::renderer::{RenderState, TextureId, TextureSet, build_scene};
use coaster_ride::sim::{Intent, RideEvent, RideState, tick};
use coaster_ride::{RenderError, Settings};

const WINDOW_TITLE: &str = "Coaster Ride";
const CURSOR_FILE: &str = "cursor.png";

/// Window plus everything drawn into it
struct Graphics {
    window: Arc<Window>,
    render: RenderState,
    textures: TextureSet,
}

struct App {
    settings: Settings,
    state: RideState,
    graphics: Option<Graphics>,
    limiter: FrameLimiter,
    /// Last cursor position in physical pixels
    cursor: (f64, f64),
    /// Input received since the last frame
    pending: Vec<InputEvent>,
}

impl App {
    fn new(settings: Settings) -> Self {
        Self {
            settings,
            state: RideState::new(),
            graphics: None,
            limiter: FrameLimiter::new(TARGET_FPS, Instant::now()),
            cursor: (0.0, 0.0),
            pending: Vec::new(),
        }
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Option<Arc<Window>> {
        let mut attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(
                self.settings.window_width,
                self.settings.window_height,
            ));
        if self.settings.fullscreen {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        match event_loop.create_window(attributes) {
            Ok(window) => Some(Arc::new(window)),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                None
            }
        }
    }

    fn install_cursor(&self, event_loop: &ActiveEventLoop, window: &Window) {
        if !self.settings.custom_cursor {
            return;
        }
        let path = self.settings.resource_path(CURSOR_FILE);
        match cursor_source(&path) {
            Ok(source) => {
                window.set_cursor(event_loop.create_custom_cursor(source));
                log::info!("Loaded cursor {}", path.display());
            }
            Err(e) => log::warn!("Cursor skipped: {}", e),
        }
    }

    /// Apply queued input, then advance the ride by `dt`
    fn step(&mut self, event_loop: &ActiveEventLoop, dt: f32) {
        for event in self.pending.drain(..) {
            match map_input(&self.state, event) {
                Some(Command::Exit) => {
                    log::info!("Exit requested");
                    event_loop.exit();
                    return;
                }
                Some(Command::Ride(intent)) => {
                    if self.state.apply(intent) {
                        continue;
                    }
                    if intent == Intent::Board && self.state.roster.is_full() {
                        log::debug!("Car is full, no seat to board");
                    } else {
                        log::debug!("Ignored {:?} in {}", intent, self.state.phase);
                    }
                }
                None => {}
            }
        }

        tick(&mut self.state, dt);

        for event in self.state.drain_events() {
            log_ride_event(event);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(graphics) = &mut self.graphics else {
            return;
        };
        let scene = build_scene(&self.state, &self.settings);
        match graphics.render.render(&scene, &graphics.textures) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost, reconfiguring");
                graphics.render.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Frame skipped: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        let Some(window) = self.create_window(event_loop) else {
            event_loop.exit();
            return;
        };
        self.install_cursor(event_loop, &window);

        let render = match pollster::block_on(init_render(window.clone())) {
            Ok(render) => render,
            Err(e) => {
                log::error!("GPU initialization failed: {}", e);
                event_loop.exit();
                return;
            }
        };

        let textures = render.load_textures(&self.settings.resource_dir);
        log::info!(
            "{} of {} sprites loaded, track detail {}",
            textures.loaded(),
            TextureId::ALL.len(),
            self.settings.track_detail.as_str()
        );

        self.limiter = FrameLimiter::new(TARGET_FPS, Instant::now());
        self.graphics = Some(Graphics {
            window,
            render,
            textures,
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.pending.push(InputEvent::CloseRequested),
            WindowEvent::Resized(size) => {
                if let Some(graphics) = &mut self.graphics {
                    graphics.render.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(key) = ride_key(physical_key) {
                    self.pending.push(InputEvent::Key(key));
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(graphics) = &self.graphics {
                    let size = graphics.window.inner_size();
                    let point =
                        cursor_to_world(self.cursor.0, self.cursor.1, size.width, size.height);
                    self.pending.push(InputEvent::Click(point));
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_none() {
            return;
        }

        if let Some(dt) = self.limiter.tick(Instant::now()) {
            self.step(event_loop, dt);
            if let Some(graphics) = &self.graphics {
                graphics.window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.limiter.next_deadline()));
    }
}

/// Create the surface, pick an adapter and build the render state
async fn init_render(window: Arc<Window>) -> Result<RenderState, RenderError> {
    let size = window.inner_size();

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    });
    let surface = instance.create_surface(window)?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await?;

    log::info!("Using adapter: {:?}", adapter.get_info().name);

    RenderState::new(surface, &adapter, size.width, size.height).await
}

fn log_ride_event(event: RideEvent) {
    match event {
        RideEvent::PhaseChanged { from, to } => log::info!("Ride phase {} -> {}", from, to),
        RideEvent::Boarded { seat } => log::info!("Passenger boarded seat {}", seat + 1),
        RideEvent::Belted { seat } => log::info!("Seat {} belted", seat + 1),
        RideEvent::ReportedSick { seat } => {
            log::info!("Passenger in seat {} reported sick, stopping", seat + 1)
        }
        RideEvent::Disembarked { seat } => log::info!("Seat {} disembarked", seat + 1),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Coaster Ride starting...");

    let settings = Settings::load();

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return;
        }
    };

    let mut app = App::new(settings);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
    log::info!("Coaster Ride shut down");
}
