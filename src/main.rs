//! Car on a Banked Curve Problem Solver
//!
//! Interactive calculator for centripetal force, normal force, velocity, bank
//! angle and friction of a car taking a curve.

mod chart;
mod config;
mod diagram_view;
mod equation;
mod gui;
mod theme;

use config::AppConfig;
use gui::{Gui, UiState};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

#[derive(Debug, thiserror::Error)]
enum GpuInitError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    gui: Gui,
    ui_state: UiState,
}

impl GpuState {
    async fn new(window: Arc<Window>, app_config: &AppConfig) -> Result<Self, GpuInitError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuInitError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let gui = Gui::new(&device, config.format, &window);
        let ui_state = UiState::new(app_config);
        log::info!("✓ Calculator ready");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            gui,
            ui_state,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Draw one frame and return how long egui can wait before the next one
    fn render(&mut self, window: &Window) -> Result<Duration, wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("GUI Encoder"),
            });

        let repaint_after = self.gui.render(
            &self.device,
            &self.queue,
            &mut encoder,
            window,
            &view,
            &mut self.ui_state,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(repaint_after)
    }
}

struct App {
    config: AppConfig,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
}

/// Event loop schedule for a repaint `repaint_after` from `now`; `None` means redraw immediately
fn next_wake(repaint_after: Duration, now: Instant) -> Option<ControlFlow> {
    if repaint_after.is_zero() {
        return None;
    }
    Some(match now.checked_add(repaint_after) {
        Some(deadline) => ControlFlow::WaitUntil(deadline),
        None => ControlFlow::Wait,
    })
}

impl ApplicationHandler for App {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            event_loop.set_control_flow(ControlFlow::Wait);
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(GpuState::new(window.clone(), &self.config)) {
            Ok(gpu_state) => {
                self.gpu_state = Some(gpu_state);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("Failed to initialise graphics: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let consumed = match (&mut self.gpu_state, &self.window) {
            (Some(gpu_state), Some(window)) => gpu_state.gui.handle_event(window, &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } if !consumed => event_loop.exit(),

            WindowEvent::Resized(new_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(new_size);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
                    match gpu_state.render(window) {
                        Ok(repaint_after) => match next_wake(repaint_after, Instant::now()) {
                            Some(control_flow) => event_loop.set_control_flow(control_flow),
                            None => window.request_redraw(),
                        },
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu_state.resize(window.inner_size())
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Out of GPU memory, exiting");
                            event_loop.exit()
                        }
                        Err(e) => log::error!("Render error: {:?}", e),
                    }
                }
                return;
            }

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), winit::error::EventLoopError> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting banked curve calculator...");

    let config = AppConfig::discover().unwrap_or_else(|e| {
        log::warn!("Ignoring configuration file: {}", e);
        AppConfig::default()
    });
    match config.to_toml_string() {
        Ok(text) => log::debug!("Effective configuration:\n{}", text),
        Err(e) => log::debug!("Could not print configuration: {}", e),
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App {
        config,
        window: None,
        gpu_state: None,
    };

    event_loop.run_app(&mut app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_repaint_redraws() {
        assert_eq!(next_wake(Duration::ZERO, Instant::now()), None);
    }

    #[test]
    fn test_delayed_repaint_waits_until_deadline() {
        let now = Instant::now();
        assert_eq!(
            next_wake(Duration::from_millis(250), now),
            Some(ControlFlow::WaitUntil(now + Duration::from_millis(250)))
        );
    }

    #[test]
    fn test_no_repaint_requested_waits_for_input() {
        assert_eq!(
            next_wake(Duration::MAX, Instant::now()),
            Some(ControlFlow::Wait)
        );
    }
}
