use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::camera::CameraSource;
use crate::config::{LifeConfig, TARGET_FPS, WINDOW_SIZE};
use crate::gpu::{GpuContext, GridBuffers, RenderPipeline};
use crate::simulation::SimulationController;

/// Application state
pub struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    grid_buffers: Option<GridBuffers>,
    render_pipeline: Option<RenderPipeline>,
    camera: Box<dyn CameraSource>,
    simulation: SimulationController,
    clock: TickClock,
    fps_counter: FpsCounter,
}

impl App {
    pub fn new(camera: Box<dyn CameraSource>, config: LifeConfig) -> Self {
        Self {
            window: None,
            gpu: None,
            grid_buffers: None,
            render_pipeline: None,
            camera,
            simulation: SimulationController::new(config),
            clock: TickClock::new(LifeConfig::tick_interval(TARGET_FPS), Instant::now()),
            fps_counter: FpsCounter::new(),
        }
    }

    /// One capture -> simulation update. A missing frame skips the tick.
    fn tick(&mut self) {
        let field = match self.camera.capture() {
            Ok(field) => field,
            Err(e) if e.is_transient() => {
                log::debug!("No frame from {}, skipping tick", self.camera.describe());
                return;
            }
            Err(e) => {
                log::error!("Bad frame from {}: {}", self.camera.describe(), e);
                return;
            }
        };

        if let Err(e) = self.simulation.on_frame(&field) {
            log::error!("Dropping frame: {}", e);
            return;
        }

        self.sync_gpu();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Push the current grid and mode to the GPU buffers
    fn sync_gpu(&mut self) {
        let (Some(gpu), Some(buffers), Some(render)) = (
            self.gpu.as_ref(),
            self.grid_buffers.as_mut(),
            self.render_pipeline.as_ref(),
        ) else {
            return;
        };
        match self.simulation.grid() {
            Some(grid) => buffers.upload(
                &gpu.device,
                &gpu.queue,
                render.layout(),
                grid,
                self.simulation.mode(),
            ),
            None => buffers.clear(&gpu.queue),
        }
    }

    fn render(&mut self) {
        let (Some(gpu), Some(buffers), Some(render)) = (
            self.gpu.as_ref(),
            self.grid_buffers.as_ref(),
            self.render_pipeline.as_ref(),
        ) else {
            return;
        };
        let Some(frame) = gpu.acquire_frame() else {
            return;
        };

        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });
        render.draw(&mut encoder, &view, buffers);
        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        // Update and display FPS
        if let Some(fps) = self.fps_counter.tick() {
            if let Some(window) = &self.window {
                window.set_title(&format!(
                    "Webcam Life - {:.0} FPS - {}",
                    fps,
                    self.simulation.status_line()
                ));
            }
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        match key_code {
            // Start / pause / resume
            KeyCode::Space => self.simulation.on_toggle(),

            // Back to the live camera view
            KeyCode::KeyR => self.simulation.on_reset(),

            _ => return,
        }
        self.sync_gpu();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("Initializing Webcam Life...");
        log::info!("Frame source: {}", self.camera.describe());
        log::info!("Config: {:?}", self.simulation.config());

        // Create window
        let window_attrs = Window::default_attributes()
            .with_title("Webcam Life - Initializing...")
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_SIZE, WINDOW_SIZE));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        // Initialize GPU
        log::info!("Creating GPU context...");
        let gpu = match pollster::block_on(GpuContext::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("GPU initialization failed: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        log::info!("Creating grid buffers and render pipeline...");
        let render_pipeline = RenderPipeline::new(&gpu.device, gpu.format());
        let grid_buffers = GridBuffers::new(&gpu.device, render_pipeline.layout());

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  Space: Start game from camera view / pause / resume");
        log::info!("  R: Reset to camera view");
        log::info!("  Escape: Quit");
        log::info!("Moving objects in front of the camera create new cells.");

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.grid_buffers = Some(grid_buffers);
        self.render_pipeline = Some(render_pipeline);

        self.clock = TickClock::new(LifeConfig::tick_interval(TARGET_FPS), Instant::now());
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.deadline()));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => self.render(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            return;
        }
        if self.clock.poll(Instant::now()) {
            self.tick();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.deadline()));
    }
}

/// Fixed-rate tick scheduler. Falls back to "one tick from now" after a
/// stall instead of bursting to catch up.
struct TickClock {
    interval: Duration,
    next_tick: Instant,
}

impl TickClock {
    fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next_tick: start + interval,
        }
    }

    /// True if a tick is due at `now`; schedules the following one
    fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_tick {
            return false;
        }
        self.next_tick += self.interval;
        if self.next_tick <= now {
            self.next_tick = now + self.interval;
        }
        true
    }

    fn deadline(&self) -> Instant {
        self.next_tick
    }
}

/// Simple FPS counter
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Tick the counter, returns Some(fps) every second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}
