use std::sync::Arc;

use anyhow::Context;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Window surface plus the device that draws into it
pub struct GpuContext {
    surface: Surface<'static>,
    config: SurfaceConfiguration,
    pub device: Device,
    pub queue: Queue,
}

impl GpuContext {
    /// Any adapter able to present to `window` will do; the board is a
    /// single fullscreen draw.
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .context("creating window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .context("no GPU adapter can present to this window")?;
        log::info!("Using GPU: {} ({:?})", adapter.get_info().name, adapter.get_info().backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("webcam-life"),
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
                    ..Default::default()
                },
                None,
            )
            .await
            .context("requesting GPU device")?;

        let PhysicalSize { width, height } = window.inner_size();
        let config = surface
            .get_default_config(&adapter, width.max(1), height.max(1))
            .context("window surface is not supported by the adapter")?;
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            config,
            device,
            queue,
        })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Follow the window size; a minimized (zero-sized) window is ignored
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Next texture to draw into, or `None` when this frame must be skipped.
    /// A lost or outdated surface is reconfigured for the next attempt.
    pub fn acquire_frame(&self) -> Option<SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(frame) => Some(frame),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                None
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::debug!("Surface timed out, skipping frame");
                None
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                None
            }
        }
    }
}
