mod app;
mod camera;
mod config;
mod gpu;
mod simulation;

use anyhow::Context;
use winit::event_loop::EventLoop;

use app::App;
use camera::{CameraSource, ImageSequenceCamera, SyntheticCamera};
use config::{LifeConfig, CAPTURE_HEIGHT, CAPTURE_WIDTH};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional first argument: directory of still frames to replay
    let camera: Box<dyn CameraSource> = match std::env::args_os().nth(1) {
        Some(dir) => Box::new(ImageSequenceCamera::open(&dir)?),
        None => {
            log::info!("No frame directory given, using synthetic camera");
            Box::new(SyntheticCamera::new(CAPTURE_WIDTH, CAPTURE_HEIGHT))
        }
    };

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(camera, LifeConfig::from_env());
    event_loop.run_app(&mut app).context("Event loop terminated with an error")?;

    Ok(())
}
