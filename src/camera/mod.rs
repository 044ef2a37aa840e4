mod image_sequence;
mod synthetic;

pub use image_sequence::ImageSequenceCamera;
pub use synthetic::SyntheticCamera;

use crate::simulation::{BrightnessField, FrameError};

/// Something that yields grayscale frames, one per tick
pub trait CameraSource {
    /// Newest frame, or `FrameError::CaptureUnavailable` if none is ready
    fn capture(&mut self) -> Result<BrightnessField, FrameError>;

    /// Human-readable name for logs
    fn describe(&self) -> String;
}
