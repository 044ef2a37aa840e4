use rand::Rng;

use crate::camera::CameraSource;
use crate::config::{SYNTHETIC_BLOB_RADIUS, SYNTHETIC_SPECKLE_PROBABILITY};
use crate::simulation::{BrightnessField, FrameError};

const BACKGROUND: u8 = 24;
const BLOB: u8 = 230;
const SPECKLE: u8 = 200;

/// Stand-in webcam: a bright disc bouncing around a dark frame, with a
/// little random speckle so a running game keeps being reseeded
pub struct SyntheticCamera {
    width: usize,
    height: usize,
    position: (f32, f32),
    velocity: (f32, f32),
    speckle_probability: f64,
}

impl SyntheticCamera {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            position: (width as f32 / 3.0, height as f32 / 2.0),
            velocity: (3.0, 2.0),
            speckle_probability: SYNTHETIC_SPECKLE_PROBABILITY,
        }
    }

    /// Disable speckle for reproducible frames
    #[cfg(test)]
    pub fn without_speckle(mut self) -> Self {
        self.speckle_probability = 0.0;
        self
    }

    // Move the disc one frame, bouncing off the frame edges
    fn advance(&mut self) {
        let (x, y) = (self.position.0 + self.velocity.0, self.position.1 + self.velocity.1);
        if x < 0.0 || x >= self.width as f32 {
            self.velocity.0 = -self.velocity.0;
        }
        if y < 0.0 || y >= self.height as f32 {
            self.velocity.1 = -self.velocity.1;
        }
        self.position = (
            x.clamp(0.0, self.width.saturating_sub(1) as f32),
            y.clamp(0.0, self.height.saturating_sub(1) as f32),
        );
    }
}

impl CameraSource for SyntheticCamera {
    fn capture(&mut self) -> Result<BrightnessField, FrameError> {
        let mut rng = rand::thread_rng();
        let (cx, cy) = self.position;
        let radius_sq = SYNTHETIC_BLOB_RADIUS * SYNTHETIC_BLOB_RADIUS;

        let mut pixels = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let value = if dx * dx + dy * dy <= radius_sq {
                    BLOB
                } else if self.speckle_probability > 0.0 && rng.gen_bool(self.speckle_probability) {
                    SPECKLE
                } else {
                    BACKGROUND
                };
                pixels.push(value);
            }
        }

        self.advance();
        BrightnessField::new(self.height, self.width, pixels)
    }

    fn describe(&self) -> String {
        format!("synthetic camera {}x{}", self.width, self.height)
    }
}
