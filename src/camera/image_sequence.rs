use std::path::{Path, PathBuf};

use anyhow::{bail, Context};

use crate::camera::CameraSource;
use crate::simulation::{BrightnessField, FrameError};

const EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Replays a directory of still images as camera frames, looping forever.
/// Files are visited in file-name order and decoded one per capture.
pub struct ImageSequenceCamera {
    directory: PathBuf,
    frames: Vec<PathBuf>,
    next: usize,
}

impl ImageSequenceCamera {
    pub fn open(directory: impl AsRef<Path>) -> anyhow::Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        let entries = std::fs::read_dir(&directory)
            .with_context(|| format!("reading frame directory {}", directory.display()))?;

        let mut frames = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("listing {}", directory.display()))?
                .path();
            if is_image(&path) {
                frames.push(path);
            }
        }
        frames.sort();

        if frames.is_empty() {
            bail!("no PNG, JPEG or BMP frames found in {}", directory.display());
        }

        log::info!("Loaded {} frame paths from {}", frames.len(), directory.display());
        Ok(Self {
            directory,
            frames,
            next: 0,
        })
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

fn is_image(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
}

impl CameraSource for ImageSequenceCamera {
    fn capture(&mut self) -> Result<BrightnessField, FrameError> {
        let path = &self.frames[self.next];
        self.next = (self.next + 1) % self.frames.len();

        let luma = match image::open(path) {
            Ok(img) => img.to_luma8(),
            Err(e) => {
                log::warn!("Skipping unreadable frame {}: {}", path.display(), e);
                return Err(FrameError::CaptureUnavailable);
            }
        };

        let (width, height) = luma.dimensions();
        BrightnessField::new(height as usize, width as usize, luma.into_raw())
    }

    fn describe(&self) -> String {
        format!("{} frames from {}", self.frames.len(), self.directory.display())
    }
}
