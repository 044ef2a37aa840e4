use std::time::Duration;

/// Largest side the cell grid may have; frames are halved until they fit
pub const MAX_GRID_SIZE: usize = 400;

/// Window edge in logical pixels (the grid is scaled to fill it)
pub const WINDOW_SIZE: u32 = 800;

/// Simulation ticks per second
pub const TARGET_FPS: u32 = 30;

/// Brightness strictly above this value becomes a live cell
pub const ALIVE_THRESHOLD: u8 = 128;

/// Resolution requested from the camera collaborator
pub const CAPTURE_WIDTH: usize = 320;
pub const CAPTURE_HEIGHT: usize = 240;

/// Flip frames horizontally so the view behaves like a mirror
pub const MIRROR_FRAMES: bool = true;

// ============================================
// Synthetic camera
// ============================================

/// Radius of the bright disc drawn by the synthetic camera, in pixels
pub const SYNTHETIC_BLOB_RADIUS: f32 = 28.0;

/// Fraction of background pixels lit up as speckle each frame
pub const SYNTHETIC_SPECKLE_PROBABILITY: f64 = 0.002;

// Environment overrides read by `LifeConfig::from_env`
const ENV_MAX_SIDE: &str = "WEBCAM_LIFE_MAX_SIDE";
const ENV_THRESHOLD: &str = "WEBCAM_LIFE_THRESHOLD";
const ENV_MIRROR: &str = "WEBCAM_LIFE_MIRROR";

/// Parameters the simulation controller is constructed with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifeConfig {
    pub max_side: usize,
    pub threshold: u8,
    pub mirror: bool,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            max_side: MAX_GRID_SIZE,
            threshold: ALIVE_THRESHOLD,
            mirror: MIRROR_FRAMES,
        }
    }
}

impl LifeConfig {
    /// Defaults with any `WEBCAM_LIFE_*` environment overrides applied
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_MAX_SIDE) {
            match raw.trim().parse::<usize>() {
                Ok(side) if side > 0 => config.max_side = side,
                _ => log::warn!("Ignoring {}={:?}: expected a positive integer", ENV_MAX_SIDE, raw),
            }
        }

        if let Some(raw) = lookup(ENV_THRESHOLD) {
            match raw.trim().parse::<u8>() {
                Ok(threshold) => config.threshold = threshold,
                Err(_) => log::warn!("Ignoring {}={:?}: expected 0-255", ENV_THRESHOLD, raw),
            }
        }

        if let Some(raw) = lookup(ENV_MIRROR) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.mirror = true,
                "0" | "false" | "no" | "off" => config.mirror = false,
                _ => log::warn!("Ignoring {}={:?}: expected true/false", ENV_MIRROR, raw),
            }
        }

        config
    }

    /// Time between ticks for the given rate (a rate of 0 is treated as 1)
    pub fn tick_interval(fps: u32) -> Duration {
        Duration::from_secs_f64(1.0 / fps.max(1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_constants() {
        let config = LifeConfig::default();
        assert_eq!(config.max_side, 400);
        assert_eq!(config.threshold, 128);
        assert!(config.mirror);
    }

    #[test]
    fn test_env_overrides_applied() {
        let config = LifeConfig::from_lookup(lookup_from(&[
            (ENV_MAX_SIDE, "200"),
            (ENV_THRESHOLD, " 90 "),
            (ENV_MIRROR, "off"),
        ]));
        assert_eq!(config, LifeConfig { max_side: 200, threshold: 90, mirror: false });
    }

    #[test]
    fn test_malformed_overrides_keep_defaults() {
        let config = LifeConfig::from_lookup(lookup_from(&[
            (ENV_MAX_SIDE, "0"),
            (ENV_THRESHOLD, "300"),
            (ENV_MIRROR, "maybe"),
        ]));
        assert_eq!(config, LifeConfig::default());
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(LifeConfig::tick_interval(4), Duration::from_millis(250));
        assert_eq!(LifeConfig::tick_interval(0), Duration::from_secs(1));
    }
}
