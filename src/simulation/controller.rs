use crate::config::LifeConfig;
use crate::simulation::{engine, normalize, BrightnessField, CellGrid, FrameError};

/// Which view drives the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Grid is the live thresholded camera image, replaced every tick
    Camera,
    /// Grid evolves under Life rules, reseeded from the camera
    Game { paused: bool },
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Camera => "CAMERA",
            Mode::Game { .. } => "GAME",
        }
    }
}

/// Owns the simulation state and applies camera frames and user commands to it
pub struct SimulationController {
    config: LifeConfig,
    grid: Option<CellGrid>,
    mode: Mode,
    generation: u64,
}

impl SimulationController {
    pub fn new(config: LifeConfig) -> Self {
        Self {
            config,
            grid: None,
            mode: Mode::Camera,
            generation: 0,
        }
    }

    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Only meaningful in game mode; always false in camera mode
    pub fn is_paused(&self) -> bool {
        matches!(self.mode, Mode::Game { paused: true })
    }

    pub fn grid(&self) -> Option<&CellGrid> {
        self.grid.as_ref()
    }

    /// Life steps taken since the last reset
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Camera -> running game; in game mode flips pause.
    /// An existing grid is kept; an absent one is seeded by the next tick.
    pub fn on_toggle(&mut self) {
        self.mode = match self.mode {
            Mode::Camera => Mode::Game { paused: false },
            Mode::Game { paused } => Mode::Game { paused: !paused },
        };
        log::info!("Toggle -> {}", self.status_line());
    }

    /// Back to the camera view with no grid
    pub fn on_reset(&mut self) {
        self.mode = Mode::Camera;
        self.grid = None;
        self.generation = 0;
        log::info!("Reset to camera view");
    }

    /// Mirror (if configured), normalize and apply one camera frame
    pub fn on_frame(&mut self, field: &BrightnessField) -> Result<&CellGrid, FrameError> {
        let live_frame = if self.config.mirror {
            normalize::normalize(&field.mirrored(), self.config.max_side, self.config.threshold)?
        } else {
            normalize::normalize(field, self.config.max_side, self.config.threshold)?
        };
        Ok(self.tick(live_frame))
    }

    /// Merge one normalized camera grid into the state according to the mode
    pub fn tick(&mut self, live_frame: CellGrid) -> &CellGrid {
        let next = match (self.mode, self.grid.take()) {
            (Mode::Camera, _) => live_frame,
            (Mode::Game { .. }, None) => {
                let seeded = self.advance(&live_frame, &live_frame);
                log::debug!("Game grid seeded with {} live cells", live_frame.population());
                seeded
            }
            (Mode::Game { .. }, Some(current)) => self.advance(&current, &live_frame),
        };
        log::trace!("Tick: {}", self.status_line_for(&next));
        self.grid.insert(next)
    }

    // Paused: frozen, camera input dropped. Running: reseed then step.
    fn advance(&mut self, current: &CellGrid, live_frame: &CellGrid) -> CellGrid {
        if self.is_paused() {
            return current.clone();
        }
        self.generation += 1;
        engine::step(&current.union(live_frame))
    }

    /// e.g. `Mode: GAME | Paused: false | Gen: 12 | Alive: 40`
    pub fn status_line(&self) -> String {
        match &self.grid {
            Some(grid) => self.status_line_for(grid),
            None => format!(
                "Mode: {} | Paused: {} | Gen: {} | Alive: -",
                self.mode.label(),
                self.paused_label(),
                self.generation
            ),
        }
    }

    fn status_line_for(&self, grid: &CellGrid) -> String {
        format!(
            "Mode: {} | Paused: {} | Gen: {} | Alive: {}",
            self.mode.label(),
            self.paused_label(),
            self.generation,
            grid.population()
        )
    }

    fn paused_label(&self) -> &'static str {
        match self.mode {
            Mode::Camera => "N/A",
            Mode::Game { paused: true } => "true",
            Mode::Game { paused: false } => "false",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> SimulationController {
        SimulationController::new(LifeConfig {
            mirror: false,
            ..LifeConfig::default()
        })
    }

    fn glider_on(side: usize) -> CellGrid {
        let mut grid = CellGrid::dead(side);
        for (r, c) in [(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)] {
            grid.set(r, c, true);
        }
        grid
    }

    fn shifted(grid: &CellGrid, down: usize, right: usize) -> CellGrid {
        let side = grid.side();
        let mut out = CellGrid::dead(side);
        for r in 0..side {
            for c in 0..side {
                if grid.get(r, c) {
                    out.set(r + down, c + right, true);
                }
            }
        }
        out
    }

    #[test]
    fn test_initial_state() {
        let sim = controller();
        assert_eq!(sim.mode(), Mode::Camera);
        assert!(!sim.is_paused());
        assert!(sim.grid().is_none());
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn test_toggle_transitions() {
        let mut sim = controller();
        sim.on_toggle();
        assert_eq!(sim.mode(), Mode::Game { paused: false });
        sim.on_toggle();
        assert_eq!(sim.mode(), Mode::Game { paused: true });
        assert!(sim.is_paused());
        sim.on_toggle();
        assert_eq!(sim.mode(), Mode::Game { paused: false });
    }

    #[test]
    fn test_reset_from_every_state() {
        for toggles in 0..3 {
            let mut sim = controller();
            sim.tick(CellGrid::from_rows(&["#.", ".#"]));
            for _ in 0..toggles {
                sim.on_toggle();
            }
            sim.tick(CellGrid::from_rows(&["#.", ".#"]));
            sim.on_reset();
            assert_eq!(sim.mode(), Mode::Camera, "after {} toggles", toggles);
            assert!(!sim.is_paused());
            assert!(sim.grid().is_none());
            assert_eq!(sim.generation(), 0);
        }
    }

    #[test]
    fn test_camera_mode_is_passthrough() {
        let mut sim = controller();
        let frames = [
            CellGrid::from_rows(&["##.", "...", "..."]),
            CellGrid::from_rows(&["...", ".#.", "..."]),
            CellGrid::dead(3),
        ];
        for frame in frames {
            assert_eq!(sim.tick(frame.clone()), &frame);
        }
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn test_toggle_keeps_camera_grid_as_seed() {
        let mut sim = controller();
        let blinker = CellGrid::from_rows(&[".....", ".....", ".###.", ".....", "....."]);
        sim.tick(blinker.clone());
        sim.on_toggle();
        assert_eq!(sim.grid(), Some(&blinker), "Toggle must not touch an existing grid");

        let next = sim.tick(CellGrid::dead(5)).clone();
        assert_eq!(next.to_rows(), vec![".....", "..#..", "..#..", "..#..", "....."]);
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn test_game_grid_seeded_when_absent() {
        let mut sim = controller();
        sim.on_toggle();
        assert!(sim.grid().is_none());

        let block = CellGrid::from_rows(&["....", ".##.", ".##.", "...."]);
        assert_eq!(sim.tick(block.clone()), &block);
    }

    #[test]
    fn test_live_frame_reseeds_running_game() {
        let mut sim = controller();
        sim.tick(CellGrid::dead(5));
        sim.on_toggle();

        // A horizontal bar seen by the camera joins the (empty) game and steps
        let bar = CellGrid::from_rows(&[".....", ".....", ".###.", ".....", "....."]);
        let next = sim.tick(bar).clone();
        assert_eq!(next.to_rows(), vec![".....", "..#..", "..#..", "..#..", "....."]);
    }

    #[test]
    fn test_paused_before_first_frame_adopts_frame_without_stepping() {
        let mut sim = controller();
        sim.on_toggle();
        sim.on_toggle();
        assert_eq!(sim.mode(), Mode::Game { paused: true });
        assert!(sim.grid().is_none());

        // A stepped blinker would turn vertical
        let blinker = CellGrid::from_rows(&[".....", ".....", ".###.", ".....", "....."]);
        assert_eq!(sim.tick(blinker.clone()), &blinker);
        assert_eq!(sim.generation(), 0);

        // Still frozen on later ticks, whatever the camera sees
        assert_eq!(sim.tick(CellGrid::dead(5)), &blinker);
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn test_paused_game_ignores_camera() {
        let mut sim = controller();
        let block = CellGrid::from_rows(&["....", ".##.", ".##.", "...."]);
        sim.tick(block.clone());
        sim.on_toggle();
        sim.on_toggle();
        assert!(sim.is_paused());

        for _ in 0..3 {
            assert_eq!(sim.tick(CellGrid::from_rows(&["####", "####", "####", "####"])), &block);
        }
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn test_glider_translates_every_four_generations() {
        let side = 12;
        let start = glider_on(side);
        let mut sim = controller();
        sim.tick(start.clone());
        sim.on_toggle();

        let mut expected = start;
        for cycle in 1..=4 {
            for _ in 0..4 {
                sim.tick(CellGrid::dead(side));
            }
            expected = shifted(&expected, 1, 1);
            let grid = sim.grid().unwrap();
            assert_eq!(
                grid,
                &expected,
                "cycle {}: got\n{}",
                cycle,
                grid.to_rows().join("\n")
            );
            assert_eq!(grid.population(), 5);
        }
        assert_eq!(sim.generation(), 16);
    }

    #[test]
    fn test_on_frame_normalizes_and_mirrors() {
        let field = BrightnessField::from_rows(&[&[255, 0], &[0, 0]]).unwrap();

        let mut plain = controller();
        assert_eq!(plain.on_frame(&field).unwrap().to_rows(), vec!["#.", ".."]);

        let mut mirrored = SimulationController::new(LifeConfig::default());
        assert_eq!(mirrored.on_frame(&field).unwrap().to_rows(), vec![".#", ".."]);
    }

    #[test]
    fn test_status_line() {
        let mut sim = controller();
        assert_eq!(sim.status_line(), "Mode: CAMERA | Paused: N/A | Gen: 0 | Alive: -");
        sim.tick(CellGrid::from_rows(&["##", ".."]));
        sim.on_toggle();
        sim.on_toggle();
        assert_eq!(sim.status_line(), "Mode: GAME | Paused: true | Gen: 0 | Alive: 2");
    }
}
