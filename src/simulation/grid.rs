use crate::simulation::FrameError;

/// Row-major 8-bit brightness image as delivered by a camera source
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrightnessField {
    height: usize,
    width: usize,
    pixels: Vec<u8>,
}

impl BrightnessField {
    /// Wrap raw pixels; both dimensions must be non-zero and match the buffer
    pub fn new(height: usize, width: usize, pixels: Vec<u8>) -> Result<Self, FrameError> {
        if height == 0 || width == 0 {
            return Err(FrameError::degenerate(format!(
                "brightness field has a zero dimension ({}x{})",
                height, width
            )));
        }
        if pixels.len() != height * width {
            return Err(FrameError::degenerate(format!(
                "expected {} pixels for {}x{}, got {}",
                height * width,
                height,
                width,
                pixels.len()
            )));
        }
        Ok(Self { height, width, pixels })
    }

    /// Build a field from nested rows (all rows must share a length)
    #[cfg(test)]
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self, FrameError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if rows.iter().any(|row| row.len() != width) {
            return Err(FrameError::degenerate("rows have differing lengths"));
        }
        Self::new(height, width, rows.concat())
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn row(&self, row: usize) -> &[u8] {
        &self.pixels[row * self.width..(row + 1) * self.width]
    }

    /// Horizontally flipped copy
    pub fn mirrored(&self) -> Self {
        let pixels = (0..self.height)
            .flat_map(|row| self.row(row).iter().rev().copied())
            .collect();
        Self {
            height: self.height,
            width: self.width,
            pixels,
        }
    }

    pub(crate) fn from_parts_unchecked(height: usize, width: usize, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), height * width);
        Self { height, width, pixels }
    }
}

/// Square grid of live/dead cells, row-major
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    side: usize,
    cells: Vec<bool>,
}

impl CellGrid {
    /// All-dead grid of the given side
    pub fn dead(side: usize) -> Self {
        Self {
            side,
            cells: vec![false; side * side],
        }
    }

    /// Parse a square picture; `#`, `O` and `1` are alive, anything else dead.
    /// Short rows are padded with dead cells, and missing rows are added, so
    /// the result always has side `max(rows, longest row)`.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        let side = rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0)
            .max(rows.len());
        let mut grid = Self::dead(side);
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                grid.cells[r * side + c] = matches!(ch, '#' | 'O' | '1');
            }
        }
        grid
    }

    pub(crate) fn from_cells(side: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), side * side);
        Self { side, cells }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.side + col]
    }

    #[cfg(test)]
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        self.cells[row * self.side + col] = alive;
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Elementwise OR. A grid of a different side cannot be merged, in which
    /// case a copy of `self` is returned.
    pub fn union(&self, other: &CellGrid) -> CellGrid {
        if self.side != other.side {
            log::warn!(
                "Cannot merge {0}x{0} grid into {1}x{1} grid, keeping current cells",
                other.side,
                self.side
            );
            return self.clone();
        }
        let cells = self
            .cells
            .iter()
            .zip(&other.cells)
            .map(|(&a, &b)| a || b)
            .collect();
        CellGrid::from_cells(self.side, cells)
    }

    /// One u32 per cell (1 = alive) for GPU upload
    pub fn to_u32_cells(&self) -> Vec<u32> {
        self.cells.iter().map(|&alive| alive as u32).collect()
    }

    /// Render as `#`/`.` rows, handy in assertion messages
    #[cfg(test)]
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.side.max(1))
            .map(|row| row.iter().map(|&alive| if alive { '#' } else { '.' }).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_rejects_zero_dimension() {
        let err = BrightnessField::new(0, 10, Vec::new()).unwrap_err();
        assert!(matches!(err, FrameError::DegenerateInput { .. }));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_field_rejects_size_mismatch() {
        assert!(BrightnessField::new(2, 2, vec![0; 3]).is_err());
        assert!(BrightnessField::from_rows(&[&[1, 2], &[3]]).is_err());
    }

    #[test]
    fn test_mirrored_flips_columns() {
        let field = BrightnessField::from_rows(&[&[1, 2, 3], &[4, 5, 6]]).unwrap();
        let flipped = field.mirrored();
        assert_eq!(flipped.row(0), &[3, 2, 1]);
        assert_eq!(flipped.row(1), &[6, 5, 4]);
        assert_eq!(field.row(0), &[1, 2, 3], "Original must be untouched");
    }

    #[test]
    fn test_from_rows_pads_to_square() {
        let grid = CellGrid::from_rows(&["#.#", ".#"]);
        assert_eq!(grid.side(), 3);
        assert_eq!(grid.to_rows(), vec!["#.#", ".#.", "..."]);
        assert_eq!(grid.population(), 3);
    }

    #[test]
    fn test_union() {
        let a = CellGrid::from_rows(&["#.", ".."]);
        let b = CellGrid::from_rows(&["..", ".#"]);
        assert_eq!(a.union(&b).to_rows(), vec!["#.", ".#"]);
    }

    #[test]
    fn test_union_side_mismatch_keeps_receiver() {
        let a = CellGrid::from_rows(&["#.", ".."]);
        let b = CellGrid::dead(3);
        assert_eq!(a.union(&b), a);
    }

    #[test]
    fn test_u32_cells() {
        let grid = CellGrid::from_rows(&["#.", ".#"]);
        assert_eq!(grid.to_u32_cells(), vec![1, 0, 0, 1]);
    }
}
