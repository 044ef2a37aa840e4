use crate::simulation::CellGrid;

/// Live cells among the 8 surrounding positions. Positions outside the grid
/// count as dead; the board does not wrap.
pub fn live_neighbors(grid: &CellGrid, row: usize, col: usize) -> u8 {
    let side = grid.side() as isize;
    let mut count = 0;

    for row_offset in -1..=1 {
        for col_offset in -1..=1 {
            if row_offset == 0 && col_offset == 0 {
                continue;
            }

            let r = row as isize + row_offset;
            let c = col as isize + col_offset;
            if r < 0 || c < 0 || r >= side || c >= side {
                continue;
            }

            if grid.get(r as usize, c as usize) {
                count += 1;
            }
        }
    }

    count
}

/// Next generation under B3/S23: alive iff 3 neighbors, or alive with 2.
pub fn step(grid: &CellGrid) -> CellGrid {
    let side = grid.side();
    let cells = (0..side)
        .flat_map(|row| (0..side).map(move |col| (row, col)))
        .map(|(row, col)| {
            let neighbors = live_neighbors(grid, row, col);
            neighbors == 3 || (grid.get(row, col) && neighbors == 2)
        })
        .collect();
    CellGrid::from_cells(side, cells)
}
