use crate::simulation::{BrightnessField, CellGrid, FrameError};

/// Camera frame to cell grid: decimate, pad to square, threshold.
/// The result is a square grid no larger than `max_side`.
pub fn normalize(
    field: &BrightnessField,
    max_side: usize,
    threshold: u8,
) -> Result<CellGrid, FrameError> {
    if max_side == 0 {
        return Err(FrameError::degenerate("maximum grid side must be positive"));
    }
    let small = scale_down(field, max_side);
    let square = squarify(&small);
    Ok(binarize(&square, threshold))
}

/// Keep every other row and column until both dimensions fit in `max_side`.
/// Sampled pixels keep their exact values; nothing is averaged.
/// A `max_side` of 0 is treated as 1, since decimation never goes below 1x1.
fn scale_down(field: &BrightnessField, max_side: usize) -> BrightnessField {
    let max_side = max_side.max(1);
    let mut current = field.clone();
    while current.height() > max_side || current.width() > max_side {
        let height = (current.height() + 1) / 2;
        let width = (current.width() + 1) / 2;
        let pixels = (0..height)
            .flat_map(|r| {
                let row = current.row(r * 2);
                (0..width).map(move |c| row[c * 2])
            })
            .collect();
        current = BrightnessField::from_parts_unchecked(height, width, pixels);
    }
    current
}

/// Zero-pad the shorter dimension so the field becomes `n x n`, `n = max(h, w)`.
/// The leading pad is `(n - len) / 2`; any odd unit goes to the bottom/right.
fn squarify(field: &BrightnessField) -> BrightnessField {
    let (h, w) = (field.height(), field.width());
    let n = h.max(w);
    if h == w {
        return field.clone();
    }

    let pad_top = (n - h) / 2;
    let pad_left = (n - w) / 2;
    let mut pixels = vec![0u8; n * n];
    for r in 0..h {
        let start = (r + pad_top) * n + pad_left;
        pixels[start..start + w].copy_from_slice(field.row(r));
    }
    BrightnessField::from_parts_unchecked(n, n, pixels)
}

/// A cell is alive when its brightness is strictly above `threshold`.
/// Expects a square field (see [`squarify`]).
fn binarize(field: &BrightnessField, threshold: u8) -> CellGrid {
    debug_assert_eq!(field.height(), field.width());
    let side = field.height();
    let cells = (0..side)
        .flat_map(|r| field.row(r).iter().map(|&v| v > threshold))
        .collect();
    CellGrid::from_cells(side, cells)
}
