use tm_core::error::CoreError;
use tm_core::grid::CharGrid;
use tm_core::layout::{EncodingMode, TILE_SIZE};

/// Length of an edge segment and of an interior row.
pub const INNER: usize = TILE_SIZE - 2;

/// The 5x5 block of one tile, split into its four edges and its interior.
///
/// Corners are not part of any edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBlock {
    /// Row 0, columns 1–3.
    pub north: String,
    /// Row 4, columns 1–3.
    pub south: String,
    /// Column 0, rows 1–3, top to bottom.
    pub west: String,
    /// Column 4, rows 1–3, top to bottom.
    pub east: String,
    /// Rows 1–3, columns 1–3.
    pub interior: [String; INNER],
}

impl TileBlock {
    /// Interior rows concatenated in order, 9 characters.
    #[must_use]
    pub fn interior_text(&self) -> String {
        self.interior.concat()
    }
}

/// Extract the block of tile (`x`, `y`).
///
/// # Errors
/// `CoreError::TileOutOfBounds` if (`x`, `y`) is outside the map derived from
/// the grid size; `CoreError::BlockOutsideGrid` if the block would read past
/// the grid.
///
/// # Example
/// ```
/// use tm_core::grid::CharGrid;
/// use tm_core::layout::EncodingMode;
/// use tm_decode::tile::extract_tile;
///
/// let grid = CharGrid::new(["+---+", "|   |", "| A >", "|   |", "+-v-+"]).unwrap();
/// let block = extract_tile(&grid, EncodingMode::Separate, 0, 0).unwrap();
/// assert_eq!(block.north, "---");
/// assert_eq!(block.east, "|>|");
/// assert_eq!(block.south, "-v-");
/// assert_eq!(block.interior_text(), "    A    ");
/// ```
pub fn extract_tile(
    grid: &CharGrid,
    mode: EncodingMode,
    x: usize,
    y: usize,
) -> Result<TileBlock, CoreError> {
    let dims = mode.map_dims(grid.rows(), grid.cols());
    if !dims.contains(x, y) {
        return Err(CoreError::TileOutOfBounds {
            x,
            y,
            width: dims.width,
            height: dims.height,
        });
    }

    let (row, col) = mode.origin(x, y);
    let outside = || CoreError::BlockOutsideGrid { x, y, row, col };

    let north = grid.span(row, col + 1, INNER).ok_or_else(outside)?;
    let south = grid
        .span(row + TILE_SIZE - 1, col + 1, INNER)
        .ok_or_else(outside)?;
    let west = grid.column_span(row + 1, col, INNER).ok_or_else(outside)?;
    let east = grid
        .column_span(row + 1, col + TILE_SIZE - 1, INNER)
        .ok_or_else(outside)?;

    let mut interior: [String; INNER] = Default::default();
    for (i, line) in interior.iter_mut().enumerate() {
        *line = grid.span(row + 1 + i, col + 1, INNER).ok_or_else(outside)?;
    }

    Ok(TileBlock {
        north,
        south,
        west,
        east,
        interior,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two tiles side by side sharing column 4.
    fn shared_pair() -> CharGrid {
        CharGrid::new([
            "+abc+def+",
            "1   x   4",
            "2 A y B 5",
            "3   z   6",
            "+ghi+jkl+",
        ])
        .unwrap()
    }

    #[test]
    fn shared_border_is_east_of_left_and_west_of_right() -> Result<(), CoreError> {
        let grid = shared_pair();
        let left = extract_tile(&grid, EncodingMode::Shared, 0, 0)?;
        let right = extract_tile(&grid, EncodingMode::Shared, 1, 0)?;
        assert_eq!(left.east, "xyz");
        assert_eq!(right.west, "xyz");
        assert_eq!(left.west, "123");
        assert_eq!(right.east, "456");
        assert_eq!(left.north, "abc");
        assert_eq!(right.south, "jkl");
        assert_eq!(right.interior_text().trim(), "B");
        Ok(())
    }

    #[test]
    fn separate_mode_uses_independent_blocks() -> Result<(), CoreError> {
        let grid = CharGrid::new([
            "+nnn++NNN+",
            "w   ee   E",
            "w a ee b E",
            "w   ee   E",
            "+sss++SSS+",
        ])?;
        let a = extract_tile(&grid, EncodingMode::Separate, 0, 0)?;
        let b = extract_tile(&grid, EncodingMode::Separate, 1, 0)?;
        assert_eq!((a.north.as_str(), a.east.as_str()), ("nnn", "eee"));
        assert_eq!((b.west.as_str(), b.south.as_str()), ("eee", "SSS"));
        assert_eq!(b.interior, ["   ".to_string(), " b ".into(), "   ".into()]);
        Ok(())
    }

    #[test]
    fn out_of_bounds_fails_instead_of_clamping() {
        let grid = shared_pair();
        assert_eq!(
            extract_tile(&grid, EncodingMode::Shared, 2, 0),
            Err(CoreError::TileOutOfBounds {
                x: 2,
                y: 0,
                width: 2,
                height: 1
            })
        );
        assert!(matches!(
            extract_tile(&grid, EncodingMode::Shared, 0, 1),
            Err(CoreError::TileOutOfBounds { .. })
        ));
    }

    #[test]
    fn grid_too_small_for_a_tile() -> Result<(), CoreError> {
        let grid = CharGrid::new(["abcd", "efgh"])?;
        assert!(matches!(
            extract_tile(&grid, EncodingMode::Separate, 0, 0),
            Err(CoreError::TileOutOfBounds {
                width: 0,
                height: 0,
                ..
            })
        ));
        Ok(())
    }
}
