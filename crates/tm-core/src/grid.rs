use crate::error::CoreError;

/// Rectangular, read-only grid of characters loaded from a map file.
///
/// Widths are counted in `char`s, not bytes, so a stray non-ASCII glyph
/// shifts nothing.
///
/// # Example
/// ```
/// use tm_core::grid::CharGrid;
/// let grid = CharGrid::new(["ab", "cd"]).unwrap();
/// assert_eq!(grid.rows(), 2);
/// assert_eq!(grid.cols(), 2);
/// assert_eq!(grid.get(1, 0), Some('c'));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharGrid {
    cells: Vec<Vec<char>>,
    cols: usize,
}

impl CharGrid {
    /// Build a grid from its rows.
    ///
    /// # Errors
    /// `CoreError::EmptyGrid` if there is no row, `CoreError::RaggedRow` if
    /// any row differs in length from the first one.
    pub fn new<I, S>(rows: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cells: Vec<Vec<char>> = rows
            .into_iter()
            .map(|row| row.as_ref().chars().collect())
            .collect();

        let Some(first) = cells.first() else {
            return Err(CoreError::EmptyGrid);
        };
        let cols = first.len();

        if let Some((row, found)) = cells
            .iter()
            .enumerate()
            .find_map(|(i, r)| (r.len() != cols).then_some((i, r.len())))
        {
            return Err(CoreError::RaggedRow {
                row,
                expected: cols,
                found,
            });
        }

        Ok(Self { cells, cols })
    }

    /// Split `text` into lines (`\n` or `\r\n`) and build a grid.
    ///
    /// A trailing newline does not produce an extra empty row.
    ///
    /// # Errors
    /// Same as [`CharGrid::new`].
    ///
    /// # Example
    /// ```
    /// use tm_core::grid::CharGrid;
    /// let grid = CharGrid::from_text("xy\r\nzw\n").unwrap();
    /// assert_eq!((grid.rows(), grid.cols()), (2, 2));
    /// ```
    pub fn from_text(text: &str) -> Result<Self, CoreError> {
        Self::new(text.lines())
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns (identical for every row).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Character at (`row`, `col`), `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Horizontal run of `len` characters starting at (`row`, `col`).
    ///
    /// Returns `None` if any part of the run is outside the grid.
    #[must_use]
    pub fn span(&self, row: usize, col: usize, len: usize) -> Option<String> {
        self.cells
            .get(row)
            .and_then(|r| r.get(col..col + len))
            .map(|chars| chars.iter().collect())
    }

    /// Vertical run of `len` characters starting at (`row`, `col`).
    #[must_use]
    pub fn column_span(&self, row: usize, col: usize, len: usize) -> Option<String> {
        (row..row + len).map(|r| self.get(r, col)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_input() {
        let rows: [&str; 0] = [];
        assert_eq!(CharGrid::new(rows), Err(CoreError::EmptyGrid));
        assert_eq!(CharGrid::from_text(""), Err(CoreError::EmptyGrid));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = CharGrid::new(["abc", "abc", "ab"]).unwrap_err();
        assert_eq!(
            err,
            CoreError::RaggedRow {
                row: 2,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn crlf_and_trailing_newline_are_ignored() -> Result<(), CoreError> {
        let unix = CharGrid::from_text("ab\ncd")?;
        let dos = CharGrid::from_text("ab\r\ncd\r\n")?;
        assert_eq!(unix, dos);
        Ok(())
    }

    #[test]
    fn spans_stay_inside_the_grid() -> Result<(), CoreError> {
        let grid = CharGrid::new(["abcd", "efgh", "ijkl"])?;
        assert_eq!(grid.span(1, 1, 3).as_deref(), Some("fgh"));
        assert_eq!(grid.span(1, 2, 3), None);
        assert_eq!(grid.column_span(0, 3, 3).as_deref(), Some("dhl"));
        assert_eq!(grid.column_span(1, 3, 3), None);
        Ok(())
    }

    #[test]
    fn width_counts_chars_not_bytes() -> Result<(), CoreError> {
        let grid = CharGrid::new(["é░", "ab"])?;
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.get(0, 1), Some('░'));
        Ok(())
    }
}
