use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Referenced file does not exist.
    #[error("Fichier introuvable : {path}")]
    FileNotFound {
        /// Path that was not found.
        path: String,
    },

    /// The map has no rows at all.
    #[error("Grille vide : aucune ligne")]
    EmptyGrid,

    /// A row does not have the same length as the first row.
    #[error("Ligne {row} de longueur {found}, attendu {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Length of row 0, in chars.
        expected: usize,
        /// Length of the offending row, in chars.
        found: usize,
    },

    /// Tile coordinates outside the derived map dimensions.
    #[error("Tuile ({x},{y}) hors de la carte {width}×{height}")]
    TileOutOfBounds {
        /// Tile column.
        x: usize,
        /// Tile row.
        y: usize,
        /// Map width in tiles.
        width: usize,
        /// Map height in tiles.
        height: usize,
    },

    /// The 5x5 block of a tile reaches past the end of the grid.
    #[error("Bloc de la tuile ({x},{y}) hors grille (origine ligne {row}, colonne {col})")]
    BlockOutsideGrid {
        /// Tile column.
        x: usize,
        /// Tile row.
        y: usize,
        /// Origin row of the block in the grid.
        row: usize,
        /// Origin column of the block in the grid.
        col: usize,
    },
}
