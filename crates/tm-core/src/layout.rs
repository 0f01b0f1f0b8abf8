use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Side of a tile block, in characters.
pub const TILE_SIZE: usize = 5;

/// How tile blocks are laid out in the character grid.
///
/// # Example
/// ```
/// use tm_core::layout::EncodingMode;
/// assert_eq!(EncodingMode::Separate.origin(2, 1), (5, 10));
/// assert_eq!(EncodingMode::Shared.origin(2, 1), (4, 8));
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum EncodingMode {
    /// Each tile owns its full 5x5 block.
    #[default]
    Separate,
    /// Neighbouring tiles share their border row/column.
    Shared,
}

impl EncodingMode {
    /// Distance between the origins of two adjacent tiles.
    #[inline]
    #[must_use]
    pub const fn stride(self) -> usize {
        match self {
            Self::Separate => TILE_SIZE,
            Self::Shared => TILE_SIZE - 1,
        }
    }

    /// Grid position (row, col) of the top-left corner of tile (`x`, `y`).
    #[inline]
    #[must_use]
    pub const fn origin(self, x: usize, y: usize) -> (usize, usize) {
        (y * self.stride(), x * self.stride())
    }

    /// Tile-map dimensions for a grid of `rows` × `cols` characters.
    ///
    /// Leftover rows/columns that do not complete a tile are ignored.
    ///
    /// # Example
    /// ```
    /// use tm_core::layout::{EncodingMode, MapDims};
    /// assert_eq!(EncodingMode::Separate.map_dims(10, 15), MapDims { width: 3, height: 2 });
    /// assert_eq!(EncodingMode::Shared.map_dims(9, 13), MapDims { width: 3, height: 2 });
    /// ```
    #[must_use]
    pub const fn map_dims(self, rows: usize, cols: usize) -> MapDims {
        match self {
            Self::Separate => MapDims {
                width: cols / TILE_SIZE,
                height: rows / TILE_SIZE,
            },
            Self::Shared => MapDims {
                width: cols.saturating_sub(1) / self.stride(),
                height: rows.saturating_sub(1) / self.stride(),
            },
        }
    }

    /// Lowercase name, as accepted by [`EncodingMode::from_str`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Separate => "separate",
            Self::Shared => "shared",
        }
    }
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "separate" => Ok(Self::Separate),
            "shared" => Ok(Self::Shared),
            other => Err(CoreError::Config(format!(
                "mode d'encodage inconnu '{other}' (attendu : separate, shared)"
            ))),
        }
    }
}

/// Size of the tile map, in tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MapDims {
    /// Tiles per row.
    pub width: usize,
    /// Number of tile rows.
    pub height: usize,
}

impl MapDims {
    /// `true` if tile (`x`, `y`) lies inside the map.
    #[inline]
    #[must_use]
    pub const fn contains(self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Total number of tiles.
    #[must_use]
    pub const fn tile_count(self) -> usize {
        self.width * self.height
    }
}
