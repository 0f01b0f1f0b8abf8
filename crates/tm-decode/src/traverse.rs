use std::fmt;

use rayon::prelude::*;
use serde::Serialize;
use tm_core::config::MapConfig;
use tm_core::error::CoreError;
use tm_core::grid::CharGrid;
use tm_core::layout::{EncodingMode, MapDims};

use crate::symbol::{SymbolRules, decode_symbol};
use crate::tile::{TileBlock, extract_tile};

/// Decodes every tile of a grid, row-major.
///
/// Holds no per-grid state: the same decoder can be reused on any number of
/// grids and always yields the same result for the same input.
///
/// # Example
/// ```
/// use tm_core::grid::CharGrid;
/// use tm_core::layout::EncodingMode;
/// use tm_decode::symbol::SymbolRules;
/// use tm_decode::traverse::TileDecoder;
///
/// let grid = CharGrid::new([
///     "+---++---+",
///     "|   ||   |",
///     "| 7 ||   |",
///     "|   ||   |",
///     "+---++---+",
/// ]).unwrap();
/// let decoder = TileDecoder::new(EncodingMode::Separate, SymbolRules::default());
/// let map = decoder.decode_map(&grid).unwrap();
/// assert_eq!(map.to_text(), "7.\n");
/// ```
#[derive(Clone, Debug)]
pub struct TileDecoder {
    mode: EncodingMode,
    rules: SymbolRules,
}

impl TileDecoder {
    /// Crée un décodeur pour un mode et des règles donnés.
    #[must_use]
    pub fn new(mode: EncodingMode, rules: SymbolRules) -> Self {
        Self { mode, rules }
    }

    /// Crée un décodeur à partir de la configuration.
    #[must_use]
    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(config.mode, SymbolRules::from_config(config))
    }

    /// Encoding mode in use.
    #[must_use]
    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    /// Tile-map dimensions of `grid` under this decoder's mode.
    #[must_use]
    pub fn dims(&self, grid: &CharGrid) -> MapDims {
        self.mode.map_dims(grid.rows(), grid.cols())
    }

    /// Edges and interior of tile (`x`, `y`).
    ///
    /// # Errors
    /// See [`extract_tile`].
    pub fn block(&self, grid: &CharGrid, x: usize, y: usize) -> Result<TileBlock, CoreError> {
        extract_tile(grid, self.mode, x, y)
    }

    /// Symbol of tile (`x`, `y`).
    ///
    /// # Errors
    /// See [`extract_tile`].
    pub fn decode_tile(&self, grid: &CharGrid, x: usize, y: usize) -> Result<String, CoreError> {
        let block = self.block(grid, x, y)?;
        Ok(decode_symbol(block.interior.each_ref(), &self.rules))
    }

    /// Symbols of tile row `y`, left to right.
    ///
    /// # Errors
    /// Fails on the first tile that cannot be extracted.
    pub fn decode_row(&self, grid: &CharGrid, y: usize) -> Result<Vec<String>, CoreError> {
        let dims = self.dims(grid);
        (0..dims.width)
            .map(|x| self.decode_tile(grid, x, y))
            .collect()
    }

    /// Lazy iterator over the decoded tile rows, top to bottom.
    ///
    /// Calling it again restarts from the first row.
    pub fn rows<'a>(
        &'a self,
        grid: &'a CharGrid,
    ) -> impl Iterator<Item = Result<Vec<String>, CoreError>> + 'a {
        (0..self.dims(grid).height).map(move |y| self.decode_row(grid, y))
    }

    /// Decode the whole map. Any tile error fails the whole operation.
    ///
    /// # Errors
    /// See [`extract_tile`].
    pub fn decode_map(&self, grid: &CharGrid) -> Result<DecodedMap, CoreError> {
        let dims = self.dims(grid);
        log::debug!(
            "Décodage {}×{} tuiles ({} mode)",
            dims.width,
            dims.height,
            self.mode
        );
        let rows = self.rows(grid).collect::<Result<Vec<_>, _>>()?;
        Ok(DecodedMap {
            mode: self.mode,
            dims,
            rows,
        })
    }

    /// Same as [`TileDecoder::decode_map`], rows decoded on the rayon pool.
    ///
    /// Row order is preserved.
    ///
    /// # Errors
    /// See [`extract_tile`].
    pub fn decode_map_par(&self, grid: &CharGrid) -> Result<DecodedMap, CoreError> {
        let dims = self.dims(grid);
        log::debug!(
            "Décodage parallèle {}×{} tuiles ({} mode)",
            dims.width,
            dims.height,
            self.mode
        );
        let rows = (0..dims.height)
            .into_par_iter()
            .map(|y| self.decode_row(grid, y))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DecodedMap {
            mode: self.mode,
            dims,
            rows,
        })
    }

    /// Serial or parallel decoding.
    ///
    /// # Errors
    /// See [`extract_tile`].
    pub fn decode(&self, grid: &CharGrid, parallel: bool) -> Result<DecodedMap, CoreError> {
        if parallel {
            self.decode_map_par(grid)
        } else {
            self.decode_map(grid)
        }
    }
}

/// Decoded symbols of a whole map, `rows[y][x]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DecodedMap {
    /// Mode the map was decoded with.
    pub mode: EncodingMode,
    /// Dimensions in tiles.
    #[serde(flatten)]
    pub dims: MapDims,
    /// One vector of symbols per tile row.
    pub rows: Vec<Vec<String>>,
}

impl DecodedMap {
    /// Symbol of tile (`x`, `y`).
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<&str> {
        self.rows.get(y).and_then(|r| r.get(x)).map(String::as_str)
    }

    /// Every tile as `(x, y, symbol)`, in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, &str)> {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, symbol)| (x, y, symbol.as_str()))
        })
    }

    /// Render as text: symbols of a row concatenated, `\n` after each row.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DecodedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for symbol in row {
                f.write_str(symbol)?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tm_core::config::MarkerPolicy;

    use super::*;

    /// 2x2 separate-mode map: A, blank / marker tile, B.
    fn separate_2x2() -> CharGrid {
        CharGrid::new([
            "+---++---+",
            "|   ||   |",
            "| A ||   |",
            "|   ||   |",
            "+---++---+",
            "+---++---+",
            "|   ||   |",
            "|5W3|| B |",
            "|   ||   |",
            "+---++---+",
        ])
        .unwrap()
    }

    /// Same content, shared borders.
    fn shared_2x2() -> CharGrid {
        CharGrid::new([
            "+---+---+",
            "|   |   |",
            "| A |   |",
            "|   |   |",
            "+---+---+",
            "|   |   |",
            "|5W3| B |",
            "|   |   |",
            "+---+---+",
        ])
        .unwrap()
    }

    fn decoder(mode: EncodingMode) -> TileDecoder {
        TileDecoder::new(mode, SymbolRules::default())
    }

    #[test]
    fn row_major_order() -> Result<(), CoreError> {
        let map = decoder(EncodingMode::Separate).decode_map(&separate_2x2())?;
        let order: Vec<_> = map.tiles().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(order, [(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(map.to_text(), "A.\nWB\n");
        Ok(())
    }

    #[test]
    fn both_modes_decode_the_same_map() -> Result<(), CoreError> {
        let separate = decoder(EncodingMode::Separate).decode_map(&separate_2x2())?;
        let shared = decoder(EncodingMode::Shared).decode_map(&shared_2x2())?;
        assert_eq!(separate.rows, shared.rows);
        assert_eq!(shared.dims, MapDims { width: 2, height: 2 });
        Ok(())
    }

    #[test]
    fn decoding_is_deterministic() -> Result<(), CoreError> {
        let grid = shared_2x2();
        let dec = decoder(EncodingMode::Shared);
        assert_eq!(dec.decode_map(&grid)?, dec.decode_map(&grid)?);
        let first: Vec<_> = dec.rows(&grid).collect();
        let second: Vec<_> = dec.rows(&grid).collect();
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn parallel_matches_serial() -> Result<(), CoreError> {
        let grid = separate_2x2();
        let dec = decoder(EncodingMode::Separate);
        assert_eq!(dec.decode(&grid, true)?, dec.decode(&grid, false)?);
        Ok(())
    }

    #[test]
    fn tile_queries_reject_out_of_bounds() {
        let grid = shared_2x2();
        let dec = decoder(EncodingMode::Shared);
        assert!(matches!(
            dec.decode_tile(&grid, 2, 0),
            Err(CoreError::TileOutOfBounds { .. })
        ));
        assert!(matches!(
            dec.decode_tile(&grid, 0, 2),
            Err(CoreError::TileOutOfBounds { .. })
        ));
        assert_eq!(dec.decode_tile(&grid, 1, 1).as_deref(), Ok("B"));
    }

    #[test]
    fn composite_policy_flows_through_config() -> Result<(), CoreError> {
        let config = MapConfig {
            marker_policy: MarkerPolicy::Composite,
            ..MapConfig::default()
        };
        let map = TileDecoder::from_config(&config).decode_map(&separate_2x2())?;
        assert_eq!(map.get(0, 1), Some("5W3"));
        assert_eq!(map.to_text(), "A.\n5W3B\n");
        Ok(())
    }

    #[test]
    fn grid_smaller_than_a_tile_decodes_to_nothing() -> Result<(), CoreError> {
        let grid = CharGrid::new(["abc"])?;
        let map = decoder(EncodingMode::Separate).decode_map(&grid)?;
        assert!(map.rows.is_empty());
        assert_eq!(map.to_text(), "");
        Ok(())
    }
}
