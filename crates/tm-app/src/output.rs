use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use tm_core::config::{MapConfig, OutputFormat};
use tm_decode::tile::TileBlock;
use tm_decode::traverse::{DecodedMap, TileDecoder};
use tm_source::map_file::MapFile;

/// Rendu de la carte décodée selon le format demandé.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render_map(map: &DecodedMap, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(map.to_text()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(map).context("Sérialisation JSON")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Human-readable dump of one tile's edges, interior and symbol.
#[must_use]
pub fn render_block(x: usize, y: usize, block: &TileBlock, symbol: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "tile ({x},{y})");
    let _ = writeln!(out, "N {}", block.north);
    let _ = writeln!(out, "S {}", block.south);
    let _ = writeln!(out, "W {}", block.west);
    let _ = writeln!(out, "E {}", block.east);
    for row in &block.interior {
        let _ = writeln!(out, "| {row}");
    }
    let _ = writeln!(out, "tile [{symbol}]");
    out
}

/// Decode `map` and write it to stdout.
///
/// # Errors
/// Returns an error if a tile cannot be decoded or stdout is closed.
pub fn emit_map(map: &MapFile, decoder: &TileDecoder, config: &MapConfig) -> Result<()> {
    let decoded = decoder
        .decode(&map.grid, config.parallel)
        .with_context(|| format!("Décodage de {}", map.path.display()))?;
    let text = render_map(&decoded, config.format)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Decode a single tile and write its dump to stdout.
///
/// # Errors
/// Returns an error if (`x`, `y`) is outside the map.
pub fn emit_tile(map: &MapFile, decoder: &TileDecoder, x: usize, y: usize) -> Result<()> {
    let block = decoder
        .block(&map.grid, x, y)
        .with_context(|| format!("Tuile ({x},{y}) de {}", map.path.display()))?;
    let symbol = decoder.decode_tile(&map.grid, x, y)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(render_block(x, y, &block, &symbol).as_bytes())?;
    Ok(())
}
