/// Tile decoder for tilemap.
///
/// Turns a character grid into one symbol per tile.
pub mod symbol;
pub mod tile;
pub mod traverse;

pub use symbol::{SymbolRules, decode_symbol};
pub use tile::{TileBlock, extract_tile};
pub use traverse::{DecodedMap, TileDecoder};
