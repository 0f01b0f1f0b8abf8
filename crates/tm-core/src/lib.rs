/// Shared types for tilemap: character grid, tile geometry, configuration.
///
/// Every other crate in the workspace depends on these types. None of them
/// perform I/O except `config::load_config`.

pub mod config;
pub mod error;
pub mod grid;
pub mod layout;

pub use config::MapConfig;
pub use error::CoreError;
pub use grid::CharGrid;
pub use layout::{EncodingMode, MapDims};
