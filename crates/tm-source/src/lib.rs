/// Map file sources for tilemap.

pub mod map_file;

pub use map_file::{MapFile, load_grid};
