use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tm_core::error::CoreError;
use tm_core::grid::CharGrid;

/// A map file loaded from disk.
///
/// # Example
/// ```no_run
/// use tm_source::map_file::MapFile;
/// use std::path::Path;
/// let map = MapFile::open(Path::new("res/separate_edges.map")).unwrap();
/// println!("{}x{}", map.grid.rows(), map.grid.cols());
/// ```
#[derive(Clone, Debug)]
pub struct MapFile {
    /// Path the grid was read from.
    pub path: PathBuf,
    /// The character grid.
    pub grid: CharGrid,
}

impl MapFile {
    /// Read and validate a map file.
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable, or not a
    /// rectangular grid.
    pub fn open(path: &Path) -> Result<Self> {
        let grid = load_grid(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            grid,
        })
    }

    /// Read the file again, e.g. after a change on disk.
    ///
    /// # Errors
    /// Same as [`MapFile::open`]. On error `self` is left unchanged.
    pub fn reload(&mut self) -> Result<()> {
        self.grid = load_grid(&self.path)?;
        Ok(())
    }
}

/// Charge une carte texte et la valide en grille rectangulaire.
///
/// # Errors
/// Returns an error if the file is missing, unreadable, or not a
/// rectangular grid.
pub fn load_grid(path: &Path) -> Result<CharGrid> {
    if !path.exists() {
        return Err(CoreError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let grid = CharGrid::from_text(&text)
        .with_context(|| format!("Carte malformée : {}", path.display()))?;
    log::info!(
        "Taille des données de carte : {}x{} ({})",
        grid.rows(),
        grid.cols(),
        path.display()
    );
    Ok(grid)
}
