use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::layout::EncodingMode;

/// Symbol emitted for a tile whose interior is blank.
pub const DEFAULT_EMPTY_SYMBOL: &str = ".";

/// Reserved interior marker.
pub const DEFAULT_MARKER: char = 'W';

/// Configuration complète du décodage et de la sortie.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use tm_core::config::MapConfig;
/// use tm_core::layout::EncodingMode;
/// let config = MapConfig::default();
/// assert_eq!(config.mode, EncodingMode::Separate);
/// assert_eq!(config.empty_symbol, ".");
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MapConfig {
    // === Décodage ===
    /// Disposition des blocs de tuiles dans la grille.
    pub mode: EncodingMode,
    /// What a marker tile decodes to.
    pub marker_policy: MarkerPolicy,
    /// Symbole des tuiles à intérieur vide.
    pub empty_symbol: String,
    /// Caractère marqueur réservé.
    pub marker: char,

    // === Sortie ===
    /// Output format.
    pub format: OutputFormat,
    /// Décoder les rangées en parallèle (rayon). Sortie identique.
    pub parallel: bool,

    // === Source ===
    /// Map file used in `Separate` mode when none is given explicitly.
    pub separate_map: PathBuf,
    /// Map file used in `Shared` mode when none is given explicitly.
    pub shared_map: PathBuf,
}

/// What a tile containing the marker decodes to.
///
/// # Example
/// ```
/// use tm_core::config::MarkerPolicy;
/// assert_eq!(MarkerPolicy::default(), MarkerPolicy::Override);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum MarkerPolicy {
    /// The marker alone, whatever surrounds it.
    #[default]
    Override,
    /// `<left>W<right>`: trimmed text around the marker.
    Composite,
}

/// Output format for the decoded map.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per tile row, symbols concatenated.
    #[default]
    Text,
    /// JSON document with dimensions and rows.
    Json,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            mode: EncodingMode::Separate,
            marker_policy: MarkerPolicy::Override,
            empty_symbol: DEFAULT_EMPTY_SYMBOL.to_string(),
            marker: DEFAULT_MARKER,
            format: OutputFormat::Text,
            parallel: false,
            separate_map: PathBuf::from("res/separate_edges.map"),
            shared_map: PathBuf::from("res/shared_edges.map"),
        }
    }
}

impl MapConfig {
    /// Default map file for the configured mode.
    ///
    /// # Example
    /// ```
    /// use tm_core::config::MapConfig;
    /// use tm_core::layout::EncodingMode;
    /// let config = MapConfig { mode: EncodingMode::Shared, ..MapConfig::default() };
    /// assert!(config.map_path().ends_with("shared_edges.map"));
    /// ```
    #[must_use]
    pub fn map_path(&self) -> &Path {
        match self.mode {
            EncodingMode::Separate => &self.separate_map,
            EncodingMode::Shared => &self.shared_map,
        }
    }

    /// Reject values the decoder cannot work with.
    ///
    /// # Errors
    /// `CoreError::Config` if `empty_symbol` is empty or `marker` is whitespace.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.empty_symbol.is_empty() {
            return Err(CoreError::Config("empty_symbol ne peut pas être vide".into()));
        }
        if self.marker.is_whitespace() {
            return Err(CoreError::Config(format!(
                "marker {:?} est un blanc, il serait retiré par le trim",
                self.marker
            )));
        }
        Ok(())
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    decode: Option<DecodeSection>,
    output: Option<OutputSection>,
    source: Option<SourceSection>,
}

/// Decode section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct DecodeSection {
    mode: Option<String>,
    marker_policy: Option<MarkerPolicy>,
    empty_symbol: Option<String>,
    marker: Option<char>,
}

#[derive(Deserialize)]
struct OutputSection {
    format: Option<OutputFormat>,
    parallel: Option<bool>,
}

#[derive(Deserialize)]
struct SourceSection {
    separate_map: Option<PathBuf>,
    shared_map: Option<PathBuf>,
}

/// Parse a TOML document and merge it over the defaults.
///
/// # Errors
/// Returns an error if the TOML is malformed or a value is invalid.
///
/// # Example
/// ```
/// use tm_core::config::parse_config;
/// use tm_core::layout::EncodingMode;
/// let config = parse_config("[decode]\nmode = \"shared\"\n").unwrap();
/// assert_eq!(config.mode, EncodingMode::Shared);
/// assert_eq!(config.empty_symbol, ".");
/// ```
pub fn parse_config(content: &str) -> Result<MapConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = MapConfig::default();

    if let Some(d) = file.decode {
        if let Some(v) = d.mode {
            config.mode = v.parse()?;
        }
        if let Some(v) = d.marker_policy {
            config.marker_policy = v;
        }
        if let Some(v) = d.empty_symbol {
            config.empty_symbol = v;
        }
        if let Some(v) = d.marker {
            config.marker = v;
        }
    }
    if let Some(o) = file.output {
        if let Some(v) = o.format {
            config.format = v;
        }
        if let Some(v) = o.parallel {
            config.parallel = v;
        }
    }
    if let Some(s) = file.source {
        if let Some(v) = s.separate_map {
            config.separate_map = v;
        }
        if let Some(v) = s.shared_map {
            config.shared_map = v;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use tm_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<MapConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config =
        parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))?;
    log::debug!("Config chargée depuis {} : {config:?}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_document_is_default() -> Result<()> {
        assert_eq!(parse_config("")?, MapConfig::default());
        Ok(())
    }

    #[test]
    fn partial_override_keeps_defaults() -> Result<()> {
        let config = parse_config(
            "[decode]\nmarker_policy = \"Composite\"\n\n[output]\nformat = \"Json\"\n",
        )?;
        assert_eq!(config.marker_policy, MarkerPolicy::Composite);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.mode, EncodingMode::Separate);
        assert_eq!(config.marker, 'W');
        assert!(!config.parallel);
        Ok(())
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = parse_config("[decode]\nmode = \"hex\"\n").unwrap_err();
        assert!(err.to_string().contains("hex"), "{err}");
    }

    #[test]
    fn blank_empty_symbol_is_rejected() {
        assert!(parse_config("[decode]\nempty_symbol = \"\"\n").is_err());
        assert!(parse_config("[decode]\nmarker = \" \"\n").is_err());
    }

    #[test]
    fn map_path_follows_mode() {
        let mut config = MapConfig::default();
        assert_eq!(config.map_path(), Path::new("res/separate_edges.map"));
        config.mode = EncodingMode::Shared;
        assert_eq!(config.map_path(), Path::new("res/shared_edges.map"));
    }

    #[test]
    fn load_from_disk() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "[source]\nshared_map = \"maps/a.map\"\n[decode]\nmode = \"Shared\"")?;
        let config = load_config(file.path())?;
        assert_eq!(config.map_path(), Path::new("maps/a.map"));
        Ok(())
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/tilemap.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/tilemap.toml"));
    }
}
