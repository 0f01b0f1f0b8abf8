use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tm_core::config::{MapConfig, MarkerPolicy, OutputFormat};
use tm_core::layout::EncodingMode;

/// tilemap — décodeur de cartes ASCII à tuiles 5x5.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier carte. Défaut : selon le mode (voir [source] dans la config).
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Encodage des bordures : "separate" ou "shared".
    #[arg(long)]
    pub mode: Option<String>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Format de sortie : text, json.
    #[arg(long)]
    pub format: Option<String>,

    /// Afficher `<gauche>W<droite>` au lieu de `W` pour les tuiles marquées.
    #[arg(long, default_value_t = false)]
    pub composite: bool,

    /// Décoder les rangées en parallèle.
    #[arg(long, default_value_t = false)]
    pub parallel: bool,

    /// Afficher les bords et l'intérieur d'une seule tuile, "X,Y".
    #[arg(long, value_parser = parse_tile_coord)]
    pub tile: Option<(usize, usize)>,

    /// Re-décoder à chaque modification du fichier carte.
    #[arg(long, default_value_t = false)]
    pub watch: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    ///
    /// # Errors
    /// Returns an error on an unknown mode or format.
    pub fn apply_overrides(&self, config: &mut MapConfig) -> anyhow::Result<()> {
        if let Some(ref mode) = self.mode {
            config.mode = mode
                .parse::<EncodingMode>()
                .context("Option --mode invalide")?;
        }
        if let Some(ref format) = self.format {
            config.format = match format.to_ascii_lowercase().as_str() {
                "text" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                other => anyhow::bail!("Format inconnu '{other}'. Utilisez text ou json."),
            };
        }
        if self.composite {
            config.marker_policy = MarkerPolicy::Composite;
        }
        if self.parallel {
            config.parallel = true;
        }
        Ok(())
    }

    /// Explicit --map, else the config's default file for the mode.
    #[must_use]
    pub fn map_path(&self, config: &MapConfig) -> PathBuf {
        self.map
            .clone()
            .unwrap_or_else(|| config.map_path().to_path_buf())
    }
}

/// Parse "X,Y" into tile coordinates.
fn parse_tile_coord(s: &str) -> Result<(usize, usize), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("attendu X,Y, reçu '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<usize>()
            .map_err(|e| format!("coordonnée '{v}' invalide : {e}"))
    };
    Ok((parse(x)?, parse(y)?))
}
