use anyhow::Result;
use clap::Parser;
use tm_core::config::MapConfig;
use tm_decode::traverse::TileDecoder;
use tm_source::map_file::MapFile;

pub mod cli;
pub mod output;
pub mod watch;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config)?;

    // 4. Charger la carte (fichier par défaut selon le mode)
    let map_path = cli.map_path(&config);
    let mut map = MapFile::open(&map_path)?;

    let decoder = TileDecoder::from_config(&config);
    let dims = decoder.dims(&map.grid);
    log::info!(
        "Taille de la carte : {}x{} tuiles ({})",
        dims.height,
        dims.width,
        config.mode
    );

    // 5. Une seule tuile, ou la carte entière
    if let Some((x, y)) = cli.tile {
        return output::emit_tile(&map, &decoder, x, y);
    }
    output::emit_map(&map, &decoder, &config)?;

    // 6. Surveillance optionnelle
    if cli.watch {
        watch::run_watch(&mut map, &decoder, &config)?;
    }
    Ok(())
}

/// Load --config if it exists, defaults otherwise.
fn resolve_config(cli: &cli::Cli) -> Result<MapConfig> {
    if cli.config.exists() {
        tm_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(MapConfig::default())
    }
}
