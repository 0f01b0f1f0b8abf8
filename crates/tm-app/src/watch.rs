use std::path::{Path, PathBuf};

use anyhow::Result;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tm_core::config::MapConfig;
use tm_decode::traverse::TileDecoder;
use tm_source::map_file::MapFile;

use crate::output::emit_map;

/// Lance un watcher sur le fichier carte.
///
/// Le dossier parent est surveillé : les éditeurs qui remplacent le fichier
/// (écriture atomique) déclenchent aussi un événement. Chaque modification
/// du fichier envoie `()` sur le canal retourné.
///
/// Retourne le Watcher (doit rester vivant tant que la surveillance tourne).
///
/// # Errors
/// Returns an error if the watcher cannot be created or the path cannot be watched.
pub fn spawn_map_watcher(map_path: &Path) -> Result<(impl Watcher + use<>, flume::Receiver<()>)> {
    let (tx, rx) = flume::unbounded();
    let target = map_path.to_path_buf();
    let dir = watch_dir(map_path);

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) if is_change_of(&event, &target) => {
            // Receiver dropped: the watch loop is over.
            let _ = tx.send(());
        }
        Ok(_) => {}
        Err(e) => log::warn!("Erreur du watcher : {e}"),
    })?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    log::info!("Surveillance de {}", map_path.display());
    Ok((watcher, rx))
}

/// Re-decode and re-print the map after every change, until the watcher dies.
///
/// A map that fails to load or decode is reported and skipped; the previous
/// output stays on screen.
///
/// # Errors
/// Returns an error if the watcher cannot be started.
pub fn run_watch(map: &mut MapFile, decoder: &TileDecoder, config: &MapConfig) -> Result<()> {
    let (_watcher, rx) = spawn_map_watcher(&map.path)?;

    while rx.recv().is_ok() {
        // Un enregistrement produit souvent plusieurs événements.
        while rx.try_recv().is_ok() {}

        if let Err(e) = map.reload() {
            log::warn!("Rechargement impossible : {e:#}");
            continue;
        }
        log::info!("Carte rechargée depuis {}", map.path.display());
        if let Err(e) = emit_map(map, decoder, config) {
            log::warn!("{e:#}");
        }
    }
    Ok(())
}

fn watch_dir(map_path: &Path) -> PathBuf {
    match map_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn is_change_of(event: &Event, target: &Path) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some() && p.file_name() == target.file_name())
}
