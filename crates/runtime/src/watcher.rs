//! Model file hot reload.

use anyhow::Result;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Watch `model_path` and raise `reload` whenever the file is written or
/// recreated. The tick loop drains the flag between ticks, so rapid saves
/// collapse into one reload.
pub fn start(model_path: &Path, reload: Arc<AtomicBool>) -> Result<RecommendedWatcher> {
    let target = model_path
        .canonicalize()
        .unwrap_or_else(|_| model_path.to_path_buf());
    let file_name = target.file_name().map(std::ffi::OsStr::to_os_string);

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            if event.kind.is_modify() || event.kind.is_create() {
                let hit = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(std::ffi::OsStr::to_os_string) == file_name);
                if hit {
                    reload.store(true, Ordering::Release);
                }
            }
        }
        Err(e) => tracing::error!("error watching model file: {e:?}"),
    })?;

    // Editors often replace the file rather than write in place, so watch
    // the parent directory and filter by name.
    let watch_root = target.parent().unwrap_or(Path::new("."));
    watcher.watch(watch_root, RecursiveMode::NonRecursive)?;
    info!(path = %target.display(), "model watcher started");
    Ok(watcher)
}
