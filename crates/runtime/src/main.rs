#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod config;
mod watcher;

use anyhow::{Context, Result};
use config::RunConfig;
use export::{CaptureSession, Composite, PngSequenceSink};
use glam::Vec3;
use mesh::MeshPart;
use raster::Rig;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Dimensions of the fallback box model when no file is configured.
const DEFAULT_BOX_HALF_EXTENTS: Vec3 = Vec3::new(2.0, 4.0, 2.0);

fn load_model(path: &Path) -> Result<Vec<MeshPart>> {
    let parts =
        mesh::load_path(path).with_context(|| format!("loading model {}", path.display()))?;
    Ok(parts)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => RunConfig::load(Path::new(&path))?,
        None => RunConfig::default(),
    };
    if let Some(opacity) = config.layer_opacity {
        tracing::info!(opacity, "layer_opacity is presentation-only, ignoring");
    }
    if let Some(visible) = config.layers_visible {
        tracing::info!(visible, "layers_visible is presentation-only, ignoring");
    }

    let mut rig = Rig::new(&config.layers, config.pixel_size);
    match &config.model {
        Some(path) => rig.install_model(&load_model(path)?),
        None => rig.install_model(&[MeshPart::new(mesh::primitives::box_mesh(
            DEFAULT_BOX_HALF_EXTENTS,
        ))]),
    }
    if !rig.has_model() {
        tracing::warn!("model has no geometry; every layer will rasterize black");
    }

    let reload = Arc::new(AtomicBool::new(false));
    let _model_watcher = config.model.as_deref().and_then(|path| {
        match watcher::start(path, Arc::clone(&reload)) {
            Ok(w) => Some(w),
            Err(e) => {
                tracing::warn!("model watcher unavailable: {e:?}");
                None
            }
        }
    });

    std::fs::create_dir_all(&config.output_dir)?;
    let mut composite = Composite::new(&config.layers);
    let mut capture = config.capture.then(|| {
        CaptureSession::new(Box::new(PngSequenceSink::new(config.output_dir.clone())))
    });
    if let Some(session) = &mut capture {
        composite.refresh(rig.layers());
        session.start(&composite)?;
    }

    let tick_config = config.tick_config();
    tracing::info!(ticks = config.ticks, "starting classification loop");
    for tick in 0..config.ticks {
        if reload.swap(false, Ordering::Acquire) {
            if let Some(path) = &config.model {
                match load_model(path) {
                    Ok(parts) => {
                        rig.install_model(&parts);
                        tracing::info!(path = %path.display(), "model reloaded");
                    }
                    Err(e) => tracing::error!("model reload failed, keeping previous: {e:?}"),
                }
            }
        }

        let stats = rig.tick(&tick_config);
        if (tick + 1) % 50 == 0 {
            tracing::info!(
                tick = tick + 1,
                inside = stats.classify.inside,
                rejected = stats.classify.rejected,
                rays = stats.classify.rays_cast,
                "tick complete"
            );
        }

        if let Some(session) = &mut capture {
            composite.refresh(rig.layers());
            session.capture_frame(&composite)?;
        }
    }

    if let Some(session) = &mut capture {
        session.stop()?;
    }
    composite.refresh(rig.layers());
    let snapshot = export::save_snapshot(&composite, &config.output_dir)?;
    tracing::info!(path = %snapshot.display(), "run finished");
    Ok(())
}
