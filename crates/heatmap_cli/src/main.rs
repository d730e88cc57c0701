//! Crowd heatmap - terminal front end.
//!
//! Loads (or creates) `heatmap.toml`, builds the demo dataset and plays one
//! full loop of the timeline with every surface printed to stdout.
//!
//! Usage: `crowd-heatmap [CONFIG_PATH]`

mod terminal;

use anyhow::Context;
use heatmap_core::config::ConfigManager;
use heatmap_core::logging::init_tracing;
use heatmap_core::store::DemoDataset;
use heatmap_core::{HeatmapSession, InitOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "heatmap.toml".to_string());

    let mut config = ConfigManager::new(&config_path);
    config
        .load_or_create()
        .with_context(|| format!("loading config from {}", config_path))?;
    let settings = config.settings().clone();

    init_tracing(settings.logging.level);
    tracing::info!("crowd-heatmap {}", heatmap_core::version());

    let demo = DemoDataset::default();
    let surfaces = terminal::surfaces(&demo.locations);
    let interval = settings.playback.interval();
    let autoplay = settings.playback.autoplay;

    let session = HeatmapSession::new(settings);
    match session.initialize(&demo, surfaces, true)? {
        InitOutcome::Initialized => {}
        other => anyhow::bail!("heatmap did not initialize: {:?}", other),
    }

    session.zoom_changed(15);
    session.select_location("ramghat");
    if !autoplay {
        session.toggle();
    }

    let slots = session.timeline_len() as u32;
    tokio::time::sleep(interval * slots + interval / 2).await;

    if let Some(state) = session.playback_state().await {
        tracing::info!(
            "Finished loop at index {} ({})",
            state.current_index,
            state.status
        );
    }
    session.shutdown().await;
    Ok(())
}
