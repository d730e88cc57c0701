//! Heatmap session: one-time initialization and the front-end entry points.
//!
//! The session replaces ambient "already initialized" flags with an explicit
//! object. It is created once per page/window and handed to every UI
//! callback by reference.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use crate::config::Settings;
use crate::models::LocationId;
use crate::playback::{spawn_player, PlaybackController, PlaybackState, PlayerHandle};
use crate::projector::FrameProjector;
use crate::store::{SampleSource, SampleStore, StoreError};
use crate::timeline::Timeline;
use crate::view::{ViewSurfaces, ViewSynchronizer};

/// Errors that leave the session uninitialized (safe to retry).
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Map surface is missing; heatmap not initialized")]
    MissingMapSurface,

    #[error("No tokio runtime is running; heatmap not initialized")]
    NoRuntime,

    #[error("Sample data rejected: {0}")]
    Store(#[from] StoreError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// What an initialization request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Initialized,
    /// A previous call already succeeded; nothing was done.
    AlreadyInitialized,
    /// The heatmap container is hidden; try again once it is shown.
    NotVisible,
}

#[derive(Debug, Default)]
struct SessionState {
    initialized: bool,
    player: Option<PlayerHandle>,
    timeline_len: usize,
}

/// Single-session heatmap context.
#[derive(Debug)]
pub struct HeatmapSession {
    settings: Settings,
    state: Mutex<SessionState>,
}

impl HeatmapSession {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_initialized(&self) -> bool {
        self.state.lock().initialized
    }

    /// Number of timeline slots (0 before initialization).
    pub fn timeline_len(&self) -> usize {
        self.state.lock().timeline_len
    }

    /// Initialize once the heatmap container is visible.
    ///
    /// Loads the samples, mounts the surfaces, renders the first slot and
    /// starts the player task. Must be called from within a tokio runtime.
    /// Calls after the first success are no-ops.
    pub fn initialize(
        &self,
        source: &dyn SampleSource,
        surfaces: ViewSurfaces,
        visible: bool,
    ) -> SessionResult<InitOutcome> {
        let mut state = self.state.lock();
        if state.initialized {
            return Ok(InitOutcome::AlreadyInitialized);
        }
        if !visible {
            return Ok(InitOutcome::NotVisible);
        }
        if !surfaces.has_map() {
            tracing::warn!("Heatmap map surface not found; initialization aborted");
            return Err(SessionError::MissingMapSurface);
        }
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(SessionError::NoRuntime);
        }

        let store = Arc::new(SampleStore::from_source(source)?);
        let timeline = Arc::new(Timeline::build(store.samples()));
        let render = &self.settings.render;

        let mut synchronizer = ViewSynchronizer::new(
            Arc::clone(&store),
            Arc::clone(&timeline),
            FrameProjector::new(render.normalization, &store),
            render.time_formatter(),
            self.settings.heat_layer.clone(),
            surfaces,
        );

        let default_location = self.default_location(&store);
        if let Some(id) = &default_location {
            synchronizer.preselect(id.clone());
        }
        synchronizer.mount();

        let mut controller = PlaybackController::new(timeline.len(), synchronizer);
        controller.refresh();
        if render.chart_on_init {
            if let Some(id) = &default_location {
                controller.observer_mut().render_chart(id);
            }
        }

        let player = spawn_player(controller, self.settings.playback.interval());
        if self.settings.playback.autoplay {
            player.play();
        }

        tracing::info!(
            "Heatmap initialized: {} locations, {} slots",
            store.locations().len(),
            timeline.len()
        );

        state.initialized = true;
        state.timeline_len = timeline.len();
        state.player = Some(player);
        Ok(InitOutcome::Initialized)
    }

    /// Configured default location if declared, else the first one.
    fn default_location(&self, store: &SampleStore) -> Option<LocationId> {
        if let Some(configured) = &self.settings.render.default_location {
            match store.location(configured) {
                Some(location) => return Some(location.id.clone()),
                None => tracing::warn!(
                    "Configured default location '{}' is not in the data",
                    configured
                ),
            }
        }
        store.first_location().cloned()
    }

    fn with_player(&self, f: impl FnOnce(&PlayerHandle)) {
        match self.state.lock().player.as_ref() {
            Some(player) => f(player),
            None => tracing::debug!("Heatmap not initialized; ignoring control"),
        }
    }

    /// Play/pause button.
    pub fn toggle(&self) {
        self.with_player(PlayerHandle::toggle);
    }

    /// Slider input.
    pub fn seek(&self, index: usize) {
        self.with_player(|p| p.seek(index));
    }

    /// Next-step button.
    pub fn next(&self) {
        self.with_player(PlayerHandle::next);
    }

    /// Previous-step button.
    pub fn previous(&self) {
        self.with_player(PlayerHandle::previous);
    }

    /// Location selector change.
    pub fn select_location(&self, location_id: impl Into<LocationId>) {
        let id = location_id.into();
        self.with_player(|p| p.select_location(id));
    }

    /// Map zoom change.
    pub fn zoom_changed(&self, zoom: u8) {
        self.with_player(|p| p.zoom_changed(zoom));
    }

    /// Current playback state, or `None` when not running.
    pub async fn playback_state(&self) -> Option<PlaybackState> {
        let pending = {
            let state = self.state.lock();
            state.player.as_ref()?.request_state()?
        };
        pending.await.ok()
    }

    /// Stop the player task. The session stays initialized.
    pub async fn shutdown(&self) {
        let player = self.state.lock().player.take();
        if let Some(player) = player {
            player.shutdown().await;
            tracing::info!("Heatmap session shut down");
        }
    }
}
