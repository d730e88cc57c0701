//! Player task: a single tokio task owning the controller and its timer.
//!
//! Commands arrive over an unbounded channel and are handled one at a time.
//! The autoplay timer exists only while the controller is playing; it is
//! dropped in the same step that stops playback, so no tick can be observed
//! after a stop. Commands are polled before the timer, so a user action that
//! races a due tick always wins.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use super::controller::{PlaybackController, PlaybackObserver, PlaybackState};
use crate::models::LocationId;

/// Default autoplay cadence.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1200);

/// Request handled by the player task.
#[derive(Debug)]
pub enum PlayerCommand {
    Toggle,
    Play,
    Pause,
    Seek(usize),
    Step(isize),
    /// Re-render the current position.
    Refresh,
    SelectLocation(LocationId),
    Zoom(u8),
    /// Report the current state.
    Query(oneshot::Sender<PlaybackState>),
    Shutdown,
}

/// Front-end handle to a running player task.
#[derive(Debug)]
pub struct PlayerHandle {
    tx: mpsc::UnboundedSender<PlayerCommand>,
    join: JoinHandle<()>,
}

impl PlayerHandle {
    /// Queue a command. Commands sent after shutdown are dropped.
    pub fn send(&self, command: PlayerCommand) {
        if let Err(e) = self.tx.send(command) {
            tracing::warn!("Player task has stopped; dropping {:?}", e.0);
        }
    }

    pub fn toggle(&self) {
        self.send(PlayerCommand::Toggle);
    }

    pub fn play(&self) {
        self.send(PlayerCommand::Play);
    }

    pub fn pause(&self) {
        self.send(PlayerCommand::Pause);
    }

    pub fn seek(&self, index: usize) {
        self.send(PlayerCommand::Seek(index));
    }

    pub fn step(&self, delta: isize) {
        self.send(PlayerCommand::Step(delta));
    }

    pub fn next(&self) {
        self.step(1);
    }

    pub fn previous(&self) {
        self.step(-1);
    }

    pub fn refresh(&self) {
        self.send(PlayerCommand::Refresh);
    }

    pub fn select_location(&self, location_id: impl Into<LocationId>) {
        self.send(PlayerCommand::SelectLocation(location_id.into()));
    }

    pub fn zoom_changed(&self, zoom: u8) {
        self.send(PlayerCommand::Zoom(zoom));
    }

    /// Queue a state query; the receiver resolves once the task handles it.
    pub fn request_state(&self) -> Option<oneshot::Receiver<PlaybackState>> {
        let (tx, rx) = oneshot::channel();
        self.tx.send(PlayerCommand::Query(tx)).ok()?;
        Some(rx)
    }

    /// Current state, or `None` once the task has exited.
    pub async fn state(&self) -> Option<PlaybackState> {
        self.request_state()?.await.ok()
    }

    /// Stop playback, end the task and wait for it.
    pub async fn shutdown(self) {
        let _ = self.tx.send(PlayerCommand::Shutdown);
        if let Err(e) = self.join.await {
            tracing::warn!("Player task ended abnormally: {}", e);
        }
    }
}

/// Spawn the player task on the current tokio runtime.
pub fn spawn_player<O>(controller: PlaybackController<O>, interval: Duration) -> PlayerHandle
where
    O: PlaybackObserver + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let join = tokio::spawn(run_player(controller, interval, rx));
    PlayerHandle { tx, join }
}

async fn run_player<O: PlaybackObserver>(
    mut controller: PlaybackController<O>,
    period: Duration,
    mut rx: mpsc::UnboundedReceiver<PlayerCommand>,
) {
    let period = if period.is_zero() {
        DEFAULT_INTERVAL
    } else {
        period
    };
    let mut timer: Option<Interval> = None;

    loop {
        tokio::select! {
            biased;

            command = rx.recv() => {
                let Some(command) = command else {
                    break;
                };
                let arm = match command {
                    PlayerCommand::Toggle => {
                        controller.toggle();
                        controller.is_running()
                    }
                    PlayerCommand::Play => controller.start(),
                    PlayerCommand::Pause => {
                        controller.stop();
                        false
                    }
                    PlayerCommand::Seek(index) => {
                        controller.seek(index);
                        false
                    }
                    PlayerCommand::Step(delta) => {
                        controller.step(delta);
                        false
                    }
                    PlayerCommand::Refresh => {
                        controller.refresh();
                        false
                    }
                    PlayerCommand::SelectLocation(id) => {
                        controller.observer_mut().on_location_selected(&id);
                        false
                    }
                    PlayerCommand::Zoom(zoom) => {
                        controller.observer_mut().on_zoom_changed(zoom);
                        false
                    }
                    PlayerCommand::Query(reply) => {
                        let _ = reply.send(controller.state());
                        false
                    }
                    PlayerCommand::Shutdown => {
                        controller.stop();
                        break;
                    }
                };

                if !controller.is_running() {
                    timer = None;
                } else if arm {
                    // Replacing the interval drops the previous one.
                    timer = Some(new_timer(period));
                    tracing::info!("Autoplay started ({} ms)", period.as_millis());
                }
            }

            _ = next_tick(&mut timer) => {
                controller.tick();
            }
        }
    }

    tracing::debug!("Player task finished at index {}", controller.current_index());
}

fn new_timer(period: Duration) -> Interval {
    let mut timer = tokio::time::interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
