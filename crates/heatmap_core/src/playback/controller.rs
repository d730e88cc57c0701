//! Playback state machine.
//!
//! States: `Paused` (initial) and `Playing`. Every operation is a no-op on
//! an empty timeline. Seek and step always stop autoplay before moving.

use crate::models::{LocationId, PlaybackStatus};

/// Notification emitted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The current position was set.
    IndexChanged { index: usize },
    /// Autoplay was started or stopped.
    StatusChanged(PlaybackStatus),
}

/// Consumer of playback notifications.
///
/// The location and zoom hooks carry view-side requests that are routed
/// through the player task so they run between, never during, renders.
pub trait PlaybackObserver: Send {
    fn on_playback_event(&mut self, event: PlaybackEvent);

    fn on_location_selected(&mut self, _location_id: &LocationId) {}

    fn on_zoom_changed(&mut self, _zoom: u8) {}
}

/// Current position and run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    pub current_index: usize,
    pub status: PlaybackStatus,
}

impl PlaybackState {
    pub fn is_running(&self) -> bool {
        self.status.is_playing()
    }
}

/// Owner of [`PlaybackState`].
pub struct PlaybackController<O> {
    timeline_len: usize,
    state: PlaybackState,
    observer: O,
}

impl<O: PlaybackObserver> PlaybackController<O> {
    /// Create a paused controller at index 0.
    pub fn new(timeline_len: usize, observer: O) -> Self {
        Self {
            timeline_len,
            state: PlaybackState::default(),
            observer,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Enter `Playing`.
    ///
    /// Returns `true` when the caller must (re)arm the timer. Starting while
    /// already playing also returns `true` so the previous timer is replaced
    /// rather than duplicated.
    pub fn start(&mut self) -> bool {
        if self.timeline_len == 0 {
            return false;
        }
        if !self.is_running() {
            self.set_status(PlaybackStatus::Playing);
        }
        true
    }

    /// Enter `Paused`. Returns whether playback was running.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.set_status(PlaybackStatus::Paused);
        true
    }

    /// Flip between `Paused` and `Playing`; returns the new status.
    pub fn toggle(&mut self) -> PlaybackStatus {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
        self.state.status
    }

    /// Advance one slot, wrapping after the last.
    ///
    /// Ignored unless playing.
    pub fn tick(&mut self) -> Option<usize> {
        if self.timeline_len == 0 || !self.is_running() {
            return None;
        }
        let next = (self.state.current_index + 1) % self.timeline_len;
        self.move_to(next);
        Some(next)
    }

    /// Jump to an absolute position, clamped to the last slot.
    pub fn seek(&mut self, index: usize) -> Option<usize> {
        let last = self.timeline_len.checked_sub(1)?;
        self.stop();
        let target = index.min(last);
        self.move_to(target);
        Some(target)
    }

    /// Move by `delta` slots with wraparound in both directions.
    pub fn step(&mut self, delta: isize) -> Option<usize> {
        if self.timeline_len == 0 {
            return None;
        }
        self.stop();
        let len = self.timeline_len as isize;
        let target = (self.state.current_index as isize + delta).rem_euclid(len) as usize;
        self.move_to(target);
        Some(target)
    }

    /// Re-emit the current position without changing state.
    pub fn refresh(&mut self) {
        if self.timeline_len > 0 {
            self.observer.on_playback_event(PlaybackEvent::IndexChanged {
                index: self.state.current_index,
            });
        }
    }

    fn move_to(&mut self, index: usize) {
        self.state.current_index = index;
        self.observer
            .on_playback_event(PlaybackEvent::IndexChanged { index });
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        self.state.status = status;
        tracing::debug!("Playback {}", status);
        self.observer
            .on_playback_event(PlaybackEvent::StatusChanged(status));
    }
}

impl<O> std::fmt::Debug for PlaybackController<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("timeline_len", &self.timeline_len)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording(len: usize) -> PlaybackController<Vec<PlaybackEvent>> {
        PlaybackController::new(len, Vec::new())
    }

    impl PlaybackObserver for Vec<PlaybackEvent> {
        fn on_playback_event(&mut self, event: PlaybackEvent) {
            self.push(event);
        }
    }

    #[test]
    fn starts_paused_at_zero() {
        let controller = recording(3);
        assert_eq!(controller.current_index(), 0);
        assert!(!controller.is_running());
    }

    #[test]
    fn tick_wraps_around() {
        let mut controller = recording(3);
        controller.start();
        assert_eq!(controller.tick(), Some(1));
        assert_eq!(controller.tick(), Some(2));
        assert_eq!(controller.tick(), Some(0));
    }

    #[test]
    fn tick_yields_next_modulo_len() {
        for n in 1..6usize {
            for i in 0..n {
                let mut controller = recording(n);
                controller.seek(i);
                controller.start();
                assert_eq!(controller.tick(), Some((i + 1) % n));
            }
        }
    }

    #[test]
    fn tick_ignored_while_paused() {
        let mut controller = recording(3);
        assert_eq!(controller.tick(), None);
        assert_eq!(controller.current_index(), 0);
        assert!(controller.observer().is_empty());
    }

    #[test]
    fn toggle_flips_status() {
        let mut controller = recording(3);
        assert_eq!(controller.toggle(), PlaybackStatus::Playing);
        assert_eq!(controller.toggle(), PlaybackStatus::Paused);
        assert_eq!(
            controller.observer().as_slice(),
            &[
                PlaybackEvent::StatusChanged(PlaybackStatus::Playing),
                PlaybackEvent::StatusChanged(PlaybackStatus::Paused),
            ]
        );
    }

    #[test]
    fn restart_while_playing_rearms_without_duplicate_event() {
        let mut controller = recording(3);
        assert!(controller.start());
        assert!(controller.start());
        assert_eq!(controller.observer().len(), 1);
    }

    #[test]
    fn seek_stops_autoplay_and_clamps() {
        let mut controller = recording(3);
        controller.start();
        assert_eq!(controller.seek(2), Some(2));
        assert!(!controller.is_running());

        assert_eq!(controller.seek(40), Some(2));
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn seek_emits_stop_before_move() {
        let mut controller = recording(3);
        controller.start();
        controller.seek(2);
        assert_eq!(
            &controller.observer()[1..],
            &[
                PlaybackEvent::StatusChanged(PlaybackStatus::Paused),
                PlaybackEvent::IndexChanged { index: 2 },
            ]
        );
    }

    #[test]
    fn step_wraps_both_directions_and_stops() {
        let mut controller = recording(4);
        assert_eq!(controller.step(-1), Some(3));
        assert_eq!(controller.step(1), Some(0));

        controller.start();
        assert_eq!(controller.step(1), Some(1));
        assert!(!controller.is_running());
    }

    #[test]
    fn empty_timeline_is_inert() {
        let mut controller = recording(0);
        assert!(!controller.start());
        assert_eq!(controller.toggle(), PlaybackStatus::Paused);
        assert_eq!(controller.tick(), None);
        assert_eq!(controller.seek(3), None);
        assert_eq!(controller.step(1), None);
        controller.refresh();
        assert!(controller.observer().is_empty());
    }
}
