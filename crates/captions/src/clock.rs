use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use crate::error::{Error, Result};

/// Frame rate of the preview player; all seconds/frame conversions use it.
pub const DEFAULT_FPS: f64 = 30.0;

/// "The player advanced" notification. Carries the frame for logging only;
/// handlers read the authoritative frame from [`PlayerClock::current_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAdvanced {
    pub frame: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The external video player, as seen by the caption engine.
///
/// The player owns time. The engine never runs timers of its own; it reacts
/// to frame notifications delivered on the channel passed to
/// [`PlayerClock::subscribe`] and asks the player to seek.
pub trait PlayerClock: Send + Sync {
    fn fps(&self) -> f64 {
        DEFAULT_FPS
    }

    fn current_frame(&self) -> u64;

    fn subscribe(&self, listener: mpsc::UnboundedSender<FrameAdvanced>) -> ListenerId;

    fn unsubscribe(&self, id: ListenerId);

    fn seek(&self, frame: u64);
}

/// A frame rate usable for conversions: finite and above zero.
pub fn validate_fps(fps: f64) -> Result<f64> {
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(Error::InvalidFps { fps })
    }
}

pub fn frame_to_seconds(frame: u64, fps: f64) -> f64 {
    frame as f64 / fps
}

/// Floors, so a seek never lands before the requested instant's frame.
pub fn seconds_to_frame(seconds: f64, fps: f64) -> u64 {
    (seconds * fps).floor().max(0.0) as u64
}

/// Scoped registration on a player's notification channel. Dropping it
/// unsubscribes, so a torn-down session stops receiving frames for segments
/// it no longer owns.
pub struct Subscription<P: PlayerClock + ?Sized> {
    player: Arc<P>,
    id: ListenerId,
}

impl<P: PlayerClock + ?Sized> Subscription<P> {
    pub fn new(player: Arc<P>, listener: mpsc::UnboundedSender<FrameAdvanced>) -> Self {
        let id = player.subscribe(listener);
        tracing::debug!(listener = id.0, "subscribed to player frames");
        Self { player, id }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl<P: PlayerClock + ?Sized> Drop for Subscription<P> {
    fn drop(&mut self) {
        self.player.unsubscribe(self.id);
        tracing::debug!(listener = self.id.0, "unsubscribed from player frames");
    }
}

struct ManualState {
    frame: u64,
    next_id: u64,
    listeners: HashMap<ListenerId, mpsc::UnboundedSender<FrameAdvanced>>,
}

/// In-process player whose clock only moves when told to. Drives the replay
/// tool and the tests.
pub struct ManualPlayer {
    fps: f64,
    state: Mutex<ManualState>,
}

impl ManualPlayer {
    pub fn new(fps: f64) -> Self {
        Self {
            fps,
            state: Mutex::new(ManualState {
                frame: 0,
                next_id: 0,
                listeners: HashMap::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move forward `frames` frames and notify every listener once.
    pub fn advance(&self, frames: u64) {
        let mut state = self.state();
        state.frame = state.frame.saturating_add(frames);
        Self::notify(&mut state);
    }

    pub fn listener_count(&self) -> usize {
        self.state().listeners.len()
    }

    fn notify(state: &mut ManualState) {
        let event = FrameAdvanced { frame: state.frame };
        state.listeners.retain(|_, tx| tx.send(event).is_ok());
    }
}

impl Default for ManualPlayer {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

impl PlayerClock for ManualPlayer {
    fn fps(&self) -> f64 {
        self.fps
    }

    fn current_frame(&self) -> u64 {
        self.state().frame
    }

    fn subscribe(&self, listener: mpsc::UnboundedSender<FrameAdvanced>) -> ListenerId {
        let mut state = self.state();
        let id = ListenerId(state.next_id);
        state.next_id += 1;
        state.listeners.insert(id, listener);
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.state().listeners.remove(&id);
    }

    /// Jumps and notifies, as a real player repaints after a seek.
    fn seek(&self, frame: u64) {
        let mut state = self.state();
        state.frame = frame;
        Self::notify(&mut state);
    }
}
