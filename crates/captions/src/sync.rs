use std::sync::Arc;

use tokio::sync::mpsc;

use crate::clock::{
    DEFAULT_FPS, FrameAdvanced, PlayerClock, Subscription, frame_to_seconds, seconds_to_frame,
    validate_fps,
};
use crate::error::{Error, Result};
use crate::render::render;
use crate::resolve::active_segment;
use crate::style::{CaptionMode, StyleConfig};
use crate::types::{CaptionFrame, Segments, TimedSegment};
use crate::words::word_progress;

/// The per-tick pipeline as a pure function: resolve the active segment,
/// compute word progress when the style needs it, and render.
///
/// Same inputs, same frame. Nothing is cached between calls.
pub fn frame_at(segments: &[TimedSegment], style: &StyleConfig, t: f64) -> CaptionFrame {
    let active = active_segment(segments, t);
    let words = match (active, style.mode) {
        (Some((_, segment)), CaptionMode::Karaoke) => word_progress(segment, t),
        _ => None,
    };

    CaptionFrame {
        time_seconds: t,
        active_index: active.map(|(position, _)| position),
        presentation: render(active.map(|(_, s)| s), words.as_ref(), t, style),
    }
}

/// Output of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncUpdate {
    pub frame_number: u64,
    pub frame: CaptionFrame,
    /// Set only on the tick where the active segment changed to a new one,
    /// so the transcript list scrolls once per segment rather than per frame.
    pub scroll_to: Option<usize>,
}

/// Reactive glue between the player clock and the caption pipeline.
///
/// The only state carried across ticks is the last active position, used to
/// de-duplicate scroll requests.
pub struct SyncController {
    segments: Segments,
    style: StyleConfig,
    fps: f64,
    last_active: Option<usize>,
}

impl SyncController {
    /// An unusable `fps` (zero, negative, non-finite) is replaced by
    /// [`DEFAULT_FPS`] and logged, since every tick divides by it.
    pub fn new(segments: impl Into<Segments>, style: StyleConfig, fps: f64) -> Self {
        let fps = validate_fps(fps).unwrap_or_else(|error| {
            tracing::warn!(%error, fallback = DEFAULT_FPS, "using default frame rate");
            DEFAULT_FPS
        });
        Self {
            segments: segments.into(),
            style,
            fps,
            last_active: None,
        }
    }

    pub fn segments(&self) -> &Segments {
        &self.segments
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Swap in a freshly decoded sequence. The old one is discarded whole.
    pub fn replace_segments(&mut self, segments: impl Into<Segments>) {
        self.segments = segments.into();
        self.last_active = None;
        tracing::debug!(segments = self.segments.len(), "replaced segment sequence");
    }

    pub fn set_style(&mut self, style: StyleConfig) {
        self.style = style;
    }

    pub fn tick(&mut self, frame_number: u64) -> SyncUpdate {
        let t = frame_to_seconds(frame_number, self.fps);
        let frame = frame_at(&self.segments, &self.style, t);

        let scroll_to = if frame.active_index != self.last_active {
            tracing::trace!(from = ?self.last_active, to = ?frame.active_index, "active segment changed");
            self.last_active = frame.active_index;
            frame.active_index
        } else {
            None
        };

        SyncUpdate {
            frame_number,
            frame,
            scroll_to,
        }
    }

    /// Frame to seek to when the segment at `position` is clicked.
    pub fn seek_frame(&self, position: usize) -> Result<u64> {
        let segment = self
            .segments
            .get(position)
            .ok_or(Error::UnknownSegment { index: position })?;
        Ok(seconds_to_frame(segment.start_seconds, self.fps))
    }
}

/// A [`SyncController`] attached to a live player.
///
/// Holds the player subscription for as long as it lives; dropping the
/// session unsubscribes.
pub struct SyncSession<P: PlayerClock + ?Sized> {
    player: Arc<P>,
    controller: SyncController,
    events: mpsc::UnboundedReceiver<FrameAdvanced>,
    subscription: Subscription<P>,
}

impl<P: PlayerClock + ?Sized> SyncSession<P> {
    pub fn attach(player: Arc<P>, segments: impl Into<Segments>, style: StyleConfig) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let subscription = Subscription::new(player.clone(), tx);
        let controller = SyncController::new(segments, style, player.fps());

        Self {
            player,
            controller,
            events,
            subscription,
        }
    }

    pub fn controller(&self) -> &SyncController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SyncController {
        &mut self.controller
    }

    pub fn subscription(&self) -> &Subscription<P> {
        &self.subscription
    }

    /// Recompute from the player's current frame.
    pub fn tick(&mut self) -> SyncUpdate {
        let frame_number = self.player.current_frame();
        self.controller.tick(frame_number)
    }

    /// Handle whatever notifications have arrived without waiting. A burst
    /// of notifications collapses into one tick at the latest frame.
    pub fn poll(&mut self) -> Option<SyncUpdate> {
        let mut notified = false;
        while self.events.try_recv().is_ok() {
            notified = true;
        }
        notified.then(|| self.tick())
    }

    /// Wait for the next notification, then tick. `None` once the player has
    /// dropped the channel.
    pub async fn next_update(&mut self) -> Option<SyncUpdate> {
        self.events.recv().await?;
        while self.events.try_recv().is_ok() {}
        Some(self.tick())
    }

    /// Seek the player to the start of the segment at `position`.
    pub fn seek_to_segment(&self, position: usize) -> Result<u64> {
        let frame = self.controller.seek_frame(position)?;
        tracing::debug!(position, frame, "seeking player to segment");
        self.player.seek(frame);
        Ok(frame)
    }

    /// Seek the player to an arbitrary instant, floored to its frame.
    pub fn seek_to_seconds(&self, seconds: f64) -> u64 {
        let frame = seconds_to_frame(seconds, self.controller.fps);
        tracing::debug!(seconds, frame, "seeking player");
        self.player.seek(frame);
        frame
    }
}
