use crate::foundation::core::{Millis, Rect};
use crate::sequencer::display::{MediaClone, StyleTransition, ZoomDisplay, ZoomStyle};
use crate::sequencer::tiles::{Tile, TileLayout};
use crate::sequencer::timing::{GAP_MS, SETTLE_MS, TimingConfig, ZoomEffects};
use crate::settings::model::TileOrder;

/// Playback state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    /// Not started, or stopped.
    Idle,
    /// Cycling through tiles.
    Playing,
    /// Frozen until resumed.
    Paused,
}

/// Step of one tile cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Clone placed at the tile, waiting before the zoom-in.
    Settle,
    /// Growing to fill the container.
    ZoomIn,
    /// Full size.
    Hold,
    /// Fading out.
    ZoomOut,
    /// Display cleared, next tile pending.
    Gap,
}

impl Phase {
    /// Lowercase name used in logs and timelines.
    pub fn name(self) -> &'static str {
        match self {
            Self::Settle => "settle",
            Self::ZoomIn => "zoom-in",
            Self::Hold => "hold",
            Self::ZoomOut => "zoom-out",
            Self::Gap => "gap",
        }
    }
}

/// A phase the sequencer entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequencerEvent {
    /// Scheduled time of the transition.
    pub at: Millis,
    /// DOM index of the tile the phase belongs to.
    pub tile: usize,
    /// Phase entered.
    pub phase: Phase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pending {
    phase: Phase,
    due: Millis,
}

/// Drives one tile at a time through settle, zoom-in, hold, zoom-out and gap.
///
/// Time only moves through [`TileSequencer::tick`]. The host asks
/// [`TileSequencer::next_deadline`] when to call it; a tick with nothing due
/// does nothing, and nothing is ever due outside [`SequencerState::Playing`].
#[derive(Debug)]
pub struct TileSequencer<D: ZoomDisplay> {
    display: D,
    timing: TimingConfig,
    effects: ZoomEffects,
    tiles: Vec<Tile>,
    container: Rect,
    reduced_motion: bool,
    intersecting: bool,
    state: SequencerState,
    cursor: usize,
    phase: Option<Phase>,
    pending: Option<Pending>,
}

impl<D: ZoomDisplay> TileSequencer<D> {
    /// Idle sequencer with no tiles.
    pub fn new(display: D, timing: TimingConfig, effects: ZoomEffects) -> Self {
        Self {
            display,
            timing,
            effects,
            tiles: Vec::new(),
            container: Rect::ZERO,
            reduced_motion: false,
            intersecting: true,
            state: SequencerState::Idle,
            cursor: 0,
            phase: None,
            pending: None,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Phase of the current (or, while paused, interrupted) tile cycle.
    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Position of the in-flight tile in visiting order.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Tiles in visiting order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Affects transitions started from now on.
    pub fn set_reduced_motion(&mut self, on: bool) {
        self.reduced_motion = on;
    }

    /// Whether the host currently intersects the viewport; `resume` requires it.
    pub fn set_intersecting(&mut self, on: bool) {
        self.intersecting = on;
    }

    /// When [`TileSequencer::tick`] next has work.
    pub fn next_deadline(&self) -> Option<Millis> {
        match self.state {
            SequencerState::Playing => self.pending.map(|p| p.due),
            _ => None,
        }
    }

    /// Replace the tile list from a fresh layout.
    pub fn recompute_tiles(&mut self, layout: &TileLayout, order: TileOrder, now: Millis) {
        self.tiles = layout.ordered(order);
        self.container = layout.container;

        if self.tiles.is_empty() {
            if self.state != SequencerState::Idle {
                tracing::debug!("no tiles left, stopping");
            }
            self.stop();
            return;
        }
        self.cursor = self.cursor.min(self.tiles.len() - 1);

        let in_flight = matches!(self.phase, Some(p) if p != Phase::Gap);
        if !in_flight {
            return;
        }
        self.reset_display();
        match self.state {
            SequencerState::Playing => {
                // The cursor tile starts over once the gap elapses.
                self.phase = Some(Phase::Gap);
                self.pending = Some(Pending {
                    phase: Phase::Gap,
                    due: now.after(GAP_MS),
                });
            }
            SequencerState::Paused | SequencerState::Idle => {}
        }
    }

    /// Begin cycling from the first tile. Only acts when idle with tiles.
    pub fn start(&mut self, now: Millis) {
        if self.state != SequencerState::Idle || self.tiles.is_empty() {
            return;
        }
        tracing::debug!(tiles = self.tiles.len(), "sequencer start");
        self.state = SequencerState::Playing;
        self.cursor = 0;
        self.begin_tile(now);
    }

    /// Freeze the display where it is and drop the pending deadline.
    pub fn pause(&mut self, now: Millis) {
        if self.state != SequencerState::Playing {
            return;
        }
        tracing::debug!(cursor = self.cursor, "sequencer pause");
        self.state = SequencerState::Paused;
        self.pending = None;
        self.display.freeze(now);
        self.display.pause_videos();
    }

    /// Continue with the next tile. Needs a paused sequencer on an intersecting host.
    pub fn resume(&mut self, now: Millis) {
        if self.state != SequencerState::Paused || !self.intersecting || self.tiles.is_empty() {
            return;
        }
        let n = self.tiles.len();
        self.cursor = match self.phase {
            // Zoom-out already advanced the cursor.
            Some(Phase::Gap) | None => self.cursor % n,
            Some(_) => (self.cursor + 1) % n,
        };
        tracing::debug!(cursor = self.cursor, "sequencer resume");
        self.state = SequencerState::Playing;
        self.begin_tile(now);
    }

    /// Back to idle with an empty display.
    pub fn stop(&mut self) {
        self.state = SequencerState::Idle;
        self.pending = None;
        self.phase = None;
        self.reset_display();
    }

    /// Empty the zoom display without touching the playback state.
    pub fn reset_display(&mut self) {
        self.display.clear();
        self.display.set_highlight(None);
        self.display.pause_videos();
    }

    /// Run every deadline due at or before `now`, in order.
    pub fn tick(&mut self, now: Millis) -> Vec<SequencerEvent> {
        let mut events = Vec::new();
        while self.state == SequencerState::Playing {
            let Some(p) = self.pending else { break };
            if p.due > now {
                break;
            }
            self.pending = None;
            events.push(self.finish(p));
        }
        events
    }

    fn transition(&self, duration_ms: u64) -> StyleTransition {
        StyleTransition {
            duration_ms,
            ease: self.timing.ease,
            css_easing: self.timing.css_easing.clone(),
        }
    }

    fn enter(&mut self, phase: Phase, at: Millis, len_ms: u64, tile: usize) -> SequencerEvent {
        self.phase = Some(phase);
        self.pending = Some(Pending {
            phase,
            due: at.after(len_ms),
        });
        SequencerEvent { at, tile, phase }
    }

    fn begin_tile(&mut self, at: Millis) -> SequencerEvent {
        let tile = &self.tiles[self.cursor];
        let index = tile.index;
        let style = ZoomStyle::from_tile(
            tile.rect,
            self.container,
            self.effects.blur(self.reduced_motion),
        );
        let clone = MediaClone::of(&tile.media);
        self.display.show(clone, self.container.size(), style, at);
        self.display.set_highlight(Some(index));
        self.enter(Phase::Settle, at, SETTLE_MS, index)
    }

    // `p` is the phase whose deadline just passed.
    fn finish(&mut self, p: Pending) -> SequencerEvent {
        let at = p.due;
        let rm = self.reduced_motion;
        let index = self.tiles[self.cursor].index;
        match p.phase {
            Phase::Settle => {
                let len = self.timing.zoom_in(rm);
                let tr = self.transition(len);
                self.display.transition_to(ZoomStyle::rest(self.effects.opacity), tr, at);
                if let Err(e) = self.display.play_video() {
                    tracing::warn!(tile = index, error = %e, "video playback failed");
                }
                self.enter(Phase::ZoomIn, at, len, index)
            }
            Phase::ZoomIn => self.enter(Phase::Hold, at, self.timing.display_ms, index),
            Phase::Hold => {
                let len = self.timing.zoom_out(rm);
                let tr = self.transition(len);
                let style = ZoomStyle::leaving(self.container.size(), self.effects.blur(rm));
                self.display.transition_to(style, tr, at);
                self.display.set_highlight(None);
                self.enter(Phase::ZoomOut, at, len, index)
            }
            Phase::ZoomOut => {
                self.reset_display();
                self.cursor = (self.cursor + 1) % self.tiles.len();
                self.enter(Phase::Gap, at, GAP_MS, index)
            }
            Phase::Gap => self.begin_tile(at),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/machine.rs"]
mod tests;
