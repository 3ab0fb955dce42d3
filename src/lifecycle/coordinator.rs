use crate::foundation::clock::{Clock, SystemClock};
use crate::foundation::core::{GridDims, Millis, Size};
use crate::foundation::error::HeroResult;
use crate::host::contract::{HostSnapshot, OverlayHostConfig, OverlayRequest};
use crate::host::signals::HeroSignals;
use crate::lifecycle::layers::LayerFlags;
use crate::overlay::{self, OverlayEnv, OverlayKind, OverlayRenderer, OverlaySettings};
use crate::sequencer::display::ZoomDisplay;
use crate::sequencer::machine::{SequencerEvent, SequencerState, TileSequencer};
use crate::sequencer::tiles::TileLayout;
use crate::sequencer::timing::{TimingConfig, ZoomEffects};
use crate::settings::model::{Breakpoint, HeroSettings, MidLayer};

/// Knobs for [`Hero::mount_with`].
pub struct MountOptions {
    /// Seed for overlay entities.
    pub seed: u64,
    /// Limit the overlay to roughly 30 fps.
    pub cap_fps: bool,
    /// Clock the overlay measures render cost with; the system clock when `None`.
    pub clock: Option<Box<dyn Clock>>,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            seed: rand::random(),
            cap_fps: true,
            clock: None,
        }
    }
}

impl std::fmt::Debug for MountOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountOptions")
            .field("seed", &self.seed)
            .field("cap_fps", &self.cap_fps)
            .field("clock", &self.clock.is_some())
            .finish()
    }
}

// The overlay host wins; without one the mid layer settings stand in for its attributes.
fn overlay_config(snapshot: &HostSnapshot, mid: &MidLayer) -> Option<OverlayHostConfig> {
    if let Some(attrs) = &snapshot.overlay_host {
        return Some(attrs.resolve());
    }
    if !mid.enabled {
        return None;
    }
    let request = match OverlayKind::from_setting(mid.overlay.kind) {
        Some(kind) => OverlayRequest::Canvas(kind),
        None if mid.middle_pattern.css_name().is_some() => OverlayRequest::Css(mid.middle_pattern),
        None => OverlayRequest::None,
    };
    Some(OverlayHostConfig {
        request,
        opacity: mid.overlay.opacity,
        speed: mid.overlay.speed,
        density: mid.overlay.density,
        blend: mid.overlay.blend_mode,
        shadow_strength: mid.shadow_strength.clamp(0.0, 1.0),
    })
}

fn canvas_size(snapshot: &HostSnapshot) -> Size {
    let from_host = snapshot
        .overlay_host
        .as_ref()
        .map(|a| a.canvas_box.size())
        .filter(|s| s.width > 0.0 && s.height > 0.0);
    from_host
        .or_else(|| snapshot.container.map(|c| c.size()))
        .unwrap_or(Size::ZERO)
}

/// One mounted hero: its sequencer, its overlay and the signals gating both.
///
/// Zoom runs while the host intersects the viewport, the tab is visible, the
/// zoom layer is on and reduced motion has not been switched on mid-session.
/// The overlay runs while the host intersects, the tab is visible, the overlay
/// layer is on and reduced motion is off.
///
/// Reduced motion depends on when it arrives. Already on at mount, the zoom
/// still plays with the short reduced-motion durations; switched on later, the
/// zoom is held where it is until the preference is cleared.
///
/// A paused hero has no wakeup, so the host ticks it again after every
/// [`SignalSource::set`](crate::SignalSource::set).
pub struct Hero<D: ZoomDisplay> {
    settings: HeroSettings,
    snapshot: HostSnapshot,
    fallback_grid: GridDims,
    sequencer: TileSequencer<D>,
    overlay: Option<Box<dyn OverlayRenderer>>,
    overlay_config: Option<OverlayHostConfig>,
    signals: HeroSignals,
    flags: LayerFlags,
    motion_hold: bool,
    fresh: bool,
    destroyed: bool,
}

impl<D: ZoomDisplay> Hero<D> {
    /// Mount with a random overlay seed and the system clock.
    pub fn mount(snapshot: HostSnapshot, display: D, signals: HeroSignals) -> HeroResult<Self> {
        Self::mount_with(snapshot, display, signals, MountOptions::default())
    }

    /// Mount, logging and swallowing a broken host contract.
    pub fn try_mount(snapshot: HostSnapshot, display: D, signals: HeroSignals) -> Option<Self> {
        match Self::mount(snapshot, display, signals) {
            Ok(hero) => Some(hero),
            Err(e) => {
                tracing::warn!(error = %e, "hero not initialized");
                None
            }
        }
    }

    /// Validate the host, read its settings, collect tiles and build the overlay.
    ///
    /// Nothing starts until the first [`Hero::tick`].
    #[tracing::instrument(skip_all, fields(tiles = snapshot.tiles.len()))]
    pub fn mount_with(
        snapshot: HostSnapshot,
        display: D,
        signals: HeroSignals,
        options: MountOptions,
    ) -> HeroResult<Self> {
        let container = snapshot.validate()?;
        let settings = HeroSettings::from_payload(snapshot.settings_payload.as_deref());
        let fallback_grid = settings.grids.grid(Breakpoint::Pc);
        let reduced_motion = signals.reduced_motion.get();

        let mut sequencer = TileSequencer::new(
            display,
            TimingConfig::from_settings(&settings),
            ZoomEffects::from_settings(&settings.effects),
        );
        sequencer.set_reduced_motion(reduced_motion);
        sequencer.set_intersecting(signals.intersecting.get());
        let layout = TileLayout::from_snapshot(&snapshot, fallback_grid)?;
        sequencer.recompute_tiles(&layout, settings.order, Millis::ZERO);

        let overlay_config = overlay_config(&snapshot, &settings.layers.mid);
        let overlay = match overlay_config.map(|c| (c.request, c)) {
            Some((OverlayRequest::Canvas(kind), cfg)) => {
                let env = OverlayEnv::new(
                    reduced_motion,
                    snapshot.device_pixel_ratio,
                    canvas_size(&snapshot),
                )
                .with_seed(options.seed);
                let env = OverlayEnv {
                    cap_fps: options.cap_fps,
                    ..env
                };
                let clock = options
                    .clock
                    .unwrap_or_else(|| Box::new(SystemClock::new()) as Box<dyn Clock>);
                Some(overlay::init_with_clock(
                    kind,
                    OverlaySettings::from(&cfg),
                    env,
                    clock,
                ))
            }
            _ => None,
        };

        tracing::debug!(
            tiles = sequencer.tiles().len(),
            width = container.width(),
            height = container.height(),
            overlay = overlay.as_ref().map(|o| o.kind().name()),
            "hero mounted"
        );

        Ok(Self {
            settings,
            snapshot,
            fallback_grid,
            sequencer,
            overlay,
            overlay_config,
            signals,
            flags: LayerFlags::default(),
            motion_hold: false,
            fresh: true,
            destroyed: false,
        })
    }

    pub fn settings(&self) -> &HeroSettings {
        &self.settings
    }

    pub fn sequencer(&self) -> &TileSequencer<D> {
        &self.sequencer
    }

    pub fn display(&self) -> &D {
        self.sequencer.display()
    }

    pub fn overlay(&self) -> Option<&dyn OverlayRenderer> {
        self.overlay.as_deref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Whether the zoom sequence may play right now.
    pub fn zoom_allowed(&self) -> bool {
        self.signals.intersecting.get()
            && self.signals.tab_visible.get()
            && self.flags.zoom
            && !self.motion_hold
    }

    /// Whether the overlay may run right now.
    pub fn overlay_allowed(&self) -> bool {
        self.signals.intersecting.get()
            && self.signals.tab_visible.get()
            && self.flags.overlay
            && !self.signals.reduced_motion.get()
    }

    /// Earliest time [`Hero::tick`] has work; [`Millis::ZERO`] means as soon as possible.
    pub fn next_wakeup(&self) -> Option<Millis> {
        if self.destroyed {
            return None;
        }
        if self.fresh {
            return Some(Millis::ZERO);
        }
        let frame = self.overlay.as_ref().and_then(|o| o.next_frame_at());
        match (self.sequencer.next_deadline(), frame) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Poll the signals, fire the sequencer deadline and draw an overlay frame when due.
    pub fn tick(&mut self, now: Millis) -> Vec<SequencerEvent> {
        if self.destroyed {
            return Vec::new();
        }
        self.fresh = false;
        self.poll_signals(now);
        // Deadlines that passed before the signals were seen still fire.
        let events = self.sequencer.tick(now);
        self.apply_gates(now);

        if let Some(o) = &mut self.overlay {
            if o.next_frame_at().is_some_and(|at| at <= now) {
                o.frame(now);
            }
        }
        events
    }

    fn poll_signals(&mut self, now: Millis) {
        if let Some(on) = self.signals.intersecting.take_change() {
            tracing::debug!(intersecting = on, "intersection changed");
            self.sequencer.set_intersecting(on);
        }
        if let Some(visible) = self.signals.tab_visible.take_change() {
            tracing::debug!(visible, "tab visibility changed");
            // A hide and show between two ticks never paused the session; its tiles stand.
            let playing = self.sequencer.state() == SequencerState::Playing;
            if visible && !playing && self.signals.intersecting.get() {
                self.recompute(now);
            }
        }
        if let Some(reduced) = self.signals.reduced_motion.take_change() {
            tracing::debug!(reduced, "reduced motion changed");
            self.sequencer.set_reduced_motion(reduced);
            self.motion_hold = reduced;
        }
    }

    fn apply_gates(&mut self, now: Millis) {
        let zoom = self.zoom_allowed();
        match (zoom, self.sequencer.state()) {
            (true, SequencerState::Idle) => self.sequencer.start(now),
            (true, SequencerState::Paused) => self.sequencer.resume(now),
            (false, SequencerState::Playing) => self.sequencer.pause(now),
            _ => {}
        }

        let run = self.overlay_allowed();
        if let Some(o) = &mut self.overlay {
            if run && !o.is_running() {
                o.start(now);
            } else if !run && o.is_running() {
                o.stop();
            }
        }
    }

    fn recompute(&mut self, now: Millis) {
        match TileLayout::from_snapshot(&self.snapshot, self.fallback_grid) {
            Ok(layout) => self
                .sequencer
                .recompute_tiles(&layout, self.settings.order, now),
            Err(e) => tracing::warn!(error = %e, "tile layout unavailable"),
        }
    }

    /// The host was laid out again; stale zooms reset and tiles are re-measured.
    pub fn on_resize(&mut self, snapshot: HostSnapshot, now: Millis) {
        if self.destroyed {
            return;
        }
        if let Err(e) = snapshot.validate() {
            tracing::warn!(error = %e, "ignoring resize of a broken host");
            return;
        }
        self.snapshot = snapshot;
        self.recompute(now);
        if let Some(o) = &mut self.overlay {
            o.set_element_size(canvas_size(&self.snapshot));
            o.resize();
        }
        self.apply_gates(now);
    }

    pub fn layer_flags(&self) -> LayerFlags {
        self.flags
    }

    /// Show or hide layers; zoom and overlay restart when their gates allow it.
    pub fn set_layer_flags(&mut self, flags: LayerFlags, now: Millis) {
        if self.destroyed || flags == self.flags {
            return;
        }
        tracing::debug!(?flags, "layer flags");
        let zoom_off = self.flags.zoom && !flags.zoom;
        self.flags = flags;
        if zoom_off {
            self.sequencer.pause(now);
            self.sequencer.reset_display();
        }
        self.apply_gates(now);
    }

    /// Class of the CSS-only middle pattern, e.g. `nsmhs-overlay--dots`.
    pub fn overlay_class(&self) -> Option<String> {
        match self.overlay_config?.request {
            OverlayRequest::Css(p) => p.css_name().map(|n| format!("nsmhs-overlay--{n}")),
            _ => None,
        }
    }

    /// Value of `--nsmhs-overlay-alpha`.
    pub fn overlay_alpha(&self) -> f64 {
        self.overlay_config
            .map(|c| c.shadow_strength)
            .unwrap_or_else(|| self.settings.layers.mid.shadow_strength.clamp(0.0, 1.0))
    }

    /// Stop the sequence and release the overlay. Later calls do nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.sequencer.stop();
        if let Some(o) = &mut self.overlay {
            o.destroy();
        }
        self.destroyed = true;
        tracing::debug!("hero destroyed");
    }
}

impl<D: ZoomDisplay + std::fmt::Debug> std::fmt::Debug for Hero<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hero")
            .field("sequencer", &self.sequencer)
            .field("overlay", &self.overlay.as_ref().map(|o| o.kind()))
            .field("flags", &self.flags)
            .field("motion_hold", &self.motion_hold)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/coordinator.rs"]
mod tests;
