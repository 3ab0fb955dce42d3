use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::foundation::clock::Clock;
use crate::foundation::core::{Millis, Size};
use crate::overlay::canvas::OverlayCanvas;
use crate::overlay::governor::{Downgrade, FrameGovernor};
use crate::overlay::{
    FieldContext, OverlayEnv, OverlayField, OverlayKind, OverlayRenderer, OverlaySettings,
    clamp_pixel_ratio,
};

/// Frame interval at display refresh.
pub const FRAME_MS: u64 = 16;
/// Minimum frame spacing when fps is capped.
pub const CAPPED_FRAME_MS: u64 = 33;

/// When the frame loop wants to run again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameRequest {
    /// On the next display refresh.
    NextFrame,
    /// After this many milliseconds, then on the next refresh.
    After(u64),
    /// Not at all; the loop is stopped.
    None,
}

/// The frame loop shared by every overlay kind.
pub struct Overlay<F: OverlayField> {
    canvas: OverlayCanvas,
    settings: OverlaySettings,
    env: OverlayEnv,
    governor: FrameGovernor,
    field: Option<F>,
    rng: SmallRng,
    clock: Box<dyn Clock>,
    running: bool,
    last_frame: Millis,
    next_frame: Option<Millis>,
}

impl<F: OverlayField> Overlay<F> {
    /// Size the canvas from `env` and generate the initial entities.
    pub fn new(settings: OverlaySettings, env: OverlayEnv, clock: Box<dyn Clock>) -> Self {
        let env = OverlayEnv {
            pixel_ratio: clamp_pixel_ratio(env.pixel_ratio),
            ..env
        };
        let canvas = OverlayCanvas::new(env.element_size(), env.pixel_ratio, settings.blend);
        let mut overlay = Self {
            canvas,
            settings,
            env,
            governor: FrameGovernor::new(settings.density, env.pixel_ratio),
            field: None,
            rng: SmallRng::seed_from_u64(env.seed),
            clock,
            running: false,
            last_frame: Millis::ZERO,
            next_frame: None,
        };
        overlay.populate();
        overlay
    }

    /// The live entity set, `None` after destroy.
    pub fn field(&self) -> Option<&F> {
        self.field.as_ref()
    }

    fn context(&self) -> FieldContext {
        FieldContext {
            extent: self.canvas.extent(),
            pixel_ratio: self.governor.pixel_ratio(),
            opacity: self.settings.opacity,
            speed: self.settings.speed,
        }
    }

    fn populate(&mut self) {
        let cx = self.context();
        let count = F::KIND.tier_count(self.governor.density());
        self.field = Some(F::populate(count, &cx, &mut self.rng));
    }

    fn apply(&mut self, step: Downgrade) {
        match step {
            Downgrade::Density(_) => self.populate(),
            Downgrade::PixelRatio(_) => self.resize(),
        }
    }

    fn render(&mut self, dt_ms: f64) {
        let cx = self.context();
        self.canvas.clear();
        if let Some(field) = &mut self.field {
            field.advance(dt_ms, &cx);
            field.draw(&cx, self.canvas.display_list_mut());
        }
    }
}

impl<F: OverlayField> OverlayRenderer for Overlay<F> {
    fn kind(&self) -> OverlayKind {
        F::KIND
    }

    fn start(&mut self, now: Millis) -> FrameRequest {
        if self.env.reduced_motion || self.running || self.field.is_none() {
            return FrameRequest::None;
        }
        self.running = true;
        self.last_frame = now;
        self.next_frame = Some(now);
        FrameRequest::NextFrame
    }

    fn stop(&mut self) {
        self.running = false;
        self.next_frame = None;
        self.canvas.clear();
    }

    fn resize(&mut self) {
        self.canvas.resize(self.governor.pixel_ratio());
        let cx = self.context();
        if let Some(field) = &mut self.field {
            field.relayout(&cx, &mut self.rng);
        }
    }

    fn destroy(&mut self) {
        self.stop();
        self.field = None;
    }

    fn frame(&mut self, now: Millis) -> FrameRequest {
        if !self.running {
            return FrameRequest::None;
        }
        let started = self.clock.now_ms();
        let dt = now.since(self.last_frame);
        self.last_frame = now;

        if self.canvas.needs_resize() {
            self.resize();
        }
        self.render(dt as f64);

        let cost = self.clock.now_ms() - started;
        if let Some(step) = self.governor.record(cost) {
            self.apply(step);
        }

        let request = if self.env.cap_fps && dt < CAPPED_FRAME_MS {
            FrameRequest::After(CAPPED_FRAME_MS - dt)
        } else {
            FrameRequest::NextFrame
        };
        self.next_frame = Some(match request {
            FrameRequest::After(ms) => now.after(ms),
            _ => now.after(FRAME_MS),
        });
        request
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn next_frame_at(&self) -> Option<Millis> {
        if self.running { self.next_frame } else { None }
    }

    fn canvas(&self) -> &OverlayCanvas {
        &self.canvas
    }

    fn set_element_size(&mut self, element: Size) {
        self.canvas.set_element_size(element);
    }

    fn governor(&self) -> &FrameGovernor {
        &self.governor
    }

    fn entity_count(&self) -> usize {
        self.field.as_ref().map_or(0, |f| f.len())
    }
}

impl<F: OverlayField> std::fmt::Debug for Overlay<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overlay")
            .field("kind", &F::KIND)
            .field("running", &self.running)
            .field("entities", &self.entity_count())
            .field("governor", &self.governor)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/runner.rs"]
mod tests;
