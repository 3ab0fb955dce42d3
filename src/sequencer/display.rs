//! The zoom display target: the element that shows the tile being zoomed.

use crate::animation::ease::Ease;
use crate::animation::tween::{Lerp, Tween};
use crate::foundation::core::{Affine, Millis, Point, Rect, Size, Vec2};
use crate::foundation::error::{HeroError, HeroResult};
use crate::host::contract::MediaSource;
use crate::settings::model::MediaType;

/// Visual state of the zoom display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomStyle {
    /// Transform relative to the container's top-left corner.
    pub transform: Affine,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Gaussian blur radius.
    pub blur_px: f64,
}

impl ZoomStyle {
    /// Full container, fully shown.
    pub fn rest(opacity: f64) -> Self {
        Self {
            transform: Affine::IDENTITY,
            opacity,
            blur_px: 0.0,
        }
    }

    /// Start of a zoom-in: the container-sized display shrunk onto `tile`.
    ///
    /// Scale is `1/s` with `s = max(cw/tw, ch/th)`, so the display covers the
    /// tile along its tighter axis.
    pub fn from_tile(tile: Rect, container: Rect, blur_px: f64) -> Self {
        let tw = tile.width();
        let th = tile.height();
        let s = if tw > 0.0 && th > 0.0 {
            (container.width() / tw).max(container.height() / th)
        } else {
            1.0
        };
        let s = if s.is_finite() && s > 0.0 { s } else { 1.0 };
        let offset = tile.origin() - container.origin();
        Self {
            transform: Affine::translate(offset) * Affine::scale(1.0 / s),
            opacity: 0.0,
            blur_px,
        }
    }

    /// End of a zoom-out: slight overscale about the container centre, faded and blurred.
    pub fn leaving(container: Size, blur_px: f64) -> Self {
        let c = Vec2::new(container.width / 2.0, container.height / 2.0);
        Self {
            transform: Affine::translate(c) * Affine::scale(1.1) * Affine::translate(-c),
            opacity: 0.0,
            blur_px,
        }
    }

    /// Where the display's top-left corner lands.
    pub fn origin(&self) -> Point {
        self.transform * Point::ORIGIN
    }

    /// CSS `transform` value.
    pub fn css_transform(&self) -> String {
        let [a, b, c, d, e, f] = self.transform.as_coeffs();
        format!("matrix({a}, {b}, {c}, {d}, {e}, {f})")
    }

    /// CSS `filter` value.
    pub fn css_filter(&self) -> String {
        if self.blur_px > 0.0 {
            format!("blur({}px)", self.blur_px)
        } else {
            "none".to_owned()
        }
    }
}

impl Lerp for ZoomStyle {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            transform: Affine::lerp(&a.transform, &b.transform, t),
            opacity: f64::lerp(&a.opacity, &b.opacity, t),
            blur_px: f64::lerp(&a.blur_px, &b.blur_px, t),
        }
    }
}

/// How a style change animates.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleTransition {
    /// Transition length.
    pub duration_ms: u64,
    /// Easing curve.
    pub ease: Ease,
    /// CSS keyword for the easing.
    pub css_easing: String,
}

impl StyleTransition {
    /// CSS `transition` value covering transform, opacity and filter.
    pub fn css(&self) -> String {
        let d = self.duration_ms;
        let e = &self.css_easing;
        format!("transform {d}ms {e}, opacity {d}ms {e}, filter {d}ms {e}")
    }
}

/// The media element placed in the zoom display.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaClone {
    /// What is shown.
    pub source: MediaSource,
    /// Videos are always muted.
    pub muted: bool,
    /// Videos loop while held.
    pub looped: bool,
    /// Videos play inline.
    pub plays_inline: bool,
}

impl MediaClone {
    /// Clone a tile's media for display.
    pub fn of(source: &MediaSource) -> Self {
        let video = source.kind == MediaType::Video;
        Self {
            source: source.clone(),
            muted: video,
            looped: video,
            plays_inline: video,
        }
    }

    /// Return `true` for video clones.
    pub fn is_video(&self) -> bool {
        self.source.kind == MediaType::Video
    }
}

/// Element the sequencer drives.
///
/// Implementations map these calls onto a real element (inline styles,
/// `nsmhs-active` / `nsmhs-zooming` classes, `<video>` playback). [`ZoomStage`]
/// keeps the state in memory.
pub trait ZoomDisplay {
    /// Replace the displayed media (never layered) and jump to `style`.
    fn show(&mut self, media: MediaClone, size: Size, style: ZoomStyle, now: Millis);

    /// Animate from the current visual state to `style`.
    fn transition_to(&mut self, style: ZoomStyle, transition: StyleTransition, now: Millis);

    /// Stop any running transition at its visual state at `now`.
    fn freeze(&mut self, now: Millis);

    /// Remove media and styles.
    fn clear(&mut self);

    /// Mark `tile` (by DOM index) as zooming; `None` removes every mark.
    fn set_highlight(&mut self, tile: Option<usize>);

    /// Start playback of the displayed video from the beginning.
    fn play_video(&mut self) -> HeroResult<()>;

    /// Pause every playing video under the host.
    fn pause_videos(&mut self);

    /// Return `true` while media is displayed.
    fn is_active(&self) -> bool;
}

/// In-memory zoom display.
#[derive(Clone, Debug, Default)]
pub struct ZoomStage {
    media: Option<MediaClone>,
    size: Size,
    tween: Option<Tween<ZoomStyle>>,
    transition: Option<StyleTransition>,
    highlight: Option<usize>,
    video_playing: bool,
    /// When set, [`ZoomDisplay::play_video`] fails like a blocked autoplay.
    pub reject_autoplay: bool,
    shows: u64,
}

impl ZoomStage {
    /// Empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Displayed media.
    pub fn media(&self) -> Option<&MediaClone> {
        self.media.as_ref()
    }

    /// Size the display was given.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Visual state at `now`, `None` when nothing is shown.
    pub fn sample(&self, now: Millis) -> Option<ZoomStyle> {
        self.media.as_ref()?;
        self.tween.as_ref().map(|t| t.sample(now))
    }

    /// Style the display is heading to.
    pub fn target(&self) -> Option<ZoomStyle> {
        self.media.as_ref()?;
        self.tween.as_ref().map(|t| t.to)
    }

    /// Transition currently applied.
    pub fn transition(&self) -> Option<&StyleTransition> {
        self.transition.as_ref()
    }

    /// Tile currently marked as zooming.
    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// Whether the displayed video is playing.
    pub fn video_playing(&self) -> bool {
        self.video_playing
    }

    /// Number of times media was placed.
    pub fn shows(&self) -> u64 {
        self.shows
    }
}

impl ZoomDisplay for ZoomStage {
    fn show(&mut self, media: MediaClone, size: Size, style: ZoomStyle, now: Millis) {
        self.media = Some(media);
        self.size = size;
        self.tween = Some(Tween::settled(style, now));
        self.transition = None;
        self.video_playing = false;
        self.shows += 1;
    }

    fn transition_to(&mut self, style: ZoomStyle, transition: StyleTransition, now: Millis) {
        let from = self
            .tween
            .as_ref()
            .map(|t| t.sample(now))
            .unwrap_or(style);
        self.tween = Some(Tween {
            from,
            to: style,
            start: now,
            duration_ms: transition.duration_ms,
            ease: transition.ease,
        });
        self.transition = Some(transition);
    }

    fn freeze(&mut self, now: Millis) {
        if let Some(t) = &self.tween {
            self.tween = Some(Tween::settled(t.sample(now), now));
        }
        self.transition = None;
    }

    fn clear(&mut self) {
        self.media = None;
        self.size = Size::ZERO;
        self.tween = None;
        self.transition = None;
        self.highlight = None;
        self.video_playing = false;
    }

    fn set_highlight(&mut self, tile: Option<usize>) {
        self.highlight = tile;
    }

    fn play_video(&mut self) -> HeroResult<()> {
        let Some(m) = &self.media else {
            return Ok(());
        };
        if !m.is_video() {
            return Ok(());
        }
        if self.reject_autoplay {
            return Err(HeroError::playback("autoplay rejected"));
        }
        self.video_playing = true;
        Ok(())
    }

    fn pause_videos(&mut self) {
        self.video_playing = false;
    }

    fn is_active(&self) -> bool {
        self.media.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/display.rs"]
mod tests;
