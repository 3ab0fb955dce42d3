use crate::animation::ease::Ease;
use crate::foundation::core::{Affine, Millis, Vec2};

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Interpolate from `a` (t = 0) to `b` (t = 1).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

// Coefficient-wise; exact for the translate+scale transforms the zoom uses.
impl Lerp for Affine {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let ca = a.as_coeffs();
        let cb = b.as_coeffs();
        let mut out = [0.0; 6];
        for (i, o) in out.iter_mut().enumerate() {
            *o = ca[i] + (cb[i] - ca[i]) * t;
        }
        Affine::new(out)
    }
}

/// A timed move from one value to another.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T> {
    /// Value at `start`.
    pub from: T,
    /// Value once `duration_ms` has elapsed.
    pub to: T,
    /// Time the tween began.
    pub start: Millis,
    /// Length of the tween; zero jumps straight to `to`.
    pub duration_ms: u64,
    /// Easing applied to progress.
    pub ease: Ease,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    /// A tween that is already at rest on `value`.
    pub fn settled(value: T, at: Millis) -> Self {
        Self {
            from: value.clone(),
            to: value,
            start: at,
            duration_ms: 0,
            ease: Ease::Linear,
        }
    }

    /// Normalized (un-eased) progress at `now`.
    pub fn progress(&self, now: Millis) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (now.since(self.start) as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    /// Interpolated value at `now`.
    pub fn sample(&self, now: Millis) -> T {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to.clone();
        }
        T::lerp(&self.from, &self.to, self.ease.apply(t))
    }

    /// Return `true` once the tween has reached `to`.
    pub fn is_done(&self, now: Millis) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
