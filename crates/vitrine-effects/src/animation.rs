//! Property animation for effects.
//!
//! The [`Animator`] interpolates one value per [`Track`] over time and reports
//! each step as a [`Frame`]. The host applies frames to the page (scroll
//! position, inline opacity) and forwards them to effects that derive further
//! properties from them.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use vitrine_effects::animation::{Animator, Track, Tween};
//!
//! let mut animator = Animator::new();
//! animator.animate(
//!     Tween::new(Track::ScrollY)
//!         .from(0.0)
//!         .to(420.0)
//!         .duration(Duration::from_millis(800)),
//! );
//!
//! let frames = animator.advance(Duration::from_millis(800));
//! assert_eq!(frames[0].value, 420.0);
//! assert!(frames[0].finished);
//! ```

use std::time::Duration;

use indexmap::IndexMap;
use vitrine_dom::{ElementId, Page};

/// What a tween drives. At most one tween runs per track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    /// The window's vertical scroll position.
    ScrollY,
    /// Inline `opacity` of an element.
    Opacity(ElementId),
}

/// Half-cosine ease in and out, the classic "swing" curve.
///
/// Maps normalized time in `0.0..=1.0` to eased progress; symmetric about
/// the midpoint.
pub fn swing(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    0.5 - (t * std::f64::consts::PI).cos() / 2.0
}

/// A single interpolation from one value to another.
#[derive(Debug, Clone)]
pub struct Tween {
    track: Track,
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
}

impl Tween {
    pub fn new(track: Track) -> Self {
        Self {
            track,
            from: 0.0,
            to: 1.0,
            duration: Duration::from_millis(400),
            elapsed: Duration::ZERO,
        }
    }

    /// Set the start value.
    pub fn from(mut self, value: f64) -> Self {
        self.from = value;
        self
    }

    /// Set the end value.
    pub fn to(mut self, value: f64) -> Self {
        self.to = value;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn track(&self) -> Track {
        self.track
    }

    /// Linear time progress in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Current eased value.
    pub fn value(&self) -> f64 {
        let t = self.progress();
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * swing(t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `delta`. Returns true while the tween is still running.
    pub fn update(&mut self, delta: Duration) -> bool {
        self.elapsed = (self.elapsed + delta).min(self.duration);
        !self.is_finished()
    }
}

/// One interpolation step, reported after every [`Animator::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub track: Track,
    /// Eased value to apply.
    pub value: f64,
    /// Linear time progress in `0.0..=1.0`.
    pub progress: f64,
    /// This is the tween's last frame.
    pub finished: bool,
}

/// Runs tweens, keyed by track.
#[derive(Debug, Default)]
pub struct Animator {
    tweens: IndexMap<Track, Tween>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween. A tween already running on the same track is dropped.
    pub fn animate(&mut self, tween: Tween) {
        if self.tweens.shift_remove(&tween.track()).is_some() {
            tracing::trace!(track = ?tween.track(), "superseding running tween");
        }
        self.tweens.insert(tween.track(), tween);
    }

    pub fn cancel(&mut self, track: Track) -> bool {
        self.tweens.shift_remove(&track).is_some()
    }

    pub fn is_animating(&self, track: Track) -> bool {
        self.tweens.contains_key(&track)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Advance every tween and collect this step's frames in start order.
    /// Finished tweens are removed after reporting their final frame.
    pub fn advance(&mut self, delta: Duration) -> Vec<Frame> {
        let mut frames = Vec::with_capacity(self.tweens.len());
        self.tweens.retain(|_, tween| {
            let running = tween.update(delta);
            frames.push(Frame {
                track: tween.track(),
                value: tween.value(),
                progress: tween.progress(),
                finished: !running,
            });
            running
        });
        frames
    }
}

/// Write a frame's value to the property its track drives.
pub fn apply_frame(page: &mut dyn Page, frame: &Frame) {
    match frame.track {
        Track::ScrollY => page.set_scroll_y(frame.value),
        Track::Opacity(el) => page.set_style(el, "opacity", &frame.value.to_string()),
    }
}
