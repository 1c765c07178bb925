//! Tween scheduler.
//!
//! Active tweens are keyed by `(target, field)`. Starting a tween on a key
//! replaces whatever was running on that key; tweens on other keys are never
//! touched. The scheduler owns no references to the animated values: each
//! `advance` writes through a [`TweenSink`].

use crate::constants::DEFAULT_TWEEN_DURATION;
use crate::easing::Ease;
use fnv::FnvHashMap;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    Ball,
    FloorFocus,
    Ripple,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    X,
    Y,
    Z,
    Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TweenKey {
    pub target: TweenTarget,
    pub field: Field,
}

impl TweenKey {
    pub const BALL_X: Self = Self::new(TweenTarget::Ball, Field::X);
    pub const BALL_Y: Self = Self::new(TweenTarget::Ball, Field::Y);
    pub const BALL_Z: Self = Self::new(TweenTarget::Ball, Field::Z);
    pub const FOCUS_U: Self = Self::new(TweenTarget::FloorFocus, Field::X);
    pub const FOCUS_V: Self = Self::new(TweenTarget::FloorFocus, Field::Y);
    pub const RIPPLE: Self = Self::new(TweenTarget::Ripple, Field::Value);

    pub const fn new(target: TweenTarget, field: Field) -> Self {
        Self { target, field }
    }
}

/// Follow-up reported by [`Tweens::advance`] when a tween runs to its end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The ball has settled after a pointer release.
    ReleaseSettled,
}

/// Receives interpolated values.
pub trait TweenSink {
    fn apply(&mut self, key: TweenKey, value: f32);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    pub to: f32,
    pub from: Option<f32>,
    pub duration: f32,
    pub ease: Ease,
    pub on_complete: Option<Completion>,
}

impl TweenSpec {
    pub fn to(value: f32) -> Self {
        Self {
            to: value,
            from: None,
            duration: DEFAULT_TWEEN_DURATION,
            ease: Ease::default(),
            on_complete: None,
        }
    }

    pub fn from(mut self, value: f32) -> Self {
        self.from = Some(value);
        self
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn on_complete(mut self, completion: Completion) -> Self {
        self.on_complete = Some(completion);
        self
    }
}

/// Identifies one started tween; stale handles can't cancel a replacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TweenHandle {
    pub key: TweenKey,
    generation: u64,
}

#[derive(Clone, Debug)]
struct Tween {
    start: f32,
    end: f32,
    elapsed: f32,
    duration: f32,
    ease: Ease,
    on_complete: Option<Completion>,
    generation: u64,
}

impl Tween {
    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    fn value(&self) -> f32 {
        self.start + (self.end - self.start) * self.ease.evaluate(self.progress())
    }
}

#[derive(Default)]
pub struct Tweens {
    active: FnvHashMap<TweenKey, Tween>,
    next_generation: u64,
}

impl Tweens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animating `key` from `current` (or `spec.from`) to `spec.to`,
    /// replacing any tween already running on `key`.
    pub fn to(&mut self, key: TweenKey, current: f32, spec: TweenSpec) -> TweenHandle {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.active.insert(
            key,
            Tween {
                start: spec.from.unwrap_or(current),
                end: spec.to,
                elapsed: 0.0,
                duration: spec.duration.max(0.0),
                ease: spec.ease,
                on_complete: spec.on_complete,
                generation,
            },
        );
        TweenHandle { key, generation }
    }

    /// Cancel the tween behind `handle` if it is still the one running.
    pub fn cancel(&mut self, handle: TweenHandle) -> bool {
        match self.active.get(&handle.key) {
            Some(t) if t.generation == handle.generation => {
                self.active.remove(&handle.key);
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn is_active(&self, key: TweenKey) -> bool {
        self.active.contains_key(&key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Target value of the tween on `key`, if any.
    pub fn destination(&self, key: TweenKey) -> Option<f32> {
        self.active.get(&key).map(|t| t.end)
    }

    /// Step every tween by `dt` seconds, writing values into `sink`.
    /// Finished tweens are dropped and their completions returned.
    pub fn advance<S: TweenSink>(&mut self, dt: f32, sink: &mut S) -> SmallVec<[Completion; 2]> {
        let mut finished: SmallVec<[TweenKey; 4]> = SmallVec::new();
        let mut completions = SmallVec::new();
        for (key, tween) in self.active.iter_mut() {
            tween.elapsed += dt.max(0.0);
            sink.apply(*key, tween.value());
            if tween.progress() >= 1.0 {
                finished.push(*key);
            }
        }
        for key in finished {
            if let Some(t) = self.active.remove(&key) {
                if let Some(c) = t.on_complete {
                    completions.push(c);
                }
            }
        }
        completions
    }
}
