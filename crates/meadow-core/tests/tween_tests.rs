// Host-side tests for the tween scheduler.

use meadow_core::*;
use std::collections::HashMap;

#[derive(Default)]
struct Recorder {
    values: HashMap<(TweenTarget, Field), f32>,
}

impl TweenSink for Recorder {
    fn apply(&mut self, key: TweenKey, value: f32) {
        self.values.insert((key.target, key.field), value);
    }
}

impl Recorder {
    fn get(&self, key: TweenKey) -> Option<f32> {
        self.values.get(&(key.target, key.field)).copied()
    }
}

#[test]
fn reaches_target_after_duration() {
    let mut tweens = Tweens::new();
    let mut sink = Recorder::default();
    tweens.to(TweenKey::BALL_Y, 0.0, TweenSpec::to(1.0).duration(1.0).ease(Ease::Linear));
    tweens.advance(0.5, &mut sink);
    assert!((sink.get(TweenKey::BALL_Y).unwrap() - 0.5).abs() < 1e-6);
    tweens.advance(0.6, &mut sink);
    assert_eq!(sink.get(TweenKey::BALL_Y), Some(1.0));
    assert!(tweens.is_empty());
}

#[test]
fn default_duration_and_ease() {
    let spec = TweenSpec::to(2.0);
    assert_eq!(spec.duration, DEFAULT_TWEEN_DURATION);
    assert_eq!(spec.ease, Ease::Power1Out);
}

#[test]
fn same_key_replaces_running_tween() {
    let mut tweens = Tweens::new();
    let mut sink = Recorder::default();
    tweens.to(
        TweenKey::BALL_Y,
        0.0,
        TweenSpec::to(1.0).on_complete(Completion::ReleaseSettled),
    );
    tweens.advance(0.1, &mut sink);
    let y = sink.get(TweenKey::BALL_Y).unwrap();
    tweens.to(TweenKey::BALL_Y, y, TweenSpec::to(-1.0).duration(0.2));
    assert_eq!(tweens.len(), 1);
    let done = tweens.advance(1.0, &mut sink);
    assert!(done.is_empty(), "replaced tween must not complete");
    assert!((sink.get(TweenKey::BALL_Y).unwrap() + 1.0).abs() < 1e-6);
}

#[test]
fn other_keys_are_untouched() {
    let mut tweens = Tweens::new();
    let mut sink = Recorder::default();
    tweens.to(TweenKey::RIPPLE, 0.0, TweenSpec::to(1.0).duration(1.0));
    tweens.to(TweenKey::BALL_Y, 0.0, TweenSpec::to(1.0).duration(0.1));
    tweens.to(TweenKey::BALL_Y, 0.0, TweenSpec::to(2.0).duration(0.1));
    assert_eq!(tweens.len(), 2);
    assert_eq!(tweens.destination(TweenKey::RIPPLE), Some(1.0));
    tweens.advance(0.2, &mut sink);
    assert!(tweens.is_active(TweenKey::RIPPLE));
    assert!(!tweens.is_active(TweenKey::BALL_Y));
}

#[test]
fn completion_reported_once() {
    let mut tweens = Tweens::new();
    let mut sink = Recorder::default();
    tweens.to(
        TweenKey::BALL_Y,
        1.0,
        TweenSpec::to(0.45)
            .duration(0.2)
            .on_complete(Completion::ReleaseSettled),
    );
    assert!(tweens.advance(0.1, &mut sink).is_empty());
    let done = tweens.advance(0.1, &mut sink);
    assert_eq!(done.as_slice(), &[Completion::ReleaseSettled]);
    assert!(tweens.advance(0.1, &mut sink).is_empty());
}

#[test]
fn explicit_start_value() {
    let mut tweens = Tweens::new();
    let mut sink = Recorder::default();
    tweens.to(
        TweenKey::RIPPLE,
        3.0,
        TweenSpec::to(1.0).from(0.0).duration(1.0).ease(Ease::Linear),
    );
    tweens.advance(0.25, &mut sink);
    assert!((sink.get(TweenKey::RIPPLE).unwrap() - 0.25).abs() < 1e-6);
}

#[test]
fn stale_handle_cannot_cancel_replacement() {
    let mut tweens = Tweens::new();
    let first = tweens.to(TweenKey::BALL_X, 0.0, TweenSpec::to(1.0));
    let second = tweens.to(TweenKey::BALL_X, 0.0, TweenSpec::to(2.0));
    assert!(!tweens.cancel(first));
    assert!(tweens.is_active(TweenKey::BALL_X));
    assert!(tweens.cancel(second));
    assert!(tweens.is_empty());
}

#[test]
fn zero_duration_jumps_to_end() {
    let mut tweens = Tweens::new();
    let mut sink = Recorder::default();
    tweens.to(TweenKey::FOCUS_U, 0.0, TweenSpec::to(0.7).duration(0.0));
    tweens.advance(0.0, &mut sink);
    assert_eq!(sink.get(TweenKey::FOCUS_U), Some(0.7));
    assert!(tweens.is_empty());
}
