//! Pointer lifecycle and the input queue drained by the frame loop.

use crate::viewport::Viewport;
use std::collections::VecDeque;

/// Pointer position in CSS pixels relative to the window.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    /// Normalize mouse and touch input: the first changed touch wins when
    /// present, otherwise the mouse client position is used.
    #[inline]
    pub fn from_client(changed_touch: Option<(f32, f32)>, client: (f32, f32)) -> Self {
        let (x, y) = changed_touch.unwrap_or(client);
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Resize(Viewport),
    PointerMove(PointerSample),
    PointerDown(PointerSample),
    PointerUp(PointerSample),
}

/// FIFO of input events recorded by DOM listeners, drained once per tick.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerPhase {
    #[default]
    Idle,
    Pressed,
    /// Released, waiting for the ball to settle before going idle.
    Releasing,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Interaction {
    pub phase: PointerPhase,
    /// Idle-bob clock; frozen while the pointer is down.
    pub elapsed_time: f32,
}

impl Interaction {
    #[inline]
    pub fn is_down(&self) -> bool {
        self.phase != PointerPhase::Idle
    }

    #[inline]
    pub fn press(&mut self) {
        self.phase = PointerPhase::Pressed;
    }

    /// Returns false when there was no press to release.
    pub fn release(&mut self) -> bool {
        match self.phase {
            PointerPhase::Pressed => {
                self.phase = PointerPhase::Releasing;
                true
            }
            _ => false,
        }
    }

    /// Called when the release tween completes.
    pub fn settle(&mut self) {
        if self.phase == PointerPhase::Releasing {
            self.phase = PointerPhase::Idle;
        }
    }

    /// Advance the idle clock by `tick` and return it, or `None` while down.
    pub fn advance_idle(&mut self, tick: f32) -> Option<f32> {
        if self.is_down() {
            return None;
        }
        self.elapsed_time += tick;
        Some(self.elapsed_time)
    }
}
