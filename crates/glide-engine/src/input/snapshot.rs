//! Per-frame input as an explicit value object.
//!
//! The host feeds raw events into an [`InputSnapshot`]; game update code
//! receives the snapshot by reference and never reads global input state,
//! which keeps frame updates deterministic and testable.

use std::collections::HashSet;

use glam::Vec2;

/// Raw input event from the host. Generic — no game-specific semantics.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A touch/click began at world coordinates.
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at world coordinates.
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to world coordinates.
    PointerMove { x: f32, y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
}

/// Input state for one frame: held keys, edge-triggered presses, and
/// pointer position/button.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    keys_down: HashSet<u32>,
    keys_pressed: HashSet<u32>,
    pointer: Vec2,
    pointer_down: bool,
    pointer_clicked: bool,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a host event into the snapshot.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.pointer = Vec2::new(x, y);
                self.pointer_down = true;
                self.pointer_clicked = true;
            }
            InputEvent::PointerUp { x, y } => {
                self.pointer = Vec2::new(x, y);
                self.pointer_down = false;
            }
            InputEvent::PointerMove { x, y } => {
                self.pointer = Vec2::new(x, y);
            }
            InputEvent::KeyDown { key_code } => {
                if self.keys_down.insert(key_code) {
                    self.keys_pressed.insert(key_code);
                }
            }
            InputEvent::KeyUp { key_code } => {
                self.keys_down.remove(&key_code);
            }
        }
    }

    /// Fold a batch of host events, in order.
    pub fn apply_all(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Whether a key is currently held.
    pub fn is_key_down(&self, key_code: u32) -> bool {
        self.keys_down.contains(&key_code)
    }

    /// Whether a key went down this frame (edge-triggered).
    pub fn was_key_pressed(&self, key_code: u32) -> bool {
        self.keys_pressed.contains(&key_code)
    }

    /// Current pointer position in world coordinates.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Whether the pointer button is currently held.
    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Whether the pointer went down this frame (edge-triggered).
    pub fn was_pointer_clicked(&self) -> bool {
        self.pointer_clicked
    }

    /// Clear edge-triggered state at the end of the frame.
    /// Held keys and pointer position persist across frames.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.pointer_clicked = false;
    }
}
