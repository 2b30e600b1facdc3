//! Named animation clips and per-entity playback state.
//!
//! A clip is an ordered list of timed frames plus a play mode. Frame lookup
//! is a pure function of elapsed time, so playback state is just a clip name
//! and an accumulator.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::sprite::SpriteFrame;

/// Looping/ordering policy for advancing through a clip's frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    /// One-shot: clamps to the last frame.
    Normal,
    #[default]
    Loop,
    /// Loops the frame order back-to-front.
    LoopReversed,
    /// Loops forward then backward, reversing each cycle.
    LoopPingPong,
    /// A deterministic pseudo-random frame per frame interval.
    LoopRandom,
}

/// Errors from animation playback control.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClipError {
    /// `set_active` was called with a name that was never stored.
    /// The previously active clip stays active.
    #[error("unknown animation clip: {name:?}")]
    NotFound { name: String },
}

/// One timed frame of a clip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipFrame {
    pub frame: SpriteFrame,
    /// Seconds this frame is shown.
    pub duration: f32,
}

/// A named, ordered sequence of timed frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub frames: Vec<ClipFrame>,
    #[serde(default)]
    pub mode: PlayMode,
}

impl AnimationClip {
    /// Build a clip where every frame shows for the same duration.
    pub fn uniform(frames: Vec<SpriteFrame>, frame_duration: f32, mode: PlayMode) -> Self {
        Self {
            frames: frames
                .into_iter()
                .map(|frame| ClipFrame {
                    frame,
                    duration: frame_duration,
                })
                .collect(),
            mode,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn total_duration(&self) -> f32 {
        self.frames.iter().map(|f| f.duration).sum()
    }

    /// Whether a one-shot clip has run out at the given elapsed time.
    /// Looping modes never finish.
    pub fn is_finished(&self, elapsed: f32) -> bool {
        self.mode == PlayMode::Normal && elapsed >= self.total_duration()
    }

    /// Frame shown at `elapsed` seconds, per the clip's play mode.
    /// `None` only for empty clips.
    pub fn frame_at(&self, elapsed: f32) -> Option<&SpriteFrame> {
        self.frame_index_at(elapsed).map(|i| &self.frames[i].frame)
    }

    /// Index of the frame shown at `elapsed` seconds.
    pub fn frame_index_at(&self, elapsed: f32) -> Option<usize> {
        let n = self.frames.len();
        if n == 0 {
            return None;
        }
        let total = self.total_duration();
        if total <= 0.0 {
            return Some(0);
        }

        let index = match self.mode {
            PlayMode::Normal => {
                if elapsed >= total {
                    n - 1
                } else {
                    self.walk(elapsed.max(0.0))
                }
            }
            PlayMode::Loop => self.walk(elapsed.rem_euclid(total)),
            PlayMode::LoopReversed => n - 1 - self.walk(elapsed.rem_euclid(total)),
            PlayMode::LoopPingPong => {
                let forward = self.walk(elapsed.rem_euclid(total));
                let odd_cycle = (elapsed.max(0.0) / total) as u64 % 2 == 1;
                if odd_cycle {
                    n - 1 - forward
                } else {
                    forward
                }
            }
            PlayMode::LoopRandom => {
                // Stateless randomness: the draw is seeded by which frame
                // interval `elapsed` falls in, so the same time always
                // yields the same frame.
                let mean = total / n as f32;
                let interval = (elapsed.max(0.0) / mean) as u64;
                let mut rng = Pcg32::seed_from_u64(interval);
                rng.random_range(0..n)
            }
        };
        Some(index)
    }

    /// Walk per-frame durations to find the frame covering time `t`.
    /// `t` must already be wrapped into `[0, total)`.
    fn walk(&self, t: f32) -> usize {
        let mut acc = 0.0;
        for (i, f) in self.frames.iter().enumerate() {
            acc += f.duration;
            if t < acc {
                return i;
            }
        }
        self.frames.len() - 1
    }
}

/// Per-entity animation playback: named clips, one active at a time.
#[derive(Debug, Clone, Default)]
pub struct AnimationState {
    clips: HashMap<String, AnimationClip>,
    active: String,
    elapsed: f32,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a clip under a name. The first stored clip becomes active.
    /// Storing under an existing name replaces that clip.
    pub fn store_clip(&mut self, name: impl Into<String>, clip: AnimationClip) {
        let name = name.into();
        if self.clips.is_empty() {
            self.active = name.clone();
        }
        self.clips.insert(name, clip);
    }

    /// Switch the active clip and restart it from time zero.
    ///
    /// Unknown names leave the current clip active and playing.
    pub fn set_active(&mut self, name: &str) -> Result<(), ClipError> {
        if !self.clips.contains_key(name) {
            return Err(ClipError::NotFound {
                name: name.to_string(),
            });
        }
        self.active = name.to_string();
        self.elapsed = 0.0;
        Ok(())
    }

    /// Switch clips only when the target differs from the active one,
    /// so repeated calls don't restart the clip every frame.
    pub fn set_active_if_different(&mut self, name: &str) -> Result<(), ClipError> {
        if self.active == name {
            return Ok(());
        }
        self.set_active(name)
    }

    pub fn active_name(&self) -> &str {
        &self.active
    }

    pub fn active_clip(&self) -> Option<&AnimationClip> {
        self.clips.get(&self.active)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Accumulate elapsed time.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Frame of the active clip at the current elapsed time.
    pub fn current_frame(&self) -> Option<&SpriteFrame> {
        self.active_clip().and_then(|c| c.frame_at(self.elapsed))
    }

    /// Whether the active clip is a finished one-shot.
    pub fn is_finished(&self) -> bool {
        self.active_clip()
            .map(|c| c.is_finished(self.elapsed))
            .unwrap_or(true)
    }
}
