//! Declarative spawn templates.
//!
//! Repeated spawns (a new falling star, another balloon) come from data
//! templates rather than deep-copying a live prototype entity. Each
//! `instantiate` builds fresh body and animation state, so instances never
//! share mutable state; sprite/atlas references are plain values and are
//! shared freely.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::components::animation::{AnimationClip, AnimationState};
use crate::components::entity::Entity;
use crate::components::sprite::SpriteFrame;
use crate::core::bounds::ColliderSpec;
use crate::core::motion::KinematicBody;

/// Motion parameters of a template. Mirrors [`KinematicBody`] minus the
/// per-instance transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyTemplate {
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,
    #[serde(default)]
    pub deceleration: f32,
    #[serde(default)]
    pub auto_orient: bool,
    /// Initial velocity for spawned instances.
    #[serde(default)]
    pub velocity: Vec2,
}

fn default_max_speed() -> f32 {
    1000.0
}

impl Default for BodyTemplate {
    fn default() -> Self {
        Self {
            max_speed: default_max_speed(),
            deceleration: 0.0,
            auto_orient: false,
            velocity: Vec2::ZERO,
        }
    }
}

/// Data description of an entity kind, JSON-loadable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityTemplate {
    pub tag: String,
    pub size: Vec2,
    #[serde(default)]
    pub sprite: Option<SpriteFrame>,
    #[serde(default)]
    pub body: Option<BodyTemplate>,
    #[serde(default)]
    pub collider: Option<ColliderSpec>,
    #[serde(default)]
    pub clips: HashMap<String, AnimationClip>,
    /// Which clip starts active. Falls back to the alphabetically first
    /// stored clip when absent or unknown.
    #[serde(default)]
    pub initial_clip: Option<String>,
}

impl EntityTemplate {
    /// Parse a template from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build a fresh entity from this template at the given position.
    /// Body and animation state are newly constructed per instance.
    pub fn instantiate(&self, id: EntityId, pos: Vec2) -> Entity {
        let mut entity = Entity::new(id)
            .with_tag(self.tag.clone())
            .with_pos(pos)
            .with_size(self.size);

        if let Some(sprite) = self.sprite {
            entity = entity.with_sprite(sprite);
        }

        if let Some(body) = &self.body {
            entity = entity.with_body(
                KinematicBody::new(pos)
                    .with_velocity(body.velocity)
                    .with_max_speed(body.max_speed)
                    .with_deceleration(body.deceleration)
                    .with_auto_orient(body.auto_orient),
            );
        }

        if let Some(collider) = &self.collider {
            if collider.is_degenerate() {
                log::warn!(
                    "template {:?}: degenerate collider, instances will not collide",
                    self.tag
                );
            }
            entity = entity.with_collider(collider.clone());
        }

        if !self.clips.is_empty() {
            let mut animation = AnimationState::new();
            // Sorted insertion keeps the fallback active clip deterministic.
            let mut names: Vec<&String> = self.clips.keys().collect();
            names.sort();
            for name in names {
                animation.store_clip(name.clone(), self.clips[name].clone());
            }
            if let Some(initial) = &self.initial_clip {
                if animation.set_active(initial).is_err() {
                    log::warn!(
                        "template {:?}: unknown initial clip {:?}, keeping first",
                        self.tag,
                        initial
                    );
                }
            }
            entity = entity.with_animation(animation);
        }

        entity
    }
}
