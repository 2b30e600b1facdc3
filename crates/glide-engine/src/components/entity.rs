use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::animation::AnimationState;
use crate::components::sprite::SpriteFrame;
use crate::core::bounds::{BoundingShape, ColliderSpec};
use crate::core::motion::KinematicBody;

/// Fat entity — one struct with optional capability components instead of an
/// inheritance chain. An entity opts into motion, animation, and collision
/// by carrying the matching component.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Inactive entities are skipped by all systems.
    pub active: bool,
    /// Render transform: position in world space. Synced from the body
    /// each step when one is present.
    pub pos: Vec2,
    /// Render transform: facing in degrees.
    pub rotation_deg: f32,
    /// Visual size in world units.
    pub size: Vec2,
    /// Current drawable frame (optional — entities without one are invisible).
    pub sprite: Option<SpriteFrame>,
    /// Motion state (optional).
    pub body: Option<KinematicBody>,
    /// Animation playback (optional).
    pub animation: Option<AnimationState>,
    /// Collision shape description (optional — required for overlap queries).
    pub collider: Option<ColliderSpec>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            rotation_deg: 0.0,
            size: Vec2::ONE,
            sprite: None,
            body: None,
            animation: None,
            collider: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        if let Some(body) = &mut self.body {
            body.position = pos;
            body.prev_position = pos;
        }
        self
    }

    pub fn with_rotation_deg(mut self, rotation_deg: f32) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteFrame) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_body(mut self, mut body: KinematicBody) -> Self {
        body.position = self.pos;
        body.prev_position = self.pos;
        self.body = Some(body);
        self
    }

    pub fn with_animation(mut self, animation: AnimationState) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn with_collider(mut self, collider: ColliderSpec) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Derive the world-space bounding shape at the entity's current
    /// transform. `None` when the entity carries no collider.
    pub fn bounding_shape(&self) -> Option<BoundingShape> {
        self.collider
            .as_ref()
            .map(|c| c.derive(self.pos, self.rotation_deg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bounds::Rect;

    #[test]
    fn builder_syncs_body_position() {
        let entity = Entity::new(EntityId(1))
            .with_body(KinematicBody::default())
            .with_pos(Vec2::new(30.0, 40.0));
        assert_eq!(entity.body.as_ref().unwrap().position, Vec2::new(30.0, 40.0));
    }

    #[test]
    fn bounding_shape_requires_collider() {
        let plain = Entity::new(EntityId(1));
        assert!(plain.bounding_shape().is_none());

        let collidable = Entity::new(EntityId(2))
            .with_pos(Vec2::new(10.0, 10.0))
            .with_collider(ColliderSpec::rect(Vec2::new(4.0, 4.0)));
        match collidable.bounding_shape().unwrap() {
            crate::core::bounds::BoundingShape::Rectangle(r) => {
                assert_eq!(r, Rect::new(8.0, 8.0, 4.0, 4.0));
            }
            other => panic!("expected Rectangle, got {other:?}"),
        }
    }
}
