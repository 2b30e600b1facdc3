//! Animation system — advances playback and syncs sprite frames.

use crate::core::scene::Scene;

/// Advance all active entities' animation states by `dt` and copy the
/// current frame into the sprite component.
///
/// Call once per fixed step, after motion.
pub fn advance_animations(scene: &mut Scene, dt: f32) {
    for entity in scene.iter_mut() {
        if !entity.active {
            continue;
        }
        if let Some(animation) = &mut entity.animation {
            animation.advance(dt);
            if let Some(frame) = animation.current_frame() {
                entity.sprite = Some(*frame);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::animation::{AnimationClip, AnimationState, PlayMode};
    use crate::components::entity::Entity;
    use crate::components::sprite::{AtlasId, SpriteFrame};

    fn walking_entity() -> Entity {
        let frames = (0..4).map(|i| SpriteFrame::new(AtlasId(0), i, 2)).collect();
        let mut animation = AnimationState::new();
        animation.store_clip("walk", AnimationClip::uniform(frames, 0.1, PlayMode::Loop));
        Entity::new(EntityId(1))
            .with_sprite(SpriteFrame::new(AtlasId(0), 0, 2))
            .with_animation(animation)
    }

    #[test]
    fn advancing_updates_sprite_frame() {
        let mut scene = Scene::new();
        scene.spawn(walking_entity());

        advance_animations(&mut scene, 0.15);
        let sprite = scene.get(EntityId(1)).unwrap().sprite.unwrap();
        assert_eq!(sprite.col, 1);
    }

    #[test]
    fn looping_wraps_around() {
        let mut scene = Scene::new();
        scene.spawn(walking_entity());

        // 0.55s through a 0.4s clip wraps back around to frame 1.
        advance_animations(&mut scene, 0.55);
        let sprite = scene.get(EntityId(1)).unwrap().sprite.unwrap();
        assert_eq!(sprite.col, 1);
    }

    #[test]
    fn inactive_entities_do_not_animate() {
        let mut scene = Scene::new();
        let mut entity = walking_entity();
        entity.active = false;
        scene.spawn(entity);

        advance_animations(&mut scene, 0.25);
        let sprite = scene.get(EntityId(1)).unwrap().sprite.unwrap();
        assert_eq!(sprite.col, 0);
    }
}
