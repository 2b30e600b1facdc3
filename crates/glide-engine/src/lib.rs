pub mod api;
pub mod components;
pub mod core;
pub mod input;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{run_frame, EngineContext, Game, GameConfig};
pub use api::types::{EntityId, GameEvent, SoundEvent};
pub use components::animation::{AnimationClip, AnimationState, ClipError, ClipFrame, PlayMode};
pub use components::entity::Entity;
pub use components::sprite::{AtlasId, SpriteFrame};
pub use components::template::{BodyTemplate, EntityTemplate};
pub use crate::core::bounds::{BoundingShape, ColliderKind, ColliderSpec, Rect};
pub use crate::core::collision::{
    overlap, segments_intersect, sweep_circle_rect, CollisionOutcome, RectEdge,
    SIGNIFICANT_PENETRATION,
};
pub use crate::core::motion::{angle_deg, vec_from_angle_speed, KinematicBody};
pub use crate::core::scene::Scene;
pub use crate::core::time::FixedTimestep;
pub use input::snapshot::{InputEvent, InputSnapshot};
pub use systems::animation::advance_animations;
pub use systems::collision::{
    bounce_off, overlaps, overlaps_resolving, resolve_overlap, CollisionError,
};
pub use systems::motion::integrate_bodies;
