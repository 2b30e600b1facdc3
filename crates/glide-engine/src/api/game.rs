use glam::Vec2;

use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::components::entity::Entity;
use crate::components::template::EntityTemplate;
use crate::core::scene::Scene;
use crate::core::time::FixedTimestep;
use crate::input::snapshot::InputSnapshot;
use crate::systems::animation::advance_animations;
use crate::systems::motion::integrate_bodies;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Per-step game logic. Runs after motion integration within the step,
    /// so collision queries see current positions. React here: resolve
    /// overlaps, score, queue despawns.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputSnapshot);
}

/// Mutable engine state passed to [`Game::init`] and [`Game::update`].
pub struct EngineContext {
    pub scene: Scene,
    /// Game events for the host, cleared every frame.
    pub events: Vec<GameEvent>,
    /// Sound cues for the host, cleared every frame.
    pub sounds: Vec<SoundEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            events: Vec::new(),
            sounds: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn a prebuilt entity. Returns its ID.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.scene.spawn(entity);
        id
    }

    /// Spawn a fresh instance of a template at the given position.
    pub fn spawn_from_template(&mut self, template: &EntityTemplate, pos: Vec2) -> EntityId {
        let id = self.next_id();
        self.scene.spawn(template.instantiate(id, pos));
        id
    }

    /// Mark an entity for removal at the end of the current step.
    pub fn queue_despawn(&mut self, id: EntityId) {
        self.scene.queue_despawn(id);
    }

    /// Emit a sound cue to the host.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive one host frame through the fixed-step protocol.
///
/// Per fixed step: integrate all bodies, run game logic against the fresh
/// positions, advance animations, then sweep queued despawns. Host events
/// (`ctx.events`/`ctx.sounds`) accumulate across the steps of one frame;
/// edge-triggered input clears when the frame ends.
pub fn run_frame<G: Game>(
    game: &mut G,
    ctx: &mut EngineContext,
    input: &mut InputSnapshot,
    timestep: &mut FixedTimestep,
    frame_dt: f32,
) {
    ctx.clear_frame_data();
    let steps = timestep.accumulate(frame_dt);
    for _ in 0..steps {
        let dt = timestep.step();
        integrate_bodies(&mut ctx.scene, dt);
        game.update(ctx, input);
        advance_animations(&mut ctx.scene, dt);
        ctx.scene.sweep();
    }
    input.end_frame();
}
