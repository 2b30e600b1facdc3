//! Motion system — integrates every active body and syncs entity transforms.

use crate::core::scene::Scene;

/// Integrate all active entities' bodies by `dt` seconds, then copy the
/// resulting position/rotation onto the entity transform.
///
/// Call once per fixed step, before any collision queries that should see
/// the new positions.
pub fn integrate_bodies(scene: &mut Scene, dt: f32) {
    for entity in scene.iter_mut() {
        if !entity.active {
            continue;
        }
        if let Some(body) = &mut entity.body {
            body.integrate(dt);
            entity.pos = body.position;
            entity.rotation_deg = body.rotation_deg;
        }
    }
}
