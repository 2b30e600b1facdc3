//! Entity-level collision queries.
//!
//! Thin layer over [`crate::core::collision`] that derives bounding shapes
//! from entity transforms, enforces the "collider assigned before first
//! check" precondition with a typed error, and applies resolution back to
//! the entity/body transform.

use thiserror::Error;

use crate::components::entity::Entity;
use crate::core::collision::{self, CollisionOutcome, RectEdge};

/// Precondition violations for collision queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollisionError {
    /// The entity has no collider spec, so no bounding shape can be derived.
    #[error("entity {tag:?} has no collider; assign a shape before collision checks")]
    MissingCollider { tag: String },
    /// Swept queries need motion history, which only a body provides.
    #[error("entity {tag:?} has no kinematic body for a swept collision check")]
    MissingBody { tag: String },
}

fn outcome(a: &Entity, b: &Entity) -> Result<CollisionOutcome, CollisionError> {
    let spec_a = a.collider.as_ref().ok_or_else(|| CollisionError::MissingCollider {
        tag: a.tag.clone(),
    })?;
    let spec_b = b.collider.as_ref().ok_or_else(|| CollisionError::MissingCollider {
        tag: b.tag.clone(),
    })?;

    if spec_a.is_degenerate() || spec_b.is_degenerate() {
        log::debug!(
            "degenerate collider in pair ({:?}, {:?}), treating as no overlap",
            a.tag,
            b.tag
        );
        return Ok(CollisionOutcome::miss());
    }

    let shape_a = spec_a.derive(a.pos, a.rotation_deg);
    let shape_b = spec_b.derive(b.pos, b.rotation_deg);
    Ok(collision::overlap(&shape_a, &shape_b))
}

/// Non-resolving overlap query. Order-independent.
pub fn overlaps(a: &Entity, b: &Entity) -> Result<bool, CollisionError> {
    Ok(outcome(a, b)?.did_overlap)
}

/// Overlap query that pushes `a` out of `b` along the minimum-translation
/// vector when the penetration is significant. Returns whether the shapes
/// overlapped before resolution.
pub fn resolve_overlap(a: &mut Entity, b: &Entity) -> Result<bool, CollisionError> {
    let out = outcome(a, b)?;
    if out.resolved {
        a.pos += out.push_vector;
        if let Some(body) = &mut a.body {
            body.position = a.pos;
        }
    }
    Ok(out.did_overlap)
}

/// Combined query matching the classic `overlaps(a, b, resolve)` call shape.
pub fn overlaps_resolving(
    a: &mut Entity,
    b: &Entity,
    resolve: bool,
) -> Result<bool, CollisionError> {
    if resolve {
        resolve_overlap(a, b)
    } else {
        overlaps(a, b)
    }
}

/// Swept bounce for a circular mover against a rectangular target
/// (ball vs brick/paddle mechanics). Uses the mover's previous and current
/// body positions, so it catches hits that a discrete check would tunnel
/// past. On a hit, the struck axis's velocity is reversed and the mover is
/// pushed out of the target.
pub fn bounce_off(moving: &mut Entity, target: &Entity) -> Result<Option<RectEdge>, CollisionError> {
    let spec = moving
        .collider
        .as_ref()
        .ok_or_else(|| CollisionError::MissingCollider {
            tag: moving.tag.clone(),
        })?;
    let target_spec = target
        .collider
        .as_ref()
        .ok_or_else(|| CollisionError::MissingCollider {
            tag: target.tag.clone(),
        })?;
    if spec.is_degenerate() || target_spec.is_degenerate() {
        return Ok(None);
    }
    let radius = spec.size.min_element() * 0.5;
    let target_rect = target_spec.derive(target.pos, target.rotation_deg).bounding_rect();

    let body = moving.body.as_mut().ok_or_else(|| CollisionError::MissingBody {
        tag: moving.tag.clone(),
    })?;
    let edge = collision::bounce_circle_rect(body, radius, &target_rect);
    if edge.is_some() {
        moving.pos = body.position;
    }
    Ok(edge)
}
