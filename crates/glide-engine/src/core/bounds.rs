//! Bounding geometry derived from an entity's transform.
//!
//! Shapes are never stored on entities. An entity carries a [`ColliderSpec`]
//! (shape kind + extent) and a [`BoundingShape`] is derived from it at query
//! time using the current position and rotation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Number of vertices used when an ellipse is flattened to a polygon.
const ELLIPSE_SEGMENTS: usize = 8;

/// Axis-aligned rectangle, corner + extent form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle centered on `center` with the given size.
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x * 0.5,
            y: center.y - size.y * 0.5,
            w: size.x,
            h: size.y,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y + self.h
    }

    /// Axis-aligned interval intersection test.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.top()
    }

    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.y),
            Vec2::new(self.right(), self.y),
            Vec2::new(self.right(), self.top()),
            Vec2::new(self.x, self.top()),
        ]
    }
}

/// Shape kind for collision, stored on an entity alongside its extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColliderKind {
    /// Rectangle matching the entity's size.
    Rect,
    /// Ellipse inscribed in the entity's size.
    Ellipse,
    /// Custom convex polygon; vertices in local space, centered on the
    /// entity, in units of half-extent (so `(1, 0)` is the right edge).
    Polygon(Vec<Vec2>),
}

/// Collision shape description: kind + extent (full width/height).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderSpec {
    pub kind: ColliderKind,
    pub size: Vec2,
}

impl ColliderSpec {
    pub fn rect(size: Vec2) -> Self {
        Self {
            kind: ColliderKind::Rect,
            size,
        }
    }

    pub fn ellipse(size: Vec2) -> Self {
        Self {
            kind: ColliderKind::Ellipse,
            size,
        }
    }

    pub fn polygon(vertices: Vec<Vec2>, size: Vec2) -> Self {
        Self {
            kind: ColliderKind::Polygon(vertices),
            size,
        }
    }

    /// Whether this spec can produce usable geometry.
    pub fn is_degenerate(&self) -> bool {
        let empty_poly = matches!(&self.kind, ColliderKind::Polygon(v) if v.len() < 3);
        empty_poly || self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Derive the world-space bounding shape at the given transform.
    pub fn derive(&self, center: Vec2, rotation_deg: f32) -> BoundingShape {
        let rotated = rotation_deg.rem_euclid(360.0) > f32::EPSILON;
        match &self.kind {
            ColliderKind::Rect if !rotated => {
                BoundingShape::Rectangle(Rect::centered(center, self.size))
            }
            ColliderKind::Rect => {
                let half = self.size * 0.5;
                let local = [
                    Vec2::new(-half.x, -half.y),
                    Vec2::new(half.x, -half.y),
                    Vec2::new(half.x, half.y),
                    Vec2::new(-half.x, half.y),
                ];
                BoundingShape::Polygon(transform_vertices(&local, center, rotation_deg))
            }
            ColliderKind::Ellipse if !rotated => BoundingShape::Ellipse {
                center,
                radii: self.size * 0.5,
            },
            ColliderKind::Ellipse => {
                let local = ellipse_vertices(self.size * 0.5);
                BoundingShape::Polygon(transform_vertices(&local, center, rotation_deg))
            }
            ColliderKind::Polygon(unit) => {
                let half = self.size * 0.5;
                let local: Vec<Vec2> = unit.iter().map(|v| *v * half).collect();
                BoundingShape::Polygon(transform_vertices(&local, center, rotation_deg))
            }
        }
    }
}

fn ellipse_vertices(radii: Vec2) -> Vec<Vec2> {
    (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let t = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
            Vec2::new(radii.x * t.cos(), radii.y * t.sin())
        })
        .collect()
}

fn transform_vertices(local: &[Vec2], center: Vec2, rotation_deg: f32) -> Vec<Vec2> {
    let rot = Vec2::from_angle(rotation_deg.to_radians());
    local.iter().map(|v| center + rot.rotate(*v)).collect()
}

/// World-space collision geometry, recomputed per query.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundingShape {
    Rectangle(Rect),
    Ellipse { center: Vec2, radii: Vec2 },
    Polygon(Vec<Vec2>),
}

impl BoundingShape {
    /// Axis-aligned bounds, used for broad-phase rejection.
    pub fn bounding_rect(&self) -> Rect {
        match self {
            BoundingShape::Rectangle(r) => *r,
            BoundingShape::Ellipse { center, radii } => Rect::centered(*center, *radii * 2.0),
            BoundingShape::Polygon(verts) => {
                if verts.is_empty() {
                    return Rect::new(0.0, 0.0, 0.0, 0.0);
                }
                let mut min = verts[0];
                let mut max = verts[0];
                for v in &verts[1..] {
                    min = min.min(*v);
                    max = max.max(*v);
                }
                Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
            }
        }
    }

    /// Flatten to a convex vertex list for separating-axis tests.
    /// Degenerate shapes produce fewer than 3 vertices.
    pub fn to_polygon(&self) -> Vec<Vec2> {
        match self {
            BoundingShape::Rectangle(r) => {
                if r.w <= 0.0 || r.h <= 0.0 {
                    Vec::new()
                } else {
                    r.corners().to_vec()
                }
            }
            BoundingShape::Ellipse { center, radii } => {
                if radii.x <= 0.0 || radii.y <= 0.0 {
                    Vec::new()
                } else {
                    ellipse_vertices(*radii)
                        .into_iter()
                        .map(|v| v + *center)
                        .collect()
                }
            }
            BoundingShape::Polygon(verts) => {
                if verts.len() < 3 {
                    Vec::new()
                } else {
                    verts.clone()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_spans_extent() {
        let r = Rect::centered(Vec2::new(10.0, 10.0), Vec2::new(4.0, 6.0));
        assert_eq!(r.x, 8.0);
        assert_eq!(r.y, 7.0);
        assert_eq!(r.right(), 12.0);
        assert_eq!(r.top(), 13.0);
    }

    #[test]
    fn rect_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 0.0, 5.0, 5.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn unrotated_rect_spec_derives_rectangle() {
        let spec = ColliderSpec::rect(Vec2::new(20.0, 10.0));
        let shape = spec.derive(Vec2::new(100.0, 50.0), 0.0);
        match shape {
            BoundingShape::Rectangle(r) => {
                assert_eq!(r.x, 90.0);
                assert_eq!(r.y, 45.0);
            }
            other => panic!("expected Rectangle, got {other:?}"),
        }
    }

    #[test]
    fn rotated_rect_spec_derives_polygon() {
        let spec = ColliderSpec::rect(Vec2::new(20.0, 10.0));
        let shape = spec.derive(Vec2::ZERO, 90.0);
        let verts = shape.to_polygon();
        assert_eq!(verts.len(), 4);
        // A 20x10 rect rotated 90 degrees bounds as 10x20.
        let bounds = shape.bounding_rect();
        assert!((bounds.w - 10.0).abs() < 1e-3, "w = {}", bounds.w);
        assert!((bounds.h - 20.0).abs() < 1e-3, "h = {}", bounds.h);
    }

    #[test]
    fn ellipse_flattens_to_octagon() {
        let spec = ColliderSpec::ellipse(Vec2::new(10.0, 10.0));
        let shape = spec.derive(Vec2::new(5.0, 5.0), 0.0);
        let verts = shape.to_polygon();
        assert_eq!(verts.len(), 8);
        for v in verts {
            assert!(((v - Vec2::new(5.0, 5.0)).length() - 5.0).abs() < 1e-3);
        }
    }

    #[test]
    fn degenerate_specs_are_flagged() {
        assert!(ColliderSpec::rect(Vec2::ZERO).is_degenerate());
        assert!(ColliderSpec::polygon(vec![Vec2::ZERO, Vec2::ONE], Vec2::ONE).is_degenerate());
        assert!(!ColliderSpec::rect(Vec2::ONE).is_degenerate());
    }

    #[test]
    fn polygon_bounding_rect() {
        let shape = BoundingShape::Polygon(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 1.0),
            Vec2::new(2.0, 5.0),
        ]);
        let r = shape.bounding_rect();
        assert_eq!(r.x, 0.0);
        assert_eq!(r.w, 4.0);
        assert_eq!(r.h, 5.0);
    }

    #[test]
    fn collider_spec_round_trips_through_json() {
        let spec = ColliderSpec::ellipse(Vec2::new(12.0, 8.0));
        let json = serde_json::to_string(&spec).unwrap();
        let back: ColliderSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
