//! Pairwise overlap tests and resolution.
//!
//! Two families of checks live here:
//!
//! - Discrete overlap with a minimum-translation vector: axis-aligned
//!   rectangles take an interval test, everything else flattens to convex
//!   polygons and goes through a separating-axis test.
//! - A swept test for fast circular bodies against rectangles: the circle's
//!   leading edge point is traced from the previous to the current position
//!   as a segment and intersected with the facing rectangle edge, so a body
//!   that would cross the rectangle within a single step is still caught.

use glam::Vec2;

use crate::core::bounds::{BoundingShape, Rect};
use crate::core::motion::KinematicBody;

/// Polygon overlaps shallower than this are reported but not resolved,
/// suppressing sub-pixel frame-noise jitter.
pub const SIGNIFICANT_PENETRATION: f32 = 0.5;

/// Result of a pairwise overlap query. Produced fresh per check.
#[derive(Debug, Clone, Copy)]
pub struct CollisionOutcome {
    /// Whether the shapes overlap at all.
    pub did_overlap: bool,
    /// Whether the overlap is deep enough to act on.
    pub resolved: bool,
    /// Translation that moves the first shape out of the second.
    pub push_vector: Vec2,
    /// Depth of the overlap along the push direction.
    pub penetration_depth: f32,
}

impl CollisionOutcome {
    pub fn miss() -> Self {
        Self {
            did_overlap: false,
            resolved: false,
            push_vector: Vec2::ZERO,
            penetration_depth: 0.0,
        }
    }

    fn hit(mtv: Vec2, depth: f32) -> Self {
        let significant = depth >= SIGNIFICANT_PENETRATION;
        Self {
            did_overlap: true,
            resolved: significant,
            push_vector: if significant { mtv } else { Vec2::ZERO },
            penetration_depth: depth,
        }
    }
}

/// Test two shapes for overlap, computing the minimum-translation vector
/// that separates the first from the second. Stateless and total: degenerate
/// shapes simply do not overlap anything.
pub fn overlap(a: &BoundingShape, b: &BoundingShape) -> CollisionOutcome {
    if let (BoundingShape::Rectangle(ra), BoundingShape::Rectangle(rb)) = (a, b) {
        return rect_rect(ra, rb);
    }

    let poly_a = a.to_polygon();
    let poly_b = b.to_polygon();
    if poly_a.len() < 3 || poly_b.len() < 3 {
        return CollisionOutcome::miss();
    }
    polygon_polygon(&poly_a, &poly_b)
}

fn rect_rect(a: &Rect, b: &Rect) -> CollisionOutcome {
    if !a.intersects(b) {
        return CollisionOutcome::miss();
    }
    // Overlap extents per axis; the shallower axis is the MTV.
    let push_right = b.right() - a.x;
    let push_left = a.right() - b.x;
    let push_up = b.top() - a.y;
    let push_down = a.top() - b.y;

    let dx = push_right.min(push_left);
    let dy = push_up.min(push_down);

    let mtv = if dx < dy {
        Vec2::new(if push_right < push_left { dx } else { -dx }, 0.0)
    } else {
        Vec2::new(0.0, if push_up < push_down { dy } else { -dy })
    };
    CollisionOutcome::hit(mtv, dx.min(dy))
}

/// Separating-axis test over both polygons' edge normals.
fn polygon_polygon(a: &[Vec2], b: &[Vec2]) -> CollisionOutcome {
    let mut min_depth = f32::INFINITY;
    let mut best_normal = Vec2::ZERO;

    for poly in [a, b] {
        let n = poly.len();
        for i in 0..n {
            let edge = poly[(i + 1) % n] - poly[i];
            let normal = Vec2::new(-edge.y, edge.x).normalize_or_zero();
            if normal == Vec2::ZERO {
                continue;
            }
            let (min_a, max_a) = project(a, normal);
            let (min_b, max_b) = project(b, normal);
            // Touching at zero depth counts as separated, matching the
            // strict rectangle test.
            if max_a <= min_b || max_b <= min_a {
                return CollisionOutcome::miss();
            }
            let depth = (max_a - min_b).min(max_b - min_a);
            if depth < min_depth {
                min_depth = depth;
                best_normal = normal;
            }
        }
    }

    // Orient the push away from b.
    let ab = centroid(a) - centroid(b);
    if ab.dot(best_normal) < 0.0 {
        best_normal = -best_normal;
    }
    CollisionOutcome::hit(best_normal * min_depth, min_depth)
}

fn project(verts: &[Vec2], axis: Vec2) -> (f32, f32) {
    let mut min = verts[0].dot(axis);
    let mut max = min;
    for v in &verts[1..] {
        let p = v.dot(axis);
        min = min.min(p);
        max = max.max(p);
    }
    (min, max)
}

fn centroid(verts: &[Vec2]) -> Vec2 {
    verts.iter().copied().sum::<Vec2>() / verts.len() as f32
}

/// Proper intersection test for two line segments `p1p2` and `p3p4`.
/// Collinear touching counts as a miss; the swept tests only care about
/// crossings.
pub fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let d = p2 - p1;
    let e = p4 - p3;
    let denom = d.perp_dot(e);
    if denom.abs() < 1e-9 {
        return false;
    }
    let f = p3 - p1;
    let t = f.perp_dot(e) / denom;
    let u = f.perp_dot(d) / denom;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Rectangle edge struck by a swept circle. Edges are named by axis:
/// `Left`/`Bottom` are the min-x/min-y edges, `Right`/`Top` the max ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectEdge {
    Left,
    Right,
    Bottom,
    Top,
    /// Overlap with no single-axis edge crossing.
    Corner,
}

/// Swept test for a circle moving from `prev_center` to `center` against a
/// rectangle. Traces the circle's leading edge point as a segment and tests
/// it against the rectangle edge facing the motion, per axis. Returns the
/// struck edge, or `None` when nothing was hit.
pub fn sweep_circle_rect(
    prev_center: Vec2,
    center: Vec2,
    radius: f32,
    rect: &Rect,
) -> Option<RectEdge> {
    if radius <= 0.0 || rect.w <= 0.0 || rect.h <= 0.0 {
        return None;
    }

    // Broad phase over the whole swept extent, so a full pass-through
    // within one step is not rejected early.
    let min = prev_center.min(center) - Vec2::splat(radius);
    let max = prev_center.max(center) + Vec2::splat(radius);
    let swept_bounds = Rect::new(min.x, min.y, max.x - min.x, max.y - min.y);
    if !swept_bounds.intersects(rect) {
        return None;
    }

    let motion = center - prev_center;
    let left_edge = (Vec2::new(rect.x, rect.y), Vec2::new(rect.x, rect.top()));
    let right_edge = (
        Vec2::new(rect.right(), rect.y),
        Vec2::new(rect.right(), rect.top()),
    );
    let bottom_edge = (Vec2::new(rect.x, rect.y), Vec2::new(rect.right(), rect.y));
    let top_edge = (
        Vec2::new(rect.x, rect.top()),
        Vec2::new(rect.right(), rect.top()),
    );

    if motion.x > 0.0 {
        let lead = Vec2::new(radius, 0.0);
        if segments_intersect(prev_center + lead, center + lead, left_edge.0, left_edge.1) {
            return Some(RectEdge::Left);
        }
    } else if motion.x < 0.0 {
        let lead = Vec2::new(-radius, 0.0);
        if segments_intersect(prev_center + lead, center + lead, right_edge.0, right_edge.1) {
            return Some(RectEdge::Right);
        }
    }

    if motion.y > 0.0 {
        let lead = Vec2::new(0.0, radius);
        if segments_intersect(prev_center + lead, center + lead, bottom_edge.0, bottom_edge.1) {
            return Some(RectEdge::Bottom);
        }
    } else if motion.y < 0.0 {
        let lead = Vec2::new(0.0, -radius);
        if segments_intersect(prev_center + lead, center + lead, top_edge.0, top_edge.1) {
            return Some(RectEdge::Top);
        }
    }

    // No directed edge registered, but the circle's bounds overlap the
    // rectangle: corner contact.
    let circle_bounds = Rect::centered(center, Vec2::splat(radius * 2.0));
    if circle_bounds.intersects(rect) {
        return Some(RectEdge::Corner);
    }
    None
}

/// Run the swept circle test against a kinematic body and resolve the hit:
/// the struck axis's velocity component is reversed and the body is pushed
/// back to rest against the edge (or to its previous position for corner
/// hits). Returns the struck edge when a bounce happened.
pub fn bounce_circle_rect(body: &mut KinematicBody, radius: f32, rect: &Rect) -> Option<RectEdge> {
    let edge = sweep_circle_rect(body.prev_position, body.position, radius, rect)?;
    match edge {
        RectEdge::Left => {
            body.velocity.x = -body.velocity.x;
            body.position.x = rect.x - radius;
        }
        RectEdge::Right => {
            body.velocity.x = -body.velocity.x;
            body.position.x = rect.right() + radius;
        }
        RectEdge::Bottom => {
            body.velocity.y = -body.velocity.y;
            body.position.y = rect.y - radius;
        }
        RectEdge::Top => {
            body.velocity.y = -body.velocity.y;
            body.position.y = rect.top() + radius;
        }
        RectEdge::Corner => {
            body.velocity = -body.velocity;
            body.position = body.prev_position;
        }
    }
    Some(edge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bounds::{BoundingShape, ColliderSpec};
    use proptest::prelude::*;

    fn rect_shape(x: f32, y: f32, w: f32, h: f32) -> BoundingShape {
        BoundingShape::Rectangle(Rect::new(x, y, w, h))
    }

    #[test]
    fn separated_rects_miss() {
        let out = overlap(&rect_shape(0.0, 0.0, 10.0, 10.0), &rect_shape(20.0, 0.0, 10.0, 10.0));
        assert!(!out.did_overlap);
        assert_eq!(out.push_vector, Vec2::ZERO);
    }

    #[test]
    fn rect_mtv_pushes_out_along_shallow_axis() {
        // A overlaps B's left side by 2 on x, fully on y.
        let a = rect_shape(0.0, 0.0, 10.0, 10.0);
        let b = rect_shape(8.0, -10.0, 10.0, 30.0);
        let out = overlap(&a, &b);
        assert!(out.did_overlap);
        assert!(out.resolved);
        assert_eq!(out.push_vector, Vec2::new(-2.0, 0.0));
        assert!((out.penetration_depth - 2.0).abs() < 1e-4);
    }

    #[test]
    fn shallow_overlap_is_reported_but_not_resolved() {
        let a = rect_shape(0.0, 0.0, 10.0, 10.0);
        let b = rect_shape(9.8, 0.0, 10.0, 10.0);
        let out = overlap(&a, &b);
        assert!(out.did_overlap);
        assert!(!out.resolved);
        assert_eq!(out.push_vector, Vec2::ZERO);
        assert!(out.penetration_depth < SIGNIFICANT_PENETRATION);
    }

    #[test]
    fn polygon_sat_hit_and_miss() {
        let tri = BoundingShape::Polygon(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(8.0, 0.0),
            Vec2::new(4.0, 8.0),
        ]);
        let near = rect_shape(6.0, 2.0, 10.0, 10.0);
        let far = rect_shape(20.0, 20.0, 5.0, 5.0);
        assert!(overlap(&tri, &near).did_overlap);
        assert!(!overlap(&tri, &far).did_overlap);
    }

    #[test]
    fn applying_push_separates_polygons() {
        let spec = ColliderSpec::rect(Vec2::new(10.0, 10.0));
        let a = spec.derive(Vec2::new(0.0, 0.0), 30.0);
        let b = spec.derive(Vec2::new(6.0, 2.0), 0.0);
        let out = overlap(&a, &b);
        assert!(out.did_overlap && out.resolved);

        let moved = spec.derive(Vec2::ZERO + out.push_vector, 30.0);
        let after = overlap(&moved, &b);
        assert!(
            !after.did_overlap || after.penetration_depth < SIGNIFICANT_PENETRATION,
            "still overlapping by {}",
            after.penetration_depth
        );
    }

    #[test]
    fn degenerate_geometry_never_overlaps() {
        let degenerate = BoundingShape::Polygon(vec![Vec2::ZERO, Vec2::ONE]);
        let big = rect_shape(-100.0, -100.0, 200.0, 200.0);
        assert!(!overlap(&degenerate, &big).did_overlap);
        assert!(!overlap(&big, &degenerate).did_overlap);
    }

    #[test]
    fn ellipse_vs_rect_goes_through_sat() {
        let ellipse = ColliderSpec::ellipse(Vec2::new(10.0, 10.0)).derive(Vec2::ZERO, 0.0);
        let touching = rect_shape(3.0, -2.0, 10.0, 4.0);
        let apart = rect_shape(30.0, 0.0, 4.0, 4.0);
        assert!(overlap(&ellipse, &touching).did_overlap);
        assert!(!overlap(&ellipse, &apart).did_overlap);
    }

    #[test]
    fn segment_crossing() {
        assert!(segments_intersect(
            Vec2::new(90.0, 50.0),
            Vec2::new(115.0, 50.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 100.0),
        ));
        assert!(!segments_intersect(
            Vec2::new(90.0, 50.0),
            Vec2::new(95.0, 50.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 100.0),
        ));
        // Parallel segments never cross.
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(10.0, 1.0),
        ));
    }

    #[test]
    fn fast_circle_does_not_tunnel_through_rect() {
        // Radius-10 circle at x=80 moving right at 500 u/s with dt=0.05:
        // the naive end position (x=105) is past the rect's left edge.
        let mut body = KinematicBody::new(Vec2::new(80.0, 50.0))
            .with_velocity(Vec2::new(500.0, 0.0));
        body.integrate(0.05);
        assert!((body.position.x - 105.0).abs() < 1e-3);

        let wall = Rect::new(100.0, 0.0, 20.0, 100.0);
        let edge = bounce_circle_rect(&mut body, 10.0, &wall);
        assert_eq!(edge, Some(RectEdge::Left));
        assert_eq!(body.velocity, Vec2::new(-500.0, 0.0));
        // Pushed back to rest against the edge.
        assert!((body.position.x - 90.0).abs() < 1e-3);

        let circle = ColliderSpec::ellipse(Vec2::splat(20.0)).derive(body.position, 0.0);
        assert!(!overlap(&circle, &BoundingShape::Rectangle(wall)).did_overlap);
    }

    #[test]
    fn vertical_sweep_flips_y() {
        let mut body = KinematicBody::new(Vec2::new(50.0, 80.0))
            .with_velocity(Vec2::new(0.0, 300.0));
        body.integrate(0.1);

        let floor = Rect::new(0.0, 100.0, 100.0, 10.0);
        let edge = bounce_circle_rect(&mut body, 5.0, &floor);
        assert_eq!(edge, Some(RectEdge::Bottom));
        assert_eq!(body.velocity, Vec2::new(0.0, -300.0));
        assert!((body.position.y - 95.0).abs() < 1e-3);
    }

    #[test]
    fn corner_contact_flips_both_axes() {
        let mut body = KinematicBody::new(Vec2::new(96.0, 96.0))
            .with_velocity(Vec2::new(40.0, 40.0));
        // Step diagonally into the corner at (100, 100) without the leading
        // axis points crossing either facing edge.
        body.integrate(0.05);

        let block = Rect::new(100.0, 100.0, 20.0, 20.0);
        let edge = bounce_circle_rect(&mut body, 5.0, &block);
        assert_eq!(edge, Some(RectEdge::Corner));
        assert_eq!(body.velocity, Vec2::new(-40.0, -40.0));
        assert_eq!(body.position, Vec2::new(96.0, 96.0));
    }

    #[test]
    fn sweep_misses_when_rect_is_out_of_path() {
        let hit = sweep_circle_rect(
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, 0.0),
            5.0,
            &Rect::new(20.0, 40.0, 10.0, 10.0),
        );
        assert_eq!(hit, None);
    }

    proptest! {
        #[test]
        fn non_resolving_query_is_symmetric(
            ax in -50.0f32..50.0, ay in -50.0f32..50.0,
            aw in 1.0f32..40.0, ah in 1.0f32..40.0,
            bx in -50.0f32..50.0, by in -50.0f32..50.0,
            bw in 1.0f32..40.0, bh in 1.0f32..40.0,
        ) {
            let a = rect_shape(ax, ay, aw, ah);
            let b = rect_shape(bx, by, bw, bh);
            let ab = overlap(&a, &b);
            let ba = overlap(&b, &a);
            prop_assert_eq!(ab.did_overlap, ba.did_overlap);
            prop_assert!((ab.penetration_depth - ba.penetration_depth).abs() < 1e-3);
        }

        #[test]
        fn resolved_rects_stop_overlapping(
            offset_x in -9.0f32..9.0, offset_y in -9.0f32..9.0,
        ) {
            let a = Rect::centered(Vec2::new(offset_x, offset_y), Vec2::splat(10.0));
            let b = Rect::centered(Vec2::ZERO, Vec2::splat(10.0));
            let out = overlap(&BoundingShape::Rectangle(a), &BoundingShape::Rectangle(b));
            if out.resolved {
                let moved = Rect::centered(
                    Vec2::new(offset_x, offset_y) + out.push_vector,
                    Vec2::splat(10.0),
                );
                let after = overlap(&BoundingShape::Rectangle(moved), &BoundingShape::Rectangle(b));
                prop_assert!(
                    !after.did_overlap || after.penetration_depth < SIGNIFICANT_PENETRATION
                );
            }
        }
    }
}
