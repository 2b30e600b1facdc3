//! Kinematic motion integration.
//!
//! A [`KinematicBody`] owns an entity's positional state and integrates it
//! per fixed step: acceleration into velocity, deceleration when coasting,
//! a hard speed clamp, then velocity into position.

use glam::Vec2;

/// Acceleration magnitudes below this count as "not accelerating",
/// which enables deceleration during integration.
pub const ACCEL_EPSILON: f32 = 0.01;

/// Bodies slower than this do not re-orient even with `auto_orient` set,
/// so a stopped body keeps its last facing.
pub const ORIENT_MIN_SPEED: f32 = 0.1;

/// Convert an angle in degrees plus a scalar speed into a velocity vector.
pub fn vec_from_angle_speed(angle_deg: f32, speed: f32) -> Vec2 {
    let r = angle_deg.to_radians();
    Vec2::new(speed * r.cos(), speed * r.sin())
}

/// Angle of a vector in degrees, normalized to `[0, 360)`.
pub fn angle_deg(v: Vec2) -> f32 {
    let deg = v.y.atan2(v.x).to_degrees();
    deg.rem_euclid(360.0)
}

/// Positional/motion state of a scene entity.
#[derive(Debug, Clone)]
pub struct KinematicBody {
    /// Position in world space.
    pub position: Vec2,
    /// Position at the start of the most recent `integrate` call.
    /// Consumed by swept collision tests.
    pub prev_position: Vec2,
    /// Current velocity in units per second.
    pub velocity: Vec2,
    /// Current acceleration in units per second squared.
    pub acceleration: Vec2,
    /// Upper bound on speed, enforced after every integration step.
    pub max_speed: f32,
    /// Speed lost per second while not accelerating.
    pub deceleration: f32,
    /// When set, rotation follows the velocity direction.
    pub auto_orient: bool,
    /// Facing in degrees.
    pub rotation_deg: f32,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            prev_position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            max_speed: 1000.0,
            deceleration: 0.0,
            auto_orient: false,
            rotation_deg: 0.0,
        }
    }
}

impl KinematicBody {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            prev_position: position,
            ..Default::default()
        }
    }

    // -- Builder pattern --

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn with_deceleration(mut self, deceleration: f32) -> Self {
        self.deceleration = deceleration;
        self
    }

    pub fn with_auto_orient(mut self, auto_orient: bool) -> Self {
        self.auto_orient = auto_orient;
        self
    }

    /// Current speed (velocity magnitude).
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Whether the body is moving at all.
    pub fn is_moving(&self) -> bool {
        self.velocity != Vec2::ZERO
    }

    /// Heading in degrees, normalized to `[0, 360)`.
    pub fn heading_deg(&self) -> f32 {
        angle_deg(self.velocity)
    }

    /// Set velocity from a direction in degrees and a speed.
    pub fn set_velocity_from_angle_speed(&mut self, angle_deg: f32, speed: f32) {
        self.velocity = vec_from_angle_speed(angle_deg, speed);
    }

    /// Add to the current velocity.
    pub fn add_velocity(&mut self, delta: Vec2) {
        self.velocity += delta;
    }

    /// Set acceleration from a direction in degrees and a magnitude.
    pub fn set_acceleration_from_angle(&mut self, angle_deg: f32, magnitude: f32) {
        self.acceleration = vec_from_angle_speed(angle_deg, magnitude);
    }

    /// Accelerate along the current facing.
    pub fn accelerate_forward(&mut self, magnitude: f32) {
        self.set_acceleration_from_angle(self.rotation_deg, magnitude);
    }

    /// Stop all motion, keeping facing.
    pub fn halt(&mut self) {
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
    }

    /// Advance the body by `dt` seconds.
    ///
    /// Order matters: accelerate, decelerate when coasting, clamp to
    /// `max_speed`, then move. `|velocity| <= max_speed` holds afterwards.
    pub fn integrate(&mut self, dt: f32) {
        self.prev_position = self.position;

        self.velocity += self.acceleration * dt;

        if self.acceleration.length() < ACCEL_EPSILON {
            let decel_amount = self.deceleration * dt;
            let speed = self.velocity.length();
            if speed < decel_amount {
                self.velocity = Vec2::ZERO;
            } else if speed > 0.0 {
                // Heading preserved, magnitude reduced.
                self.velocity *= (speed - decel_amount) / speed;
            }
        }

        self.velocity = self.velocity.clamp_length_max(self.max_speed);
        self.position += self.velocity * dt;

        if self.auto_orient && self.velocity.length() > ORIENT_MIN_SPEED {
            self.rotation_deg = self.velocity.y.atan2(self.velocity.x).to_degrees();
        }
    }
}
