// --- File: collision.rs ---
// Predictive collision checks: pairs must be touching *and* closing, walls must be reached
// *and* still being approached. The "closing" half stops bodies that stay in contact from
// re-triggering every tick.

use crate::individual::Individual;
use glam::Vec2;

/// `true` when the two bodies overlap or touch now and one more tick of free flight brings
/// them closer together.
pub fn pair_collides(a: &Individual, radius_a: f32, b: &Individual, radius_b: f32, dt: f32) -> bool {
    let contact = radius_a + radius_b;
    let now = a.position.distance(b.position);
    if now > contact {
        return false;
    }
    let next = a.extrapolate(dt).distance(b.extrapolate(dt));
    now > next
}

/// Which velocity components were flipped by [`reflect_walls`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct WallHit {
    pub x: bool,
    pub y: bool,
}

impl WallHit {
    pub fn any(self) -> bool {
        self.x || self.y
    }
}

/// Reflects each velocity component independently once the body has reached the wall on that
/// axis and is still heading outward.
pub fn reflect_walls(individual: &mut Individual, radius: f32, half_width: f32, dt: f32) -> WallHit {
    let hit = wall_hit(individual.position, individual.velocity, radius, half_width, dt);
    if hit.x {
        individual.velocity.x = -individual.velocity.x;
    }
    if hit.y {
        individual.velocity.y = -individual.velocity.y;
    }
    hit
}

#[inline]
fn axis_escaping(now: f32, next: f32, limit: f32) -> bool {
    now.abs() >= limit && next.abs() > now.abs()
}

/// Decides which axes are escaping without touching the velocity.
pub fn wall_hit(position: Vec2, velocity: Vec2, radius: f32, half_width: f32, dt: f32) -> WallHit {
    let limit = half_width - radius;
    let next = position + velocity * dt;
    WallHit {
        x: axis_escaping(position.x, next.x, limit),
        y: axis_escaping(position.y, next.y, limit),
    }
}

// --- End of File: collision.rs ---
