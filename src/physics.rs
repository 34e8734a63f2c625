// --- File: physics.rs ---
// Two-body collision physics shared by the interaction outcomes.

use glam::Vec2;

/// One side of a two-body collision.
#[derive(Debug, Copy, Clone)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f32,
}

/// 2D elastic collision: each velocity is reflected about the line joining the centres.
/// Conserves momentum and kinetic energy. Coincident centres leave velocities untouched.
pub fn elastic_collision(a: Body, b: Body) -> (Vec2, Vec2) {
    let dx = a.position - b.position;
    let dist_sq = dx.length_squared();
    if dist_sq <= f32::EPSILON {
        return (a.velocity, b.velocity);
    }
    let total = a.mass + b.mass;
    let dv = a.velocity - b.velocity;
    let along = dv.dot(dx) / dist_sq;
    let va = a.velocity - (2.0 * b.mass / total) * along * dx;
    // (v_b - v_a)·(x_b - x_a) == (v_a - v_b)·(x_a - x_b), and the direction flips sign.
    let vb = b.velocity + (2.0 * a.mass / total) * along * dx;
    (va, vb)
}

/// Inelastic merge used by predation and birth: midpoint position and the mass-weighted
/// velocity `(m1·v1 + m2·v2) / ((m1 + m2) / 2)`.
pub fn inelastic_merge(a: Body, b: Body) -> (Vec2, Vec2) {
    let mean_mass = (a.mass + b.mass) / 2.0;
    let velocity = (a.velocity * a.mass + b.velocity * b.mass) / mean_mass;
    let position = (a.position + b.position) / 2.0;
    (position, velocity)
}

// --- End of File: physics.rs ---
