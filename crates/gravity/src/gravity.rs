//! Inverse-square attraction toward gravity sources.

use glam::Vec2;
use gravity_engine::PhysicsWorld;

use crate::entity::EntityKind;
use crate::scene::Scene;

/// Force exerted on a body at `target` by a source of strength `coeff` at `source`.
///
/// `coeff / d²` along the unit vector toward the source, with `d` clamped to
/// `min_distance`. Coincident positions have no direction and yield zero.
pub fn gravity_force(source: Vec2, coeff: f32, target: Vec2, min_distance: f32) -> Vec2 {
    let delta = source - target;
    let Some(dir) = delta.try_normalize() else {
        return Vec2::ZERO;
    };
    let r2 = delta.length_squared().max(min_distance * min_distance);
    dir * (coeff / r2)
}

/// Velocity for a circular, counter-clockwise orbit of a body of `mass` at
/// `target` around `source`. Zero when the radius or mass is degenerate.
pub fn orbit_velocity(source: Vec2, coeff: f32, target: Vec2, mass: f32) -> Vec2 {
    let offset = target - source;
    let r = offset.length();
    if r <= f32::EPSILON || mass <= 0.0 {
        return Vec2::ZERO;
    }
    let speed = (coeff / (r * mass)).sqrt();
    offset.perp() / r * speed
}

/// Replace every body's force with the summed pull of all gravity sources.
/// Run once per substep, before stepping the world.
pub fn apply_gravity(scene: &Scene, physics: &mut PhysicsWorld, min_distance: f32) {
    physics.clear_forces();

    let sources: Vec<(Vec2, f32)> = scene
        .iter()
        .filter_map(|e| match e.kind {
            EntityKind::Sun { gravity_coeff } => Some((physics.body_position(&e.body).0, gravity_coeff)),
            _ => None,
        })
        .collect();

    if sources.is_empty() {
        return;
    }

    for entity in scene.iter().filter(|e| e.kind.is_affected_by_gravity()) {
        let pos = physics.body_position(&entity.body).0;
        let force = sources
            .iter()
            .fold(Vec2::ZERO, |acc, &(src, coeff)| acc + gravity_force(src, coeff, pos, min_distance));
        physics.apply_force(&entity.body, force);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_points_toward_source() {
        let f = gravity_force(Vec2::ZERO, 100.0, Vec2::new(10.0, 0.0), 0.5);
        assert!(f.x < 0.0);
        assert!(f.y.abs() < 1e-6);

        let f = gravity_force(Vec2::new(3.0, 4.0), 100.0, Vec2::ZERO, 0.5);
        let dir = f.normalize();
        assert!((dir - Vec2::new(0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    fn doubling_distance_quarters_force() {
        let near = gravity_force(Vec2::ZERO, 130_000.0, Vec2::new(10.0, 10.0), 0.5);
        let far = gravity_force(Vec2::ZERO, 130_000.0, Vec2::new(20.0, 20.0), 0.5);
        let ratio = near.length() / far.length();
        assert!((ratio - 4.0).abs() < 1e-3, "ratio {}", ratio);
    }

    #[test]
    fn magnitude_is_coeff_over_distance_squared() {
        let f = gravity_force(Vec2::ZERO, 130_000.0, Vec2::new(20.0, 20.0), 0.5);
        assert!((f.length() - 130_000.0 / 800.0).abs() < 1e-2);
    }

    #[test]
    fn close_range_is_clamped() {
        let at_min = gravity_force(Vec2::ZERO, 1.0, Vec2::new(0.5, 0.0), 0.5);
        let inside = gravity_force(Vec2::ZERO, 1.0, Vec2::new(0.01, 0.0), 0.5);
        assert!((at_min.length() - inside.length()).abs() < 1e-5);
        assert!(inside.is_finite());
    }

    #[test]
    fn orbit_velocity_balances_gravity() {
        let mass = 4.0;
        let target = Vec2::new(30.0, 0.0);
        let v = orbit_velocity(Vec2::ZERO, 130_000.0, target, mass);
        // Perpendicular to the radius, counter-clockwise
        assert!(v.x.abs() < 1e-4 && v.y > 0.0);
        // Centripetal acceleration equals gravitational acceleration
        let accel = gravity_force(Vec2::ZERO, 130_000.0, target, 0.5).length() / mass;
        assert!((v.length_squared() / 30.0 - accel).abs() < 1e-2);
        assert_eq!(orbit_velocity(Vec2::ZERO, 1.0, Vec2::ZERO, 1.0), Vec2::ZERO);
    }

    #[test]
    fn coincident_positions_yield_zero() {
        assert_eq!(gravity_force(Vec2::ONE, 1e6, Vec2::ONE, 0.5), Vec2::ZERO);
    }
}
