//! Spawn placement for collectibles and enemy ships.

use glam::Vec2;
use gravity_engine::Camera2D;

use crate::config::{CollectibleConfig, EnemyConfig};
use crate::entity::CollectibleKind;

const PLACEMENT_ATTEMPTS: usize = 16;

/// Seedable pseudo-random number generator (xorshift64).
/// Deterministic, so a seed reproduces a whole round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound).
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        if upper_bound == 0 {
            return 0;
        }
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform float in [lo, hi).
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }
}

/// Pick a collectible kind and a spot inside the view, clear of the sun.
/// Returns `None` when no such spot was found.
pub fn place_collectible(
    rng: &mut Rng,
    camera: &Camera2D,
    sun_pos: Vec2,
    config: &CollectibleConfig,
) -> Option<(Vec2, CollectibleKind)> {
    let kind = CollectibleKind::ALL[rng.next_int(CollectibleKind::ALL.len() as u32) as usize];
    let (lower, upper) = camera.visible_rect();
    let inset = Vec2::splat(config.half_size * 2.0);
    let (lower, upper) = (lower + inset, upper - inset);
    if lower.cmpge(upper).any() {
        return None;
    }

    (0..PLACEMENT_ATTEMPTS)
        .map(|_| Vec2::new(rng.range(lower.x, upper.x), rng.range(lower.y, upper.y)))
        .find(|p| p.distance(sun_pos) >= config.min_sun_distance)
        .map(|p| (p, kind))
}

/// Pick a start on the view's edge and a velocity aimed near the origin.
pub fn place_enemy(rng: &mut Rng, camera: &Camera2D, config: &EnemyConfig) -> (Vec2, Vec2) {
    let (lower, upper) = camera.visible_rect();
    // Just outside the visible edge
    let (lower, upper) = (lower - Vec2::splat(config.size), upper + Vec2::splat(config.size));
    let t = rng.next_f32();
    let start = match rng.next_int(4) {
        0 => Vec2::new(lower.x + (upper.x - lower.x) * t, upper.y),
        1 => Vec2::new(lower.x + (upper.x - lower.x) * t, lower.y),
        2 => Vec2::new(lower.x, lower.y + (upper.y - lower.y) * t),
        _ => Vec2::new(upper.x, lower.y + (upper.y - lower.y) * t),
    };

    let angle = rng.range(0.0, std::f32::consts::TAU);
    let aim = Vec2::from_angle(angle) * rng.range(0.0, config.aim_spread);
    let velocity = (aim - start).normalize_or_zero() * config.speed;
    (start, velocity)
}
