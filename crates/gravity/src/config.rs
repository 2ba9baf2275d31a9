//! Game tunables.
//!
//! Every section defaults to the shipped gameplay values, so a JSON document
//! only needs the keys it overrides:
//!
//! ```ignore
//! let config = GameConfig::from_json(r#"{ "rules": { "lives": 5 } }"#)?;
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// Largest accepted trail sample count.
pub const MAX_TRAIL_SIZE: usize = 4096;
/// Largest accepted high-score table.
pub const MAX_HIGH_SCORES: usize = 100;

/// Window size in pixels at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
        }
    }
}

/// Fixed-step integration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Seconds of simulated time per substep.
    pub step: f32,
    pub solver_iterations: usize,
    /// Substeps drained per frame at most; the rest of the frame time is dropped.
    pub max_substeps: u32,
    /// Distances below this are treated as this distance in the gravity law.
    pub min_gravity_distance: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            step: 0.005,
            solver_iterations: 10,
            max_substeps: 64,
            min_gravity_distance: 0.5,
        }
    }
}

/// Auto-framing bounds in meters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub min_width: f32,
    pub min_height: f32,
    pub max_width: f32,
    pub max_height: f32,
    /// Extra space kept around each planet.
    pub margin: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_width: 150.0,
            min_height: 75.0,
            max_width: 300.0,
            max_height: 150.0,
            margin: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SunConfig {
    pub position: [f32; 2],
    pub radius: f32,
    pub density: f32,
    pub gravity_coeff: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0],
            radius: 6.0,
            density: 1000.0,
            gravity_coeff: 130_000.0,
            friction: 0.5,
            restitution: 0.7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub radius: f32,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    /// Rendered trail sample count.
    pub trail_size: usize,
    /// Trail retention window in seconds.
    pub trail_time: f32,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            position: [20.0, 20.0],
            velocity: [0.0, 0.0],
            radius: 2.0,
            density: 1.0,
            friction: 0.5,
            restitution: 0.7,
            trail_size: 30,
            trail_time: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CollectibleConfig {
    /// Seconds between spawns; zero or less disables spawning.
    pub spawn_interval: f32,
    /// Seconds a collectible stays before vanishing.
    pub lifetime: f32,
    pub half_size: f32,
    pub density: f32,
    /// Base score delta for the score kinds.
    pub score: i32,
    /// Base time delta (seconds) for the time kinds.
    pub time: i32,
    /// Collectibles never spawn closer than this to the sun.
    pub min_sun_distance: f32,
}

impl Default for CollectibleConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 4.0,
            lifetime: 10.0,
            half_size: 1.0,
            density: 1.0,
            score: 100,
            time: 5,
            min_sun_distance: 12.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnemyConfig {
    /// Seconds between spawns; zero or less disables spawning.
    pub spawn_interval: f32,
    pub speed: f32,
    /// Nose-to-tail length of the ship hull.
    pub size: f32,
    pub density: f32,
    /// Enemies aim at a random point within this distance of the origin.
    pub aim_spread: f32,
    /// Enemies farther than this from the origin are removed.
    pub discard_distance: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 7.0,
            speed: 25.0,
            size: 3.0,
            density: 1.0,
            aim_spread: 20.0,
            discard_distance: 600.0,
        }
    }
}

/// Scoring, penalties and round structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    /// Round length in seconds.
    pub game_time: i32,
    pub lives: u32,
    /// High-score table capacity.
    pub high_scores: usize,
    /// Seconds lost when a planet touches the sun.
    pub planet_sun_penalty: i32,
    /// Seconds lost when an enemy hits the sun or a planet.
    pub enemy_penalty: i32,
    /// Points per (m/s × m) per second of orbit.
    pub score_rate: f32,
    /// Planets farther than this from the sun score nothing.
    pub score_distance_cutoff: f32,
    /// Score payload multiplier when a planet picks up a collectible.
    pub score_amplification: i32,
    /// Time payload multiplier when a planet picks up a collectible.
    pub time_amplification: i32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            game_time: 120,
            lives: 3,
            high_scores: 5,
            planet_sun_penalty: 10,
            enemy_penalty: 5,
            score_rate: 2.0,
            score_distance_cutoff: 100.0,
            score_amplification: 10,
            time_amplification: 2,
        }
    }
}

/// All game tunables.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub physics: PhysicsConfig,
    pub camera: CameraConfig,
    pub sun: SunConfig,
    pub planet: PlanetConfig,
    pub collectibles: CollectibleConfig,
    pub enemies: EnemyConfig,
    pub rules: RulesConfig,
    /// Seed for spawn placement.
    pub seed: u64,
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config; missing keys keep their defaults.
    pub fn from_json(json: &str) -> GameResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> GameResult<()> {
        positive("window.width", self.window.width)?;
        positive("window.height", self.window.height)?;

        positive("physics.step", self.physics.step)?;
        if self.physics.max_substeps == 0 {
            return Err(GameError::invalid_config("physics.max_substeps", "must be at least 1"));
        }
        if self.physics.solver_iterations == 0 {
            return Err(GameError::invalid_config(
                "physics.solver_iterations",
                "must be at least 1",
            ));
        }
        positive("physics.min_gravity_distance", self.physics.min_gravity_distance)?;

        let cam = &self.camera;
        positive("camera.min_width", cam.min_width)?;
        positive("camera.min_height", cam.min_height)?;
        if !cam.max_width.is_finite() || cam.max_width < cam.min_width {
            return Err(GameError::invalid_config(
                "camera.max_width",
                format!("{} is below min_width {}", cam.max_width, cam.min_width),
            ));
        }
        if !cam.max_height.is_finite() || cam.max_height < cam.min_height {
            return Err(GameError::invalid_config(
                "camera.max_height",
                format!("{} is below min_height {}", cam.max_height, cam.min_height),
            ));
        }
        if !cam.margin.is_finite() || cam.margin < 0.0 {
            return Err(GameError::invalid_config(
                "camera.margin",
                format!("must be >= 0, got {}", cam.margin),
            ));
        }

        positive("sun.radius", self.sun.radius)?;
        positive("sun.density", self.sun.density)?;
        positive("planet.radius", self.planet.radius)?;
        positive("planet.density", self.planet.density)?;
        positive("planet.trail_time", self.planet.trail_time)?;
        if self.planet.trail_size > MAX_TRAIL_SIZE {
            return Err(GameError::invalid_config(
                "planet.trail_size",
                format!("{} exceeds {}", self.planet.trail_size, MAX_TRAIL_SIZE),
            ));
        }

        positive("collectibles.half_size", self.collectibles.half_size)?;
        positive("collectibles.density", self.collectibles.density)?;
        positive("enemies.size", self.enemies.size)?;
        positive("enemies.density", self.enemies.density)?;

        if self.rules.high_scores > MAX_HIGH_SCORES {
            return Err(GameError::invalid_config(
                "rules.high_scores",
                format!("{} exceeds {}", self.rules.high_scores, MAX_HIGH_SCORES),
            ));
        }
        Ok(())
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Config with collectible and enemy spawning switched off.
    pub fn without_spawns(mut self) -> Self {
        self.collectibles.spawn_interval = 0.0;
        self.enemies.spawn_interval = 0.0;
        self
    }
}

fn positive(field: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::invalid_config(
            field,
            format!("must be a positive number, got {}", value),
        ))
    }
}

pub(crate) fn vec2(v: [f32; 2]) -> Vec2 {
    Vec2::new(v[0], v[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_values() {
        let c = GameConfig::default();
        assert!((c.physics.step - 0.005).abs() < 1e-9);
        assert_eq!(c.physics.solver_iterations, 10);
        assert_eq!(c.rules.game_time, 120);
        assert_eq!(c.rules.high_scores, 5);
        assert_eq!(c.camera.max_width, 300.0);
        assert_eq!(c.sun.gravity_coeff, 130_000.0);
        assert_eq!(vec2(c.planet.position), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = GameConfig::from_json(r#"{ "rules": { "lives": 5 }, "seed": 9 }"#).unwrap();
        assert_eq!(c.rules.lives, 5);
        assert_eq!(c.rules.game_time, 120);
        assert_eq!(c.seed, 9);
        assert_eq!(c.window, WindowConfig::default());
    }

    #[test]
    fn invalid_json_is_config_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn defaults_are_valid() {
        GameConfig::default().validate().unwrap();
        GameConfig::default().without_spawns().validate().unwrap();
    }

    #[test]
    fn zero_step_is_rejected() {
        let err = GameConfig::from_json(r#"{ "physics": { "step": 0.0 } }"#).unwrap_err();
        assert!(
            matches!(err, GameError::InvalidConfig { field: "physics.step", .. }),
            "{}",
            err
        );
        let err = GameConfig::from_json(r#"{ "physics": { "step": -0.01 } }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig { field: "physics.step", .. }));
    }

    #[test]
    fn inverted_camera_bounds_are_rejected() {
        let err = GameConfig::from_json(r#"{ "camera": { "min_width": 400.0 } }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig { field: "camera.max_width", .. }));
        let err = GameConfig::from_json(r#"{ "camera": { "max_height": 10.0 } }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig { field: "camera.max_height", .. }));
    }

    #[test]
    fn oversized_trail_is_rejected() {
        let err = GameConfig::from_json(r#"{ "planet": { "trail_size": 18446744073709551615 } }"#)
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig { field: "planet.trail_size", .. }));
        let err = GameConfig::from_json(r#"{ "planet": { "trail_time": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig { field: "planet.trail_time", .. }));
    }

    #[test]
    fn zero_substeps_and_radius_are_rejected() {
        let err = GameConfig::from_json(r#"{ "physics": { "max_substeps": 0 } }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig { field: "physics.max_substeps", .. }));
        let err = GameConfig::from_json(r#"{ "sun": { "radius": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig { field: "sun.radius", .. }));
    }

    #[test]
    fn json_round_trip() {
        let c = GameConfig::default().without_spawns();
        let back = GameConfig::from_json(&c.to_json().unwrap()).unwrap();
        assert_eq!(back, c);
        assert_eq!(back.enemies.spawn_interval, 0.0);
    }
}
