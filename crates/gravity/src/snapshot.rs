//! Mid-game save format.
//!
//! A snapshot records gameplay state structurally (kind, transform,
//! velocities, trail) rather than dumping physics shapes, and rebuilds the
//! physics world through the entity factories on restore.

use std::collections::HashSet;
use std::io::{Read, Write};

use glam::Vec2;
use gravity_engine::{EntityId, PhysicsWorld};

use crate::config::GameConfig;
use crate::entity::{CollectibleKind, Entity, EntityKind};
use crate::error::{GameError, GameResult};
use crate::save::{SaveReader, SaveWriter, MAX_COUNT};
use crate::trail::TrailPoint;

mod tags {
    pub const SUN: u8 = 0;
    pub const PLANET: u8 = 1;
    pub const COLLECTIBLE: u8 = 2;
    pub const ENEMY: u8 = 3;
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub rotation: f32,
    pub linvel: Vec2,
    pub angvel: f32,
    pub expires_at: Option<f32>,
    pub trail: Option<Vec<TrailPoint>>,
}

impl EntitySnapshot {
    pub fn capture(entity: &Entity, physics: &PhysicsWorld) -> Self {
        let (pos, rotation) = physics.body_position(&entity.body);
        Self {
            id: entity.id,
            kind: entity.kind,
            pos,
            rotation,
            linvel: physics.velocity(&entity.body),
            angvel: physics.angular_velocity(&entity.body),
            expires_at: entity.expires_at,
            trail: entity.trail.as_ref().map(|t| t.points().to_vec()),
        }
    }

    /// Recreate the entity and its body in `physics`.
    pub fn restore(&self, physics: &mut PhysicsWorld, config: &GameConfig) -> Entity {
        let mut entity = match self.kind {
            EntityKind::Sun { gravity_coeff } => {
                let mut sun = config.sun.clone();
                sun.gravity_coeff = gravity_coeff;
                Entity::create_sun(physics, self.id, self.pos, &sun)
            }
            EntityKind::Planet => {
                Entity::create_planet(physics, self.id, self.pos, self.linvel, &config.planet)
            }
            EntityKind::Collectible(kind) => {
                Entity::create_collectible(physics, self.id, self.pos, kind, &config.collectibles)
            }
            EntityKind::Enemy => Entity::create_enemy_ship(
                physics,
                self.id,
                self.pos,
                self.linvel,
                &config.enemies,
            ),
        };

        physics.set_transform(&entity.body, self.pos, self.rotation);
        physics.set_velocity(&entity.body, self.linvel);
        physics.set_angular_velocity(&entity.body, self.angvel);
        entity.sync(physics);
        entity.expires_at = self.expires_at;
        if let (Some(trail), Some(points)) = (entity.trail.as_mut(), &self.trail) {
            trail.set_points(points.clone());
        }
        entity
    }

    fn write<W: Write>(&self, w: &mut SaveWriter<W>) -> GameResult<()> {
        w.u32(self.id.0)?;
        match self.kind {
            EntityKind::Sun { gravity_coeff } => {
                w.u8(tags::SUN)?;
                w.f32(gravity_coeff)?;
            }
            EntityKind::Planet => w.u8(tags::PLANET)?,
            EntityKind::Collectible(kind) => {
                w.u8(tags::COLLECTIBLE)?;
                w.u8(kind.tag())?;
            }
            EntityKind::Enemy => w.u8(tags::ENEMY)?,
        }
        w.vec2(self.pos)?;
        w.f32(self.rotation)?;
        w.vec2(self.linvel)?;
        w.f32(self.angvel)?;
        w.opt_f32(self.expires_at)?;

        w.bool(self.trail.is_some())?;
        if let Some(points) = &self.trail {
            w.count(points.len())?;
            for p in points {
                w.vec2(p.pos)?;
                w.f32(p.time)?;
            }
        }
        Ok(())
    }

    fn read<R: Read>(r: &mut SaveReader<R>) -> GameResult<Self> {
        let id = EntityId(r.u32("entity id")?);
        let kind = match r.u8("entity kind")? {
            tags::SUN => EntityKind::Sun {
                gravity_coeff: r.f32("gravity coefficient")?,
            },
            tags::PLANET => EntityKind::Planet,
            tags::COLLECTIBLE => {
                let tag = r.u8("collectible kind")?;
                let kind = CollectibleKind::from_tag(tag)
                    .ok_or_else(|| GameError::corrupt(format!("unknown collectible kind {}", tag)))?;
                EntityKind::Collectible(kind)
            }
            tags::ENEMY => EntityKind::Enemy,
            other => return Err(GameError::UnknownEntityKind(other)),
        };
        let pos = r.vec2("entity position")?;
        let rotation = r.f32("entity rotation")?;
        let linvel = r.vec2("entity velocity")?;
        let angvel = r.f32("entity angular velocity")?;
        let expires_at = r.opt_f32("entity expiry")?;

        let trail = if r.bool("trail flag")? {
            let n = r.count("trail point", MAX_COUNT)?;
            let mut points = Vec::with_capacity(n.min(1024));
            for _ in 0..n {
                let pos = r.vec2("trail point")?;
                let time = r.f32("trail time")?;
                points.push(TrailPoint { pos, time });
            }
            Some(points)
        } else {
            None
        };

        Ok(Self {
            id,
            kind,
            pos,
            rotation,
            linvel,
            angvel,
            expires_at,
            trail,
        })
    }
}

/// Everything needed to resume a round exactly where it was saved.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub time: f32,
    pub score: i32,
    pub time_remaining: i32,
    pub lives: u32,
    pub paused: bool,
    pub score_accumulator: f32,
    pub physics_accumulator: f32,
    pub camera_pos: Vec2,
    pub camera_ppm: f32,
    pub countdown_elapsed: f32,
    /// `None` when collectible spawning is off.
    pub collectible_elapsed: Option<f32>,
    /// `None` when enemy spawning is off.
    pub enemy_elapsed: Option<f32>,
    pub rng_state: u64,
    pub next_id: EntityId,
    pub in_contact: bool,
    pub entities: Vec<EntitySnapshot>,
}

impl GameSnapshot {
    pub fn write_to<W: Write>(&self, out: W) -> GameResult<()> {
        let mut w = SaveWriter::new(out);
        w.f32(self.time)?;
        w.i32(self.score)?;
        w.i32(self.time_remaining)?;
        w.u32(self.lives)?;
        w.bool(self.paused)?;
        w.f32(self.score_accumulator)?;
        w.f32(self.physics_accumulator)?;
        w.vec2(self.camera_pos)?;
        w.f32(self.camera_ppm)?;
        w.f32(self.countdown_elapsed)?;
        w.opt_f32(self.collectible_elapsed)?;
        w.opt_f32(self.enemy_elapsed)?;
        w.u64(self.rng_state)?;
        w.u32(self.next_id.0)?;
        w.bool(self.in_contact)?;
        w.count(self.entities.len())?;
        for entity in &self.entities {
            entity.write(&mut w)?;
        }
        w.flush()
    }

    pub fn read_from<R: Read>(input: R) -> GameResult<Self> {
        let mut r = SaveReader::new(input);
        let time = r.f32("time")?;
        let score = r.i32("score")?;
        let time_remaining = r.i32("time remaining")?;
        let lives = r.u32("lives")?;
        let paused = r.bool("paused")?;
        let score_accumulator = r.f32("score accumulator")?;
        let physics_accumulator = r.f32("physics accumulator")?;
        let camera_pos = r.vec2("camera position")?;
        let camera_ppm = r.f32("camera scale")?;
        if camera_ppm <= 0.0 {
            return Err(GameError::corrupt(format!("camera scale {}", camera_ppm)));
        }
        let countdown_elapsed = r.f32("countdown")?;
        let collectible_elapsed = r.opt_f32("collectible timer")?;
        let enemy_elapsed = r.opt_f32("enemy timer")?;
        let rng_state = r.u64("rng state")?;
        let next_id = EntityId(r.u32("next id")?);
        let in_contact = r.bool("contact flag")?;

        let n = r.count("entity", MAX_COUNT)?;
        let mut entities = Vec::with_capacity(n.min(256));
        let mut ids = HashSet::with_capacity(n.min(256));
        for _ in 0..n {
            let entity = EntitySnapshot::read(&mut r)?;
            if !ids.insert(entity.id) {
                return Err(GameError::corrupt(format!("duplicate entity id {}", entity.id.0)));
            }
            entities.push(entity);
        }

        match entities.iter().filter(|e| e.kind.is_sun()).count() {
            1 => {}
            0 => {
                return Err(GameError::MissingEntity {
                    context: "snapshot restore",
                })
            }
            suns => return Err(GameError::corrupt(format!("expected one sun, found {}", suns))),
        }

        Ok(Self {
            time,
            score,
            time_remaining,
            lives,
            paused,
            score_accumulator,
            physics_accumulator,
            camera_pos,
            camera_ppm,
            countdown_elapsed,
            collectible_elapsed,
            enemy_elapsed,
            rng_state,
            next_id,
            in_contact,
            entities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> (PhysicsWorld, Vec<Entity>, GameConfig) {
        let config = GameConfig::default();
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let mut planet = Entity::create_planet(
            &mut physics,
            EntityId(2),
            Vec2::new(20.0, 20.0),
            Vec2::new(-3.0, 4.0),
            &config.planet,
        );
        if let Some(trail) = planet.trail.as_mut() {
            trail.update(Vec2::new(19.0, 21.0), 0.5);
            trail.update(Vec2::new(20.0, 20.0), 0.505);
        }
        let entities = vec![
            Entity::create_sun(&mut physics, EntityId(1), Vec2::ZERO, &config.sun),
            planet,
            Entity::create_collectible(
                &mut physics,
                EntityId(3),
                Vec2::new(-30.0, 5.0),
                CollectibleKind::MinusTime,
                &config.collectibles,
            )
            .with_expiry(12.5),
            Entity::create_enemy_ship(
                &mut physics,
                EntityId(4),
                Vec2::new(80.0, 0.0),
                Vec2::new(-25.0, 0.0),
                &config.enemies,
            ),
        ];
        (physics, entities, config)
    }

    fn snapshot(physics: &PhysicsWorld, entities: &[Entity]) -> GameSnapshot {
        GameSnapshot {
            time: 0.505,
            score: 42,
            time_remaining: 117,
            lives: 2,
            paused: false,
            score_accumulator: 0.25,
            physics_accumulator: 0.003,
            camera_pos: Vec2::new(-75.0, -56.25),
            camera_ppm: 640.0 / 150.0,
            countdown_elapsed: 0.505,
            collectible_elapsed: Some(0.505),
            enemy_elapsed: None,
            rng_state: 0xDEAD_BEEF,
            next_id: EntityId(5),
            in_contact: true,
            entities: entities
                .iter()
                .map(|e| EntitySnapshot::capture(e, physics))
                .collect(),
        }
    }

    #[test]
    fn snapshot_survives_the_codec() {
        let (physics, entities, _) = world();
        let snap = snapshot(&physics, &entities);
        let mut bytes = Vec::new();
        snap.write_to(&mut bytes).unwrap();
        let back = GameSnapshot::read_from(bytes.as_slice()).unwrap();
        assert_eq!(back, snap);
        assert_eq!(back.entities[1].trail.as_ref().map(|t| t.len()), Some(2));
    }

    #[test]
    fn restore_rebuilds_bodies() {
        let (physics, entities, config) = world();
        let snap = snapshot(&physics, &entities);

        let mut fresh = PhysicsWorld::new(Vec2::ZERO);
        let rebuilt: Vec<Entity> = snap
            .entities
            .iter()
            .map(|e| e.restore(&mut fresh, &config))
            .collect();
        assert_eq!(fresh.body_count(), 4);

        let planet = &rebuilt[1];
        assert_eq!(planet.pos, Vec2::new(20.0, 20.0));
        assert!((fresh.velocity(&planet.body) - Vec2::new(-3.0, 4.0)).length() < 1e-4);
        assert_eq!(planet.trail.as_ref().map(|t| t.points().len()), Some(2));
        assert_eq!(rebuilt[2].expires_at, Some(12.5));
        // Facing -x
        assert!((rebuilt[3].rotation.cos() + 1.0).abs() < 1e-4);
    }

    #[test]
    fn unknown_kind_tag_is_reported() {
        let (physics, entities, _) = world();
        let snap = snapshot(&physics, &entities[..1]);
        let mut bytes = Vec::new();
        snap.write_to(&mut bytes).unwrap();
        // The sun is the last record; its kind tag follows the 4-byte id.
        let sun_len = 4 + 1 + 4 + 8 + 4 + 8 + 4 + 1 + 1;
        let tag_at = bytes.len() - sun_len + 4;
        bytes[tag_at] = 9;
        assert!(matches!(
            GameSnapshot::read_from(bytes.as_slice()),
            Err(GameError::UnknownEntityKind(9))
        ));
    }

    #[test]
    fn snapshot_without_sun_reports_missing_entity() {
        let (physics, entities, _) = world();
        let snap = snapshot(&physics, &entities[1..]);
        let mut bytes = Vec::new();
        snap.write_to(&mut bytes).unwrap();
        assert!(matches!(
            GameSnapshot::read_from(bytes.as_slice()),
            Err(GameError::MissingEntity {
                context: "snapshot restore"
            })
        ));
    }

    #[test]
    fn snapshot_with_two_suns_is_corrupt() {
        let (physics, entities, _) = world();
        let mut snap = snapshot(&physics, &entities);
        let mut second = snap.entities[0].clone();
        second.id = EntityId(9);
        snap.entities.push(second);
        let mut bytes = Vec::new();
        snap.write_to(&mut bytes).unwrap();
        match GameSnapshot::read_from(bytes.as_slice()) {
            Err(GameError::CorruptSave { reason }) => {
                assert!(reason.contains("found 2"), "{}", reason)
            }
            other => panic!("expected corrupt save, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_entity_ids_are_corrupt() {
        let (physics, entities, _) = world();
        let mut snap = snapshot(&physics, &entities);
        // Collectible reuses the planet's id
        snap.entities[2].id = snap.entities[1].id;
        let mut bytes = Vec::new();
        snap.write_to(&mut bytes).unwrap();
        match GameSnapshot::read_from(bytes.as_slice()) {
            Err(GameError::CorruptSave { reason }) => {
                assert_eq!(reason, "duplicate entity id 2")
            }
            other => panic!("expected corrupt save, got {:?}", other),
        }
    }

    #[test]
    fn truncated_snapshot_is_corrupt() {
        let (physics, entities, _) = world();
        let mut bytes = Vec::new();
        snapshot(&physics, &entities).write_to(&mut bytes).unwrap();
        bytes.truncate(bytes.len() - 3);
        assert!(matches!(
            GameSnapshot::read_from(bytes.as_slice()),
            Err(GameError::CorruptSave { .. })
        ));
    }
}
