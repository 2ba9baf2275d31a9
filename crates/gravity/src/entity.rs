use glam::Vec2;
use gravity_engine::{
    BodyDesc, ColliderDesc, ColliderMaterial, EntityId, PhysicsBody, PhysicsWorld, SolverGroups,
};

use crate::config::{CollectibleConfig, EnemyConfig, PlanetConfig, SunConfig};
use crate::trail::Trail;

/// Solver group bits, one per entity kind.
pub mod groups {
    pub const SUN: u32 = 1 << 0;
    pub const PLANET: u32 = 1 << 1;
    pub const ENEMY: u32 = 1 << 2;
    pub const COLLECTIBLE: u32 = 1 << 3;
    /// Enemies and collectibles pass through each other and themselves.
    pub const GHOSTS: u32 = ENEMY | COLLECTIBLE;
}

/// What a collectible does when picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    PlusScore,
    MinusScore,
    PlusTime,
    MinusTime,
    SpawnPlanet,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 5] = [
        CollectibleKind::PlusScore,
        CollectibleKind::MinusScore,
        CollectibleKind::PlusTime,
        CollectibleKind::MinusTime,
        CollectibleKind::SpawnPlanet,
    ];

    /// Base-magnitude effect of this kind.
    pub fn payload(self, config: &CollectibleConfig) -> Payload {
        let mut payload = Payload::default();
        match self {
            CollectibleKind::PlusScore => payload.score = config.score,
            CollectibleKind::MinusScore => payload.score = -config.score,
            CollectibleKind::PlusTime => payload.time = config.time,
            CollectibleKind::MinusTime => payload.time = -config.time,
            CollectibleKind::SpawnPlanet => payload.spawn_planet = true,
        }
        payload
    }

    pub fn tag(self) -> u8 {
        match self {
            CollectibleKind::PlusScore => 0,
            CollectibleKind::MinusScore => 1,
            CollectibleKind::PlusTime => 2,
            CollectibleKind::MinusTime => 3,
            CollectibleKind::SpawnPlanet => 4,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.get(tag as usize).copied()
    }
}

/// Score/time deltas and side effects of a collectible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Payload {
    pub score: i32,
    pub time: i32,
    pub spawn_planet: bool,
}

impl Payload {
    /// Scale the score and time deltas (planet pickups).
    pub fn amplified(self, score_factor: i32, time_factor: i32) -> Self {
        Self {
            score: self.score.saturating_mul(score_factor),
            time: self.time.saturating_mul(time_factor),
            spawn_planet: self.spawn_planet,
        }
    }
}

/// Kind of game object, with its kind-specific data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    /// The single gravity source the player drags around.
    Sun { gravity_coeff: f32 },
    Planet,
    Collectible(CollectibleKind),
    Enemy,
}

impl EntityKind {
    pub fn is_sun(&self) -> bool {
        matches!(self, EntityKind::Sun { .. })
    }

    pub fn is_planet(&self) -> bool {
        matches!(self, EntityKind::Planet)
    }

    /// Strength of the attraction this entity exerts, if any.
    pub fn gravity_coeff(&self) -> Option<f32> {
        match self {
            EntityKind::Sun { gravity_coeff } => Some(*gravity_coeff),
            _ => None,
        }
    }

    pub fn is_affected_by_gravity(&self) -> bool {
        matches!(self, EntityKind::Planet)
    }

    fn solver_groups(&self) -> SolverGroups {
        match self {
            EntityKind::Sun { .. } => SolverGroups::new(groups::SUN, u32::MAX),
            EntityKind::Planet => SolverGroups::new(groups::PLANET, u32::MAX),
            EntityKind::Collectible(_) => {
                SolverGroups::new(groups::COLLECTIBLE, !groups::GHOSTS)
            }
            EntityKind::Enemy => SolverGroups::new(groups::ENEMY, !groups::GHOSTS),
        }
    }
}

/// Whether two kinds get a physical contact response.
pub fn should_collide(a: &EntityKind, b: &EntityKind) -> bool {
    let ga = a.solver_groups();
    let gb = b.solver_groups();
    ga.memberships & gb.filter != 0 && gb.memberships & ga.filter != 0
}

/// A live game object, always backed by one physics body.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub body: PhysicsBody,
    /// Collider shape in body-local coordinates (also the draw shape).
    pub shape: ColliderDesc,
    /// Position mirrored from the body after every substep.
    pub pos: Vec2,
    /// Rotation mirrored from the body after every substep.
    pub rotation: f32,
    pub trail: Option<Trail>,
    /// Simulation time after which the entity disappears.
    pub expires_at: Option<f32>,
}

impl Entity {
    fn spawn(
        physics: &mut PhysicsWorld,
        id: EntityId,
        kind: EntityKind,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> Self {
        let desc = desc.with_solver_groups(kind.solver_groups());
        let body = physics.create_body(id, &desc, material);
        Self {
            id,
            kind,
            body,
            shape: desc.collider,
            pos: desc.position,
            rotation: desc.rotation,
            trail: None,
            expires_at: None,
        }
    }

    pub fn create_sun(physics: &mut PhysicsWorld, id: EntityId, pos: Vec2, config: &SunConfig) -> Self {
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: config.radius })
            .with_position(pos)
            .with_fixed_rotation(true);
        let material = ColliderMaterial {
            restitution: config.restitution,
            friction: config.friction,
            density: config.density,
        };
        Self::spawn(
            physics,
            id,
            EntityKind::Sun {
                gravity_coeff: config.gravity_coeff,
            },
            desc,
            material,
        )
    }

    pub fn create_planet(
        physics: &mut PhysicsWorld,
        id: EntityId,
        pos: Vec2,
        velocity: Vec2,
        config: &PlanetConfig,
    ) -> Self {
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: config.radius })
            .with_position(pos)
            .with_velocity(velocity);
        let material = ColliderMaterial {
            restitution: config.restitution,
            friction: config.friction,
            density: config.density,
        };
        let mut entity = Self::spawn(physics, id, EntityKind::Planet, desc, material);
        entity.trail = Some(Trail::new(config.trail_size, config.trail_time));
        entity
    }

    pub fn create_collectible(
        physics: &mut PhysicsWorld,
        id: EntityId,
        pos: Vec2,
        kind: CollectibleKind,
        config: &CollectibleConfig,
    ) -> Self {
        let desc = BodyDesc::dynamic(ColliderDesc::Cuboid {
            half_width: config.half_size,
            half_height: config.half_size,
        })
        .with_position(pos);
        let material = ColliderMaterial {
            density: config.density,
            ..ColliderMaterial::default()
        };
        Self::spawn(physics, id, EntityKind::Collectible(kind), desc, material)
    }

    /// Create an enemy ship heading along `velocity`, nose first.
    pub fn create_enemy_ship(
        physics: &mut PhysicsWorld,
        id: EntityId,
        pos: Vec2,
        velocity: Vec2,
        config: &EnemyConfig,
    ) -> Self {
        let half = config.size / 2.0;
        let hull = vec![
            Vec2::new(half, 0.0),
            Vec2::new(-half, half * 0.6),
            Vec2::new(-half * 0.6, 0.0),
            Vec2::new(-half, -half * 0.6),
        ];
        let heading = velocity.y.atan2(velocity.x);
        let desc = BodyDesc::dynamic(ColliderDesc::ConvexPolygon { points: hull })
            .with_position(pos)
            .with_rotation(heading)
            .with_velocity(velocity)
            .with_ccd(true);
        let material = ColliderMaterial {
            density: config.density,
            ..ColliderMaterial::default()
        };
        Self::spawn(physics, id, EntityKind::Enemy, desc, material)
    }

    pub fn with_expiry(mut self, at: f32) -> Self {
        self.expires_at = Some(at);
        self
    }

    /// Radius of the circle enclosing the collider.
    pub fn radius(&self) -> f32 {
        self.shape.bounding_radius()
    }

    /// Copy the body's transform into `pos` and `rotation`.
    pub fn sync(&mut self, physics: &PhysicsWorld) {
        let (pos, rotation) = physics.body_position(&self.body);
        self.pos = pos;
        self.rotation = rotation;
    }

    /// Collider outline in world space (polygons and boxes only).
    pub fn world_outline(&self) -> Option<Vec<Vec2>> {
        let rot = Vec2::from_angle(self.rotation);
        let local = match &self.shape {
            ColliderDesc::Ball { .. } => return None,
            ColliderDesc::Cuboid {
                half_width,
                half_height,
            } => vec![
                Vec2::new(-half_width, -half_height),
                Vec2::new(*half_width, -half_height),
                Vec2::new(*half_width, *half_height),
                Vec2::new(-half_width, *half_height),
            ],
            ColliderDesc::ConvexPolygon { points } => points.clone(),
        };
        Some(local.into_iter().map(|p| self.pos + rot.rotate(p)).collect())
    }
}
