use glam::Vec2;
use rapier2d::parry::query::PointQuery;
use rapier2d::prelude::*;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use crate::api::types::EntityId;

// ---------------------------------------------------------------------------
// Conversion helpers (private), glam ↔ nalgebra
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn na_iso_to_pos_rot(iso: &nalgebra::Isometry2<f32>) -> (Vec2, f32) {
    let pos = Vec2::new(iso.translation.x, iso.translation.y);
    let rot = iso.rotation.angle();
    (pos, rot)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
        }
    }
}

/// Shape description for a collider.
#[derive(Debug, Clone, PartialEq)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_width: f32, half_height: f32 },
    /// Convex polygon in body-local coordinates. The hull of the points is used.
    ConvexPolygon { points: Vec<Vec2> },
}

impl ColliderDesc {
    /// Radius of the smallest origin-centered circle enclosing the shape.
    pub fn bounding_radius(&self) -> f32 {
        match self {
            ColliderDesc::Ball { radius } => *radius,
            ColliderDesc::Cuboid { half_width, half_height } => {
                Vec2::new(*half_width, *half_height).length()
            }
            ColliderDesc::ConvexPolygon { points } => {
                points.iter().map(|p| p.length()).fold(0.0, f32::max)
            }
        }
    }

    fn build_collider(&self) -> ColliderBuilder {
        match self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(*radius),
            ColliderDesc::Cuboid { half_width, half_height } => {
                ColliderBuilder::cuboid(*half_width, *half_height)
            }
            ColliderDesc::ConvexPolygon { points } => {
                let hull: Vec<Point<f32>> =
                    points.iter().map(|p| Point::new(p.x, p.y)).collect();
                ColliderBuilder::convex_hull(&hull).unwrap_or_else(|| {
                    log::warn!(
                        "degenerate convex polygon ({} points), using bounding ball",
                        points.len()
                    );
                    ColliderBuilder::ball(self.bounding_radius().max(0.01))
                })
            }
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.3,
            friction: 0.5,
            density: 1.0,
        }
    }
}

/// Solver group bits for a collider.
///
/// Two colliders get a physical contact response only if each one's
/// `memberships` intersects the other's `filter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverGroups {
    pub memberships: u32,
    pub filter: u32,
}

impl SolverGroups {
    pub const ALL: Self = Self {
        memberships: u32::MAX,
        filter: u32::MAX,
    };

    pub const fn new(memberships: u32, filter: u32) -> Self {
        Self { memberships, filter }
    }

    fn to_rapier(self) -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_truncate(self.memberships),
            Group::from_bits_truncate(self.filter),
        )
    }
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub rotation: f32,
    pub velocity: Vec2,
    pub fixed_rotation: bool,
    pub ccd: bool,
    pub collider: ColliderDesc,
    pub solver_groups: SolverGroups,
}

impl BodyDesc {
    /// Create a dynamic body description with the given collider shape.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            fixed_rotation: false,
            ccd: false,
            collider,
            solver_groups: SolverGroups::ALL,
        }
    }

    /// Create a fixed (static) body description with the given collider shape.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            fixed_rotation: true,
            ..Self::dynamic(collider)
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.velocity = vel;
        self
    }

    pub fn with_fixed_rotation(mut self, fixed: bool) -> Self {
        self.fixed_rotation = fixed;
        self
    }

    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    pub fn with_solver_groups(mut self, groups: SolverGroups) -> Self {
        self.solver_groups = groups;
        self
    }
}

/// Handle pair stored on an Entity, referencing Rapier internals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// A collision event between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub entity_a: EntityId,
    pub entity_b: EntityId,
    /// `true` when the collision just started, `false` when it ended.
    pub started: bool,
}

// ---------------------------------------------------------------------------
// Event collector (no crossbeam)
// ---------------------------------------------------------------------------

struct DirectEventCollector {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl DirectEventCollector {
    fn new() -> Self {
        Self {
            collisions: Mutex::new(Vec::new()),
        }
    }

    fn drain_collisions(&self) -> Vec<CollisionEvent> {
        match self.collisions.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventHandler for DirectEventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let Ok(mut events) = self.collisions.lock() {
            events.push(event);
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
        // Contact forces are not consumed, but the trait requires this.
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate into a single struct.
///
/// Bodies are created and destroyed only between steps; `step_into` hands
/// contact begin/end events back after the pipeline has finished iterating,
/// so callers can safely queue removals while dispatching them.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_collector: DirectEventCollector,
}

impl PhysicsWorld {
    /// Create a new physics world with the given uniform gravity vector.
    /// Pass `Vec2::ZERO` when all attraction is applied as per-body forces.
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_collector: DirectEventCollector::new(),
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// The integration timestep used by `step_into`.
    pub fn dt(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Set the number of constraint solver iterations per step (minimum 1).
    pub fn set_solver_iterations(&mut self, iterations: usize) {
        if let Some(n) = NonZeroUsize::new(iterations.max(1)) {
            self.integration_parameters.num_solver_iterations = n;
        }
    }

    /// Create a rigid body + collider and return handles.
    /// The EntityId is stored in the body's `user_data` for collision lookups.
    pub fn create_body(
        &mut self,
        entity_id: EntityId,
        desc: &BodyDesc,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .translation(nalgebra::Vector2::new(desc.position.x, desc.position.y))
            .rotation(desc.rotation)
            .linvel(nalgebra::Vector2::new(desc.velocity.x, desc.velocity.y))
            .locked_axes(if desc.fixed_rotation {
                LockedAxes::ROTATION_LOCKED
            } else {
                LockedAxes::empty()
            })
            .ccd_enabled(desc.ccd)
            .user_data(entity_id.0 as u128)
            .build();

        let body_handle = self.bodies.insert(rb);

        let collider = desc
            .collider
            .build_collider()
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .solver_groups(desc.solver_groups.to_rapier())
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Remove a body and all its colliders from the simulation.
    pub fn remove_body(&mut self, body: &PhysicsBody) {
        self.bodies.remove(
            body.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Whether the body is still part of the simulation.
    pub fn contains(&self, body: &PhysicsBody) -> bool {
        self.bodies.contains(body.body_handle)
    }

    /// Step the simulation and collect collision events into the provided Vec.
    pub fn step_into(&mut self, collision_events: &mut Vec<CollisionPair>) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_collector,
        );

        // Drain collision events and resolve entity IDs from user_data
        for event in self.event_collector.drain_collisions() {
            let (h1, h2, started) = match event {
                CollisionEvent::Started(h1, h2, _) => (h1, h2, true),
                CollisionEvent::Stopped(h1, h2, _) => (h1, h2, false),
            };

            // Collider handles → body handles → entity IDs
            let entity_a = self.collider_to_entity(h1);
            let entity_b = self.collider_to_entity(h2);

            if let (Some(a), Some(b)) = (entity_a, entity_b) {
                collision_events.push(CollisionPair {
                    entity_a: a,
                    entity_b: b,
                    started,
                });
            }
        }
    }

    /// Reset the accumulated user forces on every body.
    ///
    /// Rapier keeps added forces across steps, so per-step force models
    /// must clear before accumulating again.
    pub fn clear_forces(&mut self) {
        for (_, rb) in self.bodies.iter_mut() {
            rb.reset_forces(false);
        }
    }

    /// Add a force at the body's center of mass. Persists until `clear_forces`.
    pub fn apply_force(&mut self, body: &PhysicsBody, force: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.add_force(vec2_to_na(force), true);
        }
    }

    /// Set the linear velocity of a body directly.
    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linvel(vec2_to_na(vel), true);
        }
    }

    /// Get the current linear velocity of a body.
    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Mass of a body, derived from its collider's density and area.
    pub fn mass(&self, body: &PhysicsBody) -> f32 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| rb.mass())
            .unwrap_or(0.0)
    }

    /// Set the angular velocity of a body directly.
    pub fn set_angular_velocity(&mut self, body: &PhysicsBody, angvel: f32) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_angvel(angvel, true);
        }
    }

    /// Get the current angular velocity of a body.
    pub fn angular_velocity(&self, body: &PhysicsBody) -> f32 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| rb.angvel())
            .unwrap_or(0.0)
    }

    /// Teleport a body to the given position and rotation.
    /// Attached colliders move with it immediately, so point queries see the
    /// new placement before the next step.
    pub fn set_transform(&mut self, body: &PhysicsBody, pos: Vec2, rotation: f32) {
        let iso = nalgebra::Isometry2::new(vec2_to_na(pos), rotation);
        let Some(rb) = self.bodies.get_mut(body.body_handle) else {
            return;
        };
        rb.set_position(iso, true);
        for &handle in rb.colliders() {
            if let Some(collider) = self.colliders.get_mut(handle) {
                let local = collider
                    .position_wrt_parent()
                    .copied()
                    .unwrap_or_else(nalgebra::Isometry2::identity);
                collider.set_position(iso * local);
            }
        }
    }

    /// Get the current position and rotation of a body.
    pub fn body_position(&self, body: &PhysicsBody) -> (Vec2, f32) {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_iso_to_pos_rot(rb.position()))
            .unwrap_or((Vec2::ZERO, 0.0))
    }

    /// Find the entity whose collider contains the given world point.
    pub fn entity_at_point(&self, point: Vec2) -> Option<EntityId> {
        let pt = Point::new(point.x, point.y);
        self.colliders
            .iter()
            .find(|(_, collider)| collider.shape().contains_point(collider.position(), &pt))
            .and_then(|(handle, _)| self.collider_to_entity(handle))
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    // -- private helpers --

    fn collider_to_entity(&self, collider_handle: ColliderHandle) -> Option<EntityId> {
        let collider = self.colliders.get(collider_handle)?;
        let body_handle = collider.parent()?;
        let body = self.bodies.get(body_handle)?;
        Some(EntityId(body.user_data as u32))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(world: &mut PhysicsWorld, id: u32, pos: Vec2, vel: Vec2) -> PhysicsBody {
        world.create_body(
            EntityId(id),
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 })
                .with_position(pos)
                .with_velocity(vel),
            ColliderMaterial::default(),
        )
    }

    #[test]
    fn create_and_remove_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = ball(&mut world, 1, Vec2::ZERO, Vec2::ZERO);
        assert_eq!(world.body_count(), 1);
        assert!(world.contains(&body));
        world.remove_body(&body);
        assert_eq!(world.body_count(), 0);
        assert!(!world.contains(&body));
    }

    #[test]
    fn force_accelerates_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_dt(1.0 / 60.0);
        let body = ball(&mut world, 1, Vec2::ZERO, Vec2::ZERO);

        let mut events = Vec::new();
        for _ in 0..10 {
            world.clear_forces();
            world.apply_force(&body, Vec2::new(5000.0, 0.0));
            world.step_into(&mut events);
        }

        let (pos, _) = world.body_position(&body);
        assert!(pos.x > 0.0, "Body should move along the force: x={}", pos.x);
        assert!(pos.y.abs() < 1e-4);
    }

    #[test]
    fn clear_forces_stops_acceleration() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_dt(1.0 / 60.0);
        let body = ball(&mut world, 1, Vec2::ZERO, Vec2::ZERO);

        let mut events = Vec::new();
        world.apply_force(&body, Vec2::new(5000.0, 0.0));
        world.step_into(&mut events);
        world.clear_forces();
        let v1 = world.velocity(&body);
        for _ in 0..5 {
            world.step_into(&mut events);
        }
        let v2 = world.velocity(&body);
        assert!(v1.x > 0.0);
        assert!((v1.x - v2.x).abs() < 1e-3, "v1={:?} v2={:?}", v1, v2);
    }

    #[test]
    fn set_velocity_directly() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = ball(&mut world, 1, Vec2::ZERO, Vec2::ZERO);

        world.set_velocity(&body, Vec2::new(50.0, -30.0));
        let vel = world.velocity(&body);
        assert!((vel.x - 50.0).abs() < 0.001);
        assert!((vel.y - (-30.0)).abs() < 0.001);

        world.set_angular_velocity(&body, 2.0);
        assert!((world.angular_velocity(&body) - 2.0).abs() < 0.001);
    }

    #[test]
    fn fixed_body_does_not_move() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -100.0));
        world.set_dt(1.0 / 60.0);

        let body = world.create_body(
            EntityId(1),
            &BodyDesc::fixed(ColliderDesc::Cuboid {
                half_width: 100.0,
                half_height: 10.0,
            })
            .with_position(Vec2::new(0.0, 500.0)),
            ColliderMaterial::default(),
        );

        let mut events = Vec::new();
        for _ in 0..10 {
            world.step_into(&mut events);
        }

        let (pos, _) = world.body_position(&body);
        assert!(
            (pos.y - 500.0).abs() < 0.001,
            "Fixed body should not move: y={}",
            pos.y
        );
    }

    #[test]
    fn collision_events_between_converging_bodies() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_dt(1.0 / 60.0);

        ball(&mut world, 1, Vec2::new(0.0, 0.0), Vec2::new(200.0, 0.0));
        ball(&mut world, 2, Vec2::new(30.0, 0.0), Vec2::new(-200.0, 0.0));

        let mut all_events = Vec::new();
        for _ in 0..60 {
            world.step_into(&mut all_events);
        }

        let started: Vec<_> = all_events.iter().filter(|e| e.started).collect();
        assert!(!started.is_empty(), "Should have at least one collision start event");

        // Order within the pair is not guaranteed
        let ids = [started[0].entity_a, started[0].entity_b];
        assert!(ids.contains(&EntityId(1)));
        assert!(ids.contains(&EntityId(2)));
    }

    #[test]
    fn excluded_solver_groups_pass_through() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_dt(1.0 / 60.0);

        let ghost = SolverGroups::new(0b01, 0b10);
        let a = world.create_body(
            EntityId(1),
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 })
                .with_velocity(Vec2::new(200.0, 0.0))
                .with_solver_groups(ghost),
            ColliderMaterial::default(),
        );
        let b = world.create_body(
            EntityId(2),
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 })
                .with_position(Vec2::new(30.0, 0.0))
                .with_velocity(Vec2::new(-200.0, 0.0))
                .with_solver_groups(ghost),
            ColliderMaterial::default(),
        );

        let mut events = Vec::new();
        for _ in 0..60 {
            world.step_into(&mut events);
        }

        let (pa, _) = world.body_position(&a);
        let (pb, _) = world.body_position(&b);
        assert!(pa.x > pb.x, "Bodies should cross: a={} b={}", pa.x, pb.x);
    }

    #[test]
    fn set_transform_teleports() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = ball(&mut world, 1, Vec2::ZERO, Vec2::ZERO);
        world.set_transform(&body, Vec2::new(7.0, -3.0), 0.5);
        let (pos, rot) = world.body_position(&body);
        assert!((pos - Vec2::new(7.0, -3.0)).length() < 1e-4);
        assert!((rot - 0.5).abs() < 1e-4);
    }

    #[test]
    fn teleported_body_is_found_at_its_new_spot() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = ball(&mut world, 1, Vec2::ZERO, Vec2::ZERO);
        world.set_transform(&body, Vec2::new(40.0, 10.0), 0.0);

        assert_eq!(world.entity_at_point(Vec2::new(40.0, 10.0)), Some(EntityId(1)));
        assert_eq!(world.entity_at_point(Vec2::ZERO), None);
    }

    #[test]
    fn entity_at_point_picks_containing_collider() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        ball(&mut world, 1, Vec2::new(0.0, 0.0), Vec2::ZERO);
        ball(&mut world, 2, Vec2::new(100.0, 0.0), Vec2::ZERO);

        assert_eq!(world.entity_at_point(Vec2::new(3.0, 4.0)), Some(EntityId(1)));
        assert_eq!(world.entity_at_point(Vec2::new(95.0, 0.0)), Some(EntityId(2)));
        assert_eq!(world.entity_at_point(Vec2::new(50.0, 0.0)), None);
    }

    #[test]
    fn convex_polygon_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let shape = ColliderDesc::ConvexPolygon {
            points: vec![Vec2::new(2.0, 0.0), Vec2::new(-1.0, 1.0), Vec2::new(-1.0, -1.0)],
        };
        assert!((shape.bounding_radius() - 2.0).abs() < 1e-6);
        world.create_body(EntityId(9), &BodyDesc::dynamic(shape), ColliderMaterial::default());
        assert_eq!(world.entity_at_point(Vec2::new(0.0, 0.0)), Some(EntityId(9)));
    }

    #[test]
    fn builder_pattern() {
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 5.0 })
            .with_position(Vec2::new(10.0, 20.0))
            .with_velocity(Vec2::new(1.0, 2.0))
            .with_fixed_rotation(true)
            .with_ccd(true)
            .with_solver_groups(SolverGroups::new(1, 2));

        assert_eq!(desc.body_type, BodyType::Dynamic);
        assert_eq!(desc.position, Vec2::new(10.0, 20.0));
        assert_eq!(desc.velocity, Vec2::new(1.0, 2.0));
        assert!(desc.fixed_rotation);
        assert!(desc.ccd);
        assert_eq!(desc.solver_groups, SolverGroups::new(1, 2));
        assert_eq!(BodyDesc::fixed(desc.collider.clone()).body_type, BodyType::Fixed);
    }

    #[test]
    fn mass_follows_density() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(
            EntityId(1),
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 2.0 }),
            ColliderMaterial {
                density: 3.0,
                ..ColliderMaterial::default()
            },
        );
        let expected = 3.0 * std::f32::consts::PI * 4.0;
        assert!((world.mass(&body) - expected).abs() < 1e-2);
    }

    #[test]
    fn collider_material_defaults() {
        let mat = ColliderMaterial::default();
        assert!((mat.restitution - 0.3).abs() < 0.001);
        assert!((mat.friction - 0.5).abs() < 0.001);
        assert!((mat.density - 1.0).abs() < 0.001);
    }
}
