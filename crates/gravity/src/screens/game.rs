//! The game screen: owns the physics world and drives the fixed-step loop.
//!
//! Each substep runs, in order: scoring, gravity, the physics step and its
//! contact dispatch, the clock and timers, entity sync, camera framing, the
//! out-of-bounds sweep, deferred removal and trail update.

use std::io::{Read, Write};

use glam::Vec2;
use gravity_engine::{
    Camera2D, CollisionPair, Color, DrawShape, EntityId, FixedTimestep, InputEvent,
    PhysicsWorld, Renderer, SoundEvent, TextAnchor, TimerId, TimerRegistry, TrailStyle,
};

use super::{keys, sounds, Screen, ScreenKind, ScreenPayload, Transition};
use crate::config::{vec2, GameConfig};
use crate::contact::{ContactDispatcher, ContactEffect};
use crate::entity::{CollectibleKind, Entity, EntityKind};
use crate::error::GameResult;
use crate::framing::{fit_camera, is_outside_view};
use crate::gravity::{apply_gravity, orbit_velocity};
use crate::round::RoundState;
use crate::scene::Scene;
use crate::snapshot::{EntitySnapshot, GameSnapshot};
use crate::spawner::{place_collectible, place_enemy, Rng};

const BACKGROUND: Color = Color::new(0.02, 0.02, 0.06, 1.0);
const HUD_TEXT: f32 = 24.0;

/// An in-progress sun drag.
#[derive(Debug, Clone, Copy)]
struct Drag {
    entity: EntityId,
    /// Grab point relative to the body origin.
    offset: Vec2,
}

pub struct GameScreen {
    config: GameConfig,
    physics: PhysicsWorld,
    scene: Scene,
    round: RoundState,
    camera: Camera2D,
    timestep: FixedTimestep,
    timers: TimerRegistry,
    countdown: TimerId,
    collectible_timer: Option<TimerId>,
    enemy_timer: Option<TimerId>,
    contacts: ContactDispatcher,
    rng: Rng,
    drag: Option<Drag>,
    step_once: bool,
    collisions: Vec<CollisionPair>,
    transition: Transition,
    sounds: Vec<SoundEvent>,
}

fn new_physics(config: &GameConfig) -> PhysicsWorld {
    let mut physics = PhysicsWorld::new(Vec2::ZERO);
    physics.set_dt(config.physics.step);
    physics.set_solver_iterations(config.physics.solver_iterations);
    physics
}

fn entity_color(kind: &EntityKind) -> Color {
    match kind {
        EntityKind::Sun { .. } => Color::YELLOW,
        EntityKind::Planet => Color::CYAN,
        EntityKind::Enemy => Color::RED,
        EntityKind::Collectible(CollectibleKind::PlusScore) => Color::GREEN,
        EntityKind::Collectible(CollectibleKind::MinusScore) => Color::ORANGE,
        EntityKind::Collectible(CollectibleKind::PlusTime) => Color::BLUE,
        EntityKind::Collectible(CollectibleKind::MinusTime) => Color::GRAY,
        EntityKind::Collectible(CollectibleKind::SpawnPlanet) => Color::WHITE,
    }
}

impl GameScreen {
    pub fn new(config: GameConfig) -> Self {
        let camera = Camera2D::new(config.window.width, config.window.height);
        let timestep = FixedTimestep::new(config.physics.step)
            .with_max_steps(config.physics.max_substeps);
        let mut screen = Self {
            physics: new_physics(&config),
            scene: Scene::new(),
            round: RoundState::new(config.rules.game_time, config.rules.lives),
            camera,
            timestep,
            timers: TimerRegistry::new(),
            countdown: TimerId(0),
            collectible_timer: None,
            enemy_timer: None,
            contacts: ContactDispatcher::new(),
            rng: Rng::new(config.seed),
            drag: None,
            step_once: false,
            collisions: Vec::new(),
            transition: Transition::Continue,
            sounds: Vec::new(),
            config,
        };
        screen.reset();
        screen
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn is_paused(&self) -> bool {
        self.round.paused
    }

    /// Pause or resume the simulation and its timers together.
    pub fn set_paused(&mut self, paused: bool) {
        self.round.paused = paused;
        if paused {
            self.timers.pause_all();
        } else {
            self.timers.resume_all();
        }
    }

    /// Positions of all live planets.
    pub fn planet_positions(&self) -> Vec<Vec2> {
        self.scene.planets().map(|p| p.pos).collect()
    }

    // -- setup --

    fn start_timers(&mut self) {
        self.timers.clear();
        self.countdown = self.timers.set(1.0, true);
        let collectibles = self.config.collectibles.spawn_interval;
        self.collectible_timer = (collectibles > 0.0).then(|| self.timers.set(collectibles, true));
        let enemies = self.config.enemies.spawn_interval;
        self.enemy_timer = (enemies > 0.0).then(|| self.timers.set(enemies, true));
    }

    fn spawn_sun(&mut self) -> EntityId {
        let id = self.scene.next_id();
        let pos = vec2(self.config.sun.position);
        self.scene
            .spawn(Entity::create_sun(&mut self.physics, id, pos, &self.config.sun));
        id
    }

    fn spawn_planet(&mut self, pos: Vec2, velocity: Vec2) -> EntityId {
        let id = self.scene.next_id();
        let planet =
            Entity::create_planet(&mut self.physics, id, pos, velocity, &self.config.planet);
        self.scene.spawn(planet);
        log::debug!("planet {:?} spawned at {:?}", id, pos);
        id
    }

    /// A planet in orbit at the starting offset from wherever the sun is now.
    fn spawn_orbiting_planet(&mut self) {
        let Some((sun_pos, coeff)) = self
            .scene
            .sun()
            .map(|s| (s.pos, s.kind.gravity_coeff().unwrap_or(0.0)))
        else {
            return;
        };
        let offset = vec2(self.config.planet.position) - vec2(self.config.sun.position);
        let id = self.spawn_planet(sun_pos + offset, Vec2::ZERO);
        if let Some(planet) = self.scene.get(id) {
            let mass = self.physics.mass(&planet.body);
            let velocity = orbit_velocity(sun_pos, coeff, planet.pos, mass);
            self.physics.set_velocity(&planet.body, velocity);
        }
        self.sounds.push(sounds::NEW_PLANET);
    }

    fn spawn_collectible(&mut self) {
        let Some(sun_pos) = self.scene.sun().map(|s| s.pos) else {
            return;
        };
        let cfg = &self.config.collectibles;
        let Some((pos, kind)) = place_collectible(&mut self.rng, &self.camera, sun_pos, cfg) else {
            log::trace!("no room for a collectible");
            return;
        };
        let id = self.scene.next_id();
        let entity = Entity::create_collectible(&mut self.physics, id, pos, kind, cfg)
            .with_expiry(self.round.time + cfg.lifetime);
        self.scene.spawn(entity);
        log::debug!("collectible {:?} ({:?}) spawned at {:?}", id, kind, pos);
    }

    fn spawn_enemy(&mut self) {
        let (pos, velocity) = place_enemy(&mut self.rng, &self.camera, &self.config.enemies);
        let id = self.scene.next_id();
        let ship =
            Entity::create_enemy_ship(&mut self.physics, id, pos, velocity, &self.config.enemies);
        self.scene.spawn(ship);
        log::debug!("enemy {:?} spawned at {:?}", id, pos);
    }

    // -- simulation --

    /// Fractional score for every planet: speed × distance to the sun.
    fn accrue_score(&mut self, step: f32) {
        let Some(sun_pos) = self.scene.sun().map(|s| s.pos) else {
            return;
        };
        let rules = &self.config.rules;
        let points: f32 = self
            .scene
            .planets()
            .map(|p| {
                let speed = self.physics.velocity(&p.body).length();
                let distance = p.pos.distance(sun_pos);
                if distance > rules.score_distance_cutoff {
                    0.0
                } else {
                    speed * distance * rules.score_rate * step
                }
            })
            .sum();
        self.round.accrue_score(points);
    }

    fn dispatch_contacts(&mut self) {
        let pairs = std::mem::take(&mut self.collisions);
        for pair in &pairs {
            let effect = self.contacts.dispatch(
                pair,
                &mut self.scene,
                &mut self.round,
                &self.config.rules,
                &self.config.collectibles,
            );
            match effect {
                Some(ContactEffect::SunPenalty { .. }) => self.sounds.push(sounds::PENALTY),
                Some(ContactEffect::EnemyStrike { .. }) => {
                    self.sounds.push(sounds::ENEMY_DESTROYED)
                }
                Some(ContactEffect::Pickup { payload, .. }) => {
                    self.sounds.push(sounds::COLLECT);
                    if payload.spawn_planet {
                        self.spawn_orbiting_planet();
                    }
                }
                None => {}
            }
        }
        self.collisions = pairs;
        self.collisions.clear();
    }

    fn on_timer(&mut self, id: TimerId) {
        if id == self.countdown {
            self.round.tick_countdown();
        } else if Some(id) == self.collectible_timer {
            self.spawn_collectible();
        } else if Some(id) == self.enemy_timer {
            self.spawn_enemy();
        }
    }

    fn refit_camera(&mut self) {
        let planets: Vec<(Vec2, f32)> = self
            .scene
            .planets()
            .filter(|p| !self.scene.is_marked(p.id))
            .map(|p| (p.pos, p.radius()))
            .collect();
        fit_camera(&mut self.camera, &planets, &self.config.camera);
    }

    /// Discard planets that left the frame for good, far-away enemies and
    /// expired collectibles.
    fn sweep_out_of_bounds(&mut self) {
        let now = self.round.time;
        let discard = self.config.enemies.discard_distance;
        let mut lost = Vec::new();
        let mut gone = Vec::new();

        for e in self.scene.iter() {
            match e.kind {
                EntityKind::Planet => {
                    let trail_visible = e
                        .trail
                        .as_ref()
                        .map(|t| t.points().iter().any(|p| self.camera.is_visible(p.pos)))
                        .unwrap_or(false);
                    if is_outside_view(&self.camera, e.pos, e.radius()) && !trail_visible {
                        lost.push(e.id);
                    }
                }
                EntityKind::Enemy if e.pos.length() > discard => gone.push(e.id),
                EntityKind::Collectible(_) if e.expires_at.is_some_and(|t| now >= t) => {
                    gone.push(e.id)
                }
                _ => {}
            }
        }

        for id in gone {
            self.scene.mark_for_removal(id);
        }

        for id in lost {
            if !self.scene.mark_for_removal(id) {
                continue;
            }
            self.sounds.push(sounds::PLANET_LOST);
            let lives_left = self.round.lose_life();
            log::debug!("planet {:?} lost, {} lives left", id, self.round.lives);
            if !lives_left {
                return;
            }
        }

        let remaining = self
            .scene
            .planets()
            .filter(|p| !self.scene.is_marked(p.id))
            .count();
        if remaining == 0 && self.round.lives > 0 {
            let (pos, vel) = (vec2(self.config.planet.position), vec2(self.config.planet.velocity));
            self.spawn_planet(pos, vel);
            self.sounds.push(sounds::NEW_PLANET);
        }
    }

    fn update_trails(&mut self) {
        let now = self.round.time;
        for e in self.scene.iter_mut() {
            if let Some(trail) = e.trail.as_mut() {
                trail.update(e.pos, now);
            }
        }
    }

    fn finish(&mut self) {
        self.round.game_over = true;
        self.timers.pause_all();
        self.drag = None;
        self.sounds.push(sounds::GAME_OVER);
        let score = self.round.score();
        log::info!("game over, final score {}", score);
        self.transition =
            Transition::SwitchTo(ScreenKind::HighScores, ScreenPayload::FinalScore(score));
    }

    /// Run exactly one fixed substep.
    pub fn substep(&mut self) {
        if self.round.game_over {
            return;
        }
        let step = self.timestep.dt();

        self.accrue_score(step);
        apply_gravity(
            &self.scene,
            &mut self.physics,
            self.config.physics.min_gravity_distance,
        );
        self.physics.step_into(&mut self.collisions);
        self.dispatch_contacts();

        self.round.time += step;
        for id in self.timers.advance(step) {
            self.on_timer(id);
        }

        for e in self.scene.iter_mut() {
            e.sync(&self.physics);
        }
        self.refit_camera();
        self.sweep_out_of_bounds();
        for removed in self.scene.sweep_removed(&mut self.physics) {
            log::trace!("removed {:?} ({:?})", removed.id, removed.kind);
        }
        self.update_trails();

        if self.round.is_out_of_time() || self.round.lives == 0 {
            self.finish();
        }
    }

    fn move_sun(&mut self, drag: Drag, pointer: Vec2) {
        let Some(sun) = self.scene.get_mut(drag.entity) else {
            self.drag = None;
            return;
        };
        let pos = pointer - drag.offset;
        self.physics.set_transform(&sun.body, pos, 0.0);
        self.physics.set_velocity(&sun.body, Vec2::ZERO);
        self.physics.set_angular_velocity(&sun.body, 0.0);
        sun.sync(&self.physics);
    }

    fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            time: self.round.time,
            score: self.round.score(),
            time_remaining: self.round.time_remaining(),
            lives: self.round.lives,
            paused: self.round.paused,
            score_accumulator: self.round.score_accumulator,
            physics_accumulator: self.timestep.accumulator(),
            camera_pos: self.camera.pos,
            camera_ppm: self.camera.ppm,
            countdown_elapsed: self.timers.elapsed(self.countdown).unwrap_or(0.0),
            collectible_elapsed: self.collectible_timer.and_then(|t| self.timers.elapsed(t)),
            enemy_elapsed: self.enemy_timer.and_then(|t| self.timers.elapsed(t)),
            rng_state: self.rng.state(),
            next_id: self.scene.peek_next_id(),
            in_contact: self.contacts.in_contact(),
            entities: self
                .scene
                .iter()
                .map(|e| EntitySnapshot::capture(e, &self.physics))
                .collect(),
        }
    }

    fn restore(&mut self, snap: GameSnapshot) {
        self.physics = new_physics(&self.config);
        self.scene.clear();
        for e in &snap.entities {
            let entity = e.restore(&mut self.physics, &self.config);
            self.scene.spawn(entity);
        }
        self.scene.reserve_ids_below(snap.next_id);

        let mut round = RoundState::new(snap.time_remaining, snap.lives);
        round.time = snap.time;
        round.set_score(snap.score);
        round.score_accumulator = snap.score_accumulator;
        self.round = round;

        self.camera.pos = snap.camera_pos;
        self.camera.ppm = snap.camera_ppm;
        self.timestep.set_accumulator(snap.physics_accumulator);

        self.start_timers();
        self.timers.set_elapsed(self.countdown, snap.countdown_elapsed);
        if let (Some(id), Some(elapsed)) = (self.collectible_timer, snap.collectible_elapsed) {
            self.timers.set_elapsed(id, elapsed);
        }
        if let (Some(id), Some(elapsed)) = (self.enemy_timer, snap.enemy_elapsed) {
            self.timers.set_elapsed(id, elapsed);
        }
        self.set_paused(snap.paused);

        self.contacts.set_in_contact(snap.in_contact);
        self.rng = Rng::new(snap.rng_state);
        self.drag = None;
        self.step_once = false;
        self.collisions.clear();
        self.transition = Transition::Continue;
        self.sounds.clear();
    }
}

impl Screen for GameScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Game
    }

    fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => {
                let world = self.camera.screen_to_world(Vec2::new(x, y));
                let grabbed = self
                    .physics
                    .entity_at_point(world)
                    .and_then(|id| self.scene.get(id))
                    .filter(|e| e.kind.is_sun());
                if let Some(sun) = grabbed {
                    self.drag = Some(Drag {
                        entity: sun.id,
                        offset: world - sun.pos,
                    });
                }
            }
            InputEvent::PointerMove { x, y } => {
                if let Some(drag) = self.drag {
                    let world = self.camera.screen_to_world(Vec2::new(x, y));
                    self.move_sun(drag, world);
                }
            }
            InputEvent::PointerUp { .. } => self.drag = None,
            InputEvent::KeyDown { key_code } => match key_code {
                keys::P => {
                    let paused = !self.round.paused;
                    self.set_paused(paused);
                    log::debug!("paused: {}", paused);
                }
                keys::N => self.step_once = true,
                keys::ESCAPE => {
                    self.set_paused(true);
                    self.transition = Transition::SwitchTo(ScreenKind::Menu, ScreenPayload::None);
                }
                keys::Q => self.transition = Transition::Quit,
                // Fullscreen belongs to the host window.
                keys::F => {}
                _ => {}
            },
            InputEvent::Resize { width, height } => {
                self.camera.resize(width, height);
                self.refit_camera();
            }
            _ => {}
        }
    }

    fn advance(&mut self, dt: f32) {
        if self.round.game_over {
            return;
        }

        if self.round.paused {
            // Frame time does not build up while paused.
            self.timestep.reset();
            if std::mem::take(&mut self.step_once) {
                self.substep();
            }
            return;
        }
        self.step_once = false;

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.substep();
            if self.round.game_over {
                break;
            }
        }
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        renderer.set_camera(&self.camera);
        renderer.clear(BACKGROUND);

        for e in self.scene.iter() {
            if let Some(trail) = &e.trail {
                let radius = e.radius();
                let style = TrailStyle {
                    start_radius: radius * 0.1,
                    end_radius: radius * 0.8,
                    start_alpha: 0.0,
                    end_alpha: 0.6,
                    color: entity_color(&e.kind),
                };
                renderer.draw_trail(&trail.resample(), &style);
            }
        }

        for e in self.scene.iter() {
            let shape = match e.world_outline() {
                Some(points) => DrawShape::Polygon { points },
                None => DrawShape::Circle {
                    center: e.pos,
                    radius: e.radius(),
                },
            };
            renderer.draw_shape(&shape, entity_color(&e.kind));
        }

        let width = self.camera.viewport.x;
        let hud = Color::WHITE.with_alpha(0.8);
        let remaining = self.round.time_remaining();
        renderer.draw_text(
            &format!("{:02}:{:02}", remaining / 60, remaining % 60),
            Vec2::new(10.0, 10.0),
            HUD_TEXT,
            hud,
            TextAnchor::Left,
        );
        renderer.draw_text(
            &format!("{:06}", self.round.score()),
            Vec2::new(width - 10.0, 10.0),
            HUD_TEXT,
            hud,
            TextAnchor::Right,
        );
        renderer.draw_text(
            &format!("Lives: {}", self.round.lives),
            Vec2::new(10.0, 10.0 + HUD_TEXT * 1.2),
            HUD_TEXT * 0.75,
            hud,
            TextAnchor::Left,
        );
        if self.round.paused {
            renderer.draw_text(
                "PAUSED (P to play)",
                Vec2::new(width / 2.0, self.camera.viewport.y / 2.0),
                HUD_TEXT * 1.5,
                Color::WHITE,
                TextAnchor::Center,
            );
        }
    }

    /// Tear down the world and rebuild the starting sun and planet.
    fn reset(&mut self) {
        self.physics = new_physics(&self.config);
        self.scene.clear();
        self.round = RoundState::new(self.config.rules.game_time, self.config.rules.lives);
        self.camera.pos = Vec2::new(-50.0, -50.0);
        self.camera.ppm = 10.0;
        self.timestep.reset();
        self.start_timers();
        self.timers.pause_all();
        self.contacts.reset();
        self.rng = Rng::new(self.config.seed);
        self.drag = None;
        self.step_once = false;
        self.collisions.clear();
        self.transition = Transition::Continue;
        self.sounds.clear();

        self.spawn_sun();
        let (pos, vel) = (vec2(self.config.planet.position), vec2(self.config.planet.velocity));
        self.spawn_planet(pos, vel);
        self.refit_camera();
        log::info!("new game: {}s, {} lives", self.round.time_remaining(), self.round.lives);
    }

    fn save(&self, out: &mut dyn Write) -> GameResult<()> {
        self.snapshot().write_to(out)
    }

    /// Replace the round with a saved one. On error the current round is kept.
    fn load(&mut self, input: &mut dyn Read) -> GameResult<()> {
        let snap = GameSnapshot::read_from(input)?;
        self.restore(snap);
        log::info!(
            "game loaded: t={:.3}s, score {}, {} entities",
            self.round.time,
            self.round.score(),
            self.scene.len()
        );
        Ok(())
    }

    fn take_transition(&mut self) -> Transition {
        std::mem::take(&mut self.transition)
    }

    fn drain_sounds(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.sounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    fn quiet() -> GameScreen {
        GameScreen::new(GameConfig::default().without_spawns())
    }

    fn key(key_code: u32) -> InputEvent {
        InputEvent::KeyDown { key_code }
    }

    #[test]
    fn reset_builds_starting_world() {
        let game = quiet();
        assert_eq!(game.scene().len(), 2);
        assert_eq!(game.physics().body_count(), 2);
        assert_eq!(game.planet_positions(), vec![Vec2::new(20.0, 20.0)]);
        assert!(game.is_paused());
        assert_eq!(game.round().time_remaining(), 120);
        assert_eq!(game.round().lives, 3);
    }

    #[test]
    fn paused_game_does_not_advance() {
        let mut game = quiet();
        game.advance(1.0);
        assert_eq!(game.round().time, 0.0);
        assert_eq!(game.planet_positions(), vec![Vec2::new(20.0, 20.0)]);
    }

    #[test]
    fn single_step_while_paused() {
        let mut game = quiet();
        game.handle_input(&key(keys::N));
        game.advance(0.5);
        assert!((game.round().time - 0.005).abs() < 1e-6);
        // Only one step even with frame time to spare
        game.advance(0.5);
        assert!((game.round().time - 0.005).abs() < 1e-6);
    }

    #[test]
    fn pause_key_toggles_simulation() {
        let mut game = quiet();
        game.handle_input(&key(keys::P));
        assert!(!game.is_paused());
        game.advance(0.05);
        assert!((game.round().time - 0.05).abs() < 1e-4);
        game.handle_input(&key(keys::P));
        game.advance(0.05);
        assert!((game.round().time - 0.05).abs() < 1e-4);
    }

    #[test]
    fn planet_falls_toward_the_sun() {
        let mut game = quiet();
        game.set_paused(false);
        let start = game.planet_positions()[0];
        for _ in 0..20 {
            game.advance(0.005);
        }
        let now = game.planet_positions()[0];
        assert!(now.length() < start.length());
        assert!(game.round().score() >= 0);
    }

    #[test]
    fn dragging_moves_the_sun() {
        let mut game = quiet();
        let sun_px = game.camera().world_to_screen(Vec2::ZERO);
        game.handle_input(&InputEvent::PointerDown {
            x: sun_px.x + 2.0,
            y: sun_px.y,
        });
        let target = game.camera().world_to_screen(Vec2::new(-10.0, 5.0));
        game.handle_input(&InputEvent::PointerMove {
            x: target.x + 2.0,
            y: target.y,
        });
        game.handle_input(&InputEvent::PointerUp { x: 0.0, y: 0.0 });

        let sun = game.scene().sun().unwrap().pos;
        assert!((sun - Vec2::new(-10.0, 5.0)).length() < 1e-3, "sun at {:?}", sun);

        // Pointer moves after release are ignored
        game.handle_input(&InputEvent::PointerMove { x: 0.0, y: 0.0 });
        assert_eq!(game.scene().sun().unwrap().pos, sun);
    }

    fn drag(game: &mut GameScreen, from: Vec2, to: Vec2) {
        let a = game.camera().world_to_screen(from);
        let b = game.camera().world_to_screen(to);
        game.handle_input(&InputEvent::PointerDown { x: a.x, y: a.y });
        game.handle_input(&InputEvent::PointerMove { x: b.x, y: b.y });
        game.handle_input(&InputEvent::PointerUp { x: b.x, y: b.y });
    }

    #[test]
    fn sun_can_be_dragged_again_while_paused() {
        let mut game = quiet();
        assert!(game.is_paused());
        drag(&mut game, Vec2::ZERO, Vec2::new(-30.0, 10.0));
        drag(&mut game, Vec2::new(-30.0, 10.0), Vec2::new(-30.0, -20.0));

        let sun = game.scene().sun().unwrap().pos;
        assert!((sun - Vec2::new(-30.0, -20.0)).length() < 1e-3, "sun at {:?}", sun);

        // The old spot is empty now
        drag(&mut game, Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert_eq!(game.scene().sun().unwrap().pos, sun);
    }

    #[test]
    fn clicking_empty_space_does_not_drag() {
        let mut game = quiet();
        game.handle_input(&InputEvent::PointerDown { x: 1.0, y: 1.0 });
        game.handle_input(&InputEvent::PointerMove { x: 300.0, y: 200.0 });
        assert_eq!(game.scene().sun().unwrap().pos, Vec2::ZERO);
    }

    #[test]
    fn running_out_of_time_ends_the_round() {
        let mut game = quiet();
        game.round.set_time_remaining(1);
        game.set_paused(false);
        for _ in 0..200 {
            game.advance(0.005);
        }
        assert!(game.round().game_over);
        assert_eq!(
            game.take_transition(),
            Transition::SwitchTo(
                ScreenKind::HighScores,
                ScreenPayload::FinalScore(game.round().score())
            )
        );
        assert!(game.drain_sounds().contains(&sounds::GAME_OVER));

        let t = game.round().time;
        game.advance(1.0);
        assert_eq!(game.round().time, t);
    }

    #[test]
    fn escaped_planet_costs_a_life_and_respawns() {
        let mut game = quiet();
        let planet = game.scene.planets().next().map(|p| p.body).unwrap();
        // Far outside the widest frame, moving away
        game.physics.set_transform(&planet, Vec2::new(500.0, 0.0), 0.0);
        game.physics.set_velocity(&planet, Vec2::new(100.0, 0.0));
        game.set_paused(false);
        game.advance(0.005);

        assert_eq!(game.round().lives, 2);
        assert_eq!(game.scene().planet_count(), 1);
        assert_eq!(game.planet_positions()[0], Vec2::new(20.0, 20.0));
        let sounds = game.drain_sounds();
        assert!(sounds.contains(&sounds::PLANET_LOST));
        assert!(sounds.contains(&sounds::NEW_PLANET));
    }

    #[test]
    fn last_life_lost_is_game_over() {
        let mut game = quiet();
        game.round.lives = 1;
        let planet = game.scene.planets().next().map(|p| p.body).unwrap();
        game.physics.set_transform(&planet, Vec2::new(0.0, -900.0), 0.0);
        game.set_paused(false);
        game.advance(0.005);
        assert!(game.round().game_over);
        assert_eq!(game.scene().planet_count(), 0);
    }

    #[test]
    fn camera_stays_within_bounds() {
        let mut game = quiet();
        game.set_paused(false);
        for _ in 0..50 {
            game.advance(0.016);
            let (w, h) = (game.camera().world_width(), game.camera().world_height());
            let c = &game.config().camera;
            assert!(w >= c.min_width - 1e-3 && w <= c.max_width + 1e-3);
            assert!(h >= c.min_height - 1e-3 && h <= c.max_height + 1e-3);
        }
    }

    #[test]
    fn resize_refits_camera() {
        let mut game = quiet();
        game.handle_input(&InputEvent::Resize {
            width: 1000.0,
            height: 500.0,
        });
        assert_eq!(game.camera().viewport, Vec2::new(1000.0, 500.0));
        assert!((game.camera().aspect() - 2.0).abs() < 1e-6);
        assert!((game.camera().world_width() / game.camera().world_height() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn spawners_fill_the_scene() {
        let mut config = GameConfig::default();
        config.collectibles.spawn_interval = 0.1;
        config.enemies.spawn_interval = 0.25;
        let mut game = GameScreen::new(config);
        game.set_paused(false);
        for _ in 0..10 {
            game.advance(0.03);
        }
        let kinds: Vec<EntityKind> = game.scene().iter().map(|e| e.kind).collect();
        assert!(kinds.iter().any(|k| matches!(k, EntityKind::Collectible(_))));
        assert!(kinds.contains(&EntityKind::Enemy));
    }

    #[test]
    fn save_and_load_resume_the_round() {
        let mut game = quiet();
        game.set_paused(false);
        for _ in 0..30 {
            game.advance(0.01);
        }
        let mut bytes = Vec::new();
        game.save(&mut bytes).unwrap();

        let mut other = quiet();
        other.load(&mut bytes.as_slice()).unwrap();
        assert_eq!(other.round().time, game.round().time);
        assert_eq!(other.round().score(), game.round().score());
        assert_eq!(other.planet_positions(), game.planet_positions());
        assert_eq!(other.camera().pos, game.camera().pos);
        assert!(!other.is_paused());
    }

    #[test]
    fn failed_load_keeps_current_round() {
        let mut game = quiet();
        game.set_paused(false);
        game.advance(0.05);
        let before = game.round().clone();
        let err = game.load(&mut &[1u8, 2, 3][..]).unwrap_err();
        assert!(matches!(err, GameError::CorruptSave { .. }));
        assert_eq!(game.round(), &before);
    }

    #[test]
    fn escape_returns_to_menu_paused() {
        let mut game = quiet();
        game.set_paused(false);
        game.handle_input(&key(keys::ESCAPE));
        assert!(game.is_paused());
        assert_eq!(
            game.take_transition(),
            Transition::SwitchTo(ScreenKind::Menu, ScreenPayload::None)
        );
    }
}
