//! Top-level driver: owns the four screens and routes input, time and
//! transitions to whichever one is active.
//!
//! A host (window loop, web shell, test) pushes input events, calls `tick`
//! once per frame, then `render` and `drain_sounds`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use glam::Vec2;
use gravity_engine::{InputEvent, InputQueue, Renderer, SoundEvent};

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::screens::{
    CreditsScreen, GameScreen, HighScoresScreen, MenuScreen, Screen, ScreenKind, ScreenPayload,
    Transition,
};

pub struct App {
    menu: MenuScreen,
    game: GameScreen,
    high_scores: HighScoresScreen,
    credits: CreditsScreen,
    input: InputQueue,
    active: ScreenKind,
    quit: bool,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        let viewport = Vec2::new(config.window.width, config.window.height);
        let capacity = config.rules.high_scores;
        Self {
            menu: MenuScreen::new(viewport),
            game: GameScreen::new(config),
            high_scores: HighScoresScreen::new(capacity, viewport),
            credits: CreditsScreen::new(viewport),
            input: InputQueue::new(),
            active: ScreenKind::Menu,
            quit: false,
        }
    }

    fn screen(&self, kind: ScreenKind) -> &dyn Screen {
        match kind {
            ScreenKind::Menu => &self.menu,
            ScreenKind::Game => &self.game,
            ScreenKind::HighScores => &self.high_scores,
            ScreenKind::Credits => &self.credits,
        }
    }

    fn screen_mut(&mut self, kind: ScreenKind) -> &mut dyn Screen {
        match kind {
            ScreenKind::Menu => &mut self.menu,
            ScreenKind::Game => &mut self.game,
            ScreenKind::HighScores => &mut self.high_scores,
            ScreenKind::Credits => &mut self.credits,
        }
    }

    pub fn active(&self) -> ScreenKind {
        self.active
    }

    pub fn game(&self) -> &GameScreen {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameScreen {
        &mut self.game
    }

    pub fn high_scores(&self) -> &HighScoresScreen {
        &self.high_scores
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Queue an input event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: deliver queued input, advance the active screen by
    /// `dt` seconds, then apply any transition it requested.
    pub fn tick(&mut self, dt: f32) {
        if self.quit {
            return;
        }

        for event in self.input.drain() {
            // Resizes reach every screen so inactive ones stay laid out.
            if let InputEvent::Resize { .. } = event {
                self.menu.handle_input(&event);
                self.game.handle_input(&event);
                self.high_scores.handle_input(&event);
                self.credits.handle_input(&event);
                continue;
            }
            // Later events in this frame go to whichever screen is active by then.
            let active = self.active;
            self.screen_mut(active).handle_input(&event);
            self.apply_transition();
            if self.quit {
                return;
            }
        }

        let active = self.active;
        self.screen_mut(active).advance(dt);
        self.apply_transition();
    }

    /// Switch screens (or quit) if the active one asked to.
    fn apply_transition(&mut self) {
        let active = self.active;
        match self.screen_mut(active).take_transition() {
            Transition::Continue => {}
            Transition::Quit => {
                log::info!("quit requested from {:?}", active);
                self.quit = true;
            }
            Transition::SwitchTo(kind, payload) => self.switch_to(kind, payload),
        }
    }

    fn switch_to(&mut self, kind: ScreenKind, payload: ScreenPayload) {
        log::debug!("screen {:?} -> {:?}", self.active, kind);
        // Every visit to the game screen starts a new round.
        let screen = self.screen_mut(kind);
        if kind == ScreenKind::Game {
            screen.reset();
        }
        screen.enter(payload);
        self.active = kind;
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        self.screen(self.active).render(renderer);
    }

    /// Sounds from every screen since the last call.
    pub fn drain_sounds(&mut self) -> Vec<SoundEvent> {
        let mut sounds = self.menu.drain_sounds();
        sounds.extend(self.game.drain_sounds());
        sounds.extend(self.high_scores.drain_sounds());
        sounds.extend(self.credits.drain_sounds());
        sounds
    }

    /// Load the high-score table. A corrupt file is logged and replaced by
    /// an empty table; other I/O errors are returned.
    pub fn load_high_scores(&mut self, path: &Path) -> GameResult<()> {
        match self.high_scores.table_mut().load_from_path(path) {
            Ok(()) => {
                log::info!(
                    "loaded {} high scores from {}",
                    self.high_scores.table().len(),
                    path.display()
                );
                Ok(())
            }
            Err(GameError::CorruptSave { reason }) => {
                log::warn!(
                    "ignoring corrupt high scores at {}: {}",
                    path.display(),
                    reason
                );
                self.high_scores.table_mut().clear();
                Ok(())
            }
            other => other,
        }
    }

    pub fn save_high_scores(&self, path: &Path) -> GameResult<()> {
        let result = self.high_scores.table().save_to_path(path);
        match &result {
            Ok(()) => log::info!("high scores saved to {}", path.display()),
            Err(e) => log::warn!("could not save high scores to {}: {}", path.display(), e),
        }
        result
    }

    /// Write the current round.
    pub fn save_game<W: Write>(&self, mut out: W) -> GameResult<()> {
        self.game.save(&mut out)
    }

    /// Replace the current round with a saved one and make it active.
    pub fn load_game<R: Read>(&mut self, mut input: R) -> GameResult<()> {
        self.game.load(&mut input)?;
        self.active = ScreenKind::Game;
        Ok(())
    }

    pub fn save_game_to_path(&self, path: &Path) -> GameResult<()> {
        let file = File::create(path)?;
        self.save_game(BufWriter::new(file))?;
        log::info!("game saved to {}", path.display());
        Ok(())
    }

    pub fn load_game_from_path(&mut self, path: &Path) -> GameResult<()> {
        let file = File::open(path)?;
        self.load_game(BufReader::new(file))
    }
}
