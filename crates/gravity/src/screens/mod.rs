//! Screens and the transition signal the outer driver dispatches on.

pub mod credits;
pub mod game;
pub mod high_scores;
pub mod menu;

use std::io::{Read, Write};

use gravity_engine::{InputEvent, Renderer, SoundEvent};

use crate::error::GameResult;

pub use credits::CreditsScreen;
pub use game::GameScreen;
pub use high_scores::HighScoresScreen;
pub use menu::MenuScreen;

/// Key codes (DOM `keyCode` values) the screens react to.
pub mod keys {
    pub const ENTER: u32 = 13;
    pub const ESCAPE: u32 = 27;
    pub const SPACE: u32 = 32;
    pub const UP: u32 = 38;
    pub const DOWN: u32 = 40;
    pub const F: u32 = 70;
    pub const N: u32 = 78;
    pub const P: u32 = 80;
    pub const Q: u32 = 81;
}

/// Sound event ids emitted by the screens.
pub mod sounds {
    use gravity_engine::SoundEvent;

    pub const CLICK: SoundEvent = SoundEvent(1);
    pub const COLLECT: SoundEvent = SoundEvent(2);
    pub const PENALTY: SoundEvent = SoundEvent(3);
    pub const PLANET_LOST: SoundEvent = SoundEvent(4);
    pub const ENEMY_DESTROYED: SoundEvent = SoundEvent(5);
    pub const GAME_OVER: SoundEvent = SoundEvent(6);
    pub const NEW_PLANET: SoundEvent = SoundEvent(7);
}

/// Custom input event kinds sent by the host UI layer.
pub mod events {
    /// A menu button was clicked; `a` carries the item index.
    pub const MENU_SELECT: u32 = 1;
    /// The credits "back" button was clicked.
    pub const BACK: u32 = 2;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    Menu,
    Game,
    HighScores,
    Credits,
}

/// Data handed from the screen being left to the screen being entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenPayload {
    #[default]
    None,
    FinalScore(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    #[default]
    Continue,
    SwitchTo(ScreenKind, ScreenPayload),
    Quit,
}

/// One screen of the game. Only the active screen receives calls.
pub trait Screen {
    fn kind(&self) -> ScreenKind;

    /// Called when the screen becomes active.
    fn enter(&mut self, _payload: ScreenPayload) {}

    fn handle_input(&mut self, event: &InputEvent);

    fn advance(&mut self, dt: f32);

    fn render(&self, renderer: &mut dyn Renderer);

    /// Return to the screen's initial state.
    fn reset(&mut self);

    fn save(&self, _out: &mut dyn Write) -> GameResult<()> {
        Ok(())
    }

    fn load(&mut self, _input: &mut dyn Read) -> GameResult<()> {
        Ok(())
    }

    /// The pending transition; resets it to `Continue`.
    fn take_transition(&mut self) -> Transition;

    /// Sounds triggered since the last call.
    fn drain_sounds(&mut self) -> Vec<SoundEvent> {
        Vec::new()
    }
}
