use glam::Vec2;
use gravity_engine::{Color, InputEvent, Renderer, SoundEvent, TextAnchor};

use super::{events, keys, sounds, Screen, ScreenKind, ScreenPayload, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    NewGame,
    HighScores,
    Credits,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::NewGame,
        MenuItem::HighScores,
        MenuItem::Credits,
        MenuItem::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::NewGame => "New Game",
            MenuItem::HighScores => "High Scores",
            MenuItem::Credits => "Credits",
            MenuItem::Quit => "Exit",
        }
    }

    fn transition(self) -> Transition {
        match self {
            MenuItem::NewGame => Transition::SwitchTo(ScreenKind::Game, ScreenPayload::None),
            MenuItem::HighScores => {
                Transition::SwitchTo(ScreenKind::HighScores, ScreenPayload::None)
            }
            MenuItem::Credits => Transition::SwitchTo(ScreenKind::Credits, ScreenPayload::None),
            MenuItem::Quit => Transition::Quit,
        }
    }
}

/// Main menu: a vertical list driven by arrow keys or host buttons.
pub struct MenuScreen {
    selected: usize,
    viewport: Vec2,
    transition: Transition,
    sounds: Vec<SoundEvent>,
}

impl MenuScreen {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            selected: 0,
            viewport,
            transition: Transition::Continue,
            sounds: Vec::new(),
        }
    }

    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.selected]
    }

    fn activate(&mut self, index: usize) {
        let Some(item) = MenuItem::ALL.get(index).copied() else {
            log::warn!("menu selection {} out of range", index);
            return;
        };
        self.selected = index;
        self.sounds.push(sounds::CLICK);
        log::info!("menu: {} selected", item.label());
        self.transition = item.transition();
    }
}

impl Screen for MenuScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Menu
    }

    fn handle_input(&mut self, event: &InputEvent) {
        let n = MenuItem::ALL.len();
        match *event {
            InputEvent::KeyDown { key_code } => match key_code {
                keys::UP => self.selected = (self.selected + n - 1) % n,
                keys::DOWN => self.selected = (self.selected + 1) % n,
                keys::ENTER | keys::SPACE => self.activate(self.selected),
                keys::Q => self.transition = Transition::Quit,
                _ => {}
            },
            InputEvent::Custom { kind, a, .. } if kind == events::MENU_SELECT => {
                if a >= 0.0 {
                    self.activate(a as usize);
                }
            }
            InputEvent::Resize { width, height } => self.viewport = Vec2::new(width, height),
            _ => {}
        }
    }

    fn advance(&mut self, _dt: f32) {}

    fn render(&self, renderer: &mut dyn Renderer) {
        renderer.clear(Color::BLACK);
        let cx = self.viewport.x / 2.0;
        let line = self.viewport.y * 0.1;
        renderer.draw_text(
            "Main Menu",
            Vec2::new(cx, self.viewport.y * 0.1),
            line * 2.0,
            Color::RED,
            TextAnchor::Center,
        );
        for (i, item) in MenuItem::ALL.iter().enumerate() {
            let color = if i == self.selected { Color::RED } else { Color::WHITE };
            renderer.draw_text(
                item.label(),
                Vec2::new(cx, self.viewport.y * 0.45 + i as f32 * line),
                line,
                color,
                TextAnchor::Center,
            );
        }
    }

    fn reset(&mut self) {
        self.selected = 0;
        self.transition = Transition::Continue;
        self.sounds.clear();
    }

    fn take_transition(&mut self) -> Transition {
        std::mem::take(&mut self.transition)
    }

    fn drain_sounds(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.sounds)
    }
}
