use glam::Vec2;
use gravity_engine::{Color, InputEvent, Renderer, SoundEvent, TextAnchor};

use super::{events, keys, sounds, Screen, ScreenKind, ScreenPayload, Transition};

const LINES: &[&str] = &[
    "Gravity",
    "",
    "Drag the sun to keep your planets in orbit.",
    "Catch the power-ups, dodge the ships.",
    "",
    "Physics by Rapier",
    "Tessellation by Lyon",
];

pub struct CreditsScreen {
    viewport: Vec2,
    /// Seconds since the screen was entered; drives the fade-in.
    shown_for: f32,
    transition: Transition,
    sounds: Vec<SoundEvent>,
}

impl CreditsScreen {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            shown_for: 0.0,
            transition: Transition::Continue,
            sounds: Vec::new(),
        }
    }
}

impl Screen for CreditsScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Credits
    }

    fn enter(&mut self, _payload: ScreenPayload) {
        self.shown_for = 0.0;
    }

    fn handle_input(&mut self, event: &InputEvent) {
        let back = match *event {
            InputEvent::KeyDown { key_code } => {
                matches!(key_code, keys::ENTER | keys::ESCAPE | keys::SPACE)
            }
            InputEvent::Custom { kind, .. } => kind == events::BACK,
            InputEvent::Resize { width, height } => {
                self.viewport = Vec2::new(width, height);
                false
            }
            _ => false,
        };
        if back {
            self.sounds.push(sounds::CLICK);
            self.transition = Transition::SwitchTo(ScreenKind::Menu, ScreenPayload::None);
        }
    }

    fn advance(&mut self, dt: f32) {
        self.shown_for += dt;
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        renderer.clear(Color::BLACK);
        let alpha = self.shown_for.clamp(0.0, 1.0);
        let line = self.viewport.y * 0.06;
        for (i, text) in LINES.iter().enumerate() {
            renderer.draw_text(
                text,
                Vec2::new(self.viewport.x / 2.0, line * (2.0 + i as f32)),
                line,
                Color::WHITE.with_alpha(alpha),
                TextAnchor::Center,
            );
        }
        renderer.draw_text(
            "Back",
            Vec2::new(self.viewport.x / 2.0, self.viewport.y * 0.85),
            line,
            Color::RED,
            TextAnchor::Center,
        );
    }

    fn reset(&mut self) {
        self.shown_for = 0.0;
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
