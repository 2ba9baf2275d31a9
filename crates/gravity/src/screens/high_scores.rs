use std::io::{Read, Write};

use glam::Vec2;
use gravity_engine::{Color, InputEvent, Renderer, SoundEvent, TextAnchor};

use super::{events, keys, sounds, Screen, ScreenKind, ScreenPayload, Transition};
use crate::error::GameResult;
use crate::highscores::HighScoreTable;

/// Shows the table; records the final score of a finished round on entry.
pub struct HighScoresScreen {
    table: HighScoreTable,
    /// Rank (1-indexed) of the score just recorded, for highlighting.
    last_rank: Option<usize>,
    viewport: Vec2,
    transition: Transition,
    sounds: Vec<SoundEvent>,
}

impl HighScoresScreen {
    pub fn new(capacity: usize, viewport: Vec2) -> Self {
        Self {
            table: HighScoreTable::new(capacity),
            last_rank: None,
            viewport,
            transition: Transition::Continue,
            sounds: Vec::new(),
        }
    }

    pub fn table(&self) -> &HighScoreTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut HighScoreTable {
        &mut self.table
    }

    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    fn back_to_menu(&mut self) {
        self.sounds.push(sounds::CLICK);
        self.transition = Transition::SwitchTo(ScreenKind::Menu, ScreenPayload::None);
    }
}

impl Screen for HighScoresScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::HighScores
    }

    fn enter(&mut self, payload: ScreenPayload) {
        self.last_rank = match payload {
            ScreenPayload::FinalScore(score) if self.table.qualifies(score) => {
                let rank = self.table.insert(score);
                if let Some(rank) = rank {
                    log::info!("score {} entered the table at #{}", score, rank);
                }
                rank
            }
            ScreenPayload::FinalScore(score) => {
                log::info!("score {} did not make the table", score);
                None
            }
            ScreenPayload::None => None,
        };
    }

    fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key_code } => match key_code {
                keys::ENTER | keys::ESCAPE | keys::SPACE => self.back_to_menu(),
                keys::Q => self.transition = Transition::Quit,
                _ => {}
            },
            InputEvent::PointerDown { .. } => self.back_to_menu(),
            InputEvent::Custom { kind, .. } if kind == events::BACK => self.back_to_menu(),
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
            "High Scores",
            Vec2::new(cx, line),
            line * 2.0,
            Color::RED,
            TextAnchor::Center,
        );
        for (i, score) in self.table.scores().iter().enumerate() {
            let color = if self.last_rank == Some(i + 1) {
                Color::YELLOW
            } else {
                Color::WHITE
            };
            renderer.draw_text(
                &format!("{:06}", score),
                Vec2::new(cx, line * (3.0 + i as f32)),
                line,
                color,
                TextAnchor::Center,
            );
        }
    }

    /// Clears the highlight only; the table is durable state.
    fn reset(&mut self) {
        self.last_rank = None;
        self.transition = Transition::Continue;
        self.sounds.clear();
    }

    fn save(&self, out: &mut dyn Write) -> GameResult<()> {
        self.table.save(out)
    }

    fn load(&mut self, input: &mut dyn Read) -> GameResult<()> {
        self.table.load(input)
    }

    fn take_transition(&mut self) -> Transition {
        std::mem::take(&mut self.transition)
    }

    fn drain_sounds(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.sounds)
    }
}
