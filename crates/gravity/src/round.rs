//! Per-round counters: clock, score, countdown, lives.

/// Counters of one game round. Score and time-remaining never go negative.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    /// Simulated seconds since the round started.
    pub time: f32,
    score: i32,
    time_remaining: i32,
    pub lives: u32,
    pub paused: bool,
    pub game_over: bool,
    /// Fractional points not yet moved into `score`.
    pub score_accumulator: f32,
}

impl RoundState {
    pub fn new(game_time: i32, lives: u32) -> Self {
        Self {
            time: 0.0,
            score: 0,
            time_remaining: game_time.max(0),
            lives,
            paused: true,
            game_over: false,
            score_accumulator: 0.0,
        }
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn time_remaining(&self) -> i32 {
        self.time_remaining
    }

    pub fn set_score(&mut self, score: i32) {
        self.score = score.max(0);
    }

    pub fn set_time_remaining(&mut self, seconds: i32) {
        self.time_remaining = seconds.max(0);
    }

    pub fn add_score(&mut self, delta: i32) {
        self.set_score(self.score.saturating_add(delta));
    }

    pub fn add_time(&mut self, delta: i32) {
        self.set_time_remaining(self.time_remaining.saturating_add(delta));
    }

    /// Add fractional points; whole points move into the score.
    pub fn accrue_score(&mut self, points: f32) {
        if !points.is_finite() || points <= 0.0 {
            return;
        }
        self.score_accumulator += points;
        let whole = self.score_accumulator.floor();
        if whole >= 1.0 {
            self.add_score(whole.min(i32::MAX as f32) as i32);
            self.score_accumulator -= whole;
        }
    }

    /// One countdown tick. Returns true when time has run out.
    pub fn tick_countdown(&mut self) -> bool {
        if self.time_remaining > 0 {
            self.time_remaining -= 1;
        }
        self.time_remaining == 0
    }

    pub fn is_out_of_time(&self) -> bool {
        self.time_remaining == 0
    }

    /// Spend one life. Returns true if lives remain.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives > 0
    }
}
