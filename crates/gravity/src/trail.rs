use glam::Vec2;

/// Upper bound on points reserved up front; longer histories grow on demand.
const PREALLOC_LIMIT: usize = 4096;

/// A recorded position at a simulation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub time: f32,
}

/// Time-windowed position history for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    /// Number of points handed to the renderer.
    pub size: usize,
    /// Seconds of history kept.
    pub time: f32,
    points: Vec<TrailPoint>,
}

impl Trail {
    pub fn new(size: usize, time: f32) -> Self {
        Self {
            size,
            time,
            points: Vec::with_capacity(size.saturating_mul(8).min(PREALLOC_LIMIT)),
        }
    }

    /// Drop points older than the window, then record `pos` at `now`.
    pub fn update(&mut self, pos: Vec2, now: f32) {
        let cutoff = now - self.time;
        self.points.retain(|p| p.time >= cutoff);
        self.points.push(TrailPoint { pos, time: now });
    }

    /// Stored history, oldest first.
    pub fn points(&self) -> &[TrailPoint] {
        &self.points
    }

    /// Replace the history (snapshot restore). Points must be in time order.
    pub fn set_points(&mut self, points: Vec<TrailPoint>) {
        self.points = points;
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Evenly time-spaced positions for rendering, oldest first.
    ///
    /// Walks back from the newest point in steps of `time / size`, taking the
    /// newest stored point not later than each target time. Each stored point
    /// is used at most once.
    pub fn resample(&self) -> Vec<Vec2> {
        if self.points.len() <= self.size || self.size == 0 {
            return self.points.iter().map(|p| p.pos).collect();
        }

        let step = self.time / self.size as f32;
        let Some(newest) = self.points.last() else {
            return Vec::new();
        };
        let mut target = newest.time;
        let mut out = Vec::with_capacity(self.size);
        // Exclusive upper bound of indices still available.
        let mut end = self.points.len();

        while out.len() < self.size && end > 0 {
            let Some(i) = self.points[..end].iter().rposition(|p| p.time <= target) else {
                break;
            };
            out.push(self.points[i].pos);
            end = i;
            target -= step;
        }

        out.reverse();
        out
    }
}
