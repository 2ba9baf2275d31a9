// core/timer.rs
//
// Cooperative countdown/repeat timers driven by simulated time.
// Nothing runs asynchronously: `advance` reports which timers fired and the
// caller reacts synchronously.
//
// Usage:
//   let mut timers = TimerRegistry::new();
//   let tick = timers.set(1.0, true);
//   for id in timers.advance(dt) { if id == tick { ... } }

use std::collections::BTreeMap;

/// Slack for float accumulation so that N steps of `timeout / N` fire on the Nth.
const FIRE_EPSILON: f32 = 1e-4;

/// Handle to a timer for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct Timer {
    timeout: f32,
    periodic: bool,
    elapsed: f32,
}

/// Owns a set of timers and advances them together.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    timers: BTreeMap<TimerId, Timer>,
    next_id: u32,
    paused: bool,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a timer. One-shot timers are dropped after they fire.
    pub fn set(&mut self, timeout: f32, periodic: bool) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            id,
            Timer {
                timeout: timeout.max(f32::EPSILON),
                periodic,
                elapsed: 0.0,
            },
        );
        id
    }

    /// Restart a timer's countdown from zero.
    pub fn reset(&mut self, id: TimerId) {
        if let Some(timer) = self.timers.get_mut(&id) {
            timer.elapsed = 0.0;
        }
    }

    pub fn pause_all(&mut self) {
        self.paused = true;
    }

    pub fn resume_all(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Time accumulated toward the next firing.
    pub fn elapsed(&self, id: TimerId) -> Option<f32> {
        self.timers.get(&id).map(|t| t.elapsed)
    }

    /// Restore a timer's progress (save/load).
    pub fn set_elapsed(&mut self, id: TimerId, elapsed: f32) {
        if let Some(timer) = self.timers.get_mut(&id) {
            timer.elapsed = elapsed.clamp(0.0, timer.timeout);
        }
    }

    /// Advance every timer by `dt` and return the ids that fired, in id order.
    /// A periodic timer appears once per elapsed period.
    pub fn advance(&mut self, dt: f32) -> Vec<TimerId> {
        let mut fired = Vec::new();
        if self.paused {
            return fired;
        }

        let mut finished = Vec::new();
        for (&id, timer) in self.timers.iter_mut() {
            timer.elapsed += dt;
            while timer.elapsed + FIRE_EPSILON >= timer.timeout {
                fired.push(id);
                if timer.periodic {
                    timer.elapsed = (timer.elapsed - timer.timeout).max(0.0);
                } else {
                    finished.push(id);
                    break;
                }
            }
        }

        for id in finished {
            self.timers.remove(&id);
        }
        fired
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Drop every timer and unpause.
    pub fn clear(&mut self) {
        self.timers.clear();
        self.paused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodic_fires_on_exact_step_count() {
        let mut timers = TimerRegistry::new();
        let id = timers.set(1.0, true);

        let mut fired_at = Vec::new();
        for step in 1..=400 {
            if timers.advance(0.005).contains(&id) {
                fired_at.push(step);
            }
        }
        assert_eq!(fired_at, vec![200, 400]);
    }

    #[test]
    fn one_shot_is_removed_after_firing() {
        let mut timers = TimerRegistry::new();
        let id = timers.set(0.5, false);
        assert!(timers.advance(0.25).is_empty());
        assert_eq!(timers.advance(0.25), vec![id]);
        assert_eq!(timers.elapsed(id), None);
        assert!(timers.is_empty());
        assert!(timers.advance(1.0).is_empty());
    }

    #[test]
    fn large_step_fires_periodic_repeatedly() {
        let mut timers = TimerRegistry::new();
        let id = timers.set(1.0, true);
        assert_eq!(timers.advance(3.5), vec![id, id, id]);
        assert!((timers.elapsed(id).unwrap() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn paused_registry_does_not_advance() {
        let mut timers = TimerRegistry::new();
        let id = timers.set(1.0, true);
        timers.pause_all();
        assert!(timers.advance(5.0).is_empty());
        assert_eq!(timers.elapsed(id), Some(0.0));
        assert!(timers.is_paused());
        timers.resume_all();
        assert!(!timers.is_paused());
        assert_eq!(timers.advance(1.0), vec![id]);
    }

    #[test]
    fn reset_restarts_the_countdown() {
        let mut timers = TimerRegistry::new();
        let a = timers.set(1.0, true);
        let b = timers.set(1.0, true);
        timers.advance(0.9);
        timers.reset(a);
        assert_eq!(timers.advance(0.2), vec![b]);
        assert_eq!(timers.len(), 2);
    }

    #[test]
    fn set_elapsed_restores_progress() {
        let mut timers = TimerRegistry::new();
        let id = timers.set(1.0, true);
        timers.set_elapsed(id, 0.75);
        assert_eq!(timers.advance(0.25), vec![id]);
        timers.clear();
        assert!(timers.is_empty());
    }
}
