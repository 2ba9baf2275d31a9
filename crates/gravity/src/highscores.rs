//! High-score table and its save file.
//!
//! File layout: a u64 count followed by that many i32 scores, little-endian,
//! best first.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use crate::error::{GameError, GameResult};
use crate::save::{SaveReader, SaveWriter};

/// Best scores, sorted descending, at most `capacity` long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreTable {
    capacity: usize,
    scores: Vec<i32>,
}

impl HighScoreTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            scores: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn scores(&self) -> &[i32] {
        &self.scores
    }

    pub fn best(&self) -> Option<i32> {
        self.scores.first().copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Whether `score` would make it into the table.
    pub fn qualifies(&self, score: i32) -> bool {
        if self.capacity == 0 {
            return false;
        }
        self.scores.len() < self.capacity
            || self.scores.last().map(|&low| score > low).unwrap_or(true)
    }

    /// Insert a score. Returns its rank (1-indexed) if it stayed in the table.
    pub fn insert(&mut self, score: i32) -> Option<usize> {
        // Equal scores keep arrival order
        let pos = self
            .scores
            .iter()
            .position(|&s| score > s)
            .unwrap_or(self.scores.len());
        self.scores.insert(pos, score);
        self.scores.truncate(self.capacity);
        (pos < self.capacity).then_some(pos + 1)
    }

    pub fn clear(&mut self) {
        self.scores.clear();
    }

    pub fn save<W: Write>(&self, out: W) -> GameResult<()> {
        let mut w = SaveWriter::new(out);
        w.count(self.scores.len())?;
        for &score in &self.scores {
            w.i32(score)?;
        }
        w.flush()
    }

    /// Replace the table with the stream's contents.
    ///
    /// A count above capacity is corruption. Stored scores are re-sorted so a
    /// hand-edited file still yields a valid table.
    pub fn load<R: Read>(&mut self, input: R) -> GameResult<()> {
        let mut r = SaveReader::new(input);
        let count = r.count("high score", self.capacity as u64)?;
        let mut scores = Vec::with_capacity(count);
        for _ in 0..count {
            scores.push(r.i32("high score")?);
        }
        scores.sort_unstable_by(|a, b| b.cmp(a));
        self.scores = scores;
        Ok(())
    }

    /// Load from a file. A missing file leaves an empty table.
    pub fn load_from_path(&mut self, path: &Path) -> GameResult<()> {
        match File::open(path) {
            Ok(file) => self.load(BufReader::new(file)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("no high-score file at {}, starting fresh", path.display());
                self.scores.clear();
                Ok(())
            }
            Err(e) => Err(GameError::Io(e)),
        }
    }

    pub fn save_to_path(&self, path: &Path) -> GameResult<()> {
        let file = File::create(path)?;
        self.save(BufWriter::new(file))
    }
}
