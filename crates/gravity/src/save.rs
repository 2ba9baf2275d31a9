//! Little-endian binary field codec used by the save files.
//!
//! Fields are written back to back in declaration order with no framing,
//! version tag or checksum. A stream that ends early is reported as
//! `GameError::CorruptSave`, other I/O failures as `GameError::Io`.

use std::io::{ErrorKind, Read, Write};

use glam::Vec2;

use crate::error::{GameError, GameResult};

/// Upper bound on any element count read from a stream.
pub const MAX_COUNT: u64 = 1 << 20;

pub struct SaveWriter<W: Write> {
    inner: W,
}

impl<W: Write> SaveWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn u8(&mut self, v: u8) -> GameResult<()> {
        self.inner.write_all(&[v])?;
        Ok(())
    }

    pub fn bool(&mut self, v: bool) -> GameResult<()> {
        self.u8(v as u8)
    }

    pub fn u32(&mut self, v: u32) -> GameResult<()> {
        self.inner.write_all(&v.to_le_bytes())?;
        Ok(())
    }

    pub fn i32(&mut self, v: i32) -> GameResult<()> {
        self.inner.write_all(&v.to_le_bytes())?;
        Ok(())
    }

    pub fn u64(&mut self, v: u64) -> GameResult<()> {
        self.inner.write_all(&v.to_le_bytes())?;
        Ok(())
    }

    pub fn f32(&mut self, v: f32) -> GameResult<()> {
        self.inner.write_all(&v.to_le_bytes())?;
        Ok(())
    }

    pub fn vec2(&mut self, v: Vec2) -> GameResult<()> {
        self.f32(v.x)?;
        self.f32(v.y)
    }

    /// Element count prefix (u64).
    pub fn count(&mut self, n: usize) -> GameResult<()> {
        self.u64(n as u64)
    }

    /// Presence flag followed by the value when present.
    pub fn opt_f32(&mut self, v: Option<f32>) -> GameResult<()> {
        self.bool(v.is_some())?;
        match v {
            Some(v) => self.f32(v),
            None => Ok(()),
        }
    }

    pub fn flush(&mut self) -> GameResult<()> {
        self.inner.flush()?;
        Ok(())
    }
}

pub struct SaveReader<R: Read> {
    inner: R,
}

impl<R: Read> SaveReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    fn bytes<const N: usize>(&mut self, field: &str) -> GameResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                GameError::corrupt(format!("truncated while reading {}", field))
            } else {
                GameError::Io(e)
            }
        })?;
        Ok(buf)
    }

    pub fn u8(&mut self, field: &str) -> GameResult<u8> {
        Ok(self.bytes::<1>(field)?[0])
    }

    pub fn bool(&mut self, field: &str) -> GameResult<bool> {
        match self.u8(field)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(GameError::corrupt(format!(
                "invalid flag {} for {}",
                other, field
            ))),
        }
    }

    pub fn u32(&mut self, field: &str) -> GameResult<u32> {
        Ok(u32::from_le_bytes(self.bytes(field)?))
    }

    pub fn i32(&mut self, field: &str) -> GameResult<i32> {
        Ok(i32::from_le_bytes(self.bytes(field)?))
    }

    pub fn u64(&mut self, field: &str) -> GameResult<u64> {
        Ok(u64::from_le_bytes(self.bytes(field)?))
    }

    /// Reads an f32 and rejects NaN and infinities.
    pub fn f32(&mut self, field: &str) -> GameResult<f32> {
        let v = f32::from_le_bytes(self.bytes(field)?);
        if !v.is_finite() {
            return Err(GameError::corrupt(format!("non-finite {}", field)));
        }
        Ok(v)
    }

    pub fn vec2(&mut self, field: &str) -> GameResult<Vec2> {
        Ok(Vec2::new(self.f32(field)?, self.f32(field)?))
    }

    /// Element count prefix, rejected above `max`.
    pub fn count(&mut self, field: &str, max: u64) -> GameResult<usize> {
        let n = self.u64(field)?;
        if n > max {
            return Err(GameError::corrupt(format!(
                "{} count {} exceeds {}",
                field, n, max
            )));
        }
        Ok(n as usize)
    }

    pub fn opt_f32(&mut self, field: &str) -> GameResult<Option<f32>> {
        if self.bool(field)? {
            Ok(Some(self.f32(field)?))
        } else {
            Ok(None)
        }
    }
}
