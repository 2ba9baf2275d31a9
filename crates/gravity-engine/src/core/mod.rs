#[cfg(feature = "physics")]
pub mod physics;
pub mod time;
pub mod timer;
