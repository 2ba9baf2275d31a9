pub mod camera;
pub mod traits;
#[cfg(feature = "vectors")]
pub mod vector;

pub use traits::{Color, DrawShape, Renderer, TextAnchor, TrailStyle};
