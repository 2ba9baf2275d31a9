pub mod api;
pub mod core;
pub mod input;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::types::{EntityId, SoundEvent};
pub use core::time::FixedTimestep;
pub use core::timer::{TimerId, TimerRegistry};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::Camera2D;
pub use renderer::traits::{Color, DrawShape, Renderer, TextAnchor, TrailStyle};

#[cfg(feature = "physics")]
pub use core::physics::{
    PhysicsWorld, PhysicsBody, BodyDesc, BodyType,
    ColliderDesc, ColliderMaterial, CollisionPair, SolverGroups,
};

#[cfg(feature = "vectors")]
pub use renderer::vector::{VectorRenderer, VectorVertex, TextCommand};
