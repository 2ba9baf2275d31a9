/// Unique identifier for an entity in the scene.
/// Also stored in the physics body's `user_data` so contacts resolve back to entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// A sound trigger emitted by game logic.
/// The numeric value maps to a game-defined sound in the host's audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);
