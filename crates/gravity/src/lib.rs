pub mod app;
pub mod config;
pub mod contact;
pub mod entity;
pub mod error;
pub mod framing;
pub mod gravity;
pub mod highscores;
pub mod round;
pub mod save;
pub mod scene;
pub mod screens;
pub mod snapshot;
pub mod spawner;
pub mod trail;

// Re-export key types at crate root for convenience
pub use app::App;
pub use config::GameConfig;
pub use entity::{CollectibleKind, Entity, EntityKind};
pub use error::{GameError, GameResult};
pub use highscores::HighScoreTable;
pub use round::RoundState;
pub use scene::Scene;
pub use screens::{GameScreen, Screen, ScreenKind, ScreenPayload, Transition};
pub use snapshot::GameSnapshot;
