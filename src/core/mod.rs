pub mod config;
pub mod error;
pub mod types;

pub use config::GameConfig;
pub use error::{Result, UnderlordError};
pub use types::{CreatureId, EntityRef, HeroId, IdAllocator, ImpId, Position, Seconds};
