//! One simulated dungeon level.
//!
//! The runtime supplies the collaborators `game-core` only sees through traits
//! and drives the turn loop around them:
//! - [`map`]: terrain plus the per-tile entity index ([`AreaMap`])
//! - [`message`]: bounded narration log ([`MessageLog`])
//! - [`session`]: player commands, turn cycles and persistence snapshots
//! - [`scenario`]: the demo level used by the client
//! - [`config`]: environment-driven settings
pub mod config;
pub mod error;
pub mod map;
pub mod message;
pub mod scenario;
pub mod session;

pub use config::{MapSize, RuntimeConfig};
pub use error::{Result, RuntimeError};
pub use map::AreaMap;
pub use message::MessageLog;
pub use scenario::demo;
pub use session::{Command, Session, TurnReport, WorldSnapshot};
