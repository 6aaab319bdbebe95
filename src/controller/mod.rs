//! Game controller: the serialised entry point for consumers.
//!
//! - `game_controller`: lock-guarded move/reset handling and phases
//! - `event`: `BoardUpdate` and `GameOver` notifications
//! - `observer`: how notifications reach consumers

pub mod event;
pub mod game_controller;
pub mod observer;

pub use event::{BoardUpdate, CellChange, GameEvent, UpdateKind};
pub use game_controller::{GameController, Phase};
pub use observer::{EventLog, GameObserver};
