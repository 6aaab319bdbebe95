//! Capture rules.
//!
//! - `liberty`: connectivity analysis over same-colour groups
//! - `moves`: move validation, placement, capture resolution and scoring
//! - `snapshot`: consistent copies of a position

pub mod liberty;
pub mod moves;
pub mod snapshot;

pub use liberty::{captured_by, is_surrounded, Surround};
pub use moves::{Game, MoveResult};
pub use snapshot::Snapshot;
