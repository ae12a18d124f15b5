//! Teen Patti table engine - betting rules, chip ledger and undo.
//!
//! This module provides:
//! - The seat-ordered chip ledger and pot
//! - The turn engine, which derives each new state from the last
//! - An archive of finished hands
//! - An undo history of earlier states
//! - The session object collaborators drive

// Submodules
pub mod archive;
pub mod constants;
pub mod entities;
pub mod errors;
pub mod history;
pub mod ledger;
pub mod session;
pub mod state_machine;

pub use archive::{Contribution, RoundArchive, RoundRecord};
pub use errors::{GameError, GameResult};
pub use history::History;
pub use ledger::{Ledger, SeatIndex};
pub use session::Session;
pub use state_machine::{GameSettings, GameState};
