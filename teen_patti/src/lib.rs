//! # Teen Patti
//!
//! Chip accounting for Teen Patti games played with a real deck and
//! virtual chips. Nobody deals or ranks cards here; players tell the
//! table what they did and who won, and the library keeps the books.
//!
//! ## Architecture
//!
//! A game moves through four stages:
//!
//! - **Setup**: registering players and choosing the boot and starting chips
//! - **Playing**: players act in seat order, betting blind or seen
//! - **WinnerSelection**: a show was called and the table names the winner
//! - **Summary**: the pot has been paid; deal again or end the game
//!
//! Each operation on a [`Session`] derives a fresh [`GameState`] from the
//! current one and keeps the old one around for undo.
//!
//! ## Core Modules
//!
//! - [`game`]: Ledger, turn engine, round archive, undo history and sessions
//! - [`settlement`]: Who pays whom at the end of the night
//!
//! ## Example
//!
//! ```
//! use teen_patti::{Action, Session, Stage};
//!
//! let mut session = Session::default();
//! let alice = session.add_player("alice").unwrap();
//! session.add_player("bob").unwrap();
//! session.start_game().unwrap();
//!
//! // bob sits after the dealer and acts first
//! session.apply_action(Action::Pack).unwrap();
//! assert_eq!(session.state().stage(), Stage::Summary);
//! assert_eq!(session.rounds()[0].winner_id, alice);
//! ```

/// Ledger, turn engine, history and session management.
pub mod game;
pub use game::{
    GameError, GameResult, GameSettings, GameState, Session,
    constants::{self, DEFAULT_BOOT_AMOUNT, DEFAULT_INITIAL_BALANCE, DEFAULT_REBUY_AMOUNT},
    entities::{self, Action, ActionOutcome, Chips, GameEvent, Player, PlayerId, PlayerName, Stage},
};

/// Settlement of balances between players.
pub mod settlement;
