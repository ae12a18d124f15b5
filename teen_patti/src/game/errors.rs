//! Game error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::{Action, Chips, PlayerId, Stage};

/// Errors that can occur while driving a session.
///
/// Every error is reported before anything is changed, so a failed
/// operation leaves both the live state and the undo history untouched.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    /// The operation isn't available in the current stage
    #[error("can't do that during {stage}")]
    InvalidTransition { stage: Stage },

    /// The acting player's seen/unseen or folded state rules the action out
    #[error("illegal {action}")]
    IllegalAction { action: Action },

    /// Not enough registered players to deal a hand
    #[error("need {required}+ players, have {actual}")]
    InsufficientPlayers { required: usize, actual: usize },

    /// Nothing left to undo
    #[error("nothing to undo")]
    EmptyHistory,

    /// No player with that id in this session
    #[error("player {0} does not exist")]
    UnknownPlayer(PlayerId),

    /// Only players still in the hand can be named the winner
    #[error("player {0} packed and can't win the pot")]
    IneligibleWinner(PlayerId),

    /// Amount must be positive
    #[error("invalid amount: {0}")]
    InvalidAmount(Chips),

    /// A balance, pot or stake would leave the range chips can be counted in
    #[error("chip count out of range")]
    ChipOverflow,

    /// Player names can't be blank
    #[error("player name can't be blank")]
    InvalidName,

    /// Settings failed validation
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Turn rotation found nobody left to act
    #[error("invalid game state: internal consistency error")]
    InternalState,
}

/// Result type for game operations
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GameError::InvalidTransition {
            stage: Stage::Setup,
        };
        assert_eq!(err.to_string(), "can't do that during setup");

        let err = GameError::IllegalAction {
            action: Action::BlindRaise,
        };
        assert_eq!(err.to_string(), "illegal blind raise");

        let err = GameError::InsufficientPlayers {
            required: 2,
            actual: 1,
        };
        assert_eq!(err.to_string(), "need 2+ players, have 1");

        assert_eq!(
            GameError::UnknownPlayer(PlayerId(9)).to_string(),
            "player #9 does not exist"
        );

        assert_eq!(GameError::ChipOverflow.to_string(), "chip count out of range");
    }
}
