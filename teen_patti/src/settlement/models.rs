//! Settlement data models.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::entities::{Chips, Player, PlayerId, PlayerName};

/// A player's balance going into settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub player_id: PlayerId,
    pub name: PlayerName,
    pub balance: Chips,
}

impl Balance {
    pub fn new(player_id: PlayerId, name: PlayerName, balance: Chips) -> Self {
        Self {
            player_id,
            name,
            balance,
        }
    }
}

impl From<&Player> for Balance {
    fn from(player: &Player) -> Self {
        Self::new(player.id, player.name.clone(), player.balance)
    }
}

/// How far a player is from the starting balance. Positive means the
/// player is owed chips, negative means they owe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub player_id: PlayerId,
    pub name: PlayerName,
    pub net: Chips,
}

/// A single payment between two players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub from: PlayerId,
    pub from_name: PlayerName,
    pub to: PlayerId,
    pub to_name: PlayerName,
    pub amount: Chips,
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} {}", self.from_name, self.to_name, self.amount)
    }
}
