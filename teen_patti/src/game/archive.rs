//! Records of finished hands.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entities::{Chips, Player, PlayerId, PlayerName};
use super::errors::{GameError, GameResult};

/// One player's share of a finished hand's pot.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Contribution {
    pub player_id: PlayerId,
    pub name: PlayerName,
    pub amount: Chips,
    pub is_winner: bool,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoundRecord {
    /// 1-indexed, counting from the start of the game.
    pub round: u32,
    pub winner_id: PlayerId,
    pub winner_name: PlayerName,
    pub total_pot: Chips,
    /// Every seated player's contribution, in seat order.
    pub contributions: Vec<Contribution>,
}

impl fmt::Display for RoundRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "round {}: {} won {}",
            self.round, self.winner_name, self.total_pot
        )
    }
}

/// Append-only list of finished hands. Records can be read but never
/// edited; the archive is only emptied when a new game starts.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoundArchive {
    rounds: Vec<RoundRecord>,
}

impl RoundArchive {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Captures the hand as it stands before the pot is paid out.
    pub(crate) fn record(&mut self, players: &[Player], winner: PlayerId, pot: Chips) -> &RoundRecord {
        let winner_name = players
            .iter()
            .find(|p| p.id == winner)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| PlayerName::new(""));
        let contributions = players
            .iter()
            .map(|p| Contribution {
                player_id: p.id,
                name: p.name.clone(),
                amount: p.total_bet_in_hand,
                is_winner: p.id == winner,
            })
            .collect();
        let round = self.rounds.len() as u32 + 1;
        self.rounds.push(RoundRecord {
            round,
            winner_id: winner,
            winner_name,
            total_pot: pot,
            contributions,
        });
        &self.rounds[self.rounds.len() - 1]
    }

    pub(crate) fn clear(&mut self) {
        self.rounds.clear();
    }

    /// Net chips each player has won or lost across every recorded hand,
    /// in the order players first appear in the archive.
    pub fn net_results(&self) -> GameResult<Vec<(PlayerId, PlayerName, Chips)>> {
        let mut results: Vec<(PlayerId, PlayerName, Chips)> = Vec::new();
        for record in &self.rounds {
            for contribution in &record.contributions {
                let delta = if contribution.is_winner {
                    record.total_pot - contribution.amount
                } else {
                    -contribution.amount
                };
                match results.iter_mut().find(|(id, _, _)| *id == contribution.player_id) {
                    Some((_, _, net)) => {
                        *net = net.checked_add(delta).ok_or(GameError::ChipOverflow)?;
                    }
                    None => results.push((contribution.player_id, contribution.name.clone(), delta)),
                }
            }
        }
        Ok(results)
    }
}
