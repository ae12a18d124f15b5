//! Chip accounting for the players at the table.
//!
//! The ledger owns the seat-ordered player list and the pot. Seat order is
//! the turn order and is never re-sorted here; anything that wants a
//! leaderboard sorts a copy.

use serde::{Deserialize, Serialize};

use super::entities::{Chips, Player, PlayerId};
use super::errors::{GameError, GameResult};

/// Type alias for positions in the seat order.
pub type SeatIndex = usize;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Ledger {
    players: Vec<Player>,
    /// Chips wagered in the current hand. Always equal to the sum of
    /// every player's `total_bet_in_hand`.
    pot: Chips,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn pot(&self) -> Chips {
        self.pot
    }

    #[must_use]
    pub fn get(&self, idx: SeatIndex) -> Option<&Player> {
        self.players.get(idx)
    }

    #[must_use]
    pub fn seat_of(&self, id: PlayerId) -> Option<SeatIndex> {
        self.players.iter().position(|p| p.id == id)
    }

    pub fn seat_player(&mut self, player: Player) {
        self.players.push(player);
    }

    pub fn unseat_player(&mut self, id: PlayerId) -> GameResult<Player> {
        let idx = self.seat_of(id).ok_or(GameError::UnknownPlayer(id))?;
        Ok(self.players.remove(idx))
    }

    fn player_mut(&mut self, idx: SeatIndex) -> GameResult<&mut Player> {
        self.players.get_mut(idx).ok_or(GameError::InternalState)
    }

    /// Adds to a balance. Negative amounts are allowed and simply debit.
    pub fn credit(&mut self, idx: SeatIndex, amount: Chips) -> GameResult<()> {
        let player = self.player_mut(idx)?;
        player.balance = player
            .balance
            .checked_add(amount)
            .ok_or(GameError::ChipOverflow)?;
        Ok(())
    }

    /// Takes from a balance with no lower bound other than the range of
    /// [`Chips`].
    pub fn debit(&mut self, idx: SeatIndex, amount: Chips) -> GameResult<()> {
        let player = self.player_mut(idx)?;
        player.balance = player
            .balance
            .checked_sub(amount)
            .ok_or(GameError::ChipOverflow)?;
        Ok(())
    }

    /// Moves chips from a player's balance into the pot, tracking the
    /// player's share of the pot alongside. Nothing changes unless all
    /// three totals stay in range.
    pub fn wager(&mut self, idx: SeatIndex, amount: Chips) -> GameResult<()> {
        let pot = self
            .pot
            .checked_add(amount)
            .ok_or(GameError::ChipOverflow)?;
        let player = self.player_mut(idx)?;
        let balance = player
            .balance
            .checked_sub(amount)
            .ok_or(GameError::ChipOverflow)?;
        let total_bet_in_hand = player
            .total_bet_in_hand
            .checked_add(amount)
            .ok_or(GameError::ChipOverflow)?;
        player.balance = balance;
        player.total_bet_in_hand = total_bet_in_hand;
        self.pot = pot;
        Ok(())
    }

    pub fn mark_seen(&mut self, idx: SeatIndex) -> GameResult<()> {
        self.player_mut(idx)?.has_seen_cards = true;
        Ok(())
    }

    pub fn mark_folded(&mut self, idx: SeatIndex) -> GameResult<()> {
        self.player_mut(idx)?.is_folded = true;
        Ok(())
    }

    /// Clears every per-hand field and empties the pot. Balances and
    /// seat order are left alone.
    pub fn reset_hand(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
        self.pot = 0;
    }

    /// Sets every balance back to the same starting amount.
    pub fn reset_balances(&mut self, balance: Chips) {
        for player in &mut self.players {
            player.balance = balance;
        }
    }

    /// Takes the same forced bet from every player, whether or not they
    /// can cover it.
    pub fn collect_boot(&mut self, amount: Chips) -> GameResult<()> {
        for idx in 0..self.players.len() {
            self.wager(idx, amount)?;
        }
        Ok(())
    }

    /// Pays the whole pot to one player. Contributions are cleared with
    /// it, so snapshot them first if they matter.
    pub fn award_pot(&mut self, idx: SeatIndex) -> GameResult<Chips> {
        let pot = self.pot;
        self.credit(idx, pot)?;
        for player in &mut self.players {
            player.total_bet_in_hand = 0;
        }
        self.pot = 0;
        Ok(pot)
    }

    /// Number of players still in the hand.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_folded).count()
    }

    /// The only player left in the hand, if exactly one remains.
    #[must_use]
    pub fn sole_active(&self) -> Option<SeatIndex> {
        let mut active = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_folded)
            .map(|(idx, _)| idx);
        match (active.next(), active.next()) {
            (Some(idx), None) => Some(idx),
            _ => None,
        }
    }

    /// Next unfolded seat after `idx`, wrapping around the table. Looks at
    /// each seat at most once, so it returns `None` instead of spinning
    /// when everyone has folded.
    #[must_use]
    pub fn next_active_after(&self, idx: SeatIndex) -> Option<SeatIndex> {
        let n = self.players.len();
        (1..=n)
            .map(|step| (idx + step) % n)
            .find(|&next| !self.players[next].is_folded)
    }

    /// Sum of every player's stake in the current hand.
    #[must_use]
    pub fn total_contributions(&self) -> Chips {
        self.players.iter().map(|p| p.total_bet_in_hand).sum()
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.pot == self.total_contributions()
    }
}
