//! Teen Patti turn engine.
//!
//! Every transition borrows the current [`GameState`] and hands back a new
//! one, leaving its input untouched. Failed transitions return an error
//! before anything is built, so callers can hold on to earlier states as
//! an undo history without worrying about them changing underneath.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::archive::{RoundArchive, RoundRecord};
use super::constants::{DEFAULT_BOOT_AMOUNT, DEFAULT_INITIAL_BALANCE, MIN_PLAYERS};
use super::entities::{Action, ActionOutcome, Chips, GameEvent, Player, PlayerId, Stage};
use super::errors::{GameError, GameResult};
use super::ledger::{Ledger, SeatIndex};

/// Game configuration settings
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameSettings {
    /// Chips every player starts the game with. Also the baseline that
    /// settlement nets balances against.
    pub initial_balance: Chips,
    /// Forced bet collected from every player at the start of each hand.
    pub boot_amount: Chips,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_BALANCE, DEFAULT_BOOT_AMOUNT)
    }
}

impl GameSettings {
    #[must_use]
    pub const fn new(initial_balance: Chips, boot_amount: Chips) -> Self {
        Self {
            initial_balance,
            boot_amount,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> GameResult<()> {
        if self.boot_amount <= 0 {
            return Err(GameError::InvalidSettings(
                "boot amount must be greater than 0".to_string(),
            ));
        }

        if self.boot_amount.checked_mul(2).is_none() {
            return Err(GameError::InvalidSettings(
                "boot amount is too large".to_string(),
            ));
        }

        if self.initial_balance < 0 {
            return Err(GameError::InvalidSettings(
                "initial balance can't be negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// Everything needed to describe a table at one point in time.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameState {
    stage: Stage,
    ledger: Ledger,
    turn_idx: SeatIndex,
    /// Seen stake. Blind players bet half of it.
    stake: Chips,
    dealer_idx: SeatIndex,
    hands_dealt: u32,
    settings: GameSettings,
    /// Running log of the game, oldest first.
    events: Vec<GameEvent>,
    archive: RoundArchive,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameSettings::default())
    }
}

impl GameState {
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self {
            stage: Stage::Setup,
            ledger: Ledger::new(),
            turn_idx: 0,
            stake: 0,
            dealer_idx: 0,
            hands_dealt: 0,
            settings,
            events: Vec::new(),
            archive: RoundArchive::new(),
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.ledger.players()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.ledger.seat_of(id).and_then(|idx| self.ledger.get(idx))
    }

    #[must_use]
    pub fn pot(&self) -> Chips {
        self.ledger.pot()
    }

    #[must_use]
    pub fn stake(&self) -> Chips {
        self.stake
    }

    #[must_use]
    pub fn turn_idx(&self) -> SeatIndex {
        self.turn_idx
    }

    #[must_use]
    pub fn dealer_idx(&self) -> SeatIndex {
        self.dealer_idx
    }

    #[must_use]
    pub fn hands_dealt(&self) -> u32 {
        self.hands_dealt
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    #[must_use]
    pub fn archive(&self) -> &RoundArchive {
        &self.archive
    }

    /// Whoever is expected to act. Only set while a hand is being played.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        match self.stage {
            Stage::Playing => self.ledger.get(self.turn_idx),
            _ => None,
        }
    }

    /// Actions the current player may take. Empty outside of play.
    #[must_use]
    pub fn available_actions(&self) -> Vec<Action> {
        self.current_player()
            .map(Player::action_choices)
            .unwrap_or_default()
    }

    /// Players still in the hand, who are eligible to win it.
    #[must_use]
    pub fn contenders(&self) -> Vec<&Player> {
        self.players().iter().filter(|p| !p.is_folded).collect()
    }

    /// Who deals the next hand once this one is over.
    #[must_use]
    pub fn next_dealer(&self) -> Option<&Player> {
        match self.ledger.len() {
            0 => None,
            n => self.ledger.get((self.dealer_idx + 1) % n),
        }
    }

    /// Checks the pot adds up and the turn sits on someone still in the
    /// hand.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if !self.ledger.is_consistent() {
            return false;
        }
        if self.stage != Stage::Playing {
            return true;
        }
        match self.ledger.get(self.turn_idx) {
            Some(player) => !player.is_folded || self.ledger.active_count() <= 1,
            None => false,
        }
    }

    fn require_stage(&self, stage: Stage) -> GameResult<()> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(GameError::InvalidTransition { stage: self.stage })
        }
    }

    pub fn with_player_added(&self, player: Player) -> GameResult<Self> {
        self.require_stage(Stage::Setup)?;
        if player.name.is_empty() {
            return Err(GameError::InvalidName);
        }
        let mut next = self.clone();
        next.ledger.seat_player(player);
        Ok(next)
    }

    pub fn with_player_removed(&self, id: PlayerId) -> GameResult<Self> {
        self.require_stage(Stage::Setup)?;
        let mut next = self.clone();
        next.ledger.unseat_player(id)?;
        Ok(next)
    }

    pub fn with_settings(&self, settings: GameSettings) -> GameResult<Self> {
        self.require_stage(Stage::Setup)?;
        settings.validate()?;
        let mut next = self.clone();
        next.settings = settings;
        Ok(next)
    }

    /// Resets everyone to the starting balance, clears the archive and
    /// deals the first hand.
    pub fn start_game(&self) -> GameResult<Self> {
        self.require_stage(Stage::Setup)?;
        let actual = self.ledger.len();
        if actual < MIN_PLAYERS {
            return Err(GameError::InsufficientPlayers {
                required: MIN_PLAYERS,
                actual,
            });
        }
        self.settings.validate()?;

        let mut next = self.clone();
        next.ledger.reset_balances(self.settings.initial_balance);
        next.archive.clear();
        next.hands_dealt = 0;
        next.events.push(GameEvent::GameStarted);
        info!("starting a game with {actual} players");
        next.deal(true)?;
        Ok(next)
    }

    pub fn start_next_hand(&self) -> GameResult<Self> {
        self.require_stage(Stage::Summary)?;
        let mut next = self.clone();
        next.deal(false)?;
        Ok(next)
    }

    fn deal(&mut self, first_hand: bool) -> GameResult<()> {
        let n = self.ledger.len();
        if n < MIN_PLAYERS {
            return Err(GameError::InsufficientPlayers {
                required: MIN_PLAYERS,
                actual: n,
            });
        }
        self.dealer_idx = if first_hand {
            0
        } else {
            (self.dealer_idx + 1) % n
        };

        let boot = self.settings.boot_amount;
        self.ledger.reset_hand();
        self.ledger.collect_boot(boot)?;
        self.events.push(GameEvent::BootCollected { amount: boot });

        self.stake = boot.checked_mul(2).ok_or(GameError::ChipOverflow)?;
        self.turn_idx = (self.dealer_idx + 1) % n;
        self.hands_dealt += 1;
        self.stage = Stage::Playing;
        info!(
            "hand {} dealt with dealer seat {}, pot {}",
            self.hands_dealt,
            self.dealer_idx,
            self.ledger.pot()
        );
        Ok(())
    }

    /// Applies an action for whoever's turn it is.
    pub fn apply_action(&self, action: Action) -> GameResult<(Self, ActionOutcome)> {
        self.require_stage(Stage::Playing)?;
        let idx = self.turn_idx;
        let player = self.ledger.get(idx).ok_or(GameError::InternalState)?;
        let illegal = player.is_folded
            || (action.requires_unseen() && player.has_seen_cards)
            || (action.requires_seen() && !player.has_seen_cards);
        if illegal {
            return Err(GameError::IllegalAction { action });
        }

        let id = player.id;
        let name = player.name.clone();
        let mut next = self.clone();
        let outcome = match action {
            Action::SeeCards => {
                next.ledger.mark_seen(idx)?;
                next.events.push(GameEvent::SawCards(name));
                ActionOutcome::Pending(id)
            }
            Action::Pack => {
                next.ledger.mark_folded(idx)?;
                next.events.push(GameEvent::Packed(name));
                match next.ledger.sole_active() {
                    Some(winner_idx) => {
                        let record = next.resolve(winner_idx)?;
                        ActionOutcome::Resolved {
                            winner: record.winner_id,
                            pot: record.total_pot,
                        }
                    }
                    None => ActionOutcome::Advanced(next.advance()?),
                }
            }
            Action::Blind | Action::BlindRaise | Action::Chaal | Action::Raise => {
                let amount = action
                    .bet_amount(self.stake)
                    .ok_or(GameError::ChipOverflow)?;
                let stake = action
                    .next_stake(self.stake)
                    .ok_or(GameError::ChipOverflow)?;
                next.ledger.wager(idx, amount)?;
                if action.requires_seen() {
                    next.ledger.mark_seen(idx)?;
                }
                next.stake = stake;
                let event = match action {
                    Action::Blind => GameEvent::Blind(name, amount),
                    Action::BlindRaise => GameEvent::BlindRaise(name, next.stake),
                    Action::Chaal => GameEvent::Chaal(name, amount),
                    _ => GameEvent::Raise(name, next.stake),
                };
                next.events.push(event);
                ActionOutcome::Advanced(next.advance()?)
            }
        };
        debug!("seat {idx} played {action}: {outcome:?}");
        Ok((next, outcome))
    }

    /// Moves the turn to the next player still in the hand.
    fn advance(&mut self) -> GameResult<PlayerId> {
        let next_idx = self
            .ledger
            .next_active_after(self.turn_idx)
            .ok_or(GameError::InternalState)?;
        self.turn_idx = next_idx;
        self.ledger
            .get(next_idx)
            .map(|p| p.id)
            .ok_or(GameError::InternalState)
    }

    pub fn trigger_show(&self) -> GameResult<Self> {
        self.require_stage(Stage::Playing)?;
        let mut next = self.clone();
        next.stage = Stage::WinnerSelection;
        next.events.push(GameEvent::ShowCalled);
        Ok(next)
    }

    pub fn cancel_show(&self) -> GameResult<Self> {
        self.require_stage(Stage::WinnerSelection)?;
        let mut next = self.clone();
        next.stage = Stage::Playing;
        next.events.push(GameEvent::ShowCancelled);
        Ok(next)
    }

    /// Pays the pot to the player the table picked at a show.
    pub fn declare_winner(&self, id: PlayerId) -> GameResult<(Self, RoundRecord)> {
        self.require_stage(Stage::WinnerSelection)?;
        let idx = self.ledger.seat_of(id).ok_or(GameError::UnknownPlayer(id))?;
        if self.ledger.get(idx).is_some_and(|p| p.is_folded) {
            return Err(GameError::IneligibleWinner(id));
        }
        let mut next = self.clone();
        let record = next.resolve(idx)?;
        Ok((next, record))
    }

    fn resolve(&mut self, winner_idx: SeatIndex) -> GameResult<RoundRecord> {
        let winner = self
            .ledger
            .get(winner_idx)
            .ok_or(GameError::InternalState)?;
        let (winner_id, winner_name) = (winner.id, winner.name.clone());
        let pot = self.ledger.pot();
        let record = self
            .archive
            .record(self.ledger.players(), winner_id, pot)
            .clone();
        self.ledger.award_pot(winner_idx)?;
        self.events.push(GameEvent::Won(winner_name, pot));
        self.stage = Stage::Summary;
        info!("{record}");
        Ok(record)
    }

    /// Back to setup. Balances and the archive stay for review; nothing
    /// from the last hand does.
    pub fn end_game(&self) -> GameResult<Self> {
        self.require_stage(Stage::Summary)?;
        let mut next = self.clone();
        next.ledger.reset_hand();
        next.turn_idx = 0;
        next.dealer_idx = 0;
        next.stake = 0;
        next.stage = Stage::Setup;
        next.events.push(GameEvent::GameEnded);
        info!("game ended after {} hands", self.hands_dealt);
        Ok(next)
    }

    /// Tops up a player with chips from outside the game. Allowed at any
    /// point.
    pub fn rebuy(&self, id: PlayerId, amount: Chips) -> GameResult<Self> {
        if amount <= 0 {
            return Err(GameError::InvalidAmount(amount));
        }
        let idx = self.ledger.seat_of(id).ok_or(GameError::UnknownPlayer(id))?;
        let mut next = self.clone();
        next.ledger.credit(idx, amount)?;
        let name = next
            .ledger
            .get(idx)
            .map(|p| p.name.clone())
            .ok_or(GameError::InternalState)?;
        next.events.push(GameEvent::Rebuy(name, amount));
        Ok(next)
    }
}
