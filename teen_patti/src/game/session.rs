//! A single table's session: the live state, its undo history and the
//! player-id counter.
//!
//! Sessions don't share anything with each other, so any number of them
//! can live side by side. A session itself isn't meant to be driven from
//! more than one place at once; callers serialize access to it.

use log::{info, warn};
use std::sync::Arc;

use super::archive::RoundRecord;
use super::entities::{Action, ActionOutcome, Chips, Player, PlayerId, PlayerName};
use super::errors::GameResult;
use super::history::History;
use super::state_machine::{GameSettings, GameState};
use crate::settlement::{self, Balance, Transaction};

#[derive(Debug)]
pub struct Session {
    state: Arc<GameState>,
    history: History,
    next_player_id: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::from_state(GameState::default())
    }
}

impl Session {
    /// Creates an empty session in setup with the given settings.
    pub fn new(settings: GameSettings) -> GameResult<Self> {
        settings.validate()?;
        Ok(Self::from_state(GameState::new(settings)))
    }

    fn from_state(state: GameState) -> Self {
        Self {
            state: Arc::new(state),
            history: History::new(),
            next_player_id: 1,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.state.players()
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.state.current_player()
    }

    #[must_use]
    pub fn available_actions(&self) -> Vec<Action> {
        self.state.available_actions()
    }

    #[must_use]
    pub fn rounds(&self) -> &[RoundRecord] {
        self.state.archive().rounds()
    }

    #[must_use]
    pub fn next_dealer(&self) -> Option<&Player> {
        self.state.next_dealer()
    }

    /// Players ordered by balance, richest first. Seat order is untouched.
    #[must_use]
    pub fn standings(&self) -> Vec<Player> {
        let mut players = self.players().to_vec();
        players.sort_by(|a, b| b.balance.cmp(&a.balance));
        players
    }

    /// Who pays whom if the game were to end right now.
    pub fn settlements(&self) -> GameResult<Vec<Transaction>> {
        let balances: Vec<Balance> = self.players().iter().map(Balance::from).collect();
        settlement::settle(&balances, self.state.settings().initial_balance)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Records the current state and installs the one `transition`
    /// derives from it. Nothing is recorded if the transition fails.
    fn commit<T, F>(&mut self, op: &str, transition: F) -> GameResult<T>
    where
        F: FnOnce(&GameState) -> GameResult<(GameState, T)>,
    {
        let snapshot = Arc::clone(&self.state);
        match transition(&*snapshot) {
            Ok((next, output)) => {
                self.history.snapshot(snapshot);
                self.state = Arc::new(next);
                Ok(output)
            }
            Err(err) => {
                warn!("{op} rejected: {err}");
                Err(err)
            }
        }
    }

    /// Swaps in a new state without touching the history. Only used for
    /// setup bookkeeping, which isn't part of the undo chain.
    fn replace<F>(&mut self, op: &str, transition: F) -> GameResult<()>
    where
        F: FnOnce(&GameState) -> GameResult<GameState>,
    {
        match transition(&*self.state) {
            Ok(next) => {
                self.state = Arc::new(next);
                Ok(())
            }
            Err(err) => {
                warn!("{op} rejected: {err}");
                Err(err)
            }
        }
    }

    pub fn add_player(&mut self, name: &str) -> GameResult<PlayerId> {
        let id = PlayerId(self.next_player_id);
        let player = Player::new(
            id,
            PlayerName::new(name),
            self.state.settings().initial_balance,
        );
        self.replace("add player", |state| state.with_player_added(player))?;
        self.next_player_id += 1;
        info!("added player {id}");
        Ok(id)
    }

    pub fn remove_player(&mut self, id: PlayerId) -> GameResult<()> {
        self.replace("remove player", |state| state.with_player_removed(id))
    }

    pub fn update_settings(&mut self, settings: GameSettings) -> GameResult<()> {
        self.replace("update settings", |state| state.with_settings(settings))
    }

    /// Starts a fresh game. Whatever was undoable before is forgotten,
    /// except for the setup state itself.
    pub fn start_game(&mut self) -> GameResult<()> {
        let next = self
            .state
            .start_game()
            .inspect_err(|err| warn!("start game rejected: {err}"))?;
        self.history.clear();
        self.history.snapshot(Arc::clone(&self.state));
        self.state = Arc::new(next);
        Ok(())
    }

    pub fn start_next_hand(&mut self) -> GameResult<()> {
        self.commit("next hand", |state| Ok((state.start_next_hand()?, ())))
    }

    /// Plays an action for whoever's turn it is.
    pub fn apply_action(&mut self, action: Action) -> GameResult<ActionOutcome> {
        self.commit("action", |state| state.apply_action(action))
    }

    pub fn trigger_show(&mut self) -> GameResult<()> {
        self.commit("show", |state| Ok((state.trigger_show()?, ())))
    }

    pub fn cancel_show(&mut self) -> GameResult<()> {
        self.commit("cancel show", |state| Ok((state.cancel_show()?, ())))
    }

    pub fn declare_winner(&mut self, id: PlayerId) -> GameResult<RoundRecord> {
        self.commit("declare winner", |state| state.declare_winner(id))
    }

    pub fn end_game(&mut self) -> GameResult<()> {
        self.commit("end game", |state| Ok((state.end_game()?, ())))
    }

    pub fn rebuy(&mut self, id: PlayerId, amount: Chips) -> GameResult<()> {
        self.commit("rebuy", |state| Ok((state.rebuy(id, amount)?, ())))
    }

    /// Pushes the current state onto the history without changing it.
    pub fn snapshot(&mut self) {
        self.history.snapshot(Arc::clone(&self.state));
    }

    /// Restores the state from before the last recorded operation.
    pub fn undo(&mut self) -> GameResult<()> {
        self.state = self
            .history
            .undo()
            .inspect_err(|err| warn!("undo rejected: {err}"))?;
        info!("undid last action, {} left", self.history.len());
        Ok(())
    }
}
