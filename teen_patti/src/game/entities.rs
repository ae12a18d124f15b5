use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::constants;

/// Type alias for whole chips. Balances are signed since a player may
/// keep betting after running dry; a negative balance is an IOU that
/// gets squared up during settlement.
pub type Chips = i64;

/// Stable player identifier, unique for the lifetime of a session.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerName(String);

impl PlayerName {
    /// Trims surrounding whitespace and truncates overly long names.
    /// The result may be empty; callers decide whether that's acceptable.
    pub fn new(s: &str) -> Self {
        let name: String = s.trim().chars().take(constants::MAX_NAME_LENGTH).collect();
        Self(name)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for PlayerName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<&str> for PlayerName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PlayerName {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

/// Where the session is in its lifecycle.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Stage {
    /// Registering players and adjusting settings.
    Setup,
    /// A hand is in progress and someone is expected to act.
    Playing,
    /// A show was called; waiting for the table to name the winner.
    WinnerSelection,
    /// The hand is over and the pot has been paid out.
    Summary,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Setup => "setup",
            Self::Playing => "playing",
            Self::WinnerSelection => "winner selection",
            Self::Summary => "summary",
        };
        write!(f, "{repr}")
    }
}

/// Something the acting player can do on their turn.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Action {
    /// Look at one's cards. Free, and the turn stays put.
    SeeCards,
    /// Unseen bet of half the stake.
    Blind,
    /// Unseen bet of the full stake, doubling it for everyone after.
    BlindRaise,
    /// Seen bet of the full stake.
    Chaal,
    /// Seen bet of twice the stake, which becomes the new stake.
    Raise,
    /// Fold out of the hand.
    Pack,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::SeeCards,
        Action::Blind,
        Action::BlindRaise,
        Action::Chaal,
        Action::Raise,
        Action::Pack,
    ];

    /// Whether the action is only open to a player who hasn't looked yet.
    #[must_use]
    pub const fn requires_unseen(self) -> bool {
        matches!(self, Self::SeeCards | Self::Blind | Self::BlindRaise)
    }

    /// Whether the action is only open to a player who has looked.
    #[must_use]
    pub const fn requires_seen(self) -> bool {
        matches!(self, Self::Chaal | Self::Raise)
    }

    /// Chips this action puts into the pot at the given stake, or `None`
    /// if that many chips can't be counted.
    #[must_use]
    pub const fn bet_amount(self, stake: Chips) -> Option<Chips> {
        match self {
            Self::SeeCards | Self::Pack => Some(0),
            Self::Blind => Some(stake / 2),
            Self::BlindRaise | Self::Chaal => Some(stake),
            Self::Raise => stake.checked_mul(2),
        }
    }

    /// Stake in effect after this action is taken at the given stake, or
    /// `None` once doubling would leave the range of [`Chips`].
    #[must_use]
    pub const fn next_stake(self, stake: Chips) -> Option<Chips> {
        match self {
            Self::BlindRaise | Self::Raise => stake.checked_mul(2),
            _ => Some(stake),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::SeeCards => "see cards",
            Self::Blind => "blind",
            Self::BlindRaise => "blind raise",
            Self::Chaal => "chaal",
            Self::Raise => "raise",
            Self::Pack => "pack",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: PlayerName,
    pub balance: Chips,
    pub is_folded: bool,
    pub has_seen_cards: bool,
    /// Chips put into the current hand's pot, boot included.
    pub total_bet_in_hand: Chips,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: PlayerName, balance: Chips) -> Self {
        Self {
            id,
            name,
            balance,
            is_folded: false,
            has_seen_cards: false,
            total_bet_in_hand: 0,
        }
    }

    pub fn reset(&mut self) {
        self.is_folded = false;
        self.has_seen_cards = false;
        self.total_bet_in_hand = 0;
    }

    /// Actions the player may take right now, ignoring whose turn it is.
    #[must_use]
    pub fn action_choices(&self) -> Vec<Action> {
        if self.is_folded {
            return Vec::new();
        }
        Action::ALL
            .into_iter()
            .filter(|action| {
                if action.requires_unseen() {
                    !self.has_seen_cards
                } else if action.requires_seen() {
                    self.has_seen_cards
                } else {
                    true
                }
            })
            .collect()
    }
}

/// Human-readable record of what happened at the table.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GameEvent {
    GameStarted,
    BootCollected { amount: Chips },
    SawCards(PlayerName),
    Blind(PlayerName, Chips),
    BlindRaise(PlayerName, Chips),
    Chaal(PlayerName, Chips),
    Raise(PlayerName, Chips),
    Packed(PlayerName),
    ShowCalled,
    ShowCancelled,
    Won(PlayerName, Chips),
    Rebuy(PlayerName, Chips),
    GameEnded,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::GameStarted => "new game started".to_string(),
            Self::BootCollected { amount } => format!("boot of {amount} collected from everyone"),
            Self::SawCards(name) => format!("{name} has seen their cards"),
            Self::Blind(name, amount) => format!("{name} plays blind ({amount})"),
            Self::BlindRaise(name, stake) => format!("{name} blind raises to {stake}"),
            Self::Chaal(name, amount) => format!("{name} chaals ({amount})"),
            Self::Raise(name, stake) => format!("{name} raises to {stake}"),
            Self::Packed(name) => format!("{name} packed"),
            Self::ShowCalled => "show called".to_string(),
            Self::ShowCancelled => "show cancelled, back to the game".to_string(),
            Self::Won(name, pot) => format!("{name} won the pot of {pot}"),
            Self::Rebuy(name, amount) => format!("{name} bought {amount} more chips"),
            Self::GameEnded => "game ended".to_string(),
        };
        write!(f, "{repr}")
    }
}

/// What happened to the turn after an action was applied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActionOutcome {
    /// The same player is still up (they only looked at their cards).
    Pending(PlayerId),
    /// The turn moved on to this player.
    Advanced(PlayerId),
    /// Everyone else packed, so the last player standing took the pot.
    Resolved { winner: PlayerId, pot: Chips },
}
