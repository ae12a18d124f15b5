use std::fmt;
use teen_patti::{Action, Chips};

/// A line typed at the table prompt.
///
/// Players are referred to by their 1-based seat number as shown by
/// `status`, which is easier to read off the screen than an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Seat a new player.
    Add(String),
    /// Remove the player in this seat.
    Remove(usize),
    /// Change the starting balance and boot for the next game.
    Settings { initial_balance: Chips, boot: Chips },
    /// Start a new game with everyone seated.
    Start,
    /// Play an action for whoever's turn it is.
    Act(Action),
    /// Call a show.
    Show,
    /// Cancel a show and go back to betting.
    Back,
    /// Name the winner of a show by seat.
    Winner(usize),
    /// Deal the next hand.
    Next,
    /// End the game and go back to setup.
    End,
    /// Buy more chips for a seat. Without an amount the configured
    /// rebuy amount is used.
    Rebuy { seat: usize, amount: Option<Chips> },
    Undo,
    Status { json: bool },
    History,
    Settle,
    Help,
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A command was given without a required argument.
    MissingArgument { usage: &'static str },
    /// A seat number or amount that isn't a positive whole number.
    InvalidNumber(String),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument { usage } => write!(f, "Missing argument. Usage: '{usage}'"),
            Self::InvalidNumber(value) => write!(
                f,
                "Invalid number '{value}'. Must be a positive whole number (e.g., 'winner 2')"
            ),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{cmd}'. Type 'help' to see available commands"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a command string into a [`Command`].
///
/// # Examples
///
/// ```
/// use tp_client::commands::{Command, parse_command};
/// use teen_patti::Action;
///
/// assert_eq!(parse_command("blind"), Ok(Command::Act(Action::Blind)));
/// assert_eq!(parse_command("winner 2"), Ok(Command::Winner(2)));
/// assert_eq!(
///     parse_command("rebuy 1 500"),
///     Ok(Command::Rebuy { seat: 1, amount: Some(500) })
/// );
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();

    // Try single-word commands first
    match trimmed {
        "start" => return Ok(Command::Start),
        "see" => return Ok(Command::Act(Action::SeeCards)),
        "blind" => return Ok(Command::Act(Action::Blind)),
        "blind-raise" => return Ok(Command::Act(Action::BlindRaise)),
        "chaal" => return Ok(Command::Act(Action::Chaal)),
        "raise" => return Ok(Command::Act(Action::Raise)),
        "pack" => return Ok(Command::Act(Action::Pack)),
        "show" => return Ok(Command::Show),
        "back" => return Ok(Command::Back),
        "next" => return Ok(Command::Next),
        "end" => return Ok(Command::End),
        "undo" => return Ok(Command::Undo),
        "status" => return Ok(Command::Status { json: false }),
        "history" => return Ok(Command::History),
        "settle" => return Ok(Command::Settle),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    // Parse multi-word commands
    let parts: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    match parts.first() {
        Some(&"add") => parse_add_command(trimmed),
        Some(&"remove") => Ok(Command::Remove(seat_arg(&parts, "remove SEAT")?)),
        Some(&"winner") => Ok(Command::Winner(seat_arg(&parts, "winner SEAT")?)),
        Some(&"rebuy") => parse_rebuy_command(&parts),
        Some(&"settings") => parse_settings_command(&parts),
        Some(&"status") if parts.get(1) == Some(&"--json") => Ok(Command::Status { json: true }),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

/// Parse an add command: "add NAME". Names may contain spaces.
fn parse_add_command(trimmed: &str) -> Result<Command, ParseError> {
    let name = trimmed.strip_prefix("add").unwrap_or_default().trim();
    if name.is_empty() {
        return Err(ParseError::MissingArgument { usage: "add NAME" });
    }
    Ok(Command::Add(name.to_string()))
}

/// Parse a rebuy command: "rebuy SEAT [AMOUNT]"
fn parse_rebuy_command(parts: &[&str]) -> Result<Command, ParseError> {
    let seat = seat_arg(parts, "rebuy SEAT [AMOUNT]")?;
    let amount = parts.get(2).map(|value| positive(value)).transpose()?;
    Ok(Command::Rebuy { seat, amount })
}

/// Parse a settings command: "settings INITIAL_BALANCE BOOT"
fn parse_settings_command(parts: &[&str]) -> Result<Command, ParseError> {
    const USAGE: &str = "settings INITIAL_BALANCE BOOT";
    match (parts.get(1), parts.get(2)) {
        (Some(initial), Some(boot)) => {
            let initial_balance = initial
                .parse::<Chips>()
                .ok()
                .filter(|amount| *amount >= 0)
                .ok_or_else(|| ParseError::InvalidNumber(initial.to_string()))?;
            Ok(Command::Settings {
                initial_balance,
                boot: positive(boot)?,
            })
        }
        _ => Err(ParseError::MissingArgument { usage: USAGE }),
    }
}

fn seat_arg(parts: &[&str], usage: &'static str) -> Result<usize, ParseError> {
    let value = parts.get(1).ok_or(ParseError::MissingArgument { usage })?;
    value
        .parse::<usize>()
        .ok()
        .filter(|seat| *seat > 0)
        .ok_or_else(|| ParseError::InvalidNumber(value.to_string()))
}

fn positive(value: &str) -> Result<Chips, ParseError> {
    value
        .parse::<Chips>()
        .ok()
        .filter(|amount| *amount > 0)
        .ok_or_else(|| ParseError::InvalidNumber(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Single-word command tests ===

    #[test]
    fn test_parse_betting_actions() {
        let cases = [
            ("see", Action::SeeCards),
            ("blind", Action::Blind),
            ("blind-raise", Action::BlindRaise),
            ("chaal", Action::Chaal),
            ("raise", Action::Raise),
            ("pack", Action::Pack),
        ];
        for (input, action) in cases {
            assert_eq!(parse_command(input), Ok(Command::Act(action)));
        }
    }

    #[test]
    fn test_parse_table_commands() {
        assert_eq!(parse_command("start"), Ok(Command::Start));
        assert_eq!(parse_command("show"), Ok(Command::Show));
        assert_eq!(parse_command("back"), Ok(Command::Back));
        assert_eq!(parse_command("next"), Ok(Command::Next));
        assert_eq!(parse_command("end"), Ok(Command::End));
        assert_eq!(parse_command("undo"), Ok(Command::Undo));
        assert_eq!(parse_command("settle"), Ok(Command::Settle));
        assert_eq!(parse_command("history"), Ok(Command::History));
    }

    #[test]
    fn test_parse_help_and_quit_aliases() {
        assert_eq!(parse_command("help"), Ok(Command::Help));
        assert_eq!(parse_command("?"), Ok(Command::Help));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_command("status"), Ok(Command::Status { json: false }));
        assert_eq!(
            parse_command("status --json"),
            Ok(Command::Status { json: true })
        );
        assert!(matches!(
            parse_command("status --yaml"),
            Err(ParseError::UnrecognizedCommand(_))
        ));
    }

    // === Whitespace handling ===

    #[test]
    fn test_parse_with_surrounding_whitespace() {
        assert_eq!(parse_command("  pack  "), Ok(Command::Act(Action::Pack)));
        assert_eq!(parse_command(" winner   3 "), Ok(Command::Winner(3)));
    }

    // === Argument parsing ===

    #[test]
    fn test_parse_add_keeps_spaces_in_name() {
        assert_eq!(
            parse_command("add  Mary Ann "),
            Ok(Command::Add("Mary Ann".to_string()))
        );
    }

    #[test]
    fn test_parse_add_without_name() {
        assert!(matches!(
            parse_command("add"),
            Err(ParseError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_parse_remove_and_winner() {
        assert_eq!(parse_command("remove 2"), Ok(Command::Remove(2)));
        assert_eq!(parse_command("winner 1"), Ok(Command::Winner(1)));
        assert!(matches!(
            parse_command("winner"),
            Err(ParseError::MissingArgument {
                usage: "winner SEAT"
            })
        ));
    }

    #[test]
    fn test_parse_seat_zero_is_invalid() {
        assert_eq!(
            parse_command("winner 0"),
            Err(ParseError::InvalidNumber("0".to_string()))
        );
    }

    #[test]
    fn test_parse_rebuy() {
        assert_eq!(
            parse_command("rebuy 2"),
            Ok(Command::Rebuy {
                seat: 2,
                amount: None
            })
        );
        assert_eq!(
            parse_command("rebuy 2 250"),
            Ok(Command::Rebuy {
                seat: 2,
                amount: Some(250)
            })
        );
    }

    #[test]
    fn test_parse_rebuy_with_invalid_amount() {
        assert!(matches!(
            parse_command("rebuy 1 -50"),
            Err(ParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            parse_command("rebuy 1 10.5"),
            Err(ParseError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_parse_settings() {
        assert_eq!(
            parse_command("settings 500 5"),
            Ok(Command::Settings {
                initial_balance: 500,
                boot: 5
            })
        );
        assert!(matches!(
            parse_command("settings 500 0"),
            Err(ParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            parse_command("settings 500"),
            Err(ParseError::MissingArgument { .. })
        ));
    }

    // === Error cases ===

    #[test]
    fn test_parse_unrecognized_command() {
        assert!(matches!(
            parse_command("fold"),
            Err(ParseError::UnrecognizedCommand(_))
        ));
        assert!(matches!(
            parse_command(""),
            Err(ParseError::UnrecognizedCommand(_))
        ));
    }

    // === Error message tests ===

    #[test]
    fn test_error_message_invalid_number() {
        let msg = ParseError::InvalidNumber("abc".to_string()).to_string();
        assert!(msg.contains("Invalid number"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_error_message_unrecognized_command() {
        let msg = ParseError::UnrecognizedCommand("xyz".to_string()).to_string();
        assert!(msg.contains("xyz"));
        assert!(msg.contains("help"));
    }
}
