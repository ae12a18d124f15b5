//! Drives a [`Session`] from parsed commands.

use anyhow::{Context, Result, anyhow};
use log::debug;
use teen_patti::{ActionOutcome, GameSettings, PlayerId, Session, Stage};

use crate::commands::{Command, parse_command};
use crate::config::ClientConfig;
use crate::view;

pub const COMMANDS_HELP: &str = "\
setup:     add NAME | remove SEAT | settings BALANCE BOOT | start
betting:   see | blind | blind-raise | chaal | raise | pack | show
show:      winner SEAT | back
after:     next | end
any time:  rebuy SEAT [AMOUNT] | undo | status [--json] | history | settle | help | quit
";

/// What the prompt loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this and keep reading.
    Print(String),
    Quit,
}

pub struct App {
    session: Session,
    config: ClientConfig,
}

impl App {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let session = Session::new(config.game_settings()).context("Invalid table settings")?;
        Ok(Self { session, config })
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Parses and runs one line. Errors are turned into a message for the
    /// table rather than ending the loop.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        if line.trim().is_empty() {
            return Reply::Print(String::new());
        }
        let result = parse_command(line)
            .map_err(anyhow::Error::from)
            .and_then(|command| self.execute(command));
        match result {
            Ok(reply) => reply,
            Err(err) => Reply::Print(format!("error: {err:#}\n")),
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        debug!("executing {command:?}");
        let message = match command {
            Command::Add(name) => {
                let id = self.session.add_player(&name)?;
                let player = self.session.state().player(id).map(|p| p.name.to_string());
                format!("seated {}", player.unwrap_or(name))
            }
            Command::Remove(seat) => {
                let id = self.seat_id(seat)?;
                self.session.remove_player(id)?;
                format!("seat {seat} is empty")
            }
            Command::Settings {
                initial_balance,
                boot,
            } => {
                self.session
                    .update_settings(GameSettings::new(initial_balance, boot))?;
                self.table()
            }
            Command::Start => {
                self.session.start_game()?;
                self.table()
            }
            Command::Act(action) => match self.session.apply_action(action)? {
                ActionOutcome::Resolved { pot, .. } => {
                    format!("last one standing takes {pot}\n{}", self.table())
                }
                ActionOutcome::Pending(_) | ActionOutcome::Advanced(_) => self.table(),
            },
            Command::Show => {
                self.session.trigger_show()?;
                self.table()
            }
            Command::Back => {
                self.session.cancel_show()?;
                self.table()
            }
            Command::Winner(seat) => {
                let id = self.seat_id(seat)?;
                let record = self.session.declare_winner(id)?;
                format!("{record}\n{}", self.table())
            }
            Command::Next => {
                self.session.start_next_hand()?;
                self.table()
            }
            Command::End => {
                self.session.end_game()?;
                let settle = view::render_settlement(&self.session.settlements()?);
                format!("{}{settle}", self.table())
            }
            Command::Rebuy { seat, amount } => {
                let id = self.seat_id(seat)?;
                let amount = amount.unwrap_or(self.config.rebuy_amount);
                self.session.rebuy(id, amount)?;
                self.table()
            }
            Command::Undo => {
                self.session.undo()?;
                self.table()
            }
            Command::Status { json: false } => self.table(),
            Command::Status { json: true } => {
                let mut json = serde_json::to_string_pretty(self.session.state())
                    .context("Failed to serialize table state")?;
                json.push('\n');
                json
            }
            Command::History => view::render_history(self.session.state().archive())?,
            Command::Settle => format!(
                "{}{}",
                view::render_standings(&self.session),
                view::render_settlement(&self.session.settlements()?)
            ),
            Command::Help => COMMANDS_HELP.to_string(),
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Print(message))
    }

    fn table(&self) -> String {
        view::render_table(&self.session)
    }

    fn seat_id(&self, seat: usize) -> Result<PlayerId> {
        seat.checked_sub(1)
            .and_then(|idx| self.session.players().get(idx))
            .map(|p| p.id)
            .ok_or_else(|| anyhow!("nobody sits in seat {seat}"))
    }

    /// Whether quitting now would throw away a game in progress.
    #[must_use]
    pub fn game_in_progress(&self) -> bool {
        self.session.state().stage() != Stage::Setup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with(lines: &[&str]) -> App {
        let mut app = App::new(ClientConfig::default()).unwrap();
        for line in lines {
            app.handle_line(line);
        }
        app
    }

    fn printed(reply: Reply) -> String {
        match reply {
            Reply::Print(text) => text,
            Reply::Quit => panic!("expected output"),
        }
    }

    #[test]
    fn test_full_hand_by_text() {
        let mut app = app_with(&["add alice", "add bob", "add carol", "start", "blind"]);
        assert_eq!(app.session().state().pot(), 40);

        let out = printed(app.handle_line("show"));
        assert!(out.contains("who won?"));
        let out = printed(app.handle_line("winner 3"));
        assert!(out.starts_with("round 1: carol won 40"));
        assert_eq!(app.session().players()[2].balance, 1030);
    }

    #[test]
    fn test_errors_are_printed_not_fatal() {
        let mut app = app_with(&["add alice"]);
        let out = printed(app.handle_line("start"));
        assert!(out.starts_with("error: need 2+ players, have 1"));
        let out = printed(app.handle_line("winner 9"));
        assert!(out.starts_with("error:"));
        let out = printed(app.handle_line("dance"));
        assert!(out.contains("Unrecognized command 'dance'"));
    }

    #[test]
    fn test_rebuy_uses_configured_amount() {
        let mut app = app_with(&["add alice", "add bob", "start"]);
        app.handle_line("rebuy 1");
        assert_eq!(app.session().players()[0].balance, 990 + 1000);
        app.handle_line("rebuy 2 5");
        assert_eq!(app.session().players()[1].balance, 995);
    }

    #[test]
    fn test_rebuy_past_chip_range_is_refused() {
        // alice sits down with 1000 and tops up to the most chips there are
        let top_up = format!("rebuy 1 {}", i64::MAX - 1000);
        let mut app = app_with(&["add alice", "add bob", top_up.as_str()]);
        assert_eq!(app.session().players()[0].balance, i64::MAX);
        let out = printed(app.handle_line("rebuy 1 1"));
        assert_eq!(out, "error: chip count out of range\n");
        assert_eq!(app.session().players()[0].balance, i64::MAX);

        let out = printed(app.handle_line(&format!("settings 0 {}", i64::MAX / 2 + 1)));
        assert!(out.starts_with("error: invalid settings: boot amount is too large"));
    }

    #[test]
    fn test_undo_by_text() {
        let mut app = app_with(&["add alice", "add bob", "start", "blind"]);
        app.handle_line("undo");
        assert_eq!(app.session().state().pot(), 20);
        let out = printed(app.handle_line("undo"));
        assert!(out.starts_with("setup"));
        let out = printed(app.handle_line("undo"));
        assert_eq!(out, "error: nothing to undo\n");
    }

    #[test]
    fn test_status_json() {
        let mut app = app_with(&["add alice", "add bob", "start"]);
        let out = printed(app.handle_line("status --json"));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["stage"], "Playing");
        assert_eq!(value["ledger"]["pot"], 20);
    }

    #[test]
    fn test_settings_then_start() {
        let mut app = app_with(&["add alice", "add bob", "settings 200 20", "start"]);
        assert!(app.session().players().iter().all(|p| p.balance == 180));
        assert!(app.game_in_progress());
        let out = printed(app.handle_line("end"));
        assert!(out.starts_with("error:"));
        app.handle_line("pack");
        let out = printed(app.handle_line("end"));
        assert!(out.contains("bob pays alice 20"));
        assert!(!app.game_in_progress());
    }

    #[test]
    fn test_quit() {
        let mut app = app_with(&[]);
        assert_eq!(app.handle_line("quit"), Reply::Quit);
    }
}
