//! Plain-text views of a session.

use std::fmt::Write;

use teen_patti::game::{GameResult, RoundArchive};
use teen_patti::settlement::Transaction;
use teen_patti::{Action, Player, Session, Stage};

/// Number of log lines shown under the table.
const RECENT_EVENTS: usize = 5;

/// Command word a player types for an action.
#[must_use]
pub fn action_keyword(action: Action) -> &'static str {
    match action {
        Action::SeeCards => "see",
        Action::Blind => "blind",
        Action::BlindRaise => "blind-raise",
        Action::Chaal => "chaal",
        Action::Raise => "raise",
        Action::Pack => "pack",
    }
}

fn player_status(player: &Player) -> &'static str {
    if player.is_folded {
        "packed"
    } else if player.has_seen_cards {
        "seen"
    } else {
        "blind"
    }
}

/// The table as it stands: stage, pot, every seat and the latest events.
#[must_use]
pub fn render_table(session: &Session) -> String {
    let state = session.state();
    let mut out = String::new();

    let _ = write!(out, "{}", state.stage());
    if state.stage() != Stage::Setup {
        let _ = write!(
            out,
            " | hand {} | pot {} | stake {}",
            state.hands_dealt(),
            state.pot(),
            state.stake()
        );
    }
    out.push('\n');

    let turn = session.current_player().map(|p| p.id);
    for (seat, player) in state.players().iter().enumerate() {
        let marker = if Some(player.id) == turn { '>' } else { ' ' };
        let _ = write!(
            out,
            "{marker} {:>2}. {:<16} {:>8}",
            seat + 1,
            player.name,
            player.balance
        );
        if state.stage() != Stage::Setup {
            let _ = write!(
                out,
                "  in pot {:>6}  {}",
                player.total_bet_in_hand,
                player_status(player)
            );
            if seat == state.dealer_idx() {
                out.push_str("  (dealer)");
            }
        }
        out.push('\n');
    }

    match state.stage() {
        Stage::Setup => {
            let settings = state.settings();
            let _ = writeln!(
                out,
                "starting balance {}, boot {}",
                settings.initial_balance, settings.boot_amount
            );
        }
        Stage::Playing => {
            let actions: Vec<&str> = session
                .available_actions()
                .into_iter()
                .map(action_keyword)
                .collect();
            let _ = writeln!(out, "actions: {}, or show", actions.join(", "));
        }
        Stage::WinnerSelection => {
            let seats: Vec<String> = state
                .players()
                .iter()
                .enumerate()
                .filter(|(_, p)| !p.is_folded)
                .map(|(seat, p)| format!("{} {}", seat + 1, p.name))
                .collect();
            let _ = writeln!(out, "who won? winner SEAT [{}], or back", seats.join(", "));
        }
        Stage::Summary => {
            if let Some(dealer) = session.next_dealer() {
                let _ = writeln!(out, "next dealer: {}", dealer.name);
            }
            out.push_str(&render_standings(session));
        }
    }

    let events = state.events();
    for event in &events[events.len().saturating_sub(RECENT_EVENTS)..] {
        let _ = writeln!(out, "  - {event}");
    }
    out
}

/// Players ranked by balance.
#[must_use]
pub fn render_standings(session: &Session) -> String {
    let mut out = String::from("standings:\n");
    for (rank, player) in session.standings().iter().enumerate() {
        let _ = writeln!(out, "  {}. {} {}", rank + 1, player.name, player.balance);
    }
    out
}

/// Every finished hand with each player's share of the pot, newest first,
/// followed by what each player has won or lost over all of them.
pub fn render_history(archive: &RoundArchive) -> GameResult<String> {
    if archive.is_empty() {
        return Ok("no hands played yet\n".to_string());
    }
    let mut out = String::new();
    for record in archive.rounds().iter().rev() {
        let _ = writeln!(out, "{record}");
        for contribution in &record.contributions {
            let mark = if contribution.is_winner { "*" } else { " " };
            let _ = writeln!(
                out,
                "   {mark} {:<16} {:>6}",
                contribution.name, contribution.amount
            );
        }
    }
    out.push_str("results:\n");
    for (_, name, net) in archive.net_results()? {
        let _ = writeln!(out, "  {name:<16} {net:>+8}");
    }
    Ok(out)
}

#[must_use]
pub fn render_settlement(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "everyone is even\n".to_string();
    }
    transactions.iter().map(|t| format!("{t}\n")).collect()
}
