//! Integration tests for game flow scenarios
//!
//! These tests drive a session through setup, betting, shows and payouts
//! the way a table would.

use teen_patti::{Action, ActionOutcome, GameError, GameSettings, PlayerId, Session, Stage};

fn session_with(names: &[&str], settings: GameSettings) -> (Session, Vec<PlayerId>) {
    let mut session = Session::new(settings).unwrap();
    let ids = names
        .iter()
        .map(|name| session.add_player(name).unwrap())
        .collect();
    (session, ids)
}

fn started(names: &[&str]) -> (Session, Vec<PlayerId>) {
    let (mut session, ids) = session_with(names, GameSettings::new(1000, 10));
    session.start_game().unwrap();
    (session, ids)
}

#[test]
fn test_first_hand_collects_boot() {
    let (session, ids) = started(&["alice", "bob"]);
    let state = session.state();

    assert!(state.players().iter().all(|p| p.balance == 990));
    assert_eq!(state.pot(), 20);
    assert_eq!(state.stake(), 20);
    assert_eq!(state.dealer_idx(), 0);
    assert_eq!(session.current_player().map(|p| p.id), Some(ids[1]));
}

#[test]
fn test_raise_doubles_stake() {
    let (mut session, _) = started(&["alice", "bob"]);
    session.apply_action(Action::SeeCards).unwrap();
    let pot_before = session.state().pot();

    session.apply_action(Action::Raise).unwrap();

    let state = session.state();
    assert_eq!(state.stake(), 40);
    assert_eq!(state.pot(), pot_before + 40);
    assert_eq!(state.players()[1].balance, 990 - 40);
}

#[test]
fn test_two_packs_award_the_last_player() {
    let (mut session, ids) = started(&["alice", "bob", "carol"]);

    // bob acts first after dealer alice
    let outcome = session.apply_action(Action::Pack).unwrap();
    assert_eq!(outcome, ActionOutcome::Advanced(ids[2]));
    let outcome = session.apply_action(Action::Pack).unwrap();
    assert_eq!(
        outcome,
        ActionOutcome::Resolved {
            winner: ids[0],
            pot: 30
        }
    );

    let state = session.state();
    assert_eq!(state.stage(), Stage::Summary);
    assert_eq!(state.pot(), 0);
    assert_eq!(state.players()[0].balance, 990 + 30);

    let rounds = session.rounds();
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].winner_id, ids[0]);
    assert_eq!(rounds[0].total_pot, 30);
    let winners: Vec<_> = rounds[0]
        .contributions
        .iter()
        .filter(|c| c.is_winner)
        .map(|c| c.player_id)
        .collect();
    assert_eq!(winners, vec![ids[0]]);
    assert!(rounds[0].contributions.iter().all(|c| c.amount == 10));
}

#[test]
fn test_undo_on_fresh_session() {
    let mut session = Session::default();
    let before = session.state().clone();
    assert_eq!(session.undo(), Err(GameError::EmptyHistory));
    assert_eq!(session.state(), &before);
}

#[test]
fn test_start_needs_two_players() {
    let (mut session, _) = session_with(&["alice"], GameSettings::default());
    assert_eq!(
        session.start_game(),
        Err(GameError::InsufficientPlayers {
            required: 2,
            actual: 1
        })
    );
    assert_eq!(session.state().stage(), Stage::Setup);
}

#[test]
fn test_betting_before_start() {
    let (mut session, _) = session_with(&["alice", "bob"], GameSettings::default());
    assert_eq!(
        session.apply_action(Action::Blind),
        Err(GameError::InvalidTransition {
            stage: Stage::Setup
        })
    );
}

#[test]
fn test_show_then_declare_winner() {
    let (mut session, ids) = started(&["alice", "bob", "carol"]);
    session.apply_action(Action::Blind).unwrap(); // bob 10
    session.apply_action(Action::BlindRaise).unwrap(); // carol 20, stake 40
    session.apply_action(Action::SeeCards).unwrap(); // alice looks
    session.apply_action(Action::Chaal).unwrap(); // alice 40
    assert_eq!(session.state().pot(), 30 + 10 + 20 + 40);

    session.trigger_show().unwrap();
    assert_eq!(session.state().stage(), Stage::WinnerSelection);
    assert_eq!(
        session.apply_action(Action::Blind),
        Err(GameError::InvalidTransition {
            stage: Stage::WinnerSelection
        })
    );

    let record = session.declare_winner(ids[2]).unwrap();
    assert_eq!(record.total_pot, 100);
    assert_eq!(record.winner_name.as_str(), "carol");

    let balances: Vec<i64> = session.players().iter().map(|p| p.balance).collect();
    assert_eq!(balances, vec![950, 980, 1070]);
    assert!(session.state().is_consistent());
}

#[test]
fn test_cancel_show_resumes_same_turn() {
    let (mut session, ids) = started(&["alice", "bob", "carol"]);
    session.apply_action(Action::Blind).unwrap();
    session.trigger_show().unwrap();
    session.cancel_show().unwrap();
    assert_eq!(session.state().stage(), Stage::Playing);
    assert_eq!(session.current_player().map(|p| p.id), Some(ids[2]));
}

#[test]
fn test_winner_only_from_show() {
    let (mut session, ids) = started(&["alice", "bob"]);
    assert_eq!(
        session.declare_winner(ids[0]),
        Err(GameError::InvalidTransition {
            stage: Stage::Playing
        })
    );
}

#[test]
fn test_dealer_rotates_each_hand() {
    let (mut session, ids) = started(&["alice", "bob", "carol"]);
    let mut dealers = vec![session.state().dealer_idx()];

    for _ in 0..3 {
        session.apply_action(Action::Pack).unwrap();
        session.apply_action(Action::Pack).unwrap();
        assert_eq!(session.state().stage(), Stage::Summary);
        session.start_next_hand().unwrap();
        dealers.push(session.state().dealer_idx());
    }

    assert_eq!(dealers, vec![0, 1, 2, 0]);
    assert_eq!(session.current_player().map(|p| p.id), Some(ids[1]));
    assert_eq!(session.rounds().len(), 3);
    let numbers: Vec<u32> = session.rounds().iter().map(|r| r.round).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn test_boot_can_push_balances_negative() {
    let (mut session, _) = session_with(&["alice", "bob"], GameSettings::new(5, 10));
    session.start_game().unwrap();
    assert!(session.players().iter().all(|p| p.balance == -5));
    assert!(session.state().is_consistent());
}

#[test]
fn test_rebuy_in_every_stage() {
    let (mut session, ids) = session_with(&["alice", "bob"], GameSettings::default());
    session.rebuy(ids[0], 100).unwrap();

    session.start_game().unwrap();
    session.rebuy(ids[0], 100).unwrap();
    session.trigger_show().unwrap();
    session.rebuy(ids[0], 100).unwrap();
    session.declare_winner(ids[1]).unwrap();
    session.rebuy(ids[0], 100).unwrap();

    // start_game resets to the starting balance, so only three rebuys count
    assert_eq!(session.players()[0].balance, 990 + 300);
    assert_eq!(
        session.rebuy(ids[0], -5),
        Err(GameError::InvalidAmount(-5))
    );
    assert_eq!(
        session.rebuy(PlayerId(99), 5),
        Err(GameError::UnknownPlayer(PlayerId(99)))
    );
}

#[test]
fn test_end_game_and_play_again() {
    let (mut session, ids) = started(&["alice", "bob"]);
    session.apply_action(Action::Pack).unwrap();
    session.end_game().unwrap();
    assert_eq!(session.state().stage(), Stage::Setup);

    let carol = session.add_player("carol").unwrap();
    session.remove_player(ids[1]).unwrap();
    session.start_game().unwrap();

    assert_eq!(session.rounds().len(), 0);
    let roster: Vec<PlayerId> = session.players().iter().map(|p| p.id).collect();
    assert_eq!(roster, vec![ids[0], carol]);
    assert!(session.players().iter().all(|p| p.balance == 990));
}

#[test]
fn test_roster_locked_during_play() {
    let (mut session, ids) = started(&["alice", "bob"]);
    assert_eq!(
        session.add_player("carol"),
        Err(GameError::InvalidTransition {
            stage: Stage::Playing
        })
    );
    assert!(session.remove_player(ids[0]).is_err());
    assert_eq!(session.players().len(), 2);
}

#[test]
fn test_settings_changes_apply_to_next_game() {
    let (mut session, _) = session_with(&["alice", "bob"], GameSettings::default());
    session.update_settings(GameSettings::new(500, 25)).unwrap();
    session.start_game().unwrap();
    assert!(session.players().iter().all(|p| p.balance == 475));
    assert_eq!(session.state().stake(), 50);
    assert!(session.update_settings(GameSettings::new(500, 0)).is_err());
}

#[test]
fn test_event_log_reads_like_the_table() {
    let (mut session, _) = started(&["alice", "bob"]);
    session.apply_action(Action::Blind).unwrap();
    session.apply_action(Action::Pack).unwrap();

    let log: Vec<String> = session
        .state()
        .events()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        log,
        vec![
            "new game started",
            "boot of 10 collected from everyone",
            "bob plays blind (10)",
            "alice packed",
            "bob won the pot of 30",
        ]
    );
}

#[test]
fn test_available_actions_follow_seen_state() {
    let (mut session, _) = started(&["alice", "bob"]);
    assert_eq!(
        session.available_actions(),
        vec![Action::SeeCards, Action::Blind, Action::BlindRaise, Action::Pack]
    );
    session.apply_action(Action::SeeCards).unwrap();
    assert_eq!(
        session.available_actions(),
        vec![Action::Chaal, Action::Raise, Action::Pack]
    );
}
