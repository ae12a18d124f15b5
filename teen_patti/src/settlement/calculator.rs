//! Greedy debt matching.

use super::models::{Balance, Position, Transaction};
use crate::game::entities::Chips;
use crate::game::errors::{GameError, GameResult};

/// Nets each balance against the starting stake, in the order given.
///
/// Rebuys aren't tracked per player, so a player who topped up shows as
/// further ahead than they really are. Callers who care should fold rebuys
/// into `initial_stake` themselves.
pub fn net_positions(balances: &[Balance], initial_stake: Chips) -> GameResult<Vec<Position>> {
    balances
        .iter()
        .map(|b| {
            let net = b
                .balance
                .checked_sub(initial_stake)
                .ok_or(GameError::ChipOverflow)?;
            Ok(Position {
                player_id: b.player_id,
                name: b.name.clone(),
                net,
            })
        })
        .collect()
}

struct Party<'a> {
    position: &'a Position,
    remaining: Chips,
}

/// Computes the payments that bring every player back to even.
///
/// An empty result means nobody owes anybody. Fails only when a net
/// position can't be counted in [`Chips`].
pub fn settle(balances: &[Balance], initial_stake: Chips) -> GameResult<Vec<Transaction>> {
    let positions = net_positions(balances, initial_stake)?;

    let mut debtors: Vec<Party> = positions
        .iter()
        .filter(|p| p.net < 0)
        .map(|position| {
            let remaining = position.net.checked_neg().ok_or(GameError::ChipOverflow)?;
            Ok(Party {
                position,
                remaining,
            })
        })
        .collect::<GameResult<_>>()?;
    let mut creditors: Vec<Party> = positions
        .iter()
        .filter(|p| p.net > 0)
        .map(|position| Party {
            position,
            remaining: position.net,
        })
        .collect();

    // Stable sorts, so equal amounts keep seat order.
    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let mut transactions = Vec::with_capacity(debtors.len() + creditors.len());
    let (mut d, mut c) = (0, 0);
    while d < debtors.len() && c < creditors.len() {
        let debtor = &mut debtors[d];
        let creditor = &mut creditors[c];
        let amount = debtor.remaining.min(creditor.remaining);

        if amount > 0 {
            transactions.push(Transaction {
                from: debtor.position.player_id,
                from_name: debtor.position.name.clone(),
                to: creditor.position.player_id,
                to_name: creditor.position.name.clone(),
                amount,
            });
        }

        debtor.remaining -= amount;
        creditor.remaining -= amount;

        if debtor.remaining == 0 {
            d += 1;
        }
        if creditor.remaining == 0 {
            c += 1;
        }
    }

    log::debug!(
        "settled {} players in {} payments",
        balances.len(),
        transactions.len()
    );
    Ok(transactions)
}
