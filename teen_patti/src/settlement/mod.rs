//! Settlement of chip balances between players once the game is over.
//!
//! Every player's result is netted against the configured starting
//! balance. Players who are down pay players who are up, matched greedily
//! largest debt against largest credit. This doesn't always find the
//! fewest possible payments, but it's deterministic and uses at most one
//! payment less than the number of players who aren't even.
//!
//! ## Example
//!
//! ```
//! use teen_patti::settlement::{settle, Balance};
//! use teen_patti::game::entities::PlayerId;
//!
//! let balances = vec![
//!     Balance::new(PlayerId(1), "alice".into(), 1200),
//!     Balance::new(PlayerId(2), "bob".into(), 800),
//!     Balance::new(PlayerId(3), "carol".into(), 1000),
//! ];
//! let payments = settle(&balances, 1000).unwrap();
//! assert_eq!(payments.len(), 1);
//! assert_eq!(payments[0].from, PlayerId(2));
//! assert_eq!(payments[0].to, PlayerId(1));
//! assert_eq!(payments[0].amount, 200);
//! ```

pub mod calculator;
pub mod models;

pub use calculator::{net_positions, settle};
pub use models::{Balance, Position, Transaction};
