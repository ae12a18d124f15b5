use super::entities::Chips;

pub const DEFAULT_INITIAL_BALANCE: Chips = 1000;
pub const DEFAULT_BOOT_AMOUNT: Chips = 10;
/// Top-up granted by a rebuy when the caller doesn't name an amount.
pub const DEFAULT_REBUY_AMOUNT: Chips = 1000;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_NAME_LENGTH: usize = 32;
