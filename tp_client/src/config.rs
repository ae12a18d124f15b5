//! Client configuration management.
//!
//! Table defaults come from the environment (optionally through a `.env`
//! file) and can be overridden on the command line.

use teen_patti::{
    Chips, DEFAULT_BOOT_AMOUNT, DEFAULT_INITIAL_BALANCE, DEFAULT_REBUY_AMOUNT, GameSettings,
};

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Chips every player starts a game with
    pub initial_balance: Chips,
    /// Forced bet collected from everyone at the start of each hand
    pub boot_amount: Chips,
    /// Chips bought by `rebuy` when no amount is given
    pub rebuy_amount: Chips,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            initial_balance: DEFAULT_INITIAL_BALANCE,
            boot_amount: DEFAULT_BOOT_AMOUNT,
            rebuy_amount: DEFAULT_REBUY_AMOUNT,
        }
    }
}

/// Values given on the command line. They win over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub initial_balance: Option<Chips>,
    pub boot_amount: Option<Chips>,
    pub rebuy_amount: Option<Chips>,
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but isn't a whole number
    pub fn from_env(overrides: &Overrides) -> Result<Self, ConfigError> {
        Self::from_lookup(overrides, |key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`], reading variables through
    /// `lookup` instead of the process environment.
    pub fn from_lookup<F>(overrides: &Overrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            initial_balance: match overrides.initial_balance {
                Some(value) => value,
                None => parse_var_or(&lookup, "TP_INITIAL_BALANCE", defaults.initial_balance)?,
            },
            boot_amount: match overrides.boot_amount {
                Some(value) => value,
                None => parse_var_or(&lookup, "TP_BOOT_AMOUNT", defaults.boot_amount)?,
            },
            rebuy_amount: match overrides.rebuy_amount {
                Some(value) => value,
                None => parse_var_or(&lookup, "TP_REBUY_AMOUNT", defaults.rebuy_amount)?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_balance < 0 {
            return Err(ConfigError::Invalid {
                var: "TP_INITIAL_BALANCE".to_string(),
                reason: "Can't be negative".to_string(),
            });
        }

        if self.boot_amount <= 0 {
            return Err(ConfigError::Invalid {
                var: "TP_BOOT_AMOUNT".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.rebuy_amount <= 0 {
            return Err(ConfigError::Invalid {
                var: "TP_REBUY_AMOUNT".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    #[must_use]
    pub fn game_settings(&self) -> GameSettings {
        GameSettings::new(self.initial_balance, self.boot_amount)
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse a variable with default fallback when it's unset
fn parse_var_or<F>(lookup: &F, key: &str, default: Chips) -> Result<Chips, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("'{value}' is not a whole number"),
        }),
        None => Ok(default),
    }
}
