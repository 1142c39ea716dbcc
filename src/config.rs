//! Engine configuration, loadable from the environment

use serde::{Deserialize, Serialize};
use std::{env, fmt, str::FromStr};
use tracing::{info, warn};

use crate::settlement::format::CurrencyFormat;

/// What happens to the expenses of a bill when the bill is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeletePolicy {
    /// Remove the bill and all of its expenses
    #[default]
    Cascade,
    /// Refuse to delete a bill that still has expenses
    Restrict,
}

impl FromStr for DeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cascade" => Ok(DeletePolicy::Cascade),
            "restrict" => Ok(DeletePolicy::Restrict),
            other => Err(format!("unknown delete policy '{}'", other)),
        }
    }
}

impl fmt::Display for DeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletePolicy::Cascade => write!(f, "cascade"),
            DeletePolicy::Restrict => write!(f, "restrict"),
        }
    }
}

/// Settings for a [`SettlementEngine`](crate::SettlementEngine)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Currency used for validation, splitting, and display
    pub currency: CurrencyFormat,
    /// Bill deletion policy
    pub delete_policy: DeletePolicy,
}

impl EngineConfig {
    /// Load settings from `SPLITBILL_*` environment variables.
    ///
    /// Missing or malformed values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through `lookup`, which maps a `SPLITBILL_*` key to
    /// its raw value
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mut currency = defaults.currency;
        currency.scale = try_load(&lookup, "SPLITBILL_CURRENCY_SCALE", currency.scale);
        currency.symbol = try_load(&lookup, "SPLITBILL_CURRENCY_SYMBOL", currency.symbol);

        Self {
            currency,
            delete_policy: try_load(&lookup, "SPLITBILL_DELETE_POLICY", defaults.delete_policy),
        }
    }

    pub fn with_delete_policy(mut self, delete_policy: DeletePolicy) -> Self {
        self.delete_policy = delete_policy;
        self
    }

    pub fn with_currency(mut self, currency: CurrencyFormat) -> Self {
        self.currency = currency;
        self
    }

    /// Decimal places of the currency minor unit
    pub fn scale(&self) -> u32 {
        self.currency.scale
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + fmt::Display,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{raw}': {e}, using default: {default}");
            default
        }),
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_delete_policy_parsing() {
        assert_eq!("cascade".parse::<DeletePolicy>(), Ok(DeletePolicy::Cascade));
        assert_eq!(" Restrict ".parse::<DeletePolicy>(), Ok(DeletePolicy::Restrict));
        assert!("archive".parse::<DeletePolicy>().is_err());
        assert_eq!(DeletePolicy::Restrict.to_string(), "restrict");
    }

    #[test]
    fn test_lookup_overrides_and_fallbacks() {
        let vars: HashMap<&str, &str> = [
            ("SPLITBILL_CURRENCY_SCALE", "0"),
            ("SPLITBILL_CURRENCY_SYMBOL", "IDR "),
            ("SPLITBILL_DELETE_POLICY", "bogus"),
        ]
        .into_iter()
        .collect();

        let config = EngineConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.scale(), 0);
        assert_eq!(config.currency.symbol, "IDR ");
        assert_eq!(config.delete_policy, DeletePolicy::Cascade);
    }

    #[test]
    fn test_lookup_with_nothing_set_uses_defaults() {
        let config = EngineConfig::from_lookup(|_| None);
        assert_eq!(config, EngineConfig::default());

        let config = EngineConfig::from_lookup(|key| {
            (key == "SPLITBILL_DELETE_POLICY").then(|| "restrict".to_string())
        });
        assert_eq!(config.delete_policy, DeletePolicy::Restrict);
        assert_eq!(config.scale(), 2);
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::default().with_delete_policy(DeletePolicy::Restrict);
        assert_eq!(config.delete_policy, DeletePolicy::Restrict);
        assert_eq!(config.scale(), 2);
    }
}
