//! Configuration loaded from the environment (and `.env` via dotenvy)

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::pricing::services::{QuoteSettings, DEFAULT_NIGHT_SURCHARGE};

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
    /// ISO currency code attached to every amount
    pub currency: String,
    /// Added to transfers picked up in the night window
    pub night_surcharge: Decimal,
    /// Allow cross-origin calls from any site
    pub cors_allow_any: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            currency: "EUR".to_string(),
            night_surcharge: DEFAULT_NIGHT_SURCHARGE,
            cors_allow_any: true,
        }
    }
}

impl Config {
    /// Read configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; invalid values are logged and ignored
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", lookup("PORT"), defaults.port),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            currency: lookup("PRICING_CURRENCY")
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .unwrap_or(defaults.currency),
            night_surcharge: non_negative_or(
                "NIGHT_SURCHARGE",
                parse_or(
                    "NIGHT_SURCHARGE",
                    lookup("NIGHT_SURCHARGE"),
                    defaults.night_surcharge,
                ),
                defaults.night_surcharge,
            ),
            cors_allow_any: parse_or(
                "CORS_ALLOW_ANY",
                lookup("CORS_ALLOW_ANY"),
                defaults.cors_allow_any,
            ),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn quote_settings(&self) -> QuoteSettings {
        QuoteSettings {
            currency: self.currency.clone(),
            night_surcharge: self.night_surcharge,
        }
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!("Invalid value for {}: {:?}, using default", key, raw);
                default
            }
        },
    }
}

fn non_negative_or(key: &str, value: Decimal, default: Decimal) -> Decimal {
    if value < Decimal::ZERO {
        tracing::warn!("Negative value for {}: {}, using default", key, value);
        return default;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.address(), "0.0.0.0:8080");
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.night_surcharge, dec!(5));
        assert!(config.cors_allow_any);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("PRICING_CURRENCY", " eur "),
            ("NIGHT_SURCHARGE", "7.50"),
            ("CORS_ALLOW_ANY", "false"),
        ]);
        assert_eq!(config.address(), "127.0.0.1:3000");
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.quote_settings().night_surcharge, dec!(7.5));
        assert!(!config.cors_allow_any);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("NIGHT_SURCHARGE", "lots")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.night_surcharge, dec!(5));
    }

    #[test]
    fn test_negative_night_surcharge_falls_back() {
        let config = config_from(&[("NIGHT_SURCHARGE", "-5")]);
        assert_eq!(config.night_surcharge, dec!(5));

        let config = config_from(&[("NIGHT_SURCHARGE", "0")]);
        assert_eq!(config.night_surcharge, dec!(0));
    }
}
