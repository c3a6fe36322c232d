//! Server configuration.
//!
//! Loaded from a TOML document or from `SPRIG_*` environment variables.
//! Every field has a default, so an empty document is a valid config.
//!
//! ```toml
//! addr = "127.0.0.1:8080"
//! log  = "sprig=debug,info"
//! ```

use serde::Deserialize;

use crate::error::Error;

const DEFAULT_ADDR: &str = "0.0.0.0:9999";
const DEFAULT_LOG: &str = "info";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// `host:port` to listen on.
    pub addr: String,
    /// `tracing` filter directive for binaries that install a subscriber.
    pub log: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { addr: DEFAULT_ADDR.to_owned(), log: DEFAULT_LOG.to_owned() }
    }
}

impl ServerConfig {
    pub fn from_toml(doc: &str) -> Result<Self, Error> {
        Ok(toml::from_str(doc)?)
    }

    /// Reads `SPRIG_ADDR` and `SPRIG_LOG`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            addr: var("SPRIG_ADDR").unwrap_or(defaults.addr),
            log: var("SPRIG_LOG").unwrap_or(defaults.log),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        assert_eq!(ServerConfig::from_toml("").unwrap(), ServerConfig::default());
    }

    #[test]
    fn toml_overrides_fields() {
        let config = ServerConfig::from_toml(r#"addr = "127.0.0.1:8080""#).unwrap();
        assert_eq!(config.addr, "127.0.0.1:8080");
        assert_eq!(config.log, "info");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = ServerConfig::from_toml("port = 80").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn env_lookup_falls_back_per_field() {
        let config = ServerConfig::from_lookup(|key| {
            (key == "SPRIG_LOG").then(|| "debug".to_owned())
        });
        assert_eq!(config.addr, "0.0.0.0:9999");
        assert_eq!(config.log, "debug");
    }
}
