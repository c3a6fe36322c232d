//! Unified error type.

use thiserror::Error;

/// The error type returned by sprig's fallible operations.
///
/// Application-level outcomes (404, 400, etc.) are [`Response`](crate::Response)
/// values, not `Error`s. This type covers startup and transport failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address `{addr}`: {source}")]
    InvalidAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("config: {0}")]
    Config(#[from] toml::de::Error),
}
