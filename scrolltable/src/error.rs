//! Configuration errors.

use tabledom::LengthError;
use thiserror::Error;

/// A rejected attribute assignment. The previous value stays in effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The scroll setting is not one of `false`, `true`, `x`, `y`, `xy`.
    #[error("invalid scrollable value '{0}' (expected false, true, x, y or xy)")]
    InvalidScrollable(String),

    /// A width or height could not be parsed.
    #[error("invalid {attribute}: {source}")]
    InvalidLength {
        attribute: &'static str,
        #[source]
        source: LengthError,
    },
}
