use std::io;

use thiserror::Error;

/// A specialized `Result` type where the error is hard-wired to [`YeastError`].
pub type YeastResult<T> = Result<T, YeastError>;

/// Out-of-band failures surfaced by the public API.
///
/// Parse-level problems (unexpected characters, malformed byte sequences the
/// decoder can step past, commits outside their choice scope) are *not*
/// errors in this sense: they are reported in-band as `ERROR` and `UNPARSED`
/// tokens and the token stream keeps its nesting discipline. After an
/// out-of-band error the only safe operation on a parser is dropping it.
#[derive(Debug, Error)]
pub enum YeastError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The production is not registered under the given parameter shape.
    #[error("unknown production {name:?} for the given parameters")]
    UnknownProduction { name: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}
