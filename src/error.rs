//! Error types for the ovc crate

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("no legal moves available: position is terminal")]
    NoLegalMoves,
}

pub type Result<T> = std::result::Result<T, Error>;
