use thiserror::Error;

/// Convenience alias for results carrying this crate's error type
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while loading a trace or setting up a sweep
///
/// The simulator itself has exactly one failure path, a zero capacity.
/// Degenerate but representable inputs (an empty trace, a capacity beyond the
/// address space) are absorbed by the relocation policy instead of raised
#[derive(Debug, Error)]
pub enum Error {
    /// The trace resource contained a token which is not a non-negative integer
    #[error("malformed trace at line {line}: {token:?} is not a non-negative integer")]
    MalformedTrace { line: usize, token: String },

    /// A window has to hold at least one entry
    #[error("invalid cache capacity {0}: the window must hold at least one entry")]
    InvalidCapacity(u64),

    /// The sweep configuration is inconsistent
    #[error("invalid sweep configuration: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
