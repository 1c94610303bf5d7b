//! SDK error type.

/// All errors returned by the position resolver.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── RPC / network ────────────────────────────────────────────────────────
    /// A Solana JSON-RPC call failed.
    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    /// The RPC node answered with a payload the resolver cannot line up with its request.
    #[error("Unexpected RPC response: {0}")]
    UnexpectedResponse(String),

    // ── Account parsing ──────────────────────────────────────────────────────
    /// Raw account bytes could not be deserialized.
    #[error("Account parse error at offset {offset}: {reason}")]
    ParseError { offset: usize, reason: String },

    /// A bundle bitmap buffer cannot hold the requested number of bits.
    #[error("Bitmap is {len} bytes; need at least {required}")]
    BitmapTooShort { len: usize, required: usize },

    // ── Validation ───────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience alias so every module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;
