//! Error taxonomy of the cipher engine.
//!
//! Parameter and size validation errors are raised synchronously at setup
//! time, before any bytes are processed. In-flight failures (I/O, native
//! engine) abort the running operation and surface as
//! [CryptoError::TransformFailure]; nothing already written is rolled back.
//! Native-provider unavailability is never surfaced here — the provider
//! selector handles it locally by falling back to the software path.

use derive_more::{Display, Error};

/// Boxed error source for in-flight transform failures.
pub type TransformSource = Box<dyn std::error::Error + Send + Sync>;

/// All failures the cipher engine can surface to a caller.
#[derive(Debug, Display, Error)]
#[non_exhaustive]
pub enum CryptoError {
    /// An algorithm name did not match any catalog entry.
    #[display("unknown algorithm: {name}")]
    UnknownAlgorithm {
        /// The name that failed to resolve.
        #[error(not(source))]
        name: String,
    },

    /// Key or IV sizes do not match the legal size table of the algorithm.
    #[display(
        "invalid key or block size for {algorithm}: got {key_len} key bytes and {block_len} iv/tweak bytes"
    )]
    InvalidKeyOrBlockSize {
        /// Display name of the algorithm whose size table was violated.
        algorithm: &'static str,
        /// Supplied key length in bytes.
        key_len: usize,
        /// Supplied IV/tweak length in bytes.
        block_len: usize,
    },

    /// An operation was started before any key material was set.
    #[display("no key material has been set for this operation")]
    KeyNotSet,

    /// A key derivation request exceeded the stretch ceiling.
    #[display("requested {requested} bytes of key material, stretch ceiling is {max} bytes")]
    KeyTooLarge {
        /// Total bytes requested (key length + block length).
        requested: usize,
        /// The fixed ceiling of the hash stretch.
        max: usize,
    },

    /// A mode of operation this engine does not implement was requested.
    #[display("unsupported mode of operation: {mode}")]
    UnsupportedMode {
        /// Name of the rejected mode.
        mode: &'static str,
    },

    /// A setup parameter other than key/block sizes was invalid.
    #[display("invalid {what}: {reason}")]
    InvalidParameter {
        /// Which parameter was rejected.
        what: &'static str,
        /// Why it was rejected.
        #[error(not(source))]
        reason: String,
    },

    /// The final block's padding was missing or inconsistent.
    #[display("invalid padding in final block")]
    InvalidPadding,

    /// Encoded text input (Base64, hex, UTF-8) could not be decoded.
    #[display("invalid {encoding} input: {reason}")]
    InvalidEncoding {
        /// The encoding that failed to decode.
        encoding: &'static str,
        /// Decoder error description.
        #[error(not(source))]
        reason: String,
    },

    /// An in-flight operation failed (I/O, native engine, cancellation).
    #[display("transform failed: {source}")]
    TransformFailure {
        /// The underlying failure.
        source: TransformSource,
    },
}

impl CryptoError {
    /// Wraps an in-flight failure as [CryptoError::TransformFailure].
    pub fn transform(source: impl Into<TransformSource>) -> Self {
        CryptoError::TransformFailure {
            source: source.into(),
        }
    }
}

impl From<std::io::Error> for CryptoError {
    fn from(err: std::io::Error) -> Self {
        CryptoError::transform(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_algorithm() {
        let err = CryptoError::InvalidKeyOrBlockSize {
            algorithm: "Threefish-256",
            key_len: 100,
            block_len: 32,
        };
        let msg = err.to_string();
        assert!(msg.contains("Threefish-256"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn transform_failure_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: CryptoError = io.into();
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("pipe closed"));
    }
}
