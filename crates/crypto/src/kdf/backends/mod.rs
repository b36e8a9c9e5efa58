//! Hash backends for passphrase stretching.
//!
//! Both backends must be byte-identical; the pure-Rust one is the default,
//! the OpenSSL one exists for callers that already link OpenSSL and want a
//! single hash implementation in the process.

mod openssl;
mod sha2;

pub use self::openssl::OpensslStretch;
pub use self::sha2::Sha2Stretch;

/// The two digests the stretch algorithm draws from.
pub trait StretchBackend {
    /// SHA-384 of `data`.
    fn sha384(data: &[u8]) -> [u8; 48];

    /// SHA-512 of `data`.
    fn sha512(data: &[u8]) -> [u8; 64];
}
