//! Stretch backend on OpenSSL's one-shot SHA-2 functions.

use super::StretchBackend;

/// OpenSSL-backed stretch. Byte-identical to [super::Sha2Stretch].
pub struct OpensslStretch;

impl StretchBackend for OpensslStretch {
    fn sha384(data: &[u8]) -> [u8; 48] {
        openssl::sha::sha384(data)
    }

    fn sha512(data: &[u8]) -> [u8; 64] {
        openssl::sha::sha512(data)
    }
}
