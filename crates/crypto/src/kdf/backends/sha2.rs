//! Stretch backend on the pure Rust `sha2` crate.

use sha2::{Digest as _, Sha384, Sha512};

use super::StretchBackend;

/// Pure-Rust backend. Fully portable; the default.
pub struct Sha2Stretch;

impl StretchBackend for Sha2Stretch {
    fn sha384(data: &[u8]) -> [u8; 48] {
        Sha384::digest(data).into()
    }

    fn sha512(data: &[u8]) -> [u8; 64] {
        Sha512::digest(data).into()
    }
}
