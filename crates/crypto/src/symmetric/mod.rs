//! Symmetric cipher cores and the mode-of-operation transform.
//!
//! The seam between the two layers is [BlockCipherCore]: a single-block
//! cipher with no notion of streaming, chaining or padding. The
//! [mode::ModeTransform] wraps any core in a mode of operation (ECB, CBC,
//! CFB, OFB) and a padding scheme and exposes the streaming transform
//! contract that the stream and text crypters drive.

use zeroize::Zeroize;

mod key;

pub mod cores;
pub mod mode;


pub use key::KeyMaterial;

/// Whether a transform encrypts or decrypts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Plaintext in, ciphertext out.
    Encrypt,
    /// Ciphertext in, plaintext out.
    Decrypt,
}

/// A symmetric cipher operating on a single block.
///
/// Implementations own their expanded key schedule; a core instance is never
/// shared across operations with different keys. Both directions must be
/// exact inverses of each other.
pub trait BlockCipherCore: Send + Sync {
    /// Block length in bytes.
    fn block_len(&self) -> usize;

    /// Encrypts one block in place. `block.len()` must equal
    /// [BlockCipherCore::block_len].
    fn encrypt_block(&self, block: &mut [u8]);

    /// Decrypts one block in place. `block.len()` must equal
    /// [BlockCipherCore::block_len].
    fn decrypt_block(&self, block: &mut [u8]);
}

/// XORs `rhs` into `lhs`. Both slices must have the same length.
pub(crate) fn xor_in_place(lhs: &mut [u8], rhs: &[u8]) {
    debug_assert_eq!(lhs.len(), rhs.len());
    for (l, r) in lhs.iter_mut().zip(rhs) {
        *l ^= r;
    }
}

/// Zeroes a scratch buffer. Used for feedback/keystream state that has seen
/// key-derived bytes.
pub(crate) fn wipe(buf: &mut [u8]) {
    buf.zeroize();
}
