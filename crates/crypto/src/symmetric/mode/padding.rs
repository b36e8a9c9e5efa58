//! Padding schemes for the final block of ECB/CBC transforms.

use rand::RngCore;

use crate::error::CryptoError;

/// How the final partial block is extended to the cipher's block length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    /// No padding; the caller must supply exact block multiples.
    None,
    /// Zero bytes up to the next block boundary. Not removable on decrypt
    /// (the original plaintext length is ambiguous); the decrypted output
    /// keeps the zero fill.
    Zeros,
    /// PKCS#7: each pad byte holds the pad count. Always adds 1..=block
    /// bytes, so it is unambiguous and stripped on decrypt.
    Pkcs7,
    /// ANSI X9.23: zero fill, last byte holds the pad count. Stripped on
    /// decrypt.
    AnsiX923,
    /// ISO 10126: random fill, last byte holds the pad count. Stripped on
    /// decrypt without validating the random bytes.
    Iso10126,
}

impl Padding {
    /// Whether decryption strips this padding. `None` and `Zeros` leave the
    /// decrypted final block untouched because the plaintext length cannot
    /// be recovered from them.
    pub fn strips_on_decrypt(self) -> bool {
        matches!(self, Padding::Pkcs7 | Padding::AnsiX923 | Padding::Iso10126)
    }
}

/// Extends `tail` (the bytes after the last full block, possibly empty) to
/// the padded final blocks. Returns the bytes to encrypt in place of `tail`.
pub fn apply(padding: Padding, tail: &[u8], block_len: usize) -> Result<Vec<u8>, CryptoError> {
    debug_assert!(tail.len() < block_len || padding == Padding::None);
    match padding {
        Padding::None => {
            if tail.is_empty() {
                Ok(Vec::new())
            } else {
                Err(CryptoError::InvalidPadding)
            }
        }
        Padding::Zeros => {
            if tail.is_empty() {
                Ok(Vec::new())
            } else {
                let mut padded = tail.to_vec();
                padded.resize(block_len, 0);
                Ok(padded)
            }
        }
        Padding::Pkcs7 => {
            let pad = block_len - tail.len();
            let mut padded = tail.to_vec();
            padded.resize(block_len, pad as u8);
            Ok(padded)
        }
        Padding::AnsiX923 => {
            let pad = block_len - tail.len();
            let mut padded = tail.to_vec();
            padded.resize(block_len, 0);
            padded[block_len - 1] = pad as u8;
            Ok(padded)
        }
        Padding::Iso10126 => {
            let pad = block_len - tail.len();
            let mut padded = tail.to_vec();
            padded.resize(block_len, 0);
            rand::rng().fill_bytes(&mut padded[tail.len()..]);
            padded[block_len - 1] = pad as u8;
            Ok(padded)
        }
    }
}

/// Strips padding from decrypted data, returning the plaintext length.
/// For `None` and `Zeros` the length is returned unchanged.
pub fn strip(padding: Padding, data: &[u8], block_len: usize) -> Result<usize, CryptoError> {
    if !padding.strips_on_decrypt() {
        return Ok(data.len());
    }
    if data.is_empty() || data.len() % block_len != 0 {
        return Err(CryptoError::InvalidPadding);
    }
    let pad = usize::from(data[data.len() - 1]);
    if pad == 0 || pad > block_len {
        return Err(CryptoError::InvalidPadding);
    }
    let plain_len = data.len() - pad;
    match padding {
        Padding::Pkcs7 => {
            if data[plain_len..].iter().any(|&b| usize::from(b) != pad) {
                return Err(CryptoError::InvalidPadding);
            }
        }
        Padding::AnsiX923 => {
            if data[plain_len..data.len() - 1].iter().any(|&b| b != 0) {
                return Err(CryptoError::InvalidPadding);
            }
        }
        // Random fill is not validated, only the count byte.
        Padding::Iso10126 => {}
        Padding::None | Padding::Zeros => unreachable!(),
    }
    Ok(plain_len)
}
