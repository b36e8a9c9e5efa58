//! Native cipher sessions backed by OpenSSL's EVP layer.
//!
//! Native padding is always disabled; the shared padding layer in
//! [crate::symmetric::mode] runs on top so native and software output is
//! byte-identical. Construction failures are reported to the selector,
//! which falls back to the software path.

use openssl::error::ErrorStack;
use openssl::symm::{Cipher, Crypter, Mode};

use crate::catalog::AlgorithmId;
use crate::error::CryptoError;
use crate::symmetric::mode::{apply_padding, strip_padding, BlockMode, Padding};
use crate::symmetric::Direction;
use crate::symmetric::KeyMaterial;

/// Returns the EVP cipher for the algorithm/mode pair, or `None` when the
/// pair has no native path.
pub(crate) fn native_cipher(id: AlgorithmId, mode: BlockMode) -> Option<Cipher> {
    match (id, mode) {
        (AlgorithmId::Aes128, BlockMode::Ecb) => Some(Cipher::aes_128_ecb()),
        (AlgorithmId::Aes128, BlockMode::Cbc) => Some(Cipher::aes_128_cbc()),
        (AlgorithmId::Aes192, BlockMode::Ecb) => Some(Cipher::aes_192_ecb()),
        (AlgorithmId::Aes192, BlockMode::Cbc) => Some(Cipher::aes_192_cbc()),
        (AlgorithmId::Aes256, BlockMode::Ecb) => Some(Cipher::aes_256_ecb()),
        (AlgorithmId::Aes256, BlockMode::Cbc) => Some(Cipher::aes_256_cbc()),
        // Mode and padding do not apply to the keystream cipher.
        (
            AlgorithmId::Arc4_40
            | AlgorithmId::Arc4_64
            | AlgorithmId::Arc4_128
            | AlgorithmId::Arc4_256,
            _,
        ) => Some(Cipher::rc4()),
        _ => None,
    }
}

/// Checks whether the native engine can hand out cipher contexts at all.
/// RC4 may still be missing (OpenSSL 3 moved it to the legacy provider);
/// that is handled per session, not here.
pub(crate) fn probe() -> bool {
    Crypter::new(Cipher::aes_128_ecb(), Mode::Encrypt, &[0u8; 16], None).is_ok()
}

/// One native cipher operation. Mirrors the streaming contract of the
/// software [crate::symmetric::mode::ModeTransform].
pub(crate) struct NativeSession {
    crypter: Crypter,
    block_len: usize,
    padding: Padding,
    direction: Direction,
}

impl NativeSession {
    pub(crate) fn new(
        cipher: Cipher,
        direction: Direction,
        padding: Padding,
        key_material: &KeyMaterial,
    ) -> Result<Self, ErrorStack> {
        let mode = match direction {
            Direction::Encrypt => Mode::Encrypt,
            Direction::Decrypt => Mode::Decrypt,
        };
        let iv = cipher.iv_len().map(|_| key_material.iv());
        let mut crypter = Crypter::new(cipher, mode, key_material.key(), iv)?;
        crypter.pad(false);
        Ok(Self {
            crypter,
            block_len: cipher.block_size(),
            padding,
            direction,
        })
    }

    pub(crate) fn block_len(&self) -> usize {
        self.block_len
    }

    pub(crate) fn update(&mut self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut out = vec![0; data.len() + self.block_len];
        let written = self
            .crypter
            .update(data, &mut out)
            .map_err(CryptoError::transform)?;
        out.truncate(written);
        Ok(out)
    }

    pub(crate) fn finalize(mut self, tail: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if self.block_len == 1 {
            let mut out = self.update(tail)?;
            out.extend(self.finish()?);
            return Ok(out);
        }
        match self.direction {
            Direction::Encrypt => {
                let split = tail.len() - tail.len() % self.block_len;
                let (blocks, partial) = tail.split_at(split);
                let mut out = self.update(blocks)?;
                let padded = apply_padding(self.padding, partial, self.block_len)?;
                out.extend(self.update(&padded)?);
                out.extend(self.finish()?);
                Ok(out)
            }
            Direction::Decrypt => {
                if tail.len() % self.block_len != 0 {
                    return Err(CryptoError::InvalidPadding);
                }
                if tail.is_empty() && self.padding.strips_on_decrypt() {
                    return Err(CryptoError::InvalidPadding);
                }
                let mut out = self.update(tail)?;
                out.extend(self.finish()?);
                let plain_len = strip_padding(self.padding, &out, self.block_len)?;
                out.truncate(plain_len);
                Ok(out)
            }
        }
    }

    /// Flushes the crypter. With padding disabled this returns nothing, but
    /// skipping it would leave EVP errors unchecked.
    fn finish(&mut self) -> Result<Vec<u8>, CryptoError> {
        let mut out = vec![0; self.block_len];
        let written = self
            .crypter
            .finalize(&mut out)
            .map_err(CryptoError::transform)?;
        out.truncate(written);
        Ok(out)
    }
}
