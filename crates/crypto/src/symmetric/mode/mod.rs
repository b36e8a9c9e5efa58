//! Modes of operation wrapping a single-block cipher core.
//!
//! A [ModeTransform] is the mutable per-operation session: it owns the core,
//! the rolling feedback state and the padding scheme, and exposes the
//! streaming contract driven by the stream and text crypters:
//! [ModeTransform::transform_block] for whole block multiples and
//! [ModeTransform::transform_final] for the padded/un-padded tail.
//!
//! CFB and OFB are byte-granular: they keep the keystream position across
//! calls, so applying them one byte at a time produces exactly the same
//! output as one call over the whole buffer. CFB feeds the *ciphertext*
//! byte back into the feedback register in both directions, which is what
//! makes it self-synchronizing.

mod padding;

pub use padding::Padding;
pub(crate) use padding::{apply as apply_padding, strip as strip_padding};

use crate::error::CryptoError;
use crate::symmetric::{wipe, xor_in_place, BlockCipherCore, Direction};

/// The supported modes of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockMode {
    /// Electronic codebook: every block independent.
    Ecb,
    /// Cipher block chaining.
    Cbc,
    /// Cipher feedback, byte-granular.
    Cfb,
    /// Output feedback, byte-granular.
    Ofb,
    /// Ciphertext stealing. Not implemented; requesting it fails fast.
    Cts,
}

impl BlockMode {
    /// Whether this mode consumes padding (only ECB and CBC do).
    pub fn uses_padding(self) -> bool {
        matches!(self, BlockMode::Ecb | BlockMode::Cbc)
    }
}

/// Per-operation streaming session combining core, mode and padding.
pub struct ModeTransform {
    core: Box<dyn BlockCipherCore>,
    mode: BlockMode,
    padding: Padding,
    direction: Direction,
    iv: Vec<u8>,
    /// Rolling feedback: previous ciphertext block (CBC), keystream input
    /// register (CFB), or keystream itself (OFB).
    feedback: Vec<u8>,
    /// CFB keystream block / CBC decrypt ciphertext cache.
    scratch: Vec<u8>,
    /// Keystream bytes of the current block already consumed (CFB/OFB).
    pos: usize,
}

impl std::fmt::Debug for ModeTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeTransform")
            .field("mode", &self.mode)
            .field("padding", &self.padding)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

impl ModeTransform {
    /// Creates a session. Fails fast with [CryptoError::UnsupportedMode]
    /// for CTS and validates the IV length against the core's block length.
    pub fn new(
        core: Box<dyn BlockCipherCore>,
        mode: BlockMode,
        padding: Padding,
        direction: Direction,
        iv: &[u8],
    ) -> Result<Self, CryptoError> {
        if mode == BlockMode::Cts {
            return Err(CryptoError::UnsupportedMode { mode: "CTS" });
        }
        let block_len = core.block_len();
        if iv.len() != block_len {
            return Err(CryptoError::InvalidParameter {
                what: "iv",
                reason: format!("expected {} bytes, got {}", block_len, iv.len()),
            });
        }
        Ok(Self {
            core,
            mode,
            padding,
            direction,
            iv: iv.to_vec(),
            feedback: iv.to_vec(),
            scratch: vec![0; block_len],
            pos: 0,
        })
    }

    /// Block length of the wrapped core in bytes.
    pub fn block_len(&self) -> usize {
        self.core.block_len()
    }

    /// The padding scheme of this session.
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Re-initializes the feedback state from the IV, making the session
    /// reusable for a new stream.
    pub fn reset(&mut self) {
        self.feedback.copy_from_slice(&self.iv);
        self.pos = 0;
    }

    /// Transforms data in place, without padding.
    ///
    /// For ECB and CBC the input length must be a whole multiple of the
    /// block length. CFB and OFB accept any length and keep their keystream
    /// position across calls.
    pub fn transform_block(&mut self, data: &mut [u8]) -> Result<(), CryptoError> {
        let block_len = self.core.block_len();
        match self.mode {
            BlockMode::Ecb | BlockMode::Cbc => {
                if data.len() % block_len != 0 {
                    return Err(CryptoError::InvalidParameter {
                        what: "input",
                        reason: format!(
                            "length {} is not a multiple of the {}-byte block",
                            data.len(),
                            block_len
                        ),
                    });
                }
                self.transform_aligned(data);
                Ok(())
            }
            BlockMode::Cfb | BlockMode::Ofb => {
                self.transform_stream(data);
                Ok(())
            }
            BlockMode::Cts => unreachable!("rejected at construction"),
        }
    }

    /// Transforms the final piece of a stream, applying padding when
    /// encrypting and stripping it (for unambiguous schemes) when
    /// decrypting. The input may contain whole blocks plus a partial tail.
    pub fn transform_final(&mut self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if !self.mode.uses_padding() {
            let mut out = data.to_vec();
            self.transform_stream(&mut out);
            return Ok(out);
        }
        let block_len = self.core.block_len();
        match self.direction {
            Direction::Encrypt => {
                let split = data.len() - data.len() % block_len;
                let (blocks, tail) = data.split_at(split);
                let mut out = blocks.to_vec();
                self.transform_aligned(&mut out);
                let mut padded = apply_padding(self.padding, tail, block_len)?;
                self.transform_aligned(&mut padded);
                out.extend_from_slice(&padded);
                Ok(out)
            }
            Direction::Decrypt => {
                if data.len() % block_len != 0 {
                    return Err(CryptoError::InvalidPadding);
                }
                if data.is_empty() && self.padding.strips_on_decrypt() {
                    return Err(CryptoError::InvalidPadding);
                }
                let mut out = data.to_vec();
                self.transform_aligned(&mut out);
                let plain_len = strip_padding(self.padding, &out, block_len)?;
                out.truncate(plain_len);
                Ok(out)
            }
        }
    }

    /// ECB/CBC path; `data.len()` is a whole multiple of the block length.
    fn transform_aligned(&mut self, data: &mut [u8]) {
        let block_len = self.core.block_len();
        match (self.mode, self.direction) {
            (BlockMode::Ecb, Direction::Encrypt) => {
                for block in data.chunks_exact_mut(block_len) {
                    self.core.encrypt_block(block);
                }
            }
            (BlockMode::Ecb, Direction::Decrypt) => {
                for block in data.chunks_exact_mut(block_len) {
                    self.core.decrypt_block(block);
                }
            }
            (BlockMode::Cbc, Direction::Encrypt) => {
                for block in data.chunks_exact_mut(block_len) {
                    xor_in_place(block, &self.feedback);
                    self.core.encrypt_block(block);
                    self.feedback.copy_from_slice(block);
                }
            }
            (BlockMode::Cbc, Direction::Decrypt) => {
                for block in data.chunks_exact_mut(block_len) {
                    // Cache the ciphertext block before decrypting in place.
                    self.scratch.copy_from_slice(block);
                    self.core.decrypt_block(block);
                    xor_in_place(block, &self.feedback);
                    self.feedback.copy_from_slice(&self.scratch);
                }
            }
            _ => unreachable!("stream modes use transform_stream"),
        }
    }

    /// CFB/OFB path; byte-granular.
    fn transform_stream(&mut self, data: &mut [u8]) {
        let block_len = self.core.block_len();
        match self.mode {
            BlockMode::Ofb => {
                for byte in data {
                    if self.pos == 0 {
                        // The keystream is the cipher repeatedly encrypting
                        // its own output, starting from the IV.
                        self.core.encrypt_block(&mut self.feedback);
                    }
                    *byte ^= self.feedback[self.pos];
                    self.pos = (self.pos + 1) % block_len;
                }
            }
            BlockMode::Cfb => {
                for byte in data {
                    if self.pos == 0 {
                        self.scratch.copy_from_slice(&self.feedback);
                        self.core.encrypt_block(&mut self.scratch);
                    }
                    let input = *byte;
                    let output = input ^ self.scratch[self.pos];
                    let ciphertext_byte = match self.direction {
                        Direction::Encrypt => output,
                        Direction::Decrypt => input,
                    };
                    self.feedback[self.pos] = ciphertext_byte;
                    *byte = output;
                    self.pos = (self.pos + 1) % block_len;
                }
            }
            _ => unreachable!("block modes use transform_aligned"),
        }
    }
}

impl Drop for ModeTransform {
    fn drop(&mut self) {
        wipe(&mut self.feedback);
        wipe(&mut self.scratch);
        wipe(&mut self.iv);
    }
}
