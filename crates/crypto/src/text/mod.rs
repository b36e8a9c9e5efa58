//! Encryption and decryption of short text strings.
//!
//! Two families of algorithms share one entry point: classical text-to-text
//! ciphers (Caesar, keyed polyalphabetic, four-square grid substitution) and
//! binary-backed encryption, which encodes the text to UTF-8 bytes and runs
//! them through the same cipher sessions the stream crypter uses.
//!
//! Binary ciphertext is rendered as Base64, or as the hex digits *of the
//! Base64 string* when hex output is selected. That double encoding is a
//! compatibility requirement: strings encrypted by older product versions
//! decode through exactly this chain.

mod classical;
mod foursquare;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::catalog::AlgorithmId;
use crate::error::CryptoError;
use crate::kdf;
use crate::provider::ProviderContext;
use crate::symmetric::mode::{BlockMode, Padding};
use crate::symmetric::Direction;

use foursquare::FourSquare;

/// Text cipher selection, including per-algorithm parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextAlgorithm {
    /// Constant shift over ASCII letters.
    Caesar {
        /// Shift amount; applied modulo 26.
        shift: u8,
    },
    /// Keyed polyalphabetic shift, optionally compounded with a constant
    /// shift.
    Vigenere {
        /// Key string; letters only, case-insensitive.
        key: String,
        /// Constant shift added on top of every key shift.
        shift: u8,
    },
    /// Four-square grid substitution over A-Z0-9.
    FourSquare {
        /// Key of the upper right cipher grid.
        key_upper_right: String,
        /// Key of the lower left cipher grid.
        key_lower_left: String,
    },
    /// Binary-backed: UTF-8 bytes through a block cipher session keyed from
    /// a passphrase, CBC with PKCS#7.
    Block {
        /// Which catalog algorithm to run the bytes through.
        algorithm: AlgorithmId,
        /// Passphrase the key material is derived from.
        passphrase: String,
    },
}

/// How ciphertext is rendered as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// The transformed text itself. Not available for binary-backed
    /// ciphertext, which has no plain text rendering.
    Plain,
    /// Base64 of the ciphertext bytes.
    Base64,
    /// Hex digits of the Base64 string's bytes.
    Hex,
}

/// Encrypts and decrypts short strings.
pub struct TextCrypter<'a> {
    context: &'a ProviderContext,
}

impl<'a> TextCrypter<'a> {
    /// Creates a text crypter using `context` for binary-backed sessions.
    pub fn new(context: &'a ProviderContext) -> Self {
        Self { context }
    }

    /// Encrypts `text`, rendering the result in the requested encoding.
    pub fn encrypt(
        &self,
        text: &str,
        algorithm: &TextAlgorithm,
        encoding: TextEncoding,
    ) -> Result<String, CryptoError> {
        match algorithm {
            TextAlgorithm::Caesar { shift } => {
                encode_text(&classical::caesar(text, *shift, Direction::Encrypt), encoding)
            }
            TextAlgorithm::Vigenere { key, shift } => encode_text(
                &classical::vigenere(text, key, *shift, Direction::Encrypt)?,
                encoding,
            ),
            TextAlgorithm::FourSquare {
                key_upper_right,
                key_lower_left,
            } => encode_text(
                &FourSquare::new(key_upper_right, key_lower_left)
                    .transform(text, Direction::Encrypt),
                encoding,
            ),
            TextAlgorithm::Block {
                algorithm,
                passphrase,
            } => {
                let ciphertext = self.block_transform(
                    *algorithm,
                    passphrase,
                    text.as_bytes(),
                    Direction::Encrypt,
                )?;
                match encoding {
                    TextEncoding::Plain => Err(plain_unavailable()),
                    TextEncoding::Base64 => Ok(BASE64.encode(&ciphertext)),
                    TextEncoding::Hex => Ok(hex::encode(BASE64.encode(&ciphertext))),
                }
            }
        }
    }

    /// Decrypts `text`, reversing the encoding chain first.
    pub fn decrypt(
        &self,
        text: &str,
        algorithm: &TextAlgorithm,
        encoding: TextEncoding,
    ) -> Result<String, CryptoError> {
        match algorithm {
            TextAlgorithm::Caesar { shift } => Ok(classical::caesar(
                &decode_text(text, encoding)?,
                *shift,
                Direction::Decrypt,
            )),
            TextAlgorithm::Vigenere { key, shift } => classical::vigenere(
                &decode_text(text, encoding)?,
                key,
                *shift,
                Direction::Decrypt,
            ),
            TextAlgorithm::FourSquare {
                key_upper_right,
                key_lower_left,
            } => Ok(FourSquare::new(key_upper_right, key_lower_left)
                .transform(&decode_text(text, encoding)?, Direction::Decrypt)),
            TextAlgorithm::Block {
                algorithm,
                passphrase,
            } => {
                let base64_text = match encoding {
                    TextEncoding::Plain => return Err(plain_unavailable()),
                    TextEncoding::Base64 => text.to_owned(),
                    TextEncoding::Hex => decode_hex_utf8(text)?,
                };
                let ciphertext = decode_base64(&base64_text)?;
                let plaintext = self.block_transform(
                    *algorithm,
                    passphrase,
                    &ciphertext,
                    Direction::Decrypt,
                )?;
                String::from_utf8(plaintext).map_err(|err| CryptoError::InvalidEncoding {
                    encoding: "UTF-8",
                    reason: err.to_string(),
                })
            }
        }
    }

    fn block_transform(
        &self,
        algorithm: AlgorithmId,
        passphrase: &str,
        data: &[u8],
        direction: Direction,
    ) -> Result<Vec<u8>, CryptoError> {
        let descriptor = algorithm.descriptor();
        let key_material = kdf::stretch(passphrase, descriptor.key_len, descriptor.block_len)?;
        let session = self.context.session(
            algorithm,
            BlockMode::Cbc,
            Padding::Pkcs7,
            direction,
            &key_material,
        )?;
        session.finalize(data)
    }
}

fn plain_unavailable() -> CryptoError {
    CryptoError::InvalidParameter {
        what: "encoding",
        reason: "binary-backed ciphertext has no plain text rendering, use Base64 or hex"
            .to_string(),
    }
}

fn encode_text(ciphertext: &str, encoding: TextEncoding) -> Result<String, CryptoError> {
    Ok(match encoding {
        TextEncoding::Plain => ciphertext.to_owned(),
        TextEncoding::Base64 => BASE64.encode(ciphertext.as_bytes()),
        TextEncoding::Hex => hex::encode(BASE64.encode(ciphertext.as_bytes())),
    })
}

fn decode_text(text: &str, encoding: TextEncoding) -> Result<String, CryptoError> {
    match encoding {
        TextEncoding::Plain => Ok(text.to_owned()),
        TextEncoding::Base64 => {
            String::from_utf8(decode_base64(text)?).map_err(|err| CryptoError::InvalidEncoding {
                encoding: "UTF-8",
                reason: err.to_string(),
            })
        }
        TextEncoding::Hex => {
            let base64_text = decode_hex_utf8(text)?;
            String::from_utf8(decode_base64(&base64_text)?).map_err(|err| {
                CryptoError::InvalidEncoding {
                    encoding: "UTF-8",
                    reason: err.to_string(),
                }
            })
        }
    }
}

fn decode_base64(text: &str) -> Result<Vec<u8>, CryptoError> {
    BASE64
        .decode(text)
        .map_err(|err| CryptoError::InvalidEncoding {
            encoding: "Base64",
            reason: err.to_string(),
        })
}

fn decode_hex_utf8(text: &str) -> Result<String, CryptoError> {
    let bytes = hex::decode(text).map_err(|err| CryptoError::InvalidEncoding {
        encoding: "hex",
        reason: err.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|err| CryptoError::InvalidEncoding {
        encoding: "hex",
        reason: err.to_string(),
    })
}
