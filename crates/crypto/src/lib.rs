//! Symmetric cipher engine for the TwinScan comparison tool.
//!
//! This crate is the encryption core behind TwinScan's file and report
//! protection. The surrounding application talks to it through two doors:
//! encrypting or decrypting a byte stream with a catalog algorithm and a
//! passphrase, and encrypting or decrypting a short text string, optionally
//! rendered as Base64 or hex.
//!
//! # Modules
//!
//! - [`catalog`]: the fixed table of supported algorithms and their legal
//!   key/block sizes
//! - [`kdf`]: deterministic passphrase-to-key-material hash stretching
//! - [`symmetric`]: cipher cores (including Threefish) and the
//!   mode-of-operation transform with its padding schemes
//! - [`provider`]: selection between the native OpenSSL path and the
//!   software path, with silent fallback
//! - [`stream`]: chunked encryption of `Read`/`Write` streams with progress
//!   reporting and cooperative cancellation
//! - [`text`]: classical text ciphers and binary-backed string encryption
//!
//! # Backend Selection
//!
//! Cipher sessions prefer the native OpenSSL implementation where one
//! exists (the AES family in ECB/CBC, and ARC4) and fall back to the
//! software implementations otherwise; both paths produce byte-identical
//! output. The passphrase stretch likewise has a pure-Rust and an OpenSSL
//! backend.
//!
//! # Example
//!
//! ```
//! use twinscan_crypto::catalog::AlgorithmId;
//! use twinscan_crypto::provider::ProviderContext;
//! use twinscan_crypto::stream::StreamCrypter;
//! use twinscan_crypto::symmetric::Direction;
//! use twinscan_utils::progress::NoProgress;
//!
//! let context = ProviderContext::new();
//! let mut crypter = StreamCrypter::new(&context, AlgorithmId::Aes256);
//! crypter.derive_key("my passphrase").unwrap();
//!
//! let mut ciphertext = Vec::new();
//! crypter
//!     .process(&b"attack at dawn"[..], &mut ciphertext, Direction::Encrypt, &NoProgress)
//!     .unwrap();
//!
//! let mut decrypted = Vec::new();
//! crypter
//!     .process(ciphertext.as_slice(), &mut decrypted, Direction::Decrypt, &NoProgress)
//!     .unwrap();
//! assert_eq!(b"attack at dawn", decrypted.as_slice());
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod catalog;
pub mod error;
pub mod kdf;
pub mod provider;
pub mod stream;
pub mod symmetric;
pub mod text;

pub use error::CryptoError;
