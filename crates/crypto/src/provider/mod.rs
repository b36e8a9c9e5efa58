//! Selection between the native (OpenSSL) and software cipher paths.
//!
//! A [ProviderContext] is constructed once by the embedding application and
//! passed by reference to everything that opens cipher sessions. It probes
//! the native engine lazily, exactly once; every later session request
//! reuses the cached outcome. Algorithms and modes without a native mapping,
//! and native construction failures of any kind, fall back to the software
//! path with a log line and are never surfaced as errors.
//!
//! Both paths produce byte-identical output because native padding is always
//! disabled and the shared padding layer runs on top.

mod native;

use std::sync::OnceLock;

use log::{debug, warn};

use crate::catalog::AlgorithmId;
use crate::error::CryptoError;
use crate::symmetric::cores::{instantiate, Arcfour, CipherCore};
use crate::symmetric::mode::{BlockMode, ModeTransform, Padding};
use crate::symmetric::{Direction, KeyMaterial};

use native::NativeSession;

/// Owner of the native-engine probe and the entry point for opening cipher
/// sessions.
///
/// The context is cheap to share (`&ProviderContext` is all a session needs
/// at construction) and safe to use from multiple threads; concurrent first
/// uses race on the probe but observe a single outcome.
#[derive(Debug, Default)]
pub struct ProviderContext {
    native_available: OnceLock<bool>,
    released: bool,
}

impl ProviderContext {
    /// Creates a context. The native engine is not probed until the first
    /// session that could use it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a cipher session for one operation.
    ///
    /// Key material is validated against the catalog's size table before any
    /// path is chosen, so size errors are identical on both paths. CTS is
    /// rejected with [CryptoError::UnsupportedMode].
    pub fn session(
        &self,
        algorithm: AlgorithmId,
        mode: BlockMode,
        padding: Padding,
        direction: Direction,
        key_material: &KeyMaterial,
    ) -> Result<CipherSession, CryptoError> {
        let descriptor = algorithm.descriptor();
        if key_material.key().len() != descriptor.key_len
            || key_material.iv().len() != descriptor.block_len
        {
            return Err(CryptoError::InvalidKeyOrBlockSize {
                algorithm: descriptor.display_name,
                key_len: key_material.key().len(),
                block_len: key_material.iv().len(),
            });
        }
        if mode == BlockMode::Cts {
            return Err(CryptoError::UnsupportedMode { mode: "CTS" });
        }

        if let Some(cipher) = native::native_cipher(algorithm, mode) {
            if self.native_available() {
                match NativeSession::new(cipher, direction, padding, key_material) {
                    Ok(session) => {
                        return Ok(CipherSession {
                            inner: SessionKind::Native(session),
                        })
                    }
                    Err(err) => warn!(
                        "native path unavailable for {}, falling back to software: {}",
                        descriptor.display_name, err
                    ),
                }
            }
        }

        software_session(algorithm, mode, padding, direction, key_material)
    }

    /// Releases the context. Idempotent; also runs on drop. Sessions opened
    /// earlier stay valid, they do not borrow from the context.
    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            debug!("cipher provider context released");
        }
    }

    fn native_available(&self) -> bool {
        *self.native_available.get_or_init(|| {
            let available = native::probe();
            if available {
                debug!("native cipher engine available");
            } else {
                warn!("native cipher engine unavailable, all operations use the software path");
            }
            available
        })
    }
}

impl Drop for ProviderContext {
    fn drop(&mut self) {
        self.release();
    }
}

fn software_session(
    algorithm: AlgorithmId,
    mode: BlockMode,
    padding: Padding,
    direction: Direction,
    key_material: &KeyMaterial,
) -> Result<CipherSession, CryptoError> {
    let inner = match instantiate(algorithm, key_material)? {
        CipherCore::Block(core) => SessionKind::Block(ModeTransform::new(
            core,
            mode,
            padding,
            direction,
            key_material.iv(),
        )?),
        CipherCore::Stream(arcfour) => SessionKind::Stream(arcfour),
    };
    Ok(CipherSession { inner })
}

enum SessionKind {
    Block(ModeTransform),
    Stream(Arcfour),
    Native(NativeSession),
}

/// One cipher operation, native or software.
///
/// The streaming contract is the same on every path: any number of
/// [CipherSession::update] calls with whole multiples of the block length,
/// then exactly one [CipherSession::finalize] with the remaining tail.
/// Finalizing consumes the session; a new operation needs a new session.
pub struct CipherSession {
    inner: SessionKind,
}

impl std::fmt::Debug for CipherSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherSession").finish_non_exhaustive()
    }
}

impl CipherSession {
    /// Block length of the selected cipher (1 for stream ciphers).
    pub fn block_len(&self) -> usize {
        match &self.inner {
            SessionKind::Block(transform) => transform.block_len(),
            SessionKind::Stream(_) => 1,
            SessionKind::Native(session) => session.block_len(),
        }
    }

    /// Whether the native path was selected.
    pub fn is_native(&self) -> bool {
        matches!(self.inner, SessionKind::Native(_))
    }

    /// Transforms a whole-block-multiple piece of the stream.
    pub fn update(&mut self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match &mut self.inner {
            SessionKind::Block(transform) => {
                let mut out = data.to_vec();
                transform.transform_block(&mut out)?;
                Ok(out)
            }
            SessionKind::Stream(arcfour) => {
                let mut out = data.to_vec();
                arcfour.apply_keystream(&mut out);
                Ok(out)
            }
            SessionKind::Native(session) => session.update(data),
        }
    }

    /// Transforms the final piece, applying or stripping padding on the
    /// block paths.
    pub fn finalize(self, tail: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match self.inner {
            SessionKind::Block(mut transform) => transform.transform_final(tail),
            SessionKind::Stream(mut arcfour) => {
                let mut out = tail.to_vec();
                arcfour.apply_keystream(&mut out);
                Ok(out)
            }
            SessionKind::Native(session) => session.finalize(tail),
        }
    }
}
