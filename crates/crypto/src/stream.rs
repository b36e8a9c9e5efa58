//! Chunked encryption and decryption of byte streams.
//!
//! [StreamCrypter] is the workhorse behind file encryption: it pulls
//! fixed-size chunks from any [Read], pushes the transformed bytes to any
//! [Write], and reports per-chunk progress. Cancellation is cooperative and
//! checked between chunks only, so a cancel request stops within one chunk
//! of work. No header or trailer is written; the caller is responsible for
//! recording which algorithm and key material were used.

use std::io::{Read, Write};

use twinscan_utils::progress::Progress;

use crate::catalog::AlgorithmId;
use crate::error::CryptoError;
use crate::kdf;
use crate::provider::ProviderContext;
use crate::symmetric::mode::{BlockMode, Padding};
use crate::symmetric::{Direction, KeyMaterial};

/// Chunk size of the streaming loop. A multiple of every block length in
/// the catalog, so whole chunks never need padding.
pub const CHUNK_LEN: usize = 4096;

/// Encrypts or decrypts streams in [CHUNK_LEN]-byte chunks.
///
/// Defaults to CBC with PKCS#7 padding. Key material must be set, either
/// directly or derived from a passphrase, before [StreamCrypter::process]
/// is called.
pub struct StreamCrypter<'a> {
    context: &'a ProviderContext,
    algorithm: AlgorithmId,
    mode: BlockMode,
    padding: Padding,
    key_material: Option<KeyMaterial>,
}

impl<'a> StreamCrypter<'a> {
    /// Creates a crypter for `algorithm` with CBC/PKCS#7 defaults and no
    /// key material.
    pub fn new(context: &'a ProviderContext, algorithm: AlgorithmId) -> Self {
        Self {
            context,
            algorithm,
            mode: BlockMode::Cbc,
            padding: Padding::Pkcs7,
            key_material: None,
        }
    }

    /// Replaces the mode of operation.
    pub fn with_mode(mut self, mode: BlockMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replaces the padding scheme.
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Sets raw key material. Sizes are validated when an operation starts.
    pub fn set_key_material(&mut self, key_material: KeyMaterial) {
        self.key_material = Some(key_material);
    }

    /// Derives key material from a passphrase, sized for this crypter's
    /// algorithm.
    pub fn derive_key(&mut self, passphrase: &str) -> Result<(), CryptoError> {
        let descriptor = self.algorithm.descriptor();
        self.key_material = Some(kdf::stretch(
            passphrase,
            descriptor.key_len,
            descriptor.block_len,
        )?);
        Ok(())
    }

    /// Runs one whole-stream operation, returning the number of bytes
    /// written.
    ///
    /// Fails with [CryptoError::KeyNotSet] if no key material was set and
    /// with [CryptoError::InvalidKeyOrBlockSize] if the material does not
    /// match the algorithm's size table. I/O errors and cancellation abort
    /// the operation as [CryptoError::TransformFailure]; output already
    /// written stays written.
    pub fn process(
        &self,
        mut input: impl Read,
        mut output: impl Write,
        direction: Direction,
        progress: &dyn Progress,
    ) -> Result<u64, CryptoError> {
        let key_material = self.key_material.as_ref().ok_or(CryptoError::KeyNotSet)?;
        let mut session = self.context.session(
            self.algorithm,
            self.mode,
            self.padding,
            direction,
            key_material,
        )?;

        let mut pending = vec![0u8; CHUNK_LEN];
        let mut next = vec![0u8; CHUNK_LEN];
        let mut pending_len = read_chunk(&mut input, &mut pending)?;
        let mut chunks_done = 0u64;
        let mut written = 0u64;

        // One chunk of look-ahead: the loop body only runs for chunks that
        // are known not to be the last, so the last chunk (possibly partial,
        // possibly empty) always goes through finalize and padding.
        loop {
            let next_len = read_chunk(&mut input, &mut next)?;
            if next_len == 0 {
                break;
            }
            let transformed = session.update(&pending[..pending_len])?;
            output.write_all(&transformed)?;
            written += transformed.len() as u64;
            chunks_done += 1;
            progress.chunk_processed(chunks_done);
            if progress.is_cancelled() {
                return Err(CryptoError::transform("operation cancelled"));
            }
            std::mem::swap(&mut pending, &mut next);
            pending_len = next_len;
        }

        let transformed = session.finalize(&pending[..pending_len])?;
        output.write_all(&transformed)?;
        written += transformed.len() as u64;
        chunks_done += 1;
        progress.chunk_processed(chunks_done);
        output.flush()?;
        Ok(written)
    }
}

/// Reads until `buf` is full or the stream ends. A short count means EOF.
fn read_chunk(input: &mut impl Read, buf: &mut [u8]) -> Result<usize, CryptoError> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = input.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use twinscan_utils::progress::{CountingProgress, NoProgress};
    use twinscan_utils::testutils::data::fixture;

    use super::*;
    use crate::catalog::ALL;

    fn roundtrip(crypter: &StreamCrypter, plaintext: &[u8]) -> (Vec<u8>, Vec<u8>) {
        let mut ciphertext = Vec::new();
        crypter
            .process(plaintext, &mut ciphertext, Direction::Encrypt, &NoProgress)
            .unwrap();
        let mut decrypted = Vec::new();
        crypter
            .process(
                ciphertext.as_slice(),
                &mut decrypted,
                Direction::Decrypt,
                &NoProgress,
            )
            .unwrap();
        (ciphertext, decrypted)
    }

    #[test]
    fn process_without_key_fails() {
        let ctx = ProviderContext::new();
        let crypter = StreamCrypter::new(&ctx, AlgorithmId::Aes128);
        let err = crypter
            .process(
                &b"data"[..],
                Vec::new(),
                Direction::Encrypt,
                &NoProgress,
            )
            .unwrap_err();
        assert!(matches!(err, CryptoError::KeyNotSet));
    }

    #[test]
    fn mismatched_key_material_fails() {
        let ctx = ProviderContext::new();
        let mut crypter = StreamCrypter::new(&ctx, AlgorithmId::Aes128);
        crypter.set_key_material(KeyMaterial::new(vec![0; 8], vec![0; 16]));
        let err = crypter
            .process(&b"data"[..], Vec::new(), Direction::Encrypt, &NoProgress)
            .unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKeyOrBlockSize { .. }));
    }

    #[test]
    fn passphrase_derived_aes_cbc_matches_published_ciphertext() {
        let ctx = ProviderContext::new();
        let mut crypter = StreamCrypter::new(&ctx, AlgorithmId::Aes128);
        crypter.derive_key("littlelitesoftware").unwrap();

        let mut ciphertext = Vec::new();
        let written = crypter
            .process(
                &b"HELLO WORLD"[..],
                &mut ciphertext,
                Direction::Encrypt,
                &NoProgress,
            )
            .unwrap();
        assert_eq!(16, written);
        assert_eq!("3bf5d230a830acd8cefc38e74e486802", hex::encode(&ciphertext));

        let mut decrypted = Vec::new();
        crypter
            .process(
                ciphertext.as_slice(),
                &mut decrypted,
                Direction::Decrypt,
                &NoProgress,
            )
            .unwrap();
        assert_eq!(b"HELLO WORLD", decrypted.as_slice());
    }

    #[test]
    fn multi_chunk_roundtrip_reports_progress() {
        let ctx = ProviderContext::new();
        let mut crypter = StreamCrypter::new(&ctx, AlgorithmId::Aes256);
        crypter.derive_key("progress").unwrap();
        let plaintext = fixture(3 * CHUNK_LEN + 100, 21);

        let progress = CountingProgress::new();
        let mut ciphertext = Vec::new();
        crypter
            .process(
                plaintext.as_slice(),
                &mut ciphertext,
                Direction::Encrypt,
                &progress,
            )
            .unwrap();
        // Three full chunks plus the partial final one.
        assert_eq!(4, progress.chunks());

        let mut decrypted = Vec::new();
        crypter
            .process(
                ciphertext.as_slice(),
                &mut decrypted,
                Direction::Decrypt,
                &NoProgress,
            )
            .unwrap();
        assert_eq!(plaintext, decrypted);
    }

    #[test]
    fn chunk_aligned_input_roundtrips() {
        let ctx = ProviderContext::new();
        let mut crypter = StreamCrypter::new(&ctx, AlgorithmId::Blowfish128);
        crypter.derive_key("aligned").unwrap();
        let plaintext = fixture(2 * CHUNK_LEN, 22);
        let (ciphertext, decrypted) = roundtrip(&crypter, &plaintext);
        // PKCS7 always pads, even on aligned input.
        assert_eq!(plaintext.len() + 8, ciphertext.len());
        assert_eq!(plaintext, decrypted);
    }

    #[test]
    fn empty_input_roundtrips_to_empty() {
        let ctx = ProviderContext::new();
        let mut crypter = StreamCrypter::new(&ctx, AlgorithmId::Threefish256);
        crypter.derive_key("empty").unwrap();
        let (ciphertext, decrypted) = roundtrip(&crypter, b"");
        // One padding block.
        assert_eq!(32, ciphertext.len());
        assert!(decrypted.is_empty());
    }

    #[test]
    fn cancellation_aborts_between_chunks() {
        let ctx = ProviderContext::new();
        let mut crypter = StreamCrypter::new(&ctx, AlgorithmId::Aes128);
        crypter.derive_key("cancel").unwrap();
        let plaintext = fixture(10 * CHUNK_LEN, 23);

        let progress = CountingProgress::new();
        progress.cancel();
        let mut ciphertext = Vec::new();
        let err = crypter
            .process(
                plaintext.as_slice(),
                &mut ciphertext,
                Direction::Encrypt,
                &progress,
            )
            .unwrap_err();
        assert!(matches!(err, CryptoError::TransformFailure { .. }));
        // The chunk in flight was already written.
        assert_eq!(CHUNK_LEN, ciphertext.len());
    }

    #[test]
    fn stream_cipher_output_length_equals_input_length() {
        let ctx = ProviderContext::new();
        let mut crypter = StreamCrypter::new(&ctx, AlgorithmId::Arc4_128);
        crypter.derive_key("arc4").unwrap();
        let plaintext = fixture(CHUNK_LEN + 123, 24);
        let (ciphertext, decrypted) = roundtrip(&crypter, &plaintext);
        assert_eq!(plaintext.len(), ciphertext.len());
        assert_eq!(plaintext, decrypted);
    }

    #[rstest]
    #[case::ecb(BlockMode::Ecb)]
    #[case::cbc(BlockMode::Cbc)]
    #[case::cfb(BlockMode::Cfb)]
    #[case::ofb(BlockMode::Ofb)]
    fn every_algorithm_and_padding_roundtrips(#[case] mode: BlockMode) {
        let ctx = ProviderContext::new();
        for d in ALL {
            for padding in [
                Padding::Pkcs7,
                Padding::AnsiX923,
                Padding::Iso10126,
                Padding::Zeros,
            ] {
                let mut crypter = StreamCrypter::new(&ctx, d.id)
                    .with_mode(mode)
                    .with_padding(padding);
                crypter.derive_key("matrix").unwrap();

                let mut lens: Vec<usize> = (0..=10).map(|b| b * d.block_len).collect();
                lens.push(1);
                lens.push(4 * d.block_len + d.block_len / 2);
                for len in lens {
                    let plaintext = fixture(len, len as u64);
                    let (_, decrypted) = roundtrip(&crypter, &plaintext);
                    assert_eq!(
                        plaintext,
                        decrypted[..plaintext.len()],
                        "{} {:?} {:?} len {}",
                        d.display_name,
                        mode,
                        padding,
                        len
                    );
                    // Only unstripped zero fill may follow the plaintext.
                    assert!(
                        decrypted[plaintext.len()..].iter().all(|&b| b == 0),
                        "{} {:?} {:?} len {}",
                        d.display_name,
                        mode,
                        padding,
                        len
                    );
                }
            }
        }
    }

    #[test]
    fn ofb_partial_tail_needs_no_padding() {
        let ctx = ProviderContext::new();
        let mut crypter = StreamCrypter::new(&ctx, AlgorithmId::Cast5)
            .with_mode(BlockMode::Ofb)
            .with_padding(Padding::None);
        crypter.derive_key("ofb").unwrap();
        let plaintext = fixture(1000, 25);
        let (ciphertext, decrypted) = roundtrip(&crypter, &plaintext);
        assert_eq!(plaintext.len(), ciphertext.len());
        assert_eq!(plaintext, decrypted);
    }
}
