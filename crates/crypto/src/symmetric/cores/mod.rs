//! Concrete cipher cores and the factory that selects them.
//!
//! Every algorithm in the catalog maps to exactly one core here. The
//! selection is a single `match` over [AlgorithmId] rather than a type
//! hierarchy; size validation against the catalog's legal table happens
//! before any core is constructed.
//!
//! Block ciphers other than Threefish come from the RustCrypto cipher
//! crates and are adapted to [BlockCipherCore] by [RustCryptoCore];
//! Threefish and ARC4 are implemented in this crate.

use cipher::generic_array::GenericArray;
use cipher::{BlockDecrypt, BlockEncrypt, KeyInit};

use crate::catalog::AlgorithmId;
use crate::error::CryptoError;
use crate::symmetric::{BlockCipherCore, KeyMaterial};

mod arcfour;
mod threefish;

pub use arcfour::Arcfour;
pub use threefish::{Threefish1024, Threefish256, Threefish512, TWEAK_LEN};

/// Adapter exposing a RustCrypto block cipher as a [BlockCipherCore].
pub struct RustCryptoCore<C> {
    cipher: C,
}

impl<C> RustCryptoCore<C> {
    fn new(cipher: C) -> Self {
        Self { cipher }
    }
}

impl<C: BlockEncrypt + BlockDecrypt + Send + Sync> BlockCipherCore for RustCryptoCore<C> {
    fn block_len(&self) -> usize {
        C::block_size()
    }

    fn encrypt_block(&self, block: &mut [u8]) {
        self.cipher
            .encrypt_block(GenericArray::from_mut_slice(block));
    }

    fn decrypt_block(&self, block: &mut [u8]) {
        self.cipher
            .decrypt_block(GenericArray::from_mut_slice(block));
    }
}

/// A keyed cipher core, ready to be wrapped in a mode transform.
pub enum CipherCore {
    /// A block cipher; needs a mode of operation and padding.
    Block(Box<dyn BlockCipherCore>),
    /// The ARC4 keystream; mode and padding do not apply.
    Stream(Arcfour),
}

impl std::fmt::Debug for CipherCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CipherCore::Block(_) => f.write_str("CipherCore::Block"),
            CipherCore::Stream(_) => f.write_str("CipherCore::Stream"),
        }
    }
}

fn size_error(id: AlgorithmId, key_material: &KeyMaterial) -> CryptoError {
    CryptoError::InvalidKeyOrBlockSize {
        algorithm: id.descriptor().display_name,
        key_len: key_material.key().len(),
        block_len: key_material.iv().len(),
    }
}

fn rust_crypto_core<C>(
    id: AlgorithmId,
    key_material: &KeyMaterial,
) -> Result<Box<dyn BlockCipherCore>, CryptoError>
where
    C: KeyInit + BlockEncrypt + BlockDecrypt + Send + Sync + 'static,
{
    let cipher =
        C::new_from_slice(key_material.key()).map_err(|_| size_error(id, key_material))?;
    Ok(Box::new(RustCryptoCore::new(cipher)))
}

/// Builds the cipher core for `id` from the given key material.
///
/// Fails with [CryptoError::InvalidKeyOrBlockSize] if the key or IV/tweak
/// length does not match the catalog's size table. This check runs before
/// any block is processed.
pub fn instantiate(
    id: AlgorithmId,
    key_material: &KeyMaterial,
) -> Result<CipherCore, CryptoError> {
    let descriptor = id.descriptor();
    if key_material.key().len() != descriptor.key_len
        || key_material.iv().len() != descriptor.block_len
    {
        return Err(size_error(id, key_material));
    }

    let key = key_material.key();
    Ok(match id {
        AlgorithmId::Des => CipherCore::Block(rust_crypto_core::<des::Des>(id, key_material)?),
        AlgorithmId::TripleDes => {
            CipherCore::Block(rust_crypto_core::<des::TdesEde3>(id, key_material)?)
        }
        AlgorithmId::Aes128 => {
            CipherCore::Block(rust_crypto_core::<aes::Aes128>(id, key_material)?)
        }
        AlgorithmId::Aes192 => {
            CipherCore::Block(rust_crypto_core::<aes::Aes192>(id, key_material)?)
        }
        AlgorithmId::Aes256 => {
            CipherCore::Block(rust_crypto_core::<aes::Aes256>(id, key_material)?)
        }
        AlgorithmId::Arc4_40
        | AlgorithmId::Arc4_64
        | AlgorithmId::Arc4_128
        | AlgorithmId::Arc4_256 => CipherCore::Stream(Arcfour::new(key)),
        AlgorithmId::Blowfish64 | AlgorithmId::Blowfish128 | AlgorithmId::Blowfish256 => {
            CipherCore::Block(rust_crypto_core::<blowfish::Blowfish>(id, key_material)?)
        }
        AlgorithmId::Cast5 => {
            CipherCore::Block(rust_crypto_core::<cast5::Cast5>(id, key_material)?)
        }
        AlgorithmId::Threefish256 => CipherCore::Block(Box::new(Threefish256::new(
            key,
            &key_material.iv()[..TWEAK_LEN],
        ))),
        AlgorithmId::Threefish512 => CipherCore::Block(Box::new(Threefish512::new(
            key,
            &key_material.iv()[..TWEAK_LEN],
        ))),
        AlgorithmId::Threefish1024 => CipherCore::Block(Box::new(Threefish1024::new(
            key,
            &key_material.iv()[..TWEAK_LEN],
        ))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ALL;
    use twinscan_utils::testutils::data::fixture;

    fn key_material_for(id: AlgorithmId, seed: u64) -> KeyMaterial {
        let d = id.descriptor();
        KeyMaterial::new(
            fixture(d.key_len, seed),
            fixture(d.block_len, seed.wrapping_add(500)),
        )
    }

    #[test]
    fn every_catalog_entry_instantiates() {
        for d in ALL {
            let km = key_material_for(d.id, 42);
            let core = instantiate(d.id, &km).unwrap();
            if let CipherCore::Block(core) = core {
                assert_eq!(d.block_len, core.block_len(), "{}", d.display_name);
            }
        }
    }

    #[test]
    fn every_block_core_roundtrips_one_block() {
        for d in ALL {
            let km = key_material_for(d.id, 7);
            let CipherCore::Block(core) = instantiate(d.id, &km).unwrap() else {
                continue;
            };
            let plaintext = fixture(d.block_len, 8);
            let mut block = plaintext.clone();
            core.encrypt_block(&mut block);
            assert_ne!(plaintext, block, "{}", d.display_name);
            core.decrypt_block(&mut block);
            assert_eq!(plaintext, block, "{}", d.display_name);
        }
    }

    #[test]
    fn threefish_rejects_oversized_key_before_processing() {
        let km = KeyMaterial::new(vec![0; 100], vec![0; 32]);
        let err = instantiate(AlgorithmId::Threefish256, &km).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKeyOrBlockSize { .. }));
    }

    #[test]
    fn wrong_iv_length_is_rejected() {
        let km = KeyMaterial::new(vec![0; 16], vec![0; 8]);
        let err = instantiate(AlgorithmId::Aes128, &km).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKeyOrBlockSize { .. }));
    }

    #[test]
    fn aes128_matches_reference_vector() {
        // FIPS-197 appendix C.1.
        let km = KeyMaterial::from_hex(
            "000102030405060708090a0b0c0d0e0f",
            "00000000000000000000000000000000",
        )
        .unwrap();
        let CipherCore::Block(core) = instantiate(AlgorithmId::Aes128, &km).unwrap() else {
            panic!("AES is a block cipher");
        };
        let mut block = hex::decode("00112233445566778899aabbccddeeff").unwrap();
        core.encrypt_block(&mut block);
        assert_eq!("69c4e0d86a7b0430d8cdb78070b4c55a", hex::encode(&block));
    }
}
