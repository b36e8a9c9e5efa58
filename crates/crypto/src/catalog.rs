//! Catalog of every symmetric algorithm this engine supports.
//!
//! The catalog is purely descriptive: one immutable [AlgorithmDescriptor]
//! per supported algorithm, looked up by [AlgorithmId] or by display name.
//! Instantiating an algorithm with key material happens through
//! [AlgorithmId::descriptor] plus [crate::symmetric::cores::instantiate]
//! (or, for callers that want a not-yet-keyed handle, [CipherHandle]).

use crate::error::CryptoError;
use crate::symmetric::cores::{self, CipherCore};
use crate::symmetric::KeyMaterial;

/// Stable identifiers of the supported algorithms.
///
/// The enumeration is consumed by the settings/GUI layer outside this crate;
/// its order and names must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    /// DES, 56-bit key in 8 key bytes.
    Des,
    /// Triple DES (EDE, three independent keys).
    TripleDes,
    /// AES (Rijndael) with a 128-bit key.
    Aes128,
    /// AES (Rijndael) with a 192-bit key.
    Aes192,
    /// AES (Rijndael) with a 256-bit key.
    Aes256,
    /// ARC4 stream cipher, 40-bit key.
    Arc4_40,
    /// ARC4 stream cipher, 64-bit key.
    Arc4_64,
    /// ARC4 stream cipher, 128-bit key.
    Arc4_128,
    /// ARC4 stream cipher, 256-bit key.
    Arc4_256,
    /// Blowfish with a 64-bit key.
    Blowfish64,
    /// Blowfish with a 128-bit key.
    Blowfish128,
    /// Blowfish with a 256-bit key.
    Blowfish256,
    /// CAST5 (CAST-128) with a 128-bit key.
    Cast5,
    /// Threefish with 256-bit key and block.
    Threefish256,
    /// Threefish with 512-bit key and block.
    Threefish512,
    /// Threefish with 1024-bit key and block.
    Threefish1024,
}

/// Immutable description of one supported algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmDescriptor {
    /// The algorithm this entry describes.
    pub id: AlgorithmId,
    /// Key length in bytes.
    pub key_len: usize,
    /// Block length in bytes (1 for stream ciphers).
    pub block_len: usize,
    /// Human-readable name, used by algorithm-selection UIs.
    pub display_name: &'static str,
}

/// All supported algorithms, in stable order.
pub const ALL: &[AlgorithmDescriptor] = &[
    AlgorithmDescriptor {
        id: AlgorithmId::Des,
        key_len: 8,
        block_len: 8,
        display_name: "DES",
    },
    AlgorithmDescriptor {
        id: AlgorithmId::TripleDes,
        key_len: 24,
        block_len: 8,
        display_name: "Triple DES",
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Aes128,
        key_len: 16,
        block_len: 16,
        display_name: "AES-128 (Rijndael)",
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Aes192,
        key_len: 24,
        block_len: 16,
        display_name: "AES-192 (Rijndael)",
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Aes256,
        key_len: 32,
        block_len: 16,
        display_name: "AES-256 (Rijndael)",
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Arc4_40,
        key_len: 5,
        block_len: 1,
        display_name: "ARC4 40bit",
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Arc4_64,
        key_len: 8,
        block_len: 1,
        display_name: "ARC4 64bit",
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Arc4_128,
        key_len: 16,
        block_len: 1,
        display_name: "ARC4 128bit",
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Arc4_256,
        key_len: 32,
        block_len: 1,
        display_name: "ARC4 256bit",
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Blowfish64,
        key_len: 8,
        block_len: 8,
        display_name: "Blowfish 64bit",
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Blowfish128,
        key_len: 16,
        block_len: 8,
        display_name: "Blowfish 128bit",
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Blowfish256,
        key_len: 32,
        block_len: 8,
        display_name: "Blowfish 256bit",
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Cast5,
        key_len: 16,
        block_len: 8,
        display_name: "CAST5",
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Threefish256,
        key_len: 32,
        block_len: 32,
        display_name: "Threefish-256",
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Threefish512,
        key_len: 64,
        block_len: 64,
        display_name: "Threefish-512",
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Threefish1024,
        key_len: 128,
        block_len: 128,
        display_name: "Threefish-1024",
    },
];

impl AlgorithmId {
    /// Returns the descriptor for this algorithm.
    pub fn descriptor(self) -> &'static AlgorithmDescriptor {
        ALL.iter()
            .find(|d| d.id == self)
            .expect("every AlgorithmId has a catalog entry")
    }

    /// Returns a not-yet-keyed handle for this algorithm.
    pub fn instantiate(self) -> CipherHandle {
        CipherHandle {
            descriptor: self.descriptor(),
        }
    }
}

/// Looks an algorithm up by its display name.
pub fn find_by_name(name: &str) -> Result<&'static AlgorithmDescriptor, CryptoError> {
    ALL.iter()
        .find(|d| d.display_name.eq_ignore_ascii_case(name))
        .ok_or_else(|| CryptoError::UnknownAlgorithm {
            name: name.to_string(),
        })
}

/// A cipher selected from the catalog but not yet bound to a key.
///
/// Binding key material produces a concrete cipher core and validates the
/// key/IV sizes against the descriptor's size table.
#[derive(Debug, Clone, Copy)]
pub struct CipherHandle {
    descriptor: &'static AlgorithmDescriptor,
}

impl CipherHandle {
    /// The descriptor this handle was created from.
    pub fn descriptor(&self) -> &'static AlgorithmDescriptor {
        self.descriptor
    }

    /// Binds key material, producing a concrete cipher core.
    ///
    /// Fails with [CryptoError::InvalidKeyOrBlockSize] before any block is
    /// processed if the material does not match the size table.
    pub fn with_key(&self, key_material: &KeyMaterial) -> Result<CipherCore, CryptoError> {
        cores::instantiate(self.descriptor.id, key_material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_has_positive_sizes() {
        for d in ALL {
            assert!(d.key_len > 0, "{}", d.display_name);
            assert!(d.block_len > 0, "{}", d.display_name);
        }
    }

    #[test]
    fn descriptor_lookup_is_consistent() {
        for d in ALL {
            assert_eq!(d, d.id.descriptor());
        }
    }

    #[test]
    fn list_order_is_stable() {
        assert_eq!(AlgorithmId::Des, ALL[0].id);
        assert_eq!(AlgorithmId::Threefish1024, ALL[ALL.len() - 1].id);
        assert_eq!(16, ALL.len());
    }

    #[test]
    fn find_by_name_is_case_insensitive() {
        assert_eq!(
            AlgorithmId::Cast5,
            find_by_name("cast5").unwrap().id
        );
        assert_eq!(
            AlgorithmId::Threefish512,
            find_by_name("Threefish-512").unwrap().id
        );
    }

    #[test]
    fn find_by_unknown_name_fails() {
        let err = find_by_name("ROT13").unwrap_err();
        assert!(matches!(err, CryptoError::UnknownAlgorithm { .. }));
    }
}
