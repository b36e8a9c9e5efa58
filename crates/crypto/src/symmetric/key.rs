use zeroize::Zeroize;

/// Key and IV/tweak bytes for one cipher operation.
///
/// Produced by key derivation ([crate::kdf]) or supplied directly by the
/// caller. The key length must equal the algorithm descriptor's key length
/// and the IV/tweak length its block length; a transform created from
/// mismatched material fails immediately, before any bytes are processed.
///
/// The bytes are zeroed on drop. This is a best-effort hygiene measure for
/// per-operation secrets, not a guarantee against e.g. swapped-out memory.
pub struct KeyMaterial {
    key: Vec<u8>,
    iv: Vec<u8>,
}

impl KeyMaterial {
    /// Creates key material from raw key and IV/tweak bytes.
    pub fn new(key: Vec<u8>, iv: Vec<u8>) -> Self {
        Self { key, iv }
    }

    /// Creates key material from hex strings. Meant for test vectors; the
    /// hex input circumvents the zero-on-drop protection.
    pub fn from_hex(key_hex: &str, iv_hex: &str) -> Result<Self, hex::FromHexError> {
        Ok(Self {
            key: hex::decode(key_hex)?,
            iv: hex::decode(iv_hex)?,
        })
    }

    /// The key bytes.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// The IV/tweak bytes.
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "KeyMaterial(key_len={}, iv_len={})",
            self.key.len(),
            self.iv.len()
        )
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.key.zeroize();
        self.iv.zeroize();
    }
}

impl PartialEq for KeyMaterial {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.iv == other.iv
    }
}

impl Eq for KeyMaterial {}
