//! Software ARC4 (RC4-compatible) stream cipher.
//!
//! The keystream generator is the classic 256-byte permutation with safe,
//! index-based swaps. Encryption and decryption are the same XOR path. The
//! permutation state is per-operation and zeroed on drop.

use zeroize::Zeroize;

/// ARC4 keystream state for one operation.
pub struct Arcfour {
    s: [u8; 256],
    i: u8,
    j: u8,
}

impl Arcfour {
    /// Initializes the permutation from a key of 1 to 256 bytes.
    ///
    /// # Panics
    ///
    /// Panics on an empty or oversized key. The catalog layer validates the
    /// key length against the size table before this is reached.
    pub fn new(key: &[u8]) -> Self {
        assert!(!key.is_empty() && key.len() <= 256);
        let mut s = [0u8; 256];
        for (i, slot) in s.iter_mut().enumerate() {
            *slot = i as u8;
        }
        let mut j = 0u8;
        for i in 0..256 {
            j = j
                .wrapping_add(s[i])
                .wrapping_add(key[i % key.len()]);
            s.swap(i, usize::from(j));
        }
        Self { s, i: 0, j: 0 }
    }

    /// XORs the next keystream bytes into `data`. Identical for encryption
    /// and decryption.
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        for byte in data {
            self.i = self.i.wrapping_add(1);
            self.j = self.j.wrapping_add(self.s[usize::from(self.i)]);
            self.s.swap(usize::from(self.i), usize::from(self.j));
            let k = self.s[usize::from(
                self.s[usize::from(self.i)].wrapping_add(self.s[usize::from(self.j)]),
            )];
            *byte ^= k;
        }
    }
}

impl Drop for Arcfour {
    fn drop(&mut self) {
        self.s.zeroize();
        self.i = 0;
        self.j = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinscan_utils::testutils::data::fixture;

    #[test]
    fn classic_known_answer() {
        // The widely published "Key"/"Plaintext" RC4 vector.
        let mut cipher = Arcfour::new(b"Key");
        let mut data = b"Plaintext".to_vec();
        cipher.apply_keystream(&mut data);
        assert_eq!("bbf316e8d940af0ad3", hex::encode(&data));
    }

    #[test]
    fn keystream_known_answer_16_byte_key() {
        let key: Vec<u8> = (0..16).collect();
        let mut cipher = Arcfour::new(&key);
        let mut data = vec![0u8; 32];
        cipher.apply_keystream(&mut data);
        assert_eq!(
            "e99c40f947e219cc06db97c60edd2a4fd371815ff2b742ee8f9ea5d9f937e302",
            hex::encode(&data)
        );
    }

    #[test]
    fn roundtrip_is_exact() {
        let key = fixture(32, 1);
        let plaintext = fixture(1000, 2);
        let mut data = plaintext.clone();
        Arcfour::new(&key).apply_keystream(&mut data);
        assert_ne!(plaintext, data);
        Arcfour::new(&key).apply_keystream(&mut data);
        assert_eq!(plaintext, data);
    }

    #[test]
    fn split_application_equals_whole_buffer() {
        let key = fixture(5, 3);
        let plaintext = fixture(100, 4);

        let mut whole = plaintext.clone();
        Arcfour::new(&key).apply_keystream(&mut whole);

        let mut split = plaintext;
        let mut cipher = Arcfour::new(&key);
        for chunk in split.chunks_mut(7) {
            cipher.apply_keystream(chunk);
        }
        assert_eq!(whole, split);
    }
}
