//! Shift-based classical text ciphers.
//!
//! These operate on ASCII letters only; everything else passes through
//! unchanged and, for the keyed cipher, does not advance the key position.

use crate::error::CryptoError;
use crate::symmetric::Direction;

/// Constant Caesar shift over ASCII letters, preserving case.
pub(crate) fn caesar(text: &str, shift: u8, direction: Direction) -> String {
    let shift = u32::from(shift % 26);
    let shift = match direction {
        Direction::Encrypt => shift,
        Direction::Decrypt => (26 - shift) % 26,
    };
    text.chars().map(|c| shift_char(c, shift)).collect()
}

/// Keyed polyalphabetic shift with an optional constant shift on top.
///
/// The per-position shift is the key letter's alphabet value plus `shift`.
/// The key position advances on letters only, so punctuation and spaces do
/// not desynchronize the key stream.
pub(crate) fn vigenere(
    text: &str,
    key: &str,
    shift: u8,
    direction: Direction,
) -> Result<String, CryptoError> {
    let key_shifts = key_shifts(key)?;
    let mut position = 0usize;
    let out = text
        .chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                let total = (key_shifts[position % key_shifts.len()] + u32::from(shift)) % 26;
                position += 1;
                let total = match direction {
                    Direction::Encrypt => total,
                    Direction::Decrypt => (26 - total) % 26,
                };
                shift_char(c, total)
            } else {
                c
            }
        })
        .collect();
    Ok(out)
}

fn key_shifts(key: &str) -> Result<Vec<u32>, CryptoError> {
    if key.is_empty() {
        return Err(CryptoError::InvalidParameter {
            what: "key",
            reason: "polyalphabetic key must not be empty".to_string(),
        });
    }
    key.chars()
        .map(|c| {
            let c = c.to_ascii_uppercase();
            if c.is_ascii_uppercase() {
                Ok(u32::from(c as u8 - b'A'))
            } else {
                Err(CryptoError::InvalidParameter {
                    what: "key",
                    reason: format!("polyalphabetic key must be letters only, got {c:?}"),
                })
            }
        })
        .collect()
}

fn shift_char(c: char, shift: u32) -> char {
    let base = if c.is_ascii_uppercase() {
        b'A'
    } else if c.is_ascii_lowercase() {
        b'a'
    } else {
        return c;
    };
    let rotated = (u32::from(c as u8 - base) + shift) % 26;
    char::from(base + rotated as u8)
}
