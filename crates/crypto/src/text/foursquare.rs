//! Four-square grid substitution over a 6x6 alphabet.
//!
//! The four grids share the A-Z0-9 alphabet: the two plain grids (upper
//! left, lower right) hold it in order, the two cipher grids (upper right,
//! lower left) are keyed. A pair of plaintext characters is looked up in the
//! plain grids and replaced by the characters at the crossed row/column
//! positions of the cipher grids; decryption crosses back.

use crate::symmetric::Direction;

const GRID_DIM: usize = 6;
const GRID_LEN: usize = GRID_DIM * GRID_DIM;
const ALPHABET: &[u8; GRID_LEN] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// The two keyed cipher grids. The plain grids are always [ALPHABET].
pub(crate) struct FourSquare {
    upper_right: [u8; GRID_LEN],
    lower_left: [u8; GRID_LEN],
}

impl FourSquare {
    pub(crate) fn new(key_upper_right: &str, key_lower_left: &str) -> Self {
        Self {
            upper_right: keyed_grid(key_upper_right),
            lower_left: keyed_grid(key_lower_left),
        }
    }

    /// Substitutes pairs of characters. Odd-length input is padded with a
    /// trailing space; pairs containing characters outside the grid alphabet
    /// pass through unchanged. Grid lookups ignore case, substituted output
    /// is uppercase.
    pub(crate) fn transform(&self, text: &str, direction: Direction) -> String {
        let mut chars: Vec<char> = text.chars().collect();
        if chars.len() % 2 == 1 {
            chars.push(' ');
        }
        let mut out = String::with_capacity(chars.len());
        for pair in chars.chunks_exact(2) {
            let (first_grid, second_grid) = match direction {
                Direction::Encrypt => (&ALPHABET[..], &ALPHABET[..]),
                Direction::Decrypt => (&self.upper_right[..], &self.lower_left[..]),
            };
            match (
                grid_position(first_grid, pair[0]),
                grid_position(second_grid, pair[1]),
            ) {
                (Some((row_a, col_a)), Some((row_b, col_b))) => match direction {
                    Direction::Encrypt => {
                        out.push(char::from(self.upper_right[row_a * GRID_DIM + col_b]));
                        out.push(char::from(self.lower_left[row_b * GRID_DIM + col_a]));
                    }
                    Direction::Decrypt => {
                        out.push(char::from(ALPHABET[row_a * GRID_DIM + col_b]));
                        out.push(char::from(ALPHABET[row_b * GRID_DIM + col_a]));
                    }
                },
                _ => {
                    out.push(pair[0]);
                    out.push(pair[1]);
                }
            }
        }
        out
    }
}

/// Key letters in first-occurrence order, then the rest of the alphabet.
fn keyed_grid(key: &str) -> [u8; GRID_LEN] {
    let mut grid = [0u8; GRID_LEN];
    let mut used = [false; GRID_LEN];
    let mut filled = 0;
    for c in key.chars() {
        let Some(index) = alphabet_index(c) else {
            continue;
        };
        if !used[index] {
            used[index] = true;
            grid[filled] = ALPHABET[index];
            filled += 1;
        }
    }
    for (index, &c) in ALPHABET.iter().enumerate() {
        if !used[index] {
            grid[filled] = c;
            filled += 1;
        }
    }
    grid
}

fn alphabet_index(c: char) -> Option<usize> {
    let c = c.to_ascii_uppercase();
    if c.is_ascii_uppercase() {
        Some(c as usize - 'A' as usize)
    } else if c.is_ascii_digit() {
        Some(26 + c as usize - '0' as usize)
    } else {
        None
    }
}

fn grid_position(grid: &[u8], c: char) -> Option<(usize, usize)> {
    if !c.is_ascii() {
        return None;
    }
    let c = c.to_ascii_uppercase() as u8;
    grid.iter()
        .position(|&g| g == c)
        .map(|index| (index / GRID_DIM, index % GRID_DIM))
}
