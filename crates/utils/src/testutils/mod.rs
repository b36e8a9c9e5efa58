//! Test utilities shared between crates.

pub mod asserts;
pub mod data;
