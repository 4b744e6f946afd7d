//! Reversible byte transforms applied to already-read buffers.
//!
//! These operate on byte runs after the stream has produced them; none of
//! them touch a cursor. Each returns a freshly allocated buffer of the
//! same length as the input.

use crate::error::{Error, Result};

/// XORs every byte of `data` with the single `key` byte.
///
/// Applying the same key twice restores the original data.
pub fn xor_one(data: &[u8], key: u8) -> Vec<u8> {
    data.iter().map(|b| b ^ key).collect()
}

/// XORs byte `i` of `data` with `key[i % key.len()]`, cycling the key.
///
/// An empty key is rejected rather than cycled forever. A single-byte key
/// behaves exactly like [`xor_one`] with that byte.
pub fn xor_many(data: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    if key.is_empty() {
        return Err(Error::InvalidArgument("xor key must not be empty"));
    }
    Ok(data
        .iter()
        .zip(key.iter().cycle())
        .map(|(b, k)| b ^ k)
        .collect())
}

/// Bitwise-rotates each `group_size`-byte group of `data` left by
/// `amount` bits within the group.
///
/// Only single-byte groups are supported; any other group size fails with
/// [`Error::UnsupportedOperation`]. The amount wraps modulo 8, so 0 and
/// any multiple of 8 leave the data unchanged.
pub fn rotate_left(data: &[u8], amount: u32, group_size: usize) -> Result<Vec<u8>> {
    if group_size != 1 {
        return Err(Error::UnsupportedOperation { group_size });
    }
    Ok(data.iter().map(|b| b.rotate_left(amount)).collect())
}
