//! Alignment and UTF-16 helpers shared by the section and version builders.

use std::{any::type_name, mem::size_of, vec::Vec};

use zerocopy::FromBytes;

use crate::ReadError;

/// Read one of the [`types`](crate::types) structures from the start of a
/// byte slice.
pub fn read<T: FromBytes + Copy>(data: &[u8]) -> Result<T, ReadError> {
    T::read_from_prefix(data).map(|(value, _)| value).map_err(|_| {
        ReadError(format!(
            "expected {} bytes for {}, got {}",
            size_of::<T>(),
            type_name::<T>(),
            data.len()
        ))
    })
}

/// Round a section offset up to the next multiple of `alignment`, a power of
/// two.
pub fn align_up(value: u32, alignment: u32) -> u32 {
    (value + alignment - 1) & !(alignment - 1)
}

/// Extend `data` with zero bytes up to the next multiple of `alignment`.
pub fn pad_to(data: &mut Vec<u8>, alignment: usize) {
    let len = data.len();
    data.resize(len + (alignment - len % alignment) % alignment, 0);
}

/// Number of UTF-16 code units needed to encode a string.
pub fn utf16_len(string: &str) -> usize { string.encode_utf16().count() }

/// Encode a string as UTF-16LE with a terminating NUL.
pub fn utf16_nul_terminated(string: &str) -> Vec<u8> {
    string.encode_utf16().chain([0]).flat_map(|unit| unit.to_le_bytes()).collect()
}
