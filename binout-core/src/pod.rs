// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plain old data helpers.
//!
//! The binout header declares the byte width (1-8) of three fields
//! (record length, command, typeid). This module centralises decoding a
//! variable-width little-endian integer into a `u64` rather than inlining
//! the zero-extension logic at every call site.

use crate::error::{BinoutError, Result};
use std::io::Read;

/// Read `width` little-endian bytes from `r` and zero-extend into a `u64`.
///
/// `width` must be in `1..=8`; this is enforced by header validation before
/// any field of a declared width is read.
pub fn read_le_uint<R: Read>(r: &mut R, width: u8) -> Result<u64> {
    debug_assert!((1..=8).contains(&width));

    let mut buf = [0u8; 8];
    r.read_exact(&mut buf[..width as usize])
        .map_err(BinoutError::Io)?;

    Ok(u64::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_zero_extended_width() {
        let mut c = Cursor::new(vec![0x01, 0x02]);
        let v = read_le_uint(&mut c, 2).unwrap();
        assert_eq!(v, 0x0201);
    }

    #[test]
    fn reads_single_byte() {
        let mut c = Cursor::new(vec![0xff]);
        let v = read_le_uint(&mut c, 1).unwrap();
        assert_eq!(v, 0xff);
    }

    #[test]
    fn reads_full_width() {
        let mut c = Cursor::new(vec![1, 0, 0, 0, 0, 0, 0, 0]);
        let v = read_le_uint(&mut c, 8).unwrap();
        assert_eq!(v, 1);
    }

    #[test]
    fn short_read_errors() {
        let mut c = Cursor::new(vec![0x01]);
        let err = read_le_uint(&mut c, 4).unwrap_err();
        assert!(matches!(err, BinoutError::Io(_)));
    }
}
