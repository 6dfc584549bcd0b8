// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-file fixed header, read once at offset 0.

use crate::error::{BinoutError, Result};
use std::io::Read;

const LITTLE_ENDIAN: u8 = 0;
const FLOAT_IEEE: u8 = 0;

/// The fixed-layout header every binout file begins with.
#[derive(Clone, Copy, Debug)]
pub struct Header {
    pub endianness: u8,
    pub float_format: u8,
    pub record_length_field_size: u8,
    pub record_command_field_size: u8,
    pub record_typeid_field_size: u8,
}

impl Header {
    /// Read and validate the header from `r`. `r` must be positioned at
    /// offset 0.
    pub fn read<R: Read>(r: &mut R) -> Result<Self> {
        let mut buf = [0u8; 5];
        r.read_exact(&mut buf).map_err(|_| BinoutError::HeaderTruncated)?;

        let header = Self {
            endianness: buf[0],
            float_format: buf[1],
            record_length_field_size: buf[2],
            record_command_field_size: buf[3],
            record_typeid_field_size: buf[4],
        };

        header.validate()?;

        Ok(header)
    }

    fn validate(&self) -> Result<()> {
        if self.endianness != LITTLE_ENDIAN {
            return Err(BinoutError::UnsupportedEndianness);
        }
        if self.record_length_field_size == 0 || self.record_length_field_size > 8 {
            return Err(BinoutError::UnsupportedLengthFieldSize);
        }
        if self.record_command_field_size == 0 || self.record_command_field_size > 8 {
            return Err(BinoutError::UnsupportedCommandFieldSize);
        }
        if self.record_typeid_field_size == 0 || self.record_typeid_field_size > 8 {
            return Err(BinoutError::UnsupportedTypeIdFieldSize);
        }
        if self.float_format != FLOAT_IEEE {
            return Err(BinoutError::UnsupportedFloatFormat);
        }

        Ok(())
    }
}
