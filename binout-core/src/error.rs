// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types.

use thiserror::Error;

/// An error produced while opening or parsing one binout file, or while
/// servicing a query against an already-open [`crate::archive::Archive`].
#[derive(Debug, Error)]
pub enum BinoutError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported Endianess")]
    UnsupportedEndianness,

    #[error("The float format is unsupported")]
    UnsupportedFloatFormat,

    #[error("The record length field size is unsupported")]
    UnsupportedLengthFieldSize,

    #[error("The command length field size is unsupported")]
    UnsupportedCommandFieldSize,

    #[error("The typeid field size is unsupported")]
    UnsupportedTypeIdFieldSize,

    #[error("Failed to read header")]
    HeaderTruncated,

    #[error("Failed to read record length")]
    RecordLengthTruncated,

    #[error("Failed to read command")]
    RecordCommandTruncated,

    #[error("Failed to read PATH of CD record")]
    CdPathTruncated,

    #[error("Failed to read TYPEID of DATA record")]
    DataTypeIdTruncated,

    #[error("Failed to read Name length of DATA record")]
    DataNameLengthTruncated,

    #[error("Failed to read Name of DATA record")]
    DataNameTruncated,

    #[error("Failed to skip Data of DATA record")]
    DataSkipFailed,

    #[error("Failed to skip data of a record")]
    RecordSkipFailed,

    #[error(
        "The data length of one record is different from another even though they should be the same"
    )]
    InconsistentDataLength,

    #[error("The given path has not been found")]
    PathNotFound,

    #[error("The given variable has not been found")]
    VariableNotFound,

    #[error("The data is of type {actual} instead of {expected}")]
    TypeMismatch {
        actual: &'static str,
        expected: &'static str,
    },

    #[error("Failed to seek to the position of the data")]
    SeekFailed,

    #[error("Failed to read the data")]
    ReadFailed,

    #[error("No files have been found")]
    NoFilesFound,
}

pub type Result<T, E = BinoutError> = std::result::Result<T, E>;
