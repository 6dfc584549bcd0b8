// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The variable data model: [`Type`], [`RecordDataPointer`], and [`RecordData`].

use crate::path::Path;
use num_enum::{FromPrimitive, IntoPrimitive};

/// The closed set of primitive numeric types a DATA record's payload can
/// hold, plus the `Invalid` sentinel used when no type applies (variable
/// not found, or a `type_id` on disk this reader doesn't recognise).
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, FromPrimitive)]
#[repr(u64)]
pub enum Type {
    Int8 = 0,
    Int16 = 1,
    Int32 = 2,
    Int64 = 3,
    Uint8 = 4,
    Uint16 = 5,
    Uint32 = 6,
    Uint64 = 7,
    Float32 = 8,
    Float64 = 9,
    #[num_enum(catch_all)]
    Invalid(u64),
}

impl Type {
    /// Byte width of one element of this type; `255` for `Invalid`.
    pub fn size(&self) -> u8 {
        match self {
            Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Int64 | Self::Uint64 | Self::Float64 => 8,
            Self::Invalid(_) => 255,
        }
    }

    /// A human-readable name, used for diagnostic printing and the
    /// type-mismatch error message.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int8 => "INT8",
            Self::Int16 => "INT16",
            Self::Int32 => "INT32",
            Self::Int64 => "INT64",
            Self::Uint8 => "UINT8",
            Self::Uint16 => "UINT16",
            Self::Uint32 => "UINT32",
            Self::Uint64 => "UINT64",
            Self::Float32 => "FLOAT32",
            Self::Float64 => "FLOAT64",
            Self::Invalid(_) => "UNKNOWN",
        }
    }
}

impl Default for Type {
    fn default() -> Self {
        Self::Invalid(255)
    }
}

/// A physical occurrence of a logical variable at a specific absolute
/// parent path.
///
/// A later DATA record with the same full path overwrites `file_pos` in
/// place — last writer wins.
#[derive(Clone, Debug)]
pub struct RecordData {
    /// Owned copy of the parent path at the time this record was seen.
    pub path: Path,
    /// Byte offset of the payload's first byte within the source file.
    pub file_pos: u64,
}

/// The logical variable: a `(parent_path, name)` pair, possibly backed by
/// many [`RecordData`] occurrences (one per timestep in the source
/// simulation).
///
/// Invariant: every [`RecordData`] under one `RecordDataPointer` shares the
/// same `data_length` and `type_id`; the parser rejects a file that would
/// violate this.
#[derive(Clone, Debug)]
pub struct RecordDataPointer {
    pub name: String,
    pub type_id: Type,
    pub data_length: u64,
    pub records: Vec<RecordData>,
}

impl RecordDataPointer {
    /// The parent path of this pointer's first-seen record, used by
    /// `main_equals` lookups. A `RecordDataPointer` always has at least one
    /// record by construction.
    pub fn parent_path(&self) -> &Path {
        &self.records[0].path
    }

    /// Find the exact record whose parent path equals `path`.
    pub fn find(&self, path: &Path) -> Option<&RecordData> {
        self.records.iter().find(|r| r.path.equals(path))
    }

    /// Find the exact record whose parent path equals `path`, mutably.
    pub fn find_mut(&mut self, path: &Path) -> Option<&mut RecordData> {
        self.records.iter_mut().find(|r| r.path.equals(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_size_matches_width() {
        assert_eq!(Type::Int8.size(), 1);
        assert_eq!(Type::Uint16.size(), 2);
        assert_eq!(Type::Float32.size(), 4);
        assert_eq!(Type::Float64.size(), 8);
        assert_eq!(Type::Invalid(99).size(), 255);
    }

    #[test]
    fn type_from_primitive_round_trips() {
        assert_eq!(Type::from(8u64), Type::Float32);
        assert_eq!(Type::from(9u64), Type::Float64);
        assert!(matches!(Type::from(200u64), Type::Invalid(200)));
    }

    #[test]
    fn record_data_pointer_find() {
        let dp = RecordDataPointer {
            name: "time".into(),
            type_id: Type::Float32,
            data_length: 4,
            records: vec![RecordData {
                path: Path::elements("/a/b"),
                file_pos: 128,
            }],
        };

        assert!(dp.find(&Path::elements("/a/b")).is_some());
        assert!(dp.find(&Path::elements("/a/c")).is_none());
    }
}
