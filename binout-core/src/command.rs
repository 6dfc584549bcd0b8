// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Record command codes.

use num_enum::{FromPrimitive, IntoPrimitive};

/// The command byte that precedes a record's data.
///
/// All variants other than `Cd` and `Data` are treated as opaque by the
/// parser: their payload is skipped and their name is retained only for
/// diagnostic printing (`print_records`, debug logging).
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, FromPrimitive)]
#[repr(u64)]
pub enum Command {
    Null = 0,
    Cd = 1,
    Data = 2,
    Variable = 3,
    BeginSymbolTable = 4,
    EndSymbolTable = 5,
    SymbolTableOffset = 6,
    #[num_enum(catch_all)]
    Unknown(u64),
}

impl Command {
    /// A human-readable name, used only for diagnostic printing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Cd => "CD",
            Self::Data => "DATA",
            Self::Variable => "VARIABLE",
            Self::BeginSymbolTable => "BEGINSYMBOLTABLE",
            Self::EndSymbolTable => "ENDSYMBOLTABLE",
            Self::SymbolTableOffset => "SYMBOLTABLEOFFSET",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}
