// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Random-access reader for the LS-DYNA `binout` family of multi-file
//! binary simulation output containers.
//!
//! A binout archive is a set of files, each an append-only sequence of
//! records that, when replayed, reconstructs a hierarchical virtual
//! filesystem whose leaves are typed numeric arrays keyed by a POSIX-style
//! path plus a variable name. [`Archive::open`] resolves a glob pattern
//! into member files, parses each once, and merges the results into a
//! single queryable index.
//!
//! ```no_run
//! use binout_core::Archive;
//!
//! let archive = Archive::open("/path/to/simulation/binout*");
//! if archive.variable_exists("/rcforc/fx") {
//!     let fx: Vec<f64> = archive.read_float64("/rcforc/fx");
//!     println!("{} samples", fx.len());
//! }
//! ```
//!
//! This crate does not write binout files, expand glob patterns beyond the
//! default [`enumerator::GlobEnumerator`], or read the sibling `d3plot`
//! format — those are out of scope by design.

pub mod archive;
pub mod command;
pub mod enumerator;
pub mod error;
pub mod header;
pub mod parser;
pub mod path;
pub mod pod;
pub mod reader;
pub mod record;

pub use archive::Archive;
pub use error::{BinoutError, Result};
pub use path::Path;
pub use record::{RecordData, RecordDataPointer, Type};
