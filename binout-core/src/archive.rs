// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The archive: aggregates per-file indices produced by the parser and
//! answers lookup/children/type queries across the whole member-file set.

use crate::enumerator::{FileEnumerator, GlobEnumerator};
use crate::error::BinoutError;
use crate::parser::parse_file;
use crate::path::{elements_contain, Path};
use crate::reader::{decode_elements, ElementType};
use crate::record::{RecordDataPointer, Type};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// One surviving member file: its handle and the index built while
/// scanning it.
///
/// The handle is behind a [`Mutex`] so that [`Archive`]'s query methods can
/// take `&self` (matching the rest of this crate's reader APIs) while still
/// serialising the seek-then-read pair against concurrent callers; reads
/// against distinct files proceed independently.
struct PerFileIndex {
    path: PathBuf,
    handle: Mutex<File>,
    pointers: Vec<RecordDataPointer>,
}

/// The merged view of every member file resolved from a glob pattern.
///
/// `Archive` owns every file handle, index entry, and error string it
/// contains; all of it is released when the `Archive` is dropped. There is
/// no requirement to call [`Archive::close`] explicitly — it exists for
/// parity with the external interface and simply drops `self`, which Rust
/// guarantees is safe to do at most once (the compiler rejects a second
/// call on a moved value, a stronger guarantee than "idempotent").
pub struct Archive {
    files: Vec<PerFileIndex>,
    file_errors: Vec<String>,
    error_string: Mutex<Option<String>>,
}

impl Archive {
    /// Resolve `pattern` via the default glob-based enumerator and open
    /// every matching file.
    pub fn open(pattern: &str) -> Self {
        Self::open_with(pattern, &GlobEnumerator)
    }

    /// Resolve `pattern` via a caller-supplied [`FileEnumerator`].
    pub fn open_with(pattern: &str, enumerator: &dyn FileEnumerator) -> Self {
        let candidates = enumerator.enumerate(pattern);

        if candidates.is_empty() {
            log::warn!("no files matched pattern {pattern:?}");
            return Self {
                files: Vec::new(),
                file_errors: vec![format!("{pattern}: {}", BinoutError::NoFilesFound)],
                error_string: Mutex::new(None),
            };
        }

        let mut files = Vec::with_capacity(candidates.len());
        let mut file_errors = Vec::new();

        for path in candidates {
            match File::open(&path) {
                Ok(mut handle) => match parse_file(&mut handle) {
                    Ok(pointers) => {
                        log::debug!("indexed {} ({} variables)", path.display(), pointers.len());
                        files.push(PerFileIndex {
                            path,
                            handle: Mutex::new(handle),
                            pointers,
                        });
                    }
                    Err(e) => {
                        log::warn!("failed to parse {}: {e}", path.display());
                        file_errors.push(format!("{}: {e}", path.display()));
                    }
                },
                Err(e) => {
                    log::warn!("failed to open {}: {e}", path.display());
                    file_errors.push(format!("{}: {e}", path.display()));
                }
            }
        }

        Self {
            files,
            file_errors,
            error_string: Mutex::new(None),
        }
    }

    /// Number of files that parsed successfully and remain queryable.
    pub fn num_files(&self) -> usize {
        self.files.len()
    }

    /// Release every resource this archive owns. Safe to call at most once
    /// (the value is consumed); see the struct docs for why that's a
    /// strictly stronger guarantee than runtime idempotence.
    pub fn close(self) {
        drop(self)
    }

    fn clear_error(&self) {
        *self.error_string.lock().unwrap() = None;
    }

    fn set_error(&self, err: BinoutError) {
        *self.error_string.lock().unwrap() = Some(err.to_string());
    }

    /// First-hit lookup across files: a `RecordDataPointer` matches iff its
    /// name equals the query path's last element and its parent directory
    /// `main_equals` the full query path.
    fn lookup(&self, full: &Path) -> Option<(usize, &RecordDataPointer)> {
        let name = full.last()?;

        self.files.iter().enumerate().find_map(|(i, file)| {
            file.pointers
                .iter()
                .find(|dp| dp.name == name && dp.parent_path().main_equals(full))
                .map(|dp| (i, dp))
        })
    }

    /// The type of the variable at `path`, or `Invalid` if no file has it.
    pub fn get_type_id(&self, path: &str) -> Type {
        self.clear_error();
        let full = Path::elements(path);

        match self.lookup(&full) {
            Some((_, dp)) => dp.type_id,
            None => {
                self.set_error(BinoutError::VariableNotFound);
                Type::default()
            }
        }
    }

    /// Whether the exact variable instance at `path` exists (not merely
    /// some variable of the same name elsewhere in the tree).
    pub fn variable_exists(&self, path: &str) -> bool {
        let full = Path::elements(path);
        let parent = full.parent();

        match self.lookup(&full) {
            Some((_, dp)) => dp.find(&parent).is_some(),
            None => false,
        }
    }

    /// Immediate child element names under `path`, deduplicated, in
    /// insertion order across the scan.
    pub fn get_children(&self, path: &str) -> Vec<String> {
        let path = Path::elements(path);
        let mut children: Vec<String> = Vec::new();

        for file in &self.files {
            for dp in &file.pointers {
                for record in &dp.records {
                    let mut data_elements: Vec<&str> =
                        record.path.as_slice().iter().map(String::as_str).collect();
                    data_elements.push(&dp.name);

                    if path.is_empty() {
                        if let Some(first) = data_elements.first() {
                            if !elements_contain(&children, first) {
                                children.push((*first).to_string());
                            }
                        }
                        continue;
                    }

                    let Some(path_last) = path.last() else {
                        continue;
                    };

                    let k = data_elements
                        .iter()
                        .enumerate()
                        .rev()
                        .find(|(_, el)| **el == path_last)
                        .map(|(idx, _)| idx);

                    let Some(k) = k else { continue };
                    if k + 1 > data_elements.len().saturating_sub(1) {
                        continue;
                    }
                    let candidate = data_elements[k + 1];

                    let mut path_fits = true;
                    if path.len() > 1 {
                        if k == 0 {
                            path_fits = false;
                        } else {
                            let mut path_idx = path.len() as isize - 2;
                            let mut data_idx = k as isize - 1;
                            while path_idx >= 0 {
                                if data_idx < 0
                                    || path.as_slice()[path_idx as usize] != data_elements[data_idx as usize]
                                {
                                    path_fits = false;
                                    break;
                                }
                                path_idx -= 1;
                                data_idx -= 1;
                            }
                        }
                    }

                    if path_fits && !elements_contain(&children, candidate) {
                        children.push(candidate.to_string());
                    }
                }
            }
        }

        children
    }

    /// Concatenation of every distinct per-file open/parse error, joined by
    /// newlines, or `None` if every file parsed cleanly.
    pub fn open_error(&self) -> Option<String> {
        if self.file_errors.is_empty() {
            None
        } else {
            Some(self.file_errors.join("\n"))
        }
    }

    /// The most recent query's error, or `None` if it succeeded. Cleared at
    /// the start of every query.
    pub fn error_string(&self) -> Option<String> {
        self.error_string.lock().unwrap().clone()
    }

    /// Generic payload read: resolves `path` and, if a file carries a
    /// variable there of type `T`, seeks and reads its current bytes into a
    /// vector. Returns an empty vector (with the transient error set) on
    /// type mismatch, missing path, or I/O fault; returns an empty vector
    /// with no error if no file has the variable at all.
    pub fn read<T: ElementType>(&self, path: &str) -> Vec<T> {
        self.clear_error();
        let full = Path::elements(path);
        let parent = full.parent();

        let Some((file_index, dp)) = self.lookup(&full) else {
            return Vec::new();
        };

        if dp.type_id != T::TYPE {
            self.set_error(BinoutError::TypeMismatch {
                actual: dp.type_id.name(),
                expected: T::TYPE.name(),
            });
            return Vec::new();
        }

        let Some(record) = dp.find(&parent) else {
            self.set_error(BinoutError::PathNotFound);
            return Vec::new();
        };

        let file = &self.files[file_index];
        let mut handle = file.handle.lock().unwrap();

        if handle.seek(SeekFrom::Start(record.file_pos)).is_err() {
            self.set_error(BinoutError::SeekFailed);
            return Vec::new();
        }

        let mut buf = vec![0u8; dp.data_length as usize];
        if handle.read_exact(&mut buf).is_err() {
            self.set_error(BinoutError::ReadFailed);
            return Vec::new();
        }
        drop(handle);

        decode_elements(&buf)
    }

    pub fn read_int8(&self, path: &str) -> Vec<i8> {
        self.read(path)
    }
    pub fn read_int16(&self, path: &str) -> Vec<i16> {
        self.read(path)
    }
    pub fn read_int32(&self, path: &str) -> Vec<i32> {
        self.read(path)
    }
    pub fn read_int64(&self, path: &str) -> Vec<i64> {
        self.read(path)
    }
    pub fn read_uint8(&self, path: &str) -> Vec<u8> {
        self.read(path)
    }
    pub fn read_uint16(&self, path: &str) -> Vec<u16> {
        self.read(path)
    }
    pub fn read_uint32(&self, path: &str) -> Vec<u32> {
        self.read(path)
    }
    pub fn read_uint64(&self, path: &str) -> Vec<u64> {
        self.read(path)
    }
    pub fn read_float32(&self, path: &str) -> Vec<f32> {
        self.read(path)
    }
    pub fn read_float64(&self, path: &str) -> Vec<f64> {
        self.read(path)
    }

    /// Debug dump of every file's data pointers and records, in the same
    /// nesting the original reader's console dump used.
    pub fn print_records<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "----- {} Files ---------------", self.files.len())?;

        for file in &self.files {
            writeln!(w, "------ {} Data Pointers ({}) ------", file.pointers.len(), file.path.display())?;

            for dp in &file.pointers {
                writeln!(w, "---- {} ----", dp.name)?;
                writeln!(w, "- Data Length: {} --", dp.data_length)?;
                writeln!(w, "- Type: {} -----", dp.type_id.name())?;
                writeln!(w, "---------------------")?;
                writeln!(w, "- Records: {} --", dp.records.len())?;

                for record in &dp.records {
                    writeln!(w, "- Path: {} ---", record.path)?;
                    writeln!(w, "- File Pos: {:#x} ---", record.file_pos)?;
                }
            }

            writeln!(w, "-----------------------------------")?;
        }

        writeln!(w, "-----------------------------------------------")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes() -> Vec<u8> {
        vec![0, 0, 8, 1, 1]
    }

    fn record(command: u8, data: &[u8]) -> Vec<u8> {
        let header_size = 8u64 + 1;
        let length = header_size + data.len() as u64;
        let mut out = length.to_le_bytes().to_vec();
        out.push(command);
        out.extend_from_slice(data);
        out
    }

    fn cd_record(path: &str) -> Vec<u8> {
        record(1, path.as_bytes())
    }

    fn data_record(type_id: Type, name: &str, payload: &[u8]) -> Vec<u8> {
        let type_id: u64 = type_id.into();
        let mut data = vec![type_id as u8, name.len() as u8];
        data.extend_from_slice(name.as_bytes());
        data.extend_from_slice(payload);
        record(2, &data)
    }

    fn write_binout(path: &std::path::Path, records: &[Vec<u8>]) {
        let mut bytes = header_bytes();
        for r in records {
            bytes.extend_from_slice(r);
        }
        let mut f = File::create(path).unwrap();
        f.write_all(&bytes).unwrap();
    }

    struct FixedEnumerator(Vec<PathBuf>);
    impl FileEnumerator for FixedEnumerator {
        fn enumerate(&self, _pattern: &str) -> Vec<PathBuf> {
            self.0.clone()
        }
    }

    #[test]
    fn s1_single_file_single_variable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d000.binout");
        write_binout(
            &path,
            &[
                cd_record("/ioutstat/d000001"),
                data_record(Type::Float32, "time", &0.0f32.to_le_bytes()),
            ],
        );

        let archive = Archive::open_with("*", &FixedEnumerator(vec![path]));

        assert!(archive.variable_exists("/ioutstat/d000001/time"));
        assert_eq!(archive.read_float32("/ioutstat/d000001/time"), vec![0.0f32]);
        assert_eq!(archive.get_children("/ioutstat"), vec!["d000001".to_string()]);
    }

    #[test]
    fn s2_second_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.binout");
        write_binout(
            &path,
            &[
                cd_record("/rcforc"),
                data_record(Type::Int32, "n", &1i32.to_le_bytes()),
                data_record(Type::Int32, "n", &2i32.to_le_bytes()),
            ],
        );

        let archive = Archive::open_with("*", &FixedEnumerator(vec![path]));
        assert_eq!(archive.read_int32("/rcforc/n"), vec![2]);
    }

    #[test]
    fn s3_union_of_children_across_two_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.binout");
        let b = dir.path().join("b.binout");
        write_binout(
            &a,
            &[
                cd_record("/rcforc"),
                data_record(Type::Float64, "fx", &1.0f64.to_le_bytes()),
            ],
        );
        write_binout(
            &b,
            &[
                cd_record("/rcforc"),
                data_record(Type::Float64, "fy", &2.0f64.to_le_bytes()),
            ],
        );

        let archive = Archive::open_with("*", &FixedEnumerator(vec![a, b]));
        let mut children = archive.get_children("/rcforc");
        children.sort();
        assert_eq!(children, vec!["fx".to_string(), "fy".to_string()]);

        assert_eq!(archive.read_float64("/rcforc/fy"), vec![2.0]);
    }

    #[test]
    fn s4_bad_header_isolated_other_files_still_work() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.binout");
        let bad = dir.path().join("bad.binout");

        write_binout(
            &good,
            &[
                cd_record("/a"),
                data_record(Type::Int8, "x", &[7]),
            ],
        );

        let mut bad_bytes = vec![0, 0, 9, 1, 1];
        bad_bytes.extend_from_slice(&cd_record("/a"));
        File::create(&bad).unwrap().write_all(&bad_bytes).unwrap();

        let archive = Archive::open_with("*", &FixedEnumerator(vec![good, bad]));

        assert_eq!(archive.num_files(), 1);
        assert!(archive
            .open_error()
            .unwrap()
            .contains("The record length field size is unsupported"));
        assert_eq!(archive.read_int8("/a/x"), vec![7]);
    }

    #[test]
    fn s5_missing_path_sets_error_string() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.binout");
        write_binout(&path, &[cd_record("/a"), data_record(Type::Int8, "x", &[1])]);

        let archive = Archive::open_with("*", &FixedEnumerator(vec![path]));
        let result = archive.read_int8("/a/does_not_exist");
        assert!(result.is_empty());
        assert!(archive.error_string().is_none());

        assert!(!archive.variable_exists("/a/does_not_exist"));

        let type_id = archive.get_type_id("/a/does_not_exist");
        assert!(matches!(type_id, Type::Invalid(_)));
        assert!(archive
            .error_string()
            .unwrap()
            .contains("The given variable has not been found"));
    }

    #[test]
    fn s6_type_mismatch_sets_error_and_does_not_corrupt_next_query() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.binout");
        write_binout(
            &path,
            &[
                cd_record("/a"),
                data_record(Type::Float64, "x", &1.0f64.to_le_bytes()),
            ],
        );

        let archive = Archive::open_with("*", &FixedEnumerator(vec![path]));
        let result = archive.read_int32("/a/x");
        assert!(result.is_empty());
        let err = archive.error_string().unwrap();
        assert!(err.contains("FLOAT64"));
        assert!(err.contains("INT32"));

        assert_eq!(archive.read_float64("/a/x"), vec![1.0]);
        assert!(archive.error_string().is_none());
    }

    #[test]
    fn empty_glob_yields_one_file_error_and_zero_files() {
        let archive = Archive::open_with("*", &FixedEnumerator(Vec::new()));
        assert_eq!(archive.num_files(), 0);
        assert!(archive.open_error().unwrap().contains("No files have been found"));
    }

    #[test]
    fn reopening_the_same_files_yields_identical_vectors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.binout");
        write_binout(
            &path,
            &[
                cd_record("/rcforc"),
                data_record(Type::Float64, "fx", &3.25f64.to_le_bytes()),
            ],
        );

        let first = Archive::open_with("*", &FixedEnumerator(vec![path.clone()]));
        let second = Archive::open_with("*", &FixedEnumerator(vec![path]));

        assert_eq!(first.read_float64("/rcforc/fx"), second.read_float64("/rcforc/fx"));
        assert_eq!(first.read_float64("/rcforc/fx"), vec![3.25]);
    }

    #[test]
    fn print_records_does_not_panic_and_mentions_variable_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.binout");
        write_binout(&path, &[cd_record("/a"), data_record(Type::Int8, "x", &[1])]);

        let archive = Archive::open_with("*", &FixedEnumerator(vec![path]));
        let mut buf = Vec::new();
        archive.print_records(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("x"));
    }
}
