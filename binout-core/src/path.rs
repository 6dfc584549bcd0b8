// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hierarchical path primitives.
//!
//! A [`Path`] is an ordered sequence of non-empty string elements with an
//! implicit leading root. There is no distinct representation for "absolute"
//! vs. "relative" beyond how the path was parsed from its source string; both
//! kinds are just a `Vec<String>` of elements.

/// An ordered sequence of path elements, e.g. `["ioutstat", "d000001"]` for
/// the source string `/ioutstat/d000001`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Path {
    elements: Vec<String>,
}

impl Path {
    /// An empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Split `src` into path elements, dropping empty segments.
    ///
    /// A leading `/` is implied by [`is_abs`] and is never represented as an
    /// element.
    pub fn elements(src: &str) -> Self {
        let elements = src
            .split('/')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self { elements }
    }

    /// Whether `src` begins with `/`.
    pub fn is_abs(src: &str) -> bool {
        src.starts_with('/')
    }

    pub fn as_slice(&self) -> &[String] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.elements.last().map(String::as_str)
    }

    /// Append `rel`'s elements onto `self`. No normalisation is performed.
    pub fn join(&mut self, rel: &Path) {
        self.elements.extend(rel.elements.iter().cloned());
    }

    /// Append a single already-split element.
    pub fn push(&mut self, element: impl Into<String>) {
        self.elements.push(element.into());
    }

    /// This path with its final element dropped, e.g. the directory
    /// portion of a full `.../variable_name` path. Empty paths stay empty.
    pub fn parent(&self) -> Path {
        if self.elements.is_empty() {
            self.clone()
        } else {
            Path {
                elements: self.elements[..self.elements.len() - 1].to_vec(),
            }
        }
    }

    /// Normalise in place: drop `.` elements, and pop the previous element
    /// for every `..` encountered (or drop the `..` if there is nothing to
    /// pop). Idempotent.
    pub fn parse(&mut self) {
        let mut normalised: Vec<String> = Vec::with_capacity(self.elements.len());

        for element in self.elements.drain(..) {
            match element.as_str() {
                "." => {}
                ".." => {
                    normalised.pop();
                }
                _ => normalised.push(element),
            }
        }

        self.elements = normalised;
    }

    /// Element-wise equality.
    pub fn equals(&self, other: &Path) -> bool {
        self.elements == other.elements
    }

    /// Prefix equality ignoring the final element, used to test whether two
    /// data records belong to the same parent directory.
    ///
    /// The index stores a `RecordDataPointer`'s parent directory (no trailing
    /// variable name) alongside full `directory/variable_name` query paths
    /// that are exactly one element longer, so this also accepts the
    /// asymmetric case: when one side is exactly one element longer than the
    /// other, the longer side's last element is dropped and the remainder is
    /// compared against the shorter side in full.
    pub fn main_equals(&self, other: &Path) -> bool {
        if self.elements.is_empty() || other.elements.is_empty() {
            return false;
        }

        match self.elements.len().cmp(&other.elements.len()) {
            std::cmp::Ordering::Equal => {
                self.elements[..self.elements.len() - 1] == other.elements[..other.elements.len() - 1]
            }
            std::cmp::Ordering::Greater if self.elements.len() == other.elements.len() + 1 => {
                self.elements[..self.elements.len() - 1] == other.elements[..]
            }
            std::cmp::Ordering::Less if other.elements.len() == self.elements.len() + 1 => {
                other.elements[..other.elements.len() - 1] == self.elements[..]
            }
            _ => false,
        }
    }

    /// Render as `"/"` + elements joined by `/`.
    pub fn to_display_string(&self) -> String {
        let mut out = String::from("/");
        out.push_str(&self.elements.join("/"));
        out
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl From<&str> for Path {
    fn from(src: &str) -> Self {
        Self::elements(src)
    }
}

/// Linear membership test, used to de-duplicate a children listing while
/// preserving first-seen order.
pub fn elements_contain(set: &[String], s: &str) -> bool {
    set.iter().any(|e| e == s)
}
