// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The payload reader: given an index entry, seek and read the typed byte
//! run into a vector.

use crate::record::Type;

/// A primitive numeric type the payload reader can materialise.
///
/// Implemented for exactly the ten primitive types in [`Type`]; there is
/// no `Invalid` implementation since a query can never ask for that type.
pub trait ElementType: Sized + Copy {
    /// The [`Type`] variant this Rust type corresponds to on disk.
    const TYPE: Type;
    /// Byte width of one element.
    const SIZE: usize;

    /// Decode one little-endian element from exactly `Self::SIZE` bytes.
    fn from_le_bytes(bytes: &[u8]) -> Self;
}

macro_rules! impl_element_type {
    ($rust_ty:ty, $variant:expr) => {
        impl ElementType for $rust_ty {
            const TYPE: Type = $variant;
            const SIZE: usize = std::mem::size_of::<$rust_ty>();

            fn from_le_bytes(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$rust_ty>()];
                buf.copy_from_slice(bytes);
                <$rust_ty>::from_le_bytes(buf)
            }
        }
    };
}

impl_element_type!(i8, Type::Int8);
impl_element_type!(i16, Type::Int16);
impl_element_type!(i32, Type::Int32);
impl_element_type!(i64, Type::Int64);
impl_element_type!(u8, Type::Uint8);
impl_element_type!(u16, Type::Uint16);
impl_element_type!(u32, Type::Uint32);
impl_element_type!(u64, Type::Uint64);
impl_element_type!(f32, Type::Float32);
impl_element_type!(f64, Type::Float64);

/// Reinterpret `bytes` as a contiguous run of little-endian `T`.
///
/// `bytes.len()` is guaranteed by the caller to be an exact multiple of
/// `T::SIZE` (the format guarantees exact divisibility of `data_length`).
pub fn decode_elements<T: ElementType>(bytes: &[u8]) -> Vec<T> {
    bytes.chunks_exact(T::SIZE).map(T::from_le_bytes).collect()
}
