// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::buffer::{Element, ElementType};
use crate::errors::BufferError;

/// Runs `$body` with `$values` bound to the typed vector inside `$data`.
///
/// Works for both `&ArrayData` and `&mut ArrayData`; match ergonomics pick the
/// binding mode.
macro_rules! with_values {
    ($data:expr, $values:ident => $body:expr) => {
        match $data {
            ArrayData::Byte($values) => $body,
            ArrayData::Int16($values) => $body,
            ArrayData::UInt16($values) => $body,
            ArrayData::Int32($values) => $body,
            ArrayData::UInt32($values) => $body,
            ArrayData::Int64($values) => $body,
            ArrayData::UInt64($values) => $body,
            ArrayData::Real32($values) => $body,
            ArrayData::Real64($values) => $body,
            ArrayData::Bool($values) => $body,
        }
    };
}

/// Owned, typed element storage.
///
/// Serialized as `{type: <ElementType>, data: [...]}`; `Byte` data is written
/// as a base64 string to keep bundles compact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ArrayData {
    Byte(#[serde(with = "base64_bytes")] Vec<u8>),
    Int16(Vec<i16>),
    UInt16(Vec<u16>),
    Int32(Vec<i32>),
    UInt32(Vec<u32>),
    Int64(Vec<i64>),
    UInt64(Vec<u64>),
    Real32(Vec<f32>),
    Real64(Vec<f64>),
    Bool(Vec<bool>),
}

impl ArrayData {
    /// A zero-filled array of `len` elements.
    pub fn zeroed(element_type: ElementType, len: usize) -> Self {
        match element_type {
            ElementType::Byte => ArrayData::Byte(vec![0; len]),
            ElementType::Int16 => ArrayData::Int16(vec![0; len]),
            ElementType::UInt16 => ArrayData::UInt16(vec![0; len]),
            ElementType::Int32 => ArrayData::Int32(vec![0; len]),
            ElementType::UInt32 => ArrayData::UInt32(vec![0; len]),
            ElementType::Int64 => ArrayData::Int64(vec![0; len]),
            ElementType::UInt64 => ArrayData::UInt64(vec![0; len]),
            ElementType::Real32 => ArrayData::Real32(vec![0.0; len]),
            ElementType::Real64 => ArrayData::Real64(vec![0.0; len]),
            ElementType::Bool => ArrayData::Bool(vec![false; len]),
        }
    }

    pub fn from_vec<T: Element>(values: Vec<T>) -> Self {
        T::wrap(values)
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            ArrayData::Byte(_) => ElementType::Byte,
            ArrayData::Int16(_) => ElementType::Int16,
            ArrayData::UInt16(_) => ElementType::UInt16,
            ArrayData::Int32(_) => ElementType::Int32,
            ArrayData::UInt32(_) => ElementType::UInt32,
            ArrayData::Int64(_) => ElementType::Int64,
            ArrayData::UInt64(_) => ElementType::UInt64,
            ArrayData::Real32(_) => ElementType::Real32,
            ArrayData::Real64(_) => ElementType::Real64,
            ArrayData::Bool(_) => ElementType::Bool,
        }
    }

    pub fn len(&self) -> usize {
        with_values!(self, values => values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the elements as `T`, failing unless `T` is the stored type.
    pub fn as_slice<T: Element>(&self) -> Result<&[T], BufferError> {
        T::slice(self).ok_or(BufferError::TypeMismatch {
            expected: T::TYPE,
            actual: self.element_type(),
        })
    }

    pub fn as_mut_slice<T: Element>(&mut self) -> Result<&mut [T], BufferError> {
        let actual = self.element_type();
        T::slice_mut(self).ok_or(BufferError::TypeMismatch {
            expected: T::TYPE,
            actual,
        })
    }

    /// Copy every element out as `T`, converting when the stored type differs.
    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        with_values!(self, values => values.iter().map(|v| T::from_element(*v)).collect())
    }

    /// Deep, type-converting copy of all of `self` into `dest` starting at
    /// `offset`.
    pub fn copy_into(&self, dest: &mut ArrayData, offset: usize) -> Result<(), BufferError> {
        let needed = offset + self.len();
        if needed > dest.len() {
            return Err(BufferError::CapacityExceeded {
                count: self.len(),
                offset,
                capacity: dest.len(),
            });
        }
        with_values!(self, values => write_converted(values.as_slice(), dest, offset));
        Ok(())
    }

    /// Grow (zero-filled) or shrink to `len` elements.
    pub fn resize(&mut self, len: usize) {
        with_values!(self, values => values.resize(len, Default::default()))
    }

    pub fn fill_zero(&mut self) {
        with_values!(self, values => values.iter_mut().for_each(|v| *v = Default::default()))
    }
}

fn write_converted<S: Element>(source: &[S], dest: &mut ArrayData, offset: usize) {
    let end = offset + source.len();
    if let Some(same) = S::slice_mut(dest) {
        same[offset..end].copy_from_slice(source);
        return;
    }
    with_values!(dest, values => {
        for (d, s) in values[offset..end].iter_mut().zip(source) {
            *d = Element::from_element(*s);
        }
    })
}

impl fmt::Display for ArrayData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_values!(self, values => {
            write!(f, "[")?;
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", v)?;
            }
            write!(f, "]")
        })
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD
            .decode(text.trim().as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
