// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::buffer::ArrayData;
use crate::errors::BufferError;

/// The closed set of element types a buffer can hold.
///
/// Every buffer, port and array parameter carries one of these tags. Conversion
/// between any two of them is always defined (see [`Element::from_element`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Real32,
    Real64,
    Bool,
}

impl ElementType {
    pub const ALL: [ElementType; 10] = [
        ElementType::Byte,
        ElementType::Int16,
        ElementType::UInt16,
        ElementType::Int32,
        ElementType::UInt32,
        ElementType::Int64,
        ElementType::UInt64,
        ElementType::Real32,
        ElementType::Real64,
        ElementType::Bool,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ElementType::Byte => "Byte",
            ElementType::Int16 => "Int16",
            ElementType::UInt16 => "UInt16",
            ElementType::Int32 => "Int32",
            ElementType::UInt32 => "UInt32",
            ElementType::Int64 => "Int64",
            ElementType::UInt64 => "UInt64",
            ElementType::Real32 => "Real32",
            ElementType::Real64 => "Real64",
            ElementType::Bool => "Bool",
        }
    }

    /// Size of one element in bytes.
    pub fn size_of(self) -> usize {
        match self {
            ElementType::Byte | ElementType::Bool => 1,
            ElementType::Int16 | ElementType::UInt16 => 2,
            ElementType::Int32 | ElementType::UInt32 | ElementType::Real32 => 4,
            ElementType::Int64 | ElementType::UInt64 | ElementType::Real64 => 8,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, ElementType::Real32 | ElementType::Real64)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementType {
    type Err = BufferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementType::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BufferError::UnknownElementType(s.to_string()))
    }
}

/// A Rust scalar that can live inside an [`ArrayData`].
///
/// Conversions follow `as`-cast semantics: integers wrap, floats saturate when
/// narrowed to integers, and any non-zero value becomes `true`.
pub trait Element: Copy + Default + PartialEq + fmt::Debug + 'static {
    const TYPE: ElementType;

    fn to_f64(self) -> f64;
    fn to_i128(self) -> i128;
    fn from_f64(value: f64) -> Self;
    fn from_i128(value: i128) -> Self;

    fn from_element<S: Element>(value: S) -> Self {
        if S::TYPE.is_float() {
            Self::from_f64(value.to_f64())
        } else {
            Self::from_i128(value.to_i128())
        }
    }

    fn slice(data: &ArrayData) -> Option<&[Self]>;
    fn slice_mut(data: &mut ArrayData) -> Option<&mut [Self]>;
    fn wrap(values: Vec<Self>) -> ArrayData;
}

macro_rules! numeric_element {
    ($ty:ty, $variant:ident) => {
        impl Element for $ty {
            const TYPE: ElementType = ElementType::$variant;

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn to_i128(self) -> i128 {
                self as i128
            }

            fn from_f64(value: f64) -> Self {
                value as $ty
            }

            fn from_i128(value: i128) -> Self {
                value as $ty
            }

            fn slice(data: &ArrayData) -> Option<&[Self]> {
                match data {
                    ArrayData::$variant(values) => Some(values.as_slice()),
                    _ => None,
                }
            }

            fn slice_mut(data: &mut ArrayData) -> Option<&mut [Self]> {
                match data {
                    ArrayData::$variant(values) => Some(values.as_mut_slice()),
                    _ => None,
                }
            }

            fn wrap(values: Vec<Self>) -> ArrayData {
                ArrayData::$variant(values)
            }
        }
    };
}

numeric_element!(u8, Byte);
numeric_element!(i16, Int16);
numeric_element!(u16, UInt16);
numeric_element!(i32, Int32);
numeric_element!(u32, UInt32);
numeric_element!(i64, Int64);
numeric_element!(u64, UInt64);
numeric_element!(f32, Real32);
numeric_element!(f64, Real64);

impl Element for bool {
    const TYPE: ElementType = ElementType::Bool;

    fn to_f64(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }

    fn to_i128(self) -> i128 {
        i128::from(self)
    }

    fn from_f64(value: f64) -> Self {
        value != 0.0
    }

    fn from_i128(value: i128) -> Self {
        value != 0
    }

    fn slice(data: &ArrayData) -> Option<&[Self]> {
        match data {
            ArrayData::Bool(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    fn slice_mut(data: &mut ArrayData) -> Option<&mut [Self]> {
        match data {
            ArrayData::Bool(values) => Some(values.as_mut_slice()),
            _ => None,
        }
    }

    fn wrap(values: Vec<Self>) -> ArrayData {
        ArrayData::Bool(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_type_names_round_trip() {
        for ty in ElementType::ALL {
            assert_eq!(ty.name().parse::<ElementType>().unwrap(), ty);
        }
        assert_eq!("real32".parse::<ElementType>().unwrap(), ElementType::Real32);
        assert!("Handle".parse::<ElementType>().is_err());
    }

    #[test]
    fn test_conversions_follow_cast_semantics() {
        assert_eq!(<i32 as Element>::from_element(3.9_f32), 3);
        assert_eq!(<u8 as Element>::from_element(300_i32), 44);
        assert_eq!(<u8 as Element>::from_element(-1.0_f64), 0);
        assert!(<bool as Element>::from_element(0.5_f32));
        assert!(!<bool as Element>::from_element(0_u64));
        assert_eq!(<f64 as Element>::from_element(true), 1.0);
        assert_eq!(<u64 as Element>::from_element(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_size_of() {
        assert_eq!(ElementType::Byte.size_of(), 1);
        assert_eq!(ElementType::UInt16.size_of(), 2);
        assert_eq!(ElementType::Real32.size_of(), 4);
        assert_eq!(ElementType::Int64.size_of(), 8);
    }
}
