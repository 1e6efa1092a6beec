// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed, type-converting data buffers used by ports and links.
//!
//! * [`ElementType`] - the closed set of supported element types
//! * [`Element`] - maps a Rust scalar onto its `ElementType`
//! * [`ArrayData`] - owned typed storage with exhaustive conversion
//! * [`Buffer`] - shared handle used for zero-copy aliasing

mod array;
mod element;
mod shared;

pub use array::ArrayData;
pub use element::{Element, ElementType};
pub use shared::Buffer;
