// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::buffer::ElementType;

/// Errors raised by buffer allocation, access and copying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BufferError {
    /// A copy would write past the end of the destination buffer.
    #[error("Buffer capacity exceeded: {count} elements at offset {offset} do not fit in {capacity}")]
    CapacityExceeded {
        count: usize,
        offset: usize,
        capacity: usize,
    },

    /// Typed access with the wrong element type.
    #[error("Buffer type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: ElementType,
        actual: ElementType,
    },

    #[error("Unknown element type '{0}'")]
    UnknownElementType(String),
}
