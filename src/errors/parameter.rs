// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for region parameter access.
//!
//! These are programming or configuration errors (wrong name, wrong type,
//! writing a read-only value), never runtime conditions.

use thiserror::Error;

use crate::buffer::ElementType;
use crate::spec::{AccessMode, ParameterType};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// The region type does not declare this parameter.
    #[error("Unknown parameter '{name}' for region type '{region_type}'")]
    Unknown { region_type: String, name: String },

    /// A resolved parameter map has no value for this name.
    #[error("Parameter '{name}' has no value")]
    Missing { name: String },

    #[error("Parameter '{name}' is {expected}, not {actual}")]
    TypeMismatch {
        name: String,
        expected: ParameterType,
        actual: ParameterType,
    },

    #[error("Parameter '{name}' is {access} and cannot be {operation}")]
    AccessDenied {
        name: String,
        access: AccessMode,
        operation: &'static str,
    },

    #[error("Array parameter '{name}' of element type {element_type} is not handled")]
    UnsupportedArrayType {
        name: String,
        element_type: ElementType,
    },

    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// The region implementation declared the parameter but does not serve it.
    #[error("Parameter '{name}' is not handled by the region implementation")]
    NotHandled { name: String },

    #[error("Malformed parameter document: {0}")]
    Malformed(String),
}
