// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::buffer::ElementType;

/// Declared type of a region parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterType {
    Int32,
    UInt32,
    Int64,
    UInt64,
    Real32,
    Real64,
    Bool,
    String,
    Array(ElementType),
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterType::Int32 => f.write_str("Int32"),
            ParameterType::UInt32 => f.write_str("UInt32"),
            ParameterType::Int64 => f.write_str("Int64"),
            ParameterType::UInt64 => f.write_str("UInt64"),
            ParameterType::Real32 => f.write_str("Real32"),
            ParameterType::Real64 => f.write_str("Real64"),
            ParameterType::Bool => f.write_str("Bool"),
            ParameterType::String => f.write_str("String"),
            ParameterType::Array(element_type) => write!(f, "Array<{}>", element_type),
        }
    }
}

/// When a parameter may be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessMode {
    /// Only settable through the creation parameters.
    CreateOnly,
    /// Never settable; reported by the region.
    ReadOnly,
    ReadWrite,
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessMode::CreateOnly => f.write_str("create-only"),
            AccessMode::ReadOnly => f.write_str("read-only"),
            AccessMode::ReadWrite => f.write_str("read-write"),
        }
    }
}

/// Contract for one named parameter.
///
/// `count` is 1 for scalars and 0 for strings and variable-length arrays.
/// `default_value` is text in the same format the parameter parser accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub data_type: ParameterType,
    pub count: usize,
    pub default_value: Option<String>,
    pub access: AccessMode,
    pub description: String,
}

impl ParameterSpec {
    pub fn new(data_type: ParameterType) -> Self {
        let count = match data_type {
            ParameterType::String | ParameterType::Array(_) => 0,
            _ => 1,
        };
        Self {
            data_type,
            count,
            default_value: None,
            access: AccessMode::ReadWrite,
            description: String::new(),
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_access(mut self, access: AccessMode) -> Self {
        self.access = access;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
