// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

use crate::buffer::{ArrayData, Element, ElementType};
use crate::spec::ParameterType;

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Real32(f32),
    Real64(f64),
    Bool(bool),
    String(String),
    Array(ArrayData),
}

impl ParameterValue {
    pub fn parameter_type(&self) -> ParameterType {
        match self {
            ParameterValue::Int32(_) => ParameterType::Int32,
            ParameterValue::UInt32(_) => ParameterType::UInt32,
            ParameterValue::Int64(_) => ParameterType::Int64,
            ParameterValue::UInt64(_) => ParameterType::UInt64,
            ParameterValue::Real32(_) => ParameterType::Real32,
            ParameterValue::Real64(_) => ParameterType::Real64,
            ParameterValue::Bool(_) => ParameterType::Bool,
            ParameterValue::String(_) => ParameterType::String,
            ParameterValue::Array(data) => ParameterType::Array(data.element_type()),
        }
    }

    /// Parse the text form of a value of `data_type`.
    ///
    /// Arrays accept whitespace or comma separated elements, optionally inside
    /// brackets; this is the inverse of `Display`.
    pub fn parse(data_type: ParameterType, text: &str) -> Result<Self, String> {
        let trimmed = text.trim();
        match data_type {
            ParameterType::Int32 => parse_scalar(trimmed).map(ParameterValue::Int32),
            ParameterType::UInt32 => parse_scalar(trimmed).map(ParameterValue::UInt32),
            ParameterType::Int64 => parse_scalar(trimmed).map(ParameterValue::Int64),
            ParameterType::UInt64 => parse_scalar(trimmed).map(ParameterValue::UInt64),
            ParameterType::Real32 => parse_scalar(trimmed).map(ParameterValue::Real32),
            ParameterType::Real64 => parse_scalar(trimmed).map(ParameterValue::Real64),
            ParameterType::Bool => parse_bool(trimmed).map(ParameterValue::Bool),
            ParameterType::String => Ok(ParameterValue::String(text.to_string())),
            ParameterType::Array(element_type) => {
                parse_array(element_type, trimmed).map(ParameterValue::Array)
            }
        }
    }

    /// Convert a structured-config value into a value of `data_type`.
    pub fn from_yaml(data_type: ParameterType, value: &serde_yaml::Value) -> Result<Self, String> {
        use serde_yaml::Value;

        match (data_type, value) {
            (ParameterType::String, Value::String(text)) => Ok(ParameterValue::String(text.clone())),
            (ParameterType::String, Value::Number(n)) => Ok(ParameterValue::String(n.to_string())),
            (ParameterType::String, Value::Bool(b)) => Ok(ParameterValue::String(b.to_string())),
            (ParameterType::Bool, Value::Bool(b)) => Ok(ParameterValue::Bool(*b)),
            (ParameterType::Array(element_type), Value::Sequence(items)) => {
                let tokens = items
                    .iter()
                    .map(|item| match item {
                        Value::Number(n) => Ok(n.to_string()),
                        Value::Bool(b) => Ok(b.to_string()),
                        Value::String(s) => Ok(s.clone()),
                        other => Err(format!("unsupported array element {:?}", other)),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                parse_tokens(element_type, tokens.iter().map(String::as_str))
                    .map(ParameterValue::Array)
            }
            (_, Value::Number(n)) => Self::parse(data_type, &n.to_string()),
            (_, Value::String(text)) => Self::parse(data_type, text),
            (_, Value::Bool(b)) => Self::parse(data_type, &b.to_string()),
            (_, other) => Err(format!("cannot use {:?} as {}", other, data_type)),
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ParameterValue::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            ParameterValue::UInt32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParameterValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ParameterValue::UInt64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            ParameterValue::Real32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterValue::Real64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParameterValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayData> {
        match self {
            ParameterValue::Array(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Int32(v) => write!(f, "{}", v),
            ParameterValue::UInt32(v) => write!(f, "{}", v),
            ParameterValue::Int64(v) => write!(f, "{}", v),
            ParameterValue::UInt64(v) => write!(f, "{}", v),
            ParameterValue::Real32(v) => write!(f, "{}", v),
            ParameterValue::Real64(v) => write!(f, "{}", v),
            ParameterValue::Bool(v) => write!(f, "{}", v),
            ParameterValue::String(v) => f.write_str(v),
            ParameterValue::Array(v) => write!(f, "{}", v),
        }
    }
}

fn parse_scalar<T: FromStr>(text: &str) -> Result<T, String>
where
    T::Err: fmt::Display,
{
    text.parse::<T>()
        .map_err(|e| format!("'{}' is not valid: {}", text, e))
}

fn parse_bool(text: &str) -> Result<bool, String> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!("'{}' is not a boolean", text)),
    }
}

fn parse_array(element_type: ElementType, text: &str) -> Result<ArrayData, String> {
    let inner = text
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(text);
    let tokens = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty());
    parse_tokens(element_type, tokens)
}

fn parse_tokens<'a>(
    element_type: ElementType,
    tokens: impl Iterator<Item = &'a str>,
) -> Result<ArrayData, String> {
    match element_type {
        ElementType::Byte => collect_tokens::<u8>(tokens),
        ElementType::Int16 => collect_tokens::<i16>(tokens),
        ElementType::UInt16 => collect_tokens::<u16>(tokens),
        ElementType::Int32 => collect_tokens::<i32>(tokens),
        ElementType::UInt32 => collect_tokens::<u32>(tokens),
        ElementType::Int64 => collect_tokens::<i64>(tokens),
        ElementType::UInt64 => collect_tokens::<u64>(tokens),
        ElementType::Real32 => collect_tokens::<f32>(tokens),
        ElementType::Real64 => collect_tokens::<f64>(tokens),
        ElementType::Bool => tokens
            .map(parse_bool)
            .collect::<Result<Vec<bool>, _>>()
            .map(ArrayData::from_vec),
    }
}

fn collect_tokens<'a, T>(tokens: impl Iterator<Item = &'a str>) -> Result<ArrayData, String>
where
    T: Element + FromStr,
    T::Err: fmt::Display,
{
    tokens
        .map(parse_scalar::<T>)
        .collect::<Result<Vec<T>, _>>()
        .map(ArrayData::from_vec)
}
