// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use indexmap::IndexMap;

use crate::buffer::{ArrayData, ElementType};
use crate::errors::ParameterError;
use crate::params::ParameterValue;
use crate::spec::{AccessMode, ParameterType, RegionSpec};

/// Untyped creation parameters as they arrive from a config document.
pub type RawParameters = IndexMap<String, serde_yaml::Value>;

/// Parse a YAML (or JSON) mapping of creation parameters.
///
/// An empty or whitespace-only string means "no parameters".
pub fn parse_parameters(text: &str) -> Result<RawParameters, ParameterError> {
    if text.trim().is_empty() {
        return Ok(RawParameters::new());
    }
    let value: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| ParameterError::Malformed(e.to_string()))?;
    match value {
        serde_yaml::Value::Null => Ok(RawParameters::new()),
        serde_yaml::Value::Mapping(mapping) => mapping
            .into_iter()
            .map(|(key, value)| match key {
                serde_yaml::Value::String(key) => Ok((key, value)),
                other => Err(ParameterError::Malformed(format!(
                    "parameter names must be strings, found {:?}",
                    other
                ))),
            })
            .collect(),
        other => Err(ParameterError::Malformed(format!(
            "expected a mapping of parameters, found {:?}",
            other
        ))),
    }
}

/// Typed creation parameters handed to a region implementation.
///
/// Produced by [`ValueMap::resolve`], so every parameter the region type
/// declares with a default is present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueMap(IndexMap<String, ParameterValue>);

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `raw` against the region spec, convert each value to its declared type
    /// and fill in defaults for anything left out.
    pub fn resolve(
        region_type: &str,
        spec: &RegionSpec,
        raw: &RawParameters,
    ) -> Result<Self, ParameterError> {
        let mut values = IndexMap::new();

        for (name, value) in raw {
            let parameter = spec
                .parameter(name)
                .ok_or_else(|| ParameterError::Unknown {
                    region_type: region_type.to_string(),
                    name: name.clone(),
                })?;
            if parameter.access == AccessMode::ReadOnly {
                return Err(ParameterError::AccessDenied {
                    name: name.clone(),
                    access: parameter.access,
                    operation: "set at creation",
                });
            }
            let typed = ParameterValue::from_yaml(parameter.data_type, value).map_err(|reason| {
                ParameterError::InvalidValue {
                    name: name.clone(),
                    reason,
                }
            })?;
            values.insert(name.clone(), typed);
        }

        for (name, parameter) in spec.parameters() {
            if values.contains_key(name) {
                continue;
            }
            if let Some(default) = &parameter.default_value {
                let typed = ParameterValue::parse(parameter.data_type, default).map_err(|reason| {
                    ParameterError::InvalidValue {
                        name: name.clone(),
                        reason: format!("bad default: {}", reason),
                    }
                })?;
                values.insert(name.clone(), typed);
            }
        }

        Ok(Self(values))
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParameterValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParameterValue)> {
        self.0.iter()
    }

    fn require(&self, name: &str) -> Result<&ParameterValue, ParameterError> {
        self.0.get(name).ok_or_else(|| ParameterError::Missing {
            name: name.to_string(),
        })
    }

    fn typed<T>(
        &self,
        name: &str,
        expected: ParameterType,
        extract: impl FnOnce(&ParameterValue) -> Option<T>,
    ) -> Result<T, ParameterError> {
        let value = self.require(name)?;
        extract(value).ok_or_else(|| ParameterError::TypeMismatch {
            name: name.to_string(),
            expected,
            actual: value.parameter_type(),
        })
    }

    pub fn get_i32(&self, name: &str) -> Result<i32, ParameterError> {
        self.typed(name, ParameterType::Int32, ParameterValue::as_i32)
    }

    pub fn get_u32(&self, name: &str) -> Result<u32, ParameterError> {
        self.typed(name, ParameterType::UInt32, ParameterValue::as_u32)
    }

    pub fn get_i64(&self, name: &str) -> Result<i64, ParameterError> {
        self.typed(name, ParameterType::Int64, ParameterValue::as_i64)
    }

    pub fn get_u64(&self, name: &str) -> Result<u64, ParameterError> {
        self.typed(name, ParameterType::UInt64, ParameterValue::as_u64)
    }

    pub fn get_f32(&self, name: &str) -> Result<f32, ParameterError> {
        self.typed(name, ParameterType::Real32, ParameterValue::as_f32)
    }

    pub fn get_f64(&self, name: &str) -> Result<f64, ParameterError> {
        self.typed(name, ParameterType::Real64, ParameterValue::as_f64)
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, ParameterError> {
        self.typed(name, ParameterType::Bool, ParameterValue::as_bool)
    }

    pub fn get_string(&self, name: &str) -> Result<String, ParameterError> {
        self.typed(name, ParameterType::String, |v| v.as_str().map(str::to_string))
    }

    /// The array stored under `name`; its element type must be `element_type`.
    pub fn get_array(
        &self,
        name: &str,
        element_type: ElementType,
    ) -> Result<ArrayData, ParameterError> {
        self.typed(name, ParameterType::Array(element_type), |v| {
            v.as_array()
                .filter(|data| data.element_type() == element_type)
                .cloned()
        })
    }
}

impl FromIterator<(String, ParameterValue)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (String, ParameterValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
