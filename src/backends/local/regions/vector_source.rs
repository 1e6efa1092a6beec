// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::buffer::{ArrayData, ElementType};
use crate::engine::RegionPorts;
use crate::errors::{NetworkResult, ParameterError};
use crate::params::{ParameterValue, ValueMap};
use crate::spec::{AccessMode, OutputSpec, ParameterSpec, ParameterType, RegionSpec};
use crate::traits::{RegionImpl, RegionImplType};

/// Vector Source region - writes a settable vector to `out` on every compute.
///
/// Values beyond `dim` are ignored; missing values are written as zero.
/// Parameters go through the text form, so `values` can be set from a string
/// like `"[1, 2, 3]"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorSourceRegion {
    dim: u32,
    values: Vec<f32>,
}

impl RegionImpl for VectorSourceRegion {
    fn compute(&mut self, ports: &RegionPorts) -> NetworkResult<()> {
        let output = ports.output_buffer("out")?;
        let mut slots = output.slice_mut::<f32>()?;
        for (index, slot) in slots.iter_mut().enumerate() {
            *slot = self.values.get(index).copied().unwrap_or_default();
        }
        Ok(())
    }

    fn output_element_count(&self, name: &str) -> NetworkResult<usize> {
        match name {
            "out" => Ok(self.dim as usize),
            _ => Err(ParameterError::NotHandled {
                name: name.to_string(),
            }
            .into()),
        }
    }

    fn get_parameter_into_buffer(&self, name: &str, buffer: &mut String) -> NetworkResult<()> {
        match name {
            "dim" => buffer.push_str(&self.dim.to_string()),
            "values" => buffer.push_str(&ArrayData::from_vec(self.values.clone()).to_string()),
            _ => {
                return Err(ParameterError::NotHandled {
                    name: name.to_string(),
                }
                .into())
            }
        }
        Ok(())
    }

    fn set_parameter_from_buffer(&mut self, name: &str, buffer: &str) -> NetworkResult<()> {
        if name != "values" {
            return Err(ParameterError::NotHandled {
                name: name.to_string(),
            }
            .into());
        }
        let parsed = ParameterValue::parse(ParameterType::Array(ElementType::Real32), buffer)
            .map_err(|reason| ParameterError::InvalidValue {
                name: name.to_string(),
                reason,
            })?;
        if let ParameterValue::Array(data) = parsed {
            self.values = data.to_vec::<f32>();
        }
        Ok(())
    }

    fn serialize(&self, writer: &mut dyn Write) -> NetworkResult<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }
}

impl RegionImplType for VectorSourceRegion {
    fn create_spec() -> RegionSpec {
        RegionSpec::new("Writes a settable vector to its output on every compute")
            .with_output("out", OutputSpec::new(ElementType::Real32).default_port())
            .with_parameter(
                "dim",
                ParameterSpec::new(ParameterType::UInt32)
                    .with_default("4")
                    .with_access(AccessMode::CreateOnly),
            )
            .with_parameter(
                "values",
                ParameterSpec::new(ParameterType::Array(ElementType::Real32))
                    .describe("Values written to the output, zero padded"),
            )
    }

    fn create(params: &ValueMap, _ports: &RegionPorts) -> NetworkResult<Self> {
        let values = if params.contains("values") {
            params.get_array("values", ElementType::Real32)?.to_vec::<f32>()
        } else {
            Vec::new()
        };
        Ok(Self {
            dim: params.get_u32("dim")?,
            values,
        })
    }

    fn restore(reader: &mut dyn Read, _ports: &RegionPorts) -> NetworkResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}
