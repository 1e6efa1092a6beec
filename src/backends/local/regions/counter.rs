// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::buffer::ElementType;
use crate::engine::RegionPorts;
use crate::errors::{NetworkError, NetworkResult, ParameterError};
use crate::params::{ParameterValue, ValueMap};
use crate::spec::{
    AccessMode, CommandSpec, OutputSpec, ParameterSpec, ParameterType, RegionSpec,
};
use crate::traits::{RegionImpl, RegionImplType};

/// Counter region - adds `increment` to every element of `out` on each compute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterRegion {
    dim: u32,
    increment: f64,
}

impl RegionImpl for CounterRegion {
    fn compute(&mut self, ports: &RegionPorts) -> NetworkResult<()> {
        let step = self.increment as f32;
        let output = ports.output_buffer("out")?;
        for value in output.slice_mut::<f32>()?.iter_mut() {
            *value += step;
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

    fn get_parameter(&self, name: &str, _spec: &ParameterSpec) -> NetworkResult<ParameterValue> {
        match name {
            "dim" => Ok(ParameterValue::UInt32(self.dim)),
            "increment" => Ok(ParameterValue::Real64(self.increment)),
            _ => Err(ParameterError::NotHandled {
                name: name.to_string(),
            }
            .into()),
        }
    }

    fn set_parameter(
        &mut self,
        name: &str,
        value: &ParameterValue,
        _spec: &ParameterSpec,
    ) -> NetworkResult<()> {
        match (name, value) {
            ("increment", ParameterValue::Real64(increment)) => {
                self.increment = *increment;
                Ok(())
            }
            _ => Err(ParameterError::NotHandled {
                name: name.to_string(),
            }
            .into()),
        }
    }

    fn execute_command(&mut self, args: &[String], ports: &RegionPorts) -> NetworkResult<String> {
        match args.first().map(String::as_str) {
            Some("reset") => {
                ports.output_buffer("out")?.fill_zero();
                Ok(String::new())
            }
            other => Err(NetworkError::region_failed(
                ports.region(),
                format!("unexpected command {:?}", other),
            )),
        }
    }

    fn serialize(&self, writer: &mut dyn Write) -> NetworkResult<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }
}

impl RegionImplType for CounterRegion {
    fn create_spec() -> RegionSpec {
        RegionSpec::new("Adds a fixed increment to every element of its output on each compute")
            .with_output(
                "out",
                OutputSpec::new(ElementType::Real32)
                    .default_port()
                    .describe("Running totals; width is `dim`"),
            )
            .with_parameter(
                "dim",
                ParameterSpec::new(ParameterType::UInt32)
                    .with_default("4")
                    .with_access(AccessMode::CreateOnly)
                    .describe("Output width"),
            )
            .with_parameter(
                "increment",
                ParameterSpec::new(ParameterType::Real64)
                    .with_default("1")
                    .describe("Added to every element per compute"),
            )
            .with_command("reset", CommandSpec::new("Zero the output"))
    }

    fn create(params: &ValueMap, _ports: &RegionPorts) -> NetworkResult<Self> {
        Ok(Self {
            dim: params.get_u32("dim")?,
            increment: params.get_f64("increment")?,
        })
    }

    fn restore(reader: &mut dyn Read, _ports: &RegionPorts) -> NetworkResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}
