// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::buffer::{ArrayData, ElementType};
use crate::engine::RegionPorts;
use crate::errors::{NetworkError, NetworkResult, ParameterError};
use crate::params::{ParameterValue, ValueMap};
use crate::spec::{
    AccessMode, CommandSpec, InputSpec, ParameterSpec, ParameterType, RegionSpec,
};
use crate::traits::{RegionImpl, RegionImplType};

/// Recorder region - keeps a copy of whatever arrived on `in` at the last compute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecorderRegion {
    last_input: Vec<f32>,
    compute_count: u64,
}

impl RegionImpl for RecorderRegion {
    fn compute(&mut self, ports: &RegionPorts) -> NetworkResult<()> {
        self.last_input = ports.input_buffer("in")?.to_vec::<f32>();
        self.compute_count += 1;
        Ok(())
    }

    fn get_parameter(&self, name: &str, _spec: &ParameterSpec) -> NetworkResult<ParameterValue> {
        match name {
            "last_input" => Ok(ParameterValue::Array(ArrayData::from_vec(
                self.last_input.clone(),
            ))),
            "compute_count" => Ok(ParameterValue::UInt64(self.compute_count)),
            _ => Err(ParameterError::NotHandled {
                name: name.to_string(),
            }
            .into()),
        }
    }

    fn execute_command(&mut self, args: &[String], ports: &RegionPorts) -> NetworkResult<String> {
        match args.first().map(String::as_str) {
            Some("clear") => {
                let cleared = self.compute_count;
                *self = Self::default();
                Ok(format!("cleared {} recordings", cleared))
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

impl RegionImplType for RecorderRegion {
    fn create_spec() -> RegionSpec {
        RegionSpec::new("Records its input on every compute")
            .with_input(
                "in",
                InputSpec::new(ElementType::Real32)
                    .required()
                    .default_port()
                    .describe("Any width; concatenation of every incoming link"),
            )
            .with_parameter(
                "last_input",
                ParameterSpec::new(ParameterType::Array(ElementType::Real32))
                    .with_access(AccessMode::ReadOnly),
            )
            .with_parameter(
                "compute_count",
                ParameterSpec::new(ParameterType::UInt64).with_access(AccessMode::ReadOnly),
            )
            .with_command("clear", CommandSpec::new("Forget everything recorded so far"))
    }

    fn create(_params: &ValueMap, _ports: &RegionPorts) -> NetworkResult<Self> {
        Ok(Self::default())
    }

    fn restore(reader: &mut dyn Read, _ports: &RegionPorts) -> NetworkResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}
