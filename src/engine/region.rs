// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeSet;
use std::fmt;
use std::io::{Read, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::buffer::{ArrayData, Buffer};
use crate::engine::{Input, Output, RegionPorts, SourceBuffers};
use crate::errors::{NetworkError, NetworkResult, ParameterError};
use crate::observability::messages::region::RegionCommandExecuted;
use crate::observability::messages::StructuredLog;
use crate::params::{ParameterValue, RawParameters};
use crate::registry::RegionRegistry;
use crate::spec::{AccessMode, ParameterSpec, ParameterType, RegionSpec};
use crate::traits::RegionImpl;

/// Accumulated compute timing for one region.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComputeProfile {
    pub compute_count: u64,
    pub total_time: Duration,
}

/// A named node of the network: its spec, its ports, its phases and the
/// computation object doing the work.
pub struct Region {
    name: String,
    region_type: String,
    spec: Arc<RegionSpec>,
    ports: RegionPorts,
    imp: Box<dyn RegionImpl>,
    phases: BTreeSet<u32>,
    initialized: bool,
    profiling: bool,
    profile: ComputeProfile,
}

impl Region {
    /// Build a region from creation parameters.
    pub(crate) fn create(
        name: &str,
        region_type: &str,
        params: &RawParameters,
        registry: &RegionRegistry,
    ) -> NetworkResult<Self> {
        let spec = registry.spec(region_type)?;
        let ports = RegionPorts::from_spec(name, &spec);
        let imp = registry.create_impl(region_type, params, &ports)?;
        Ok(Self::assemble(name, region_type, spec, ports, imp))
    }

    /// Build a region whose computation object is read back from `state`.
    pub(crate) fn restore(
        name: &str,
        region_type: &str,
        state: &mut dyn Read,
        registry: &RegionRegistry,
    ) -> NetworkResult<Self> {
        let spec = registry.spec(region_type)?;
        let ports = RegionPorts::from_spec(name, &spec);
        let imp = registry.restore_impl(region_type, state, &ports)?;
        Ok(Self::assemble(name, region_type, spec, ports, imp))
    }

    fn assemble(
        name: &str,
        region_type: &str,
        spec: Arc<RegionSpec>,
        ports: RegionPorts,
        imp: Box<dyn RegionImpl>,
    ) -> Self {
        Self {
            name: name.to_string(),
            region_type: region_type.to_string(),
            spec,
            ports,
            imp,
            phases: BTreeSet::new(),
            initialized: false,
            profiling: false,
            profile: ComputeProfile::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region_type(&self) -> &str {
        &self.region_type
    }

    pub fn spec(&self) -> &RegionSpec {
        &self.spec
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn phases(&self) -> &BTreeSet<u32> {
        &self.phases
    }

    pub(crate) fn set_phases(&mut self, phases: BTreeSet<u32>) {
        self.phases = phases;
    }

    pub fn ports(&self) -> &RegionPorts {
        &self.ports
    }

    pub(crate) fn ports_mut(&mut self) -> &mut RegionPorts {
        &mut self.ports
    }

    pub fn input(&self, name: &str) -> NetworkResult<&Input> {
        self.ports.input(name)
    }

    pub fn output(&self, name: &str) -> NetworkResult<&Output> {
        self.ports.output(name)
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Input> {
        self.ports.inputs().values()
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Output> {
        self.ports.outputs().values()
    }

    /// Handle to an input's current data.
    pub fn input_data(&self, name: &str) -> NetworkResult<Buffer> {
        self.ports.input_buffer(name).map(Buffer::share)
    }

    /// Handle to an output's data.
    pub fn output_data(&self, name: &str) -> NetworkResult<Buffer> {
        self.ports.output_buffer(name).map(Buffer::share)
    }

    /// Size every output: the region spec's count, or the count the computation
    /// object reports when the region spec says 0.
    pub(crate) fn init_outputs(&mut self) -> NetworkResult<()> {
        for (name, output_spec) in self.spec.outputs() {
            let count = if output_spec.count != 0 {
                output_spec.count
            } else {
                self.imp.output_element_count(name)?
            };
            self.ports.output_mut(name)?.initialize(count);
        }
        Ok(())
    }

    /// Initialize every input from the already-sized source outputs.
    pub(crate) fn init_inputs(
        &mut self,
        sources: &SourceBuffers,
        zero_copy_enabled: bool,
    ) -> NetworkResult<()> {
        for (name, input_spec) in self.spec.inputs() {
            let input = self.ports.input_mut(name)?;
            if input_spec.required && input.links().is_empty() {
                return Err(NetworkError::MissingRequiredInput {
                    region: self.name.clone(),
                    input: name.clone(),
                });
            }
            input.initialize(sources, input_spec.count, zero_copy_enabled)?;
        }
        Ok(())
    }

    /// Let the computation object set itself up, then mark the region ready.
    pub(crate) fn initialize(&mut self) -> NetworkResult<()> {
        self.imp.initialize(&self.ports)?;
        self.initialized = true;
        Ok(())
    }

    /// Mark the region and its inputs as needing initialization.
    pub(crate) fn uninitialize(&mut self) {
        self.initialized = false;
        for input in self.ports.inputs_mut() {
            input.uninitialize();
        }
    }

    pub(crate) fn prepare_inputs(&mut self) -> NetworkResult<()> {
        for input in self.ports.inputs_mut() {
            input.prepare()?;
        }
        Ok(())
    }

    pub fn compute(&mut self) -> NetworkResult<()> {
        if !self.initialized {
            return Err(NetworkError::NotInitialized(self.name.clone()));
        }
        if !self.profiling {
            return self.imp.compute(&self.ports);
        }

        let started = Instant::now();
        let result = self.imp.compute(&self.ports);
        self.profile.total_time += started.elapsed();
        self.profile.compute_count += 1;
        result
    }

    pub fn enable_profiling(&mut self) {
        self.profiling = true;
    }

    pub fn disable_profiling(&mut self) {
        self.profiling = false;
    }

    pub fn reset_profiling(&mut self) {
        self.profile = ComputeProfile::default();
    }

    pub fn profile(&self) -> ComputeProfile {
        self.profile
    }

    /// Run a command declared in the region spec. `args[0]` is the command name.
    pub fn execute_command(&mut self, args: &[String]) -> NetworkResult<String> {
        let command = args.first().map(String::as_str).unwrap_or_default();
        if self.spec.command(command).is_none() {
            return Err(NetworkError::UnknownCommand {
                region_type: self.region_type.clone(),
                command: command.to_string(),
            });
        }
        let reply = self.imp.execute_command(args, &self.ports)?;
        RegionCommandExecuted {
            region: &self.name,
            command,
        }
        .log();
        Ok(reply)
    }

    pub(crate) fn serialize(&self, writer: &mut dyn Write) -> NetworkResult<()> {
        self.imp.serialize(writer)
    }

    pub(crate) fn restore_output(&mut self, name: &str, data: ArrayData) -> NetworkResult<()> {
        self.ports.output_mut(name)?.restore(data)
    }

    fn parameter_spec(&self, name: &str) -> NetworkResult<&ParameterSpec> {
        self.spec.parameter(name).ok_or_else(|| {
            ParameterError::Unknown {
                region_type: self.region_type.clone(),
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Read a parameter, checked against its declared type.
    pub fn get_parameter(&self, name: &str) -> NetworkResult<ParameterValue> {
        let spec = self.parameter_spec(name)?;
        let value = self.imp.get_parameter(name, spec)?;
        if value.parameter_type() != spec.data_type {
            return Err(ParameterError::TypeMismatch {
                name: name.to_string(),
                expected: spec.data_type,
                actual: value.parameter_type(),
            }
            .into());
        }
        Ok(value)
    }

    /// Write a parameter. Only `ReadWrite` parameters can change after
    /// creation.
    pub fn set_parameter(&mut self, name: &str, value: ParameterValue) -> NetworkResult<()> {
        let spec = self.parameter_spec(name)?.clone();
        match spec.access {
            AccessMode::ReadWrite => {}
            AccessMode::CreateOnly => {
                return Err(ParameterError::AccessDenied {
                    name: name.to_string(),
                    access: spec.access,
                    operation: "set after creation",
                }
                .into())
            }
            AccessMode::ReadOnly => {
                return Err(ParameterError::AccessDenied {
                    name: name.to_string(),
                    access: spec.access,
                    operation: "set",
                }
                .into())
            }
        }
        if value.parameter_type() != spec.data_type {
            return Err(ParameterError::TypeMismatch {
                name: name.to_string(),
                expected: spec.data_type,
                actual: value.parameter_type(),
            }
            .into());
        }
        self.imp.set_parameter(name, &value, &spec)
    }

    fn check_declared(&self, name: &str, requested: ParameterType) -> NetworkResult<()> {
        let declared = self.parameter_spec(name)?.data_type;
        if declared == requested {
            return Ok(());
        }
        Err(ParameterError::TypeMismatch {
            name: name.to_string(),
            expected: declared,
            actual: requested,
        }
        .into())
    }

    fn get_typed<T>(
        &self,
        name: &str,
        requested: ParameterType,
        extract: impl FnOnce(ParameterValue) -> Option<T>,
    ) -> NetworkResult<T> {
        self.check_declared(name, requested)?;
        let value = self.get_parameter(name)?;
        let actual = value.parameter_type();
        extract(value).ok_or_else(|| {
            ParameterError::TypeMismatch {
                name: name.to_string(),
                expected: requested,
                actual,
            }
            .into()
        })
    }

    pub fn get_parameter_int32(&self, name: &str) -> NetworkResult<i32> {
        self.get_typed(name, ParameterType::Int32, |v| v.as_i32())
    }

    pub fn get_parameter_uint32(&self, name: &str) -> NetworkResult<u32> {
        self.get_typed(name, ParameterType::UInt32, |v| v.as_u32())
    }

    pub fn get_parameter_int64(&self, name: &str) -> NetworkResult<i64> {
        self.get_typed(name, ParameterType::Int64, |v| v.as_i64())
    }

    pub fn get_parameter_uint64(&self, name: &str) -> NetworkResult<u64> {
        self.get_typed(name, ParameterType::UInt64, |v| v.as_u64())
    }

    pub fn get_parameter_real32(&self, name: &str) -> NetworkResult<f32> {
        self.get_typed(name, ParameterType::Real32, |v| v.as_f32())
    }

    pub fn get_parameter_real64(&self, name: &str) -> NetworkResult<f64> {
        self.get_typed(name, ParameterType::Real64, |v| v.as_f64())
    }

    pub fn get_parameter_bool(&self, name: &str) -> NetworkResult<bool> {
        self.get_typed(name, ParameterType::Bool, |v| v.as_bool())
    }

    pub fn get_parameter_string(&self, name: &str) -> NetworkResult<String> {
        self.get_typed(name, ParameterType::String, |v| match v {
            ParameterValue::String(text) => Some(text),
            _ => None,
        })
    }

    /// Read an array parameter. Fails for anything not declared as an array.
    pub fn get_parameter_array(&self, name: &str) -> NetworkResult<ArrayData> {
        let declared = self.parameter_spec(name)?.data_type;
        let ParameterType::Array(element_type) = declared else {
            return Err(ParameterError::InvalidValue {
                name: name.to_string(),
                reason: format!("declared as {}, not an array", declared),
            }
            .into());
        };
        self.get_typed(name, ParameterType::Array(element_type), |v| match v {
            ParameterValue::Array(data) => Some(data),
            _ => None,
        })
    }

    pub fn set_parameter_int32(&mut self, name: &str, value: i32) -> NetworkResult<()> {
        self.set_parameter(name, ParameterValue::Int32(value))
    }

    pub fn set_parameter_uint32(&mut self, name: &str, value: u32) -> NetworkResult<()> {
        self.set_parameter(name, ParameterValue::UInt32(value))
    }

    pub fn set_parameter_int64(&mut self, name: &str, value: i64) -> NetworkResult<()> {
        self.set_parameter(name, ParameterValue::Int64(value))
    }

    pub fn set_parameter_uint64(&mut self, name: &str, value: u64) -> NetworkResult<()> {
        self.set_parameter(name, ParameterValue::UInt64(value))
    }

    pub fn set_parameter_real32(&mut self, name: &str, value: f32) -> NetworkResult<()> {
        self.set_parameter(name, ParameterValue::Real32(value))
    }

    pub fn set_parameter_real64(&mut self, name: &str, value: f64) -> NetworkResult<()> {
        self.set_parameter(name, ParameterValue::Real64(value))
    }

    pub fn set_parameter_bool(&mut self, name: &str, value: bool) -> NetworkResult<()> {
        self.set_parameter(name, ParameterValue::Bool(value))
    }

    pub fn set_parameter_string(&mut self, name: &str, value: impl Into<String>) -> NetworkResult<()> {
        self.set_parameter(name, ParameterValue::String(value.into()))
    }

    /// Write an array parameter; the element type must match the declared one.
    pub fn set_parameter_array(&mut self, name: &str, value: ArrayData) -> NetworkResult<()> {
        let declared = self.parameter_spec(name)?.data_type;
        match declared {
            ParameterType::Array(element_type) if element_type != value.element_type() => {
                Err(ParameterError::UnsupportedArrayType {
                    name: name.to_string(),
                    element_type: value.element_type(),
                }
                .into())
            }
            _ => self.set_parameter(name, ParameterValue::Array(value)),
        }
    }
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("name", &self.name)
            .field("region_type", &self.region_type)
            .field("phases", &self.phases)
            .field("initialized", &self.initialized)
            .field("ports", &self.ports)
            .finish()
    }
}
