// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io::{Read, Write};

use crate::engine::RegionPorts;
use crate::errors::{NetworkError, NetworkResult, ParameterError};
use crate::params::{ParameterValue, ValueMap};
use crate::spec::{ParameterSpec, RegionSpec};

/// The computation object living inside a region.
///
/// The engine owns the ports; an implementation reads its inputs and writes its
/// outputs through the [`RegionPorts`] handed to `compute`. Buffers use
/// interior mutability, so a shared borrow of the ports is enough to write an
/// output.
pub trait RegionImpl {
    /// Called once the region's ports are sized, before the first compute.
    fn initialize(&mut self, _ports: &RegionPorts) -> NetworkResult<()> {
        Ok(())
    }

    fn compute(&mut self, ports: &RegionPorts) -> NetworkResult<()>;

    /// Width of an output whose spec declares a count of 0.
    fn output_element_count(&self, name: &str) -> NetworkResult<usize> {
        Err(ParameterError::NotHandled {
            name: name.to_string(),
        }
        .into())
    }

    /// Typed parameter read. The default goes through the text buffer path.
    fn get_parameter(&self, name: &str, spec: &ParameterSpec) -> NetworkResult<ParameterValue> {
        let mut text = String::new();
        self.get_parameter_into_buffer(name, &mut text)?;
        ParameterValue::parse(spec.data_type, &text).map_err(|reason| {
            ParameterError::InvalidValue {
                name: name.to_string(),
                reason,
            }
            .into()
        })
    }

    /// Typed parameter write. The default goes through the text buffer path.
    fn set_parameter(
        &mut self,
        name: &str,
        value: &ParameterValue,
        _spec: &ParameterSpec,
    ) -> NetworkResult<()> {
        self.set_parameter_from_buffer(name, &value.to_string())
    }

    /// Write the text form of parameter `name` into `buffer`.
    fn get_parameter_into_buffer(&self, name: &str, _buffer: &mut String) -> NetworkResult<()> {
        Err(ParameterError::NotHandled {
            name: name.to_string(),
        }
        .into())
    }

    /// Set parameter `name` from its text form.
    fn set_parameter_from_buffer(&mut self, name: &str, _buffer: &str) -> NetworkResult<()> {
        Err(ParameterError::NotHandled {
            name: name.to_string(),
        }
        .into())
    }

    /// Run a command; `args[0]` is the command name and has already been
    /// checked against the region spec.
    fn execute_command(&mut self, args: &[String], ports: &RegionPorts) -> NetworkResult<String> {
        let command = args.first().map(String::as_str).unwrap_or_default();
        Err(NetworkError::region_failed(
            ports.region(),
            format!("command '{}' is declared but not implemented", command),
        ))
    }

    /// Write the implementation's own state. Output buffers are saved by the
    /// engine and need not be included.
    fn serialize(&self, _writer: &mut dyn Write) -> NetworkResult<()> {
        Ok(())
    }
}

/// The static side of a region type: its spec and its two constructors.
pub trait RegionImplType: RegionImpl + Sized + 'static {
    fn create_spec() -> RegionSpec;

    /// Build a fresh instance. The ports already exist but are not yet sized.
    fn create(params: &ValueMap, ports: &RegionPorts) -> NetworkResult<Self>;

    /// Rebuild an instance from the bytes written by [`RegionImpl::serialize`].
    fn restore(reader: &mut dyn Read, ports: &RegionPorts) -> NetworkResult<Self>;
}
