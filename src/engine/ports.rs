// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use indexmap::IndexMap;

use crate::buffer::Buffer;
use crate::engine::{Input, Output};
use crate::errors::{NetworkError, NetworkResult};
use crate::spec::RegionSpec;

/// The inputs and outputs of one region.
///
/// Created from the region type's spec before the computation object exists,
/// and handed to it on every call so it can reach its data.
#[derive(Debug)]
pub struct RegionPorts {
    region: String,
    inputs: IndexMap<String, Input>,
    outputs: IndexMap<String, Output>,
}

impl RegionPorts {
    /// One port per name the region spec declares, zero-width until initialized.
    pub fn from_spec(region: impl Into<String>, spec: &RegionSpec) -> Self {
        let region = region.into();
        let inputs = spec
            .inputs()
            .iter()
            .map(|(name, input)| (name.clone(), Input::new(&region, name, input.data_type)))
            .collect();
        let outputs = spec
            .outputs()
            .iter()
            .map(|(name, output)| (name.clone(), Output::new(&region, name, output.data_type)))
            .collect();
        Self {
            region,
            inputs,
            outputs,
        }
    }

    /// Name of the owning region.
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn inputs(&self) -> &IndexMap<String, Input> {
        &self.inputs
    }

    pub fn outputs(&self) -> &IndexMap<String, Output> {
        &self.outputs
    }

    pub fn input(&self, name: &str) -> NetworkResult<&Input> {
        self.inputs.get(name).ok_or_else(|| NetworkError::UnknownInput {
            region: self.region.clone(),
            input: name.to_string(),
        })
    }

    pub fn output(&self, name: &str) -> NetworkResult<&Output> {
        self.outputs.get(name).ok_or_else(|| NetworkError::UnknownOutput {
            region: self.region.clone(),
            output: name.to_string(),
        })
    }

    pub fn input_buffer(&self, name: &str) -> NetworkResult<&Buffer> {
        self.input(name).map(Input::buffer)
    }

    pub fn output_buffer(&self, name: &str) -> NetworkResult<&Buffer> {
        self.output(name).map(Output::buffer)
    }

    pub(crate) fn input_mut(&mut self, name: &str) -> NetworkResult<&mut Input> {
        let region = &self.region;
        self.inputs
            .get_mut(name)
            .ok_or_else(|| NetworkError::UnknownInput {
                region: region.clone(),
                input: name.to_string(),
            })
    }

    pub(crate) fn output_mut(&mut self, name: &str) -> NetworkResult<&mut Output> {
        let region = &self.region;
        self.outputs
            .get_mut(name)
            .ok_or_else(|| NetworkError::UnknownOutput {
                region: region.clone(),
                output: name.to_string(),
            })
    }

    pub(crate) fn inputs_mut(&mut self) -> impl Iterator<Item = &mut Input> {
        self.inputs.values_mut()
    }

    pub(crate) fn outputs_mut(&mut self) -> impl Iterator<Item = &mut Output> {
        self.outputs.values_mut()
    }
}
