// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io::Read;

use crate::buffer::ElementType;
use crate::engine::RegionPorts;
use crate::errors::NetworkResult;
use crate::params::ValueMap;
use crate::spec::{InputSpec, OutputSpec, RegionSpec};
use crate::traits::{RegionImpl, RegionImplType};

/// Sum region - writes the (wrapping) sum of its input to a single-element output
pub struct SumRegion;

impl RegionImpl for SumRegion {
    fn compute(&mut self, ports: &RegionPorts) -> NetworkResult<()> {
        let total = ports
            .input_buffer("in")?
            .slice::<i32>()?
            .iter()
            .fold(0_i32, |acc, value| acc.wrapping_add(*value));
        ports.output_buffer("sum")?.slice_mut::<i32>()?[0] = total;
        Ok(())
    }
}

impl RegionImplType for SumRegion {
    fn create_spec() -> RegionSpec {
        RegionSpec::new("Sums every element of its input")
            .with_input("in", InputSpec::new(ElementType::Int32).required())
            .with_output("sum", OutputSpec::new(ElementType::Int32).with_count(1))
    }

    fn create(_params: &ValueMap, _ports: &RegionPorts) -> NetworkResult<Self> {
        Ok(Self)
    }

    fn restore(_reader: &mut dyn Read, _ports: &RegionPorts) -> NetworkResult<Self> {
        Ok(Self)
    }
}
