// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io::Read;

use crate::buffer::ElementType;
use crate::engine::RegionPorts;
use crate::errors::{NetworkError, NetworkResult};
use crate::params::ValueMap;
use crate::spec::{InputSpec, OutputSpec, RegionSpec};
use crate::traits::{RegionImpl, RegionImplType};

/// A stub region for wiring tests: copies the first element of `in` to `out`
pub struct StubRegion;

impl RegionImpl for StubRegion {
    fn compute(&mut self, ports: &RegionPorts) -> NetworkResult<()> {
        let first = ports
            .input_buffer("in")?
            .slice::<f32>()?
            .first()
            .copied()
            .unwrap_or_default();
        ports.output_buffer("out")?.slice_mut::<f32>()?[0] = first;
        Ok(())
    }
}

impl RegionImplType for StubRegion {
    fn create_spec() -> RegionSpec {
        RegionSpec::new("Stub region for tests")
            .with_input("in", InputSpec::new(ElementType::Real32).default_port())
            .with_output(
                "out",
                OutputSpec::new(ElementType::Real32)
                    .with_count(1)
                    .default_port(),
            )
    }

    fn create(_params: &ValueMap, _ports: &RegionPorts) -> NetworkResult<Self> {
        Ok(Self)
    }

    fn restore(_reader: &mut dyn Read, _ports: &RegionPorts) -> NetworkResult<Self> {
        Ok(Self)
    }
}

/// A region whose compute always fails
pub struct FailingRegion;

impl RegionImpl for FailingRegion {
    fn compute(&mut self, ports: &RegionPorts) -> NetworkResult<()> {
        Err(NetworkError::region_failed(ports.region(), "simulated failure"))
    }
}

impl RegionImplType for FailingRegion {
    fn create_spec() -> RegionSpec {
        RegionSpec::new("Always fails on compute").with_output(
            "out",
            OutputSpec::new(ElementType::Real32)
                .with_count(1)
                .default_port(),
        )
    }

    fn create(_params: &ValueMap, _ports: &RegionPorts) -> NetworkResult<Self> {
        Ok(Self)
    }

    fn restore(_reader: &mut dyn Read, _ports: &RegionPorts) -> NetworkResult<Self> {
        Ok(Self)
    }
}
