// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io::Read;
use std::marker::PhantomData;

use crate::engine::RegionPorts;
use crate::errors::NetworkResult;
use crate::params::ValueMap;
use crate::spec::RegionSpec;
use crate::traits::{RegionImpl, RegionImplType};

/// Object-safe constructor for one region type, stored in the registry.
pub trait RegionFactory: Send + Sync {
    fn create_spec(&self) -> RegionSpec;

    fn create_region_impl(
        &self,
        params: &ValueMap,
        ports: &RegionPorts,
    ) -> NetworkResult<Box<dyn RegionImpl>>;

    fn restore_region_impl(
        &self,
        reader: &mut dyn Read,
        ports: &RegionPorts,
    ) -> NetworkResult<Box<dyn RegionImpl>>;
}

/// Adapts a [`RegionImplType`] into a [`RegionFactory`].
pub struct RegionTypeFactory<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> RegionTypeFactory<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for RegionTypeFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RegionImplType> RegionFactory for RegionTypeFactory<T> {
    fn create_spec(&self) -> RegionSpec {
        T::create_spec()
    }

    fn create_region_impl(
        &self,
        params: &ValueMap,
        ports: &RegionPorts,
    ) -> NetworkResult<Box<dyn RegionImpl>> {
        Ok(Box::new(T::create(params, ports)?))
    }

    fn restore_region_impl(
        &self,
        reader: &mut dyn Read,
        ports: &RegionPorts,
    ) -> NetworkResult<Box<dyn RegionImpl>> {
        Ok(Box::new(T::restore(reader, ports)?))
    }
}
