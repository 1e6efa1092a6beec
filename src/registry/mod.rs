// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Region type registry.
//!
//! Maps type names to [`RegionFactory`] instances and caches each type's
//! [`RegionSpec`]. A registry is an ordinary value: networks receive it as an
//! `Arc<RegionRegistry>`, so tests can build isolated registries while an
//! application shares one across all of its networks.

use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, PoisonError, RwLock};

use crate::backends::local::LocalRegionFactory;
use crate::engine::RegionPorts;
use crate::errors::{NetworkError, NetworkResult};
use crate::observability::messages::registry::{
    RegionTypeOverwritten, RegionTypeRegistered, RegionTypeUnregistered,
};
use crate::observability::messages::StructuredLog;
use crate::params::{RawParameters, ValueMap};
use crate::spec::RegionSpec;
use crate::traits::{RegionFactory, RegionImpl, RegionImplType, RegionTypeFactory};

#[derive(Default)]
pub struct RegionRegistry {
    factories: RwLock<HashMap<String, Arc<dyn RegionFactory>>>,
    specs: RwLock<HashMap<String, Arc<RegionSpec>>>,
}

impl RegionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in region type.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        LocalRegionFactory::register_builtins(&registry);
        registry
    }

    /// Register `factory` under `region_type`, replacing (with a warning) any
    /// factory already registered under that name.
    pub fn register(&self, region_type: impl Into<String>, factory: Arc<dyn RegionFactory>) {
        let region_type = region_type.into();
        let previous = self
            .factories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(region_type.clone(), factory);

        if previous.is_some() {
            self.specs
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&region_type);
            RegionTypeOverwritten {
                region_type: &region_type,
            }
            .log();
        } else {
            RegionTypeRegistered {
                region_type: &region_type,
            }
            .log();
        }
    }

    pub fn register_type<T: RegionImplType>(&self, region_type: impl Into<String>) {
        self.register(region_type, Arc::new(RegionTypeFactory::<T>::new()));
    }

    /// Remove a type. Returns false when it was not registered.
    pub fn unregister(&self, region_type: &str) -> bool {
        let removed = self
            .factories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(region_type)
            .is_some();
        self.specs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(region_type);
        if removed {
            RegionTypeUnregistered { region_type }.log();
        }
        removed
    }

    pub fn is_registered(&self, region_type: &str) -> bool {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(region_type)
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Drop every registered type and cached spec.
    pub fn clear(&self) {
        self.factories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.specs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn factory(&self, region_type: &str) -> NetworkResult<Arc<dyn RegionFactory>> {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(region_type)
            .cloned()
            .ok_or_else(|| NetworkError::UnknownRegionType(region_type.to_string()))
    }

    /// The `RegionSpec` for `region_type`, built on first request and cached after.
    pub fn spec(&self, region_type: &str) -> NetworkResult<Arc<RegionSpec>> {
        if let Some(spec) = self
            .specs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(region_type)
        {
            return Ok(Arc::clone(spec));
        }

        let spec = Arc::new(self.factory(region_type)?.create_spec());
        let mut specs = self.specs.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(
            specs.entry(region_type.to_string()).or_insert(spec),
        ))
    }

    /// Build a fresh computation object from creation parameters.
    ///
    /// The parameters are checked against the type's spec and completed with
    /// its defaults before the factory sees them.
    pub fn create_impl(
        &self,
        region_type: &str,
        params: &RawParameters,
        ports: &RegionPorts,
    ) -> NetworkResult<Box<dyn RegionImpl>> {
        let factory = self.factory(region_type)?;
        let spec = self.spec(region_type)?;
        let values = ValueMap::resolve(region_type, &spec, params)?;
        factory.create_region_impl(&values, ports)
    }

    /// Rebuild a computation object from its serialized state.
    pub fn restore_impl(
        &self,
        region_type: &str,
        reader: &mut dyn Read,
        ports: &RegionPorts,
    ) -> NetworkResult<Box<dyn RegionImpl>> {
        self.factory(region_type)?.restore_region_impl(reader, ports)
    }
}

impl std::fmt::Debug for RegionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
