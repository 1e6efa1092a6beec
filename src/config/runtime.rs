// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::NetworkConfig;
use crate::engine::Network;
use crate::errors::NetworkResult;
use crate::registry::RegionRegistry;

/// Network runtime builder - turns a validated configuration into a network.
///
/// Regions are added in document order, explicit phases are applied as each
/// region is added, then links are created in document order. The network is
/// returned uninitialized; the first `run()` initializes it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use the_lattice::config::{NetworkConfig, RuntimeBuilder};
/// use the_lattice::registry::RegionRegistry;
///
/// let config: NetworkConfig = serde_yaml::from_str(
///     "regions:\n  - {name: counter, type: counter, params: {dim: 2}}\n",
/// )
/// .unwrap();
///
/// let mut network =
///     RuntimeBuilder::from_config(&config, Arc::new(RegionRegistry::with_builtins())).unwrap();
/// network.run(2).unwrap();
/// assert_eq!(network.iteration(), 2);
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build a network from configuration.
    ///
    /// # Arguments
    /// * `cfg` - Regions, links and engine options
    /// * `registry` - Region types available to the network
    pub fn from_config(cfg: &NetworkConfig, registry: Arc<RegionRegistry>) -> NetworkResult<Network> {
        let mut network = Network::new(registry);
        network.set_zero_copy(cfg.zero_copy);

        for region in &cfg.regions {
            network.add_region_with_params(&region.name, &region.region_type, &region.params)?;
            if let Some(phases) = &region.phases {
                network.set_phases(&region.name, phases.iter().copied())?;
            }
        }

        for link in &cfg.links {
            network.link(&link.src, &link.dest, link.options())?;
        }

        Ok(network)
    }
}
