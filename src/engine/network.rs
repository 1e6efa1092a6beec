// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;

use crate::config::consts::MAX_PHASE_GROWTH;
use crate::engine::{Link, LinkKey, Region, SourceBuffers};
use crate::errors::{NetworkError, NetworkResult};
use crate::observability::messages::network::{
    LinkAdded, LinkRemoved, NetworkInitialized, RegionAdded, RegionRemoved, RunCompleted,
    RunStarted,
};
use crate::observability::messages::region::RegionComputeFailed;
use crate::observability::messages::StructuredLog;
use crate::params::{parse_parameters, RawParameters};
use crate::registry::RegionRegistry;

/// Called after every iteration with the network and the iteration number.
pub type Callback = Box<dyn FnMut(&Network, u64)>;

/// How to connect two regions. Empty port names resolve to the regions'
/// default output and input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkOptions {
    pub link_type: String,
    pub link_params: String,
    pub src_output: String,
    pub dest_input: String,
    pub delay: usize,
}

impl LinkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link_type(mut self, link_type: impl Into<String>) -> Self {
        self.link_type = link_type.into();
        self
    }

    pub fn link_params(mut self, link_params: impl Into<String>) -> Self {
        self.link_params = link_params.into();
        self
    }

    pub fn src_output(mut self, src_output: impl Into<String>) -> Self {
        self.src_output = src_output.into();
        self
    }

    pub fn dest_input(mut self, dest_input: impl Into<String>) -> Self {
        self.dest_input = dest_input.into();
        self
    }

    pub fn delay(mut self, delay: usize) -> Self {
        self.delay = delay;
        self
    }
}

/// The orchestrator: owns the regions, the phase table and the run loop.
///
/// Regions in one phase run in the order they were added to the network. All
/// phases run in ascending order each iteration, and delayed links advance
/// together once every region has computed.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use the_lattice::engine::{LinkOptions, Network};
/// use the_lattice::registry::RegionRegistry;
///
/// let mut network = Network::new(Arc::new(RegionRegistry::with_builtins()));
/// network.add_region("counter", "counter", "{dim: 4}").unwrap();
/// network.add_region("sink", "recorder", "").unwrap();
/// network.link("counter", "sink", LinkOptions::new()).unwrap();
///
/// network.run(3).unwrap();
///
/// let seen = network.region("sink").unwrap().input_data("in").unwrap();
/// assert_eq!(seen.to_vec::<f32>(), vec![3.0; 4]);
/// ```
pub struct Network {
    regions: IndexMap<String, Region>,
    phases: Vec<Vec<usize>>,
    min_enabled_phase: usize,
    max_enabled_phase: usize,
    iteration: u64,
    initialized: bool,
    zero_copy: bool,
    callbacks: IndexMap<String, Callback>,
    registry: Arc<RegionRegistry>,
}

impl Network {
    pub fn new(registry: Arc<RegionRegistry>) -> Self {
        Self {
            regions: IndexMap::new(),
            phases: Vec::new(),
            min_enabled_phase: 0,
            max_enabled_phase: 0,
            iteration: 0,
            initialized: false,
            zero_copy: true,
            callbacks: IndexMap::new(),
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<RegionRegistry> {
        &self.registry
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn set_iteration(&mut self, iteration: u64) {
        self.iteration = iteration;
    }

    pub fn zero_copy(&self) -> bool {
        self.zero_copy
    }

    /// Allow or forbid zero-copy links. Takes effect at the next
    /// initialization of each input.
    pub fn set_zero_copy(&mut self, enabled: bool) {
        if self.zero_copy == enabled {
            return;
        }
        self.zero_copy = enabled;
        for region in self.regions.values_mut() {
            for input in region.ports_mut().inputs_mut() {
                input.uninitialize();
            }
        }
        self.initialized = false;
    }

    pub fn region(&self, name: &str) -> NetworkResult<&Region> {
        self.regions
            .get(name)
            .ok_or_else(|| NetworkError::UnknownRegion(name.to_string()))
    }

    pub fn region_mut(&mut self, name: &str) -> NetworkResult<&mut Region> {
        self.regions
            .get_mut(name)
            .ok_or_else(|| NetworkError::UnknownRegion(name.to_string()))
    }

    /// Regions in insertion order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    /// Every link, grouped by destination region and input, each input's links
    /// in insertion order.
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.regions
            .values()
            .flat_map(|region| region.inputs())
            .flat_map(|input| input.links().iter())
    }

    /// Add a region with creation parameters given as a YAML or JSON mapping.
    /// An empty string means no parameters.
    pub fn add_region(
        &mut self,
        name: &str,
        region_type: &str,
        params: &str,
    ) -> NetworkResult<&mut Region> {
        let params = parse_parameters(params)?;
        self.add_region_with_params(name, region_type, &params)
    }

    /// Add a region in a new trailing phase.
    pub fn add_region_with_params(
        &mut self,
        name: &str,
        region_type: &str,
        params: &RawParameters,
    ) -> NetworkResult<&mut Region> {
        if self.regions.contains_key(name) {
            return Err(NetworkError::DuplicateRegion(name.to_string()));
        }
        let mut region = Region::create(name, region_type, params, &self.registry)?;
        region.set_phases(BTreeSet::from([self.phases.len() as u32]));
        self.insert_region(region);
        self.region_mut(name)
    }

    pub(crate) fn insert_region(&mut self, region: Region) {
        let phases: Vec<u32> = region.phases().iter().copied().collect();
        RegionAdded {
            name: region.name(),
            region_type: region.region_type(),
            phases: &phases,
        }
        .log();
        self.regions.insert(region.name().to_string(), region);
        self.rebuild_phase_table();
        self.reset_enabled_phases();
        self.initialized = false;
    }

    /// Remove a region that has no outgoing links. Its incoming links go with
    /// it, and trailing phases left empty are dropped.
    pub fn remove_region(&mut self, name: &str) -> NetworkResult<()> {
        let outgoing: Vec<String> = self
            .region(name)?
            .outputs()
            .flat_map(|output| output.links().iter().map(LinkKey::to_string))
            .collect();
        if !outgoing.is_empty() {
            return Err(NetworkError::OutgoingLinks {
                region: name.to_string(),
                links: outgoing,
            });
        }

        let region = self.region_mut(name)?;
        region.uninitialize();
        let detached: Vec<Link> = region
            .ports_mut()
            .inputs_mut()
            .flat_map(|input| input.take_links())
            .collect();
        for link in &detached {
            self.detach_from_source(link.key());
        }

        self.regions.shift_remove(name);
        self.rebuild_phase_table();
        while self.phases.last().map_or(false, Vec::is_empty) {
            self.phases.pop();
        }
        self.reset_enabled_phases();

        RegionRemoved {
            name,
            remaining: self.regions.len(),
        }
        .log();
        Ok(())
    }

    fn detach_from_source(&mut self, key: &LinkKey) {
        if let Some(source) = self.regions.get_mut(&key.src_region) {
            if let Ok(output) = source.ports_mut().output_mut(&key.src_output) {
                output.remove_link(key);
            }
        }
    }

    fn resolve_output(&self, region: &str, output: &str) -> NetworkResult<String> {
        let region = self.region(region)?;
        if output.is_empty() {
            return region
                .spec()
                .default_output_name()
                .map(str::to_string)
                .ok_or_else(|| NetworkError::NoDefaultPort {
                    region: region.name().to_string(),
                    port: "output",
                });
        }
        region.output(output)?;
        Ok(output.to_string())
    }

    fn resolve_input(&self, region: &str, input: &str) -> NetworkResult<String> {
        let region = self.region(region)?;
        if input.is_empty() {
            return region
                .spec()
                .default_input_name()
                .map(str::to_string)
                .ok_or_else(|| NetworkError::NoDefaultPort {
                    region: region.name().to_string(),
                    port: "input",
                });
        }
        region.input(input)?;
        Ok(input.to_string())
    }

    /// Connect an output of `src` to an input of `dest`.
    pub fn link(&mut self, src: &str, dest: &str, options: LinkOptions) -> NetworkResult<()> {
        let src_output = self.resolve_output(src, &options.src_output)?;
        let dest_input = self.resolve_input(dest, &options.dest_input)?;
        let key = LinkKey::new(src, src_output.as_str(), dest, dest_input.as_str());

        if self
            .region(dest)?
            .input(&dest_input)?
            .find_link(&key)
            .is_some()
        {
            return Err(NetworkError::DuplicateLink(key.to_string()));
        }

        let link = Link::new(key.clone(), options.link_type, options.link_params, options.delay);
        let dest_region = self.region_mut(dest)?;
        dest_region.uninitialize();
        dest_region.ports_mut().input_mut(&dest_input)?.add_link(link)?;
        self.region_mut(src)?
            .ports_mut()
            .output_mut(&src_output)?
            .add_link(key.clone());
        self.initialized = false;

        LinkAdded {
            link: &key.to_string(),
            delay: options.delay,
        }
        .log();
        Ok(())
    }

    /// Disconnect a link. Empty port names resolve to the defaults.
    pub fn remove_link(
        &mut self,
        src: &str,
        dest: &str,
        src_output: &str,
        dest_input: &str,
    ) -> NetworkResult<()> {
        let src_output = self.resolve_output(src, src_output)?;
        let dest_input = self.resolve_input(dest, dest_input)?;
        let key = LinkKey::new(src, src_output, dest, dest_input.as_str());

        if self
            .region(dest)?
            .input(&dest_input)?
            .find_link(&key)
            .is_none()
        {
            return Err(NetworkError::UnknownLink(key.to_string()));
        }

        let dest_region = self.region_mut(dest)?;
        dest_region.uninitialize();
        dest_region.ports_mut().input_mut(&dest_input)?.remove_link(&key)?;
        self.detach_from_source(&key);
        self.initialized = false;

        LinkRemoved {
            link: &key.to_string(),
        }
        .log();
        Ok(())
    }

    pub(crate) fn find_link_mut(&mut self, key: &LinkKey) -> NetworkResult<&mut Link> {
        self.region_mut(&key.dest_region)?
            .ports_mut()
            .input_mut(&key.dest_input)?
            .find_link_mut(key)
            .ok_or_else(|| NetworkError::UnknownLink(key.to_string()))
    }

    pub fn phases(&self, name: &str) -> NetworkResult<&BTreeSet<u32>> {
        self.region(name).map(Region::phases)
    }

    /// Move a region to the given phases. The table may grow by at most
    /// `MAX_PHASE_GROWTH` phases past its current size.
    pub fn set_phases(
        &mut self,
        name: &str,
        phases: impl IntoIterator<Item = u32>,
    ) -> NetworkResult<()> {
        let phases: BTreeSet<u32> = phases.into_iter().collect();
        if !self.regions.contains_key(name) {
            return Err(NetworkError::UnknownRegion(name.to_string()));
        }
        if phases.is_empty() {
            return Err(NetworkError::EmptyPhaseSet(name.to_string()));
        }
        let limit = self.phases.len() + MAX_PHASE_GROWTH;
        if let Some(&phase) = phases.iter().find(|&&phase| phase as usize >= limit) {
            return Err(NetworkError::PhaseTooLarge {
                region: name.to_string(),
                phase,
                phase_count: self.phases.len(),
            });
        }

        self.region_mut(name)?.set_phases(phases);
        self.rebuild_phase_table();
        self.reset_enabled_phases();
        Ok(())
    }

    /// Rebuild phase -> region indices. The table never shrinks here; only
    /// region removal trims it.
    fn rebuild_phase_table(&mut self) {
        let needed = self
            .regions
            .values()
            .filter_map(|region| region.phases().iter().next_back())
            .map(|&phase| phase as usize + 1)
            .max()
            .unwrap_or(0);
        let mut phases = vec![Vec::new(); self.phases.len().max(needed)];
        for (index, region) in self.regions.values().enumerate() {
            for &phase in region.phases() {
                phases[phase as usize].push(index);
            }
        }
        self.phases = phases;
    }

    fn reset_enabled_phases(&mut self) {
        self.min_enabled_phase = 0;
        self.max_enabled_phase = self.phases.len().saturating_sub(1);
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    /// Names of the regions in `phase`, in run order.
    pub fn regions_in_phase(&self, phase: usize) -> NetworkResult<Vec<&str>> {
        let members = self.phases.get(phase).ok_or(NetworkError::PhaseOutOfRange {
            phase,
            phase_count: self.phases.len(),
        })?;
        Ok(members
            .iter()
            .filter_map(|&index| self.regions.get_index(index))
            .map(|(name, _)| name.as_str())
            .collect())
    }

    pub fn min_enabled_phase(&self) -> usize {
        self.min_enabled_phase
    }

    pub fn max_enabled_phase(&self) -> usize {
        self.max_enabled_phase
    }

    pub fn set_min_enabled_phase(&mut self, phase: usize) -> NetworkResult<()> {
        self.check_phase(phase)?;
        if phase > self.max_enabled_phase {
            return Err(NetworkError::InvertedPhaseRange {
                min: phase,
                max: self.max_enabled_phase,
            });
        }
        self.min_enabled_phase = phase;
        Ok(())
    }

    pub fn set_max_enabled_phase(&mut self, phase: usize) -> NetworkResult<()> {
        self.check_phase(phase)?;
        if phase < self.min_enabled_phase {
            return Err(NetworkError::InvertedPhaseRange {
                min: self.min_enabled_phase,
                max: phase,
            });
        }
        self.max_enabled_phase = phase;
        Ok(())
    }

    fn check_phase(&self, phase: usize) -> NetworkResult<()> {
        if phase >= self.phases.len() {
            return Err(NetworkError::PhaseOutOfRange {
                phase,
                phase_count: self.phases.len(),
            });
        }
        Ok(())
    }

    fn source_buffers(&self) -> SourceBuffers {
        self.regions
            .values()
            .flat_map(|region| region.outputs())
            .map(|output| {
                (
                    (output.region().to_string(), output.name().to_string()),
                    output.buffer().share(),
                )
            })
            .collect()
    }

    /// Size every output, then every input, then let uninitialized regions set
    /// themselves up. Resets the enabled phase range to the whole table.
    pub fn initialize(&mut self) -> NetworkResult<()> {
        if self.initialized {
            return Ok(());
        }

        for region in self.regions.values_mut() {
            region.init_outputs()?;
        }

        let sources = self.source_buffers();
        for region in self.regions.values_mut() {
            region.init_inputs(&sources, self.zero_copy)?;
        }

        for region in self.regions.values_mut() {
            if !region.is_initialized() {
                region.initialize()?;
            }
        }

        self.reset_enabled_phases();
        self.initialized = true;

        NetworkInitialized {
            region_count: self.regions.len(),
            link_count: self.links().count(),
            phase_count: self.phases.len(),
        }
        .log();
        Ok(())
    }

    /// Run `iterations` iterations, initializing first if needed.
    pub fn run(&mut self, iterations: usize) -> NetworkResult<()> {
        self.initialize()?;
        if !self.phases.is_empty() && self.max_enabled_phase >= self.phases.len() {
            return Err(NetworkError::PhaseOutOfRange {
                phase: self.max_enabled_phase,
                phase_count: self.phases.len(),
            });
        }

        let started_message = RunStarted {
            iterations,
            region_count: self.regions.len(),
            phase_count: self.phases.len(),
        };
        started_message.log();
        let _span = started_message.span("run").entered();
        let started = Instant::now();

        for _ in 0..iterations {
            self.iteration += 1;
            self.compute_enabled_phases()?;
            self.invoke_callbacks();
            self.shift_all_links()?;
        }

        RunCompleted {
            iterations,
            iteration: self.iteration,
            duration: started.elapsed(),
        }
        .log();
        Ok(())
    }

    fn compute_enabled_phases(&mut self) -> NetworkResult<()> {
        if self.phases.is_empty() {
            return Ok(());
        }
        for phase in self.min_enabled_phase..=self.max_enabled_phase {
            for &index in &self.phases[phase] {
                let Some((name, region)) = self.regions.get_index_mut(index) else {
                    continue;
                };
                if let Err(error) = region.prepare_inputs().and_then(|()| region.compute()) {
                    RegionComputeFailed {
                        region: name,
                        iteration: self.iteration,
                        error: &error,
                    }
                    .log();
                    return Err(NetworkError::ComputeFailed {
                        region: name.clone(),
                        source: Box::new(error),
                    });
                }
            }
        }
        Ok(())
    }

    fn invoke_callbacks(&mut self) {
        if self.callbacks.is_empty() {
            return;
        }
        let mut callbacks = std::mem::take(&mut self.callbacks);
        let iteration = self.iteration;
        for callback in callbacks.values_mut() {
            callback(&*self, iteration);
        }
        self.callbacks = callbacks;
    }

    /// Advance every delayed link by one iteration.
    pub(crate) fn shift_all_links(&mut self) -> NetworkResult<()> {
        for region in self.regions.values_mut() {
            for input in region.ports_mut().inputs_mut() {
                for link in input.links_mut() {
                    link.shift_buffered_data()?;
                }
            }
        }
        Ok(())
    }

    pub fn add_callback(
        &mut self,
        name: impl Into<String>,
        callback: impl FnMut(&Network, u64) + 'static,
    ) -> NetworkResult<()> {
        let name = name.into();
        if self.callbacks.contains_key(&name) {
            return Err(NetworkError::DuplicateCallback(name));
        }
        self.callbacks.insert(name, Box::new(callback));
        Ok(())
    }

    pub fn remove_callback(&mut self, name: &str) -> NetworkResult<()> {
        self.callbacks
            .shift_remove(name)
            .map(|_| ())
            .ok_or_else(|| NetworkError::UnknownCallback(name.to_string()))
    }

    pub fn enable_profiling(&mut self) {
        for region in self.regions.values_mut() {
            region.enable_profiling();
        }
    }

    pub fn disable_profiling(&mut self) {
        for region in self.regions.values_mut() {
            region.disable_profiling();
        }
    }

    pub fn reset_profiling(&mut self) {
        for region in self.regions.values_mut() {
            region.reset_profiling();
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new(Arc::new(RegionRegistry::with_builtins()))
    }
}

impl Drop for Network {
    fn drop(&mut self) {
        for region in self.regions.values_mut() {
            region.uninitialize();
        }
        for region in self.regions.values_mut() {
            let ports = region.ports_mut();
            for input in ports.inputs_mut() {
                input.take_links();
            }
            for output in ports.outputs_mut() {
                output.clear_links();
            }
        }
        self.regions.clear();
    }
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("regions", &self.regions.keys().collect::<Vec<_>>())
            .field("phases", &self.phases)
            .field("min_enabled_phase", &self.min_enabled_phase)
            .field("max_enabled_phase", &self.max_enabled_phase)
            .field("iteration", &self.iteration)
            .field("initialized", &self.initialized)
            .field("zero_copy", &self.zero_copy)
            .field("callbacks", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}
