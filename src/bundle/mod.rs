// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Whole-network persistence.
//!
//! A bundle is a directory holding:
//! - `network.yaml`: version, iteration, regions in insertion order and links
//!   in saved order, each link with its queued delay snapshots
//! - `R<i>.state`: the opaque state stream of region `i`
//! - `R<i>.outputs.yaml`: the output buffers of region `i`
//!
//! Loading rebuilds the network, restores outputs and delay queues, then
//! initializes and shifts every link once so the next `run()` continues
//! exactly where the saved network stopped.

pub mod format;

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::consts::{BUNDLE_VERSION, NETWORK_FILE};
use crate::engine::{Network, Region};
use crate::errors::{BundleError, NetworkResult};
use crate::observability::messages::bundle::{BundleLoaded, BundleSaved};
use crate::observability::messages::StructuredLog;
use crate::registry::RegionRegistry;

pub use format::{LinkEntry, NetworkDocument, OutputsDocument, RegionEntry};

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> BundleError + '_ {
    move |source| BundleError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn create_file(path: &Path) -> Result<BufWriter<File>, BundleError> {
    File::create(path).map(BufWriter::new).map_err(io_error(path))
}

fn open_file(path: &Path) -> Result<BufReader<File>, BundleError> {
    File::open(path).map(BufReader::new).map_err(io_error(path))
}

fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<(), BundleError> {
    let mut writer = create_file(path)?;
    serde_yaml::to_writer(&mut writer, value).map_err(|source| BundleError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_error(path))
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, BundleError> {
    serde_yaml::from_reader(open_file(path)?).map_err(|source| BundleError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and version-check the topology document of a bundle.
pub fn read_document(bundle: &Path) -> NetworkResult<NetworkDocument> {
    let document: NetworkDocument = read_yaml(&bundle.join(NETWORK_FILE))?;
    if document.version != BUNDLE_VERSION {
        return Err(BundleError::UnsupportedVersion {
            found: document.version,
            expected: BUNDLE_VERSION,
        }
        .into());
    }
    Ok(document)
}

fn write_region(dir: &Path, entry: &RegionEntry, region: &Region) -> NetworkResult<()> {
    let state_path = dir.join(entry.state_file());
    let mut state = create_file(&state_path)?;
    region.serialize(&mut state)?;
    state.flush().map_err(io_error(&state_path))?;

    let outputs = OutputsDocument {
        outputs: region
            .outputs()
            .map(|output| (output.name().to_string(), output.buffer().snapshot()))
            .collect(),
    };
    write_yaml(&dir.join(entry.outputs_file()), &outputs)?;
    Ok(())
}

fn read_region(
    dir: &Path,
    entry: &RegionEntry,
    registry: &RegionRegistry,
) -> NetworkResult<Region> {
    let state_path = dir.join(entry.state_file());
    let mut state = open_file(&state_path)?;
    let mut region = Region::restore(&entry.name, &entry.region_type, &mut state, registry)?;

    let outputs: OutputsDocument = read_yaml(&dir.join(entry.outputs_file()))?;
    for (name, data) in outputs.outputs {
        region.restore_output(&name, data)?;
    }

    if entry.phases.is_empty() {
        return Err(BundleError::Malformed(format!(
            "region '{}' has no phases",
            entry.name
        ))
        .into());
    }
    region.set_phases(entry.phases.iter().copied().collect::<BTreeSet<u32>>());
    Ok(region)
}

impl Network {
    /// Write the whole network to the bundle directory `path`, creating it if
    /// needed. Existing files with the same names are overwritten.
    pub fn save(&self, path: impl AsRef<Path>) -> NetworkResult<()> {
        let dir = path.as_ref();
        fs::create_dir_all(dir).map_err(io_error(dir))?;

        let mut regions = Vec::new();
        for (index, region) in self.regions().enumerate() {
            let entry = RegionEntry {
                name: region.name().to_string(),
                region_type: region.region_type().to_string(),
                phases: region.phases().iter().copied().collect(),
                label: format!("R{}", index),
            };
            write_region(dir, &entry, region)?;
            regions.push(entry);
        }

        let document = NetworkDocument {
            version: BUNDLE_VERSION,
            iteration: self.iteration(),
            regions,
            links: self.links().map(LinkEntry::from).collect(),
        };
        write_yaml(&dir.join(NETWORK_FILE), &document)?;

        BundleSaved {
            path: dir,
            region_count: document.regions.len(),
            link_count: document.links.len(),
            iteration: document.iteration,
        }
        .log();
        Ok(())
    }

    /// Rebuild a network from a bundle directory. The returned network is
    /// initialized and resumes at the saved iteration.
    pub fn load(path: impl AsRef<Path>, registry: Arc<RegionRegistry>) -> NetworkResult<Network> {
        let dir: PathBuf = path.as_ref().to_path_buf();
        let document = read_document(&dir)?;

        let mut network = Network::new(registry);
        for entry in &document.regions {
            if network.region(&entry.name).is_ok() {
                return Err(BundleError::Malformed(format!(
                    "region '{}' is listed twice",
                    entry.name
                ))
                .into());
            }
            let region = read_region(&dir, entry, network.registry())?;
            network.insert_region(region);
        }

        for entry in &document.links {
            network.link(&entry.src_region, &entry.dest_region, entry.options())?;
            network
                .find_link_mut(&entry.key())?
                .restore_delay_buffer(entry.propagation_delay_buffer.clone())?;
        }

        network.set_iteration(document.iteration);
        network.initialize()?;
        network.shift_all_links()?;

        BundleLoaded {
            path: &dir,
            region_count: document.regions.len(),
            link_count: document.links.len(),
            iteration: document.iteration,
        }
        .log();
        Ok(network)
    }
}
