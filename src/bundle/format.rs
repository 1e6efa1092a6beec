// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::buffer::ArrayData;
use crate::engine::{Link, LinkKey, LinkOptions};

/// Topology document stored as `network.yaml` in a bundle directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDocument {
    pub version: u32,
    pub iteration: u64,
    #[serde(default)]
    pub regions: Vec<RegionEntry>,
    #[serde(default)]
    pub links: Vec<LinkEntry>,
}

/// One region, in network insertion order. `label` names its state files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub region_type: String,
    pub phases: Vec<u32>,
    pub label: String,
}

impl RegionEntry {
    pub fn state_file(&self) -> String {
        format!("{}.state", self.label)
    }

    pub fn outputs_file(&self) -> String {
        format!("{}.outputs.yaml", self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkEntry {
    #[serde(default)]
    pub link_type: String,
    #[serde(default)]
    pub params: String,
    pub src_region: String,
    pub src_output: String,
    pub dest_region: String,
    pub dest_input: String,
    #[serde(default)]
    pub propagation_delay: usize,
    /// Every queued snapshot except the newest, oldest first.
    #[serde(default)]
    pub propagation_delay_buffer: Vec<ArrayData>,
}

impl LinkEntry {
    pub fn key(&self) -> LinkKey {
        LinkKey::new(
            self.src_region.as_str(),
            self.src_output.as_str(),
            self.dest_region.as_str(),
            self.dest_input.as_str(),
        )
    }

    pub fn options(&self) -> LinkOptions {
        LinkOptions::new()
            .link_type(self.link_type.as_str())
            .link_params(self.params.as_str())
            .src_output(self.src_output.as_str())
            .dest_input(self.dest_input.as_str())
            .delay(self.propagation_delay)
    }
}

impl From<&Link> for LinkEntry {
    fn from(link: &Link) -> Self {
        let key = link.key();
        Self {
            link_type: link.link_type().to_string(),
            params: link.link_params().to_string(),
            src_region: key.src_region.clone(),
            src_output: key.src_output.clone(),
            dest_region: key.dest_region.clone(),
            dest_input: key.dest_input.clone(),
            propagation_delay: link.delay(),
            propagation_delay_buffer: link.delay_buffer_snapshot(),
        }
    }
}

/// Output buffers of one region, stored as `R<i>.outputs.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputsDocument {
    #[serde(default)]
    pub outputs: IndexMap<String, ArrayData>,
}
