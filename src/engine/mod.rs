// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The graph runtime.
//!
//! A [`Network`] owns [`Region`]s. Each region owns its [`RegionPorts`]: named
//! [`Input`]s and [`Output`]s created from the region type's spec. Each input
//! owns the [`Link`]s feeding it; outputs only keep the [`LinkKey`]s of the
//! links reading from them.
//!
//! Initialization runs in a fixed order across the whole network: outputs
//! first, then inputs (whose widths depend on their sources), then the
//! regions' own setup.

mod input;
mod link;
mod network;
mod output;
mod ports;
mod region;

#[cfg(test)]
mod integration_tests;

pub use input::{Input, SourceBuffers};
pub use link::{Link, LinkKey, LinkState};
pub use network::{Callback, LinkOptions, Network};
pub use output::Output;
pub use ports::RegionPorts;
pub use region::{ComputeProfile, Region};
