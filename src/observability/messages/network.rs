// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for network topology and run lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Regions and links being added or removed
//! * Network initialization
//! * The start and end of a `run()` call

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// A region was added to the network.
///
/// # Log Level
/// `debug!` - Topology detail
pub struct RegionAdded<'a> {
    pub name: &'a str,
    pub region_type: &'a str,
    pub phases: &'a [u32],
}

impl Display for RegionAdded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Added region '{}' of type '{}' in phases {:?}",
            self.name, self.region_type, self.phases
        )
    }
}

impl StructuredLog for RegionAdded<'_> {
    fn log(&self) {
        tracing::debug!(
            region = self.name,
            region_type = self.region_type,
            phases = ?self.phases,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "region_added",
            span_name = name,
            region = self.name,
            region_type = self.region_type,
        )
    }
}

/// A region was removed from the network.
///
/// # Log Level
/// `debug!` - Topology detail
pub struct RegionRemoved<'a> {
    pub name: &'a str,
    pub remaining: usize,
}

impl Display for RegionRemoved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Removed region '{}' ({} regions remain)",
            self.name, self.remaining
        )
    }
}

impl StructuredLog for RegionRemoved<'_> {
    fn log(&self) {
        tracing::debug!(region = self.name, remaining = self.remaining, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("region_removed", span_name = name, region = self.name)
    }
}

/// A link was added between two ports.
///
/// # Log Level
/// `debug!` - Topology detail
///
/// # Example
/// ```
/// use the_lattice::observability::messages::network::LinkAdded;
///
/// let msg = LinkAdded {
///     link: "counter.out-->sink.in",
///     delay: 2,
/// };
///
/// assert_eq!(msg.to_string(), "Added link counter.out-->sink.in with delay 2");
/// ```
pub struct LinkAdded<'a> {
    pub link: &'a str,
    pub delay: usize,
}

impl Display for LinkAdded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Added link {} with delay {}", self.link, self.delay)
    }
}

impl StructuredLog for LinkAdded<'_> {
    fn log(&self) {
        tracing::debug!(link = self.link, delay = self.delay, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("link_added", span_name = name, link = self.link)
    }
}

/// A link was removed.
pub struct LinkRemoved<'a> {
    pub link: &'a str,
}

impl Display for LinkRemoved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Removed link {}", self.link)
    }
}

impl StructuredLog for LinkRemoved<'_> {
    fn log(&self) {
        tracing::debug!(link = self.link, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("link_removed", span_name = name, link = self.link)
    }
}

/// All outputs, inputs and region internals are sized and ready.
///
/// # Log Level
/// `info!` - Important operational event
pub struct NetworkInitialized {
    pub region_count: usize,
    pub link_count: usize,
    pub phase_count: usize,
}

impl Display for NetworkInitialized {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Network initialized: {} regions, {} links, {} phases",
            self.region_count, self.link_count, self.phase_count
        )
    }
}

impl StructuredLog for NetworkInitialized {
    fn log(&self) {
        tracing::info!(
            region_count = self.region_count,
            link_count = self.link_count,
            phase_count = self.phase_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "network_initialized",
            span_name = name,
            region_count = self.region_count,
            link_count = self.link_count,
        )
    }
}

/// A `run()` call is starting.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RunStarted {
    pub iterations: usize,
    pub region_count: usize,
    pub phase_count: usize,
}

impl Display for RunStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Running network for {} iterations: {} regions in {} phases",
            self.iterations, self.region_count, self.phase_count
        )
    }
}

impl StructuredLog for RunStarted {
    fn log(&self) {
        tracing::info!(
            iterations = self.iterations,
            region_count = self.region_count,
            phase_count = self.phase_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "run",
            span_name = name,
            iterations = self.iterations,
            region_count = self.region_count,
        )
    }
}

/// A `run()` call finished every requested iteration.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RunCompleted {
    pub iterations: usize,
    pub iteration: u64,
    pub duration: Duration,
}

impl Display for RunCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Completed {} iterations (now at iteration {}) in {:?}",
            self.iterations, self.iteration, self.duration
        )
    }
}

impl StructuredLog for RunCompleted {
    fn log(&self) {
        tracing::info!(
            iterations = self.iterations,
            iteration = self.iteration,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "run_completed",
            span_name = name,
            iteration = self.iteration,
            duration = ?self.duration,
        )
    }
}
