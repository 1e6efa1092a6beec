// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for per-region events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A region's compute failed and the run is being aborted.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_lattice::errors::NetworkError;
/// use the_lattice::observability::messages::region::RegionComputeFailed;
///
/// let error = NetworkError::region_failed("sink", "bad input");
/// let msg = RegionComputeFailed {
///     region: "sink",
///     iteration: 7,
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct RegionComputeFailed<'a> {
    pub region: &'a str,
    pub iteration: u64,
    pub error: &'a dyn std::error::Error,
}

impl Display for RegionComputeFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Region '{}' failed in iteration {}: {}",
            self.region, self.iteration, self.error
        )
    }
}

impl StructuredLog for RegionComputeFailed<'_> {
    fn log(&self) {
        tracing::error!(
            region = self.region,
            iteration = self.iteration,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "region_compute_failed",
            span_name = name,
            region = self.region,
            iteration = self.iteration,
        )
    }
}

/// A command was executed on a region.
///
/// # Log Level
/// `debug!` - Operational detail
pub struct RegionCommandExecuted<'a> {
    pub region: &'a str,
    pub command: &'a str,
}

impl Display for RegionCommandExecuted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Executed command '{}' on region '{}'", self.command, self.region)
    }
}

impl StructuredLog for RegionCommandExecuted<'_> {
    fn log(&self) {
        tracing::debug!(region = self.region, command = self.command, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "region_command",
            span_name = name,
            region = self.region,
            command = self.command,
        )
    }
}
