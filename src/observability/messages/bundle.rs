// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for bundle persistence.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::path::Path;
use tracing::Span;

/// A network was written to a bundle directory.
///
/// # Log Level
/// `info!` - Important operational event
pub struct BundleSaved<'a> {
    pub path: &'a Path,
    pub region_count: usize,
    pub link_count: usize,
    pub iteration: u64,
}

impl Display for BundleSaved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Saved network to {} ({} regions, {} links, iteration {})",
            self.path.display(),
            self.region_count,
            self.link_count,
            self.iteration
        )
    }
}

impl StructuredLog for BundleSaved<'_> {
    fn log(&self) {
        tracing::info!(
            path = %self.path.display(),
            region_count = self.region_count,
            link_count = self.link_count,
            iteration = self.iteration,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "bundle_saved",
            span_name = name,
            path = %self.path.display(),
        )
    }
}

/// A network was restored from a bundle directory.
///
/// # Log Level
/// `info!` - Important operational event
pub struct BundleLoaded<'a> {
    pub path: &'a Path,
    pub region_count: usize,
    pub link_count: usize,
    pub iteration: u64,
}

impl Display for BundleLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded network from {} ({} regions, {} links, iteration {})",
            self.path.display(),
            self.region_count,
            self.link_count,
            self.iteration
        )
    }
}

impl StructuredLog for BundleLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            path = %self.path.display(),
            region_count = self.region_count,
            link_count = self.link_count,
            iteration = self.iteration,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "bundle_loaded",
            span_name = name,
            path = %self.path.display(),
        )
    }
}
