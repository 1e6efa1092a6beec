// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for region type registration.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

pub struct RegionTypeRegistered<'a> {
    pub region_type: &'a str,
}

impl Display for RegionTypeRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Registered region type '{}'", self.region_type)
    }
}

impl StructuredLog for RegionTypeRegistered<'_> {
    fn log(&self) {
        tracing::debug!(region_type = self.region_type, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("region_type", span_name = name, region_type = self.region_type)
    }
}

/// A region type name was registered again; the new factory replaces the old.
///
/// # Log Level
/// `warn!` - Probably unintended, but not fatal
pub struct RegionTypeOverwritten<'a> {
    pub region_type: &'a str,
}

impl Display for RegionTypeOverwritten<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Region type '{}' was already registered; replacing its factory",
            self.region_type
        )
    }
}

impl StructuredLog for RegionTypeOverwritten<'_> {
    fn log(&self) {
        tracing::warn!(region_type = self.region_type, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("region_type", span_name = name, region_type = self.region_type)
    }
}

pub struct RegionTypeUnregistered<'a> {
    pub region_type: &'a str,
}

impl Display for RegionTypeUnregistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Unregistered region type '{}'", self.region_type)
    }
}

impl StructuredLog for RegionTypeUnregistered<'_> {
    fn log(&self) {
        tracing::debug!(region_type = self.region_type, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("region_type", span_name = name, region_type = self.region_type)
    }
}
