// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for human-readable output; most also
//! implement [`StructuredLog`] so call sites emit the message at its intended
//! level with structured fields attached.
//!
//! # Organization
//!
//! * `network` - topology changes, initialization and run lifecycle
//! * `region` - per-region compute failures and commands
//! * `registry` - region type registration
//! * `bundle` - bundle save and load
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_lattice::observability::messages::network::RunStarted;
//! use the_lattice::observability::messages::StructuredLog;
//!
//! let msg = RunStarted {
//!     iterations: 10,
//!     region_count: 3,
//!     phase_count: 2,
//! };
//!
//! msg.log();
//! ```

use tracing::Span;

pub mod bundle;
pub mod network;
pub mod region;
pub mod registry;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
