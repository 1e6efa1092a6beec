// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and
//! operational logging in the engine. Message types follow a struct-based
//! pattern with a `Display` implementation so log text lives in one place and
//! call sites stay free of format strings.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::network` - topology changes and the run lifecycle
//! * `messages::region` - compute failures and commands
//! * `messages::registry` - region type registration
//! * `messages::bundle` - bundle save and load
//!
//! The library never installs a subscriber. Binaries decide where events go.
//!
//! # Usage
//!
//! ```rust
//! use the_lattice::observability::messages::bundle::BundleSaved;
//! use std::path::Path;
//!
//! let msg = BundleSaved {
//!     path: Path::new("/tmp/net.nta"),
//!     region_count: 2,
//!     link_count: 1,
//!     iteration: 3,
//! };
//!
//! tracing::info!("{}", msg);
//! ```

pub mod messages;
