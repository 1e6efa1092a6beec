// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Region implementations for The Lattice.
//!
//! # Available Backends
//!
//! ## Local Backend
//! In-process Rust regions registered by [`local::LocalRegionFactory`]:
//! - **counter**: Adds a fixed increment to its output on every compute
//! - **vector_source**: Writes a settable vector to its output
//! - **recorder**: Keeps a copy of whatever arrived on its input
//! - **sum**: Sums its input into a single element
//!
//! ## Stub Backend (Test-Only)
//! - **StubRegion**: Minimal region for wiring tests
//! - **FailingRegion**: Always fails on compute, for error propagation tests
//!
//! # Examples
//!
//! ```rust
//! use the_lattice::backends::local::LocalRegionFactory;
//! use the_lattice::registry::RegionRegistry;
//!
//! let registry = RegionRegistry::new();
//! LocalRegionFactory::register_builtins(&registry);
//! assert!(registry.is_registered("counter"));
//! ```

pub mod local;
#[cfg(test)]
pub mod stub;
