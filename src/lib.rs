// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // built-in region types
pub mod buffer;     // typed, converting data buffers
pub mod bundle;     // whole-network save/load
pub mod config;     // declarative network configs
pub mod engine;     // network, regions, ports, links
pub mod errors;     // error handling
pub mod observability;
pub mod params;     // parameter values and maps
pub mod registry;   // region type registry
pub mod spec;       // region type descriptions
pub mod traits;     // region implementation contract
