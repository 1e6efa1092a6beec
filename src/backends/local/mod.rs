// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod factory;
pub mod regions;

pub use factory::LocalRegionFactory;
pub use regions::*;
