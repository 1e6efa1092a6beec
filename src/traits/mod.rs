// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod factory;
pub mod region_impl;

pub use factory::{RegionFactory, RegionTypeFactory};
pub use region_impl::{RegionImpl, RegionImplType};
