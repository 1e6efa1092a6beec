// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod counter;
pub mod recorder;
pub mod sum;
pub mod vector_source;

pub use counter::CounterRegion;
pub use recorder::RecorderRegion;
pub use sum::SumRegion;
pub use vector_source::VectorSourceRegion;
