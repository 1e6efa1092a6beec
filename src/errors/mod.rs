// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod buffer;
mod bundle;
mod config;
mod network;
mod parameter;

pub use buffer::BufferError;
pub use bundle::BundleError;
pub use config::ValidationError;
pub use network::{ErrorKind, NetworkError, NetworkResult};
pub use parameter::ParameterError;
