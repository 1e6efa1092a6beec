// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Errors reading or writing a network bundle directory.
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Bundle I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Bundle document {} is not valid: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Unsupported bundle version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Malformed bundle: {0}")]
    Malformed(String),
}
