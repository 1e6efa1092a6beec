// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Errors that can occur during network configuration validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Two regions share a name
    DuplicateRegionName {
        /// The duplicated region name
        name: String,
    },
    /// A link references a region that is not declared
    UnresolvedLinkEndpoint {
        /// Source region of the offending link
        src: String,
        /// Destination region of the offending link
        dest: String,
        /// The endpoint that couldn't be resolved
        missing_region: String,
    },
    /// A region declares an explicit but empty phase list
    EmptyPhaseList {
        /// The region with the empty list
        region: String,
    },
    /// The same output/input pair is linked twice
    DuplicateLink {
        /// Human-readable link identity
        link: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateRegionName { name } => {
                write!(f, "Duplicate region name: '{}'", name)
            }
            ValidationError::UnresolvedLinkEndpoint {
                src,
                dest,
                missing_region,
            } => {
                write!(
                    f,
                    "Link '{}' -> '{}' references region '{}' which does not exist",
                    src, dest, missing_region
                )
            }
            ValidationError::EmptyPhaseList { region } => {
                write!(f, "Region '{}' declares an empty phase list", region)
            }
            ValidationError::DuplicateLink { link } => {
                write!(f, "Link {} is declared more than once", link)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
