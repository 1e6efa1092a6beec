// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::errors::{BufferError, BundleError, ParameterError};

/// Broad classification of a [`NetworkError`].
///
/// None of these are retried by the engine; the classification only tells the
/// caller what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad names, bad topology, malformed bundles, phase problems.
    Configuration,
    /// A copy would overflow its destination buffer.
    Capacity,
    /// Parameter name/type/access mismatches and similar programming errors.
    Unsupported,
    /// Filesystem or stream failures.
    Io,
    /// A region implementation reported a failure of its own.
    Region,
}

/// Errors surfaced by the network, its regions, links and ports.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Region '{0}' already exists in the network")]
    DuplicateRegion(String),

    #[error("Region '{0}' does not exist in the network")]
    UnknownRegion(String),

    #[error("Region type '{0}' is not registered")]
    UnknownRegionType(String),

    #[error("Region '{region}' has no input named '{input}'")]
    UnknownInput { region: String, input: String },

    #[error("Region '{region}' has no output named '{output}'")]
    UnknownOutput { region: String, output: String },

    #[error("Region '{region}' has no default {port}; name one explicitly")]
    NoDefaultPort { region: String, port: &'static str },

    #[error("Link {0} already exists")]
    DuplicateLink(String),

    #[error("Link {0} does not exist")]
    UnknownLink(String),

    #[error("Link {0} is not initialized")]
    LinkNotInitialized(String),

    #[error("Links into input '{input}' cannot change while it is initialized")]
    InputInitialized { input: String },

    #[error("Region '{region}' cannot be removed while it has outgoing links: {}", .links.join(", "))]
    OutgoingLinks { region: String, links: Vec<String> },

    #[error("Phase set for region '{0}' is empty")]
    EmptyPhaseSet(String),

    #[error("Phase {phase} for region '{region}' is too far past the {phase_count} existing phases")]
    PhaseTooLarge {
        region: String,
        phase: u32,
        phase_count: usize,
    },

    #[error("Phase {phase} is out of range for a network with {phase_count} phases")]
    PhaseOutOfRange { phase: usize, phase_count: usize },

    #[error("Enabled phase range [{min}, {max}] is inverted")]
    InvertedPhaseRange { min: usize, max: usize },

    #[error("Region '{0}' is not initialized")]
    NotInitialized(String),

    #[error("Required input '{input}' of region '{region}' has no incoming links")]
    MissingRequiredInput { region: String, input: String },

    #[error("Input '{input}' of region '{region}' expects {expected} elements but its links provide {actual}")]
    InputWidthMismatch {
        region: String,
        input: String,
        expected: usize,
        actual: usize,
    },

    #[error("Output '{output}' of region '{region}' holds {actual} but {expected} was restored")]
    OutputTypeMismatch {
        region: String,
        output: String,
        expected: String,
        actual: String,
    },

    #[error("Callback '{0}' is already registered")]
    DuplicateCallback(String),

    #[error("Callback '{0}' is not registered")]
    UnknownCallback(String),

    #[error("Region type '{region_type}' has no command '{command}'")]
    UnknownCommand {
        region_type: String,
        command: String,
    },

    #[error("Region '{region}' failed: {message}")]
    RegionFailed { region: String, message: String },

    #[error("Compute failed in region '{region}': {source}")]
    ComputeFailed {
        region: String,
        source: Box<NetworkError>,
    },

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error("Region state stream error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Region state encoding error: {0}")]
    StateEncoding(#[from] serde_json::Error),
}

impl NetworkError {
    /// Convenience constructor for region implementations reporting their own failures.
    pub fn region_failed(region: impl Into<String>, message: impl Into<String>) -> Self {
        NetworkError::RegionFailed {
            region: region.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            NetworkError::Buffer(BufferError::CapacityExceeded { .. }) => ErrorKind::Capacity,
            NetworkError::Buffer(_) | NetworkError::Parameter(_) => ErrorKind::Unsupported,
            NetworkError::UnknownCommand { .. } => ErrorKind::Unsupported,
            NetworkError::Bundle(BundleError::Io { .. }) | NetworkError::Io(_) => ErrorKind::Io,
            NetworkError::RegionFailed { .. } | NetworkError::StateEncoding(_) => ErrorKind::Region,
            NetworkError::ComputeFailed { source, .. } => source.kind(),
            _ => ErrorKind::Configuration,
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}

/// Result type alias for network operations.
pub type NetworkResult<T> = Result<T, NetworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let capacity = NetworkError::Buffer(BufferError::CapacityExceeded {
            count: 4,
            offset: 1,
            capacity: 4,
        });
        assert_eq!(capacity.kind(), ErrorKind::Capacity);

        let wrapped = NetworkError::ComputeFailed {
            region: "sink".into(),
            source: Box::new(capacity),
        };
        assert_eq!(wrapped.kind(), ErrorKind::Capacity);

        assert!(NetworkError::DuplicateRegion("a".into()).is_configuration());
        assert_eq!(
            NetworkError::Parameter(ParameterError::Missing { name: "dim".into() }).kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(NetworkError::region_failed("a", "boom").kind(), ErrorKind::Region);
    }

    #[test]
    fn test_outgoing_links_message_lists_links() {
        let err = NetworkError::OutgoingLinks {
            region: "A".into(),
            links: vec!["A.out-->B.in".into(), "A.out-->C.in".into()],
        };
        assert_eq!(
            err.to_string(),
            "Region 'A' cannot be removed while it has outgoing links: A.out-->B.in, A.out-->C.in"
        );
    }
}
