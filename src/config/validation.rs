// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation for network configurations.
//!
//! Checks run before any region is created, so every problem in a document
//! is reported at once:
//!
//! 1. **Region names are unique**
//! 2. **Explicit phase lists are non-empty**
//! 3. **Link endpoints name declared regions**
//! 4. **No link is declared twice**
//!
//! Port names, parameter values and phase limits are checked later, when the
//! network is built, because they depend on the registered region types.
//!
//! # Example
//! ```rust
//! use the_lattice::config::{validate_network_config, LinkConfig, NetworkConfig};
//! use the_lattice::errors::ValidationError;
//!
//! let config = NetworkConfig {
//!     zero_copy: true,
//!     iterations: None,
//!     regions: vec![],
//!     links: vec![LinkConfig {
//!         src: "a".to_string(),
//!         dest: "b".to_string(),
//!         src_output: String::new(),
//!         dest_input: String::new(),
//!         delay: 0,
//!         link_type: String::new(),
//!         params: String::new(),
//!     }],
//! };
//!
//! let errors = validate_network_config(&config).unwrap_err();
//! assert!(matches!(errors[0], ValidationError::UnresolvedLinkEndpoint { .. }));
//! ```

use std::collections::HashSet;

use crate::config::{LinkConfig, NetworkConfig};
use crate::errors::ValidationError;

/// Validate a configuration, collecting every error found.
pub fn validate_network_config(config: &NetworkConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    errors.extend(validate_unique_region_names(config));
    errors.extend(validate_phase_lists(config));
    errors.extend(validate_link_endpoints(config));
    errors.extend(validate_unique_links(config));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_unique_region_names(config: &NetworkConfig) -> Vec<ValidationError> {
    let mut seen = HashSet::new();
    config
        .regions
        .iter()
        .filter(|region| !seen.insert(region.name.as_str()))
        .map(|region| ValidationError::DuplicateRegionName {
            name: region.name.clone(),
        })
        .collect()
}

fn validate_phase_lists(config: &NetworkConfig) -> Vec<ValidationError> {
    config
        .regions
        .iter()
        .filter(|region| region.phases.as_ref().map_or(false, Vec::is_empty))
        .map(|region| ValidationError::EmptyPhaseList {
            region: region.name.clone(),
        })
        .collect()
}

fn validate_link_endpoints(config: &NetworkConfig) -> Vec<ValidationError> {
    let names: HashSet<&str> = config
        .regions
        .iter()
        .map(|region| region.name.as_str())
        .collect();

    let mut errors = Vec::new();
    for link in &config.links {
        for endpoint in [&link.src, &link.dest] {
            if !names.contains(endpoint.as_str()) {
                errors.push(ValidationError::UnresolvedLinkEndpoint {
                    src: link.src.clone(),
                    dest: link.dest.clone(),
                    missing_region: endpoint.clone(),
                });
            }
        }
    }
    errors
}

fn link_identity(link: &LinkConfig) -> String {
    format!(
        "{}.{}-->{}.{}",
        link.src, link.src_output, link.dest, link.dest_input
    )
}

fn validate_unique_links(config: &NetworkConfig) -> Vec<ValidationError> {
    let mut seen = HashSet::new();
    config
        .links
        .iter()
        .map(link_identity)
        .filter(|identity| !seen.insert(identity.clone()))
        .map(|link| ValidationError::DuplicateLink { link })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegionConfig;
    use crate::params::RawParameters;

    fn region(name: &str, phases: Option<Vec<u32>>) -> RegionConfig {
        RegionConfig {
            name: name.to_string(),
            region_type: "counter".to_string(),
            phases,
            params: RawParameters::new(),
        }
    }

    fn link(src: &str, dest: &str) -> LinkConfig {
        LinkConfig {
            src: src.to_string(),
            dest: dest.to_string(),
            src_output: String::new(),
            dest_input: String::new(),
            delay: 0,
            link_type: String::new(),
            params: String::new(),
        }
    }

    fn config(regions: Vec<RegionConfig>, links: Vec<LinkConfig>) -> NetworkConfig {
        NetworkConfig {
            zero_copy: true,
            iterations: None,
            regions,
            links,
        }
    }

    #[test]
    fn test_validation_cases() {
        struct TestCase {
            name: &'static str,
            config: NetworkConfig,
            expected: Vec<ValidationError>,
        }

        let test_cases = vec![
            TestCase {
                name: "valid chain",
                config: config(
                    vec![region("a", None), region("b", Some(vec![0, 2]))],
                    vec![link("a", "b")],
                ),
                expected: vec![],
            },
            TestCase {
                name: "empty network",
                config: config(vec![], vec![]),
                expected: vec![],
            },
            TestCase {
                name: "duplicate region",
                config: config(vec![region("a", None), region("a", None)], vec![]),
                expected: vec![ValidationError::DuplicateRegionName {
                    name: "a".to_string(),
                }],
            },
            TestCase {
                name: "empty phase list",
                config: config(vec![region("a", Some(vec![]))], vec![]),
                expected: vec![ValidationError::EmptyPhaseList {
                    region: "a".to_string(),
                }],
            },
            TestCase {
                name: "both endpoints missing",
                config: config(vec![], vec![link("x", "y")]),
                expected: vec![
                    ValidationError::UnresolvedLinkEndpoint {
                        src: "x".to_string(),
                        dest: "y".to_string(),
                        missing_region: "x".to_string(),
                    },
                    ValidationError::UnresolvedLinkEndpoint {
                        src: "x".to_string(),
                        dest: "y".to_string(),
                        missing_region: "y".to_string(),
                    },
                ],
            },
            TestCase {
                name: "duplicate link",
                config: config(
                    vec![region("a", None), region("b", None)],
                    vec![link("a", "b"), link("a", "b")],
                ),
                expected: vec![ValidationError::DuplicateLink {
                    link: "a.-->b.".to_string(),
                }],
            },
            TestCase {
                name: "errors accumulate",
                config: config(
                    vec![region("a", Some(vec![])), region("a", None)],
                    vec![link("a", "missing")],
                ),
                expected: vec![
                    ValidationError::DuplicateRegionName {
                        name: "a".to_string(),
                    },
                    ValidationError::EmptyPhaseList {
                        region: "a".to_string(),
                    },
                    ValidationError::UnresolvedLinkEndpoint {
                        src: "a".to_string(),
                        dest: "missing".to_string(),
                        missing_region: "missing".to_string(),
                    },
                ],
            },
        ];

        for test_case in test_cases {
            let actual = validate_network_config(&test_case.config)
                .err()
                .unwrap_or_default();
            assert_eq!(actual, test_case.expected, "case: {}", test_case.name);
        }
    }
}
