// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::engine::LinkOptions;
use crate::params::RawParameters;

/// Declarative description of a network.
///
/// Loaded from YAML, or from TOML when the file extension is `.toml`.
///
/// # Fields
/// * `zero_copy` - Allow zero-copy links (defaults to true)
/// * `iterations` - Iterations the CLI runs when `-n` is not given (optional)
/// * `regions` - Regions in insertion order
/// * `links` - Links in the order they are created
///
/// # Example
/// ```yaml
/// zero_copy: true
/// iterations: 10
/// regions:
///   - name: counter
///     type: counter
///     params: { dim: 4 }
///   - name: sink
///     type: recorder
/// links:
///   - src: counter
///     dest: sink
///     delay: 1
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_zero_copy")]
    pub zero_copy: bool,
    pub iterations: Option<usize>,
    #[serde(default)]
    pub regions: Vec<RegionConfig>,
    #[serde(default)]
    pub links: Vec<LinkConfig>,
}

fn default_zero_copy() -> bool {
    true
}

/// Configuration for a single region.
///
/// # Fields
/// * `name` - Unique region name
/// * `region_type` - Registered region type (`type` in the document)
/// * `phases` - Explicit phases; a new trailing phase when omitted
/// * `params` - Creation parameters, checked against the type's spec
#[derive(Debug, Clone, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub region_type: String,
    pub phases: Option<Vec<u32>>,
    #[serde(default)]
    pub params: RawParameters,
}

/// Configuration for a single link. Omitted ports resolve to the regions'
/// default output and input.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkConfig {
    pub src: String,
    pub dest: String,
    #[serde(default)]
    pub src_output: String,
    #[serde(default)]
    pub dest_input: String,
    #[serde(default)]
    pub delay: usize,
    #[serde(default, rename = "type")]
    pub link_type: String,
    #[serde(default)]
    pub params: String,
}

impl LinkConfig {
    pub fn options(&self) -> LinkOptions {
        LinkOptions::new()
            .link_type(self.link_type.as_str())
            .link_params(self.params.as_str())
            .src_output(self.src_output.as_str())
            .dest_input(self.dest_input.as_str())
            .delay(self.delay)
    }
}

/// Load a config from a YAML or TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<NetworkConfig, Box<dyn std::error::Error>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .map_or(false, |extension| extension.eq_ignore_ascii_case("toml"));
    let cfg: NetworkConfig = if is_toml {
        toml::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(cfg)
}

/// Load a config and validate its structure
///
/// All validation errors are reported together.
pub fn load_and_validate_config<P: AsRef<Path>>(
    path: P,
) -> Result<NetworkConfig, Box<dyn std::error::Error>> {
    let cfg = load_config(path)?;

    if let Err(validation_errors) = crate::config::validate_network_config(&cfg) {
        let error_messages: Vec<String> = validation_errors.iter().map(|e| e.to_string()).collect();
        let combined_error = format!(
            "Configuration validation failed:\n{}",
            error_messages.join("\n")
        );
        return Err(combined_error.into());
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
regions:
  - name: counter
    type: counter
    params: { dim: 2 }
  - name: sink
    type: recorder
    phases: [3]
links:
  - src: counter
    dest: sink
    delay: 1
"#;

        let cfg: NetworkConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(cfg.zero_copy);
        assert_eq!(cfg.iterations, None);
        assert_eq!(cfg.regions.len(), 2);
        assert_eq!(cfg.regions[0].region_type, "counter");
        assert_eq!(cfg.regions[0].params.len(), 1);
        assert_eq!(cfg.regions[1].phases, Some(vec![3]));
        assert!(cfg.regions[1].params.is_empty());
        assert_eq!(cfg.links[0].delay, 1);
        assert!(cfg.links[0].src_output.is_empty());
    }

    #[test]
    fn test_link_options_carry_every_field() {
        let link = LinkConfig {
            src: "a".into(),
            dest: "b".into(),
            src_output: "out".into(),
            dest_input: "in".into(),
            delay: 3,
            link_type: "plain".into(),
            params: "{}".into(),
        };
        assert_eq!(
            link.options(),
            LinkOptions::new()
                .link_type("plain")
                .link_params("{}")
                .src_output("out")
                .dest_input("in")
                .delay(3)
        );
    }

    #[test]
    fn test_load_toml_by_extension() {
        let toml = r#"
zero_copy = false
iterations = 5

[[regions]]
name = "counter"
type = "counter"
params = { dim = 3, increment = 0.5 }

[[regions]]
name = "sink"
type = "recorder"

[[links]]
src = "counter"
dest = "sink"
"#;
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(toml.as_bytes()).unwrap();

        let cfg = load_and_validate_config(file.path()).unwrap();
        assert!(!cfg.zero_copy);
        assert_eq!(cfg.iterations, Some(5));
        assert_eq!(cfg.regions.len(), 2);
        assert_eq!(cfg.regions[0].params.len(), 2);
        assert_eq!(cfg.links.len(), 1);
    }

    #[test]
    fn test_load_and_validate_rejects_invalid_config() {
        let yaml = r#"
regions:
  - name: counter
    type: counter
  - name: counter
    type: recorder
links:
  - src: counter
    dest: nowhere
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let message = load_and_validate_config(file.path()).unwrap_err().to_string();
        assert!(message.contains("Duplicate region name: 'counter'"));
        assert!(message.contains("nowhere"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_config("does/not/exist.yaml").is_err());
    }
}
