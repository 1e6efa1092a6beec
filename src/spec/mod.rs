// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Region-type contracts.
//!
//! A [`RegionSpec`] declares the named inputs, outputs, parameters and
//! commands every region of one type supports. Specs are built once per type by
//! the type's `create_spec()`, cached by the registry and never mutated after.
//!
//! # Example
//! ```
//! use the_lattice::buffer::ElementType;
//! use the_lattice::spec::{AccessMode, OutputSpec, ParameterSpec, ParameterType, RegionSpec};
//!
//! let spec = RegionSpec::new("Emits a constant")
//!     .with_output("out", OutputSpec::new(ElementType::Real32).default_port())
//!     .with_parameter(
//!         "dim",
//!         ParameterSpec::new(ParameterType::UInt32)
//!             .with_default("4")
//!             .with_access(AccessMode::CreateOnly),
//!     );
//!
//! assert_eq!(spec.default_output_name(), Some("out"));
//! assert_eq!(spec.default_input_name(), None);
//! ```

mod parameter;

pub use parameter::{AccessMode, ParameterSpec, ParameterType};

use indexmap::IndexMap;
use std::fmt;

use crate::buffer::ElementType;

/// Contract for one named input.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSpec {
    pub data_type: ElementType,
    /// Fixed element count, or 0 when the width follows the incoming links.
    pub count: usize,
    pub required: bool,
    pub is_default: bool,
    pub description: String,
}

impl InputSpec {
    pub fn new(data_type: ElementType) -> Self {
        Self {
            data_type,
            count: 0,
            required: false,
            is_default: false,
            description: String::new(),
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_port(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Contract for one named output.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSpec {
    pub data_type: ElementType,
    /// Fixed element count, or 0 to ask the region for it at initialization.
    pub count: usize,
    pub is_default: bool,
    pub description: String,
}

impl OutputSpec {
    pub fn new(data_type: ElementType) -> Self {
        Self {
            data_type,
            count: 0,
            is_default: false,
            description: String::new(),
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn default_port(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandSpec {
    pub description: String,
}

impl CommandSpec {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// The declared contract of a region type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionSpec {
    description: String,
    inputs: IndexMap<String, InputSpec>,
    outputs: IndexMap<String, OutputSpec>,
    parameters: IndexMap<String, ParameterSpec>,
    commands: IndexMap<String, CommandSpec>,
}

impl RegionSpec {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_input(mut self, name: impl Into<String>, spec: InputSpec) -> Self {
        self.inputs.insert(name.into(), spec);
        self
    }

    pub fn with_output(mut self, name: impl Into<String>, spec: OutputSpec) -> Self {
        self.outputs.insert(name.into(), spec);
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, spec: ParameterSpec) -> Self {
        self.parameters.insert(name.into(), spec);
        self
    }

    pub fn with_command(mut self, name: impl Into<String>, spec: CommandSpec) -> Self {
        self.commands.insert(name.into(), spec);
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn inputs(&self) -> &IndexMap<String, InputSpec> {
        &self.inputs
    }

    pub fn outputs(&self) -> &IndexMap<String, OutputSpec> {
        &self.outputs
    }

    pub fn parameters(&self) -> &IndexMap<String, ParameterSpec> {
        &self.parameters
    }

    pub fn commands(&self) -> &IndexMap<String, CommandSpec> {
        &self.commands
    }

    pub fn input(&self, name: &str) -> Option<&InputSpec> {
        self.inputs.get(name)
    }

    pub fn output(&self, name: &str) -> Option<&OutputSpec> {
        self.outputs.get(name)
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.get(name)
    }

    pub fn command(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    /// The input flagged as default, else the only input, else none.
    pub fn default_input_name(&self) -> Option<&str> {
        default_name(self.inputs.iter().map(|(name, spec)| (name, spec.is_default)))
    }

    /// The output flagged as default, else the only output, else none.
    pub fn default_output_name(&self) -> Option<&str> {
        default_name(self.outputs.iter().map(|(name, spec)| (name, spec.is_default)))
    }
}

fn default_name<'a>(ports: impl ExactSizeIterator<Item = (&'a String, bool)>) -> Option<&'a str> {
    let only_one = ports.len() == 1;
    let mut first = None;
    for (name, is_default) in ports {
        if is_default {
            return Some(name.as_str());
        }
        first.get_or_insert(name.as_str());
    }
    if only_one {
        first
    } else {
        None
    }
}

impl fmt::Display for RegionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.description)?;
        if !self.inputs.is_empty() {
            writeln!(f, "  inputs:")?;
            for (name, input) in &self.inputs {
                writeln!(
                    f,
                    "    {} ({}, count={}{}{})",
                    name,
                    input.data_type,
                    input.count,
                    if input.required { ", required" } else { "" },
                    if input.is_default { ", default" } else { "" },
                )?;
            }
        }
        if !self.outputs.is_empty() {
            writeln!(f, "  outputs:")?;
            for (name, output) in &self.outputs {
                writeln!(
                    f,
                    "    {} ({}, count={}{})",
                    name,
                    output.data_type,
                    output.count,
                    if output.is_default { ", default" } else { "" },
                )?;
            }
        }
        if !self.parameters.is_empty() {
            writeln!(f, "  parameters:")?;
            for (name, parameter) in &self.parameters {
                write!(f, "    {} ({}, {}", name, parameter.data_type, parameter.access)?;
                if let Some(default) = &parameter.default_value {
                    write!(f, ", default={}", default)?;
                }
                writeln!(f, ")")?;
            }
        }
        if !self.commands.is_empty() {
            writeln!(f, "  commands:")?;
            for (name, command) in &self.commands {
                writeln!(f, "    {}: {}", name, command.description)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port_resolution() {
        struct TestCase {
            name: &'static str,
            spec: RegionSpec,
            expected_input: Option<&'static str>,
        }

        let test_cases = vec![
            TestCase {
                name: "no inputs",
                spec: RegionSpec::new("empty"),
                expected_input: None,
            },
            TestCase {
                name: "single input is the default",
                spec: RegionSpec::new("one").with_input("in", InputSpec::new(ElementType::Real32)),
                expected_input: Some("in"),
            },
            TestCase {
                name: "flagged input wins",
                spec: RegionSpec::new("two")
                    .with_input("a", InputSpec::new(ElementType::Real32))
                    .with_input("b", InputSpec::new(ElementType::Real32).default_port()),
                expected_input: Some("b"),
            },
            TestCase {
                name: "ambiguous without flag",
                spec: RegionSpec::new("two")
                    .with_input("a", InputSpec::new(ElementType::Real32))
                    .with_input("b", InputSpec::new(ElementType::Real32)),
                expected_input: None,
            },
        ];

        for test_case in test_cases {
            assert_eq!(
                test_case.spec.default_input_name(),
                test_case.expected_input,
                "Test case '{}'",
                test_case.name
            );
        }
    }

    #[test]
    fn test_parameter_spec_counts() {
        assert_eq!(ParameterSpec::new(ParameterType::UInt32).count, 1);
        assert_eq!(ParameterSpec::new(ParameterType::String).count, 0);
        assert_eq!(
            ParameterSpec::new(ParameterType::Array(ElementType::Real32)).count,
            0
        );
    }

    #[test]
    fn test_display_lists_ports() {
        let spec = RegionSpec::new("Sums its input")
            .with_input("in", InputSpec::new(ElementType::Int32).required())
            .with_output("sum", OutputSpec::new(ElementType::Int32).with_count(1));
        let text = spec.to_string();
        assert!(text.contains("in (Int32, count=0, required)"));
        assert!(text.contains("sum (Int32, count=1)"));
    }
}
