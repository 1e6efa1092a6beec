// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::registry::RegionRegistry;

use super::regions::*;

/// Registers the in-process region types
pub struct LocalRegionFactory;

impl LocalRegionFactory {
    /// Register every built-in type on `registry`
    ///
    /// - "counter" -> CounterRegion
    /// - "vector_source" -> VectorSourceRegion
    /// - "recorder" -> RecorderRegion
    /// - "sum" -> SumRegion
    pub fn register_builtins(registry: &RegionRegistry) {
        registry.register_type::<CounterRegion>("counter");
        registry.register_type::<VectorSourceRegion>("vector_source");
        registry.register_type::<RecorderRegion>("recorder");
        registry.register_type::<SumRegion>("sum");
    }

    /// List all built-in region types
    pub fn list_available_types() -> Vec<&'static str> {
        vec!["counter", "vector_source", "recorder", "sum"]
    }

    /// Check if a built-in type exists
    pub fn is_type_available(region_type: &str) -> bool {
        Self::list_available_types().contains(&region_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{LinkOptions, Network};
    use crate::params::ParameterValue;
    use std::sync::Arc;

    fn network() -> Network {
        Network::new(Arc::new(RegionRegistry::with_builtins()))
    }

    #[test]
    fn test_every_listed_type_is_registered() {
        let registry = RegionRegistry::new();
        LocalRegionFactory::register_builtins(&registry);

        for region_type in LocalRegionFactory::list_available_types() {
            assert!(
                registry.is_registered(region_type),
                "Type '{}' should be registered",
                region_type
            );
            assert!(registry.spec(region_type).is_ok());
        }
        assert!(!LocalRegionFactory::is_type_available("missing"));
    }

    #[test]
    fn test_vector_source_feeds_sum() {
        let mut network = network();
        network
            .add_region("source", "vector_source", "{dim: 3, values: [1, 2, 3]}")
            .unwrap();
        network.add_region("sum", "sum", "").unwrap();
        network.link("source", "sum", LinkOptions::new()).unwrap();

        network.run(1).unwrap();

        let total = network.region("sum").unwrap().output_data("sum").unwrap();
        assert_eq!(total.to_vec::<i32>(), vec![6]);
    }

    #[test]
    fn test_vector_source_values_through_text_path() {
        let mut network = network();
        network
            .add_region("source", "vector_source", "{dim: 4}")
            .unwrap();
        network.add_region("sink", "recorder", "").unwrap();
        network.link("source", "sink", LinkOptions::new()).unwrap();

        let source = network.region_mut("source").unwrap();
        source
            .set_parameter_array("values", crate::buffer::ArrayData::from_vec(vec![0.5_f32, 1.5]))
            .unwrap();
        assert_eq!(
            source.get_parameter_array("values").unwrap().to_vec::<f32>(),
            vec![0.5, 1.5]
        );
        assert_eq!(source.get_parameter_uint32("dim").unwrap(), 4);

        network.run(1).unwrap();

        let sink = network.region("sink").unwrap();
        assert_eq!(
            sink.get_parameter("last_input").unwrap(),
            ParameterValue::Array(crate::buffer::ArrayData::from_vec(vec![0.5_f32, 1.5, 0.0, 0.0]))
        );
        assert_eq!(sink.get_parameter_uint64("compute_count").unwrap(), 1);
    }

    #[test]
    fn test_commands() {
        let mut network = network();
        network.add_region("counter", "counter", "{dim: 2}").unwrap();
        network.add_region("sink", "recorder", "").unwrap();
        network.link("counter", "sink", LinkOptions::new()).unwrap();
        network.run(2).unwrap();

        let counter = network.region_mut("counter").unwrap();
        counter.execute_command(&["reset".to_string()]).unwrap();
        assert_eq!(
            counter.output_data("out").unwrap().to_vec::<f32>(),
            vec![0.0, 0.0]
        );

        let sink = network.region_mut("sink").unwrap();
        let reply = sink.execute_command(&["clear".to_string()]).unwrap();
        assert_eq!(reply, "cleared 2 recordings");
        assert_eq!(sink.get_parameter_uint64("compute_count").unwrap(), 0);
    }

    #[test]
    fn test_read_only_parameters_reject_writes() {
        let mut network = network();
        network.add_region("sink", "recorder", "").unwrap();
        let sink = network.region_mut("sink").unwrap();
        assert!(sink.set_parameter_uint64("compute_count", 3).is_err());

        assert!(network
            .add_region("other", "recorder", "{compute_count: 3}")
            .is_err());
    }
}
