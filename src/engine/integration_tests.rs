// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Integration tests for the network using the built-in regions
#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use crate::backends::stub::{FailingRegion, StubRegion};
    use crate::engine::{LinkOptions, Network};
    use crate::errors::{BufferError, ErrorKind, NetworkError};
    use crate::registry::RegionRegistry;

    fn network() -> Network {
        Network::new(Arc::new(RegionRegistry::with_builtins()))
    }

    /// What a recorder saw at its last compute.
    fn recorded(network: &Network, region: &str) -> Vec<f32> {
        network
            .region(region)
            .unwrap()
            .get_parameter_array("last_input")
            .unwrap()
            .to_vec::<f32>()
    }

    #[test]
    fn test_counter_into_recorder_deterministic_sizes() {
        let mut network = network();
        network.add_region("counter", "counter", "{dim: 4}").unwrap();
        network.add_region("sink", "recorder", "").unwrap();
        network.link("counter", "sink", LinkOptions::new()).unwrap();

        network.run(3).unwrap();

        assert_eq!(recorded(&network, "sink"), vec![3.0; 4]);
        assert_eq!(network.iteration(), 3);
        let counter = network.region("counter").unwrap();
        assert_eq!(counter.output("out").unwrap().len(), 4);
    }

    #[test]
    fn test_fan_in_offsets_and_width() {
        let mut network = network();
        network.add_region("a", "counter", "{dim: 3}").unwrap();
        network
            .add_region("b", "counter", "{dim: 2, increment: 10}")
            .unwrap();
        network
            .add_region("c", "counter", "{dim: 1, increment: 100}")
            .unwrap();
        network.add_region("sink", "recorder", "").unwrap();
        for src in ["a", "b", "c"] {
            network.link(src, "sink", LinkOptions::new()).unwrap();
        }

        network.run(1).unwrap();

        let sink = network.region("sink").unwrap();
        let input = sink.input("in").unwrap();
        assert_eq!(input.len(), 6);
        let offsets: Vec<usize> = input.links().iter().map(|link| link.offset()).collect();
        assert_eq!(offsets, vec![0, 3, 5]);
        assert!(input.links().iter().all(|link| !link.is_zero_copy()));
        assert_eq!(
            recorded(&network, "sink"),
            vec![1.0, 1.0, 1.0, 10.0, 10.0, 100.0]
        );
    }

    #[test]
    fn test_delay_sees_values_from_earlier_iterations() {
        let mut network = network();
        network.add_region("counter", "counter", "{dim: 2}").unwrap();
        network.add_region("sink", "recorder", "").unwrap();
        network
            .link("counter", "sink", LinkOptions::new().delay(2))
            .unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        network
            .add_callback("record", move |network: &Network, _iteration| {
                log.borrow_mut().push(recorded(network, "sink")[0]);
            })
            .unwrap();

        network.run(5).unwrap();

        assert_eq!(*seen.borrow(), vec![0.0, 0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_delays_shift_together_after_all_regions_compute() {
        // The recorder runs before the counter, so with delay 1 it still sees
        // the previous iteration's counter output.
        let mut network = network();
        network.add_region("sink", "recorder", "").unwrap();
        network.add_region("counter", "counter", "{dim: 1}").unwrap();
        network
            .link("counter", "sink", LinkOptions::new().delay(1))
            .unwrap();

        network.run(3).unwrap();
        assert_eq!(recorded(&network, "sink"), vec![2.0]);
    }

    #[test]
    fn test_zero_copy_matches_copy_path() {
        fn run(zero_copy: bool) -> (Vec<f32>, bool) {
            let mut network = network();
            network.set_zero_copy(zero_copy);
            network.add_region("counter", "counter", "{dim: 3}").unwrap();
            network.add_region("sink", "recorder", "").unwrap();
            network.link("counter", "sink", LinkOptions::new()).unwrap();
            network.run(4).unwrap();

            let aliased = network
                .region("sink")
                .unwrap()
                .input_data("in")
                .unwrap()
                .shares_storage_with(&network.region("counter").unwrap().output_data("out").unwrap());
            (recorded(&network, "sink"), aliased)
        }

        let (shared, aliased) = run(true);
        let (copied, not_aliased) = run(false);
        assert_eq!(shared, copied);
        assert!(aliased);
        assert!(!not_aliased);
    }

    #[test]
    fn test_toggling_zero_copy_reinitializes_inputs() {
        let mut network = network();
        network.add_region("counter", "counter", "{dim: 2}").unwrap();
        network.add_region("sink", "recorder", "").unwrap();
        network.link("counter", "sink", LinkOptions::new()).unwrap();
        network.run(1).unwrap();
        assert!(network.links().next().unwrap().is_zero_copy());

        network.set_zero_copy(false);
        assert!(!network.is_initialized());
        network.run(1).unwrap();
        assert!(!network.links().next().unwrap().is_zero_copy());
        assert_eq!(recorded(&network, "sink"), vec![2.0, 2.0]);
    }

    #[test]
    fn test_type_conversion_on_copy() {
        let mut network = network();
        network
            .add_region("source", "vector_source", "{dim: 4, values: [1.9, -2.5, 3, 4]}")
            .unwrap();
        network.add_region("sum", "sum", "").unwrap();
        network.link("source", "sum", LinkOptions::new()).unwrap();

        network.run(1).unwrap();

        let sum = network.region("sum").unwrap();
        assert!(!network.links().next().unwrap().is_zero_copy());
        assert_eq!(sum.input_data("in").unwrap().to_vec::<i32>(), vec![1, -2, 3, 4]);
        assert_eq!(sum.output_data("sum").unwrap().to_vec::<i32>(), vec![6]);
    }

    #[test]
    fn test_required_input_must_be_linked() {
        let mut network = network();
        network.add_region("sink", "recorder", "").unwrap();
        let err = network.initialize().unwrap_err();
        assert!(matches!(err, NetworkError::MissingRequiredInput { .. }));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_capacity_error_on_oversized_copy() {
        let source = crate::buffer::Buffer::from_vec(vec![1.0_f32, 2.0, 3.0]);
        let dest = crate::buffer::Buffer::zeroed(crate::buffer::ElementType::Int32, 4);
        let err: NetworkError = source.copy_into(&dest, 2).unwrap_err().into();
        assert!(matches!(err, NetworkError::Buffer(BufferError::CapacityExceeded { .. })));
        assert_eq!(err.kind(), ErrorKind::Capacity);
    }

    #[test]
    fn test_remove_region_guards_outgoing_links() {
        let mut network = network();
        network.add_region("counter", "counter", "{dim: 2}").unwrap();
        network.add_region("sink", "recorder", "").unwrap();
        network.link("counter", "sink", LinkOptions::new()).unwrap();

        let err = network.remove_region("counter").unwrap_err();
        match err {
            NetworkError::OutgoingLinks { region, links } => {
                assert_eq!(region, "counter");
                assert_eq!(links, vec!["counter.out-->sink.in".to_string()]);
            }
            other => panic!("unexpected error {:?}", other),
        }

        network.remove_region("sink").unwrap();
        assert!(!network.region("counter").unwrap().output("out").unwrap().has_links());
        network.remove_region("counter").unwrap();
        assert_eq!(network.regions().count(), 0);
        assert_eq!(network.phase_count(), 0);
    }

    #[test]
    fn test_remove_link() {
        let mut network = network();
        network.add_region("counter", "counter", "{dim: 2}").unwrap();
        network.add_region("sink", "recorder", "").unwrap();
        network.link("counter", "sink", LinkOptions::new()).unwrap();
        assert!(matches!(
            network.link("counter", "sink", LinkOptions::new()),
            Err(NetworkError::DuplicateLink(_))
        ));

        network.remove_link("counter", "sink", "", "").unwrap();
        assert_eq!(network.links().count(), 0);
        assert!(matches!(
            network.remove_link("counter", "sink", "out", "in"),
            Err(NetworkError::UnknownLink(_))
        ));
        network.remove_region("counter").unwrap();
    }

    #[test]
    fn test_phase_growth_limit() {
        let mut network = network();
        network.add_region("a", "counter", "").unwrap();
        network.add_region("b", "counter", "").unwrap();
        assert_eq!(network.phase_count(), 2);

        network.set_phases("b", [11]).unwrap();
        assert_eq!(network.phase_count(), 12);
        assert!(matches!(
            network.set_phases("a", [22]),
            Err(NetworkError::PhaseTooLarge { phase: 22, phase_count: 12, .. })
        ));
        network.set_phases("a", [21]).unwrap();
        assert!(matches!(
            network.set_phases("a", Vec::<u32>::new()),
            Err(NetworkError::EmptyPhaseSet(_))
        ));
    }

    #[test]
    fn test_phase_table_keeps_insertion_order_within_phase() {
        let mut network = network();
        network.add_region("first", "counter", "").unwrap();
        network.add_region("second", "counter", "").unwrap();
        network.add_region("third", "counter", "").unwrap();
        network.set_phases("third", [0]).unwrap();
        network.set_phases("first", [0, 1]).unwrap();

        assert_eq!(network.regions_in_phase(0).unwrap(), vec!["first", "third"]);
        assert_eq!(network.regions_in_phase(1).unwrap(), vec!["first", "second"]);
        assert_eq!(network.regions_in_phase(2).unwrap(), Vec::<&str>::new());
        assert!(network.regions_in_phase(3).is_err());
    }

    #[test]
    fn test_region_in_two_phases_computes_twice() {
        let mut network = network();
        network.add_region("counter", "counter", "{dim: 1}").unwrap();
        network.add_region("sink", "recorder", "").unwrap();
        network.link("counter", "sink", LinkOptions::new()).unwrap();
        network.set_phases("counter", [0, 2]).unwrap();

        network.run(2).unwrap();
        assert_eq!(recorded(&network, "sink"), vec![3.0]);
        assert_eq!(
            network
                .region("counter")
                .unwrap()
                .output_data("out")
                .unwrap()
                .to_vec::<f32>(),
            vec![4.0]
        );
    }

    #[test]
    fn test_enabled_phase_range() {
        let mut network = network();
        network.add_region("counter", "counter", "{dim: 1}").unwrap();
        network.add_region("sink", "recorder", "").unwrap();
        network.link("counter", "sink", LinkOptions::new()).unwrap();
        network.initialize().unwrap();

        assert_eq!(network.min_enabled_phase(), 0);
        assert_eq!(network.max_enabled_phase(), 1);
        assert!(matches!(
            network.set_max_enabled_phase(2),
            Err(NetworkError::PhaseOutOfRange { .. })
        ));

        network.set_max_enabled_phase(0).unwrap();
        network.run(2).unwrap();
        assert_eq!(
            network.region("sink").unwrap().get_parameter_uint64("compute_count").unwrap(),
            0
        );

        assert!(matches!(
            network.set_min_enabled_phase(1),
            Err(NetworkError::InvertedPhaseRange { .. })
        ));
        network.set_max_enabled_phase(1).unwrap();
        network.set_min_enabled_phase(1).unwrap();
        network.run(1).unwrap();
        assert_eq!(recorded(&network, "sink"), vec![2.0]);
    }

    #[test]
    fn test_callbacks_run_once_per_iteration() {
        let mut network = network();
        network.add_region("counter", "counter", "").unwrap();

        let iterations = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&iterations);
        network
            .add_callback("progress", move |_network: &Network, iteration| {
                log.borrow_mut().push(iteration);
            })
            .unwrap();
        assert!(matches!(
            network.add_callback("progress", |_: &Network, _| {}),
            Err(NetworkError::DuplicateCallback(_))
        ));

        network.run(3).unwrap();
        network.remove_callback("progress").unwrap();
        network.run(1).unwrap();

        assert_eq!(*iterations.borrow(), vec![1, 2, 3]);
        assert!(network.remove_callback("progress").is_err());
    }

    #[test]
    fn test_profiling_across_network() {
        let mut network = network();
        network.add_region("counter", "counter", "").unwrap();
        network.enable_profiling();
        network.run(3).unwrap();
        assert_eq!(network.region("counter").unwrap().profile().compute_count, 3);

        network.disable_profiling();
        network.run(1).unwrap();
        assert_eq!(network.region("counter").unwrap().profile().compute_count, 3);

        network.reset_profiling();
        assert_eq!(network.region("counter").unwrap().profile().compute_count, 0);
    }

    #[test]
    fn test_failing_region_aborts_run() {
        let registry = RegionRegistry::with_builtins();
        registry.register_type::<FailingRegion>("failing");
        registry.register_type::<StubRegion>("stub");
        let mut network = Network::new(Arc::new(registry));
        network.add_region("bad", "failing", "").unwrap();
        network.add_region("after", "stub", "").unwrap();
        network.link("bad", "after", LinkOptions::new()).unwrap();

        let err = network.run(2).unwrap_err();
        assert!(matches!(
            &err,
            NetworkError::ComputeFailed { region, .. } if region == "bad"
        ));
        assert_eq!(err.kind(), ErrorKind::Region);
        assert_eq!(network.iteration(), 1);
    }

    #[test]
    fn test_bundle_round_trip_resumes_identically() {
        fn build() -> Network {
            let mut network = network();
            network.add_region("counter", "counter", "{dim: 2}").unwrap();
            network.add_region("live", "recorder", "").unwrap();
            network.add_region("delayed", "recorder", "").unwrap();
            network.link("counter", "live", LinkOptions::new()).unwrap();
            network
                .link("counter", "delayed", LinkOptions::new().delay(2))
                .unwrap();
            network.set_phases("delayed", [1, 3]).unwrap();
            network
        }

        fn layout(network: &Network) -> Vec<(String, String, Vec<u32>)> {
            network
                .regions()
                .map(|region| {
                    (
                        region.name().to_string(),
                        region.region_type().to_string(),
                        region.phases().iter().copied().collect(),
                    )
                })
                .collect()
        }

        let mut original = build();
        original.run(3).unwrap();

        let dir = TempDir::new().unwrap();
        original.save(dir.path()).unwrap();
        let mut loaded =
            Network::load(dir.path(), Arc::new(RegionRegistry::with_builtins())).unwrap();

        assert_eq!(loaded.iteration(), 3);
        assert_eq!(layout(&loaded), layout(&original));
        assert_eq!(
            layout(&loaded),
            vec![
                ("counter".to_string(), "counter".to_string(), vec![0]),
                ("live".to_string(), "recorder".to_string(), vec![1]),
                ("delayed".to_string(), "recorder".to_string(), vec![1, 3]),
            ]
        );
        assert_eq!(loaded.phase_count(), original.phase_count());
        let saved: Vec<_> = original.links().map(|link| link.key().clone()).collect();
        let restored: Vec<_> = loaded.links().map(|link| link.key().clone()).collect();
        assert_eq!(saved, restored);
        let delayed = loaded
            .links()
            .find(|link| link.delay() == 2)
            .map(|link| link.queued())
            .unwrap();
        assert_eq!(delayed, 2);

        original.run(2).unwrap();
        loaded.run(2).unwrap();

        for region in ["live", "delayed"] {
            assert_eq!(recorded(&loaded, region), recorded(&original, region));
        }
        assert_eq!(recorded(&loaded, "delayed"), vec![3.0, 3.0]);
        assert_eq!(recorded(&loaded, "live"), vec![5.0, 5.0]);
        assert_eq!(loaded.iteration(), original.iteration());
    }

    #[test]
    fn test_default_network_uses_builtins() {
        let mut network = Network::default();
        assert!(network.registry().is_registered("counter"));
        network.add_region("counter", "counter", "").unwrap();
        assert!(matches!(
            network.add_region("counter", "counter", ""),
            Err(NetworkError::DuplicateRegion(_))
        ));
        assert!(matches!(
            network.add_region("x", "missing", ""),
            Err(NetworkError::UnknownRegionType(_))
        ));
    }
}
