//! Exploratory matrix shape against different environments.

use faultline_cluster::{ClusterVersion, FirstGroupChooser, RandomizableAxis};
use faultline_scenarios::exploratory::{VERSION_MIX_AXIS, version_mix_axis};
use faultline_scenarios::naming::{CLUSTER_OF_SIZE_1, CLUSTER_OF_SIZE_3, COMPACT, LAZYFS};
use faultline_scenarios::{ExploratoryGenerator, WorkloadRegistry};

use crate::helpers::env::FakeEnvironment;
use crate::helpers::registry::two_entries;
use crate::helpers::{any_segment, names};

#[test]
fn bare_environment_two_entries_yields_four_scenarios() {
    let registry = two_entries();
    let scenarios = ExploratoryGenerator::new(&registry)
        .generate_from(&FakeEnvironment::bare())
        .unwrap();

    assert_eq!(
        names(&scenarios),
        vec![
            "W1/LowTraffic/ClusterOfSize1",
            "W2/HighTraffic/ClusterOfSize1",
            "W1/LowTraffic/ClusterOfSize3",
            "W2/HighTraffic/ClusterOfSize3",
        ]
    );
    assert!(!any_segment(&scenarios, LAZYFS));
    assert!(!any_segment(&scenarios, COMPACT));
    assert!(
        scenarios
            .iter()
            .all(|s| !s.cluster().contains_axis(VERSION_MIX_AXIS))
    );
}

#[test]
fn every_entry_has_single_and_three_member_scenario() {
    let registry = WorkloadRegistry::robustness();
    for env in [
        FakeEnvironment::bare(),
        FakeEnvironment::full("3.5.15"),
        FakeEnvironment::bare().with_lazyfs(),
    ] {
        let scenarios = ExploratoryGenerator::new(&registry).generate_from(&env).unwrap();
        for entry in registry.entries() {
            let prefix = format!("{entry}/");
            let of_entry: Vec<_> = scenarios
                .iter()
                .filter(|s| s.name().starts_with(&prefix))
                .collect();
            assert!(
                of_entry
                    .iter()
                    .any(|s| s.segments().any(|seg| seg == CLUSTER_OF_SIZE_1)),
                "{entry} has no single-member scenario"
            );
            assert_eq!(
                of_entry
                    .iter()
                    .filter(|s| s.name().ends_with(CLUSTER_OF_SIZE_3))
                    .count(),
                1,
                "{entry} should have exactly one three-member scenario"
            );
        }
    }
}

#[test]
fn lazyfs_variant_requires_probe_and_low_qps() {
    let registry = WorkloadRegistry::robustness();
    let scenarios = ExploratoryGenerator::new(&registry)
        .generate_from(&FakeEnvironment::bare().with_lazyfs())
        .unwrap();

    for scenario in &scenarios {
        let is_lazyfs = scenario.segments().any(|seg| seg == LAZYFS);
        let low_qps = scenario.profile().minimal_qps <= 100;
        if is_lazyfs {
            assert!(low_qps, "{} should not have a LazyFS variant", scenario.name());
        }
    }
    let lazyfs_count = scenarios
        .iter()
        .filter(|s| s.segments().any(|seg| seg == LAZYFS))
        .count();
    let low_entries = registry
        .entries()
        .iter()
        .filter(|e| e.profile.minimal_qps <= 100)
        .count();
    assert_eq!(lazyfs_count, low_entries);
}

#[test]
fn lazyfs_and_compact_come_in_pairs() {
    let registry = WorkloadRegistry::robustness();
    let scenarios = ExploratoryGenerator::new(&registry)
        .generate_from(&FakeEnvironment::full("3.5.15"))
        .unwrap();
    let names = names(&scenarios);
    for name in names.iter().filter(|n| n.ends_with(LAZYFS)) {
        let sibling = format!("{}{COMPACT}", name.trim_end_matches(LAZYFS));
        let lazy_pos = names.iter().position(|n| n == name).unwrap();
        let compact_pos = names.iter().position(|n| *n == sibling).unwrap();
        assert_eq!(compact_pos, lazy_pos + 1, "{sibling} should follow {name}");
    }
}

#[test]
fn version_mix_only_with_previous_release_binary() {
    let registry = WorkloadRegistry::robustness();
    let with = ExploratoryGenerator::new(&registry)
        .generate_from(&FakeEnvironment::bare().with_last_release())
        .unwrap();
    let without = ExploratoryGenerator::new(&registry)
        .generate_from(&FakeEnvironment::bare())
        .unwrap();

    for s in with.iter().filter(|s| s.name().ends_with(CLUSTER_OF_SIZE_3)) {
        assert!(s.cluster().contains_axis(VERSION_MIX_AXIS));
    }
    assert!(without.iter().all(|s| !s.cluster().contains_axis(VERSION_MIX_AXIS)));
}

#[test]
fn version_mix_resolution_yields_valid_descriptors() {
    let registry = WorkloadRegistry::robustness();
    let scenarios = ExploratoryGenerator::new(&registry)
        .generate_from(&FakeEnvironment::full("3.6.0"))
        .unwrap();
    let three = scenarios
        .iter()
        .find(|s| s.name().ends_with(CLUSTER_OF_SIZE_3))
        .unwrap();

    let axis = version_mix_axis();
    for (index, group) in axis.groups().iter().enumerate() {
        // first group everywhere except the version mix
        let mut chooser = |a: &RandomizableAxis| if a.name() == VERSION_MIX_AXIS { index } else { 0 };
        let resolution = three.cluster().resolve(&mut chooser).unwrap();
        resolution.descriptor.validate().unwrap();
        assert_eq!(resolution.choice(VERSION_MIX_AXIS), Some(group.name()));
        if group.name() == "all-current" {
            assert_eq!(resolution.descriptor.version, ClusterVersion::Current);
            assert_eq!(resolution.descriptor.initial_leader_index, None);
        } else {
            assert!(resolution.descriptor.version.is_mixed());
            assert!(resolution.descriptor.initial_leader_index.is_some());
        }
    }
}

#[test]
fn single_member_plans_resolve_to_single_member() {
    let registry = WorkloadRegistry::robustness();
    let scenarios = ExploratoryGenerator::new(&registry)
        .generate_from(&FakeEnvironment::full("3.5.15"))
        .unwrap();
    for s in scenarios
        .iter()
        .filter(|s| s.segments().any(|seg| seg == CLUSTER_OF_SIZE_1))
    {
        let d = s.cluster().resolve(&mut FirstGroupChooser).unwrap().descriptor;
        assert_eq!(d.cluster_size, 1, "{}", s.name());
        assert!(d.go_fail_enabled);
        assert_eq!(d.snapshot_catchup_entries, Some(100));
        d.validate().unwrap();
    }
}
