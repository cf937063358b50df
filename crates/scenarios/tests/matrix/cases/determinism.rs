//! Same environment and registry, same output.

use std::collections::HashSet;

use faultline_cluster::SeededChooser;
use faultline_scenarios::{ExploratoryGenerator, RegressionCatalog, RegressionGenerator, WorkloadRegistry};

use crate::helpers::env::FakeEnvironment;
use crate::helpers::names;

fn environments() -> Vec<FakeEnvironment> {
    vec![
        FakeEnvironment::bare().with_version("3.4.27"),
        FakeEnvironment::full("3.5.15"),
        FakeEnvironment::bare().with_lazyfs().with_version("3.5.13"),
    ]
}

#[test]
fn exploratory_output_is_repeatable() {
    let registry = WorkloadRegistry::robustness();
    let generator = ExploratoryGenerator::new(&registry);
    for env in environments() {
        let first = generator.generate_from(&env).unwrap();
        let second = generator.generate_from(&env).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn regression_output_is_repeatable() {
    let catalog = RegressionCatalog::etcd();
    for env in environments() {
        let first = RegressionGenerator::new(&catalog).generate(&env).unwrap();
        let second = RegressionGenerator::new(&catalog).generate(&env).unwrap();
        assert_eq!(names(&first), names(&second));
        assert_eq!(first, second);
    }
}

#[test]
fn names_are_unique_per_call() {
    let registry = WorkloadRegistry::robustness();
    let catalog = RegressionCatalog::etcd();
    for env in environments() {
        let exploratory = ExploratoryGenerator::new(&registry).generate_from(&env).unwrap();
        let regression = RegressionGenerator::new(&catalog).generate(&env).unwrap();
        for list in [exploratory, regression] {
            let unique: HashSet<_> = list.iter().map(|s| s.name()).collect();
            assert_eq!(unique.len(), list.len());
        }
    }
}

#[test]
fn seeded_resolution_is_repeatable_across_generations() {
    let registry = WorkloadRegistry::robustness();
    let env = FakeEnvironment::full("3.5.15");
    let first = ExploratoryGenerator::new(&registry).generate_from(&env).unwrap();
    let second = ExploratoryGenerator::new(&registry).generate_from(&env).unwrap();
    for (a, b) in first.iter().zip(&second) {
        for seed in [0, 1, 99] {
            let ra = a.cluster().resolve(&mut SeededChooser::new(seed)).unwrap();
            let rb = b.cluster().resolve(&mut SeededChooser::new(seed)).unwrap();
            assert_eq!(ra, rb, "{} seed {seed}", a.name());
        }
    }
}
