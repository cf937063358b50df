//! Regression list gating on the installed binary.

use faultline_scenarios::{GenerationError, RegressionCatalog, RegressionGenerator};

use crate::helpers::env::FakeEnvironment;
use crate::helpers::names;

#[test]
fn gated_case_present_from_3_5_0() {
    let catalog = RegressionCatalog::etcd();
    for (version, expected) in [
        ("3.4.30", false),
        ("3.5.0", true),
        ("3.5.0-alpha.0", false),
        ("3.5.1-rc.0", true),
        ("3.6.1", true),
    ] {
        let scenarios = RegressionGenerator::new(&catalog)
            .generate(&FakeEnvironment::bare().with_version(version))
            .unwrap();
        assert_eq!(
            names(&scenarios).contains(&"Issue15271".to_owned()),
            expected,
            "installed {version}"
        );
    }
}

#[test]
fn ungated_cases_keep_catalog_order() {
    let catalog = RegressionCatalog::etcd();
    let scenarios = RegressionGenerator::new(&catalog)
        .generate(&FakeEnvironment::bare().with_version("3.4.0"))
        .unwrap();
    assert_eq!(
        names(&scenarios),
        vec!["Issue14370", "Issue14685", "Issue13766", "Issue15220"]
    );
}

#[test]
fn introspection_failure_returns_no_list() {
    let catalog = RegressionCatalog::etcd();
    let result = RegressionGenerator::new(&catalog).generate(&FakeEnvironment::bare());
    match result {
        Err(GenerationError::Environment(e)) => {
            assert!(e.to_string().contains("etcd"), "{e}");
        }
        other => panic!("expected environment error, got {other:?}"),
    }
}

#[test]
fn regression_list_does_not_depend_on_lazyfs() {
    let catalog = RegressionCatalog::etcd();
    let plain = RegressionGenerator::new(&catalog)
        .generate(&FakeEnvironment::bare().with_version("3.5.15"))
        .unwrap();
    let full = RegressionGenerator::new(&catalog)
        .generate(&FakeEnvironment::full("3.5.15"))
        .unwrap();
    assert_eq!(plain, full);
}

#[test]
fn catchup_entries_need_final_3_5_14() {
    let catalog = RegressionCatalog::etcd();
    for (version, expected) in [
        ("3.5.13", None),
        ("3.5.14-rc.0", None),
        ("3.5.14", Some(100)),
    ] {
        let scenarios = RegressionGenerator::new(&catalog)
            .generate(&FakeEnvironment::bare().with_version(version))
            .unwrap();
        let issue15271 = scenarios
            .iter()
            .find(|s| s.name() == "Issue15271")
            .expect("gated case present on 3.5.x");
        let descriptor = issue15271.cluster().fold().expect("regression plans have no axes");
        assert_eq!(
            descriptor.snapshot_catchup_entries, expected,
            "installed {version}"
        );
    }
}
