//! Fake environment with fixed probe answers.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use faultline_core::config::BinariesConfig;
use faultline_core::environment::{
    BinaryIntrospector, Capability, CapabilityProbe, Environment, FileSystem, Tunable,
};
use faultline_core::error::EnvironmentError;

/// Environment returning configured answers without touching the host.
#[derive(Debug, Default, Clone)]
pub struct FakeEnvironment {
    binaries: BinariesConfig,
    version: Option<semver::Version>,
    lazyfs: bool,
    files: HashSet<PathBuf>,
}

#[allow(dead_code)]
impl FakeEnvironment {
    /// Nothing installed: no LazyFS, no previous release, no version.
    pub fn bare() -> Self {
        Self::default()
    }

    /// Every capability available, installed version as given.
    pub fn full(version: &str) -> Self {
        Self::bare()
            .with_version(version)
            .with_lazyfs()
            .with_last_release()
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(semver::Version::parse(version).expect("valid test version"));
        self
    }

    pub fn with_lazyfs(mut self) -> Self {
        self.lazyfs = true;
        self
    }

    pub fn with_last_release(mut self) -> Self {
        self.files.insert(self.binaries.etcd_last_release.clone());
        self
    }
}

impl FileSystem for FakeEnvironment {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains(path)
    }
}

impl BinaryIntrospector for FakeEnvironment {
    fn installed_version(&self, binary: &Path) -> Result<semver::Version, EnvironmentError> {
        self.version
            .clone()
            .ok_or_else(|| EnvironmentError::VersionParse {
                binary: binary.display().to_string(),
                output: String::new(),
                reason: "fake: empty output".to_owned(),
            })
    }
}

impl CapabilityProbe for FakeEnvironment {
    fn supports_lazyfs(&self) -> Capability {
        Capability::from_bool(self.lazyfs, || "fake: lazyfs missing".to_owned())
    }

    fn supports_tunable(&self, tunable: Tunable) -> Capability {
        match self.installed_version(&self.binaries.etcd) {
            Ok(v) => Capability::from_bool(tunable.is_supported_by(&v), || format!("fake: {v}")),
            Err(e) => Capability::unavailable(e.to_string()),
        }
    }
}

impl Environment for FakeEnvironment {
    fn binaries(&self) -> &BinariesConfig {
        &self.binaries
    }
}
