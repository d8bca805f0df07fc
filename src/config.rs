//! Configuration for a license scan

use crate::error::{Result, ScanError};
use crate::types::{LicenseEntry, LicenseSummary};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for the scan process
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Root of the installed package tree (the directory holding `package.json`)
    pub path: PathBuf,
    /// Entries treated as already resolved; they are never recomputed
    pub overrides: LicenseSummary,
    /// Drop entries whose license is on the permissive allow-list
    pub omit_permissive: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            overrides: LicenseSummary::new(),
            omit_permissive: false,
        }
    }
}

impl ScanConfig {
    /// Create a new builder for ScanConfig
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
        let config: ScanConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Add overrides from a JSON summary file, e.g. the output of a previous scan
    pub fn load_overrides(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
        let overrides: LicenseSummary = serde_json::from_str(&content)?;
        self.overrides.extend(overrides);
        Ok(())
    }

    /// Check the configuration before a scan
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(ScanError::config("scan path must not be empty"));
        }
        if let Some(id) = self.overrides.keys().find(|id| !is_package_id(id)) {
            return Err(ScanError::config(format!(
                "override key '{}' is not of the form name@version",
                id
            )));
        }
        Ok(())
    }
}

/// `name@version`, where a scoped name may itself start with `@`
fn is_package_id(id: &str) -> bool {
    id.get(1..)
        .and_then(|rest| rest.rfind('@'))
        .is_some()
}

/// Builder for ScanConfig
#[derive(Default)]
pub struct ScanConfigBuilder {
    path: Option<PathBuf>,
    overrides: LicenseSummary,
    omit_permissive: bool,
}

impl ScanConfigBuilder {
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn overrides(mut self, overrides: LicenseSummary) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn override_license(mut self, id: impl Into<String>, entry: LicenseEntry) -> Self {
        self.overrides.insert(id.into(), entry);
        self
    }

    pub fn omit_permissive(mut self, omit: bool) -> Self {
        self.omit_permissive = omit;
        self
    }

    pub fn build(self) -> ScanConfig {
        ScanConfig {
            path: self.path.unwrap_or_else(|| PathBuf::from(".")),
            overrides: self.overrides,
            omit_permissive: self.omit_permissive,
        }
    }
}
