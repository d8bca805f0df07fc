//! License resolution for a single installed package.
//!
//! - [`directory`]: license files (`LICENSE`, `COPYING`, `UNLICENSE`, ...)
//! - [`classify`]: declared `license` / `licenses` manifest fields
//! - [`readme`]: inline README text and `README*` files
//! - [`text`]: exact matching against reference license bodies
//! - [`permissive`]: the permissive allow-list applied after a scan

pub mod classify;
pub mod directory;
pub mod permissive;
pub mod readme;
pub mod text;

use crate::error::Result;
use crate::types::{LicenseEntry, PackageNode};
use std::path::Path;

/// Source recorded for entries classified from the declared manifest field
pub const MANIFEST_SOURCE: &str = "package.json";

/// Resolves the license of one package. The walker calls this at most once
/// per package identity.
pub trait LicenseExtractor {
    fn extract(&self, package: &PackageNode, dir: &Path) -> Result<LicenseEntry>;
}

/// The standard strategy order; the first strategy with a result wins:
///
/// 1. license files in the package directory
/// 2. the declared `license` / `licenses` field
/// 3. inline README text from the manifest
/// 4. `README*` files in the package directory
///
/// With nothing found the entry is `UNKNOWN` with no source.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageLicenseExtractor;

impl LicenseExtractor for PackageLicenseExtractor {
    fn extract(&self, package: &PackageNode, dir: &Path) -> Result<LicenseEntry> {
        if let Some(entry) = directory::extract_from_directory(dir)? {
            return Ok(entry);
        }

        if let Some(declared) = package.declared_license() {
            return Ok(LicenseEntry::new(
                classify::classify_declared(&declared),
                MANIFEST_SOURCE,
            ));
        }

        if let Some(entry) = package.readme_text().and_then(readme::extract_from_readme) {
            return Ok(entry);
        }

        Ok(readme::extract_from_readme_files(dir)?.unwrap_or_else(LicenseEntry::unknown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LicenseField;
    use std::fs;
    use tempfile::TempDir;

    fn package(dir: &TempDir) -> PackageNode {
        PackageNode::new("pkg", "1.0.0", dir.path())
    }

    #[test]
    fn test_license_file_beats_declared_field() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("LICENSE"), "The ISC License").unwrap();
        let mut pkg = package(&dir);
        pkg.license = Some(LicenseField::Text("MIT".into()));

        let entry = PackageLicenseExtractor.extract(&pkg, dir.path()).unwrap();
        assert_eq!(entry.license.as_deref(), Some("ISC"));
        assert_eq!(entry.source.as_deref(), Some("LICENSE"));
    }

    #[test]
    fn test_declared_field_is_classified() {
        let dir = TempDir::new().unwrap();
        let mut pkg = package(&dir);
        pkg.licenses = vec![LicenseField::Typed { kind: Some("LGPL-3.0".into()) }];
        pkg.readme = Some("MIT".into());

        let entry = PackageLicenseExtractor.extract(&pkg, dir.path()).unwrap();
        assert_eq!(entry, LicenseEntry::new("LGPL", MANIFEST_SOURCE));
    }

    #[test]
    fn test_inline_readme_before_readme_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "BSD").unwrap();
        let mut pkg = package(&dir);
        pkg.readme = Some("Licensed under the Apache License".into());

        let entry = PackageLicenseExtractor.extract(&pkg, dir.path()).unwrap();
        assert_eq!(entry.license.as_deref(), Some("Apache"));
        assert_eq!(entry.source.as_deref(), Some("README"));
    }

    #[test]
    fn test_readme_file_used_when_inline_readme_has_no_signal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "BSD").unwrap();
        let mut pkg = package(&dir);
        pkg.readme = Some("no license words here".into());

        let entry = PackageLicenseExtractor.extract(&pkg, dir.path()).unwrap();
        assert_eq!(entry.license.as_deref(), Some("BSD"));
    }

    #[test]
    fn test_nothing_found_is_unknown() {
        let dir = TempDir::new().unwrap();
        let entry = PackageLicenseExtractor.extract(&package(&dir), dir.path()).unwrap();
        assert_eq!(entry, LicenseEntry::unknown());
        assert_eq!(entry.source, None);
    }
}
