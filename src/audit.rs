//! Main scan orchestration logic

use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use crate::license::permissive::omit_permissive_licenses;
use crate::license::{LicenseExtractor, PackageLicenseExtractor};
use crate::parser::read_installed;
use crate::repository::normalize_repository;
use crate::types::{Dependency, LicenseSummary, PackageTree, INSTALL_DIR};
use std::path::Path;
use tracing::{debug, info};

/// Scan the installed package tree at `config.path` and resolve every license
pub fn scan(config: &ScanConfig) -> Result<LicenseSummary> {
    info!("Starting license scan of: {}", config.path.display());

    let tree = read_installed(&config.path)?;
    info!("Found {} installed packages", tree.len());

    let mut summary = config.overrides.clone();
    find_licenses(
        &mut summary,
        &tree,
        &Dependency::Installed(tree.root_id()),
        &config.path,
        &PackageLicenseExtractor,
    )?;

    if config.omit_permissive {
        let before = summary.len();
        omit_permissive_licenses(&mut summary);
        debug!("Omitted {} permissive entries", before - summary.len());
    }

    info!("Scan complete: {} packages in summary", summary.len());
    Ok(summary)
}

/// Record the license of `dependency` and, recursively, of everything it
/// depends on.
///
/// Each `name@version` is resolved at most once: an identity already in
/// `summary`, whether seeded by overrides or seen earlier in the walk, stops
/// the descent. This also ends cycles. Unmet dependencies and packages
/// whose directory does not exist are skipped.
pub fn find_licenses<E: LicenseExtractor>(
    summary: &mut LicenseSummary,
    tree: &PackageTree,
    dependency: &Dependency,
    path: &Path,
    extractor: &E,
) -> Result<()> {
    let id = match dependency {
        Dependency::Installed(id) => *id,
        Dependency::Unmet(range) => {
            debug!("Skipping unmet dependency at {} ({})", path.display(), range);
            return Ok(());
        }
    };
    let package = tree.get(id).ok_or(ScanError::DanglingNode(id.0))?;
    let key = package.id();

    if !path.exists() {
        debug!("Skipping {}: {} is not installed", key, path.display());
        return Ok(());
    }

    if summary.contains_key(&key) {
        return Ok(());
    }

    let mut entry = extractor.extract(package, path)?;
    entry.repository = normalize_repository(package.repository.as_ref());
    debug!("Resolved {} as {:?}", key, entry.license);
    summary.insert(key, entry);

    for (name, child) in &package.dependencies {
        let child_path = path.join(INSTALL_DIR).join(name);
        find_licenses(summary, tree, child, &child_path, extractor)?;
    }

    Ok(())
}
