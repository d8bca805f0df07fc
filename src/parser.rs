//! Parser for installed `node_modules` trees
//!
//! Reads the root `package.json`, every package installed below it, and links
//! each declared dependency to the installed copy a Node.js `require` would
//! find: the nearest `node_modules` walking up from the requiring package.

use crate::error::{Result, ScanError};
use crate::types::{
    Dependency, LicenseField, NodeId, PackageNode, PackageTree, RepositoryField, INSTALL_DIR,
};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const MANIFEST_FILE: &str = "package.json";

/// Fields of `package.json` the scan cares about
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest {
    name: Option<String>,
    version: Option<String>,
    license: Option<LicenseField>,
    licenses: Option<LicenseList>,
    repository: Option<RepositoryField>,
    readme: Option<String>,
    #[serde(default)]
    dependencies: IndexMap<String, Value>,
    #[serde(default)]
    optional_dependencies: IndexMap<String, Value>,
    #[serde(default)]
    dev_dependencies: IndexMap<String, Value>,
}

/// `licenses` is normally a list, but some old manifests hold a single value
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LicenseList {
    Many(Vec<LicenseField>),
    One(LicenseField),
}

impl From<LicenseList> for Vec<LicenseField> {
    fn from(list: LicenseList) -> Self {
        match list {
            LicenseList::Many(fields) => fields,
            LicenseList::One(field) => vec![field],
        }
    }
}

/// Bookkeeping for one package while the tree is being linked
struct Pending {
    parent: Option<NodeId>,
    declared: Vec<(String, String)>,
    installed: IndexMap<String, NodeId>,
}

/// Read the installed package tree rooted at `root`
pub fn read_installed(root: &Path) -> Result<PackageTree> {
    let manifest_path = root.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        return Err(ScanError::MissingManifest(root.to_path_buf()));
    }

    let manifest = read_manifest(&manifest_path)?;
    let mut pending = vec![Pending {
        parent: None,
        declared: declared_dependencies(&manifest, true),
        installed: IndexMap::new(),
    }];
    let mut tree = PackageTree::new(into_node(manifest, root));

    let root_id = tree.root_id();
    let mut ancestors = HashSet::new();
    ancestors.insert(canonical(root));
    load_children(&mut tree, &mut pending, root_id, root, &mut ancestors)?;

    link_dependencies(&mut tree, pending);
    debug!("Read {} installed packages under {}", tree.len(), root.display());
    Ok(tree)
}

fn read_manifest(path: &Path) -> Result<PackageManifest> {
    let content = fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| ScanError::Manifest {
        path: path.to_path_buf(),
        source,
    })
}

fn into_node(manifest: PackageManifest, dir: &Path) -> PackageNode {
    let name = manifest.name.unwrap_or_else(|| {
        dir.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    PackageNode {
        name,
        version: manifest.version.unwrap_or_default(),
        license: manifest.license,
        licenses: manifest.licenses.map(Vec::from).unwrap_or_default(),
        repository: manifest.repository,
        readme: manifest.readme,
        dependencies: IndexMap::new(),
        path: dir.to_path_buf(),
    }
}

/// Declared dependency names with their version ranges, in manifest order
fn declared_dependencies(manifest: &PackageManifest, is_root: bool) -> Vec<(String, String)> {
    let mut sections = vec![&manifest.dependencies, &manifest.optional_dependencies];
    if is_root {
        sections.push(&manifest.dev_dependencies);
    }

    let mut declared: Vec<(String, String)> = Vec::new();
    for section in sections {
        for (name, range) in section {
            if declared.iter().any(|(seen, _)| seen == name) {
                continue;
            }
            let range = range
                .as_str()
                .map(String::from)
                .unwrap_or_else(|| range.to_string());
            declared.push((name.clone(), range));
        }
    }
    declared
}

/// Package directories directly inside `<dir>/node_modules`, including `@scope/*`
fn installed_dirs(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let install_dir = dir.join(INSTALL_DIR);
    if !install_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for (name, path) in sorted_subdirs(&install_dir)? {
        if name.starts_with('.') {
            continue;
        }
        if name.starts_with('@') {
            for (scoped, scoped_path) in sorted_subdirs(&path)? {
                found.push((format!("{}/{}", name, scoped), scoped_path));
            }
        } else {
            found.push((name, path));
        }
    }

    Ok(found
        .into_iter()
        .filter(|(_, path)| path.join(MANIFEST_FILE).is_file())
        .collect())
}

fn sorted_subdirs(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(dir).map_err(|e| ScanError::io(dir, e))?;
    let mut subdirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ScanError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            subdirs.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
    }
    subdirs.sort();
    Ok(subdirs)
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Load every package installed below `dir`, depth first.
///
/// `ancestors` holds the canonical directories on the current chain, so a
/// symlink pointing back up the tree is not followed forever.
fn load_children(
    tree: &mut PackageTree,
    pending: &mut Vec<Pending>,
    id: NodeId,
    dir: &Path,
    ancestors: &mut HashSet<PathBuf>,
) -> Result<()> {
    for (name, child_dir) in installed_dirs(dir)? {
        let real = canonical(&child_dir);
        if ancestors.contains(&real) {
            debug!("Skipping symlink cycle at {}", child_dir.display());
            continue;
        }

        let manifest = read_manifest(&child_dir.join(MANIFEST_FILE))?;
        let declared = declared_dependencies(&manifest, false);
        let child = tree.add(into_node(manifest, &child_dir));
        pending.push(Pending {
            parent: Some(id),
            declared,
            installed: IndexMap::new(),
        });
        pending[id.0].installed.insert(name, child);

        ancestors.insert(real.clone());
        load_children(tree, pending, child, &child_dir, ancestors)?;
        ancestors.remove(&real);
    }

    Ok(())
}

/// Nearest installed copy of `name`, searching from `from` up to the root
fn resolve(pending: &[Pending], from: NodeId, name: &str) -> Option<NodeId> {
    let mut current = Some(from);
    while let Some(id) = current {
        if let Some(found) = pending[id.0].installed.get(name) {
            return Some(*found);
        }
        current = pending[id.0].parent;
    }
    None
}

fn link_dependencies(tree: &mut PackageTree, pending: Vec<Pending>) {
    for (index, package) in pending.iter().enumerate() {
        let id = NodeId(index);

        for (name, range) in &package.declared {
            let dependency = match resolve(&pending, id, name) {
                Some(found) => Dependency::Installed(found),
                None => {
                    debug!("Unmet dependency {}@{} of package #{}", name, range, index);
                    Dependency::Unmet(range.clone())
                }
            };
            tree.link(id, name.clone(), dependency);
        }

        // Installed here but never declared: still part of the tree
        for (name, child) in &package.installed {
            if !package.declared.iter().any(|(declared, _)| declared == name) {
                tree.link(id, name.clone(), Dependency::Installed(*child));
            }
        }
    }
}
