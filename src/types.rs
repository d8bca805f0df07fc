//! Core data types for installed package trees and license summaries

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// License value used when no strategy produced a classification
pub const UNKNOWN_LICENSE: &str = "UNKNOWN";

/// Placeholder some published manifests carry instead of real README text
pub const MISSING_README: &str = "ERROR: No README data found!";

/// Directory holding the installed dependencies of a package
pub const INSTALL_DIR: &str = "node_modules";

/// Resolved licenses keyed by `name@version`, in traversal order
pub type LicenseSummary = IndexMap<String, LicenseEntry>;

/// License information recorded for a single package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseEntry {
    /// Canonical license identifier, `UNKNOWN`, or unset when a license file
    /// was found but could not be classified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Where the classification came from (`package.json`, a file name or `README`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Raw text the classification was made from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
    /// Normalized repository URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

impl LicenseEntry {
    /// Entry for a package whose license could not be determined
    pub fn unknown() -> Self {
        Self {
            license: Some(UNKNOWN_LICENSE.to_string()),
            ..Self::default()
        }
    }

    /// Entry classified from `source` without keeping the source text
    pub fn new(license: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            license: Some(license.into()),
            source: Some(source.into()),
            ..Self::default()
        }
    }

    /// Entry classified from `source` whose content is kept alongside
    pub fn with_text(
        license: Option<String>,
        source: impl Into<String>,
        source_text: impl Into<String>,
    ) -> Self {
        Self {
            license,
            source: Some(source.into()),
            source_text: Some(source_text.into()),
            repository: None,
        }
    }
}

/// `license` / `licenses[]` field of a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LicenseField {
    Text(String),
    Typed {
        #[serde(default, rename = "type")]
        kind: Option<String>,
    },
    /// Any other JSON shape, e.g. `["MIT"]` or `{"type": 5}`
    Other(serde_json::Value),
}

impl LicenseField {
    /// Collapse either shape to the single string handed to the classifier
    pub fn normalize(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Typed { kind } => kind.clone().unwrap_or_else(|| UNKNOWN_LICENSE.to_string()),
            Self::Other(_) => UNKNOWN_LICENSE.to_string(),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

/// `repository` field of a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepositoryField {
    Text(String),
    Typed {
        #[serde(default)]
        url: Option<String>,
    },
    /// Any other JSON shape; carries no usable repository
    Other(serde_json::Value),
}

/// Index of a package inside a [`PackageTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Edge from a package to one of its declared dependencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency {
    /// The dependency is installed and resolved to a package in the tree
    Installed(NodeId),
    /// The dependency is not installed; holds the declared version range
    Unmet(String),
}

/// A package found on disk, with its raw manifest fields
#[derive(Debug, Clone)]
pub struct PackageNode {
    pub name: String,
    pub version: String,
    pub license: Option<LicenseField>,
    pub licenses: Vec<LicenseField>,
    pub repository: Option<RepositoryField>,
    pub readme: Option<String>,
    pub dependencies: IndexMap<String, Dependency>,
    /// Directory the package was read from
    pub path: PathBuf,
}

impl PackageNode {
    /// Create a package with no license metadata and no dependencies
    pub fn new(name: impl Into<String>, version: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            license: None,
            licenses: Vec::new(),
            repository: None,
            readme: None,
            dependencies: IndexMap::new(),
            path: path.into(),
        }
    }

    /// Identity used as the summary key
    pub fn id(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }

    /// The declared license as a single string, if the manifest declares one
    pub fn declared_license(&self) -> Option<String> {
        self.license
            .as_ref()
            .filter(|field| !field.is_blank())
            .or_else(|| self.licenses.first())
            .map(LicenseField::normalize)
    }

    /// Inline README text, ignoring the missing-README placeholder
    pub fn readme_text(&self) -> Option<&str> {
        self.readme
            .as_deref()
            .filter(|readme| !readme.is_empty() && *readme != MISSING_README)
    }
}

/// Arena of installed packages; edges may be shared or cyclic
#[derive(Debug, Clone)]
pub struct PackageTree {
    nodes: Vec<PackageNode>,
}

impl PackageTree {
    /// Create a tree holding only its root package
    pub fn new(root: PackageNode) -> Self {
        Self { nodes: vec![root] }
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> &PackageNode {
        &self.nodes[0]
    }

    /// Add a package and return its id
    pub fn add(&mut self, node: PackageNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> Option<&PackageNode> {
        self.nodes.get(id.0)
    }

    /// Record a dependency edge; returns false if `from` is not in the tree
    pub fn link(&mut self, from: NodeId, name: impl Into<String>, dependency: Dependency) -> bool {
        match self.nodes.get_mut(from.0) {
            Some(node) => {
                node.dependencies.insert(name.into(), dependency);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &PackageNode)> {
        self.nodes.iter().enumerate().map(|(index, node)| (NodeId(index), node))
    }

    /// Find a package by the directory it was read from
    pub fn find_by_path(&self, path: &Path) -> Option<NodeId> {
        self.iter().find(|(_, node)| node.path == path).map(|(id, _)| id)
    }
}
