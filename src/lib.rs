//! # node_license_scan
//!
//! Determines the license of every package in an installed `node_modules` tree:
//! - **License files**: `LICENSE`, `COPYING`, `UNLICENSE` and friends, matched
//!   against reference texts where no license name is given
//! - **Declared fields**: `license` / `licenses` in `package.json`, normalized to
//!   a small set of canonical identifiers
//! - **READMEs**: inline manifest text or `README*` files as a last resort
//!
//! ## Quick Start
//!
//! ```no_run
//! use node_license_scan::{scan, ScanConfig};
//!
//! # fn main() -> node_license_scan::Result<()> {
//! let config = ScanConfig::builder().path("./my-app").omit_permissive(true).build();
//! let summary = scan(&config)?;
//!
//! for (id, entry) in &summary {
//!     println!("{}: {}", id, entry.license.as_deref().unwrap_or("?"));
//! }
//! # Ok(())
//! # }
//! ```

mod audit;
mod config;
mod error;
pub mod license;
mod parser;
mod repository;
mod types;

// Re-export public API
pub use audit::{find_licenses, scan};
pub use config::{ScanConfig, ScanConfigBuilder};
pub use error::{Result, ScanError};
pub use license::permissive::{is_permissive, omit_permissive_licenses, PERMISSIVE_LICENSES};
pub use license::{LicenseExtractor, PackageLicenseExtractor};
pub use parser::read_installed;
pub use repository::normalize_repository;
pub use types::{
    Dependency, LicenseEntry, LicenseField, LicenseSummary, NodeId, PackageNode, PackageTree,
    RepositoryField, INSTALL_DIR, MISSING_README, UNKNOWN_LICENSE,
};
