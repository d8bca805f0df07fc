//! Permissive license allow-list.

use crate::types::LicenseSummary;

/// Licenses dropped from the summary when permissive entries are omitted
pub const PERMISSIVE_LICENSES: &[&str] = &[
    "MIT",
    "BSD",
    "Apache",
    "WTF",
    "LGPL",
    "LGPL-2.0",
    "LGPL-3.0",
    "ISC",
    "Artistic-2.0",
    "Unlicense",
    "CC-BY",
    "Public Domain",
];

/// Check if a resolved license identifier is on the allow-list
pub fn is_permissive(license: &str) -> bool {
    PERMISSIVE_LICENSES.contains(&license)
}

/// Remove every entry whose license is on the allow-list; entries without a
/// license are kept
pub fn omit_permissive_licenses(summary: &mut LicenseSummary) {
    summary.retain(|_, entry| !entry.license.as_deref().is_some_and(is_permissive));
}
