//! License detection from license files inside a package directory.

use crate::error::{Result, ScanError};
use crate::license::text::CanonicalLicense;
use crate::types::LicenseEntry;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Generic license files, in probe order; their content decides the license
const LICENSE_FILE_NAMES: &[&str] = &[
    "LICENSE",
    "LICENSE.md",
    "LICENSE.txt",
    "LICENCE",
    "COPYING",
    "COPYING.md",
];

/// A file by this name is MIT without looking at it
const MIT_LICENSE_FILE_NAME: &str = "MIT-LICENSE.txt";

/// Files by these names are the Unlicense without looking at them
const UNLICENSE_FILE_NAMES: &[&str] = &[
    "UNLICENSE",
    "UNLICENSE.md",
    "UNLICENSE.txt",
    "UNLICENCE",
    "UNLICENCE.md",
    "UNLICENCE.txt",
];

/// Read `path` if it is a regular file. Absence is not an error.
pub(crate) fn read_if_exists(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }

    let bytes = fs::read(path).map_err(|e| ScanError::io(path, e))?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

/// Probe `dir` for the first license file and classify it.
///
/// Returns `None` only when no license file exists. A file that exists but
/// cannot be classified still yields an entry, with `license` unset and the
/// raw content kept in `source_text`.
pub fn extract_from_directory(dir: &Path) -> Result<Option<LicenseEntry>> {
    let Some((file_name, text, license)) = find_license_file(dir)? else {
        return Ok(None);
    };

    let license = license.or_else(|| classify_license_text(&text));
    debug!(
        "License file {} in {} classified as {:?}",
        file_name,
        dir.display(),
        license
    );

    Ok(Some(LicenseEntry::with_text(
        license.map(String::from),
        file_name,
        text,
    )))
}

/// First existing license file, with a license when its name alone decides it
fn find_license_file(dir: &Path) -> Result<Option<(&'static str, String, Option<&'static str>)>> {
    for &name in LICENSE_FILE_NAMES {
        if let Some(text) = read_if_exists(&dir.join(name))? {
            return Ok(Some((name, text, None)));
        }
    }

    if let Some(text) = read_if_exists(&dir.join(MIT_LICENSE_FILE_NAME))? {
        return Ok(Some((MIT_LICENSE_FILE_NAME, text, Some("MIT"))));
    }

    for &name in UNLICENSE_FILE_NAMES {
        if let Some(text) = read_if_exists(&dir.join(name))? {
            return Ok(Some((name, text, Some("Unlicense"))));
        }
    }

    Ok(None)
}

/// Classify the content of a generic license file
pub fn classify_license_text(text: &str) -> Option<&'static str> {
    if text.contains("Apache License") {
        Some("Apache")
    } else if CanonicalLicense::Mit.matches(text) {
        Some("MIT")
    } else if CanonicalLicense::Bsd3.matches(text) {
        Some("BSD")
    } else if CanonicalLicense::Unlicense.matches(text) {
        Some("Unlicense")
    } else if text.contains("The ISC License") {
        Some("ISC")
    } else if text.contains("GNU LESSER GENERAL PUBLIC LICENSE") {
        Some("LGPL")
    } else if text.contains("GNU GENERAL PUBLIC LICENSE") {
        Some("GPL")
    } else if text.to_lowercase().contains("public domain") {
        Some("Public Domain")
    } else {
        None
    }
}
