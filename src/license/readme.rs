//! License detection from README text.

use crate::error::Result;
use crate::license::directory::read_if_exists;
use crate::types::LicenseEntry;
use std::fs;
use std::path::{Path, PathBuf};

/// Source recorded for README-derived entries
pub const README_SOURCE: &str = "README";

const WTFPL_PHRASE: &str = "DO WHAT THE FUCK YOU WANT TO PUBLIC LICENSE";

/// Scan README text for the first license signal
pub fn extract_from_readme(readme: &str) -> Option<LicenseEntry> {
    let license = if readme.contains("MIT") {
        "MIT"
    } else if readme.contains("BSD") {
        "BSD"
    } else if readme.contains("Apache License") {
        "Apache"
    } else if readme.contains(WTFPL_PHRASE) {
        "WTF"
    } else if readme.contains("Unlicense") || readme.contains("UNLICENSE") {
        "Unlicense"
    } else if readme.to_lowercase().contains("public domain") {
        "Public Domain"
    } else {
        return None;
    };

    Some(LicenseEntry::with_text(
        Some(license.to_string()),
        README_SOURCE,
        readme,
    ))
}

/// Scan every `README*` file in `dir`; the first one yielding a license wins.
///
/// An unreadable directory is treated as having no README.
pub fn extract_from_readme_files(dir: &Path) -> Result<Option<LicenseEntry>> {
    for path in readme_files(dir) {
        if let Some(entry) = read_if_exists(&path)?.as_deref().and_then(extract_from_readme) {
            return Ok(Some(entry));
        }
    }

    Ok(None)
}

/// Files whose name without extension is `readme`, any case, sorted by name
fn readme_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .is_some_and(|stem| stem.eq_ignore_ascii_case("readme"))
        })
        .collect();
    files.sort();
    files
}
