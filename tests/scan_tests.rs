//! End-to-end scans of on-disk package trees

use node_license_scan::{scan, LicenseEntry, ScanConfig};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_package(dir: &Path, manifest: serde_json::Value) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("package.json"), manifest.to_string()).unwrap();
}

#[test]
fn test_project_with_licensed_dependency() {
    let tmp = TempDir::new().unwrap();
    let proj = tmp.path().join("proj");
    write_package(
        &proj,
        json!({"name": "proj", "version": "1.0.0", "license": "MIT", "dependencies": {"foo": "1.2.0"}}),
    );
    let foo = proj.join("node_modules/foo");
    write_package(&foo, json!({"name": "foo", "version": "1.2.0"}));
    fs::write(foo.join("LICENSE"), "BSD License").unwrap();

    let summary = scan(&ScanConfig::builder().path(&proj).build()).unwrap();

    assert_eq!(
        serde_json::to_value(&summary).unwrap(),
        json!({
            "proj@1.0.0": {"license": "MIT", "source": "package.json"},
            "foo@1.2.0": {"license": "BSD", "source": "LICENSE", "sourceText": "BSD License"}
        })
    );
    assert_eq!(
        summary.keys().collect::<Vec<_>>(),
        vec!["proj@1.0.0", "foo@1.2.0"]
    );
}

#[test]
fn test_repository_and_readme_fallbacks() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_package(
        root,
        json!({
            "name": "app",
            "version": "0.1.0",
            "repository": {"type": "git", "url": "git://github.com/me/app.git"},
            "dependencies": {"inline": "1", "on-disk": "1", "silent": "1", "absent": "1"}
        }),
    );
    write_package(
        &root.join("node_modules/inline"),
        json!({"name": "inline", "version": "1.0.0", "readme": "Released into the public domain."}),
    );
    write_package(
        &root.join("node_modules/on-disk"),
        json!({"name": "on-disk", "version": "1.0.0", "readme": "ERROR: No README data found!"}),
    );
    fs::write(root.join("node_modules/on-disk/README.md"), "## License\n\nApache License 2.0").unwrap();
    write_package(
        &root.join("node_modules/silent"),
        json!({"name": "silent", "version": "1.0.0", "repository": "someone/silent"}),
    );

    let summary = scan(&ScanConfig::builder().path(root).build()).unwrap();

    assert_eq!(summary.len(), 4);
    assert_eq!(
        summary["app@0.1.0"],
        LicenseEntry {
            repository: Some("https://github.com/me/app".into()),
            ..LicenseEntry::unknown()
        }
    );
    assert_eq!(summary["inline@1.0.0"].license.as_deref(), Some("Public Domain"));
    assert_eq!(summary["inline@1.0.0"].source.as_deref(), Some("README"));
    assert_eq!(summary["on-disk@1.0.0"].license.as_deref(), Some("Apache"));
    assert_eq!(
        summary["silent@1.0.0"],
        LicenseEntry {
            repository: Some("someone/silent".into()),
            ..LicenseEntry::unknown()
        }
    );
}

#[test]
fn test_overrides_and_permissive_filter() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_package(
        root,
        json!({"name": "app", "version": "1.0.0", "license": "ISC", "dependencies": {"a": "1", "b": "1", "c": "1"}}),
    );
    write_package(&root.join("node_modules/a"), json!({"name": "a", "version": "1.0.0", "license": "MIT"}));
    write_package(&root.join("node_modules/b"), json!({"name": "b", "version": "1.0.0", "license": "GPL-2.0"}));
    write_package(&root.join("node_modules/c"), json!({"name": "c", "version": "1.0.0", "license": "MIT"}));

    let config = ScanConfig::builder()
        .path(root)
        .override_license("c@1.0.0", LicenseEntry::new("Proprietary", "vendor agreement"))
        .omit_permissive(true)
        .build();
    let summary = scan(&config).unwrap();

    assert_eq!(summary.keys().collect::<Vec<_>>(), vec!["c@1.0.0", "b@1.0.0"]);
    assert_eq!(summary["b@1.0.0"], LicenseEntry::new("GPL", "package.json"));
    assert_eq!(summary["c@1.0.0"].source.as_deref(), Some("vendor agreement"));
}

#[test]
fn test_nested_versions_are_distinct_entries() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_package(
        root,
        json!({"name": "app", "version": "1.0.0", "dependencies": {"left": "1", "right": "1"}}),
    );
    write_package(
        &root.join("node_modules/left"),
        json!({"name": "left", "version": "1.0.0", "license": "MIT", "dependencies": {"shared": "1"}}),
    );
    write_package(
        &root.join("node_modules/right"),
        json!({"name": "right", "version": "1.0.0", "license": "MIT", "dependencies": {"shared": "2"}}),
    );
    write_package(
        &root.join("node_modules/left/node_modules/shared"),
        json!({"name": "shared", "version": "1.0.0", "license": "LGPL-3.0"}),
    );
    write_package(
        &root.join("node_modules/right/node_modules/shared"),
        json!({"name": "shared", "version": "2.0.0", "license": "BSD-3-Clause"}),
    );

    let summary = scan(&ScanConfig::builder().path(root).build()).unwrap();

    assert_eq!(summary["shared@1.0.0"].license.as_deref(), Some("LGPL"));
    assert_eq!(summary["shared@2.0.0"].license.as_deref(), Some("BSD"));
    assert_eq!(summary.len(), 5);
}

#[test]
fn test_unexpected_license_shape_is_unknown() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_package(
        root,
        json!({"name": "app", "version": "1.0.0", "license": "MIT", "dependencies": {"odd": "1"}}),
    );
    write_package(
        &root.join("node_modules/odd"),
        json!({"name": "odd", "version": "1.0.0", "license": ["MIT"]}),
    );

    let summary = scan(&ScanConfig::builder().path(root).build()).unwrap();

    assert_eq!(summary["odd@1.0.0"], LicenseEntry::new("UNKNOWN", "package.json"));
}
