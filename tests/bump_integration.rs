//! Integration tests for bumping a manifest on disk

use patch_bump::{
    BumpError, PipelineTarget, VersionString, bump_patch_version, bump_release,
    manifest::read_current_version,
    pipeline::update_release_links,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_manifest(temp_dir: &TempDir, contents: &str) -> PathBuf {
    let cargo_toml = temp_dir.path().join("Cargo.toml");
    fs::write(&cargo_toml, contents).unwrap();
    cargo_toml
}

// ============================================================================
// Manifest bump
// ============================================================================

#[test]
fn test_bump_simple_version() {
    let temp_dir = TempDir::new().unwrap();
    let cargo_toml = write_manifest(
        &temp_dir,
        r#"[package]
name = "test-crate"
version = "1.2.3"
edition = "2021"
"#,
    );

    let new_version = bump_patch_version(&cargo_toml).unwrap();
    assert_eq!(new_version.to_string(), "1.2.4");

    let content = fs::read_to_string(&cargo_toml).unwrap();
    assert_eq!(
        content,
        r#"[package]
name = "test-crate"
version = "1.2.4"
edition = "2021"
"#
    );
}

#[test]
fn test_bump_rolls_patch_past_nine() {
    let temp_dir = TempDir::new().unwrap();
    let cargo_toml = write_manifest(&temp_dir, "[package]\nversion = \"0.9.9\"\n");

    bump_patch_version(&cargo_toml).unwrap();

    let content = fs::read_to_string(&cargo_toml).unwrap();
    assert!(content.contains(r#"version = "0.9.10""#));
}

#[test]
fn test_bump_twice_yields_different_versions() {
    let temp_dir = TempDir::new().unwrap();
    let cargo_toml = write_manifest(&temp_dir, "version = \"2.0.0\"\n");

    let first = bump_patch_version(&cargo_toml).unwrap();
    let second = bump_patch_version(&cargo_toml).unwrap();

    assert_ne!(first, second);
    assert_eq!(second.to_string(), "2.0.2");
    assert_eq!(read_current_version(&cargo_toml).unwrap(), second);
}

#[test]
fn test_bump_keeps_major_minor_literal() {
    let temp_dir = TempDir::new().unwrap();
    let cargo_toml = write_manifest(&temp_dir, "version = \"01.02.3\"\n");

    bump_patch_version(&cargo_toml).unwrap();

    let content = fs::read_to_string(&cargo_toml).unwrap();
    assert_eq!(content, "version = \"01.02.4\"\n");
}

#[test]
fn test_bump_preserves_other_lines_except_trailing_whitespace() {
    let temp_dir = TempDir::new().unwrap();
    let cargo_toml = write_manifest(
        &temp_dir,
        "[package]  \nname = \"x\"\nversion = \"1.0.0\"\n\n[dependencies]\t\nserde = { version = \"1.0\" }   \n",
    );

    bump_patch_version(&cargo_toml).unwrap();

    let content = fs::read_to_string(&cargo_toml).unwrap();
    assert_eq!(
        content,
        "[package]\nname = \"x\"\nversion = \"1.0.1\"\n\n[dependencies]\nserde = { version = \"1.0\" }\n"
    );
}

#[test]
fn test_bump_relative_manifest_path() {
    let temp_dir = TempDir::new().unwrap();
    let sub_dir = temp_dir.path().join("crates").join("core");
    fs::create_dir_all(&sub_dir).unwrap();
    let cargo_toml = sub_dir.join("Cargo.toml");
    fs::write(&cargo_toml, "version = \"3.2.1\"\n").unwrap();

    let new_version = bump_patch_version(&cargo_toml).unwrap();
    assert_eq!(new_version.to_string(), "3.2.2");
}

// ============================================================================
// Failure modes leave the manifest untouched
// ============================================================================

#[test]
fn test_missing_version_line_leaves_file_unmodified() {
    let temp_dir = TempDir::new().unwrap();
    let original = "[package]  \nname = \"no-version\"\n";
    let cargo_toml = write_manifest(&temp_dir, original);

    let err = bump_patch_version(&cargo_toml).unwrap_err();
    assert!(matches!(err, BumpError::MissingVersionLine { .. }));

    assert_eq!(fs::read_to_string(&cargo_toml).unwrap(), original);
}

#[test]
fn test_malformed_versions_leave_file_unmodified() {
    for value in ["1.2", "1.2.x", "1.2.3.4", "1.2.-1", ""] {
        let temp_dir = TempDir::new().unwrap();
        let original = format!("version = \"{value}\"   \n");
        let cargo_toml = write_manifest(&temp_dir, &original);

        let err = bump_patch_version(&cargo_toml).unwrap_err();
        assert!(
            matches!(err, BumpError::MalformedVersion { .. }),
            "unexpected error for '{value}': {err}"
        );
        assert_eq!(fs::read_to_string(&cargo_toml).unwrap(), original);
    }
}

#[test]
fn test_missing_manifest_is_file_access_error() {
    let temp_dir = TempDir::new().unwrap();
    let cargo_toml = temp_dir.path().join("Cargo.toml");

    let err = bump_patch_version(&cargo_toml).unwrap_err();
    assert!(matches!(err, BumpError::FileAccess { .. }));
    assert!(!cargo_toml.exists());
}

// ============================================================================
// Pipeline links
// ============================================================================

#[test]
fn test_update_release_links_in_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let cargo_toml = write_manifest(&temp_dir, "version = \"0.4.1\"\n");
    let workflow = temp_dir.path().join("main.yml");
    fs::write(
        &workflow,
        r#"steps:
  - run: curl -LO https://github.com/acme/tool/releases/download/v0.4.1/tool
  - uses: actions/checkout@v4
"#,
    )
    .unwrap();

    let new_version = bump_patch_version(&cargo_toml).unwrap();
    let replaced = update_release_links(
        &workflow,
        "https://github.com/acme/tool/releases/download/",
        &new_version,
    )
    .unwrap();

    assert_eq!(replaced, 1);
    let content = fs::read_to_string(&workflow).unwrap();
    assert!(content.contains("releases/download/v0.4.2/tool"));
    assert!(content.contains("actions/checkout@v4"));
}

#[test]
fn test_update_release_links_missing_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let version: VersionString = "1.0.0".parse().unwrap();

    let err = update_release_links(temp_dir.path().join("main.yml"), "https://x/", &version)
        .unwrap_err();
    assert!(matches!(err, BumpError::FileAccess { .. }));
}

// ============================================================================
// Manifest and pipeline together
// ============================================================================

const RELEASES: &str = "https://github.com/acme/tool/releases/download/";

#[test]
fn test_bump_release_writes_manifest_and_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let cargo_toml = write_manifest(&temp_dir, "version = \"0.4.1\"\n");
    let workflow = temp_dir.path().join("main.yml");
    fs::write(&workflow, format!("url: {RELEASES}v0.4.1/tool\n")).unwrap();

    let (new_version, written) = bump_release(
        &cargo_toml,
        Some(PipelineTarget {
            path: workflow.as_path(),
            release_url: RELEASES,
        }),
    )
    .unwrap();

    assert_eq!(new_version.to_string(), "0.4.2");
    assert_eq!(written, vec![cargo_toml.clone(), workflow.clone()]);
    assert_eq!(fs::read_to_string(&cargo_toml).unwrap(), "version = \"0.4.2\"\n");
    assert_eq!(
        fs::read_to_string(&workflow).unwrap(),
        format!("url: {RELEASES}v0.4.2/tool\n")
    );
}

#[test]
fn test_bump_release_without_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let cargo_toml = write_manifest(&temp_dir, "version = \"1.1.1\"\n");

    let (new_version, written) = bump_release(&cargo_toml, None).unwrap();

    assert_eq!(new_version.to_string(), "1.1.2");
    assert_eq!(written, vec![cargo_toml]);
}

#[test]
fn test_bump_release_missing_pipeline_leaves_manifest_unmodified() {
    let temp_dir = TempDir::new().unwrap();
    let original = "[package]\nversion = \"2.3.4\"\n";
    let cargo_toml = write_manifest(&temp_dir, original);
    let workflow = temp_dir.path().join("missing.yml");

    let err = bump_release(
        &cargo_toml,
        Some(PipelineTarget {
            path: workflow.as_path(),
            release_url: RELEASES,
        }),
    )
    .unwrap_err();

    assert!(matches!(err, BumpError::FileAccess { .. }));
    assert_eq!(fs::read_to_string(&cargo_toml).unwrap(), original);
    assert!(!workflow.exists());
}
