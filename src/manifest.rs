use crate::error::{BumpError, Result};
use crate::files::{self, PendingWrite};
use crate::version::VersionString;
use log::{debug, info};
use regex::{NoExpand, Regex};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_MANIFEST: &str = "Cargo.toml";

static VERSION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^version\s*=\s*"(.*?)""#).expect("version pattern is valid"));

/// Returns the value of the first `version = "..."` line in `contents`.
pub fn find_version(contents: &str) -> Option<&str> {
    contents
        .lines()
        .find_map(|line| VERSION_LINE.captures(line))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Reads and parses the current version from the manifest at `path`.
pub fn read_current_version(path: impl AsRef<Path>) -> Result<VersionString> {
    let path = path.as_ref();
    let contents = files::read(path)?;
    parse_current_version(path, &contents)
}

fn parse_current_version(path: &Path, contents: &str) -> Result<VersionString> {
    let value = find_version(contents).ok_or_else(|| BumpError::MissingVersionLine {
        path: path.to_path_buf(),
    })?;
    debug!("Found current version: {}", value);
    value.parse()
}

/// Replaces the matched `version = "..."` portion of every matching line.
///
/// Text following the closing quote on a version line is kept. All lines lose
/// their trailing whitespace.
pub fn rewrite_version_lines(contents: &str, new_version: &VersionString) -> String {
    let replacement = format!(r#"version = "{new_version}""#);
    files::rewrite_lines(contents, |line| {
        VERSION_LINE.replace(line, NoExpand(&replacement))
    })
}

/// Reads the manifest and computes the bumped version and new contents
/// without touching the file.
pub fn prepare_patch_bump(manifest_path: impl AsRef<Path>) -> Result<(VersionString, PendingWrite)> {
    let path = manifest_path.as_ref();
    let contents = files::read(path)?;

    let current = parse_current_version(path, &contents)?;
    let next = current.bump_patch()?;
    debug!("Incrementing version from {} -> {}", current, next);

    let pending = PendingWrite {
        path: path.to_path_buf(),
        contents: rewrite_version_lines(&contents, &next),
    };
    Ok((next, pending))
}

/// Bumps the patch segment of the manifest's version in place.
///
/// Nothing is written unless the current version was found and parsed, and
/// the write itself goes through a temp file and rename.
pub fn bump_patch_version(manifest_path: impl AsRef<Path>) -> Result<VersionString> {
    let (next, pending) = prepare_patch_bump(manifest_path)?;
    pending.write()?;

    info!("Updated '{}' to version {}", pending.path.display(), next);
    Ok(next)
}
