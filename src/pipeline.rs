use crate::error::{BumpError, Result};
use crate::files::{self, PendingWrite};
use crate::version::VersionString;
use log::{info, warn};
use regex::{NoExpand, Regex};
use std::path::Path;

/// Matches `<release_url>v<tag>`, where the tag runs until a path separator,
/// whitespace or a quote.
pub fn release_link_regex(release_url: &str) -> Result<Regex> {
    Regex::new(&format!(r#"{}v[^/\s"']*"#, regex::escape(release_url)))
        .map_err(|source| BumpError::InvalidReleaseUrl {
            url: release_url.to_string(),
            source,
        })
}

/// Points every release download link in `contents` at `new_version`.
/// Returns the rewritten text and the number of links replaced.
pub fn rewrite_release_links(
    contents: &str,
    release_url: &str,
    new_version: &VersionString,
) -> Result<(String, usize)> {
    let regex = release_link_regex(release_url)?;
    let replacement = format!("{release_url}v{new_version}");
    let mut replaced = 0;
    let output = files::rewrite_lines(contents, |line| {
        replaced += regex.find_iter(line).count();
        regex.replace_all(line, NoExpand(&replacement))
    });
    Ok((output, replaced))
}

/// Reads the CI pipeline file and computes its rewritten contents without
/// touching it. Returns the pending write and the number of links replaced.
pub fn prepare_release_links(
    pipeline_path: impl AsRef<Path>,
    release_url: &str,
    new_version: &VersionString,
) -> Result<(PendingWrite, usize)> {
    let path = pipeline_path.as_ref();
    let contents = files::read(path)?;
    let (new_contents, replaced) = rewrite_release_links(&contents, release_url, new_version)?;

    if replaced == 0 {
        warn!(
            "No release links starting with '{}' found in '{}'",
            release_url,
            path.display()
        );
    }

    let pending = PendingWrite {
        path: path.to_path_buf(),
        contents: new_contents,
    };
    Ok((pending, replaced))
}

/// Rewrites the release links inside the CI pipeline file at `pipeline_path`.
pub fn update_release_links(
    pipeline_path: impl AsRef<Path>,
    release_url: &str,
    new_version: &VersionString,
) -> Result<usize> {
    let (pending, replaced) = prepare_release_links(pipeline_path, release_url, new_version)?;
    pending.write()?;

    info!("Updated {} release link(s) in '{}'", replaced, pending.path.display());
    Ok(replaced)
}
