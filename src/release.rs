use crate::error::Result;
use crate::files::PendingWrite;
use crate::manifest::prepare_patch_bump;
use crate::pipeline::prepare_release_links;
use crate::version::VersionString;
use log::info;
use std::path::{Path, PathBuf};

/// A CI pipeline file and the release download prefix whose links it carries.
#[derive(Debug, Clone, Copy)]
pub struct PipelineTarget<'a> {
    pub path: &'a Path,
    pub release_url: &'a str,
}

/// Bumps the manifest and, when given, rewrites the pipeline's release links.
///
/// Both files are read and both rewrites computed before either is written,
/// so a missing or unreadable pipeline file leaves the manifest untouched.
/// Returns the new version and the files that were written.
pub fn bump_release(
    manifest_path: impl AsRef<Path>,
    pipeline: Option<PipelineTarget<'_>>,
) -> Result<(VersionString, Vec<PathBuf>)> {
    let (new_version, manifest_write) = prepare_patch_bump(manifest_path)?;
    let mut writes: Vec<PendingWrite> = vec![manifest_write];

    if let Some(target) = pipeline {
        let (pipeline_write, replaced) =
            prepare_release_links(target.path, target.release_url, &new_version)?;
        info!("Rewriting {} release link(s) in '{}'", replaced, target.path.display());
        writes.push(pipeline_write);
    }

    for write in &writes {
        write.write()?;
    }
    info!("Bumped version to {}", new_version);

    Ok((new_version, writes.into_iter().map(|write| write.path).collect()))
}
