use crate::error::{BumpError, Result};
use log::debug;
use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn read(path: &Path) -> Result<String> {
    debug!("Reading file: '{}'", path.display());
    fs::read_to_string(path).map_err(|e| BumpError::file_access(path, e))
}

/// Rewrites `contents` line by line.
///
/// Every line has its trailing whitespace stripped (including `\r`) before
/// `edit` sees it, and every line in the output is terminated by `\n`.
pub fn rewrite_lines<'a, F>(contents: &'a str, mut edit: F) -> String
where
    F: FnMut(&'a str) -> Cow<'a, str>,
{
    let mut output = String::with_capacity(contents.len());
    for line in contents.lines() {
        output.push_str(&edit(line.trim_end()));
        output.push('\n');
    }
    output
}

/// New contents for a file, computed but not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub path: PathBuf,
    pub contents: String,
}

impl PendingWrite {
    pub fn write(&self) -> Result<()> {
        write_atomically(&self.path, &self.contents)
    }
}

/// Replaces `path` with `contents` through a sibling temp file and a rename,
/// so a failure part-way through never leaves a truncated file behind.
pub fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let permissions = fs::metadata(path)
        .map_err(|e| BumpError::file_access(path, e))?
        .permissions();

    let mut temp = tempfile::Builder::new()
        .prefix(".bump")
        .tempfile_in(dir)
        .map_err(|e| BumpError::file_access(dir, e))?;
    temp.write_all(contents.as_bytes())
        .map_err(|e| BumpError::file_access(temp.path().to_path_buf(), e))?;
    temp.as_file()
        .set_permissions(permissions)
        .map_err(|e| BumpError::file_access(temp.path().to_path_buf(), e))?;
    temp.persist(path)
        .map_err(|e| BumpError::file_access(path, e.error))?;

    debug!("Wrote {} bytes to '{}'", contents.len(), path.display());
    Ok(())
}
