use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::manifest::DEFAULT_MANIFEST;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Default)]
pub enum GitMode {
    #[default]
    None,
    Commit,
    CommitPush,
}

#[derive(Debug, Parser)]
#[command(author, version, about, bin_name = "bump")]
pub struct Arguments {
    /// Manifest file holding the `version = "..."` line
    #[arg(long, short, default_value = DEFAULT_MANIFEST)]
    pub manifest: PathBuf,
    /// CI pipeline file whose release download links should follow the new version
    #[arg(long, requires = "release_url")]
    pub pipeline: Option<PathBuf>,
    /// Release download prefix, e.g. https://github.com/<org>/<repo>/releases/download/
    #[arg(long, requires = "pipeline")]
    pub release_url: Option<String>,
    #[arg(long, short, value_enum, ignore_case = true, default_value_t = GitMode::None)]
    pub git_mode: GitMode,
    #[arg(long, default_value = "origin")]
    pub remote: String,
    #[arg(long, short)]
    pub verbose: bool,
}
