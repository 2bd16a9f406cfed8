use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use patch_bump::{
    arguments::{Arguments, GitMode},
    PipelineTarget, bump_release,
    git::GitTracker,
};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Arguments::parse();
    pretty_env_logger::env_logger::builder()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .format_timestamp(None)
        .init();

    let pipeline = match (&args.pipeline, &args.release_url) {
        (Some(path), Some(release_url)) => Some(PipelineTarget {
            path: path.as_path(),
            release_url: release_url.as_str(),
        }),
        _ => None,
    };
    let (new_version, touched) = bump_release(&args.manifest, pipeline)?;

    if args.git_mode != GitMode::None {
        let repo_dir = match args.manifest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let git = GitTracker::open(repo_dir)?;
        git.execute_git_mode(args.git_mode, &new_version.to_string(), &touched, &args.remote)?;
    }

    println!("{new_version}");
    Ok(())
}
