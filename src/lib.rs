pub mod arguments;
pub mod error;
pub mod files;
pub mod git;
pub mod manifest;
pub mod pipeline;
pub mod release;
pub mod version;

pub use error::{BumpError, Result};
pub use manifest::bump_patch_version;
pub use release::{PipelineTarget, bump_release};
pub use version::VersionString;
