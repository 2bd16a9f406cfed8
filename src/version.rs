use crate::error::{BumpError, Result};
use std::fmt;
use std::str::FromStr;

/// A `major.minor.patch` triple as it appears in a manifest.
///
/// Major and minor are kept verbatim so that a bump never rewrites them
/// (`01.2.3` stays `01.2.x`). Only the patch segment is numeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionString {
    pub major: String,
    pub minor: String,
    pub patch: u64,
}

impl VersionString {
    /// Returns the next patch version, leaving major and minor untouched.
    pub fn bump_patch(&self) -> Result<Self> {
        let patch = self.patch.checked_add(1).ok_or_else(|| {
            BumpError::malformed(&self.to_string(), "patch segment would overflow")
        })?;
        Ok(VersionString {
            major: self.major.clone(),
            minor: self.minor.clone(),
            patch,
        })
    }
}

impl FromStr for VersionString {
    type Err = BumpError;

    fn from_str(value: &str) -> Result<Self> {
        let parts: Vec<&str> = value.split('.').collect();
        if parts.len() != 3 {
            return Err(BumpError::malformed(
                value,
                format!("expected 3 dot-separated segments, found {}", parts.len()),
            ));
        }

        let patch = parts[2].parse::<u64>().map_err(|e| {
            BumpError::malformed(value, format!("patch segment '{}' is not a non-negative integer: {e}", parts[2]))
        })?;

        Ok(VersionString {
            major: parts[0].to_string(),
            minor: parts[1].to_string(),
            patch,
        })
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
