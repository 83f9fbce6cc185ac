//! Working directory provisioning
//!
//! Downloads land in a fixed-name folder directly under the chosen drive
//! root (`D:\youtube-dl-temp` with the defaults). The folder is resolved on
//! every request and created on demand, one level deep only: a root that is
//! not mounted makes creation fail instead of materializing a fake path.

use std::fmt;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use std::str::FromStr;
use tracing::{debug, error, info};

use crate::config::JobConfig;
use crate::{JobError, Result};

/// Drive or volume root chosen by the user, e.g. `D:` or `/mnt/media`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveRoot(String);

impl DriveRoot {
    pub fn new(root: impl Into<String>) -> Result<Self> {
        let root = root.into();
        if root.trim().is_empty() {
            return Err(JobError::EmptyDriveRoot);
        }
        Ok(Self(root))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DriveRoot {
    type Err = JobError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for DriveRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A working directory that existed when it was resolved.
///
/// Only [`resolve`] hands these out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDirectory {
    path: PathBuf,
}

impl WorkingDirectory {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for WorkingDirectory {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Path of the working directory under `root`, without touching the disk.
///
/// Joined with the platform separator by hand: `Path::join("D:", ..)` on
/// Windows produces the drive-relative `D:youtube-dl-temp`.
pub fn working_path(root: &DriveRoot, config: &JobConfig) -> PathBuf {
    let base = root.as_str().trim_end_matches(['/', '\\']);
    PathBuf::from(format!(
        "{}{}{}",
        base, MAIN_SEPARATOR, config.working_dir_name
    ))
}

/// Make sure the working directory under `root` exists, creating it if
/// needed. Failures are logged and returned as
/// [`JobError::DestinationUnavailable`].
pub fn resolve(root: &DriveRoot, config: &JobConfig) -> Result<WorkingDirectory> {
    let path = working_path(root, config);

    if path.is_dir() {
        debug!("Working directory present: {}", path.display());
        return Ok(WorkingDirectory { path });
    }

    match std::fs::create_dir(&path) {
        Ok(()) => {
            info!("Created working directory {}", path.display());
            Ok(WorkingDirectory { path })
        }
        // Another request created it between the check and the mkdir
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && path.is_dir() => {
            Ok(WorkingDirectory { path })
        }
        Err(e) => {
            error!(
                "Unable to create \"{}\" folder on {}: {}",
                config.working_dir_name, root, e
            );
            Err(JobError::DestinationUnavailable { path, source: e })
        }
    }
}

#[cfg(test)]
pub(crate) fn assume_existing(path: impl Into<PathBuf>) -> WorkingDirectory {
    WorkingDirectory { path: path.into() }
}
