//! Open the working directory in the platform file browser

use tracing::{info, warn};

use crate::destination::WorkingDirectory;
use crate::runner::ProcessRunner;
use crate::{JobError, Result};

/// File browser launched for the current platform
pub fn file_browser() -> &'static str {
    if cfg!(windows) {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Start the file browser on `directory` without waiting for it.
pub fn open_directory<R: ProcessRunner>(runner: &R, directory: &WorkingDirectory) -> Result<()> {
    let program = file_browser();
    let path = directory.path();

    info!("Opening {} in {}", path.display(), program);
    runner
        .launch(program, &[path.as_os_str()])
        .map_err(|e| {
            warn!("Unable to open {}: {}", path.display(), e);
            JobError::RevealFailure {
                program: program.to_string(),
                path: path.to_path_buf(),
                source: e,
            }
        })
}
