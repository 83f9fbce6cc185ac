use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("drive root must not be empty")]
    EmptyDriveRoot,

    #[error("no URL was provided")]
    EmptyUrl,

    #[error("unable to create \"{}\": {source}", path.display())]
    DestinationUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to launch {program}: {source}")]
    SpawnFailure {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to open {} in {program}: {source}", path.display())]
    RevealFailure {
        program: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, JobError>;
