//! Resolve → build → run
//!
//! [`Downloader`] owns the immutable [`JobConfig`] and a [`ProcessRunner`].
//! Every failure comes back as a [`JobError`] after being logged, so a front
//! end can ignore it and keep going.

use tracing::{debug, info, warn};

use crate::config::JobConfig;
use crate::destination::{self, DriveRoot, WorkingDirectory};
use crate::invocation::{DownloadRequest, DownloaderInvocation};
use crate::reveal;
use crate::runner::{ProcessRunner, RunStatus, SystemRunner};
use crate::{JobError, Result};

/// What was executed and how it ended. The exit status is reported as-is;
/// a non-zero code from the downloader is not treated as an error here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub invocation: DownloaderInvocation,
    pub status: RunStatus,
}

pub struct Downloader<R = SystemRunner> {
    config: JobConfig,
    runner: R,
}

impl Downloader<SystemRunner> {
    pub fn new(config: JobConfig) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl<R: ProcessRunner> Downloader<R> {
    pub fn with_runner(config: JobConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn resolve(&self, root: &DriveRoot) -> Result<WorkingDirectory> {
        destination::resolve(root, &self.config)
    }

    pub fn build(&self, request: &DownloadRequest<'_>) -> DownloaderInvocation {
        DownloaderInvocation::from_request(request, &self.config)
    }

    /// Build the command for `url` and run it to completion.
    pub fn build_and_run(
        &self,
        directory: &WorkingDirectory,
        url: &str,
        audio_only: bool,
    ) -> Result<JobReport> {
        let invocation = self.build(&DownloadRequest::new(directory, url, audio_only));
        debug!("Downloader command: {}", invocation);

        match self.runner.run(&invocation) {
            Ok(status) => {
                debug!("Downloader finished with code {:?}", status.code);
                Ok(JobReport { invocation, status })
            }
            Err(e) => {
                warn!("Unable to perform video|audio download due to: {}", e);
                Err(JobError::SpawnFailure {
                    program: invocation.program().to_string(),
                    source: e,
                })
            }
        }
    }

    /// Full flow for one user action. An empty URL is a no-op error; a
    /// destination failure stops before anything is spawned.
    pub fn submit(&self, root: &DriveRoot, url: &str, audio_only: bool) -> Result<JobReport> {
        if url.is_empty() {
            return Err(JobError::EmptyUrl);
        }

        let directory = self.resolve(root)?;
        info!(
            "Downloading {} to {}{}",
            url,
            directory.path().display(),
            if audio_only { " (audio only)" } else { "" }
        );
        self.build_and_run(&directory, url, audio_only)
    }

    /// Resolve the working directory and open it in the file browser.
    pub fn reveal(&self, root: &DriveRoot) -> Result<WorkingDirectory> {
        let directory = self.resolve(root)?;
        reveal::open_directory(&self.runner, &directory)?;
        Ok(directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::assume_existing;
    use crate::runner::testing::RecordingRunner;
    use std::path::MAIN_SEPARATOR;

    fn downloader() -> Downloader<RecordingRunner> {
        Downloader::with_runner(JobConfig::default(), RecordingRunner::default())
    }

    #[test]
    fn test_build_and_run_records_single_spawn() {
        let dl = downloader();
        let dir = assume_existing(format!("D:{}youtube-dl-temp", MAIN_SEPARATOR));

        let report = dl
            .build_and_run(&dir, "https://example/watch?v=abc123", false)
            .unwrap();

        assert!(report.status.success());
        let runs = dl.runner().runs.lock();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0], report.invocation.tokens());
    }

    #[test]
    fn test_exit_code_is_reported_not_judged() {
        let runner = RecordingRunner {
            exit_code: 1,
            ..RecordingRunner::default()
        };
        let dl = Downloader::with_runner(JobConfig::default(), runner);
        let dir = assume_existing("/media/youtube-dl-temp");

        let report = dl.build_and_run(&dir, "https://example/bad", true).unwrap();
        assert_eq!(report.status.code, Some(1));
    }

    #[test]
    fn test_spawn_failure() {
        let dl = Downloader::with_runner(
            JobConfig::default(),
            RecordingRunner::failing(std::io::ErrorKind::NotFound),
        );
        let dir = assume_existing("/media/youtube-dl-temp");

        let err = dl.build_and_run(&dir, "https://example/v", false).unwrap_err();
        match err {
            JobError::SpawnFailure { program, source } => {
                assert_eq!(program, "youtube-dl");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_url_skips_everything() {
        let drive = tempfile::tempdir().unwrap();
        let dl = downloader();
        let root = DriveRoot::new(drive.path().to_string_lossy().to_string()).unwrap();

        let err = dl.submit(&root, "", false).unwrap_err();
        assert!(matches!(err, JobError::EmptyUrl));
        assert!(!drive.path().join("youtube-dl-temp").exists());
        assert_eq!(dl.runner().run_count(), 0);
    }

    #[test]
    fn test_reveal_creates_and_opens() {
        let drive = tempfile::tempdir().unwrap();
        let dl = downloader();
        let root = DriveRoot::new(drive.path().to_string_lossy().to_string()).unwrap();

        let dir = dl.reveal(&root).unwrap();
        assert!(dir.path().is_dir());
        assert_eq!(dl.runner().launches.lock().len(), 1);
    }

    #[test]
    fn test_reveal_unavailable_destination() {
        let drive = tempfile::tempdir().unwrap();
        let dl = downloader();
        let missing = drive.path().join("gone");
        let root = DriveRoot::new(missing.to_string_lossy().to_string()).unwrap();

        let err = dl.reveal(&root).unwrap_err();
        assert!(matches!(err, JobError::DestinationUnavailable { .. }));
        assert!(dl.runner().launches.lock().is_empty());
    }
}
