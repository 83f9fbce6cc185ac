use std::ffi::OsStr;
use std::io;
use std::path::{Path, MAIN_SEPARATOR};

use parking_lot::Mutex;
use qy_job::{
    DownloaderInvocation, Downloader, DriveRoot, JobConfig, JobError, ProcessRunner, RunStatus,
};

#[derive(Default)]
struct Recorder {
    runs: Mutex<Vec<Vec<String>>>,
}

impl ProcessRunner for Recorder {
    fn run(&self, invocation: &DownloaderInvocation) -> io::Result<RunStatus> {
        self.runs.lock().push(
            invocation
                .tokens()
                .into_iter()
                .map(str::to_string)
                .collect(),
        );
        Ok(RunStatus::from_code(0))
    }

    fn launch(&self, _program: &str, _args: &[&OsStr]) -> io::Result<()> {
        Ok(())
    }
}

fn drive(path: &Path) -> DriveRoot {
    DriveRoot::new(path.to_string_lossy().to_string()).unwrap()
}

#[test]
fn scenario_a_single_video() {
    let volume = tempfile::tempdir().unwrap();
    let dl = Downloader::with_runner(JobConfig::default(), Recorder::default());
    let url = "https://example/watch?v=abc123";

    let report = dl.submit(&drive(volume.path()), url, false).unwrap();

    let working = volume.path().join("youtube-dl-temp");
    assert!(working.is_dir());

    let template = format!(
        "{}{}%(title)s.%(ext)s",
        working.to_string_lossy(),
        MAIN_SEPARATOR
    );
    let runs = dl.runner().runs.lock();
    assert_eq!(runs.len(), 1);
    assert_eq!(
        runs[0],
        vec!["youtube-dl", "-ci", "-o", template.as_str(), url]
    );
    assert!(!report.invocation.template().is_collection());
}

#[test]
fn scenario_b_audio_playlist() {
    let volume = tempfile::tempdir().unwrap();
    let dl = Downloader::with_runner(JobConfig::default(), Recorder::default());
    let url = "https://example/watch?v=abc123&list=PL1";

    let report = dl.submit(&drive(volume.path()), url, true).unwrap();

    let args = report.invocation.args();
    let f = args.iter().position(|a| a == "-f").unwrap();
    let o = args.iter().position(|a| a == "-o").unwrap();
    assert_eq!(args[f + 1], "140");
    assert!(f < o);
    assert!(args[o + 1].ends_with("%(playlist_index)s-%(title)s.%(ext)s"));
    assert_eq!(args[o + 2], url);
}

#[test]
fn scenario_c_unmounted_volume() {
    let volume = tempfile::tempdir().unwrap();
    let unmounted = volume.path().join("E-drive");
    let dl = Downloader::with_runner(JobConfig::default(), Recorder::default());

    let err = dl
        .submit(&drive(&unmounted), "https://example/watch?v=abc123", false)
        .unwrap_err();

    assert!(matches!(err, JobError::DestinationUnavailable { .. }));
    assert!(dl.resolve(&drive(&unmounted)).ok().is_none());
    assert!(dl.runner().runs.lock().is_empty());
}

#[test]
fn repeated_requests_reuse_directory() {
    let volume = tempfile::tempdir().unwrap();
    let dl = Downloader::with_runner(JobConfig::default(), Recorder::default());
    let root = drive(volume.path());

    let first = dl.resolve(&root).unwrap();
    std::fs::write(first.path().join("song.m4a"), b"x").unwrap();
    let second = dl.resolve(&root).unwrap();

    assert_eq!(first, second);
    assert!(second.path().join("song.m4a").exists());
}

#[test]
fn missing_downloader_is_spawn_failure() {
    let volume = tempfile::tempdir().unwrap();
    let config = JobConfig {
        executable: "quicker-ytdl-no-such-downloader".to_string(),
        ..JobConfig::default()
    };
    let dl = Downloader::new(config);

    let err = dl
        .submit(&drive(volume.path()), "https://example/watch?v=abc123", false)
        .unwrap_err();

    match err {
        JobError::SpawnFailure { program, .. } => {
            assert_eq!(program, "quicker-ytdl-no-such-downloader")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
