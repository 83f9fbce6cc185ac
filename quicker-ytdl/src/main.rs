//! quicker-ytdl - paste a URL, pick a drive, let youtube-dl do the rest
//!
//! Downloads go to `<drive>\youtube-dl-temp`. Playlist URLs get an index
//! prefix on every file; `--audio-only` grabs the m4a stream.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use qy_job::destination::working_path;
use qy_job::{probe_version, AppConfig, Downloader, DriveRoot, JobConfig};

/// Quicker youtube-dl - one-shot downloads into a fixed folder per drive
#[derive(Parser, Debug)]
#[command(name = "quicker-ytdl")]
#[command(about = "Download a video, playlist or audio track into <drive>/youtube-dl-temp")]
#[command(version)]
struct Args {
    /// Video or playlist URL
    url: Option<String>,

    /// Drive or volume root to download under (e.g. D: or /mnt/media)
    #[arg(short, long)]
    drive: Option<String>,

    /// Fetch the audio stream only
    #[arg(short, long, conflicts_with = "video")]
    audio_only: bool,

    /// Fetch video even when the config defaults to audio only
    #[arg(long)]
    video: bool,

    /// Open the download folder in the file browser instead of downloading
    #[arg(long, conflicts_with = "url")]
    reveal: bool,

    /// Print downloader availability and destination, then exit
    #[arg(long)]
    check: bool,

    /// Downloader executable (overrides the config file)
    #[arg(long)]
    downloader: Option<String>,

    /// JSON config file (default: <config dir>/quicker-ytdl/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Command line merged over the config file
#[derive(Debug)]
struct Options {
    drive: DriveRoot,
    audio_only: bool,
    job: JobConfig,
}

impl Options {
    fn resolve(args: &Args, config: AppConfig) -> Result<Self> {
        let drive = args
            .drive
            .clone()
            .unwrap_or(config.default_drive);
        let drive = DriveRoot::new(drive).context("Invalid drive")?;

        let audio_only = if args.video {
            false
        } else {
            args.audio_only || config.audio_only
        };

        let mut job = config.job;
        if let Some(exe) = &args.downloader {
            job.executable = exe.clone();
        }
        job.validate().context("Invalid downloader settings")?;

        Ok(Self {
            drive,
            audio_only,
            job,
        })
    }
}

fn init_logging(log_level: &str) {
    // RUST_LOG wins over --log-level
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
        return;
    }

    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();
}

fn print_banner(options: &Options, config_path: Option<PathBuf>) {
    let downloader = match probe_version(&options.job.executable) {
        Some(version) => format!("{} [OK {}]", options.job.executable, version),
        None => format!("{} [NOT FOUND]", options.job.executable),
    };
    let config_path = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(built-in defaults)".to_string());

    println!();
    println!("========================================================");
    println!("  Quicker youtube-dl v{}", env!("CARGO_PKG_VERSION"));
    println!("========================================================");
    println!("  Downloader: {}", downloader);
    println!("  Drive:      {}", options.drive);
    println!("  Folder:     {}", working_path(&options.drive, &options.job).display());
    println!("  Audio only: {}", if options.audio_only { "yes" } else { "no" });
    println!("  Config:     {}", config_path);
    println!("========================================================");
    println!();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level);

    let config_path = args
        .config
        .clone()
        .or_else(|| AppConfig::default_path().filter(|p| p.exists()));
    let config = AppConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;
    let options = Options::resolve(&args, config)?;

    if args.check {
        print_banner(&options, config_path);
        return Ok(());
    }

    let downloader = Downloader::new(options.job);

    if args.reveal {
        let dir = downloader.reveal(&options.drive)?;
        info!("Revealed {}", dir.path().display());
        return Ok(());
    }

    let url = args.url.unwrap_or_default();
    let report = downloader.submit(&options.drive, &url, options.audio_only)?;

    match report.status.code {
        Some(0) => info!("Finished: {}", report.invocation.template()),
        Some(code) => {
            warn!("{} exited with code {}", report.invocation.program(), code);
            std::process::exit(code);
        }
        None => warn!("{} was terminated", report.invocation.program()),
    }

    Ok(())
}
