//! Download job builder for quicker-ytdl
//!
//! Turns a drive root, a pasted URL and an audio-only flag into a single
//! blocking run of the external downloader:
//!
//! 1. [`destination`] makes sure the fixed-name working directory exists
//! 2. [`template`] picks the output naming scheme (single item or playlist)
//! 3. [`invocation`] assembles the ordered argument list
//! 4. [`runner`] launches the process
//!
//! [`Downloader`] ties the steps together.

pub mod config;
pub mod destination;
mod error;
pub mod invocation;
pub mod pipeline;
pub mod reveal;
pub mod runner;
pub mod template;

pub use config::{AppConfig, ConfigError, JobConfig};
pub use destination::{DriveRoot, WorkingDirectory};
pub use error::{JobError, Result};
pub use invocation::{DownloadRequest, DownloaderInvocation};
pub use pipeline::{Downloader, JobReport};
pub use runner::{probe_version, ProcessRunner, RunStatus, SystemRunner};
pub use template::OutputTemplate;
