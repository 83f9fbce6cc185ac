//! Downloader command line assembly
//!
//! Produces `<executable> -ci [-f <format>] -o <template> <url>`. Flag/value
//! pairs stay adjacent and the format selector always precedes the output
//! template.

use std::fmt;
use std::path::Path;

use crate::config::JobConfig;
use crate::destination::WorkingDirectory;
use crate::template::OutputTemplate;

/// Continue partially downloaded files, ignore per-item errors
const CONTINUE_IGNORE_ERRORS: &str = "-ci";
const FORMAT_FLAG: &str = "-f";
const OUTPUT_FLAG: &str = "-o";

/// One user action's worth of input
#[derive(Debug, Clone, Copy)]
pub struct DownloadRequest<'a> {
    pub directory: &'a WorkingDirectory,
    pub url: &'a str,
    pub audio_only: bool,
}

impl<'a> DownloadRequest<'a> {
    pub fn new(directory: &'a WorkingDirectory, url: &'a str, audio_only: bool) -> Self {
        Self {
            directory,
            url,
            audio_only,
        }
    }
}

/// Ordered command tokens, program first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloaderInvocation {
    program: String,
    args: Vec<String>,
    template: OutputTemplate,
}

impl DownloaderInvocation {
    pub fn from_request(request: &DownloadRequest<'_>, config: &JobConfig) -> Self {
        Self::assemble(
            request.directory.path(),
            request.url,
            request.audio_only,
            config,
        )
    }

    /// Build the invocation for an already-resolved directory path.
    pub fn assemble(directory: &Path, url: &str, audio_only: bool, config: &JobConfig) -> Self {
        let template = OutputTemplate::for_url(directory, url, config);

        let mut args = vec![CONTINUE_IGNORE_ERRORS.to_string()];
        if audio_only {
            args.push(FORMAT_FLAG.to_string());
            args.push(config.audio_format_id.clone());
        }
        args.push(OUTPUT_FLAG.to_string());
        args.push(template.as_str().to_string());
        args.push(url.to_string());

        Self {
            program: config.executable.clone(),
            args,
            template,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn template(&self) -> &OutputTemplate {
        &self.template
    }

    /// Program followed by its arguments
    pub fn tokens(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for DownloaderInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.tokens())
    }
}
