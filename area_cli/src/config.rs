use std::env;
use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::Cli;

/// Output format for log lines on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => bail!("unknown log format '{}' (expected pretty, compact or json)", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory exports are written to when no path is given
    pub output_dir: PathBuf,
    pub log_format: LogFormat,
    pub verbose: bool,
    /// Run commands from this file instead of stdin
    pub script: Option<PathBuf>,
}

impl Settings {
    /// Command-line flags win, then `AREA_*` environment variables, then defaults.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let output_dir = cli
            .output_dir
            .clone()
            .or_else(|| env::var("AREA_OUTPUT_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        let log_format = match cli.log_format.as_deref() {
            Some(s) => LogFormat::parse(s)?,
            None => match env::var("AREA_LOG_FORMAT") {
                Ok(s) => LogFormat::parse(&s)?,
                Err(_) => LogFormat::Compact,
            },
        };

        Ok(Settings {
            output_dir,
            log_format,
            verbose: cli.verbose,
            script: cli.script.clone(),
        })
    }
}
