//! # Area CLI
//!
//! Line-oriented shell for building a room-by-room surface area estimate
//! and exporting it as CSV or PDF.
//!
//! Commands are read from stdin with an `area>` prompt, or from a file with
//! `--script`. Type `help` for the command list.

mod commands;
mod config;
mod logging;
mod shell;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::config::Settings;
use crate::shell::{Outcome, Shell};

const PROMPT: &str = "area> ";

#[derive(Parser, Debug)]
#[command(name = "area_cli", version, about = "Wall, ceiling and running-feet area estimator")]
pub struct Cli {
    /// Run commands from a file instead of reading stdin
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Directory exports are written to [env: AREA_OUTPUT_DIR]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Log format: pretty, compact or json [env: AREA_LOG_FORMAT]
    #[arg(long)]
    pub log_format: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(&cli)?;
    logging::init_logging(&settings);

    let script = settings.script.clone();
    let mut shell = Shell::new(settings);

    match script {
        Some(path) => run_script(&mut shell, &path),
        None => run_interactive(&mut shell),
    }
}

fn run_script(shell: &mut Shell, path: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("failed to open script {}", path.display()))?;
    tracing::info!(script = %path.display(), "running script");
    run_lines(shell, BufReader::new(file), &path.display().to_string())
}

/// Run every line of a script. Blank lines and `#` comments are skipped;
/// failed commands are reported and the run continues. Fails at the end if
/// any command failed.
fn run_lines<R: BufRead>(shell: &mut Shell, reader: R, source: &str) -> Result<()> {
    let mut failures = 0usize;
    for (number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {}", source))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match shell.execute_line(trimmed) {
            Ok(Outcome::Continue(text)) => print_output(&text),
            Ok(Outcome::Quit) => break,
            Err(e) => {
                failures += 1;
                eprintln!("{}:{}: {:#}", source, number + 1, e);
            }
        }
    }

    if failures > 0 {
        bail!("{} command(s) failed", failures);
    }
    Ok(())
}

fn run_interactive(shell: &mut Shell) -> Result<()> {
    println!("Surface Area Estimator - type `help` for commands, `quit` to leave");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", PROMPT);
        io::stdout().flush().context("failed to flush stdout")?;

        let line = match lines.next() {
            Some(line) => line.context("failed to read stdin")?,
            None => break,
        };

        match shell.execute_line(&line) {
            Ok(Outcome::Continue(text)) => print_output(&text),
            Ok(Outcome::Quit) => break,
            Err(e) => eprintln!("error: {:#}", e),
        }
    }
    Ok(())
}

fn print_output(text: &str) {
    if !text.is_empty() {
        println!("{}", text.trim_end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;
    use std::io::Cursor;

    fn shell() -> Shell {
        Shell::new(Settings {
            output_dir: std::env::temp_dir(),
            log_format: LogFormat::Compact,
            verbose: false,
            script: None,
        })
    }

    #[test]
    fn test_script_skips_blank_lines_and_comments() {
        let mut sh = shell();
        let script = "# kitchen takeoff\n\nroom add Kitchen\n   \n  # walls\nwall add 1 12 --height 8\n";

        run_lines(&mut sh, Cursor::new(script), "kitchen.area").unwrap();

        assert_eq!(sh.project.room_count(), 1);
        assert_eq!(sh.project.rooms[0].walls.len(), 1);
        assert_eq!(sh.project.total_area(), 96.0);
    }

    #[test]
    fn test_script_continues_after_failed_command() {
        let mut sh = shell();
        let script = "room add\nwall add 1 -4 --height 8\nfeet add 9 5\nfeet add 1 5\n";

        let err = run_lines(&mut sh, Cursor::new(script), "bad.area").unwrap_err();

        assert_eq!(err.to_string(), "2 command(s) failed");
        assert!(sh.project.rooms[0].walls.is_empty());
        assert_eq!(sh.project.rooms[0].running_feet.len(), 1);
    }

    #[test]
    fn test_script_stops_at_quit() {
        let mut sh = shell();
        let script = "room add\nquit\nroom add\nwall add 5 1\n";

        run_lines(&mut sh, Cursor::new(script), "short.area").unwrap();

        assert_eq!(sh.project.room_count(), 1);
    }

    #[test]
    fn test_missing_script_file() {
        let mut sh = shell();
        let path = std::env::temp_dir().join("area_cli_no_such_script.area");
        let err = run_script(&mut sh, &path).unwrap_err();
        assert!(err.to_string().starts_with("failed to open script"));
    }
}
