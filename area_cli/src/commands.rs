//! Shell command grammar.
//!
//! Each input line is split into words and parsed with clap, so `help` and
//! `<command> --help` come for free. Dimensions and quantities stay strings
//! here; they are parsed by area_core's input rules when the command runs.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ShellCommand {
    /// Add, rename or remove a room
    Room {
        #[command(subcommand)]
        action: RoomAction,
    },

    /// List rooms with their net area
    Rooms,

    /// Add, update or remove walls
    Wall {
        #[command(subcommand)]
        action: WallAction,
    },

    /// Add, update or remove ceilings
    Ceiling {
        #[command(subcommand)]
        action: CeilingAction,
    },

    /// Add, update or remove doors and windows
    Opening {
        #[command(subcommand)]
        action: OpeningAction,
    },

    /// Add, update or remove running-feet measurements
    Feet {
        #[command(subcommand)]
        action: FeetAction,
    },

    /// Show or edit the report header (no flags: show)
    Details {
        #[arg(long)]
        project_name: Option<String>,
        #[arg(long)]
        client_name: Option<String>,
        #[arg(long)]
        client_address: Option<String>,
        #[arg(long)]
        contractor_name: Option<String>,
        #[arg(long)]
        contractor_phone: Option<String>,
    },

    /// Area summary for every room, or the breakdown of one room
    Show {
        /// Room number or name
        room: Option<String>,
    },

    /// Project net area
    Total,

    /// Print the project as JSON
    Json,

    /// Write a CSV or PDF report
    Export {
        /// csv or pdf
        format: String,
        /// File or directory (default: the output directory)
        path: Option<PathBuf>,
    },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum RoomAction {
    /// Add an empty room (default name "Room N")
    Add { name: Option<String> },
    /// Rename a room
    Rename { room: String, name: String },
    /// Remove a room and all of its measurements
    Remove { room: String },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum WallAction {
    /// Add a wall (height defaults to the first wall's height)
    Add {
        room: String,
        #[arg(allow_hyphen_values = true)]
        width: String,
        #[arg(long, allow_hyphen_values = true)]
        height: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        qty: Option<String>,
    },
    /// Change fields of wall N
    Update {
        room: String,
        index: usize,
        #[arg(long, allow_hyphen_values = true)]
        height: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        width: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        qty: Option<String>,
    },
    /// Remove wall N
    Remove { room: String, index: usize },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum CeilingAction {
    /// Add a ceiling section
    Add {
        room: String,
        #[arg(allow_hyphen_values = true)]
        height: String,
        #[arg(allow_hyphen_values = true)]
        width: String,
        #[arg(short, long, allow_hyphen_values = true)]
        qty: Option<String>,
    },
    /// Change fields of ceiling N
    Update {
        room: String,
        index: usize,
        #[arg(long, allow_hyphen_values = true)]
        height: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        width: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        qty: Option<String>,
    },
    /// Remove ceiling N
    Remove { room: String, index: usize },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum OpeningAction {
    /// Add a door or window
    Add {
        room: String,
        /// door or window
        kind: String,
        #[arg(allow_hyphen_values = true)]
        height: String,
        #[arg(allow_hyphen_values = true)]
        width: String,
        #[arg(short, long, allow_hyphen_values = true)]
        qty: Option<String>,
    },
    /// Change fields of opening N
    Update {
        room: String,
        index: usize,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        height: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        width: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        qty: Option<String>,
    },
    /// Remove opening N
    Remove { room: String, index: usize },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum FeetAction {
    /// Add a running-feet measurement
    Add {
        room: String,
        #[arg(allow_hyphen_values = true)]
        length: String,
        #[arg(short, long, allow_hyphen_values = true)]
        qty: Option<String>,
    },
    /// Change fields of running-feet entry N
    Update {
        room: String,
        index: usize,
        #[arg(long, allow_hyphen_values = true)]
        length: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        qty: Option<String>,
    },
    /// Remove running-feet entry N
    Remove { room: String, index: usize },
}

/// Split a command line into words.
///
/// Words are separated by whitespace; single or double quotes group words,
/// and a backslash inside double quotes escapes the next character.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => current.push(escaped),
                            None => bail!("unterminated quote"),
                        },
                        Some(other) => current.push(other),
                        None => bail!("unterminated quote"),
                    }
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(other) => current.push(other),
                        None => bail!("unterminated quote"),
                    }
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ShellCommand {
        ShellLine::try_parse_from(split_words(line).unwrap())
            .unwrap()
            .command
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("  room add  ").unwrap(), vec!["room", "add"]);
        assert_eq!(
            split_words("room rename 1 \"Master Bed\"").unwrap(),
            vec!["room", "rename", "1", "Master Bed"]
        );
        assert_eq!(
            split_words("room add 'Kid''s Room'").unwrap(),
            vec!["room", "add", "Kids Room"]
        );
        assert_eq!(split_words("room add \"a \\\"b\\\"\"").unwrap(), vec!["room", "add", "a \"b\""]);
        assert_eq!(split_words("room add \"\"").unwrap(), vec!["room", "add", ""]);
        assert!(split_words("room add \"oops").is_err());
    }

    #[test]
    fn test_parse_wall_add() {
        assert_eq!(
            parse("wall add Kitchen 12 --height 8 -q 2"),
            ShellCommand::Wall {
                action: WallAction::Add {
                    room: "Kitchen".to_string(),
                    width: "12".to_string(),
                    height: Some("8".to_string()),
                    qty: Some("2".to_string()),
                }
            }
        );
    }

    #[test]
    fn test_parse_negative_dimension_reaches_validation() {
        assert_eq!(
            parse("feet add 1 -5"),
            ShellCommand::Feet {
                action: FeetAction::Add {
                    room: "1".to_string(),
                    length: "-5".to_string(),
                    qty: None,
                }
            }
        );
    }

    #[test]
    fn test_parse_opening_add() {
        assert_eq!(
            parse("opening add 2 window 4 3.5"),
            ShellCommand::Opening {
                action: OpeningAction::Add {
                    room: "2".to_string(),
                    kind: "window".to_string(),
                    height: "4".to_string(),
                    width: "3.5".to_string(),
                    qty: None,
                }
            }
        );
    }

    #[test]
    fn test_parse_quit_alias() {
        assert_eq!(parse("exit"), ShellCommand::Quit);
        assert_eq!(parse("quit"), ShellCommand::Quit);
    }

    #[test]
    fn test_help_is_an_error_with_text() {
        let err = ShellLine::try_parse_from(["help"]).unwrap_err();
        assert!(err.to_string().contains("wall"));
    }

    #[test]
    fn test_unknown_command() {
        assert!(ShellLine::try_parse_from(["paint", "walls"]).is_err());
    }
}
