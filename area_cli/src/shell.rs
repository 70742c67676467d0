//! Interactive session: one `Project` owned by the shell, mutated by commands.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::{error::ErrorKind, Parser};
use uuid::Uuid;

use area_core::errors::AreaError;
use area_core::export::{self, ExportFormat};
use area_core::measurements::{
    parse_dimension, parse_quantity, Measurement, Opening, OpeningKind, OpeningUpdate, RunningFeet,
    RunningFeetUpdate, Wall, WallUpdate, DEFAULT_QUANTITY,
};
use area_core::report::RoomReport;
use area_core::room::{CEILINGS, OPENINGS, RUNNING_FEET, WALLS};
use area_core::{format_area, Project};

use crate::commands::{
    split_words, CeilingAction, FeetAction, OpeningAction, RoomAction, ShellCommand, ShellLine,
    WallAction,
};
use crate::config::Settings;

/// Result of running one input line.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Text to print (may be empty); keep reading
    Continue(String),
    Quit,
}

pub struct Shell {
    pub project: Project,
    settings: Settings,
}

impl Shell {
    pub fn new(settings: Settings) -> Self {
        Shell {
            project: Project::new(),
            settings,
        }
    }

    /// Parse and run a single command line.
    pub fn execute_line(&mut self, line: &str) -> Result<Outcome> {
        let words = split_words(line)?;
        if words.is_empty() {
            return Ok(Outcome::Continue(String::new()));
        }

        let parsed = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(err) => {
                return match err.kind() {
                    ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                        Ok(Outcome::Continue(err.render().to_string()))
                    }
                    _ => Err(anyhow!(err.render().to_string().trim_end().to_string())),
                };
            }
        };

        tracing::debug!(command = ?parsed.command, "executing");
        self.execute(parsed.command)
    }

    fn execute(&mut self, command: ShellCommand) -> Result<Outcome> {
        let output = match command {
            ShellCommand::Quit => return Ok(Outcome::Quit),
            ShellCommand::Room { action } => self.room(action)?,
            ShellCommand::Rooms => self.list_rooms(),
            ShellCommand::Wall { action } => self.wall(action)?,
            ShellCommand::Ceiling { action } => self.ceiling(action)?,
            ShellCommand::Opening { action } => self.opening(action)?,
            ShellCommand::Feet { action } => self.feet(action)?,
            ShellCommand::Details {
                project_name,
                client_name,
                client_address,
                contractor_name,
                contractor_phone,
            } => {
                let mut details = self.project.details.clone();
                let edits = [
                    (&mut details.project_name, project_name),
                    (&mut details.client_name, client_name),
                    (&mut details.client_address, client_address),
                    (&mut details.contractor_name, contractor_name),
                    (&mut details.contractor_phone, contractor_phone),
                ];
                let mut changed = false;
                for (field, value) in edits {
                    if let Some(value) = value {
                        *field = value.trim().to_string();
                        changed = true;
                    }
                }
                if changed {
                    self.project.set_details(details);
                }
                self.show_details()
            }
            ShellCommand::Show { room: None } => self.summary_table(),
            ShellCommand::Show { room: Some(room) } => {
                let id = self.resolve_room(&room)?;
                room_breakdown(&RoomReport::build(self.project.room(&id)?))
            }
            ShellCommand::Total => {
                format!("Total project area: {} sq ft", format_area(self.project.total_area()))
            }
            ShellCommand::Json => serde_json::to_string_pretty(&self.project)
                .context("failed to serialize project")?,
            ShellCommand::Export { format, path } => {
                let format: ExportFormat = format.parse()?;
                self.export(format, path.as_deref())?
            }
        };
        Ok(Outcome::Continue(output))
    }

    // ========================================================================
    // Rooms
    // ========================================================================

    fn room(&mut self, action: RoomAction) -> Result<String> {
        match action {
            RoomAction::Add { name } => {
                let id = match name {
                    Some(name) => self.project.add_named_room(&name),
                    None => self.project.add_room(),
                };
                let room = self.project.room(&id)?;
                Ok(format!("Added room {}: {}", self.project.room_count(), room.name))
            }
            RoomAction::Rename { room, name } => {
                let id = self.resolve_room(&room)?;
                let room = self.project.room_mut(&id)?;
                room.rename(&name)?;
                Ok(format!("Renamed room to {}", room.name))
            }
            RoomAction::Remove { room } => {
                let id = self.resolve_room(&room)?;
                let removed = self.project.remove_room(&id)?;
                Ok(format!(
                    "Removed room {} ({} measurements)",
                    removed.name,
                    removed.entry_count()
                ))
            }
        }
    }

    fn list_rooms(&self) -> String {
        if self.project.rooms.is_empty() {
            return "No rooms. Use `room add` to create one.".to_string();
        }
        let mut out = String::new();
        for (index, (room, summary)) in self.project.summaries().into_iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}. {:<24} {:>12} sq ft",
                index + 1,
                room.name,
                format_area(summary.net_area)
            );
        }
        out.trim_end().to_string()
    }

    /// Resolve a room argument: 1-based position first, then exact name.
    fn resolve_room(&self, arg: &str) -> Result<Uuid, AreaError> {
        let rooms = &self.project.rooms;
        if let Ok(position) = arg.trim().parse::<usize>() {
            if position >= 1 && position <= rooms.len() {
                return Ok(rooms[position - 1].id);
            }
        }
        rooms
            .iter()
            .find(|room| room.name == arg)
            .map(|room| room.id)
            .ok_or_else(|| AreaError::room_not_found(arg))
    }

    // ========================================================================
    // Measurements
    // ========================================================================

    fn wall(&mut self, action: WallAction) -> Result<String> {
        match action {
            WallAction::Add {
                room,
                width,
                height,
                qty,
            } => {
                let id = self.resolve_room(&room)?;
                let height = match height {
                    Some(h) => parse_dimension("height", &h)?,
                    None => self.project.default_wall_height().ok_or_else(|| {
                        AreaError::invalid_input(
                            "height",
                            "",
                            "No default wall height yet; pass --height for the first wall",
                        )
                    })?,
                };
                let wall = Wall::new(height, parse_dimension("width", &width)?, quantity(qty)?)?;
                let area = wall.area();
                self.project.add_wall(&id, wall)?;
                Ok(format!("Added wall ({} sq ft)", format_area(area)))
            }
            WallAction::Update {
                room,
                index,
                height,
                width,
                qty,
            } => {
                let id = self.resolve_room(&room)?;
                let update = WallUpdate {
                    height: optional_dimension("height", height)?,
                    width: optional_dimension("width", width)?,
                    quantity: optional_quantity(qty)?,
                };
                let room = self.project.room_mut(&id)?;
                let entry = entry_id(&room.walls, WALLS, index)?;
                room.update_wall(&entry, &update)?;
                Ok(format!("Updated wall {}", index))
            }
            WallAction::Remove { room, index } => {
                let id = self.resolve_room(&room)?;
                let room = self.project.room_mut(&id)?;
                let entry = entry_id(&room.walls, WALLS, index)?;
                room.remove_wall(&entry)?;
                Ok(format!("Removed wall {}", index))
            }
        }
    }

    fn ceiling(&mut self, action: CeilingAction) -> Result<String> {
        match action {
            CeilingAction::Add {
                room,
                height,
                width,
                qty,
            } => {
                let id = self.resolve_room(&room)?;
                let ceiling = Wall::new(
                    parse_dimension("height", &height)?,
                    parse_dimension("width", &width)?,
                    quantity(qty)?,
                )?;
                let area = ceiling.area();
                self.project.room_mut(&id)?.add_ceiling(ceiling);
                Ok(format!("Added ceiling ({} sq ft)", format_area(area)))
            }
            CeilingAction::Update {
                room,
                index,
                height,
                width,
                qty,
            } => {
                let id = self.resolve_room(&room)?;
                let update = WallUpdate {
                    height: optional_dimension("height", height)?,
                    width: optional_dimension("width", width)?,
                    quantity: optional_quantity(qty)?,
                };
                let room = self.project.room_mut(&id)?;
                let entry = entry_id(&room.ceilings, CEILINGS, index)?;
                room.update_ceiling(&entry, &update)?;
                Ok(format!("Updated ceiling {}", index))
            }
            CeilingAction::Remove { room, index } => {
                let id = self.resolve_room(&room)?;
                let room = self.project.room_mut(&id)?;
                let entry = entry_id(&room.ceilings, CEILINGS, index)?;
                room.remove_ceiling(&entry)?;
                Ok(format!("Removed ceiling {}", index))
            }
        }
    }

    fn opening(&mut self, action: OpeningAction) -> Result<String> {
        match action {
            OpeningAction::Add {
                room,
                kind,
                height,
                width,
                qty,
            } => {
                let id = self.resolve_room(&room)?;
                let kind: OpeningKind = kind.parse()?;
                let opening = Opening::new(
                    kind,
                    parse_dimension("height", &height)?,
                    parse_dimension("width", &width)?,
                    quantity(qty)?,
                )?;
                let area = opening.area();
                self.project.room_mut(&id)?.add_opening(opening);
                Ok(format!(
                    "Added {} ({} sq ft deducted)",
                    kind.display_name().to_lowercase(),
                    format_area(area)
                ))
            }
            OpeningAction::Update {
                room,
                index,
                kind,
                height,
                width,
                qty,
            } => {
                let id = self.resolve_room(&room)?;
                let update = OpeningUpdate {
                    height: optional_dimension("height", height)?,
                    width: optional_dimension("width", width)?,
                    kind: kind.map(|k| k.parse::<OpeningKind>()).transpose()?,
                    quantity: optional_quantity(qty)?,
                };
                let room = self.project.room_mut(&id)?;
                let entry = entry_id(&room.openings, OPENINGS, index)?;
                room.update_opening(&entry, &update)?;
                Ok(format!("Updated opening {}", index))
            }
            OpeningAction::Remove { room, index } => {
                let id = self.resolve_room(&room)?;
                let room = self.project.room_mut(&id)?;
                let entry = entry_id(&room.openings, OPENINGS, index)?;
                room.remove_opening(&entry)?;
                Ok(format!("Removed opening {}", index))
            }
        }
    }

    fn feet(&mut self, action: FeetAction) -> Result<String> {
        match action {
            FeetAction::Add { room, length, qty } => {
                let id = self.resolve_room(&room)?;
                let run = RunningFeet::new(parse_dimension("length", &length)?, quantity(qty)?)?;
                let area = run.area();
                self.project.room_mut(&id)?.add_running_feet(run);
                Ok(format!("Added running feet ({} sq ft)", format_area(area)))
            }
            FeetAction::Update {
                room,
                index,
                length,
                qty,
            } => {
                let id = self.resolve_room(&room)?;
                let update = RunningFeetUpdate {
                    length: optional_dimension("length", length)?,
                    quantity: optional_quantity(qty)?,
                };
                let room = self.project.room_mut(&id)?;
                let entry = entry_id(&room.running_feet, RUNNING_FEET, index)?;
                room.update_running_feet(&entry, &update)?;
                Ok(format!("Updated running feet {}", index))
            }
            FeetAction::Remove { room, index } => {
                let id = self.resolve_room(&room)?;
                let room = self.project.room_mut(&id)?;
                let entry = entry_id(&room.running_feet, RUNNING_FEET, index)?;
                room.remove_running_feet(&entry)?;
                Ok(format!("Removed running feet {}", index))
            }
        }
    }

    // ========================================================================
    // Output
    // ========================================================================

    fn show_details(&self) -> String {
        let details = &self.project.details;
        let mut out = String::new();
        let name = if details.project_name.is_empty() {
            "(unnamed project)"
        } else {
            details.project_name.as_str()
        };
        let _ = writeln!(out, "Project: {}", name);
        for (label, value) in details.labeled_fields() {
            let _ = writeln!(out, "{}: {}", label, value);
        }
        out.trim_end().to_string()
    }

    fn summary_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<20} {:>12} {:>12} {:>12} {:>12} {:>12}",
            "Room", "Walls", "Openings", "Ceiling", "Run. Feet", "Net"
        );
        for (room, _) in self.project.summaries() {
            let report = RoomReport::build(room);
            let [walls, openings, ceiling, feet, net] = report.summary_columns();
            let _ = writeln!(
                out,
                "{:<20} {:>12} {:>12} {:>12} {:>12} {:>12}",
                report.name, walls, openings, ceiling, feet, net
            );
        }
        let _ = write!(
            out,
            "{:<20} {:>64}",
            "PROJECT TOTAL",
            format!("{} sq ft", format_area(self.project.total_area()))
        );
        out
    }

    fn export(&self, format: ExportFormat, path: Option<&Path>) -> Result<String> {
        let written = match path {
            None => export::export_project(&self.project, format, &self.settings.output_dir)?,
            Some(dir) if dir.is_dir() => export::export_project(&self.project, format, dir)?,
            Some(file) => {
                let bytes = export::render(&self.project, format)?;
                export::write_export(file, &bytes)
                    .with_context(|| format!("failed to export {}", format))?;
                tracing::info!(format = %format, path = %file.display(), "project exported");
                file.to_path_buf()
            }
        };
        Ok(format!("Exported {} to {}", format, written.display()))
    }
}

fn room_breakdown(report: &RoomReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.name);
    if report.lines.is_empty() {
        let _ = writeln!(out, "  No measurements entered.");
    }
    for line in &report.lines {
        let _ = writeln!(
            out,
            "  {:<16} {:<20} {:>10} {:>10} {:>4} {:>12}",
            line.label,
            line.kind.display_name(),
            line.length,
            line.width,
            line.quantity,
            line.area
        );
    }
    let [walls, openings, ceiling, feet, net] = report.summary_columns();
    let _ = writeln!(out, "  Total wall area:      {} sq ft", walls);
    let _ = writeln!(out, "  Openings deducted:    {} sq ft", openings);
    let _ = writeln!(out, "  Ceiling area:         {} sq ft", ceiling);
    let _ = writeln!(out, "  Running feet area:    {} sq ft", feet);
    let _ = write!(out, "  Net area:             {} sq ft", net);
    out
}

/// Id of the `index`-th (1-based) entry of a list.
fn entry_id<T: Measurement>(entries: &[T], collection: &str, index: usize) -> Result<Uuid, AreaError> {
    index
        .checked_sub(1)
        .and_then(|i| entries.get(i))
        .map(|entry| entry.id())
        .ok_or_else(|| AreaError::entry_not_found(collection, index))
}

fn quantity(text: Option<String>) -> Result<u32, AreaError> {
    match text {
        Some(text) => parse_quantity(&text),
        None => Ok(DEFAULT_QUANTITY),
    }
}

fn optional_dimension(field: &str, text: Option<String>) -> Result<Option<f64>, AreaError> {
    text.map(|t| parse_dimension(field, &t)).transpose()
}

fn optional_quantity(text: Option<String>) -> Result<Option<u32>, AreaError> {
    text.map(|t| parse_quantity(&t)).transpose()
}
