//! # Report Model
//!
//! Engine output for a whole project, computed once and pre-formatted with
//! [`format_area`]. The CSV and PDF exporters both render from a
//! [`ProjectReport`], so the numbers in the two files (and on screen) are the
//! same strings.

use serde::Serialize;

use crate::calculations::{calculate_project_total, calculate_room_area, format_area, format_dimension, CalculationSummary};
use crate::measurements::Measurement;
use crate::project::{Project, ProjectDetails};
use crate::room::Room;

/// Every figure needed to print a project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectReport {
    pub details: ProjectDetails,
    pub rooms: Vec<RoomReport>,
    pub total_area: f64,
}

impl ProjectReport {
    /// Run the engine over every room and gather the results.
    pub fn build(project: &Project) -> Self {
        ProjectReport {
            details: project.details.clone(),
            rooms: project.rooms.iter().map(RoomReport::build).collect(),
            total_area: calculate_project_total(&project.rooms),
        }
    }

    /// Project total formatted to two decimals
    pub fn total_display(&self) -> String {
        format_area(self.total_area)
    }
}

/// One room's summary plus its itemized line items.
#[derive(Debug, Clone, Serialize)]
pub struct RoomReport {
    pub name: String,
    pub summary: CalculationSummary,
    pub lines: Vec<LineItem>,
}

impl RoomReport {
    /// Line items are listed ceilings first, then walls, openings and running
    /// feet, each numbered within its own list.
    pub fn build(room: &Room) -> Self {
        let mut lines = Vec::with_capacity(room.entry_count());

        for (i, ceiling) in room.ceilings.iter().enumerate() {
            lines.push(LineItem::rectangle(
                format!("Ceiling {}", i + 1),
                LineKind::Ceiling,
                ceiling.height,
                ceiling.width,
                ceiling.quantity,
                ceiling.area(),
            ));
        }
        for (i, wall) in room.walls.iter().enumerate() {
            lines.push(LineItem::rectangle(
                format!("Wall {}", i + 1),
                LineKind::Wall,
                wall.height,
                wall.width,
                wall.quantity,
                wall.area(),
            ));
        }
        for (i, opening) in room.openings.iter().enumerate() {
            lines.push(LineItem::rectangle(
                format!("{} {}", opening.kind.display_name(), i + 1),
                LineKind::Opening,
                opening.height,
                opening.width,
                opening.quantity,
                opening.area(),
            ));
        }
        for (i, run) in room.running_feet.iter().enumerate() {
            lines.push(LineItem {
                label: format!("Running Feet {}", i + 1),
                kind: LineKind::RunningFeet,
                length: format_dimension(run.length),
                width: "-".to_string(),
                quantity: run.quantity,
                area: format_area(run.area()),
            });
        }

        RoomReport {
            name: room.name.clone(),
            summary: calculate_room_area(room),
            lines,
        }
    }

    /// The five summary figures as display strings, in column order
    /// (wall, openings, ceiling, running feet, net).
    pub fn summary_columns(&self) -> [String; 5] {
        [
            format_area(self.summary.total_wall_area),
            format_area(self.summary.total_openings_area),
            format_area(self.summary.ceiling_area),
            format_area(self.summary.running_feet_area),
            format_area(self.summary.net_area),
        ]
    }
}

/// What a line item contributes to the room total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineKind {
    Ceiling,
    Wall,
    Opening,
    RunningFeet,
}

impl LineKind {
    /// Label for the report's "Type" column
    pub fn display_name(&self) -> &'static str {
        match self {
            LineKind::Ceiling => "Ceiling",
            LineKind::Wall => "Wall",
            LineKind::Opening => "Opening (Deducted)",
            LineKind::RunningFeet => "Running Feet",
        }
    }
}

/// A single measurement as printed in the detailed breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub label: String,
    pub kind: LineKind,
    /// Height, or length for running feet
    pub length: String,
    /// Width, or "-" for running feet
    pub width: String,
    pub quantity: u32,
    /// Area formatted to two decimals
    pub area: String,
}

impl LineItem {
    fn rectangle(label: String, kind: LineKind, height: f64, width: f64, quantity: u32, area: f64) -> Self {
        LineItem {
            label,
            kind,
            length: format_dimension(height),
            width: format_dimension(width),
            quantity,
            area: format_area(area),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurements::{Opening, OpeningKind, RunningFeet, Wall};

    fn sample_project() -> Project {
        let mut project = Project::new();
        let id = project.add_named_room("Office");
        project.add_wall(&id, Wall::new(8.0, 12.0, 1).unwrap()).unwrap();
        let room = project.room_mut(&id).unwrap();
        room.add_opening(Opening::new(OpeningKind::Door, 7.0, 3.0, 1).unwrap());
        room.add_opening(Opening::new(OpeningKind::Window, 4.0, 3.5, 2).unwrap());
        room.add_ceiling(Wall::new(10.0, 10.0, 1).unwrap());
        room.add_running_feet(RunningFeet::new(5.0, 2).unwrap());
        project
    }

    #[test]
    fn test_report_matches_engine() {
        let project = sample_project();
        let report = ProjectReport::build(&project);

        assert_eq!(report.rooms.len(), 1);
        assert_eq!(report.rooms[0].summary, calculate_room_area(&project.rooms[0]));
        assert_eq!(report.total_area, project.total_area());
        assert_eq!(report.total_display(), format_area(project.total_area()));
    }

    #[test]
    fn test_line_item_order_and_labels() {
        let report = ProjectReport::build(&sample_project());
        let labels: Vec<&str> = report.rooms[0].lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Ceiling 1", "Wall 1", "Door 1", "Window 2", "Running Feet 1"]
        );
    }

    #[test]
    fn test_line_item_values() {
        let report = ProjectReport::build(&sample_project());
        let lines = &report.rooms[0].lines;

        let window = &lines[3];
        assert_eq!(window.kind, LineKind::Opening);
        assert_eq!(window.length, "4");
        assert_eq!(window.width, "3.5");
        assert_eq!(window.quantity, 2);
        assert_eq!(window.area, "28.00");

        let run = &lines[4];
        assert_eq!(run.width, "-");
        assert_eq!(run.area, "10.00");
    }

    #[test]
    fn test_summary_columns() {
        let report = ProjectReport::build(&sample_project());
        assert_eq!(
            report.rooms[0].summary_columns(),
            [
                "96.00".to_string(),
                "49.00".to_string(),
                "100.00".to_string(),
                "10.00".to_string(),
                "157.00".to_string(),
            ]
        );
    }
}
