//! CSV export: one header row, one row per room, one trailing total row.

use crate::project::Project;
use crate::report::ProjectReport;

/// Column headers, in order.
pub const CSV_HEADERS: [&str; 6] = [
    "Room Name",
    "Wall Area (sq ft)",
    "Openings Area (sq ft)",
    "Ceiling Area (sq ft)",
    "Running Feet Area (sq ft)",
    "Net Area (sq ft)",
];

/// Label of the synthetic last row carrying the project total.
pub const TOTAL_ROW_LABEL: &str = "TOTAL PROJECT";

/// Render the project summary table as CSV text.
///
/// ```rust
/// use area_core::export::render_csv;
/// use area_core::measurements::Wall;
/// use area_core::project::Project;
///
/// let mut project = Project::new();
/// let id = project.add_named_room("Den");
/// project.add_wall(&id, Wall::new(8.0, 10.0, 1).unwrap()).unwrap();
///
/// let csv = render_csv(&project);
/// let lines: Vec<&str> = csv.lines().collect();
/// assert_eq!(lines[1], "\"Den\",80.00,0.00,0.00,0.00,80.00");
/// assert_eq!(lines[2], "TOTAL PROJECT,,,,,80.00");
/// ```
pub fn render_csv(project: &Project) -> String {
    render_report_csv(&ProjectReport::build(project))
}

/// Render an already-built report as CSV text.
pub fn render_report_csv(report: &ProjectReport) -> String {
    let mut lines = Vec::with_capacity(report.rooms.len() + 2);
    lines.push(CSV_HEADERS.join(","));

    for room in &report.rooms {
        let mut fields = vec![quote(&room.name)];
        fields.extend(room.summary_columns());
        lines.push(fields.join(","));
    }

    lines.push(format!("{},,,,,{}", TOTAL_ROW_LABEL, report.total_display()));

    tracing::debug!(rooms = report.rooms.len(), "csv rendered");
    lines.join("\n")
}

/// Wrap a field in double quotes, doubling any quote inside it.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
