//! # PDF Report
//!
//! Generates the printable area report using Typst.
//!
//! ## Architecture
//!
//! - The Typst document is assembled as a string from a [`ProjectReport`]
//! - All user text enters the document as Typst string literals, never as markup
//! - Compilation happens in-process against bundled fonts
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use area_core::export::pdf::render_project_pdf;
//! use area_core::measurements::Wall;
//! use area_core::project::Project;
//!
//! let mut project = Project::new();
//! let id = project.add_named_room("Kitchen");
//! project.add_wall(&id, Wall::new(8.0, 12.0, 4).unwrap()).unwrap();
//!
//! let pdf_bytes = render_project_pdf(&project).unwrap();
//! std::fs::write("kitchen.pdf", pdf_bytes).unwrap();
//! ```

use chrono::Utc;
use once_cell::sync::Lazy;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculations::format_area;
use crate::errors::{AreaError, AreaResult};
use crate::project::Project;
use crate::report::{ProjectReport, RoomReport};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// Bundled fonts, parsed once per process.
static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    let mut fonts = Vec::new();
    for font_bytes in typst_assets::fonts() {
        let buffer = Bytes::new(font_bytes.to_vec());
        for font in Font::iter(buffer) {
            fonts.push(font);
        }
    }
    tracing::debug!(count = fonts.len(), "typst fonts loaded");
    fonts
});

/// A minimal Typst world for compiling a single in-memory document.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: &'static [Font],
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts: &'static [Font] = FONTS.as_slice();
        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(FontBook::from_fonts(fonts)),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// Report Template
// ============================================================================

/// Page setup and helpers shared by every report.
const PREAMBLE: &str = r##"
#set page(
  paper: "us-letter",
  margin: (x: 0.75in, y: 0.75in),
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr),
      align(left)[#text(size: 8pt)[Generated {{DATE}}]],
      align(right)[#text(size: 8pt)[Page #counter(page).display()]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 10pt)

#let header_fill = rgb("#4682b4")
#let total_fill = rgb("#c8e6ff")
#let room_fill = rgb("#f0f0f0")
#let net_fill = rgb("#dcffdc")
#let hcell(body) = table.cell(fill: header_fill, text(fill: white, weight: "bold", body))
#let fcell(fill, body) = table.cell(fill: fill, strong(body))

#align(center)[
  #text(size: 20pt, weight: "bold")[Wall Surface Area Calculation Report]
]

#v(12pt)
"##;

// ============================================================================
// PDF Rendering Functions
// ============================================================================

/// Render a project to PDF.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(AreaError::RenderFailed)` - If Typst compilation or PDF export fails
pub fn render_project_pdf(project: &Project) -> AreaResult<Vec<u8>> {
    let report = ProjectReport::build(project);
    let date = Utc::now().format("%Y-%m-%d").to_string();
    let source = build_report_source(&report, &date);

    let world = PdfWorld::new(source);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        AreaError::render_failed("PDF", format!("Typst compilation failed: {}", error_msgs.join("; ")))
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        AreaError::render_failed("PDF", format!("PDF export failed: {}", error_msgs.join("; ")))
    })?;

    tracing::debug!(rooms = report.rooms.len(), bytes = pdf_bytes.len(), "pdf rendered");
    Ok(pdf_bytes)
}

/// Build the Typst markup for a report.
///
/// Every number in the output is one of the report's pre-formatted strings.
pub fn build_report_source(report: &ProjectReport, date: &str) -> String {
    let mut source = PREAMBLE.replace("{{DATE}}", date);

    source.push_str(&details_block(report, date));
    source.push_str(&summary_table(report));

    source.push_str("\n#v(16pt)\n\n== Detailed Measurements Breakdown\n");
    for room in &report.rooms {
        source.push_str(&room_section(room));
    }

    source.push_str(&format!(
        r##"
#v(16pt)
#align(right)[
  #block(fill: total_fill, inset: 10pt, radius: 4pt)[
    #text(size: 13pt, weight: "bold", {})
  ]
]
"##,
        typst_str(&format!("Project Total: {}", sq_ft(&report.total_display())))
    ));

    source
}

/// Project name, non-empty detail fields and the generation date.
fn details_block(report: &ProjectReport, date: &str) -> String {
    let mut block = String::new();
    let details = &report.details;

    if !details.project_name.trim().is_empty() {
        block.push_str(&format!(
            "#text(size: 14pt, weight: \"bold\", {})\n\n",
            typst_str(&format!("Project: {}", details.project_name))
        ));
    }
    for (label, value) in details.labeled_fields() {
        block.push_str(&format!(
            "#text(size: 11pt, {})\n\n",
            typst_str(&format!("{}: {}", label, value))
        ));
    }
    block.push_str(&format!(
        "#text(size: 11pt, {})\n\n#v(8pt)\n",
        typst_str(&format!("Generated on: {}", date))
    ));

    block
}

/// One row per room plus the project total row.
fn summary_table(report: &ProjectReport) -> String {
    let mut rows = Vec::with_capacity(report.rooms.len() + 1);
    for room in &report.rooms {
        let mut cells = vec![typst_str(&room.name)];
        cells.extend(room.summary_columns().iter().map(|v| typst_str(&sq_ft(v))));
        rows.push(format!("  {},", cells.join(", ")));
    }
    rows.push(format!(
        "  fcell(total_fill, \"PROJECT TOTAL\"), {}, fcell(total_fill, {}),",
        vec!["table.cell(fill: total_fill, [])"; 4].join(", "),
        typst_str(&sq_ft(&report.total_display()))
    ));

    format!(
        r##"
== Project Summary

#table(
  columns: (2fr, 1fr, 1fr, 1fr, 1fr, 1fr),
  inset: 5pt,
  stroke: 0.5pt + luma(200),
  align: (left, center, center, center, center, center),
  table.header(
    hcell("Room Name"), hcell("Wall Area"), hcell("Openings Area"),
    hcell("Ceiling Area"), hcell("Running Feet"), hcell("Net Total"),
  ),
{}
)
"##,
        rows.join("\n")
    )
}

/// Line items, room net total and the full summary for one room.
fn room_section(room: &RoomReport) -> String {
    let mut section = format!("\n#heading(level: 3, {})\n\n", typst_str(&room.name));

    if room.lines.is_empty() {
        section.push_str("#emph(\"No measurements entered.\")\n");
    } else {
        let mut rows = Vec::with_capacity(room.lines.len() + 1);
        for line in &room.lines {
            rows.push(format!(
                "  {}, {}, {}, {}, {}, {},",
                typst_str(&line.label),
                typst_str(&feet(&line.length)),
                typst_str(&feet(&line.width)),
                typst_str(&line.quantity.to_string()),
                typst_str(&sq_ft(&line.area)),
                typst_str(line.kind.display_name()),
            ));
        }
        rows.push(format!(
            "  fcell(net_fill, {}), {}, fcell(net_fill, {}), fcell(net_fill, \"Net Area\"),",
            typst_str(&format!("{} Total", room.name)),
            vec!["table.cell(fill: net_fill, [])"; 3].join(", "),
            typst_str(&sq_ft(&format_area(room.summary.net_area))),
        ));

        section.push_str(&format!(
            r##"#table(
  columns: (2fr, 1fr, 1fr, 0.8fr, 1.2fr, 1.4fr),
  inset: 4pt,
  stroke: 0.5pt + luma(200),
  align: (left, center, center, center, right, center),
  table.header(
    hcell("Item"), hcell("Height/Length"), hcell("Width"),
    hcell("Quantity"), hcell("Area"), hcell("Type"),
  ),
{}
)
"##,
            rows.join("\n")
        ));
    }

    let [wall, openings, ceiling, running_feet, net] = room.summary_columns();
    section.push_str(&format!(
        r##"
#block(fill: room_fill, inset: 8pt, radius: 3pt, width: 100%)[
  #table(
    columns: (auto, auto),
    stroke: none,
    inset: 3pt,
    "Wall Area:", {},
    "Openings Area (deducted):", {},
    "Ceiling Area:", {},
    "Running Feet Area:", {},
    strong("Net Area:"), strong({}),
  )
]
"##,
        typst_str(&sq_ft(&wall)),
        typst_str(&sq_ft(&openings)),
        typst_str(&sq_ft(&ceiling)),
        typst_str(&sq_ft(&running_feet)),
        typst_str(&sq_ft(&net)),
    ));

    section
}

fn sq_ft(value: &str) -> String {
    format!("{} sq ft", value)
}

fn feet(value: &str) -> String {
    if value == "-" {
        value.to_string()
    } else {
        format!("{} ft", value)
    }
}

/// Quote user text as a Typst string literal so it is never read as markup.
fn typst_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurements::{Opening, OpeningKind, RunningFeet, Wall};
    use crate::project::ProjectDetails;

    fn sample_project() -> Project {
        let mut project = Project::new();
        project.set_details(ProjectDetails {
            project_name: "Smith Remodel".to_string(),
            client_name: "Jane Smith".to_string(),
            contractor_phone: "555-0100".to_string(),
            ..Default::default()
        });
        for name in ["Office", "Studio"] {
            let id = project.add_named_room(name);
            project.add_wall(&id, Wall::new(8.0, 12.0, 1).unwrap()).unwrap();
            let room = project.room_mut(&id).unwrap();
            room.add_opening(Opening::new(OpeningKind::Door, 7.0, 3.0, 1).unwrap());
            room.add_ceiling(Wall::new(10.0, 10.0, 1).unwrap());
            room.add_running_feet(RunningFeet::new(5.0, 2).unwrap());
        }
        project
    }

    #[test]
    fn test_typst_str_escaping() {
        assert_eq!(typst_str("Office"), "\"Office\"");
        assert_eq!(typst_str("Say \"hi\""), "\"Say \\\"hi\\\"\"");
        assert_eq!(typst_str("a\\b"), "\"a\\\\b\"");
        assert_eq!(typst_str("#set *bold* [x]"), "\"#set *bold* [x]\"");
    }

    #[test]
    fn test_source_contains_engine_values() {
        let report = ProjectReport::build(&sample_project());
        let source = build_report_source(&report, "2026-01-15");

        assert!(source.contains("\"Office\", \"96.00 sq ft\", \"21.00 sq ft\", \"100.00 sq ft\", \"10.00 sq ft\", \"185.00 sq ft\","));
        assert!(source.contains("\"PROJECT TOTAL\""));
        assert!(source.contains("\"370.00 sq ft\""));
        assert!(source.contains("\"Project Total: 370.00 sq ft\""));
        assert!(source.contains("Generated 2026-01-15"));
    }

    #[test]
    fn test_source_lists_every_entry() {
        let report = ProjectReport::build(&sample_project());
        let source = build_report_source(&report, "2026-01-15");

        assert!(source.contains("\"Ceiling 1\", \"10 ft\", \"10 ft\", \"1\", \"100.00 sq ft\", \"Ceiling\","));
        assert!(source.contains("\"Wall 1\", \"8 ft\", \"12 ft\", \"1\", \"96.00 sq ft\", \"Wall\","));
        assert!(source.contains("\"Door 1\", \"7 ft\", \"3 ft\", \"1\", \"21.00 sq ft\", \"Opening (Deducted)\","));
        assert!(source.contains("\"Running Feet 1\", \"5 ft\", \"-\", \"2\", \"10.00 sq ft\", \"Running Feet\","));
        assert!(source.contains("\"Office Total\""));
        assert_eq!(source.matches("strong(\"185.00 sq ft\")").count(), 2);
    }

    #[test]
    fn test_source_includes_only_filled_details() {
        let report = ProjectReport::build(&sample_project());
        let source = build_report_source(&report, "2026-01-15");

        assert!(source.contains("\"Project: Smith Remodel\""));
        assert!(source.contains("\"Client: Jane Smith\""));
        assert!(source.contains("\"Phone: 555-0100\""));
        assert!(!source.contains("Address:"));
        assert!(!source.contains("Contractor:"));
    }

    #[test]
    fn test_empty_room_section() {
        let mut project = Project::new();
        project.add_named_room("Closet");
        let report = ProjectReport::build(&project);
        let source = build_report_source(&report, "2026-01-15");
        assert!(source.contains("No measurements entered."));
        assert!(source.contains("\"Project Total: 0.00 sq ft\""));
    }

    #[test]
    fn test_pdf_generation() {
        let pdf = render_project_pdf(&sample_project());
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }

    #[test]
    fn test_pdf_generation_with_markup_in_names() {
        let mut project = Project::new();
        project.details.project_name = "#let x = [*oops*]".to_string();
        let id = project.add_named_room("= Heading? \"quoted\" \\ back");
        project.add_wall(&id, Wall::new(8.0, 10.0, 1).unwrap()).unwrap();

        let pdf = render_project_pdf(&project);
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());
    }

    #[test]
    fn test_pdf_generation_empty_project() {
        let pdf = render_project_pdf(&Project::new());
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());
    }
}
