//! # Export
//!
//! Renders a project to a spreadsheet-friendly CSV table or a printable PDF
//! report, and writes the result to disk.
//!
//! Both formats are built from one [`ProjectReport`](crate::report::ProjectReport),
//! so their numbers always agree with each other and with the engine.
//!
//! ## Example
//!
//! ```rust,no_run
//! use area_core::export::{export_project, ExportFormat};
//! use area_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new();
//! let written = export_project(&project, ExportFormat::Csv, Path::new("out"))?;
//! println!("wrote {}", written.display());
//! # Ok::<(), area_core::errors::AreaError>(())
//! ```

pub mod csv;
pub mod pdf;

use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{AreaError, AreaResult};
use crate::project::{Project, ProjectDetails};

pub use self::csv::render_csv;
pub use self::pdf::render_project_pdf;

/// File name used when the project has no name.
pub const DEFAULT_FILE_STEM: &str = "wall-area-calculation";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Pdf => "PDF",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = AreaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(AreaError::invalid_input("format", s, "Export format must be 'csv' or 'pdf'")),
        }
    }
}

/// Default file name for an export.
///
/// Every character of the project name that is not an ASCII letter or digit
/// becomes `_`.
///
/// ```rust
/// use area_core::export::{export_file_name, ExportFormat};
/// use area_core::project::ProjectDetails;
///
/// let mut details = ProjectDetails::default();
/// assert_eq!(export_file_name(&details, ExportFormat::Pdf), "wall-area-calculation.pdf");
///
/// details.project_name = "Smith Remodel #2".to_string();
/// assert_eq!(export_file_name(&details, ExportFormat::Csv), "Smith_Remodel__2_calculation.csv");
/// ```
pub fn export_file_name(details: &ProjectDetails, format: ExportFormat) -> String {
    if details.project_name.is_empty() {
        return format!("{}.{}", DEFAULT_FILE_STEM, format.extension());
    }

    let stem: String = details
        .project_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_calculation.{}", stem, format.extension())
}

/// Render a project in the requested format.
pub fn render(project: &Project, format: ExportFormat) -> AreaResult<Vec<u8>> {
    match format {
        ExportFormat::Csv => Ok(render_csv(project).into_bytes()),
        ExportFormat::Pdf => render_project_pdf(project),
    }
}

/// Render a project and write it into `dir` under its default file name.
///
/// Returns the path written.
pub fn export_project(project: &Project, format: ExportFormat, dir: &Path) -> AreaResult<PathBuf> {
    let path = dir.join(export_file_name(&project.details, format));
    let bytes = render(project, format)?;
    write_export(&path, &bytes)?;
    tracing::info!(
        format = %format,
        path = %path.display(),
        rooms = project.room_count(),
        bytes = bytes.len(),
        "project exported"
    );
    Ok(path)
}

/// Write export bytes with atomic semantics.
///
/// 1. Write to a sibling `.tmp` file
/// 2. Sync to disk
/// 3. Rename over the final path
///
/// An interrupted export never leaves a truncated report behind.
pub fn write_export(path: &Path, bytes: &[u8]) -> AreaResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        AreaError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        AreaError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        AreaError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        AreaError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp_path = path.to_path_buf();
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    tmp_path.set_extension(extension);
    tmp_path
}
