//! # area_core - Surface Area Estimation Engine
//!
//! `area_core` computes net installable surface area (gypsum board,
//! wallpaper) for rooms built from walls, ceilings, door/window openings and
//! running-feet measurements, and renders the results as CSV and PDF reports.
//!
//! ## Design Philosophy
//!
//! - **Stateless engine**: area figures are derived on every call, never cached
//! - **Validated input**: measurement records cannot hold non-positive values
//! - **One formatting rule**: every printed area goes through [`format_area`]
//! - **JSON-friendly**: all records implement Serialize/Deserialize
//!
//! ## Quick Start
//!
//! ```rust
//! use area_core::measurements::{Opening, OpeningKind, Wall};
//! use area_core::project::Project;
//! use area_core::{calculate_room_area, format_area};
//!
//! let mut project = Project::new();
//! let room = project.add_named_room("Living Room");
//! project.add_wall(&room, Wall::new(8.0, 14.0, 2).unwrap()).unwrap();
//! project
//!     .room_mut(&room)
//!     .unwrap()
//!     .add_opening(Opening::new(OpeningKind::Window, 4.0, 5.0, 1).unwrap());
//!
//! let summary = calculate_room_area(project.room(&room).unwrap());
//! assert_eq!(format_area(summary.net_area), "204.00");
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The area engine
//! - [`measurements`] - Wall, opening and running-feet records plus input parsing
//! - [`room`] - Room aggregate
//! - [`project`] - Project container and details
//! - [`report`] - Engine output gathered for export
//! - [`export`] - CSV and PDF rendering, atomic file writes
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod export;
pub mod measurements;
pub mod project;
pub mod report;
pub mod room;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate_project_total, calculate_room_area, format_area, CalculationSummary};
pub use errors::{AreaError, AreaResult};
pub use export::{export_project, ExportFormat};
pub use project::{Project, ProjectDetails};
pub use room::Room;
