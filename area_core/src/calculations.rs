//! # Area Calculations
//!
//! The area engine: pure functions turning a room's measurement lists into a
//! [`CalculationSummary`], and summaries into a project total.
//!
//! ```text
//! totalWallArea     = Σ walls       height × width × quantity
//! totalOpeningsArea = Σ openings    height × width × quantity
//! ceilingArea       = Σ ceilings    height × width × quantity
//! runningFeetArea   = Σ runningFeet length × quantity
//! netArea           = max(0, wall − openings + ceiling + runningFeet)
//! ```
//!
//! Nothing is cached. Every call recomputes from the room as it is now, so a
//! summary can never be stale. Inputs are trusted: the measurement
//! constructors have already rejected non-positive values.
//!
//! ## Example
//!
//! ```rust
//! use area_core::calculations::{calculate_room_area, format_area};
//! use area_core::measurements::{Opening, OpeningKind, RunningFeet, Wall};
//! use area_core::room::Room;
//!
//! let mut room = Room::new("Office");
//! room.add_wall(Wall::new(8.0, 12.0, 1).unwrap());
//! room.add_opening(Opening::new(OpeningKind::Door, 7.0, 3.0, 1).unwrap());
//! room.add_ceiling(Wall::new(10.0, 10.0, 1).unwrap());
//! room.add_running_feet(RunningFeet::new(5.0, 2).unwrap());
//!
//! let summary = calculate_room_area(&room);
//! assert_eq!(format_area(summary.net_area), "185.00");
//! ```

use serde::{Deserialize, Serialize};

use crate::measurements::Measurement;
use crate::room::Room;

/// Derived area figures for one room, in square feet.
///
/// ## JSON Example
///
/// ```json
/// {
///   "totalWallArea": 96.0,
///   "totalOpeningsArea": 21.0,
///   "ceilingArea": 100.0,
///   "runningFeetArea": 10.0,
///   "netArea": 185.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationSummary {
    pub total_wall_area: f64,
    pub total_openings_area: f64,
    pub ceiling_area: f64,
    pub running_feet_area: f64,
    /// Never negative
    pub net_area: f64,
}

/// Compute the area summary for a room.
///
/// Total over well-formed input: empty lists contribute zero, and the net
/// area is clamped at zero when openings exceed everything else.
pub fn calculate_room_area(room: &Room) -> CalculationSummary {
    let total_wall_area = sum_area(&room.walls);
    let total_openings_area = sum_area(&room.openings);
    let ceiling_area = sum_area(&room.ceilings);
    let running_feet_area = sum_area(&room.running_feet);

    let net_area =
        (total_wall_area - total_openings_area + ceiling_area + running_feet_area).max(0.0);

    CalculationSummary {
        total_wall_area,
        total_openings_area,
        ceiling_area,
        running_feet_area,
        net_area,
    }
}

/// Sum of every room's net area, folded left to right (0 for no rooms).
pub fn calculate_project_total(rooms: &[Room]) -> f64 {
    rooms
        .iter()
        .fold(0.0, |total, room| total + calculate_room_area(room).net_area)
}

/// Render an area with exactly two decimals, fixed-point, no separators.
///
/// This is the one formatting rule shared by the terminal, CSV and PDF output.
///
/// ```rust
/// use area_core::calculations::format_area;
///
/// assert_eq!(format_area(3.0), "3.00");
/// assert_eq!(format_area(1234.5), "1234.50");
/// ```
pub fn format_area(value: f64) -> String {
    format!("{:.2}", value)
}

/// Render a raw dimension as entered (`8`, `7.5`), for line items.
pub fn format_dimension(value: f64) -> String {
    format!("{}", value)
}

fn sum_area<T: Measurement>(entries: &[T]) -> f64 {
    entries.iter().fold(0.0, |sum, entry| sum + entry.area())
}
