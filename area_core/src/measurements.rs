//! # Measurement Records
//!
//! The itemized entries a room is built from. Every entry is an independent
//! rectangle (walls, ceilings, openings) or linear run (running feet); no
//! geometry is inferred between them. All dimensions are in feet.
//!
//! This module is also the input layer: constructors, partial updates and the
//! string parsers all reject non-positive dimensions and quantities below 1,
//! so a record that exists has already been validated and the area engine
//! can trust it completely.
//!
//! ## Example
//!
//! ```rust
//! use area_core::measurements::{Measurement, Opening, OpeningKind, Wall};
//!
//! let wall = Wall::new(8.0, 12.0, 2).unwrap();
//! assert_eq!(wall.area(), 192.0);
//!
//! let door = Opening::new(OpeningKind::Door, 7.0, 3.0, 1).unwrap();
//! assert_eq!(door.area(), 21.0);
//!
//! // Non-positive dimensions never become records
//! assert!(Wall::new(0.0, 12.0, 1).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AreaError, AreaResult};

/// Quantity used when none (or a non-numeric one) is given.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Common behavior of every measurement entry.
pub trait Measurement {
    /// Identifier assigned at creation, stable until deletion
    fn id(&self) -> Uuid;

    /// Area contribution in square feet (always non-negative)
    fn area(&self) -> f64;
}

// ============================================================================
// Wall / Ceiling
// ============================================================================

/// One or more identical rectangular wall segments.
///
/// ## JSON Example
///
/// ```json
/// { "id": "7c1f...", "height": 8.0, "width": 12.0, "quantity": 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub id: Uuid,
    /// Height in feet
    pub height: f64,
    /// Width in feet
    pub width: f64,
    /// Number of identical segments
    pub quantity: u32,
}

/// Ceilings share the wall shape: a rectangle repeated `quantity` times.
pub type Ceiling = Wall;

impl Wall {
    /// Create a validated wall entry with a fresh id.
    pub fn new(height: f64, width: f64, quantity: u32) -> AreaResult<Self> {
        Ok(Wall {
            id: Uuid::new_v4(),
            height: validate_dimension("height", height)?,
            width: validate_dimension("width", width)?,
            quantity: validate_quantity(quantity)?,
        })
    }

    /// Apply a partial update. The entry is left untouched if any field is rejected.
    pub fn apply(&mut self, update: &WallUpdate) -> AreaResult<()> {
        let height = match update.height {
            Some(h) => validate_dimension("height", h)?,
            None => self.height,
        };
        let width = match update.width {
            Some(w) => validate_dimension("width", w)?,
            None => self.width,
        };
        let quantity = match update.quantity {
            Some(q) => validate_quantity(q)?,
            None => self.quantity,
        };

        self.height = height;
        self.width = width;
        self.quantity = quantity;
        Ok(())
    }
}

impl Measurement for Wall {
    fn id(&self) -> Uuid {
        self.id
    }

    fn area(&self) -> f64 {
        self.height * self.width * f64::from(self.quantity)
    }
}

/// Partial update for a wall or ceiling entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallUpdate {
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub quantity: Option<u32>,
}

// ============================================================================
// Openings
// ============================================================================

/// Door or window. The kind only changes how an opening is labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    /// Capitalized label used in reports ("Door", "Window")
    pub fn display_name(&self) -> &'static str {
        match self {
            OpeningKind::Door => "Door",
            OpeningKind::Window => "Window",
        }
    }
}

impl fmt::Display for OpeningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for OpeningKind {
    type Err = AreaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "door" => Ok(OpeningKind::Door),
            "window" => Ok(OpeningKind::Window),
            _ => Err(AreaError::invalid_input(
                "type",
                s,
                "Opening type must be 'door' or 'window'",
            )),
        }
    }
}

/// A door or window whose area is deducted from the wall area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opening {
    pub id: Uuid,
    pub height: f64,
    pub width: f64,
    #[serde(rename = "type")]
    pub kind: OpeningKind,
    pub quantity: u32,
}

impl Opening {
    /// Create a validated opening entry with a fresh id.
    pub fn new(kind: OpeningKind, height: f64, width: f64, quantity: u32) -> AreaResult<Self> {
        Ok(Opening {
            id: Uuid::new_v4(),
            height: validate_dimension("height", height)?,
            width: validate_dimension("width", width)?,
            kind,
            quantity: validate_quantity(quantity)?,
        })
    }

    /// Apply a partial update. The entry is left untouched if any field is rejected.
    pub fn apply(&mut self, update: &OpeningUpdate) -> AreaResult<()> {
        let height = match update.height {
            Some(h) => validate_dimension("height", h)?,
            None => self.height,
        };
        let width = match update.width {
            Some(w) => validate_dimension("width", w)?,
            None => self.width,
        };
        let quantity = match update.quantity {
            Some(q) => validate_quantity(q)?,
            None => self.quantity,
        };

        self.height = height;
        self.width = width;
        self.quantity = quantity;
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        Ok(())
    }
}

impl Measurement for Opening {
    fn id(&self) -> Uuid {
        self.id
    }

    fn area(&self) -> f64 {
        self.height * self.width * f64::from(self.quantity)
    }
}

/// Partial update for an opening entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpeningUpdate {
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub kind: Option<OpeningKind>,
    pub quantity: Option<u32>,
}

// ============================================================================
// Running Feet
// ============================================================================

/// A linear run (trim, bead, ...) billed by the foot and folded into the area total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningFeet {
    pub id: Uuid,
    /// Length in feet
    pub length: f64,
    pub quantity: u32,
}

impl RunningFeet {
    /// Create a validated running-feet entry with a fresh id.
    pub fn new(length: f64, quantity: u32) -> AreaResult<Self> {
        Ok(RunningFeet {
            id: Uuid::new_v4(),
            length: validate_dimension("length", length)?,
            quantity: validate_quantity(quantity)?,
        })
    }

    /// Apply a partial update. The entry is left untouched if any field is rejected.
    pub fn apply(&mut self, update: &RunningFeetUpdate) -> AreaResult<()> {
        let length = match update.length {
            Some(l) => validate_dimension("length", l)?,
            None => self.length,
        };
        let quantity = match update.quantity {
            Some(q) => validate_quantity(q)?,
            None => self.quantity,
        };

        self.length = length;
        self.quantity = quantity;
        Ok(())
    }
}

impl Measurement for RunningFeet {
    fn id(&self) -> Uuid {
        self.id
    }

    fn area(&self) -> f64 {
        self.length * f64::from(self.quantity)
    }
}

/// Partial update for a running-feet entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningFeetUpdate {
    pub length: Option<f64>,
    pub quantity: Option<u32>,
}

// ============================================================================
// Validation and Parsing
// ============================================================================

/// Accept a dimension only if it is finite and strictly positive.
pub fn validate_dimension(field: &str, value: f64) -> AreaResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        tracing::warn!(field, value, "rejected dimension");
        return Err(AreaError::invalid_input(
            field,
            value.to_string(),
            "Dimension must be a positive number of feet",
        ));
    }
    Ok(value)
}

/// Accept a quantity only if it is at least 1.
pub fn validate_quantity(quantity: u32) -> AreaResult<u32> {
    if quantity < 1 {
        tracing::warn!(quantity, "rejected quantity");
        return Err(AreaError::invalid_input(
            "quantity",
            quantity.to_string(),
            "Quantity must be at least 1",
        ));
    }
    Ok(quantity)
}

/// Parse a user-entered dimension in feet.
///
/// ```rust
/// use area_core::measurements::parse_dimension;
///
/// assert_eq!(parse_dimension("height", " 8.5 ").unwrap(), 8.5);
/// assert!(parse_dimension("height", "0").is_err());
/// assert!(parse_dimension("height", "tall").is_err());
/// ```
pub fn parse_dimension(field: &str, text: &str) -> AreaResult<f64> {
    let value: f64 = text.trim().parse().map_err(|_| {
        AreaError::invalid_input(field, text, "Dimension must be a number of feet")
    })?;
    validate_dimension(field, value)
}

/// Parse a user-entered quantity.
///
/// Only the leading integer is read (`"2.7"` is 2). Blank, non-numeric and
/// zero input fall back to [`DEFAULT_QUANTITY`]; negative input is rejected.
///
/// ```rust
/// use area_core::measurements::parse_quantity;
///
/// assert_eq!(parse_quantity("3").unwrap(), 3);
/// assert_eq!(parse_quantity("").unwrap(), 1);
/// assert_eq!(parse_quantity("lots").unwrap(), 1);
/// assert!(parse_quantity("-2").is_err());
/// ```
pub fn parse_quantity(text: &str) -> AreaResult<u32> {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: &str = {
        let end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        &unsigned[..end]
    };

    if digits.is_empty() {
        return Ok(DEFAULT_QUANTITY);
    }

    let value: u32 = digits.parse().map_err(|_| {
        AreaError::invalid_input("quantity", text, "Quantity is too large")
    })?;

    match (negative, value) {
        (_, 0) => Ok(DEFAULT_QUANTITY),
        (true, _) => {
            tracing::warn!(input = text, "rejected negative quantity");
            Err(AreaError::invalid_input(
                "quantity",
                text,
                "Quantity must be at least 1",
            ))
        }
        (false, q) => Ok(q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_entry_areas() {
        let wall = Wall::new(8.0, 12.0, 1).unwrap();
        assert_eq!(wall.area(), 96.0);

        let ceiling: Ceiling = Wall::new(10.0, 10.0, 3).unwrap();
        assert_eq!(ceiling.area(), 300.0);

        let window = Opening::new(OpeningKind::Window, 4.0, 3.0, 2).unwrap();
        assert_eq!(window.area(), 24.0);

        let trim = RunningFeet::new(5.0, 2).unwrap();
        assert_eq!(trim.area(), 10.0);
    }

    #[test]
    fn test_door_and_window_share_arithmetic() {
        let door = Opening::new(OpeningKind::Door, 7.0, 3.0, 2).unwrap();
        let window = Opening::new(OpeningKind::Window, 7.0, 3.0, 2).unwrap();
        assert_eq!(door.area(), window.area());
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        assert!(Wall::new(0.0, 12.0, 1).is_err());
        assert!(Wall::new(8.0, -1.0, 1).is_err());
        assert!(Wall::new(f64::NAN, 12.0, 1).is_err());
        assert!(Opening::new(OpeningKind::Door, 7.0, 0.0, 1).is_err());
        assert!(RunningFeet::new(f64::INFINITY, 1).is_err());
    }

    #[test]
    fn test_rejects_zero_quantity() {
        let err = Wall::new(8.0, 12.0, 0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Wall::new(8.0, 12.0, 1).unwrap();
        let b = Wall::new(8.0, 12.0, 1).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_update_is_all_or_nothing() {
        let mut wall = Wall::new(8.0, 12.0, 1).unwrap();
        let bad = WallUpdate {
            height: Some(9.0),
            width: Some(0.0),
            quantity: None,
        };
        assert!(wall.apply(&bad).is_err());
        assert_eq!(wall.height, 8.0);
        assert_eq!(wall.width, 12.0);

        let good = WallUpdate {
            quantity: Some(4),
            ..Default::default()
        };
        wall.apply(&good).unwrap();
        assert_eq!(wall.quantity, 4);
        assert_eq!(wall.area(), 384.0);
    }

    #[test]
    fn test_opening_update_changes_kind() {
        let mut opening = Opening::new(OpeningKind::Door, 7.0, 3.0, 1).unwrap();
        opening
            .apply(&OpeningUpdate {
                kind: Some(OpeningKind::Window),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(opening.kind, OpeningKind::Window);
        assert_eq!(opening.area(), 21.0);
    }

    #[test]
    fn test_parse_quantity_rules() {
        assert_eq!(parse_quantity("2").unwrap(), 2);
        assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
        assert_eq!(parse_quantity("2.7").unwrap(), 2);
        assert_eq!(parse_quantity("+3").unwrap(), 3);
        assert_eq!(parse_quantity("").unwrap(), 1);
        assert_eq!(parse_quantity("abc").unwrap(), 1);
        assert_eq!(parse_quantity("0").unwrap(), 1);
        assert!(parse_quantity("-1").is_err());
        assert!(parse_quantity("99999999999").is_err());
    }

    #[test]
    fn test_parse_dimension_rules() {
        assert_eq!(parse_dimension("width", "12").unwrap(), 12.0);
        assert_eq!(parse_dimension("width", "0.5").unwrap(), 0.5);
        assert!(parse_dimension("width", "").is_err());
        assert!(parse_dimension("width", "-3").is_err());
        assert!(parse_dimension("width", "inf").is_err());
        assert!(parse_dimension("width", "NaN").is_err());
    }

    #[test]
    fn test_opening_kind_parsing() {
        assert_eq!("door".parse::<OpeningKind>().unwrap(), OpeningKind::Door);
        assert_eq!("Window".parse::<OpeningKind>().unwrap(), OpeningKind::Window);
        assert!("skylight".parse::<OpeningKind>().is_err());
    }

    #[test]
    fn test_opening_serializes_kind_as_type() {
        let opening = Opening::new(OpeningKind::Window, 4.0, 3.0, 1).unwrap();
        let json = serde_json::to_string(&opening).unwrap();
        assert!(json.contains("\"type\":\"window\""));

        let roundtrip: Opening = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, opening);
    }

    #[test]
    fn test_rejected_input_is_logged() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert!(parse_dimension("width", "-3").is_err());
            assert!(validate_quantity(0).is_err());
            assert!(parse_quantity("-2").is_err());
            assert_eq!(parse_quantity("4").unwrap(), 4);
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("rejected dimension"));
        assert!(output.contains("rejected quantity"));
        assert!(output.contains("rejected negative quantity"));
        assert_eq!(output.lines().count(), 3);
    }
}
