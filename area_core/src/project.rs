//! # Project Data Structures
//!
//! The `Project` struct is the caller-owned container for a takeoff session:
//! free-text project details, session defaults, and the ordered room list.
//! Nothing here is persisted between sessions; the struct serializes to JSON
//! only so it can be inspected.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (schema version, timestamps)
//! ├── details: ProjectDetails (project/client/contractor strings)
//! ├── settings: SessionSettings (inferred default wall height)
//! └── rooms: Vec<Room> (display and export order)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use area_core::measurements::Wall;
//! use area_core::project::Project;
//!
//! let mut project = Project::new();
//! let kitchen = project.add_room();
//! project.add_wall(&kitchen, Wall::new(8.0, 12.0, 2).unwrap()).unwrap();
//!
//! assert_eq!(project.rooms[0].name, "Room 1");
//! assert_eq!(project.total_area(), 192.0);
//! assert_eq!(project.default_wall_height(), Some(8.0));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{calculate_project_total, calculate_room_area, CalculationSummary};
use crate::errors::{AreaError, AreaResult};
use crate::measurements::Wall;
use crate::room::Room;

/// Current schema version of the serialized project
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root session container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Schema version and timestamps
    pub meta: ProjectMetadata,

    /// Report header fields
    pub details: ProjectDetails,

    /// Defaults inferred during the session
    pub settings: SessionSettings,

    /// Rooms in the order they were created
    pub rooms: Vec<Room>,
}

impl Project {
    /// Create an empty project.
    pub fn new() -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                created: now,
                modified: now,
            },
            details: ProjectDetails::default(),
            settings: SessionSettings::default(),
            rooms: Vec::new(),
        }
    }

    /// Add an empty room named `Room N` (N = room count after insertion).
    ///
    /// Returns the id assigned to the room.
    pub fn add_room(&mut self) -> Uuid {
        let name = format!("Room {}", self.rooms.len() + 1);
        self.push_room(Room::new(name))
    }

    /// Add an empty room with the given name (blank names fall back to `Room N`).
    pub fn add_named_room(&mut self, name: &str) -> Uuid {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return self.add_room();
        }
        self.push_room(Room::new(trimmed))
    }

    fn push_room(&mut self, room: Room) -> Uuid {
        let id = room.id;
        tracing::debug!(room_id = %id, name = %room.name, "room added");
        self.rooms.push(room);
        self.touch();
        id
    }

    /// Remove a room and everything measured in it.
    pub fn remove_room(&mut self, id: &Uuid) -> AreaResult<Room> {
        let index = self
            .rooms
            .iter()
            .position(|room| room.id == *id)
            .ok_or_else(|| AreaError::room_not_found(id))?;
        let room = self.rooms.remove(index);
        tracing::debug!(room_id = %id, entries = room.entry_count(), "room removed");
        self.touch();
        Ok(room)
    }

    /// Get a room by id.
    pub fn room(&self, id: &Uuid) -> AreaResult<&Room> {
        self.rooms
            .iter()
            .find(|room| room.id == *id)
            .ok_or_else(|| AreaError::room_not_found(id))
    }

    /// Get a mutable reference to a room by id.
    ///
    /// Note: like any other mutation, this marks the project as modified.
    pub fn room_mut(&mut self, id: &Uuid) -> AreaResult<&mut Room> {
        let room = self
            .rooms
            .iter_mut()
            .find(|room| room.id == *id)
            .ok_or_else(|| AreaError::room_not_found(id))?;
        self.meta.modified = Utc::now();
        Ok(room)
    }

    /// Add a wall to a room, recording its height as the session default
    /// wall height if none has been recorded yet.
    pub fn add_wall(&mut self, room_id: &Uuid, wall: Wall) -> AreaResult<Uuid> {
        let height = wall.height;
        let id = self.room_mut(room_id)?.add_wall(wall);
        if self.settings.default_wall_height.is_none() {
            tracing::debug!(height, "default wall height recorded");
            self.settings.default_wall_height = Some(height);
        }
        Ok(id)
    }

    /// Height of the first wall added this session, if any.
    pub fn default_wall_height(&self) -> Option<f64> {
        self.settings.default_wall_height
    }

    /// Replace the report header fields.
    pub fn set_details(&mut self, details: ProjectDetails) {
        self.details = details;
        self.touch();
    }

    /// Area summary for every room, in room order.
    pub fn summaries(&self) -> Vec<(&Room, CalculationSummary)> {
        self.rooms
            .iter()
            .map(|room| (room, calculate_room_area(room)))
            .collect()
    }

    /// Net area across all rooms.
    pub fn total_area(&self) -> f64 {
        calculate_project_total(&self.rooms)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new()
    }
}

/// Schema version and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version of the serialized form
    pub version: String,

    /// When the session started
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Free-text report header fields. No validation, no role in any calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    pub project_name: String,
    pub client_name: String,
    pub client_address: String,
    pub contractor_name: String,
    pub contractor_phone: String,
}

impl ProjectDetails {
    /// Labeled, non-empty fields in report order (project name excluded).
    pub fn labeled_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Client", self.client_name.as_str()),
            ("Address", self.client_address.as_str()),
            ("Contractor", self.contractor_name.as_str()),
            ("Phone", self.contractor_phone.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
    }
}

/// Defaults inferred while the session runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSettings {
    /// Height of the first wall entered; later walls may omit their height
    pub default_wall_height: Option<f64>,
}
