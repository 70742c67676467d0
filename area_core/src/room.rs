//! # Rooms
//!
//! A [`Room`] exclusively owns four measurement lists. Entries are only ever
//! added, updated or removed through the methods here; dropping the room
//! drops every entry with it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AreaError, AreaResult};
use crate::measurements::{
    Ceiling, Measurement, Opening, OpeningUpdate, RunningFeet, RunningFeetUpdate, Wall, WallUpdate,
};

/// Collection names, as they appear in errors and logs.
pub const WALLS: &str = "wall";
pub const OPENINGS: &str = "opening";
pub const CEILINGS: &str = "ceiling";
pub const RUNNING_FEET: &str = "running feet";

/// A room and everything measured in it.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "5f0c...",
///   "name": "Kitchen",
///   "walls": [{ "id": "...", "height": 8.0, "width": 12.0, "quantity": 2 }],
///   "openings": [{ "id": "...", "height": 7.0, "width": 3.0, "type": "door", "quantity": 1 }],
///   "ceilings": [],
///   "runningFeet": [{ "id": "...", "length": 24.0, "quantity": 1 }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub walls: Vec<Wall>,
    pub openings: Vec<Opening>,
    pub ceilings: Vec<Ceiling>,
    pub running_feet: Vec<RunningFeet>,
}

impl Room {
    /// Create an empty room.
    ///
    /// ```rust
    /// use area_core::room::Room;
    ///
    /// let room = Room::new("Kitchen");
    /// assert!(room.is_empty());
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Room {
            id: Uuid::new_v4(),
            name: name.into(),
            walls: Vec::new(),
            openings: Vec::new(),
            ceilings: Vec::new(),
            running_feet: Vec::new(),
        }
    }

    /// Rename the room. Blank names are rejected and the old name is kept.
    pub fn rename(&mut self, name: &str) -> AreaResult<()> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AreaError::invalid_input("name", name, "Room name cannot be blank"));
        }
        self.name = trimmed.to_string();
        Ok(())
    }

    /// True when no measurements have been entered.
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
            && self.openings.is_empty()
            && self.ceilings.is_empty()
            && self.running_feet.is_empty()
    }

    /// Total number of entries across all four lists.
    pub fn entry_count(&self) -> usize {
        self.walls.len() + self.openings.len() + self.ceilings.len() + self.running_feet.len()
    }

    // ------------------------------------------------------------------
    // Walls
    // ------------------------------------------------------------------

    pub fn add_wall(&mut self, wall: Wall) -> Uuid {
        push_entry(&mut self.walls, wall)
    }

    pub fn update_wall(&mut self, id: &Uuid, update: &WallUpdate) -> AreaResult<()> {
        find_entry(&mut self.walls, id, WALLS)?.apply(update)
    }

    pub fn remove_wall(&mut self, id: &Uuid) -> AreaResult<Wall> {
        remove_entry(&mut self.walls, id, WALLS)
    }

    // ------------------------------------------------------------------
    // Openings
    // ------------------------------------------------------------------

    pub fn add_opening(&mut self, opening: Opening) -> Uuid {
        push_entry(&mut self.openings, opening)
    }

    pub fn update_opening(&mut self, id: &Uuid, update: &OpeningUpdate) -> AreaResult<()> {
        find_entry(&mut self.openings, id, OPENINGS)?.apply(update)
    }

    pub fn remove_opening(&mut self, id: &Uuid) -> AreaResult<Opening> {
        remove_entry(&mut self.openings, id, OPENINGS)
    }

    // ------------------------------------------------------------------
    // Ceilings
    // ------------------------------------------------------------------

    pub fn add_ceiling(&mut self, ceiling: Ceiling) -> Uuid {
        push_entry(&mut self.ceilings, ceiling)
    }

    pub fn update_ceiling(&mut self, id: &Uuid, update: &WallUpdate) -> AreaResult<()> {
        find_entry(&mut self.ceilings, id, CEILINGS)?.apply(update)
    }

    pub fn remove_ceiling(&mut self, id: &Uuid) -> AreaResult<Ceiling> {
        remove_entry(&mut self.ceilings, id, CEILINGS)
    }

    // ------------------------------------------------------------------
    // Running feet
    // ------------------------------------------------------------------

    pub fn add_running_feet(&mut self, run: RunningFeet) -> Uuid {
        push_entry(&mut self.running_feet, run)
    }

    pub fn update_running_feet(&mut self, id: &Uuid, update: &RunningFeetUpdate) -> AreaResult<()> {
        find_entry(&mut self.running_feet, id, RUNNING_FEET)?.apply(update)
    }

    pub fn remove_running_feet(&mut self, id: &Uuid) -> AreaResult<RunningFeet> {
        remove_entry(&mut self.running_feet, id, RUNNING_FEET)
    }
}

fn push_entry<T: Measurement>(list: &mut Vec<T>, entry: T) -> Uuid {
    let id = entry.id();
    tracing::debug!(entry_id = %id, area = entry.area(), "measurement added");
    list.push(entry);
    id
}

fn find_entry<'a, T: Measurement>(list: &'a mut [T], id: &Uuid, collection: &str) -> AreaResult<&'a mut T> {
    list.iter_mut()
        .find(|entry| entry.id() == *id)
        .ok_or_else(|| AreaError::entry_not_found(collection, id))
}

fn remove_entry<T: Measurement>(list: &mut Vec<T>, id: &Uuid, collection: &str) -> AreaResult<T> {
    let index = list
        .iter()
        .position(|entry| entry.id() == *id)
        .ok_or_else(|| AreaError::entry_not_found(collection, id))?;
    tracing::debug!(entry_id = %id, collection, "measurement removed");
    Ok(list.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurements::OpeningKind;

    #[test]
    fn test_new_room_is_empty() {
        let room = Room::new("Bedroom");
        assert_eq!(room.name, "Bedroom");
        assert!(room.is_empty());
        assert_eq!(room.entry_count(), 0);
    }

    #[test]
    fn test_add_update_remove_wall() {
        let mut room = Room::new("Bedroom");
        let id = room.add_wall(Wall::new(8.0, 12.0, 1).unwrap());
        assert_eq!(room.walls.len(), 1);

        room.update_wall(&id, &WallUpdate { width: Some(10.0), ..Default::default() })
            .unwrap();
        assert_eq!(room.walls[0].width, 10.0);

        let removed = room.remove_wall(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(room.walls.is_empty());
    }

    #[test]
    fn test_lists_are_independent() {
        let mut room = Room::new("Bath");
        let wall_id = room.add_wall(Wall::new(8.0, 5.0, 1).unwrap());

        // A wall id is not a ceiling id, even though the shapes match
        let err = room.remove_ceiling(&wall_id).unwrap_err();
        assert_eq!(err.error_code(), "ENTRY_NOT_FOUND");
        assert_eq!(room.walls.len(), 1);
    }

    #[test]
    fn test_unknown_entry_is_reported() {
        let mut room = Room::new("Hall");
        let missing = Uuid::new_v4();
        let err = room
            .update_opening(&missing, &OpeningUpdate::default())
            .unwrap_err();
        assert_eq!(err, AreaError::entry_not_found(OPENINGS, missing));
    }

    #[test]
    fn test_remove_keeps_order_of_remaining_entries() {
        let mut room = Room::new("Hall");
        let first = room.add_opening(Opening::new(OpeningKind::Door, 7.0, 3.0, 1).unwrap());
        let second = room.add_opening(Opening::new(OpeningKind::Window, 4.0, 3.0, 1).unwrap());
        let third = room.add_opening(Opening::new(OpeningKind::Window, 4.0, 2.0, 1).unwrap());

        room.remove_opening(&second).unwrap();
        let ids: Vec<Uuid> = room.openings.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![first, third]);
    }

    #[test]
    fn test_rename_trims_and_rejects_blank() {
        let mut room = Room::new("Room 1");
        room.rename("  Living Room ").unwrap();
        assert_eq!(room.name, "Living Room");

        assert!(room.rename("   ").is_err());
        assert_eq!(room.name, "Living Room");
    }

    #[test]
    fn test_room_json_field_names() {
        let mut room = Room::new("Den");
        room.add_running_feet(RunningFeet::new(12.0, 1).unwrap());
        let json = serde_json::to_string(&room).unwrap();
        assert!(json.contains("\"runningFeet\""));

        let roundtrip: Room = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, room);
    }
}
