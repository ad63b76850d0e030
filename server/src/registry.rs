//! Room registry: collision-checked identifier generation, lookup, and
//! deletion. One instance is owned by the gateway; tests build their own
//! isolated registries.

use crate::room::Room;
use log::info;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;

/// Length of a room identifier. Seven characters over a 62-symbol
/// alphabet leave collisions to the retry loop below.
pub const ROOM_ID_LEN: usize = 7;

pub struct RoomRegistry {
    rooms: HashMap<String, Room>,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
        }
    }

    /// Creates an empty room under a fresh identifier. Generation retries
    /// until the candidate is unused, so two live rooms can never share
    /// an id.
    pub fn create_room(&mut self) -> String {
        let id = loop {
            let candidate = generate_room_id();
            if !self.rooms.contains_key(&candidate) {
                break candidate;
            }
        };

        self.rooms.insert(id.clone(), Room::new());
        info!("Room {} created", id);
        id
    }

    pub fn get(&self, id: &str) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Room> {
        self.rooms.get_mut(id)
    }

    /// Removes the room. Idempotent when the id is already absent.
    pub fn delete(&mut self, id: &str) {
        if self.rooms.remove(id).is_some() {
            info!("Room {} deleted", id);
        }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

fn generate_room_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ROOM_ID_LEN)
        .map(char::from)
        .collect()
}
