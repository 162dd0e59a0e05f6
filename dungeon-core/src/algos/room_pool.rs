use crate::{
    error::{GeneratorError, Result},
    templates::RoomTemplateSet,
    types::Room,
};

use rand::Rng;
use tracing::event;

/// Pre-authored rooms waiting to be docked into the partition.
///
/// Rooms are moved out of the pool when placed, so each entry is used at
/// most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomPool {
    rooms: Vec<Room>,
}

impl RoomPool {
    pub fn new() -> Self {
        RoomPool { rooms: Vec::new() }
    }

    pub fn from_rooms(rooms: Vec<Room>) -> Self {
        RoomPool { rooms }
    }

    /// Instantiates the named templates in order. A name may repeat to dock
    /// several copies of the same template.
    pub fn from_templates<S: AsRef<str>>(
        templates: &RoomTemplateSet,
        names: &[S],
    ) -> Result<Self> {
        let rooms = names
            .iter()
            .map(|name| {
                templates
                    .get(name.as_ref())
                    .map(|template| template.instantiate())
                    .ok_or_else(|| GeneratorError::UnknownTemplate(name.as_ref().to_owned()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RoomPool { rooms })
    }

    pub fn push(&mut self, room: Room) {
        self.rooms.push(room);
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    /// Removes and returns the first pool room, in random trial order, that
    /// fits the region with the given padding, rotated if needed.
    pub fn take_fitting(
        &mut self,
        region_width: i32,
        region_height: i32,
        pad_x: i32,
        pad_y: i32,
        rng: &mut impl Rng,
    ) -> Option<Room> {
        if self.rooms.is_empty() {
            return None;
        }

        // Each index is tried once
        let mut candidates = (0..self.rooms.len()).collect::<Vec<_>>();

        while !candidates.is_empty() {
            let idx = candidates.remove(rng.random_range(0..candidates.len()));

            let candidate = &self.rooms[idx];
            let (width, height) = (candidate.width() as i32, candidate.height() as i32);

            let fits_upright =
                width + pad_x * 2 <= region_width && height + pad_y * 2 <= region_height;
            let fits_rotated =
                height + pad_x * 2 <= region_width && width + pad_y * 2 <= region_height;

            if !fits_upright && !fits_rotated {
                continue;
            }

            let mut room = self.rooms.remove(idx);

            if fits_upright && fits_rotated {
                if rng.random_bool(0.5) {
                    room.rotate();
                }
            } else if fits_rotated {
                room.rotate();
            }

            event!(
                tracing::Level::DEBUG,
                "Docking pool room #{} as [{}x{}] into region [{}x{}]",
                idx,
                room.width(),
                room.height(),
                region_width,
                region_height
            );

            return Some(room);
        }

        None
    }
}
