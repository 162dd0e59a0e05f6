use super::DockBuilder;
use crate::{
    algos::RoomPool,
    constants::CORNERS,
    types::{Corner, Rect, Room},
};

use rand::Rng;
use tracing::event;

/// A room placed by the partition together with its padded footprint, the
/// room grown by the padding drawn for its region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PlacedRoom {
    pub room: Room,
    pub footprint: Rect,
}

impl DockBuilder {
    /// Splits the grid into regions, placing one room per region.
    ///
    /// Rooms come back in discovery order: a region's room, then every room
    /// found inside its first remaining sub-region, then its second.
    pub(super) fn partition_regions(
        &self,
        pool: &mut RoomPool,
        rng: &mut impl Rng,
    ) -> Vec<PlacedRoom> {
        let root = Rect::new(1, 1, self.cols as i32 - 2, self.rows as i32 - 2);
        let padded_min_room = self.config.padded_min_room();

        if root.width < padded_min_room || root.height < padded_min_room {
            event!(
                tracing::Level::WARN,
                "Grid [{}x{}] is too small to hold a room of size {} with padding",
                self.cols,
                self.rows,
                self.config.min_room_size
            );

            return vec![];
        }

        let mut placed_rooms = Vec::new();
        let mut region_stack = vec![root];

        while let Some(region) = region_stack.pop() {
            let (placed, sub_regions) = self.dock_room(region, pool, rng);

            event!(
                tracing::Level::TRACE,
                "Placed {} in region {}",
                placed.room,
                region
            );
            placed_rooms.push(placed);

            // Pushed in reverse so the first sub-region is explored first
            for sub_region in sub_regions.into_iter().rev() {
                if sub_region.width >= padded_min_room && sub_region.height >= padded_min_room {
                    region_stack.push(sub_region);
                }
            }
        }

        placed_rooms
    }

    fn dock_room(
        &self,
        region: Rect,
        pool: &mut RoomPool,
        rng: &mut impl Rng,
    ) -> (PlacedRoom, [Rect; 2]) {
        let pad_x = self.draw_padding(region.width, rng);
        let pad_y = self.draw_padding(region.height, rng);

        let mut room = match pool.take_fitting(region.width, region.height, pad_x, pad_y, rng) {
            Some(room) => room,
            None => self.generate_room(region, pad_x, pad_y, rng),
        };

        let corner = CORNERS[rng.random_range(0..CORNERS.len())];
        let sub_regions = Self::anchor_room(&mut room, region, corner, pad_x, pad_y);
        let footprint = room.rect().padded(pad_x, pad_y);

        (PlacedRoom { room, footprint }, sub_regions)
    }

    fn draw_padding(&self, extent: i32, rng: &mut impl Rng) -> i32 {
        let padding = rng.random_range(self.config.min_padding..=self.config.max_padding) as i32;

        padding.min((extent - self.config.min_room_size as i32) / 2)
    }

    fn generate_room(&self, region: Rect, pad_x: i32, pad_y: i32, rng: &mut impl Rng) -> Room {
        let size_range = self.config.min_room_size..=self.config.max_room_size;

        let width = rng
            .random_range(size_range.clone())
            .min((region.width - pad_x * 2) as u32);
        let height = rng
            .random_range(size_range)
            .min((region.height - pad_y * 2) as u32);

        Room::generate(width, height, rng)
    }

    /// Moves the room flush against `corner` (inside the padding) and
    /// returns the two rectangles that make up the rest of the region.
    fn anchor_room(
        room: &mut Room,
        region: Rect,
        corner: Corner,
        pad_x: i32,
        pad_y: i32,
    ) -> [Rect; 2] {
        let (x, y) = (region.left(), region.top());
        let (width, height) = (region.width, region.height);

        let padded_width = room.width() as i32 + pad_x * 2;
        let padded_height = room.height() as i32 + pad_y * 2;

        let (room_x, room_y) = match corner {
            Corner::TopLeft => (x + pad_x, y + pad_y),
            Corner::TopRight => (x + width - padded_width + pad_x, y + pad_y),
            Corner::BottomLeft => (x + pad_x, y + height - padded_height + pad_y),
            Corner::BottomRight => (
                x + width - padded_width + pad_x,
                y + height - padded_height + pad_y,
            ),
        };

        room.x = room_x;
        room.y = room_y;

        match corner {
            // Strip right of the room, then the band below it
            Corner::TopLeft => [
                Rect::new(x + padded_width, y, width - padded_width, padded_height),
                Rect::new(x, y + padded_height, width, height - padded_height),
            ],
            // Band left of the room, then the strip below it
            Corner::TopRight => [
                Rect::new(x, y, width - padded_width, height),
                Rect::new(
                    x + width - padded_width,
                    y + padded_height,
                    padded_width,
                    height - padded_height,
                ),
            ],
            // Strip above the room, then the band right of it
            Corner::BottomLeft => [
                Rect::new(x, y, padded_width, height - padded_height),
                Rect::new(x + padded_width, y, width - padded_width, height),
            ],
            // Strip left of the room, then the band above it
            Corner::BottomRight => [
                Rect::new(
                    x,
                    y + height - padded_height,
                    width - padded_width,
                    padded_height,
                ),
                Rect::new(x, y, width, height - padded_height),
            ],
        }
    }
}
