use crate::types::{Corner, Direction};

pub(crate) const DEFAULT_MIN_PADDING: u32 = 1;
pub(crate) const DEFAULT_MAX_PADDING: u32 = 4;

pub(crate) const DEFAULT_MIN_ROOM_SIZE: u32 = 6;
pub(crate) const DEFAULT_MAX_ROOM_SIZE: u32 = 15;

// A room needs a wall ring plus at least one non-corner cell per side for its door.
pub(crate) const MIN_ROOM_EXTENT: u32 = 3;

// Half-extent of the triangle that seeds the triangulation. Every door point
// must lie strictly inside it, so grids are capped well below this size.
pub(crate) const BOUNDING_TRIANGLE_EXTENT: i32 = 10_000;
pub(crate) const MAX_GRID_EXTENT: u32 = 4_096;

pub(crate) const WALL_SYMBOL: char = '#';
pub(crate) const FLOOR_SYMBOL: char = '.';
pub(crate) const DOOR_SYMBOL: char = '+';
pub(crate) const CORRIDOR_SYMBOL: char = ',';
pub(crate) const TRANSITION_SYMBOL: char = '*';

// Door sides in draw order
pub(crate) const DIRECTIONS: [Direction; 4] = [
    Direction::West,
    Direction::North,
    Direction::East,
    Direction::South,
];

pub(crate) const CORNERS: [Corner; 4] = [
    Corner::TopLeft,
    Corner::TopRight,
    Corner::BottomLeft,
    Corner::BottomRight,
];
