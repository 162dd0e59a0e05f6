use crate::constants::{
    CORRIDOR_SYMBOL, DIRECTIONS, DOOR_SYMBOL, FLOOR_SYMBOL, MIN_ROOM_EXTENT, WALL_SYMBOL,
};

use std::{
    fmt::{Display, Formatter},
    hash::Hash,
};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// An integer grid coordinate.
///
/// Coordinates are signed because the triangulation works with vertices
/// far outside the grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn offset_by(&self, dx: i32, dy: i32) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn manhattan_distance(&self, other: &Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn neighbours(&self) -> [Point; 4] {
        [
            self.offset_by(0, -1),
            self.offset_by(1, 0),
            self.offset_by(0, 1),
            self.offset_by(-1, 0),
        ]
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

impl From<Point> for (i32, i32) {
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

/// An unordered pair of points, one corridor to be carved between two doors.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PointPair {
    pub from: Point,
    pub to: Point,
}

impl PointPair {
    pub fn new(from: Point, to: Point) -> Self {
        PointPair { from, to }
    }
}

impl PartialEq for PointPair {
    fn eq(&self, other: &Self) -> bool {
        (self.from == other.from && self.to == other.to)
            || (self.from == other.to && self.to == other.from)
    }
}

impl Eq for PointPair {}

// Pairs are undirected, so both orders must hash the same way
impl Hash for PointPair {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        if self.from <= self.to {
            self.from.hash(state);
            self.to.hash(state);
        } else {
            self.to.hash(state);
            self.from.hash(state);
        }
    }
}

impl Display for PointPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -- {}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rect {
    pub origin: Point,
    pub width: i32,
    pub height: i32,
}

impl Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{}):[{}x{}]",
            self.origin.x, self.origin.y, self.width, self.height
        )
    }
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            origin: Point { x, y },
            width,
            height,
        }
    }

    pub fn left(&self) -> i32 {
        self.origin.x
    }

    pub fn top(&self) -> i32 {
        self.origin.y
    }

    // Exclusive
    pub fn right(&self) -> i32 {
        self.origin.x + self.width
    }

    // Exclusive
    pub fn bottom(&self) -> i32 {
        self.origin.y + self.height
    }

    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn contains_point(&self, point: &Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Grows the rectangle by `pad_x` on the left and right and `pad_y` on
    /// the top and bottom.
    pub fn padded(&self, pad_x: i32, pad_y: i32) -> Rect {
        Rect::new(
            self.origin.x - pad_x,
            self.origin.y - pad_y,
            self.width + pad_x * 2,
            self.height + pad_y * 2,
        )
    }
}

/// The side of a room a door opens onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Direction {
    West,
    North,
    East,
    South,
}

/// The region corner a room is anchored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Display for Corner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Corner::TopLeft => write!(f, "top-left"),
            Corner::TopRight => write!(f, "top-right"),
            Corner::BottomLeft => write!(f, "bottom-left"),
            Corner::BottomRight => write!(f, "bottom-right"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    Floor,
    #[default]
    Wall,
    Door,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PathfindType {
    #[default]
    None,
    Wall,
    Corridor,
}

/// Generation-time state of one grid cell.
///
/// `tile_type` is the visual classification and `pathfind_type` the
/// walkability one. They are set independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GenerationTile {
    pub tile_type: TileType,
    pub pathfind_type: PathfindType,
}

impl GenerationTile {
    pub const WALL: GenerationTile = GenerationTile {
        tile_type: TileType::Wall,
        pathfind_type: PathfindType::Wall,
    };

    pub const FLOOR: GenerationTile = GenerationTile {
        tile_type: TileType::Floor,
        pathfind_type: PathfindType::None,
    };

    pub const DOOR: GenerationTile = GenerationTile {
        tile_type: TileType::Door,
        pathfind_type: PathfindType::None,
    };

    pub const CORRIDOR: GenerationTile = GenerationTile {
        tile_type: TileType::Floor,
        pathfind_type: PathfindType::Corridor,
    };

    pub fn is_passable(&self) -> bool {
        self.pathfind_type != PathfindType::Wall
    }

    pub fn symbol(&self) -> char {
        match (self.tile_type, self.pathfind_type) {
            (TileType::Door, _) => DOOR_SYMBOL,
            (TileType::Floor, PathfindType::Corridor) => CORRIDOR_SYMBOL,
            (TileType::Floor, _) => FLOOR_SYMBOL,
            (TileType::Wall, PathfindType::Wall) => WALL_SYMBOL,
            // Untouched rock is passable for the pathfinder but drawn as wall
            (TileType::Wall, _) => ' ',
        }
    }
}

/// The generation-time tile buffer, stored row by row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GenerationGrid {
    columns: u32,
    rows: u32,
    tiles: Vec<GenerationTile>,
}

impl GenerationGrid {
    pub fn new(columns: u32, rows: u32) -> Self {
        GenerationGrid {
            columns,
            rows,
            tiles: vec![GenerationTile::default(); columns as usize * rows as usize],
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.columns
            && (point.y as u32) < self.rows
    }

    fn index_of(&self, point: Point) -> Option<usize> {
        if self.in_bounds(point) {
            Some(point.y as usize * self.columns as usize + point.x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, point: Point) -> Option<&GenerationTile> {
        self.index_of(point).map(|idx| &self.tiles[idx])
    }

    pub fn get_mut(&mut self, point: Point) -> Option<&mut GenerationTile> {
        self.index_of(point).map(|idx| &mut self.tiles[idx])
    }

    pub fn is_passable(&self, point: Point) -> bool {
        self.get(point).is_some_and(GenerationTile::is_passable)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point, &GenerationTile)> {
        let columns = self.columns as usize;

        self.tiles.iter().enumerate().map(move |(idx, tile)| {
            (
                Point::new((idx % columns) as i32, (idx / columns) as i32),
                tile,
            )
        })
    }

    /// Copies the room contents onto the grid at the room's position.
    /// Cells falling outside the grid are dropped.
    pub fn stamp_room(&mut self, room: &Room) {
        for (local, tile) in room.iter_tiles() {
            if let Some(target) = self.get_mut(room.position().offset_by(local.x, local.y)) {
                *target = *tile;
            }
        }
    }
}

impl Display for GenerationGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.tiles.chunks(self.columns.max(1) as usize) {
            let line = row.iter().map(GenerationTile::symbol).collect::<String>();
            writeln!(f, "{}", line.trim_end())?;
        }

        Ok(())
    }
}

/// A rectangular block of tiles with a wall border and door openings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Room {
    width: u32,
    height: u32,
    pub x: i32,
    pub y: i32,
    contents: Vec<GenerationTile>,
}

impl Room {
    /// Builds a room with a wall ring and a single door on a random side.
    ///
    /// The side is picked uniformly first, then the door position along it,
    /// never on a corner.
    pub fn generate(width: u32, height: u32, rng: &mut impl Rng) -> Self {
        debug_assert!(width >= MIN_ROOM_EXTENT && height >= MIN_ROOM_EXTENT);

        let mut contents = Vec::with_capacity(width as usize * height as usize);

        for row in 0..height {
            for col in 0..width {
                let on_border = col == 0 || col == width - 1 || row == 0 || row == height - 1;

                contents.push(if on_border {
                    GenerationTile::WALL
                } else {
                    GenerationTile::FLOOR
                });
            }
        }

        let mut room = Room {
            width,
            height,
            x: 0,
            y: 0,
            contents,
        };

        let side = DIRECTIONS[rng.random_range(0..DIRECTIONS.len())];
        let (col, row) = match side {
            Direction::West => (0, rng.random_range(1..height - 1)),
            Direction::North => (rng.random_range(1..width - 1), 0),
            Direction::East => (width - 1, rng.random_range(1..height - 1)),
            Direction::South => (rng.random_range(1..width - 1), height - 1),
        };

        room.contents[(row * width + col) as usize] = GenerationTile::FLOOR;

        room
    }

    /// Builds a room from a row-major tile buffer.
    pub(crate) fn from_contents(width: u32, height: u32, contents: Vec<GenerationTile>) -> Self {
        debug_assert_eq!(contents.len(), width as usize * height as usize);

        Room {
            width,
            height,
            x: 0,
            y: 0,
            contents,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width as i32, self.height as i32)
    }

    pub fn centroid(&self) -> Point {
        Point::new(
            self.x + (self.width / 2) as i32,
            self.y + (self.height / 2) as i32,
        )
    }

    pub fn tile(&self, col: u32, row: u32) -> Option<&GenerationTile> {
        if col < self.width && row < self.height {
            self.contents.get((row * self.width + col) as usize)
        } else {
            None
        }
    }

    pub fn is_border(&self, col: u32, row: u32) -> bool {
        col == 0 || row == 0 || col == self.width - 1 || row == self.height - 1
    }

    pub fn iter_tiles(&self) -> impl Iterator<Item = (Point, &GenerationTile)> {
        let width = self.width as usize;

        self.contents.iter().enumerate().map(move |(idx, tile)| {
            (
                Point::new((idx % width) as i32, (idx / width) as i32),
                tile,
            )
        })
    }

    /// Passable cells of the border ring in room-local coordinates, scanned
    /// column by column.
    pub fn door_cells(&self) -> Vec<Point> {
        let mut doors = Vec::new();

        for col in 0..self.width {
            for row in 0..self.height {
                if !self.is_border(col, row) {
                    continue;
                }

                if self.tile(col, row).is_some_and(GenerationTile::is_passable) {
                    doors.push(Point::new(col as i32, row as i32));
                }
            }
        }

        doors
    }

    /// Same as `Self::door_cells`, offset by the room position.
    pub fn world_door_points(&self) -> Vec<Point> {
        self.door_cells()
            .into_iter()
            .map(|door| door.offset_by(self.x, self.y))
            .collect()
    }

    /// Transposes the contents and swaps width and height.
    pub fn rotate(&mut self) {
        let (width, height) = (self.width as usize, self.height as usize);
        let mut rotated = Vec::with_capacity(self.contents.len());

        // The new buffer is `height` wide and `width` tall
        for new_row in 0..width {
            for new_col in 0..height {
                rotated.push(self.contents[new_col * width + new_row]);
            }
        }

        self.contents = rotated;
        std::mem::swap(&mut self.width, &mut self.height);
    }
}

impl Display for Room {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "room {} [{}x{}]",
            self.position(),
            self.width,
            self.height
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn corners_of(room: &Room) -> [(u32, u32); 4] {
        let (w, h) = (room.width(), room.height());
        [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)]
    }

    #[test]
    fn test_generated_room_has_single_door_off_corner() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for (width, height) in [(3, 3), (6, 6), (6, 12), (15, 7)] {
            for _ in 0..50 {
                let room = Room::generate(width, height, &mut rng);

                let doors = room.door_cells();
                assert_eq!(doors.len(), 1, "Room should have exactly one door");

                let door = doors[0];
                assert!(
                    !corners_of(&room).contains(&(door.x as u32, door.y as u32)),
                    "Door {} should not be on a corner",
                    door
                );

                let door_tile = room.tile(door.x as u32, door.y as u32).unwrap();
                assert_eq!(door_tile.tile_type, TileType::Floor);

                for col in 0..width {
                    for row in 0..height {
                        if !room.is_border(col, row) || Point::new(col as i32, row as i32) == door {
                            continue;
                        }

                        assert_eq!(room.tile(col, row), Some(&GenerationTile::WALL));
                    }
                }
            }
        }
    }

    #[test]
    fn test_generated_room_interior_is_floor() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let room = Room::generate(8, 5, &mut rng);

        for col in 1..7 {
            for row in 1..4 {
                assert_eq!(room.tile(col, row), Some(&GenerationTile::FLOOR));
            }
        }
    }

    #[test]
    fn test_door_sides_are_all_reachable() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut seen = [false; 4];

        for _ in 0..200 {
            let room = Room::generate(5, 5, &mut rng);
            let door = room.door_cells()[0];

            let side = match (door.x, door.y) {
                (0, _) => 0,
                (_, 0) => 1,
                (4, _) => 2,
                _ => 3,
            };
            seen[side] = true;
        }

        assert!(seen.iter().all(|s| *s), "Every side should get a door");
    }

    #[test]
    fn test_rotate_transposes_contents() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let original = Room::generate(4, 7, &mut rng);

        let mut rotated = original.clone();
        rotated.rotate();

        assert_eq!(rotated.width(), 7);
        assert_eq!(rotated.height(), 4);

        for col in 0..original.width() {
            for row in 0..original.height() {
                assert_eq!(original.tile(col, row), rotated.tile(row, col));
            }
        }
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for (width, height) in [(3, 9), (6, 6), (12, 5)] {
            let original = Room::generate(width, height, &mut rng);
            let mut room = original.clone();

            for _ in 0..4 {
                room.rotate();
            }

            assert_eq!(room, original);
        }
    }

    #[test]
    fn test_world_door_points_are_offset() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut room = Room::generate(6, 6, &mut rng);
        room.x = 10;
        room.y = 20;

        let local = room.door_cells()[0];
        let world = room.world_door_points()[0];

        assert_eq!(world, local.offset_by(10, 20));
        assert!(room.rect().contains_point(&world));
    }

    #[test]
    fn test_point_pair_is_unordered() {
        use std::collections::HashSet;

        let a = Point::new(1, 2);
        let b = Point::new(5, -3);

        let mut set = HashSet::new();
        set.insert(PointPair::new(a, b));

        assert!(set.contains(&PointPair::new(b, a)));
        assert_eq!(PointPair::new(a, b), PointPair::new(b, a));
        assert_ne!(PointPair::new(a, b), PointPair::new(a, a));
    }

    #[test]
    fn test_rect_intersects() {
        let rect = Rect::new(2, 2, 4, 4);

        assert!(rect.intersects(&Rect::new(5, 5, 3, 3)));
        assert!(!rect.intersects(&Rect::new(6, 2, 3, 3)), "Touching rects do not overlap");
        assert!(!rect.intersects(&Rect::new(0, 0, 2, 10)));
        assert!(!rect.intersects(&Rect::new(3, 3, 0, 5)), "Empty rects never overlap");
    }

    #[test]
    fn test_grid_stamp_room() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut grid = GenerationGrid::new(12, 10);
        let mut room = Room::generate(4, 4, &mut rng);
        room.x = 3;
        room.y = 2;

        grid.stamp_room(&room);

        assert_eq!(grid.get(Point::new(3, 2)), Some(&GenerationTile::WALL));
        assert_eq!(grid.get(Point::new(4, 3)), Some(&GenerationTile::FLOOR));
        assert_eq!(grid.get(Point::new(0, 0)), Some(&GenerationTile::default()));
        assert!(grid.is_passable(Point::new(0, 0)));
        assert!(!grid.is_passable(Point::new(-1, 0)));
        assert!(!grid.is_passable(Point::new(12, 0)));
    }
}
