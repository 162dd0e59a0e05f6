//! The finished generation result and its conversion into level tiles.

use crate::{
    constants::{DOOR_SYMBOL, FLOOR_SYMBOL, TRANSITION_SYMBOL, WALL_SYMBOL},
    types::{GenerationGrid, Point, PointPair, Room, TileType},
};

use std::{
    collections::VecDeque,
    fmt::{Display, Formatter},
};

use serde::Serialize;
use tinyset::SetUsize;
use tracing::event;

/// Everything one generation run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DockLayout {
    grid: GenerationGrid,
    rooms: Vec<Room>,
    corridors: Vec<PointPair>,
    skipped: Vec<PointPair>,
}

impl DockLayout {
    pub(crate) fn new(
        grid: GenerationGrid,
        rooms: Vec<Room>,
        corridors: Vec<PointPair>,
        skipped: Vec<PointPair>,
    ) -> Self {
        DockLayout {
            grid,
            rooms,
            corridors,
            skipped,
        }
    }

    pub fn grid(&self) -> &GenerationGrid {
        &self.grid
    }

    /// Placed rooms in discovery order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Connections that were carved, in carving order.
    pub fn corridors(&self) -> &[PointPair] {
        &self.corridors
    }

    /// Connections the pathfinder could not route.
    pub fn skipped(&self) -> &[PointPair] {
        &self.skipped
    }

    /// Indices of the rooms that cannot be walked to from the first room.
    ///
    /// Walking covers floor, door and corridor cells. A room counts as
    /// reached when any of its doors is.
    pub fn unreachable_rooms(&self) -> Vec<usize> {
        let Some(first_room) = self.rooms.first() else {
            return vec![];
        };

        let columns = self.grid.columns() as usize;
        let index_of = |point: Point| point.y as usize * columns + point.x as usize;

        let is_open = |point: Point| {
            self.grid
                .get(point)
                .is_some_and(|tile| tile.tile_type != TileType::Wall)
        };

        let mut reached = SetUsize::new();
        let mut queue = VecDeque::new();

        for door in first_room.world_door_points() {
            if is_open(door) && reached.insert(index_of(door)) {
                queue.push_back(door);
            }
        }

        while let Some(point) = queue.pop_front() {
            for neighbour in point.neighbours() {
                if is_open(neighbour) && reached.insert(index_of(neighbour)) {
                    queue.push_back(neighbour);
                }
            }
        }

        let unreachable = self
            .rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| {
                !room
                    .world_door_points()
                    .into_iter()
                    .any(|door| is_open(door) && reached.contains(index_of(door)))
            })
            .map(|(idx, _)| idx)
            .collect::<Vec<_>>();

        if !unreachable.is_empty() {
            event!(
                tracing::Level::DEBUG,
                "{} of {} rooms are unreachable",
                unreachable.len(),
                self.rooms.len()
            );
        }

        unreachable
    }

    pub fn is_connected(&self) -> bool {
        self.unreachable_rooms().is_empty()
    }

    /// Converts the grid into level tiles, resolving each cell once.
    ///
    /// Door cells carry a [`Feature::Door`] and the centre cell of every
    /// room a [`Feature::Transition`].
    pub fn assemble<R: TileResolver>(&self, resolver: &R) -> Level<R::TileData> {
        let mut tiles = self
            .grid
            .iter()
            .map(|(position, tile)| {
                let mut features = Vec::new();
                if tile.tile_type == TileType::Door {
                    features.push(Feature::Door);
                }

                LevelTile {
                    position,
                    data: resolver.resolve(tile.tile_type),
                    features,
                }
            })
            .collect::<Vec<_>>();

        let columns = self.grid.columns() as usize;
        let mut add_feature = |point: Point, feature: Feature| {
            if !self.grid.in_bounds(point) {
                return;
            }

            let features = &mut tiles[point.y as usize * columns + point.x as usize].features;
            if !features.contains(&feature) {
                features.push(feature);
            }
        };

        for room in self.rooms.iter() {
            for door in room.world_door_points() {
                add_feature(door, Feature::Door);
            }
        }

        for room in self.rooms.iter() {
            add_feature(room.centroid(), Feature::Transition);
        }

        Level {
            columns: self.grid.columns(),
            rows: self.grid.rows(),
            tiles,
        }
    }
}

impl Display for DockLayout {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.grid)
    }
}

/// Maps a generated tile type to the data the consumer stores per cell.
pub trait TileResolver {
    type TileData;

    fn resolve(&self, tile_type: TileType) -> Self::TileData;
}

/// Resolves walls to `#` and everything walkable to `.`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolResolver;

impl TileResolver for SymbolResolver {
    type TileData = char;

    fn resolve(&self, tile_type: TileType) -> char {
        match tile_type {
            TileType::Wall => WALL_SYMBOL,
            TileType::Floor | TileType::Door => FLOOR_SYMBOL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Feature {
    Door,
    Transition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelTile<T> {
    pub position: Point,
    pub data: T,
    pub features: Vec<Feature>,
}

impl<T> LevelTile<T> {
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}

/// The assembled level, stored row by row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Level<T> {
    columns: u32,
    rows: u32,
    tiles: Vec<LevelTile<T>>,
}

impl<T> Level<T> {
    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn get(&self, point: Point) -> Option<&LevelTile<T>> {
        let in_bounds = point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.columns
            && (point.y as u32) < self.rows;

        if !in_bounds {
            return None;
        }

        self.tiles
            .get(point.y as usize * self.columns as usize + point.x as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelTile<T>> {
        self.tiles.iter()
    }
}

impl Level<char> {
    /// One line per row. Transitions win over doors, doors over tile data.
    pub fn render(&self) -> String {
        let mut output = String::with_capacity(self.tiles.len() + self.rows as usize);

        for row in self.tiles.chunks(self.columns.max(1) as usize) {
            for tile in row {
                let symbol = if tile.has_feature(Feature::Transition) {
                    TRANSITION_SYMBOL
                } else if tile.has_feature(Feature::Door) {
                    DOOR_SYMBOL
                } else {
                    tile.data
                };

                output.push(symbol);
            }
            output.push('\n');
        }

        output
    }
}
