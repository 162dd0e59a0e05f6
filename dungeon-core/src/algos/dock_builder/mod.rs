use super::{Pathfinder, RoomPool};
use crate::{
    constants::MAX_GRID_EXTENT,
    error::{GeneratorError, Result},
    layout::DockLayout,
    types::{GenerationGrid, Room},
};

use rand::Rng;
use tracing::event;

mod builder_config;
mod carve_corridors;
mod connect_rooms;
mod partition_regions;

pub use builder_config::DockBuilderConfig;

/// Lays out docked and generated rooms on a grid and carves corridors
/// between their doors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockBuilder {
    cols: u32,
    rows: u32,
    config: DockBuilderConfig,
}

impl DockBuilder {
    pub fn new(cols: u32, rows: u32, config: DockBuilderConfig) -> Result<Self> {
        if cols == 0 || rows == 0 || cols > MAX_GRID_EXTENT || rows > MAX_GRID_EXTENT {
            return Err(GeneratorError::InvalidDimensions {
                columns: cols,
                rows,
                max: MAX_GRID_EXTENT,
            });
        }

        config.validate()?;

        Ok(DockBuilder { cols, rows, config })
    }

    /// Runs the whole pipeline. Every random draw comes from `rng`, so the
    /// same seed, pool and pathfinder always give the same layout.
    pub fn build(
        &self,
        mut pool: RoomPool,
        rng: &mut impl Rng,
        pathfinder: &impl Pathfinder,
    ) -> DockLayout {
        let build_start = std::time::Instant::now();

        let pool_size = pool.len();
        let rooms = self
            .partition_regions(&mut pool, rng)
            .into_iter()
            .map(|placed| placed.room)
            .collect::<Vec<_>>();

        let partition_time = std::time::Instant::now();
        event!(
            tracing::Level::DEBUG,
            "Placed {} rooms ({} docked) in {:.2}ms",
            rooms.len(),
            pool_size - pool.len(),
            partition_time.duration_since(build_start).as_millis()
        );

        let mut grid = GenerationGrid::new(self.cols, self.rows);
        Self::mark_rooms(&mut grid, &rooms);

        let door_points = Self::collect_door_points(&rooms);
        let connections = self.plan_connections(&door_points);

        let connect_time = std::time::Instant::now();
        event!(
            tracing::Level::DEBUG,
            "Planned {} corridors between {} doors in {:.2}ms",
            connections.len(),
            door_points.len(),
            connect_time.duration_since(partition_time).as_millis()
        );

        let report = Self::carve_corridors(&mut grid, &connections, pathfinder);

        let carve_time = std::time::Instant::now();
        event!(
            tracing::Level::DEBUG,
            "Carved {} corridors, skipped {}, in {:.2}ms ({:.2}ms total)",
            report.carved.len(),
            report.skipped.len(),
            carve_time.duration_since(connect_time).as_millis(),
            carve_time.duration_since(build_start).as_millis()
        );

        DockLayout::new(grid, rooms, report.carved, report.skipped)
    }

    fn mark_rooms(grid: &mut GenerationGrid, rooms: &[Room]) {
        for room in rooms {
            grid.stamp_room(room);
        }
    }
}
