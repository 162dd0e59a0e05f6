mod dock_builder;
mod pathfinder;
mod room_pool;
mod triangulator;

pub use dock_builder::{DockBuilder, DockBuilderConfig};
pub use pathfinder::{GridPathfinder, Pathfinder};
pub use room_pool::RoomPool;
pub(crate) use triangulator::Triangulation;
