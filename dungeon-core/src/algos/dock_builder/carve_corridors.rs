use super::DockBuilder;
use crate::{
    algos::Pathfinder,
    types::{GenerationGrid, GenerationTile, PointPair},
};

use tracing::event;

#[derive(Debug, Default)]
pub(super) struct CarveReport {
    pub carved: Vec<PointPair>,
    pub skipped: Vec<PointPair>,
}

impl DockBuilder {
    /// Carves one corridor per connection, in order. Each search sees the
    /// corridors carved before it.
    pub(super) fn carve_corridors(
        grid: &mut GenerationGrid,
        connections: &[PointPair],
        pathfinder: &impl Pathfinder,
    ) -> CarveReport {
        let mut report = CarveReport::default();

        for connection in connections {
            event!(tracing::Level::TRACE, "Path between {}", connection);

            let route = pathfinder
                .find_path(
                    grid,
                    &GenerationTile::is_passable,
                    connection.from,
                    connection.to,
                )
                .filter(|route| !route.is_empty());

            let Some(route) = route else {
                event!(
                    tracing::Level::WARN,
                    "No route between {}, skipping corridor",
                    connection
                );
                report.skipped.push(*connection);
                continue;
            };

            for point in route {
                if let Some(tile) = grid.get_mut(point) {
                    *tile = GenerationTile::CORRIDOR;
                }
            }

            report.carved.push(*connection);
        }

        report
    }
}
