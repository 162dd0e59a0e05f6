use crate::types::{GenerationGrid, GenerationTile, Point};

use std::{cmp::Reverse, collections::HashMap};

use priority_queue::PriorityQueue;

/// Finds a route between two grid cells.
///
/// `is_walkable` decides which tiles may be entered. Implementations return
/// the route from `start` to `end`, both included, or `None` when the cells
/// are not connected.
pub trait Pathfinder {
    fn find_path(
        &self,
        grid: &GenerationGrid,
        is_walkable: &dyn Fn(&GenerationTile) -> bool,
        start: Point,
        end: Point,
    ) -> Option<Vec<Point>>;
}

/// 4-neighbour A* with uniform step cost.
///
/// Ties are broken on `(f, h, cell)`, so the same grid always yields the
/// same route. The goal cell may always be entered.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridPathfinder;

impl Pathfinder for GridPathfinder {
    fn find_path(
        &self,
        grid: &GenerationGrid,
        is_walkable: &dyn Fn(&GenerationTile) -> bool,
        start: Point,
        end: Point,
    ) -> Option<Vec<Point>> {
        if !grid.in_bounds(start) || !grid.in_bounds(end) {
            return None;
        }

        let mut open_set = PriorityQueue::new();
        let mut came_from = HashMap::<Point, Point>::new();
        let mut cost_so_far = HashMap::<Point, u32>::new();

        cost_so_far.insert(start, 0);
        let start_h = start.manhattan_distance(&end);
        open_set.push(start, Reverse((start_h, start_h, start)));

        while let Some((current, _)) = open_set.pop() {
            if current == end {
                return Some(reconstruct_path(&came_from, current));
            }

            let current_cost = cost_so_far[&current];

            for neighbour in current.neighbours() {
                let walkable = neighbour == end
                    || grid.get(neighbour).is_some_and(|tile| is_walkable(tile));

                if !walkable {
                    continue;
                }

                let new_cost = current_cost + 1;
                let known_cost = cost_so_far.get(&neighbour).copied().unwrap_or(u32::MAX);

                if new_cost < known_cost {
                    cost_so_far.insert(neighbour, new_cost);
                    came_from.insert(neighbour, current);

                    let h = neighbour.manhattan_distance(&end);
                    open_set.push_increase(neighbour, Reverse((new_cost + h, h, neighbour)));
                }
            }
        }

        None
    }
}

fn reconstruct_path(came_from: &HashMap<Point, Point>, mut current: Point) -> Vec<Point> {
    let mut path = vec![current];

    while let Some(previous) = came_from.get(&current) {
        path.push(*previous);
        current = *previous;
    }

    path.reverse();
    path
}

#[cfg(test)]
mod test {
    use super::*;

    fn walled_grid() -> GenerationGrid {
        // A vertical wall at x = 4 with a single gap at y = 6
        let mut grid = GenerationGrid::new(10, 8);
        for y in 0..8 {
            if y != 6 {
                *grid.get_mut(Point::new(4, y)).unwrap() = GenerationTile::WALL;
            }
        }
        grid
    }

    fn assert_contiguous(path: &[Point]) {
        for pair in path.windows(2) {
            assert_eq!(
                pair[0].manhattan_distance(&pair[1]),
                1,
                "Route should step one cell at a time"
            );
        }
    }

    #[test]
    fn test_straight_route() {
        let grid = GenerationGrid::new(10, 8);

        let path = GridPathfinder
            .find_path(&grid, &GenerationTile::is_passable, Point::new(1, 1), Point::new(6, 1))
            .unwrap();

        assert_eq!(path.len(), 6);
        assert_eq!(path.first(), Some(&Point::new(1, 1)));
        assert_eq!(path.last(), Some(&Point::new(6, 1)));
        assert_contiguous(&path);
    }

    #[test]
    fn test_route_goes_through_gap() {
        let grid = walled_grid();

        let path = GridPathfinder
            .find_path(&grid, &GenerationTile::is_passable, Point::new(1, 1), Point::new(8, 1))
            .unwrap();

        assert!(path.contains(&Point::new(4, 6)));
        assert!(path.iter().all(|p| grid.is_passable(*p)));
        assert_contiguous(&path);
        // 7 across, 5 down and 5 back up
        assert_eq!(path.len(), 7 + 10 + 1);
    }

    #[test]
    fn test_disconnected_returns_none() {
        let mut grid = walled_grid();
        *grid.get_mut(Point::new(4, 6)).unwrap() = GenerationTile::WALL;

        let path = GridPathfinder.find_path(
            &grid,
            &GenerationTile::is_passable,
            Point::new(1, 1),
            Point::new(8, 1),
        );

        assert!(path.is_none());
    }

    #[test]
    fn test_goal_may_be_a_wall() {
        let grid = walled_grid();

        let path = GridPathfinder
            .find_path(&grid, &GenerationTile::is_passable, Point::new(1, 0), Point::new(4, 0))
            .unwrap();

        assert_eq!(path.last(), Some(&Point::new(4, 0)));
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn test_out_of_bounds_returns_none() {
        let grid = GenerationGrid::new(5, 5);

        assert!(
            GridPathfinder
                .find_path(&grid, &|_| true, Point::new(-1, 0), Point::new(2, 2))
                .is_none()
        );
        assert!(
            GridPathfinder
                .find_path(&grid, &|_| true, Point::new(0, 0), Point::new(5, 2))
                .is_none()
        );
    }

    #[test]
    fn test_route_is_deterministic() {
        let grid = walled_grid();

        let first = GridPathfinder.find_path(
            &grid,
            &GenerationTile::is_passable,
            Point::new(0, 7),
            Point::new(9, 0),
        );

        for _ in 0..10 {
            let again = GridPathfinder.find_path(
                &grid,
                &GenerationTile::is_passable,
                Point::new(0, 7),
                Point::new(9, 0),
            );
            assert_eq!(first, again);
        }
    }
}
