use super::DockBuilder;
use crate::{
    algos::{Triangulation, triangulator::Triangle},
    constants::BOUNDING_TRIANGLE_EXTENT,
    types::{Point, PointPair, Room},
};

use std::collections::HashSet;

use tracing::event;

const BOUNDING_TRIANGLE: Triangle = [
    Point::new(-BOUNDING_TRIANGLE_EXTENT, -BOUNDING_TRIANGLE_EXTENT),
    Point::new(BOUNDING_TRIANGLE_EXTENT, -BOUNDING_TRIANGLE_EXTENT),
    Point::new(0, BOUNDING_TRIANGLE_EXTENT),
];

impl DockBuilder {
    pub(super) fn collect_door_points(rooms: &[Room]) -> Vec<Point> {
        let mut door_points = Vec::with_capacity(rooms.len());

        for room in rooms {
            for door in room.world_door_points() {
                event!(tracing::Level::TRACE, "Door at {}", door);
                door_points.push(door);
            }
        }

        door_points
    }

    /// Triangulates the door points and keeps the sparse subset of edges
    /// worth carving, in triangle order.
    pub(super) fn plan_connections(&self, door_points: &[Point]) -> Vec<PointPair> {
        let mut triangulation = Triangulation::new(BOUNDING_TRIANGLE);

        for point in door_points {
            triangulation.insert(*point);
        }

        let mut classifier = EdgeClassifier::new(self.cols as i32, self.rows as i32);

        for triangle in triangulation.triangles() {
            classifier.classify(triangle);
        }

        event!(
            tracing::Level::DEBUG,
            "Kept {} of {} triangle edges",
            classifier.added.len(),
            classifier.added.len() + classifier.ignored.len()
        );

        classifier.paths
    }
}

/// Sorts triangle edges into carved and ignored ones. A pair keeps the
/// class it got the first time it was seen.
struct EdgeClassifier {
    columns: i32,
    rows: i32,
    added: HashSet<PointPair>,
    ignored: HashSet<PointPair>,
    paths: Vec<PointPair>,
}

impl EdgeClassifier {
    fn new(columns: i32, rows: i32) -> Self {
        EdgeClassifier {
            columns,
            rows,
            added: HashSet::new(),
            ignored: HashSet::new(),
            paths: Vec::new(),
        }
    }

    fn classify(&mut self, triangle: &Triangle) {
        let [v0, v1, v2] = *triangle;
        let edges = [
            PointPair::new(v0, v1),
            PointPair::new(v0, v2),
            PointPair::new(v1, v2),
        ];

        // First edge reaching the maximum score wins
        let mut longest = 0;
        for idx in 1..edges.len() {
            if edge_score(&edges[longest]) < edge_score(&edges[idx]) {
                longest = idx;
            }
        }

        for (idx, edge) in edges.into_iter().enumerate() {
            if self.added.contains(&edge) || self.ignored.contains(&edge) {
                continue;
            }

            if idx == longest || !self.in_grid(&edge.from) || !self.in_grid(&edge.to) {
                self.ignored.insert(edge);
                continue;
            }

            self.added.insert(edge);
            self.paths.push(edge);
        }
    }

    // The last row and column are excluded on purpose
    fn in_grid(&self, point: &Point) -> bool {
        point.x >= 0 && point.y >= 0 && point.x < self.columns - 1 && point.y < self.rows - 1
    }
}

/// Edge length estimate, `2^dx + 2^dy` over the signed deltas.
fn edge_score(edge: &PointPair) -> f64 {
    let dx = edge.from.x - edge.to.x;
    let dy = edge.from.y - edge.to.y;

    2f64.powi(dx) + 2f64.powi(dy)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algos::DockBuilderConfig;

    fn builder() -> DockBuilder {
        DockBuilder::new(40, 30, DockBuilderConfig::default()).unwrap()
    }

    #[test]
    fn test_single_door_gives_no_edges() {
        let paths = builder().plan_connections(&[Point::new(10, 10)]);

        assert!(paths.is_empty());
    }

    #[test]
    fn test_empty_input_gives_no_edges() {
        assert!(builder().plan_connections(&[]).is_empty());
    }

    #[test]
    fn test_duplicate_doors_give_at_most_one_edge() {
        let points = [Point::new(5, 5), Point::new(5, 5), Point::new(12, 5)];

        let paths = builder().plan_connections(&points);

        assert!(paths.len() <= 1);
        for path in paths.iter() {
            assert_ne!(path.from, path.to, "Degenerate edge {}", path);
        }
    }

    #[test]
    fn test_edges_stay_inside_grid() {
        let points = [(3, 4), (20, 6), (35, 12), (8, 25), (28, 27), (15, 15)].map(Point::from);

        let paths = builder().plan_connections(&points);

        assert!(!paths.is_empty());
        for path in paths.iter() {
            assert!(points.contains(&path.from) && points.contains(&path.to));
        }

        let unique = paths.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), paths.len(), "Edges should be carved once");
    }

    #[test]
    fn test_added_and_ignored_are_disjoint() {
        let points = [(2, 2), (30, 3), (17, 26), (9, 14), (25, 18), (36, 27), (2, 27)]
            .map(Point::from);

        let mut triangulation = Triangulation::new(BOUNDING_TRIANGLE);
        for point in points {
            triangulation.insert(point);
        }

        let mut classifier = EdgeClassifier::new(40, 30);
        for triangle in triangulation.triangles() {
            classifier.classify(triangle);
        }

        assert!(classifier.added.is_disjoint(&classifier.ignored));
        assert_eq!(classifier.added.len(), classifier.paths.len());
        assert!(
            classifier
                .paths
                .iter()
                .all(|path| !BOUNDING_TRIANGLE.contains(&path.from)
                    && !BOUNDING_TRIANGLE.contains(&path.to)),
            "Edges to the bounding triangle are never carved"
        );
    }

    #[test]
    fn test_longest_edge_is_ignored() {
        let mut classifier = EdgeClassifier::new(40, 30);

        // (0,1) scores 2^-10 + 2^0, (0,2) 2^-2 + 2^-8, (1,2) 2^8 + 2^-8
        let triangle = [Point::new(1, 1), Point::new(11, 1), Point::new(3, 9)];
        classifier.classify(&triangle);

        assert!(
            classifier
                .ignored
                .contains(&PointPair::new(Point::new(11, 1), Point::new(3, 9)))
        );
        assert_eq!(classifier.paths.len(), 2);
    }

    #[test]
    fn test_first_classification_sticks() {
        let mut classifier = EdgeClassifier::new(40, 30);
        let shared = PointPair::new(Point::new(1, 1), Point::new(11, 1));

        classifier.classify(&[Point::new(1, 1), Point::new(11, 1), Point::new(3, 9)]);
        assert!(classifier.added.contains(&shared));

        // Here the shared pair is the longest edge, but it was already added
        classifier.classify(&[Point::new(11, 1), Point::new(1, 1), Point::new(12, 2)]);

        assert!(classifier.added.contains(&shared));
        assert!(!classifier.ignored.contains(&shared));
        assert!(classifier.added.is_disjoint(&classifier.ignored));
    }

    #[test]
    fn test_edges_touching_last_row_are_ignored() {
        let mut classifier = EdgeClassifier::new(20, 20);

        classifier.classify(&[Point::new(2, 2), Point::new(19, 2), Point::new(2, 19)]);

        assert!(classifier.paths.is_empty());
        assert_eq!(classifier.ignored.len(), 3);
    }
}
