use crate::types::{Point, PointPair};

use std::collections::HashMap;

use tracing::event;

pub(crate) type Triangle = [Point; 3];

/// Incremental Delaunay triangulation (Bowyer–Watson) over integer points.
///
/// All predicates are evaluated exactly in `i128`, so collinear and
/// duplicate inputs never produce broken triangles. The vertices of the
/// seed triangle stay in the triangle set.
#[derive(Debug, Clone)]
pub(crate) struct Triangulation {
    triangles: Vec<Triangle>,
    vertices: Vec<Point>,
}

impl Triangulation {
    pub fn new(seed: Triangle) -> Self {
        debug_assert!(orientation(&seed) != 0, "Seed triangle must not be degenerate");

        Triangulation {
            triangles: vec![seed],
            vertices: seed.to_vec(),
        }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Inserts a point, restoring the Delaunay property around it.
    ///
    /// Returns `false` and leaves the triangulation untouched when the point
    /// is already a vertex or lies outside every triangle.
    pub fn insert(&mut self, point: Point) -> bool {
        if self.vertices.contains(&point) {
            event!(tracing::Level::TRACE, "Skipping duplicate point {}", point);
            return false;
        }

        if !self.triangles.iter().any(|tri| contains(tri, &point)) {
            event!(
                tracing::Level::WARN,
                "Point {} lies outside the triangulation",
                point
            );
            return false;
        }

        let (bad, good): (Vec<Triangle>, Vec<Triangle>) = self
            .triangles
            .iter()
            .partition(|tri| in_circumcircle(tri, &point));

        // Edges of the cavity are the ones used by exactly one bad triangle
        let mut edge_uses = HashMap::<PointPair, usize>::new();
        for tri in bad.iter() {
            for edge in edges_of(tri) {
                *edge_uses.entry(edge).or_insert(0) += 1;
            }
        }

        let mut triangles = good;
        for tri in bad.iter() {
            for edge in edges_of(tri) {
                if edge_uses[&edge] == 1 {
                    triangles.push([edge.from, edge.to, point]);
                }
            }
        }

        self.triangles = triangles;
        self.vertices.push(point);

        true
    }
}

fn edges_of(tri: &Triangle) -> [PointPair; 3] {
    [
        PointPair::new(tri[0], tri[1]),
        PointPair::new(tri[1], tri[2]),
        PointPair::new(tri[2], tri[0]),
    ]
}

/// Twice the signed area, positive when counter-clockwise.
fn orientation(tri: &Triangle) -> i128 {
    let [a, b, c] = tri.map(|p| (p.x as i128, p.y as i128));

    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

// Inside or on the boundary
fn contains(tri: &Triangle, point: &Point) -> bool {
    let sign = orientation(tri).signum();

    (0..3).all(|idx| {
        let edge_tri = [tri[idx], tri[(idx + 1) % 3], *point];
        orientation(&edge_tri) * sign >= 0
    })
}

// Strictly inside
fn in_circumcircle(tri: &Triangle, point: &Point) -> bool {
    let sign = orientation(tri).signum();
    if sign == 0 {
        return false;
    }

    let [a, b, c] = tri.map(|p| ((p.x - point.x) as i128, (p.y - point.y) as i128));

    let a_lift = a.0 * a.0 + a.1 * a.1;
    let b_lift = b.0 * b.0 + b.1 * b.1;
    let c_lift = c.0 * c.0 + c.1 * c.1;

    let det = a_lift * (b.0 * c.1 - c.0 * b.1) - b_lift * (a.0 * c.1 - c.0 * a.1)
        + c_lift * (a.0 * b.1 - b.0 * a.1);

    det * sign > 0
}
