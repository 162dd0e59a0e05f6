use dungeon_core::{DockLayout, PathfindType, TileType};

use svg::{Document, node::element::Rectangle};

const CELL_SIZE: u32 = 12;
const MARKER_INSET: u32 = 3;

const BACKGROUND: &str = "#101018";
const WALL: &str = "#6c6c80";
const FLOOR: &str = "#d8d0b8";
const CORRIDOR: &str = "#a89878";
const DOOR: &str = "#c04020";
const TRANSITION: &str = "#2080f0";

pub(crate) fn draw_layout(layout: &DockLayout) -> Document {
    let grid = layout.grid();

    let mut document = Document::new()
        .set("width", grid.columns() * CELL_SIZE)
        .set("height", grid.rows() * CELL_SIZE)
        .add(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", BACKGROUND),
        );

    for (point, tile) in grid.iter() {
        let color = match (tile.tile_type, tile.pathfind_type) {
            (TileType::Door, _) => DOOR,
            (TileType::Floor, PathfindType::Corridor) => CORRIDOR,
            (TileType::Floor, _) => FLOOR,
            (TileType::Wall, PathfindType::Wall) => WALL,
            // Untouched rock stays background
            (TileType::Wall, _) => continue,
        };

        document = document.add(cell_rect(point.x as u32, point.y as u32, 0, color));
    }

    for room in layout.rooms() {
        for door in room.world_door_points() {
            document = document.add(cell_rect(door.x as u32, door.y as u32, MARKER_INSET, DOOR));
        }

        let centre = room.centroid();
        document = document.add(cell_rect(
            centre.x as u32,
            centre.y as u32,
            MARKER_INSET,
            TRANSITION,
        ));
    }

    document
}

fn cell_rect(col: u32, row: u32, inset: u32, color: &str) -> Rectangle {
    Rectangle::new()
        .set("x", col * CELL_SIZE + inset)
        .set("y", row * CELL_SIZE + inset)
        .set("width", CELL_SIZE - inset * 2)
        .set("height", CELL_SIZE - inset * 2)
        .set("fill", color)
}
