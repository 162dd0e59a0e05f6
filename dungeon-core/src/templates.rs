//! Pre-authored room templates, keyed by name.
//!
//! Templates are written as symbol rows: `#` is wall, `.` is floor and `+`
//! is a door. Any passable cell on the border ring counts as a door when the
//! rooms are connected.

use crate::{
    constants::{DOOR_SYMBOL, FLOOR_SYMBOL, MIN_ROOM_EXTENT, WALL_SYMBOL},
    error::TemplateError,
    types::{GenerationTile, Room},
};

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTemplate {
    name: String,
    width: u32,
    height: u32,
    contents: Vec<GenerationTile>,
}

impl RoomTemplate {
    pub fn from_rows<S: AsRef<str>>(
        name: impl Into<String>,
        rows: &[S],
    ) -> Result<Self, TemplateError> {
        let name = name.into();

        let Some(first_row) = rows.first() else {
            return Err(TemplateError::Empty { name });
        };

        let width = first_row.as_ref().chars().count();
        let height = rows.len();

        let mut contents = Vec::with_capacity(width * height);

        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();

            if found != width {
                return Err(TemplateError::RaggedRow {
                    name,
                    row: row_idx,
                    expected: width,
                    found,
                });
            }

            for (col_idx, symbol) in row.chars().enumerate() {
                let tile = match symbol {
                    WALL_SYMBOL => GenerationTile::WALL,
                    FLOOR_SYMBOL => GenerationTile::FLOOR,
                    DOOR_SYMBOL => GenerationTile::DOOR,
                    _ => {
                        return Err(TemplateError::UnknownSymbol {
                            name,
                            symbol,
                            col: col_idx,
                            row: row_idx,
                        });
                    }
                };

                contents.push(tile);
            }
        }

        if width < MIN_ROOM_EXTENT as usize || height < MIN_ROOM_EXTENT as usize {
            return Err(TemplateError::TooSmall {
                name,
                width,
                height,
            });
        }

        Ok(RoomTemplate {
            name,
            width: width as u32,
            height: height as u32,
            contents,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// A fresh, unplaced room with this template's contents.
    pub fn instantiate(&self) -> Room {
        Room::from_contents(self.width, self.height, self.contents.clone())
    }
}

/// A read-only collection of templates keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomTemplateSet {
    templates: BTreeMap<String, RoomTemplate>,
}

impl RoomTemplateSet {
    pub fn new() -> Self {
        RoomTemplateSet {
            templates: BTreeMap::new(),
        }
    }

    /// Adds a template, returning the one it replaced under the same name.
    pub fn insert(&mut self, template: RoomTemplate) -> Option<RoomTemplate> {
        self.templates.insert(template.name.clone(), template)
    }

    pub fn get(&self, name: &str) -> Option<&RoomTemplate> {
        self.templates.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl FromIterator<RoomTemplate> for RoomTemplateSet {
    fn from_iter<T: IntoIterator<Item = RoomTemplate>>(iter: T) -> Self {
        let mut set = RoomTemplateSet::new();

        for template in iter {
            set.insert(template);
        }

        set
    }
}
