use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template \"{name}\" has no rows")]
    Empty { name: String },
    #[error("template \"{name}\" row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        name: String,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("template \"{name}\" has unknown symbol '{symbol}' at ({col}, {row})")]
    UnknownSymbol {
        name: String,
        symbol: char,
        col: usize,
        row: usize,
    },
    #[error("template \"{name}\" is [{width}x{height}], rooms must be at least [3x3]")]
    TooSmall {
        name: String,
        width: usize,
        height: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("grid dimensions [{columns}x{rows}] must be between 1 and {max} on each axis")]
    InvalidDimensions { columns: u32, rows: u32, max: u32 },
    #[error("padding range {min}..={max} is invalid, a padded room must fit in {ceiling} cells")]
    InvalidPadding { min: u32, max: u32, ceiling: u32 },
    #[error("room size range {min}..={max} is invalid, rooms must be {floor} to {ceiling} cells wide")]
    InvalidRoomSize {
        min: u32,
        max: u32,
        floor: u32,
        ceiling: u32,
    },
    #[error("no room template named \"{0}\"")]
    UnknownTemplate(String),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("{unreachable} room/s still unreachable after {attempts} attempt/s")]
    Disconnected { attempts: u32, unreachable: usize },
}

pub type Result<T, E = GeneratorError> = std::result::Result<T, E>;
