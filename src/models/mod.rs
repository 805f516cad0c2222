// Models module - exports all model types

mod book;
mod coordinate;
mod pick_path;
mod warehouse;

// Re-export model types
pub use self::book::{AisleSide, Book, ColumnTag};
pub use self::coordinate::Coordinate;
pub use self::pick_path::{
    BookLocation, PathStep, PathType, PickPathFile, PickPathInformation, PickPathRecord,
    PICK_PATH_FILE_FORMAT_VERSION,
};
pub use self::warehouse::{CellKind, Warehouse};

// Walking cost in unit steps
pub type Cost = u32;
