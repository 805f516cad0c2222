// Pick path models: the generated artifact and its serialized form

use serde::Serialize;

use crate::models::{Book, Coordinate, Cost};

/// Output file format version
pub const PICK_PATH_FILE_FORMAT_VERSION: &str = "1.1";

/// A book together with the shelf cell it sits on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookLocation {
    pub book: Book,
    pub location: Coordinate,
}

impl BookLocation {
    pub fn new(book: Book, location: Coordinate) -> Self {
        Self { book, location }
    }
}

/// One leg of a pick path, ending at a book or, for the last leg, back at the source
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStep {
    /// 1-based position of the leg in the path
    pub step_number: usize,

    /// Walk from the previous stop to this one, one grid step at a time
    #[serde(rename = "cellByCellPathToTargetBookLocation")]
    pub cells: Vec<Coordinate>,

    /// Sparse waypoints with clear line of sight between consecutive entries
    pub waypoints: Vec<Coordinate>,

    /// Book picked at the end of this leg; `None` on the return to the source
    #[serde(rename = "targetBookAndTargetBookLocation")]
    pub target: Option<BookLocation>,
}

impl PathStep {
    /// Number of unit moves in the cell-by-cell walk
    pub fn move_count(&self) -> usize {
        self.cells
            .windows(2)
            .map(|pair| pair[0].manhattan_distance_to(&pair[1]))
            .sum()
    }
}

/// Everything known about one generated pick path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickPathInformation {
    /// Books as drawn, before optimisation
    pub unordered_books_and_locations: Vec<BookLocation>,

    /// Books in optimal picking order
    pub ordered_books_and_locations: Vec<BookLocation>,

    pub ordered_pick_path: Vec<PathStep>,

    /// Optimal tour cost over the reduced graph
    #[serde(skip)]
    pub tour_cost: Cost,
}

/// Whether a record belongs to the training or the testing split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    Training,
    Testing,
}

/// One generated example
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickPathRecord {
    pub path_id: usize,
    pub path_type: PathType,
    pub pick_path_information: PickPathInformation,
}

/// Top-level output document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickPathFile {
    pub version: &'static str,
    pub pick_paths: Vec<PickPathRecord>,
}

impl PickPathFile {
    pub fn new(pick_paths: Vec<PickPathRecord>) -> Self {
        Self {
            version: PICK_PATH_FILE_FORMAT_VERSION,
            pick_paths,
        }
    }
}
