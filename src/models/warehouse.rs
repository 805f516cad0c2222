// Warehouse model: the immutable grid layout plus the books shelved in it

use std::collections::{HashMap, HashSet};

use crate::error::{PickPathError, Result};
use crate::models::{AisleSide, Book, ColumnTag, Coordinate};

/// Classification of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Navigable,
    Obstacle,
    Shelf(ColumnTag),
}

/// Grid warehouse with a bijection between shelving columns and shelf cells
#[derive(Debug, Clone)]
pub struct Warehouse {
    num_rows: usize,
    num_cols: usize,

    /// Row-major cell classification
    cells: Vec<CellKind>,

    /// Shelving column -> shelf cell
    column_locations: HashMap<ColumnTag, Coordinate>,

    /// Catalog of every book, in load order
    books: Vec<Book>,
}

impl Warehouse {
    /// Builds a warehouse from row strings (`.` navigable, `#` obstacle, `S` shelf),
    /// the column-to-shelf mapping and the book catalog.
    ///
    /// Fails if the declared dimensions disagree with the rows, if the mapping is not
    /// a bijection onto the shelf cells, if a shelf cannot be reached from its aisle
    /// side, or if a book references an unknown column.
    pub fn new<S: AsRef<str>>(
        num_rows: usize,
        num_cols: usize,
        rows: &[S],
        columns: &[(ColumnTag, Coordinate)],
        books: Vec<Book>,
    ) -> Result<Self> {
        if rows.len() != num_rows {
            return Err(PickPathError::InvalidLayout(format!(
                "declared {} rows but found {}",
                num_rows,
                rows.len()
            )));
        }

        // Shelf cells get their tag from the mapping below
        let mut cells = Vec::with_capacity(num_rows * num_cols);
        let mut shelf_cells = HashSet::new();
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != num_cols {
                return Err(PickPathError::InvalidLayout(format!(
                    "row {} has {} cells, expected {}",
                    r,
                    row.chars().count(),
                    num_cols
                )));
            }
            for (c, symbol) in row.chars().enumerate() {
                let kind = match symbol {
                    '.' => CellKind::Navigable,
                    '#' => CellKind::Obstacle,
                    'S' => {
                        shelf_cells.insert(Coordinate::new(r, c));
                        CellKind::Obstacle
                    }
                    other => {
                        return Err(PickPathError::InvalidLayout(format!(
                            "unknown cell symbol {:?} at ({}, {})",
                            other, r, c
                        )))
                    }
                };
                cells.push(kind);
            }
        }

        let mut column_locations = HashMap::new();
        let mut tagged = HashSet::new();
        for &(tag, location) in columns {
            if !shelf_cells.contains(&location) {
                return Err(PickPathError::InvalidLayout(format!(
                    "column {} is mapped to {} which is not a shelf cell",
                    tag, location
                )));
            }
            if column_locations.insert(tag, location).is_some() {
                return Err(PickPathError::InvalidLayout(format!(
                    "column {} is mapped more than once",
                    tag
                )));
            }
            if !tagged.insert(location) {
                return Err(PickPathError::InvalidLayout(format!(
                    "shelf cell {} carries more than one column",
                    location
                )));
            }
            cells[location.row * num_cols + location.col] = CellKind::Shelf(tag);
        }

        if let Some(untagged) = shelf_cells.difference(&tagged).min() {
            return Err(PickPathError::InvalidLayout(format!(
                "shelf cell {} has no shelving column",
                untagged
            )));
        }

        let warehouse = Self {
            num_rows,
            num_cols,
            cells,
            column_locations,
            books: Vec::new(),
        };

        // Every shelf must open onto a walkable cell on its aisle side
        for (&tag, &location) in &warehouse.column_locations {
            warehouse.access_point(location).map_err(|_| {
                PickPathError::InvalidLayout(format!(
                    "shelf {} at {} has no navigable access cell",
                    tag, location
                ))
            })?;
        }

        warehouse.with_books(books)
    }

    /// Attaches the catalog, checking every book sits on a known column
    fn with_books(mut self, books: Vec<Book>) -> Result<Self> {
        let mut seen = HashSet::new();
        for book in &books {
            if !self.column_locations.contains_key(&book.column) {
                return Err(PickPathError::UnknownColumn(book.column.to_string()));
            }
            if !seen.insert(book.tag()) {
                return Err(PickPathError::InvalidCatalog(format!(
                    "more than one book at {}",
                    book.tag()
                )));
            }
        }
        self.books = books;
        Ok(self)
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Classifies a cell. Anything outside the grid counts as an obstacle.
    pub fn classify(&self, coordinate: Coordinate) -> CellKind {
        if coordinate.row >= self.num_rows || coordinate.col >= self.num_cols {
            return CellKind::Obstacle;
        }
        self.cells[coordinate.row * self.num_cols + coordinate.col]
    }

    pub fn is_navigable(&self, coordinate: Coordinate) -> bool {
        self.classify(coordinate) == CellKind::Navigable
    }

    /// Shelf cell holding the given column
    pub fn shelf_coordinate(&self, tag: &ColumnTag) -> Option<Coordinate> {
        self.column_locations.get(tag).copied()
    }

    /// Column shelved at the given cell, if it is a shelf
    pub fn column_tag_at(&self, coordinate: Coordinate) -> Option<ColumnTag> {
        match self.classify(coordinate) {
            CellKind::Shelf(tag) => Some(tag),
            _ => None,
        }
    }

    /// Shelf cell holding a book
    pub fn book_location(&self, book: &Book) -> Result<Coordinate> {
        self.shelf_coordinate(&book.column)
            .ok_or_else(|| PickPathError::UnknownColumn(book.column.to_string()))
    }

    /// Shelf cells for a selection of books, in the same order
    pub fn book_locations(&self, books: &[Book]) -> Result<Vec<Coordinate>> {
        books.iter().map(|book| self.book_location(book)).collect()
    }

    /// Navigable cell from which a shelf is picked
    pub fn access_point(&self, shelf: Coordinate) -> Result<Coordinate> {
        let tag = self.column_tag_at(shelf).ok_or_else(|| {
            PickPathError::InvalidInput(format!("{} is not a shelf cell", shelf))
        })?;

        let access = match tag.access_side() {
            AisleSide::Above => shelf.above(),
            AisleSide::Below => Some(shelf.below()),
        };

        match access {
            Some(cell) if self.is_navigable(cell) => Ok(cell),
            _ => Err(PickPathError::InvalidLayout(format!(
                "shelf {} at {} has no navigable access cell",
                tag, shelf
            ))),
        }
    }

    /// All navigable cells in row-major order
    pub fn navigable_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.num_rows)
            .flat_map(move |r| (0..self.num_cols).map(move |c| Coordinate::new(r, c)))
            .filter(move |&cell| self.is_navigable(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(aisle: char, column: u32) -> ColumnTag {
        ColumnTag::new(aisle, column).unwrap()
    }

    fn create_test_warehouse() -> Warehouse {
        let rows = [".....", ".SS..", ".....", "..SS.", "....#"];
        let columns = [
            (tag('A', 100), Coordinate::new(1, 1)),
            (tag('A', 102), Coordinate::new(1, 2)),
            (tag('B', 101), Coordinate::new(3, 2)),
            (tag('B', 103), Coordinate::new(3, 3)),
        ];
        let books = vec![
            Book::new("First", "Author", 'A', 100, 1).unwrap(),
            Book::new("Second", "Author", 'A', 100, 2).unwrap(),
            Book::new("Third", "Author", 'B', 103, 1).unwrap(),
        ];
        Warehouse::new(5, 5, &rows, &columns, books).unwrap()
    }

    #[test]
    fn test_classify() {
        let warehouse = create_test_warehouse();
        assert_eq!(warehouse.classify(Coordinate::new(0, 0)), CellKind::Navigable);
        assert_eq!(warehouse.classify(Coordinate::new(4, 4)), CellKind::Obstacle);
        assert_eq!(
            warehouse.classify(Coordinate::new(1, 2)),
            CellKind::Shelf(tag('A', 102))
        );
        // Outside the grid
        assert_eq!(warehouse.classify(Coordinate::new(9, 0)), CellKind::Obstacle);
    }

    #[test]
    fn test_shelf_mapping_round_trip() {
        let warehouse = create_test_warehouse();
        for column in [tag('A', 100), tag('A', 102), tag('B', 101), tag('B', 103)] {
            let location = warehouse.shelf_coordinate(&column).unwrap();
            assert_eq!(warehouse.column_tag_at(location), Some(column));
        }
        assert_eq!(warehouse.column_tag_at(Coordinate::new(0, 0)), None);
        assert_eq!(warehouse.shelf_coordinate(&tag('C', 100)), None);
    }

    #[test]
    fn test_access_points_follow_aisle_side() {
        let warehouse = create_test_warehouse();
        // Aisle A is picked from above, aisle B from below
        assert_eq!(
            warehouse.access_point(Coordinate::new(1, 1)).unwrap(),
            Coordinate::new(0, 1)
        );
        assert_eq!(
            warehouse.access_point(Coordinate::new(3, 3)).unwrap(),
            Coordinate::new(4, 3)
        );
        assert!(warehouse.access_point(Coordinate::new(0, 0)).is_err());
    }

    #[test]
    fn test_book_locations() {
        let warehouse = create_test_warehouse();
        let locations = warehouse.book_locations(warehouse.books()).unwrap();
        assert_eq!(
            locations,
            vec![
                Coordinate::new(1, 1),
                Coordinate::new(1, 1),
                Coordinate::new(3, 3)
            ]
        );
    }

    #[test]
    fn test_rejects_dimension_mismatch() {
        let rows = ["...", "..."];
        assert!(matches!(
            Warehouse::new(3, 3, &rows, &[], Vec::new()),
            Err(PickPathError::InvalidLayout(_))
        ));
        assert!(matches!(
            Warehouse::new(2, 4, &rows, &[], Vec::new()),
            Err(PickPathError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_rejects_broken_bijection() {
        let rows = ["...", ".SS", "..."];

        // Untagged shelf cell
        let columns = [(tag('A', 100), Coordinate::new(1, 1))];
        assert!(Warehouse::new(3, 3, &rows, &columns, Vec::new()).is_err());

        // One column on two cells
        let columns = [
            (tag('A', 100), Coordinate::new(1, 1)),
            (tag('A', 100), Coordinate::new(1, 2)),
        ];
        assert!(Warehouse::new(3, 3, &rows, &columns, Vec::new()).is_err());

        // Column mapped onto a navigable cell
        let columns = [
            (tag('A', 100), Coordinate::new(1, 1)),
            (tag('A', 102), Coordinate::new(0, 0)),
        ];
        assert!(Warehouse::new(3, 3, &rows, &columns, Vec::new()).is_err());
    }

    #[test]
    fn test_rejects_unreachable_shelf() {
        // Aisle A faces up, but the shelf sits on the top row
        let rows = ["S..", "..."];
        let columns = [(tag('A', 100), Coordinate::new(0, 0))];
        assert!(matches!(
            Warehouse::new(2, 3, &rows, &columns, Vec::new()),
            Err(PickPathError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_book_column() {
        let rows = ["...", ".S.", "..."];
        let columns = [(tag('A', 100), Coordinate::new(1, 1))];
        let books = vec![Book::new("Lost", "Nobody", 'A', 104, 1).unwrap()];
        assert!(matches!(
            Warehouse::new(3, 3, &rows, &columns, books),
            Err(PickPathError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_navigable_cells() {
        let warehouse = create_test_warehouse();
        let navigable: Vec<Coordinate> = warehouse.navigable_cells().collect();
        assert_eq!(navigable.len(), 25 - 4 - 1);
        assert!(navigable.iter().all(|&c| warehouse.is_navigable(c)));
    }
}
