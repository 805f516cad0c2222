// Book model representing items shelved in the warehouse

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{PickPathError, Result};

/// Side of a shelving column from which its books are picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AisleSide {
    /// Reached from the row above the shelf
    Above,
    /// Reached from the row below the shelf
    Below,
}

/// Identity of one shelving column: aisle letter plus column number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnTag {
    pub aisle: char,
    pub column: u32,
}

impl ColumnTag {
    /// Creates a column tag, rejecting aisles that are not a single uppercase letter
    pub fn new(aisle: char, column: u32) -> Result<Self> {
        if !aisle.is_ascii_uppercase() {
            return Err(PickPathError::InvalidInput(format!(
                "aisle must be an uppercase letter, got {:?}",
                aisle
            )));
        }
        Ok(Self { aisle, column })
    }

    /// Aisles alternate sides: A, C, E, ... face the row above, B, D, F, ... the row below
    pub fn access_side(&self) -> AisleSide {
        if (self.aisle as u8 - b'A') % 2 == 0 {
            AisleSide::Above
        } else {
            AisleSide::Below
        }
    }
}

impl fmt::Display for ColumnTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.aisle, self.column)
    }
}

/// A book with its shelf address (aisle, column, row within the column)
#[derive(Debug, Clone)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub column: ColumnTag,
    pub row: u32,
}

impl Book {
    /// Creates a new book shelved at the given address
    pub fn new<S: Into<String>>(title: S, author: S, aisle: char, column: u32, row: u32) -> Result<Self> {
        Ok(Self {
            title: title.into(),
            author: author.into(),
            column: ColumnTag::new(aisle, column)?,
            row,
        })
    }

    /// Shelf tag, unique per book address
    pub fn tag(&self) -> String {
        format!("D-{}-{}-{}", self.column.aisle, self.column.column, self.row)
    }
}

// Two books are the same book when they sit at the same address
impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.column == other.column && self.row == other.row
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.column.hash(state);
        self.row.hash(state);
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} by {}", self.tag(), self.title, self.author)
    }
}

impl Serialize for Book {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Book", 3)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("author", &self.author)?;
        state.serialize_field("tag", &self.tag())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_tags() {
        let book = Book::new("Dune", "Frank Herbert", 'C', 104, 3).unwrap();
        assert_eq!(book.tag(), "D-C-104-3");
        assert_eq!(book.column.to_string(), "C-104");
        assert_eq!(book.to_string(), "D-C-104-3: Dune by Frank Herbert");
    }

    #[test]
    fn test_equality_by_address() {
        let a = Book::new("Dune", "Frank Herbert", 'C', 104, 3).unwrap();
        let b = Book::new("Another title", "Someone", 'C', 104, 3).unwrap();
        let c = Book::new("Dune", "Frank Herbert", 'C', 104, 4).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_access_side_alternates() {
        assert_eq!(ColumnTag::new('A', 100).unwrap().access_side(), AisleSide::Above);
        assert_eq!(ColumnTag::new('B', 101).unwrap().access_side(), AisleSide::Below);
        assert_eq!(ColumnTag::new('G', 100).unwrap().access_side(), AisleSide::Above);
        assert_eq!(ColumnTag::new('H', 111).unwrap().access_side(), AisleSide::Below);
    }

    #[test]
    fn test_rejects_bad_aisle() {
        assert!(ColumnTag::new('a', 100).is_err());
        assert!(ColumnTag::new('1', 100).is_err());
    }

    #[test]
    fn test_serialize() {
        let book = Book::new("Dune", "Frank Herbert", 'A', 100, 1).unwrap();
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["title"], "Dune");
        assert_eq!(value["author"], "Frank Herbert");
        assert_eq!(value["tag"], "D-A-100-1");
    }
}
