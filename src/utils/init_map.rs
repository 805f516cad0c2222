use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{PickPathError, Result};
use crate::models::{Book, ColumnTag, Coordinate, Warehouse};

/// Layout file format version understood by this crate
pub const WAREHOUSE_FORMAT_VERSION: &str = "1.0";

/// Shelving column entry of the layout file
#[derive(Debug, Clone, Deserialize)]
pub struct ShelvingColumnRecord {
    pub aisle: String,
    pub column: ShelfNumber,
    pub location: Coordinate,
}

/// Layout file: grid rows plus the column-to-shelf mapping
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseLayout {
    pub version: String,
    pub num_rows: usize,
    pub num_cols: usize,
    pub cells: Vec<String>,
    pub shelving_columns: Vec<ShelvingColumnRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogBook {
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogLocation {
    pub aisle: String,
    pub column: ShelfNumber,
    pub row: ShelfNumber,
}

/// One entry of the book catalog
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRecord {
    pub book: CatalogBook,
    pub location: CatalogLocation,
}

/// Column and row numbers appear both as numbers and as numeric strings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ShelfNumber {
    Number(u32),
    Text(String),
}

impl ShelfNumber {
    fn value(&self) -> Result<u32> {
        match self {
            ShelfNumber::Number(n) => Ok(*n),
            ShelfNumber::Text(text) => text.trim().parse().map_err(|_| {
                PickPathError::InvalidCatalog(format!("{:?} is not a shelf number", text))
            }),
        }
    }
}

fn parse_aisle(aisle: &str) -> Result<char> {
    let mut chars = aisle.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => Ok(letter),
        _ => Err(PickPathError::InvalidCatalog(format!(
            "aisle {:?} must be a single letter",
            aisle
        ))),
    }
}

impl CatalogRecord {
    pub fn into_book(self) -> Result<Book> {
        Book::new(
            self.book.title,
            self.book.author,
            parse_aisle(&self.location.aisle)?,
            self.location.column.value()?,
            self.location.row.value()?,
        )
    }
}

/// Parse the layout document, rejecting unknown format versions
pub fn parse_layout(json: &str) -> Result<WarehouseLayout> {
    let layout: WarehouseLayout = serde_json::from_str(json)?;
    if layout.version != WAREHOUSE_FORMAT_VERSION {
        return Err(PickPathError::UnsupportedVersion {
            found: layout.version,
            expected: WAREHOUSE_FORMAT_VERSION.to_string(),
        });
    }
    Ok(layout)
}

/// Parse the book catalog document
pub fn parse_catalog(json: &str) -> Result<Vec<Book>> {
    let records: Vec<CatalogRecord> = serde_json::from_str(json)?;
    records.into_iter().map(CatalogRecord::into_book).collect()
}

/// Assemble a warehouse from a parsed layout and catalog
pub fn build_warehouse(layout: &WarehouseLayout, books: Vec<Book>) -> Result<Warehouse> {
    let columns = layout
        .shelving_columns
        .iter()
        .map(|record| -> Result<(ColumnTag, Coordinate)> {
            let aisle = parse_aisle(&record.aisle)
                .map_err(|e| PickPathError::InvalidLayout(e.to_string()))?;
            Ok((ColumnTag::new(aisle, record.column.value()?)?, record.location))
        })
        .collect::<Result<Vec<_>>>()?;

    Warehouse::new(
        layout.num_rows,
        layout.num_cols,
        layout.cells.as_slice(),
        &columns,
        books,
    )
}

/// Load the warehouse layout and book catalog from disk
pub fn init_warehouse(layout_path: &Path, catalog_path: &Path) -> Result<Warehouse> {
    info!("Loading warehouse layout from {:?}", layout_path);
    let layout = parse_layout(&fs::read_to_string(layout_path)?)?;
    info!(
        "Loaded {}x{} grid with {} shelving columns",
        layout.num_rows,
        layout.num_cols,
        layout.shelving_columns.len()
    );

    info!("Loading book catalog from {:?}", catalog_path);
    let books = parse_catalog(&fs::read_to_string(catalog_path)?)?;
    info!("Loaded {} books", books.len());

    build_warehouse(&layout, books)
}
