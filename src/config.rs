//! Configuration loading for the pick path generator

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{PickPathError, Result};
use crate::models::{Coordinate, Cost};

/// Generator configuration; every field has a default
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Warehouse layout file
    pub warehouse_path: String,

    /// Book catalog file
    pub catalog_path: String,

    /// Where the generated pick paths are written
    pub output_path: String,

    /// Number of training examples, numbered first
    pub training_paths: usize,

    /// Number of testing examples, numbered after the training ones
    pub testing_paths: usize,

    /// Books drawn for every pick path
    pub books_per_pick_path: usize,

    /// Dispatch point every path starts and ends at
    pub source: Coordinate,

    /// Minimum distance, in cells, between a shortcut line and any non-navigable cell
    pub clearance_radius: f64,

    /// Cost of one grid step
    pub unit_cost: Cost,

    /// Seed for the book draws
    pub seed: u64,

    /// Directory for PNG renderings, one per path (disabled when unset)
    pub render_dir: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            warehouse_path: "warehouse.json".to_string(),
            catalog_path: "books.json".to_string(),
            output_path: "pick-paths.json".to_string(),
            training_paths: 20,
            testing_paths: 20,
            books_per_pick_path: 10,
            source: Coordinate::new(0, 0),
            clearance_radius: 0.25,
            unit_cost: 1,
            seed: 1,
            render_dir: None,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: GeneratorConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no pick path can be generated with
    pub fn validate(&self) -> Result<()> {
        if self.books_per_pick_path == 0 {
            return Err(PickPathError::InvalidInput(
                "booksPerPickPath must be at least 1".to_string(),
            ));
        }
        if self.unit_cost == 0 {
            return Err(PickPathError::InvalidInput(
                "unitCost must be positive".to_string(),
            ));
        }
        if !self.clearance_radius.is_finite() || self.clearance_radius < 0.0 {
            return Err(PickPathError::InvalidInput(format!(
                "clearanceRadius must be a non-negative number, got {}",
                self.clearance_radius
            )));
        }
        Ok(())
    }
}
