// PNG rendering of a pick path over the warehouse grid

use plotters::prelude::*;
use std::path::Path;

use crate::error::{PickPathError, Result};
use crate::models::{CellKind, Coordinate, PickPathInformation, Warehouse};

// Side of one grid cell in pixels
const CELL_PX: i32 = 15;

const NAVIGABLE: RGBColor = RGBColor(255, 255, 255);
const OBSTACLE: RGBColor = RGBColor(170, 170, 170);
const SHELF: RGBColor = RGBColor(255, 204, 0);
const PATH: RGBColor = RGBColor(0, 122, 255);
const TARGET: RGBColor = RGBColor(76, 217, 100);
const WAYPOINT_LINE: RGBColor = RGBColor(255, 59, 48);
const GRID_LINE: RGBColor = RGBColor(220, 220, 220);

fn render_error<E: std::fmt::Display>(e: E) -> PickPathError {
    PickPathError::Render(e.to_string())
}

fn cell_rect(cell: Coordinate, style: ShapeStyle) -> Rectangle<(i32, i32)> {
    let (x, y) = (cell.col as i32 * CELL_PX, cell.row as i32 * CELL_PX);
    Rectangle::new([(x, y), (x + CELL_PX, y + CELL_PX)], style)
}

fn cell_center(cell: Coordinate) -> (i32, i32) {
    (
        cell.col as i32 * CELL_PX + CELL_PX / 2,
        cell.row as i32 * CELL_PX + CELL_PX / 2,
    )
}

/// Draw the grid, the cell-by-cell path, the shortcut waypoints and the target shelves
pub fn render_pick_path(
    warehouse: &Warehouse,
    information: &PickPathInformation,
    output: &Path,
) -> Result<()> {
    let width = (warehouse.num_cols() as i32 * CELL_PX) as u32;
    let height = (warehouse.num_rows() as i32 * CELL_PX) as u32;

    let root = BitMapBackend::new(output, (width, height)).into_drawing_area();
    root.fill(&NAVIGABLE).map_err(render_error)?;

    for row in 0..warehouse.num_rows() {
        for col in 0..warehouse.num_cols() {
            let cell = Coordinate::new(row, col);
            let color = match warehouse.classify(cell) {
                CellKind::Navigable => NAVIGABLE,
                CellKind::Obstacle => OBSTACLE,
                CellKind::Shelf(_) => SHELF,
            };
            root.draw(&cell_rect(cell, color.filled()))
                .map_err(render_error)?;
            root.draw(&cell_rect(cell, GRID_LINE.stroke_width(1)))
                .map_err(render_error)?;
        }
    }

    for step in &information.ordered_pick_path {
        for &cell in &step.cells {
            root.draw(&cell_rect(cell, PATH.filled()))
                .map_err(render_error)?;
        }
    }

    for picked in &information.ordered_books_and_locations {
        root.draw(&cell_rect(picked.location, TARGET.filled()))
            .map_err(render_error)?;
    }

    for step in &information.ordered_pick_path {
        let points: Vec<(i32, i32)> = step.waypoints.iter().copied().map(cell_center).collect();
        root.draw(&PathElement::new(points, WAYPOINT_LINE.stroke_width(2)))
            .map_err(render_error)?;
    }

    root.present().map_err(render_error)?;
    Ok(())
}
