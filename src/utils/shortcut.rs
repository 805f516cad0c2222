// Line-of-sight simplification of cell-by-cell walks

use geo::{EuclideanDistance, Line};

use crate::models::{Coordinate, Warehouse};

/// Distance from a segment to the unit square of a grid cell (zero if it crosses it)
fn distance_to_cell(line: &Line<f64>, cell: Coordinate) -> f64 {
    let (x0, y0) = (cell.col as f64, cell.row as f64);
    let (x1, y1) = (x0 + 1.0, y0 + 1.0);
    let edges = [
        Line::new((x0, y0), (x1, y0)),
        Line::new((x1, y0), (x1, y1)),
        Line::new((x1, y1), (x0, y1)),
        Line::new((x0, y1), (x0, y0)),
    ];

    edges
        .iter()
        .map(|edge| line.euclidean_distance(edge))
        .fold(f64::INFINITY, f64::min)
}

/// True when the straight line between the centres of `a` and `b` keeps at least
/// `clearance_radius` away from every non-navigable cell
///
/// Only cells inside the segment's bounding box grown by the radius are tested.
pub fn is_clear_shot(
    warehouse: &Warehouse,
    a: Coordinate,
    b: Coordinate,
    clearance_radius: f64,
) -> bool {
    if a == b {
        return true;
    }

    let line = Line::new(a.center(), b.center());
    let reach = clearance_radius.max(0.0);

    // Cells whose square can come within `reach` of the segment's bounding box
    let low = |v: usize| (v as f64 + 0.5 - reach - 1.0).floor().max(0.0) as usize;
    let high = |v: usize, limit: usize| (((v as f64 + 0.5 + reach).floor() as usize) + 1).min(limit);
    let (min_x, max_x) = (low(a.col.min(b.col)), high(a.col.max(b.col), warehouse.num_cols()));
    let (min_y, max_y) = (low(a.row.min(b.row)), high(a.row.max(b.row), warehouse.num_rows()));

    for row in min_y..max_y {
        for col in min_x..max_x {
            let cell = Coordinate::new(row, col);
            if warehouse.is_navigable(cell) {
                continue;
            }
            if distance_to_cell(&line, cell) <= clearance_radius {
                return false;
            }
        }
    }

    true
}

/// Drop intermediate cells of a walk while keeping consecutive waypoints in line of sight
///
/// The first and last cells (shelf or source) are always kept. Among the cells in
/// between, each kept cell jumps to the farthest later cell with a clear shot; if
/// none exists the walk advances one cell, which is always a legal grid step.
pub fn shortcut(warehouse: &Warehouse, segment: &[Coordinate], clearance_radius: f64) -> Vec<Coordinate> {
    if segment.len() <= 3 {
        return segment.to_vec();
    }

    let interior = &segment[1..segment.len() - 1];
    let mut kept = vec![segment[0], interior[0]];

    let mut i = 0;
    while i + 1 < interior.len() {
        let next = ((i + 2)..interior.len())
            .rev()
            .find(|&j| is_clear_shot(warehouse, interior[i], interior[j], clearance_radius))
            .unwrap_or(i + 1);
        kept.push(interior[next]);
        i = next;
    }

    kept.push(segment[segment.len() - 1]);
    kept
}
