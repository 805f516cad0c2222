// Stitching of per-leg shortest paths into one cell-by-cell walk

use crate::error::{PickPathError, Result};
use crate::models::{Coordinate, Cost, Warehouse};
use crate::utils::grid_graph::NavGraph;

/// Cell where a stop is walked to: the source itself, or a shelf's access point
fn walking_cell(warehouse: &Warehouse, stop: Coordinate, source: Coordinate) -> Result<Coordinate> {
    if stop == source {
        Ok(source)
    } else {
        warehouse.access_point(stop)
    }
}

/// Build one walk per consecutive pair of stops
///
/// Each leg is a shortest navigable path between the stops' walking cells, with the
/// shelf cell itself spliced onto either end when that end is a book rather than
/// the source.
pub fn stitch(
    warehouse: &Warehouse,
    graph: &NavGraph,
    locations: &[Coordinate],
    source: Coordinate,
) -> Result<Vec<Vec<Coordinate>>> {
    let mut legs = Vec::with_capacity(locations.len().saturating_sub(1));

    for pair in locations.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let start = walking_cell(warehouse, from, source)?;
        let goal = walking_cell(warehouse, to, source)?;

        let mut leg = Vec::new();
        if from != source {
            leg.push(from);
        }
        let path = graph
            .shortest_path(start, goal)
            .ok_or(PickPathError::Unreachable {
                from: start,
                to: goal,
            })?;
        leg.extend(path);
        if to != source {
            leg.push(to);
        }

        legs.push(leg);
    }

    Ok(legs)
}

/// Check every leg starts and ends at its stops and moves one cell at a time
pub fn verify_legs(legs: &[Vec<Coordinate>], locations: &[Coordinate]) -> Result<()> {
    if legs.len() + 1 != locations.len() {
        return Err(PickPathError::Invariant(format!(
            "{} legs for {} stops",
            legs.len(),
            locations.len()
        )));
    }

    for (i, leg) in legs.iter().enumerate() {
        let (expected_start, expected_end) = (locations[i], locations[i + 1]);
        if leg.first() != Some(&expected_start) || leg.last() != Some(&expected_end) {
            return Err(PickPathError::Invariant(format!(
                "leg {} runs {:?} -> {:?}, expected {} -> {}",
                i + 1,
                leg.first(),
                leg.last(),
                expected_start,
                expected_end
            )));
        }

        if let Some(pair) = leg.windows(2).find(|pair| !pair[0].is_adjacent_to(&pair[1])) {
            return Err(PickPathError::Invariant(format!(
                "leg {} jumps from {} to {}",
                i + 1,
                pair[0],
                pair[1]
            )));
        }
    }

    Ok(())
}

/// Check the walk costs what the solver promised
///
/// Every book adds two moves the reduced graph never sees: onto the shelf and
/// back off it.
pub fn verify_cost(
    legs: &[Vec<Coordinate>],
    tour_cost: Cost,
    book_count: usize,
    unit_cost: Cost,
) -> Result<()> {
    let moves: usize = legs
        .iter()
        .flat_map(|leg| leg.windows(2))
        .map(|pair| pair[0].manhattan_distance_to(&pair[1]))
        .sum();

    let walked = moves.checked_sub(2 * book_count).ok_or_else(|| {
        PickPathError::Invariant(format!(
            "{} moves cannot cover {} books",
            moves, book_count
        ))
    })?;

    if walked as u64 * unit_cost as u64 != tour_cost as u64 {
        return Err(PickPathError::Invariant(format!(
            "stitched walk costs {} but the tour costs {}",
            walked as u64 * unit_cost as u64,
            tour_cost
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColumnTag;
    use crate::utils::grid_graph::DEFAULT_UNIT_COST;

    fn create_test_warehouse() -> Warehouse {
        let rows = ["....", ".SS.", "...."];
        let columns = [
            (ColumnTag::new('A', 100).unwrap(), Coordinate::new(1, 1)),
            (ColumnTag::new('B', 101).unwrap(), Coordinate::new(1, 2)),
        ];
        Warehouse::new(3, 4, &rows, &columns, Vec::new()).unwrap()
    }

    #[test]
    fn test_legs_start_and_end_at_stops() {
        let warehouse = create_test_warehouse();
        let graph = NavGraph::build(&warehouse, DEFAULT_UNIT_COST);
        let source = Coordinate::new(0, 0);
        let locations = vec![
            source,
            Coordinate::new(1, 1),
            Coordinate::new(1, 2),
            source,
        ];

        let legs = stitch(&warehouse, &graph, &locations, source).unwrap();

        assert_eq!(legs.len(), 3);
        assert_eq!(
            legs[0],
            vec![Coordinate::new(0, 0), Coordinate::new(0, 1), Coordinate::new(1, 1)]
        );
        // Aisle A is picked from above, aisle B from below
        assert_eq!(legs[1].first(), Some(&Coordinate::new(1, 1)));
        assert_eq!(legs[1][1], Coordinate::new(0, 1));
        assert_eq!(legs[1][legs[1].len() - 2], Coordinate::new(2, 2));
        assert_eq!(legs[1].last(), Some(&Coordinate::new(1, 2)));
        assert_eq!(legs[2].last(), Some(&source));

        verify_legs(&legs, &locations).unwrap();
        // 1 + (0,1)->(2,2) is 5 + (2,2)->(0,0) is 4
        verify_cost(&legs, 10, 2, DEFAULT_UNIT_COST).unwrap();
    }

    #[test]
    fn test_same_shelf_twice() {
        let warehouse = create_test_warehouse();
        let graph = NavGraph::build(&warehouse, DEFAULT_UNIT_COST);
        let source = Coordinate::new(0, 0);
        let shelf = Coordinate::new(1, 1);
        let locations = vec![source, shelf, shelf, source];

        let legs = stitch(&warehouse, &graph, &locations, source).unwrap();
        assert_eq!(legs[1], vec![shelf, Coordinate::new(0, 1), shelf]);
        verify_legs(&legs, &locations).unwrap();
        verify_cost(&legs, 2, 2, DEFAULT_UNIT_COST).unwrap();
    }

    #[test]
    fn test_verify_rejects_gaps_and_wrong_ends() {
        let locations = vec![Coordinate::new(0, 0), Coordinate::new(0, 3)];

        let jumping = vec![vec![Coordinate::new(0, 0), Coordinate::new(0, 3)]];
        assert!(matches!(
            verify_legs(&jumping, &locations),
            Err(PickPathError::Invariant(_))
        ));

        let short = vec![vec![Coordinate::new(0, 0), Coordinate::new(0, 1)]];
        assert!(verify_legs(&short, &locations).is_err());
    }

    #[test]
    fn test_verify_cost_mismatch() {
        let legs = vec![vec![
            Coordinate::new(0, 0),
            Coordinate::new(0, 1),
            Coordinate::new(0, 2),
        ]];
        assert!(verify_cost(&legs, 2, 0, 1).is_ok());
        assert!(verify_cost(&legs, 4, 0, 2).is_ok());
        assert!(verify_cost(&legs, 3, 0, 1).is_err());
    }
}
