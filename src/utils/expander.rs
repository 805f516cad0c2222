// Re-expansion of a node-level tour into book-level picking order

use crate::algorithms::Tour;
use crate::error::{PickPathError, Result};
use crate::models::{Book, Coordinate};
use crate::utils::reducer::Reduction;

/// Books and shelf cells in picking order
///
/// Both sequences start and end at the source, where no book is picked.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedStops {
    pub books: Vec<Option<Book>>,
    pub locations: Vec<Coordinate>,
}

/// Expand each tour node into the books that collapsed onto it
///
/// Books sharing a node keep the order in which they were drawn.
pub fn expand(tour: &Tour, reduction: &Reduction, source: Coordinate) -> Result<OrderedStops> {
    let mut books = vec![None];
    let mut locations = vec![source];
    let mut visited = vec![false; reduction.node_books.len()];

    for &node in tour.stops() {
        if visited.get(node).copied().unwrap_or(false) {
            return Err(PickPathError::Invariant(format!(
                "tour visits node {} twice",
                node
            )));
        }
        if let Some(seen) = visited.get_mut(node) {
            *seen = true;
        }

        let collapsed = reduction.node_books.get(node).ok_or_else(|| {
            PickPathError::Invariant(format!("tour visits unknown node {}", node))
        })?;
        for selected in collapsed {
            books.push(Some(selected.book.clone()));
            locations.push(selected.location);
        }
    }

    books.push(None);
    locations.push(source);

    // Every drawn book plus the source at both ends
    let expected = reduction.book_count() + 2;
    if books.len() != expected || locations.len() != expected {
        return Err(PickPathError::Invariant(format!(
            "expanded tour holds {} books and {} locations, expected {}",
            books.len(),
            locations.len(),
            expected
        )));
    }

    Ok(OrderedStops { books, locations })
}
