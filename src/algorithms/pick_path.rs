use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::algorithms::held_karp::HeldKarp;
use crate::algorithms::TspSolver;
use crate::error::{PickPathError, Result};
use crate::models::{
    Book, BookLocation, Coordinate, Cost, PathStep, PathType, PickPathInformation,
    PickPathRecord, Warehouse,
};
use crate::utils::expander::expand;
use crate::utils::grid_graph::NavGraph;
use crate::utils::reducer::{reduce, ReducedGraph};
use crate::utils::shortcut::shortcut;
use crate::utils::stitcher::{stitch, verify_cost, verify_legs};

/// Per-path generation parameters
#[derive(Debug, Clone, Copy)]
pub struct PickPathSettings {
    pub books_per_pick_path: usize,
    pub source: Coordinate,
    pub clearance_radius: f64,
    pub unit_cost: Cost,
}

/// Pick path generator over one immutable warehouse
///
/// The navigable graph is built once and shared, read-only, by every generation.
pub struct PickPathGenerator<'a, S: TspSolver = HeldKarp> {
    warehouse: &'a Warehouse,
    graph: NavGraph,
    solver: S,
    settings: PickPathSettings,
}

impl<'a> PickPathGenerator<'a, HeldKarp> {
    /// Creates a generator using the exact Held-Karp solver
    pub fn new(warehouse: &'a Warehouse, settings: PickPathSettings) -> Result<Self> {
        Self::with_solver(warehouse, settings, HeldKarp::new())
    }
}

impl<'a, S: TspSolver> PickPathGenerator<'a, S> {
    /// Creates a generator with a custom solver
    pub fn with_solver(warehouse: &'a Warehouse, settings: PickPathSettings, solver: S) -> Result<Self> {
        if !warehouse.is_navigable(settings.source) {
            return Err(PickPathError::InvalidInput(format!(
                "source {} must be navigable",
                settings.source
            )));
        }
        if settings.unit_cost == 0 {
            return Err(PickPathError::InvalidInput(
                "unit cost must be positive".to_string(),
            ));
        }

        let graph = NavGraph::build(warehouse, settings.unit_cost);
        debug!(
            "Built navigable graph with {} cells and {} links",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self {
            warehouse,
            graph,
            solver,
            settings,
        })
    }

    pub fn graph(&self) -> &NavGraph {
        &self.graph
    }

    pub fn settings(&self) -> &PickPathSettings {
        &self.settings
    }

    /// Draw `books_per_pick_path` distinct books at random
    pub fn choose_books<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Book>> {
        let books = self.warehouse.books();
        let requested = self.settings.books_per_pick_path;
        if requested == 0 || requested > books.len() {
            return Err(PickPathError::NotEnoughBooks {
                requested,
                available: books.len(),
            });
        }

        Ok(index::sample(rng, books.len(), requested)
            .iter()
            .map(|i| books[i].clone())
            .collect())
    }

    /// Draw books at random and plan the optimal pick path for them
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PickPathInformation> {
        debug!("Choosing {} books at random", self.settings.books_per_pick_path);
        let books = self.choose_books(rng)?;
        self.plan(&books)
    }

    /// Plan the optimal pick path for a given selection of books
    pub fn plan(&self, books: &[Book]) -> Result<PickPathInformation> {
        let source = self.settings.source;
        let locations = self.warehouse.book_locations(books)?;
        let unordered: Vec<BookLocation> = books
            .iter()
            .cloned()
            .zip(locations)
            .map(|(book, location)| BookLocation::new(book, location))
            .collect();

        // Books on the same column share an access point and become one node,
        // which is why the tour is expanded again below
        debug!("Reducing {} books to a complete graph", unordered.len());
        let reduction = reduce(self.warehouse, &self.graph, &unordered, source)?;

        debug!("Solving TSP over {} nodes", reduction.graph.len());
        let tour = self.solver.solve(&reduction.graph, ReducedGraph::SOURCE)?;

        debug!("Expanding tour of cost {} to book order", tour.cost);
        let stops = expand(&tour, &reduction, source)?;
        if stops.books.len() != unordered.len() + 2 || stops.locations.len() != unordered.len() + 2 {
            return Err(PickPathError::Invariant(format!(
                "{} books drawn but {} stops planned",
                unordered.len(),
                stops.books.len()
            )));
        }

        debug!("Stitching cell-by-cell path");
        let legs = stitch(self.warehouse, &self.graph, &stops.locations, source)?;

        debug!("Verifying stitched path");
        verify_legs(&legs, &stops.locations)?;
        verify_cost(&legs, tour.cost, unordered.len(), self.settings.unit_cost)?;

        debug!("Packaging pick path");
        let ordered: Vec<BookLocation> = stops.books[1..stops.books.len() - 1]
            .iter()
            .zip(&stops.locations[1..stops.locations.len() - 1])
            .map(|(book, &location)| {
                book.clone()
                    .map(|book| BookLocation::new(book, location))
                    .ok_or_else(|| {
                        PickPathError::Invariant(format!("no book planned at {}", location))
                    })
            })
            .collect::<Result<_>>()?;

        let last = legs.len() - 1;
        let ordered_pick_path = legs
            .into_iter()
            .enumerate()
            .map(|(j, cells)| {
                let waypoints = shortcut(self.warehouse, &cells, self.settings.clearance_radius);
                PathStep {
                    step_number: j + 1,
                    cells,
                    waypoints,
                    target: if j < last { Some(ordered[j].clone()) } else { None },
                }
            })
            .collect();

        Ok(PickPathInformation {
            unordered_books_and_locations: unordered,
            ordered_books_and_locations: ordered,
            ordered_pick_path,
            tour_cost: tour.cost,
        })
    }
}

impl<'a, S: TspSolver + Sync> PickPathGenerator<'a, S> {
    /// Generate a batch of labelled pick paths
    ///
    /// Path `i` (1-based) draws from its own generator seeded with `seed + i`, so the
    /// batch is reproducible no matter how the paths are spread over threads. Draws
    /// that fail on their input are logged and skipped; internal consistency errors
    /// abort the batch.
    pub fn generate_batch(
        &self,
        training_paths: usize,
        testing_paths: usize,
        seed: u64,
    ) -> Result<Vec<PickPathRecord>> {
        let available = self.warehouse.books().len();
        if self.settings.books_per_pick_path > available {
            return Err(PickPathError::NotEnoughBooks {
                requested: self.settings.books_per_pick_path,
                available,
            });
        }

        let records = (0..training_paths + testing_paths)
            .into_par_iter()
            .map(|i| {
                let path_id = i + 1;
                info!("Processing path #{}", path_id);

                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(path_id as u64));
                match self.generate(&mut rng) {
                    Ok(information) => {
                        info!("Completed path #{}", path_id);
                        Ok(Some(PickPathRecord {
                            path_id,
                            path_type: if i < training_paths {
                                PathType::Training
                            } else {
                                PathType::Testing
                            },
                            pick_path_information: information,
                        }))
                    }
                    Err(e) if e.is_input_error() => {
                        warn!("Skipping path #{}: {}", path_id, e);
                        Ok(None)
                    }
                    Err(e) => Err(e),
                }
            })
            .collect::<Result<Vec<Option<PickPathRecord>>>>()?;

        Ok(records.into_iter().flatten().collect())
    }
}
