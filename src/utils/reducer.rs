// Reduction of a pick request to a small complete graph for the TSP solver

use std::collections::HashMap;

use crate::error::{PickPathError, Result};
use crate::models::{BookLocation, Coordinate, Cost, Warehouse};
use crate::utils::grid_graph::NavGraph;

/// Complete weighted graph over the source and the distinct access points
///
/// Node 0 is always the source. Weights are symmetric shortest-path distances
/// through the navigable graph; `None` marks a missing edge.
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedGraph {
    nodes: Vec<Coordinate>,
    weights: Vec<Vec<Option<Cost>>>,
}

impl ReducedGraph {
    /// Index of the source node
    pub const SOURCE: usize = 0;

    /// Builds a reduced graph from an explicit weight matrix
    pub fn new(nodes: Vec<Coordinate>, weights: Vec<Vec<Option<Cost>>>) -> Result<Self> {
        if weights.len() != nodes.len() || weights.iter().any(|row| row.len() != nodes.len()) {
            return Err(PickPathError::InvalidInput(format!(
                "weight matrix must be {0}x{0}",
                nodes.len()
            )));
        }
        Ok(Self { nodes, weights })
    }

    /// Builds a fully connected reduced graph from a cost matrix
    pub fn from_matrix(nodes: Vec<Coordinate>, matrix: &[Vec<Cost>]) -> Result<Self> {
        let weights = matrix
            .iter()
            .map(|row| row.iter().copied().map(Some).collect())
            .collect();
        Self::new(nodes, weights)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Grid cell a node stands for (the source itself, or an access point)
    pub fn node(&self, index: usize) -> Coordinate {
        self.nodes[index]
    }

    pub fn weight(&self, from: usize, to: usize) -> Option<Cost> {
        if from == to {
            return Some(0);
        }
        self.weights.get(from)?.get(to).copied().flatten()
    }
}

/// Reduced graph plus the books that collapsed onto each of its nodes
#[derive(Debug, Clone)]
pub struct Reduction {
    pub graph: ReducedGraph,

    /// Books per node, in the order they were drawn; empty for the source
    pub node_books: Vec<Vec<BookLocation>>,
}

impl Reduction {
    pub fn book_count(&self) -> usize {
        self.node_books.iter().map(Vec::len).sum()
    }
}

/// Reduce the selected books and the source to a complete graph
///
/// Books sharing an access point (typically the same shelving column) collapse to
/// a single node. Each edge weight is the true walking distance between access
/// points, found with one Dijkstra search per node.
pub fn reduce(
    warehouse: &Warehouse,
    graph: &NavGraph,
    selection: &[BookLocation],
    source: Coordinate,
) -> Result<Reduction> {
    if !warehouse.is_navigable(source) {
        return Err(PickPathError::InvalidInput(format!(
            "source {} must be navigable",
            source
        )));
    }

    let mut nodes = vec![source];
    let mut node_books: Vec<Vec<BookLocation>> = vec![Vec::new()];
    let mut node_index: HashMap<Coordinate, usize> = HashMap::new();

    for selected in selection {
        if warehouse.column_tag_at(selected.location).is_none() {
            return Err(PickPathError::InvalidInput(format!(
                "{} is not a shelf cell",
                selected.location
            )));
        }
        let access = warehouse.access_point(selected.location)?;

        // Books are never merged into the source node, even when picked from the source cell
        let index = *node_index.entry(access).or_insert_with(|| {
            nodes.push(access);
            node_books.push(Vec::new());
            nodes.len() - 1
        });
        node_books[index].push(selected.clone());
    }

    let n = nodes.len();
    let mut weights = vec![vec![None; n]; n];
    for i in 0..n {
        let distances = graph.distances_from(nodes[i]);
        weights[i][i] = Some(0);
        for j in (i + 1)..n {
            let distance = distances
                .get(&nodes[j])
                .copied()
                .ok_or(PickPathError::Unreachable {
                    from: nodes[i],
                    to: nodes[j],
                })?;
            weights[i][j] = Some(distance);
            weights[j][i] = Some(distance);
        }
    }

    Ok(Reduction {
        graph: ReducedGraph::new(nodes, weights)?,
        node_books,
    })
}
