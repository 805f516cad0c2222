pub mod held_karp;
pub mod pick_path;

// Common algorithm traits
use crate::error::{PickPathError, Result};
use crate::models::Cost;
use crate::utils::reducer::ReducedGraph;

/// A closed tour over a reduced graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    /// Node indices, starting and ending at the source
    pub nodes: Vec<usize>,

    /// Sum of the traversed edge weights
    pub cost: Cost,
}

impl Tour {
    /// Visited nodes between the leading and trailing source
    pub fn stops(&self) -> &[usize] {
        if self.nodes.len() < 2 {
            return &[];
        }
        &self.nodes[1..self.nodes.len() - 1]
    }
}

/// Trait for exact travelling salesman solvers
pub trait TspSolver {
    /// Minimum-cost closed tour from `source` through every other node exactly once
    fn solve(&self, graph: &ReducedGraph, source: usize) -> Result<Tour>;

    /// Calculate the cost of walking the given node sequence
    fn tour_cost(&self, graph: &ReducedGraph, nodes: &[usize]) -> Result<Cost> {
        nodes.windows(2).try_fold(0 as Cost, |total, pair| {
            graph
                .weight(pair[0], pair[1])
                .map(|weight| total + weight)
                .ok_or(PickPathError::IncompleteGraph {
                    from: pair[0],
                    to: pair[1],
                })
        })
    }
}
