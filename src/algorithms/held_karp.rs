use crate::algorithms::{Tour, TspSolver};
use crate::error::{PickPathError, Result};
use crate::models::Cost;
use crate::utils::reducer::ReducedGraph;

// Marks an unreachable DP state
const INFINITE: Cost = Cost::MAX;

// No predecessor: the state starts straight from the source
const NO_PARENT: usize = usize::MAX;

/// Exact Held-Karp solver for closed tours over a reduced graph
///
/// `cost[S][j]` is the cheapest walk that leaves the source, visits exactly the
/// targets in `S` and stops at `j`. Runs in O(n² · 2ⁿ) time and O(n · 2ⁿ) memory.
/// On equal cost the lowest-index predecessor, and then the lowest-index final
/// target, wins, so the tour is reproducible.
#[derive(Debug, Clone)]
pub struct HeldKarp {
    /// Largest number of non-source nodes accepted
    pub max_targets: usize,
}

impl HeldKarp {
    pub const DEFAULT_MAX_TARGETS: usize = 20;

    pub fn new() -> Self {
        Self {
            max_targets: Self::DEFAULT_MAX_TARGETS,
        }
    }

    pub fn with_max_targets(max_targets: usize) -> Self {
        Self { max_targets }
    }

    /// Dense distance matrix, failing on the first missing edge
    fn distance_matrix(graph: &ReducedGraph) -> Result<Vec<Vec<Cost>>> {
        let n = graph.len();
        let mut dist = vec![vec![0; n]; n];
        for (from, row) in dist.iter_mut().enumerate() {
            for (to, cell) in row.iter_mut().enumerate() {
                *cell = graph
                    .weight(from, to)
                    .ok_or(PickPathError::IncompleteGraph { from, to })?;
            }
        }
        Ok(dist)
    }
}

impl Default for HeldKarp {
    fn default() -> Self {
        Self::new()
    }
}

impl TspSolver for HeldKarp {
    fn solve(&self, graph: &ReducedGraph, source: usize) -> Result<Tour> {
        if source >= graph.len() {
            return Err(PickPathError::InvalidInput(format!(
                "source index {} outside a graph of {} nodes",
                source,
                graph.len()
            )));
        }

        let targets: Vec<usize> = (0..graph.len()).filter(|&node| node != source).collect();
        let m = targets.len();
        if m == 0 {
            return Err(PickPathError::TooFewNodes);
        }
        if m > self.max_targets {
            return Err(PickPathError::TooManyNodes {
                targets: m,
                limit: self.max_targets,
            });
        }

        let dist = Self::distance_matrix(graph)?;
        let full = (1usize << m) - 1;

        // Flattened [subset][last target] tables
        let mut cost = vec![INFINITE; (full + 1) * m];
        let mut parent = vec![NO_PARENT; (full + 1) * m];

        for (j, &target) in targets.iter().enumerate() {
            cost[(1 << j) * m + j] = dist[source][target];
        }

        // Every subset is larger than the subsets it extends, so ascending order works
        for subset in 1..=full {
            for j in 0..m {
                let bit = 1 << j;
                if subset & bit == 0 || subset == bit {
                    continue;
                }
                let previous = subset ^ bit;

                let mut best = INFINITE;
                let mut best_parent = NO_PARENT;
                for i in 0..m {
                    if previous & (1 << i) == 0 {
                        continue;
                    }
                    let reached = cost[previous * m + i];
                    if reached == INFINITE {
                        continue;
                    }
                    let candidate = reached.saturating_add(dist[targets[i]][targets[j]]);
                    if candidate < best {
                        best = candidate;
                        best_parent = i;
                    }
                }

                cost[subset * m + j] = best;
                parent[subset * m + j] = best_parent;
            }
        }

        // Close the cycle back to the source
        let mut best = INFINITE;
        let mut last = NO_PARENT;
        for (j, &target) in targets.iter().enumerate() {
            let reached = cost[full * m + j];
            if reached == INFINITE {
                continue;
            }
            let candidate = reached.saturating_add(dist[target][source]);
            if candidate < best {
                best = candidate;
                last = j;
            }
        }
        if last == NO_PARENT {
            return Err(PickPathError::Invariant(
                "Held-Karp found no closing tour over a complete graph".to_string(),
            ));
        }

        // Walk the back-pointers from the final target to the first one
        let mut order = Vec::with_capacity(m);
        let mut subset = full;
        let mut current = last;
        while current != NO_PARENT {
            order.push(targets[current]);
            let previous = parent[subset * m + current];
            subset ^= 1 << current;
            current = previous;
        }
        order.reverse();

        if order.len() != m || subset != 0 {
            return Err(PickPathError::Invariant(format!(
                "Held-Karp reconstructed {} of {} targets",
                order.len(),
                m
            )));
        }

        let mut nodes = Vec::with_capacity(m + 2);
        nodes.push(source);
        nodes.extend(order);
        nodes.push(source);

        Ok(Tour { nodes, cost: best })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    fn nodes(n: usize) -> Vec<Coordinate> {
        (0..n).map(|i| Coordinate::new(0, i)).collect()
    }

    #[test]
    fn test_single_target() {
        let graph = ReducedGraph::from_matrix(nodes(2), &[vec![0, 7], vec![7, 0]]).unwrap();
        let tour = HeldKarp::new().solve(&graph, 0).unwrap();

        assert_eq!(tour.nodes, vec![0, 1, 0]);
        assert_eq!(tour.cost, 14);
    }

    #[test]
    fn test_square_tour() {
        // Four corners of a square, diagonals expensive
        let matrix = vec![
            vec![0, 1, 5, 1],
            vec![1, 0, 1, 5],
            vec![5, 1, 0, 1],
            vec![1, 5, 1, 0],
        ];
        let graph = ReducedGraph::from_matrix(nodes(4), &matrix).unwrap();
        let tour = HeldKarp::new().solve(&graph, 0).unwrap();

        assert_eq!(tour.cost, 4);
        // Both directions cost 4; the lowest final target wins the tie
        assert_eq!(tour.nodes, vec![0, 3, 2, 1, 0]);
        assert_eq!(tour.cost, HeldKarp::new().tour_cost(&graph, &tour.nodes).unwrap());
    }

    #[test]
    fn test_asymmetric_weights() {
        let matrix = vec![vec![0, 1, 10], vec![10, 0, 1], vec![1, 10, 0]];
        let graph = ReducedGraph::from_matrix(nodes(3), &matrix).unwrap();
        let tour = HeldKarp::new().solve(&graph, 0).unwrap();

        assert_eq!(tour.nodes, vec![0, 1, 2, 0]);
        assert_eq!(tour.cost, 3);
    }

    #[test]
    fn test_non_zero_source() {
        let matrix = vec![vec![0, 2, 9], vec![2, 0, 4], vec![9, 4, 0]];
        let graph = ReducedGraph::from_matrix(nodes(3), &matrix).unwrap();
        let tour = HeldKarp::new().solve(&graph, 2).unwrap();

        assert_eq!(tour.nodes.first(), Some(&2));
        assert_eq!(tour.nodes.last(), Some(&2));
        assert_eq!(tour.cost, 15);
    }

    #[test]
    fn test_rejects_source_only_graph() {
        let graph = ReducedGraph::from_matrix(nodes(1), &[vec![0]]).unwrap();
        assert!(matches!(
            HeldKarp::new().solve(&graph, 0),
            Err(PickPathError::TooFewNodes)
        ));
    }

    #[test]
    fn test_rejects_incomplete_graph() {
        let weights = vec![
            vec![Some(0), Some(1), Some(1)],
            vec![Some(1), Some(0), None],
            vec![Some(1), None, Some(0)],
        ];
        let graph = ReducedGraph::new(nodes(3), weights).unwrap();
        assert!(matches!(
            HeldKarp::new().solve(&graph, 0),
            Err(PickPathError::IncompleteGraph { from: 1, to: 2 })
        ));
    }

    #[test]
    fn test_target_limit() {
        let n = 5;
        let matrix = vec![vec![1; n]; n];
        let graph = ReducedGraph::from_matrix(nodes(n), &matrix).unwrap();

        assert!(matches!(
            HeldKarp::with_max_targets(3).solve(&graph, 0),
            Err(PickPathError::TooManyNodes {
                targets: 4,
                limit: 3
            })
        ));
        assert!(HeldKarp::with_max_targets(4).solve(&graph, 0).is_ok());
    }
}
