use petgraph::algo::{astar, dijkstra};
use petgraph::graphmap::UnGraphMap;
use std::collections::HashMap;

use crate::models::{Coordinate, Cost, Warehouse};

/// Cost of one step between neighbouring cells unless configured otherwise
pub const DEFAULT_UNIT_COST: Cost = 1;

/// Walkable graph over the navigable cells of a warehouse
///
/// Nodes are navigable cells; every pair of 4-adjacent navigable cells is joined by
/// an undirected edge of `unit_cost`. Shelves and obstacles are simply absent, so no
/// route can cross them.
#[derive(Debug, Clone)]
pub struct NavGraph {
    graph: UnGraphMap<Coordinate, Cost>,
    unit_cost: Cost,
}

impl NavGraph {
    /// Build the navigable graph of a warehouse
    pub fn build(warehouse: &Warehouse, unit_cost: Cost) -> Self {
        let mut graph = UnGraphMap::new();

        for cell in warehouse.navigable_cells() {
            graph.add_node(cell);
        }

        // Linking each cell to its right and lower neighbour covers every adjacent pair once
        for cell in warehouse.navigable_cells() {
            let right = Coordinate::new(cell.row, cell.col + 1);
            let down = cell.below();
            for neighbor in [right, down] {
                if warehouse.is_navigable(neighbor) {
                    graph.add_edge(cell, neighbor, unit_cost);
                }
            }
        }

        NavGraph { graph, unit_cost }
    }

    pub fn unit_cost(&self) -> Cost {
        self.unit_cost
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, cell: Coordinate) -> bool {
        self.graph.contains_node(cell)
    }

    /// Weight of the edge between two cells, if they are joined
    pub fn edge_weight(&self, a: Coordinate, b: Coordinate) -> Option<Cost> {
        self.graph.edge_weight(a, b).copied()
    }

    /// All edges as (a, b, weight)
    pub fn edges(&self) -> impl Iterator<Item = (Coordinate, Coordinate, Cost)> + '_ {
        self.graph.all_edges().map(|(a, b, weight)| (a, b, *weight))
    }

    pub fn neighbors(&self, cell: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        self.graph.neighbors(cell)
    }

    /// Shortest distance from `start` to every reachable cell
    pub fn distances_from(&self, start: Coordinate) -> HashMap<Coordinate, Cost> {
        if !self.contains(start) {
            return HashMap::new();
        }
        dijkstra(&self.graph, start, None, |(_, _, weight)| *weight)
    }

    /// Shortest distance between two cells
    pub fn shortest_path_length(&self, start: Coordinate, goal: Coordinate) -> Option<Cost> {
        // Special case: start and goal are the same cell
        if start == goal {
            return self.contains(start).then_some(0);
        }
        if !self.contains(start) || !self.contains(goal) {
            return None;
        }
        dijkstra(&self.graph, start, Some(goal), |(_, _, weight)| *weight)
            .get(&goal)
            .copied()
    }

    /// Shortest cell-by-cell route between two cells, both ends included
    pub fn shortest_path(&self, start: Coordinate, goal: Coordinate) -> Option<Vec<Coordinate>> {
        if !self.contains(start) || !self.contains(goal) {
            return None;
        }

        let unit_cost = self.unit_cost;
        astar(
            &self.graph,
            start,
            |cell| cell == goal,
            |(_, _, weight)| *weight,
            // Manhattan distance never overestimates on a 4-connected grid
            |cell| cell.manhattan_distance_to(&goal) as Cost * unit_cost,
        )
        .map(|(_, path)| path)
    }
}
