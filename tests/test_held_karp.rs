// Held-Karp against exhaustive enumeration on small random instances
use pick_path::models::{Coordinate, Cost};
use pick_path::utils::reducer::ReducedGraph;
use pick_path::{HeldKarp, TspSolver};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Cheapest closed tour by trying every ordering of the targets
fn brute_force_cost(matrix: &[Vec<Cost>], source: usize) -> Cost {
    fn search(
        matrix: &[Vec<Cost>],
        source: usize,
        current: usize,
        remaining: &mut Vec<usize>,
        so_far: Cost,
        best: &mut Cost,
    ) {
        if remaining.is_empty() {
            *best = (*best).min(so_far + matrix[current][source]);
            return;
        }
        for i in 0..remaining.len() {
            let next = remaining.remove(i);
            search(
                matrix,
                source,
                next,
                remaining,
                so_far + matrix[current][next],
                best,
            );
            remaining.insert(i, next);
        }
    }

    let mut remaining: Vec<usize> = (0..matrix.len()).filter(|&i| i != source).collect();
    let mut best = Cost::MAX;
    search(matrix, source, source, &mut remaining, 0, &mut best);
    best
}

fn random_matrix(rng: &mut StdRng, n: usize, symmetric: bool) -> Vec<Vec<Cost>> {
    let mut matrix = vec![vec![0; n]; n];
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            if symmetric && j < i {
                matrix[i][j] = matrix[j][i];
            } else {
                matrix[i][j] = rng.gen_range(1..=30);
            }
        }
    }
    matrix
}

fn nodes(n: usize) -> Vec<Coordinate> {
    (0..n).map(|i| Coordinate::new(i, 0)).collect()
}

fn assert_valid_tour(tour: &[usize], n: usize, source: usize) {
    assert_eq!(tour.len(), n + 1);
    assert_eq!(tour.first(), Some(&source));
    assert_eq!(tour.last(), Some(&source));

    let mut visited: Vec<usize> = tour[1..n].to_vec();
    visited.sort_unstable();
    let expected: Vec<usize> = (0..n).filter(|&i| i != source).collect();
    assert_eq!(visited, expected);
}

#[test]
fn test_matches_brute_force_symmetric() {
    let mut rng = StdRng::seed_from_u64(2024);
    let solver = HeldKarp::new();

    for n in 2..=8 {
        for _ in 0..5 {
            let matrix = random_matrix(&mut rng, n, true);
            let graph = ReducedGraph::from_matrix(nodes(n), &matrix).unwrap();

            let tour = solver.solve(&graph, 0).unwrap();
            assert_valid_tour(&tour.nodes, n, 0);
            assert_eq!(tour.cost, brute_force_cost(&matrix, 0), "n = {}", n);
            assert_eq!(solver.tour_cost(&graph, &tour.nodes).unwrap(), tour.cost);
        }
    }
}

#[test]
fn test_matches_brute_force_asymmetric() {
    let mut rng = StdRng::seed_from_u64(7);
    let solver = HeldKarp::new();

    for n in 2..=8 {
        for _ in 0..5 {
            let matrix = random_matrix(&mut rng, n, false);
            let graph = ReducedGraph::from_matrix(nodes(n), &matrix).unwrap();
            let source = rng.gen_range(0..n);

            let tour = solver.solve(&graph, source).unwrap();
            assert_valid_tour(&tour.nodes, n, source);
            assert_eq!(tour.cost, brute_force_cost(&matrix, source), "n = {}", n);
            assert_eq!(solver.tour_cost(&graph, &tour.nodes).unwrap(), tour.cost);
        }
    }
}

#[test]
fn test_deterministic_on_ties() {
    // Every tour costs the same, so only the tie rule decides
    let n = 6;
    let matrix = vec![vec![1; n]; n];
    let graph = ReducedGraph::from_matrix(nodes(n), &matrix).unwrap();
    let solver = HeldKarp::new();

    let first = solver.solve(&graph, 0).unwrap();
    for _ in 0..3 {
        assert_eq!(solver.solve(&graph, 0).unwrap(), first);
    }
    assert_eq!(first.cost, 6);
}
