//! Graph builders and brute-force oracles shared by the unit tests.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::graph::{CityId, Graph, Hops};

pub fn graph(n: usize, edges: &[(CityId, CityId)]) -> Graph {
    Graph::from_edges(n, edges.iter().copied()).unwrap()
}

/// 0 → 1 → … → n-1
pub fn make_chain(n: usize) -> Graph {
    Graph::from_edges(n, (0..n - 1).map(|i| (i, i + 1))).unwrap()
}

/// 0 → 1 → … → n-1 → 0
pub fn make_cycle(n: usize) -> Graph {
    Graph::from_edges(n, (0..n).map(|i| (i, (i + 1) % n))).unwrap()
}

/// Every leaf flies into `center`; nothing flies out of it.
pub fn make_star(center: CityId, n: usize) -> Graph {
    Graph::from_edges(n, (0..n).filter(|&i| i != center).map(|i| (i, center))).unwrap()
}

/// Seeded generator for deterministic pseudo-random test graphs.
pub fn seeded_rng(seed: u64) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}

/// Random graph with up to `max_out` flights per city, self-loops allowed.
pub fn random_graph(rng: &mut Xoshiro256PlusPlus, n: usize, max_out: usize) -> Graph {
    let mut g = Graph::new(n);
    for from in 0..n {
        for _ in 0..rng.random_range(0..=max_out) {
            let to: CityId = rng.random_range(0..n);
            g.add_edge(from, to).unwrap();
        }
    }
    g
}

/// All-pairs hop distances by Floyd–Warshall.
pub fn floyd_warshall(g: &Graph) -> Vec<Vec<Option<Hops>>> {
    let n = g.city_count();
    let mut d = vec![vec![None; n]; n];
    for (i, row) in d.iter_mut().enumerate() {
        row[i] = Some(0);
        for &j in g.neighbors_out(i) {
            if i != j {
                row[j] = Some(1);
            }
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if let (Some(a), Some(b)) = (d[i][k], d[k][j]) {
                    if d[i][j].map_or(true, |cur| a + b < cur) {
                        d[i][j] = Some(a + b);
                    }
                }
            }
        }
    }
    d
}
