use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use bit_set::BitSet;
use ring_perception::{
    all_cycles::AllCycles,
    cycles::{CycleFinder, Finder},
    edmonds::EdmondsMaximumMatching,
    matching::Matching,
};

fn from_edges(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let mut graph = vec![Vec::new(); n];
    for &(u, v) in edges {
        graph[u].push(v);
        graph[v].push(u);
    }
    graph
}

fn complete(n: usize) -> Vec<Vec<usize>> {
    let mut edges = Vec::new();
    for u in 0..n {
        for v in u + 1..n {
            edges.push((u, v));
        }
    }
    from_edges(n, &edges)
}

/// A linear acene of `rings` fused hexagons.
fn acene(rings: usize) -> Vec<Vec<usize>> {
    let n = 4 * rings + 2;
    let mut edges = Vec::new();
    // top and bottom chains, joined by a rung at every other position
    for i in 0..2 * rings {
        edges.push((i, i + 1));
        edges.push((2 * rings + 1 + i, 2 * rings + 2 + i));
    }
    for i in (0..=2 * rings).step_by(2) {
        edges.push((i, 2 * rings + 1 + i));
    }
    from_edges(n, &edges)
}

/// A `rows` x `cols` grid, which always has a perfect matching for even
/// `rows * cols`.
fn grid(rows: usize, cols: usize) -> Vec<Vec<usize>> {
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            let v = r * cols + c;
            if c + 1 < cols {
                edges.push((v, v + 1));
            }
            if r + 1 < rows {
                edges.push((v, v + cols));
            }
        }
    }
    from_edges(rows * cols, &edges)
}

pub fn complete_graphs(c: &mut Criterion) {
    let mut group = c.benchmark_group("all_cycles");
    for n in [5, 6, 7] {
        let graph = complete(n);
        group.bench_with_input(BenchmarkId::new("complete", n), &graph, |b, graph| {
            b.iter(|| AllCycles::unlimited(graph).count());
        });
    }
    group.finish();
}

pub fn fused_rings(c: &mut Criterion) {
    let mut group = c.benchmark_group("fused_rings");
    let finders = [
        ("mcb", Finder::MinimumCycleBasis),
        ("relevant", Finder::Relevant),
        ("essential", Finder::Essential),
        ("triplet_short", Finder::TripletShort),
        ("all", Finder::all()),
    ];
    for rings in [4, 16] {
        let graph = acene(rings);
        for (name, finder) in &finders {
            group.bench_with_input(BenchmarkId::new(*name, rings), &graph, |b, graph| {
                b.iter(|| finder.find(graph, graph.len()));
            });
        }
    }
    group.finish();
}

pub fn matchings(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");
    for side in [10, 40] {
        let graph = grid(side, side);
        let subset: BitSet = (0..graph.len()).collect();
        group.bench_with_input(BenchmarkId::new("grid", side), &graph, |b, graph| {
            b.iter(|| EdmondsMaximumMatching::maximize(Matching::with_capacity(graph.len()), graph, &subset));
        });
    }
    group.finish();
}

criterion_group! {
    name = benchmark;
    config = Criterion::default().sample_size(20);
    targets = complete_graphs, fused_rings, matchings
}
criterion_main!(benchmark);
