use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use fixed_collections::{Graph, GraphConfig, WeightedGraph};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

const NODES: u64 = 500;

fn station(n: u64) -> String {
    format!("station-{:03}", n % NODES)
}

fn edges(seed: u64, n: usize) -> Vec<(String, String)> {
    let mut r = lcg(seed);
    (0..n)
        .filter_map(|_| Some((station(r.next()?), station(r.next()?))))
        .collect()
}

fn config() -> GraphConfig {
    GraphConfig::default().with_node_capacity(NODES as usize)
}

fn bench_build(c: &mut Criterion) {
    let es = edges(1, 4_000);
    c.bench_function("graph_build_4k_edges", |b| {
        b.iter_batched(
            || Graph::<String>::with_config(config()).unwrap(),
            |mut g| {
                for (a, z) in &es {
                    g.add_edge(a.clone(), z.clone()).unwrap();
                }
                black_box(g)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_remove_node(c: &mut Criterion) {
    let es = edges(3, 4_000);
    let mut base = Graph::<String>::with_config(config()).unwrap();
    for (a, z) in &es {
        base.add_edge(a.clone(), z.clone()).unwrap();
    }
    let victim = es[0].0.clone();
    c.bench_function("graph_remove_node", |b| {
        b.iter_batched(
            || {
                let mut g = Graph::<String>::with_config(config()).unwrap();
                for n in base.nodes() {
                    for m in base.get_neighbours(n.as_str()).iter() {
                        if n <= m {
                            g.add_edge(n.clone(), m.clone()).unwrap();
                        }
                    }
                }
                g
            },
            |mut g| black_box(g.remove_node(victim.as_str()).unwrap()),
            BatchSize::LargeInput,
        )
    });
}

fn bench_weighted_remove_node(c: &mut Criterion) {
    let es = edges(5, 2_000);
    let victim = es[0].0.clone();
    c.bench_function("weighted_graph_remove_node", |b| {
        b.iter_batched(
            || {
                let mut g = WeightedGraph::<String>::with_config(config()).unwrap();
                for (i, (a, z)) in es.iter().enumerate() {
                    g.add_edge_with(a.clone(), z.clone(), &[i as i32, 1]).unwrap();
                }
                g
            },
            |mut g| black_box(g.remove_node(victim.as_str()).unwrap()),
            BatchSize::LargeInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(30)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_build, bench_remove_node, bench_weighted_remove_node
}
criterion_main!(benches);
