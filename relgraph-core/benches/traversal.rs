use criterion::{black_box, criterion_group, criterion_main, Criterion};
use relgraph_core::{ContainerKind, Label, RelationshipGraph, Resource};

fn node(i: usize) -> Resource {
    Resource::new("node", i.to_string())
}

fn chain(len: usize) -> RelationshipGraph {
    let mut graph = RelationshipGraph::new();
    for i in 0..len {
        graph.add_edge(node(i), node(i + 1), Label::new());
    }
    graph
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_dependents_deep_chain(c: &mut Criterion) {
    let graph = chain(5_000);
    let start = node(0);

    c.bench_function("dependents_chain_5000", |b| {
        b.iter(|| black_box(graph.dependents(&start)))
    });
}

fn bench_dependencies_cached(c: &mut Criterion) {
    let graph = chain(5_000);
    let end = node(5_000);
    graph.dependencies(&end);

    c.bench_function("dependencies_chain_5000_cached", |b| {
        b.iter(|| black_box(graph.dependencies(&end)))
    });
}

fn bench_splice_containers(c: &mut Criterion) {
    let kind = ContainerKind::new("component");
    let containers: Vec<Resource> = (0..20)
        .map(|i| Resource::container("component", format!("group{i}"), kind.clone()))
        .collect();

    // Each container holds ten nodes and is ordered before the next one.
    let mut containment = RelationshipGraph::new();
    let mut relationships = RelationshipGraph::new();
    for (i, container) in containers.iter().enumerate() {
        for j in 0..10 {
            containment.add_edge(container.clone(), node(i * 10 + j), Label::new());
            relationships.add_vertex(node(i * 10 + j));
        }
        if let Some(next) = containers.get(i + 1) {
            relationships.add_edge(container.clone(), next.clone(), Label::new());
        }
    }

    c.bench_function("splice_20_containers", |b| {
        b.iter(|| {
            let mut graph = relationships.clone();
            black_box(graph.splice(&containment, &kind).is_ok())
        })
    });
}

criterion_group!(
    benches,
    bench_dependents_deep_chain,
    bench_dependencies_cached,
    bench_splice_containers
);
criterion_main!(benches);
