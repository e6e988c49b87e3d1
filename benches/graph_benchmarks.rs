use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use idgraph::{Graph, IdGeneratorKind, PropertyGraph, PropertyValue, VertexId};

/// Chain of `size` vertices built with the given id strategy
fn chain(size: u64, kind: IdGeneratorKind) -> Graph {
    let mut g = Graph::with_generator(kind);
    let mut previous = g.add_vertex(None).unwrap();
    for _ in 1..size {
        let next = g.add_vertex(None).unwrap();
        g.add_edge(previous, next, None).unwrap();
        previous = next;
    }
    g
}

/// Benchmark vertex insertion throughput for each id strategy
fn bench_vertex_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("vertex_insertion");

    for kind in [IdGeneratorKind::Max, IdGeneratorKind::Set, IdGeneratorKind::List] {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &kind, |b, &kind| {
            b.iter(|| {
                let mut g = Graph::with_generator(kind);
                for _ in 0..10_000 {
                    g.add_vertex(None).unwrap();
                }
                criterion::black_box(g.nb_vertices());
            });
        });
    }
    group.finish();
}

/// Benchmark building a chain with properties on every element
fn bench_property_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("property_chain");

    for size in [100u64, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut g: PropertyGraph = PropertyGraph::new();
                g.add_vertex_property("name", None).unwrap();
                g.add_edge_property("length", None).unwrap();
                let mut previous = g.add_vertex(None).unwrap();
                for i in 1..size {
                    let next = g.add_vertex(None).unwrap();
                    let eid = g.add_edge(previous, next, None).unwrap();
                    g.vertex_property_mut("name")
                        .unwrap()
                        .insert(next, format!("node{}", i).into());
                    g.edge_property_mut("length")
                        .unwrap()
                        .insert(eid, PropertyValue::Float(i as f64));
                    previous = next;
                }
                criterion::black_box(g.nb_edges());
            });
        });
    }
    group.finish();
}

/// Benchmark removing vertices and reusing their ids
fn bench_remove_and_recycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_and_recycle");

    for kind in [IdGeneratorKind::Set, IdGeneratorKind::List] {
        let base = chain(1000, kind);
        group.bench_with_input(BenchmarkId::from_parameter(kind), &kind, |b, _| {
            b.iter(|| {
                let mut g = base.clone();
                for i in (0..1000).step_by(3) {
                    g.remove_vertex(VertexId::new(i)).unwrap();
                }
                while g.nb_vertices() < 1000 {
                    g.add_vertex(None).unwrap();
                }
                criterion::black_box(g.nb_edges());
            });
        });
    }
    group.finish();
}

/// Benchmark neighbor queries on a chain
fn bench_neighbors(c: &mut Criterion) {
    let g = chain(10_000, IdGeneratorKind::Set);

    c.bench_function("neighbors", |b| {
        b.iter(|| {
            let mut total = 0;
            for vid in g.vertices() {
                total += g.nb_neighbors(vid).unwrap();
            }
            criterion::black_box(total);
        });
    });
}

/// Benchmark duplicating a graph into itself
fn bench_extend_with_self(c: &mut Criterion) {
    let base = chain(5000, IdGeneratorKind::Set);

    c.bench_function("extend_with_self", |b| {
        b.iter(|| {
            let mut g = base.clone();
            let (trans_vid, _) = g.extend_with_self().unwrap();
            criterion::black_box(trans_vid.len());
        });
    });
}

criterion_group!(
    benches,
    bench_vertex_insertion,
    bench_property_chain,
    bench_remove_and_recycle,
    bench_neighbors,
    bench_extend_with_self
);
criterion_main!(benches);
