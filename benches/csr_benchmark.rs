use criterion::{black_box, criterion_group, criterion_main, Criterion};
use halo_color::{graph::encode_egr, graph::parse_egr, CsrGraph};

fn bench_csr_construction(c: &mut Criterion) {
    let nodes = 1000;
    // Each node linked to a fixed stride pattern, then symmetrized by `from_edges`
    let mut edges = Vec::with_capacity(nodes * 50);
    for i in 0..nodes {
        for j in 1..=50 {
            edges.push((i, (i + j * 7) % nodes));
        }
    }
    let graph = CsrGraph::from_edges(nodes, &edges).unwrap();

    c.bench_function("csr_from_edges", |b| {
        b.iter(|| black_box(CsrGraph::from_edges(nodes, black_box(&edges)).unwrap()));
    });

    c.bench_function("csr_from_parts_validated", |b| {
        b.iter(|| {
            let offsets = graph.offsets().to_vec();
            let nlist = graph.edges().to_vec();
            black_box(CsrGraph::from_csr_parts(offsets, nlist).unwrap())
        });
    });

    let image = encode_egr(&graph).unwrap();
    c.bench_function("egr_decode", |b| {
        b.iter(|| black_box(parse_egr(black_box(&image)).unwrap()));
    });
}

criterion_group!(benches, bench_csr_construction);
criterion_main!(benches);
