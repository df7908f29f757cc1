use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pk_codec::BhsdCodec;
use pk_core::{AnnotationContext, AnnotationKind};
use pk_cpool::CpBands;
use pk_metadata::{Annotation, BandReader, ElementValue, MetadataBandGroup};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn generate_annotations(count: usize) -> Vec<Vec<Annotation>> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|i| {
            let inner = Annotation::new("Lbench/Inner;")
                .with("id", ElementValue::Int(rng.gen_range(0..1000)))
                .with("name", ElementValue::String(format!("n{}", i % 50)));
            vec![
                Annotation::new("Lbench/Marker;"),
                Annotation::new("Lbench/Config;")
                    .with("weight", ElementValue::Double(rng.gen_range(0.0..1.0)))
                    .with(
                        "items",
                        ElementValue::Array((0..rng.gen_range(0..6)).map(ElementValue::Int).collect()),
                    )
                    .with("inner", ElementValue::Annotation(inner)),
            ]
        })
        .collect()
}

fn filled_group(cp: &mut CpBands, members: &[Vec<Annotation>]) -> MetadataBandGroup {
    let mut group = MetadataBandGroup::new(AnnotationKind::RuntimeVisible, AnnotationContext::Method);
    for annotations in members {
        group.add_member_annotations(cp, annotations).unwrap();
    }
    group
}

fn bench_add(c: &mut Criterion) {
    let members = generate_annotations(1_000);
    c.bench_function("add_member_annotations_1k", |b| {
        b.iter(|| {
            let mut cp = CpBands::new();
            black_box(filled_group(&mut cp, black_box(&members)))
        })
    });
}

fn bench_add_remove(c: &mut Criterion) {
    let members = generate_annotations(1_000);
    c.bench_function("add_then_remove_1k", |b| {
        b.iter(|| {
            let mut cp = CpBands::new();
            let mut group = filled_group(&mut cp, &members);
            for _ in 0..members.len() {
                group.remove_latest().unwrap();
            }
            black_box(group.has_content())
        })
    });
}

fn bench_pack_read(c: &mut Criterion) {
    let members = generate_annotations(1_000);
    let mut cp = CpBands::new();
    let group = filled_group(&mut cp, &members);
    let (entries, calls) = (group.entry_count(), group.num_backwards_calls());

    c.bench_function("pack_1k", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            black_box(group.clone().pack(&BhsdCodec, &mut out).unwrap())
        })
    });

    let mut bytes = Vec::new();
    group.pack(&BhsdCodec, &mut bytes).unwrap();
    let reader = BandReader::new(AnnotationKind::RuntimeVisible);
    c.bench_function("read_and_decode_1k", |b| {
        b.iter(|| {
            let decoded = reader.read(&BhsdCodec, &mut black_box(bytes.as_slice()), entries, calls).unwrap();
            black_box(decoded.entries(&cp).unwrap())
        })
    });
}

criterion_group!(benches, bench_add, bench_add_remove, bench_pack_read);
criterion_main!(benches);
