use criterion::{Criterion, black_box, criterion_group, criterion_main};
use skcompose_core::{
    ColumnSelector, ColumnTransformer, ComposeConfig, Feature, Field, FieldId, FieldRegistry,
    FittedEntry, SessionRegistry, TransformerRef,
};

/// Registry that skips the consumption log so repeated runs stay bounded.
#[derive(Default)]
struct Unlogged(SessionRegistry);

impl FieldRegistry for Unlogged {
    fn lookup_field(&self, name: &str) -> Option<FieldId> {
        self.0.lookup_field(name)
    }

    fn create_field(&mut self, name: &str) -> FieldId {
        self.0.create_field(name)
    }

    fn field(&self, id: FieldId) -> Option<&Field> {
        self.0.field(id)
    }
}

fn wide_transformer(entries: usize, columns: usize) -> ColumnTransformer {
    let fitted = (0..entries)
        .map(|e| {
            let start = (e * columns) as i64;
            let token = if e % 3 == 0 { "drop" } else { "passthrough" };
            FittedEntry::new(
                format!("entry{e}"),
                TransformerRef::token(token),
                ColumnSelector::indices(start..start + columns as i64),
            )
        })
        .collect();
    ColumnTransformer::with_entries(fitted, ComposeConfig::default())
}

fn bench_raw_resolution(c: &mut Criterion) {
    let ct = wide_transformer(50, 20);

    c.bench_function("initialize_50x20_raw", |b| {
        b.iter(|| {
            let mut registry = SessionRegistry::new();
            black_box(ct.initialize_features(&mut registry).unwrap())
        })
    });

    c.bench_function("initialize_50x20_warm_registry", |b| {
        let mut registry = Unlogged::default();
        ct.initialize_features(&mut registry).unwrap();
        b.iter(|| black_box(ct.initialize_features(&mut registry).unwrap()))
    });
}

fn bench_chained_resolution(c: &mut Criterion) {
    let mut registry = Unlogged::default();
    let context: Vec<Feature> = (0..200)
        .map(|i| {
            let name = format!("f{i}");
            let id = registry.create_field(&name);
            Feature::wildcard(name, id)
        })
        .collect();

    let by_name = ColumnTransformer::with_entries(
        vec![FittedEntry::new(
            "names",
            TransformerRef::token("passthrough"),
            ColumnSelector::names((0..200).rev().map(|i| format!("f{i}"))),
        )],
        ComposeConfig::default(),
    );

    c.bench_function("chained_200_names", |b| {
        b.iter(|| black_box(by_name.resolve_features(&context, &mut registry).unwrap()))
    });
}

criterion_group!(benches, bench_raw_resolution, bench_chained_resolution);
criterion_main!(benches);
