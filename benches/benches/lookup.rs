use criterion::{black_box, criterion_group, criterion_main, Criterion};
use icu_normalizer::properties::CanonicalComposition as IcuComposition;
use unicode_tables_benches::{composition, datasets, table_config, unicode};
use unicode_tables_prepare::addenda::FieldKind;
use unicode_tables_prepare::tables::TablePairs;

mod group;

/// чтение значений: собранная таблица против исходных данных
fn get(c: &mut Criterion)
{
    let mut group = c.benchmark_group("get");
    let config = table_config(5, FieldKind::Shift);

    group.warm_up_time(core::time::Duration::from_secs(group::WARM_UP_TIME));
    group.measurement_time(core::time::Duration::from_secs(group::MEASUREMENT_TIME));

    for (name, dataset) in datasets() {
        let table = match TablePairs::compile(&dataset, &config) {
            Ok(table) => table,
            Err(e) => panic!("{}: {}", name, e),
        };

        group.bench_function(criterion::BenchmarkId::new("table", name), |b| {
            b.iter(|| (0 .. 0x3000).map(|code| table.get(black_box(code)).unwrap_or(0)).sum::<u64>())
        });

        group.bench_function(criterion::BenchmarkId::new("dataset", name), |b| {
            b.iter(|| (0 .. 0x3000).map(|code| dataset.get(black_box(code)).unwrap_or(0)).sum::<u64>())
        });
    }

    group.finish();
}

/// композиция пар: магический ключ против ICU
fn compose(c: &mut Criterion)
{
    let mut group = c.benchmark_group("compose");
    let composition = composition(&unicode());
    let icu = IcuComposition::new();

    let pairs: Vec<(u32, u32)> = composition
        .entries()
        .iter()
        .map(|(_, pair)| (pair.first, pair.second))
        .chain([(0x41, 0x41), (0x300, 0x41)])
        .collect();

    let chars: Vec<(char, char)> = pairs
        .iter()
        .filter_map(|&(a, b)| Some((char::from_u32(a)?, char::from_u32(b)?)))
        .collect();

    group.warm_up_time(core::time::Duration::from_secs(group::WARM_UP_TIME));
    group.measurement_time(core::time::Duration::from_secs(group::MEASUREMENT_TIME));

    group.bench_function("magic", |b| {
        b.iter(|| {
            pairs
                .iter()
                .filter_map(|&(a, b)| composition.compose(black_box(a), black_box(b)))
                .count()
        })
    });

    group.bench_function("icu", |b| {
        b.iter(|| {
            chars
                .iter()
                .filter_map(|&(a, b)| icu.compose(black_box(a), black_box(b)))
                .count()
        })
    });

    group.finish();
}

criterion_group!(benches, get, compose);
criterion_main!(benches);
