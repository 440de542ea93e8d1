use criterion::{criterion_group, criterion_main, Criterion};
use unicode_tables_benches::table_config;
use unicode_tables_prepare::addenda::FieldKind;
use unicode_tables_prepare::config::TableConfig;
use unicode_tables_prepare::dataset::Dataset;
use unicode_tables_prepare::tables::{CompiledTable, TablePairs};

mod group;

group!(
    shift_32,
    test_shift_32,
    "shift",
    "32",
    table_config(5, FieldKind::Shift)
);

group!(
    shift_64,
    test_shift_64,
    "shift",
    "64",
    table_config(6, FieldKind::Shift)
);

group!(
    max_length_32,
    test_max_length_32,
    "max_length",
    "32",
    table_config(5, FieldKind::MaxLength)
);

criterion_group!(benches, shift_32, shift_64, max_length_32);
criterion_main!(benches);
