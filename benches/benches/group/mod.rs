pub const WARM_UP_TIME: u64 = 3;
pub const MEASUREMENT_TIME: u64 = 7;
pub const SAMPLE_SIZE: usize = 10;

#[macro_export]
macro_rules! group {
    ($fn: ident, $test: ident, $group: expr, $name: expr, $config: expr) => {
        #[inline(never)]
        fn $test(dataset: &Dataset, config: &TableConfig) -> CompiledTable
        {
            match TablePairs::compile(dataset, config) {
                Ok(table) => table,
                Err(e) => panic!("{}: {}", config.name, e),
            }
        }

        fn $fn(c: &mut Criterion)
        {
            let mut group = c.benchmark_group($group);
            let config = $config;

            group.warm_up_time(core::time::Duration::from_secs(group::WARM_UP_TIME));
            group.measurement_time(core::time::Duration::from_secs(group::MEASUREMENT_TIME));
            group.sample_size(group::SAMPLE_SIZE);

            for (name, dataset) in unicode_tables_benches::datasets() {
                group.bench_with_input(
                    criterion::BenchmarkId::new($name, name),
                    &(&dataset, &config),
                    |b, data| b.iter(|| $test(data.0, criterion::black_box(data.1))),
                );
            }

            group.finish();
        }
    };
}
