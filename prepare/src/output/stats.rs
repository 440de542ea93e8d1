use crate::tables::CompiledTable;

/// итоги сборки таблицы
pub fn log_stats(table: &CompiledTable, expansions: usize)
{
    let stats = &table.stats;

    tracing::info!(
        table = %table.name,
        chunks = stats.chunks,
        inserted = stats.inserted,
        reused = stats.reused,
        cached = stats.cached,
        saved_values = stats.saved_values,
        saved_bytes = stats.saved_bytes,
        "chunks placed"
    );

    tracing::info!(
        table = %table.name,
        boundary = %format!("{:#X}", table.boundary),
        index = %format!("{} x {}", stats.index_len, table.index_width),
        values = %format!("{} x {}", stats.values_len, table.values_width),
        expansions,
        bytes = stats.total_bytes() + expansions * 4,
        "table size"
    );
}
