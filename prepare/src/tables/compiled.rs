use unicode_tables_source::CODEPOINT_LIMIT;

use crate::addenda::{Addenda, FieldLayout};
use crate::dataset::Dataset;
use crate::error::{Result, TableError};
use crate::tables::IntegerWidth;

/// счетчики сборки таблицы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableStats
{
    /// обработано блоков
    pub chunks: usize,
    /// блоков, для которых пришлось дописать значения
    pub inserted: usize,
    /// блоков, полностью найденных в уже записанных значениях
    pub reused: usize,
    /// из них - повторы уже встречавшихся блоков
    pub cached: usize,
    /// значений, которые не пришлось записывать
    pub saved_values: usize,
    /// те же значения в байтах таблицы значений
    pub saved_bytes: usize,
    /// записей индекса после обрезки
    pub index_len: usize,
    /// значений после обрезки
    pub values_len: usize,
    pub index_bytes: usize,
    pub values_bytes: usize,
}

impl TableStats
{
    pub fn total_bytes(&self) -> usize
    {
        self.index_bytes + self.values_bytes
    }
}

/// собранная таблица: индекс, значения и все, что нужно для их чтения
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTable
{
    pub name: String,
    pub index: Vec<u64>,
    pub index_width: IntegerWidth,
    pub values: Vec<u64>,
    pub values_width: IntegerWidth,
    pub addenda: Addenda,
    pub chunk_shift: u32,
    /// за этой границей записей индекса нет, все значения - по умолчанию
    pub boundary: u32,
    pub default: u64,
    pub stats: TableStats,
}

impl CompiledTable
{
    #[inline]
    pub fn index(&self) -> &[u64]
    {
        &self.index
    }

    #[inline]
    pub fn values(&self) -> &[u64]
    {
        &self.values
    }

    #[inline]
    pub fn chunk_mask(&self) -> u64
    {
        (1 << self.chunk_shift) - 1
    }

    pub fn layout(&self) -> Vec<FieldLayout>
    {
        self.addenda.layout()
    }

    /// прочитать значение кодпоинта так же, как это делает сгенерированный код
    pub fn get(&self, code: u32) -> Result<u64>
    {
        if code >= CODEPOINT_LIMIT {
            return Err(TableError::CodepointOutOfRange(code));
        }

        let chunk = crate::chunk_for!(code, self.chunk_shift) as usize;

        let entry = match self.index.get(chunk) {
            Some(&entry) => entry,
            None => return Ok(self.default),
        };

        let modifier = self.addenda.unpack(entry, self.chunk_mask());
        let remaining = code & self.chunk_mask() as u32;

        modifier
            .decode_slot(&self.values, remaining)
            .ok_or(TableError::BrokenEntry { code, entry })
    }

    /// сравнить таблицу с исходными данными по всему кодовому пространству
    pub fn verify(&self, dataset: &Dataset) -> Result<()>
    {
        for (code, expected) in dataset.iter() {
            let actual = self.get(code)?;

            if actual != expected {
                return Err(TableError::Mismatch {
                    code,
                    expected,
                    actual,
                });
            }
        }

        tracing::debug!(table = %self.name, "verified against the source data");

        Ok(())
    }
}
