use std::collections::HashMap;

use crate::addenda::{Addenda, FieldKind, Modifier};
use crate::config::TableConfig;
use crate::dataset::Dataset;
use crate::error::{Result, TableError};
use crate::search::{Placement, RangeSearch, SearchOutcome};
use crate::tables::{CompiledTable, TableStats, TypedBuffer};

/// пара таблиц индекс + значения
///
/// блоки обрабатываются по порядку: для каждого ищется модификатор, при котором
/// дописать в таблицу значений нужно как можно меньше, после чего запись индекса
/// и недостающие значения фиксируются. таблицы растут только дописыванием.
pub struct TablePairs;

/// состояние сборки, переходящее от блока к блоку
struct CompilerState
{
    index: TypedBuffer,
    values: TypedBuffer,
    /// те же значения, что и в values - для поиска
    written: Vec<u64>,
    /// последний значимый блок
    last_significant: Option<usize>,
    /// размер таблицы значений после каждого блока
    watermarks: Vec<usize>,
    /// уже встречавшиеся блоки и их модификаторы
    cache: HashMap<Vec<u64>, Modifier>,
    stats: TableStats,
}

impl CompilerState
{
    fn new(config: &TableConfig) -> Self
    {
        Self {
            index: TypedBuffer::new(config.index_width, config.index_capacity),
            values: TypedBuffer::new(config.values_width, config.values_capacity),
            written: Vec::with_capacity(config.values_capacity),
            last_significant: None,
            watermarks: Vec::with_capacity(config.index_capacity),
            cache: HashMap::new(),
            stats: TableStats::default(),
        }
    }

    /// записать блок: запись индекса и недостающие значения
    fn commit(
        &mut self,
        addenda: &Addenda,
        target: Vec<u64>,
        placement: Placement,
        chunk_size: usize,
    ) -> Result<()>
    {
        let entry = addenda.pack(&placement.modifier)?;

        self.index.append(entry)?;
        self.values.extend(&placement.insert)?;
        self.written.extend_from_slice(&placement.insert);
        self.watermarks.push(self.written.len());

        self.stats.chunks += 1;
        self.stats.saved_values += chunk_size.saturating_sub(placement.inserted_len());

        match placement.inserted_len() {
            0 => self.stats.reused += 1,
            _ => self.stats.inserted += 1,
        }

        self.cache.entry(target).or_insert(placement.modifier);

        Ok(())
    }

    /// отрезать блоки за последним значимым
    fn trim(&mut self)
    {
        let (index_len, values_len) = match self.last_significant {
            Some(last) => (last + 1, self.watermarks[last]),
            None => (0, 0),
        };

        self.index.truncate(index_len);
        self.values.truncate(values_len);
        self.written.truncate(values_len);
    }
}

impl TablePairs
{
    /// собрать таблицу для набора данных
    pub fn compile(dataset: &Dataset, config: &TableConfig) -> Result<CompiledTable>
    {
        config.validate()?;

        let addenda = config.addenda()?;
        let chunk_mask = config.chunk_mask();
        let chunk_size = config.chunk_size() as usize;
        let default = dataset.default();

        let search = RangeSearch {
            addenda: &addenda,
            chunk_mask,
            values_width: config.values_width,
        };

        let space = addenda.search_space(chunk_mask);
        let lowest_shift = space.lowest(FieldKind::Shift);

        // первый проход - без сдвига
        let unshifted = space.clone().filter_axis(FieldKind::Shift, |shift| shift == lowest_shift);
        let has_shift = addenda.has(FieldKind::Shift);

        let mut state = CompilerState::new(config);

        // обрезка по последнему блоку, в котором есть значения, отличные от значения по умолчанию
        state.last_significant = dataset
            .last_significant()
            .map(|code| crate::chunk_for!(code, config.chunk_shift) as usize);

        tracing::debug!(
            table = %config.name,
            property = %dataset.kind(),
            chunk_size,
            candidates = space.size(),
            "compiling"
        );

        for chunk in 0 .. dataset.chunks(config.chunk_shift) {
            let target = dataset.chunk(chunk, config.chunk_shift);

            if let Some(&modifier) = state.cache.get(&target) {
                state.stats.cached += 1;
                state.commit(&addenda, target, Placement { modifier, insert: vec![] }, chunk_size)?;
                continue;
            }

            let mut outcome = search.search(&target, &state.written, &unshifted);

            // второй проход - со сдвигом, не больше наименьшего значения блока
            if has_shift && outcome.best.as_ref().map_or(true, |best| best.inserted_len() > 0) {
                let smallest = target.iter().copied().min().unwrap_or(0);

                let shifted = space
                    .clone()
                    .filter_axis(FieldKind::Shift, |shift| shift > lowest_shift && shift <= smallest);

                outcome = merge(outcome, search.search(&target, &state.written, &shifted));
            }

            let placement = match outcome.best {
                Some(placement) => placement,
                None => {
                    let first = crate::code_for!(chunk, config.chunk_shift, 0);

                    return Err(TableError::NoViableModifier {
                        first,
                        last: first + (chunk_size as u32 - 1),
                        rejected: outcome.rejected,
                    });
                }
            };

            tracing::trace!(
                chunk,
                tried = outcome.tried,
                position = placement.position(),
                mask = placement.modifier.mask,
                shift = placement.modifier.shift,
                inserted = placement.inserted_len(),
                "chunk committed"
            );

            state.commit(&addenda, target, placement, chunk_size)?;
        }

        state.trim();

        let boundary = state
            .last_significant
            .map_or(0, |last| ((last + 1) << config.chunk_shift) as u32);

        let mut stats = state.stats;
        stats.index_len = state.index.len();
        stats.values_len = state.values.len();
        stats.index_bytes = state.index.size();
        stats.values_bytes = state.values.size();
        stats.saved_bytes = stats.saved_values * config.values_width.bytes();

        tracing::debug!(
            table = %config.name,
            boundary = %format!("{:#X}", boundary),
            index = stats.index_len,
            values = stats.values_len,
            inserted = stats.inserted,
            reused = stats.reused,
            saved_bytes = stats.saved_bytes,
            bytes = stats.total_bytes(),
            "table compiled"
        );

        Ok(CompiledTable {
            name: config.name.clone(),
            index: state.index.result(),
            index_width: config.index_width,
            values: state.values.result(),
            values_width: config.values_width,
            addenda,
            chunk_shift: config.chunk_shift,
            boundary,
            default,
            stats,
        })
    }
}

/// объединить результаты двух проходов: при равенстве побеждает первый
fn merge(first: SearchOutcome, second: SearchOutcome) -> SearchOutcome
{
    let best = match (first.best, second.best) {
        (Some(a), Some(b)) => match b.key() < a.key() {
            true => Some(b),
            false => Some(a),
        },
        (a, b) => a.or(b),
    };

    let mut rejected = first.rejected;
    rejected.extend(second.rejected);

    SearchOutcome {
        best,
        rejected,
        tried: first.tried + second.tried,
    }
}
