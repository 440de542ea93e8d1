use std::collections::BTreeMap;

use unicode_tables_source::{PropertyKind, CODEPOINT_LIMIT};

use crate::error::{Result, TableError};

/// хранилище значений свойства
///
/// способ хранения выбирается один раз, по виду свойства: для разреженных свойств (декомпозиции)
/// хранятся только значения, отличные от значения по умолчанию
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStorage
{
    Indexed(Vec<u64>),
    Sparse(BTreeMap<u32, u64>),
}

/// значения свойства для всего кодового пространства
///
/// кодпоинты, для которых значение не задано, имеют значение по умолчанию
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset
{
    kind: PropertyKind,
    default: u64,
    storage: TableStorage,
}

impl Dataset
{
    /// значения из пар (кодпоинт, значение), хранилище выбирается по виду свойства
    pub fn from_sparse(
        kind: PropertyKind,
        default: u64,
        pairs: impl IntoIterator<Item = (u32, u64)>,
    ) -> Result<Self>
    {
        let mut map = BTreeMap::new();

        for (code, value) in pairs {
            if code >= CODEPOINT_LIMIT {
                return Err(TableError::CodepointOutOfRange(code));
            }

            if value != default {
                map.insert(code, value);
            }
        }

        let storage = match kind.is_sparse() {
            true => TableStorage::Sparse(map),
            false => {
                let len = map.keys().next_back().map_or(0, |&last| last as usize + 1);
                let mut values = vec![default; len];

                for (code, value) in map {
                    values[code as usize] = value;
                }

                TableStorage::Indexed(values)
            }
        };

        Ok(Self {
            kind,
            default,
            storage,
        })
    }

    /// значения, вычисленные для каждого кодпоинта
    pub fn from_fn(kind: PropertyKind, default: u64, mut f: impl FnMut(u32) -> u64) -> Result<Self>
    {
        Self::from_sparse(kind, default, (0 .. CODEPOINT_LIMIT).map(|code| (code, f(code))))
    }

    #[inline]
    pub fn kind(&self) -> PropertyKind
    {
        self.kind
    }

    #[inline]
    pub fn default(&self) -> u64
    {
        self.default
    }

    pub fn storage(&self) -> &TableStorage
    {
        &self.storage
    }

    /// значение свойства для кодпоинта
    pub fn get(&self, code: u32) -> Result<u64>
    {
        if code >= CODEPOINT_LIMIT {
            return Err(TableError::CodepointOutOfRange(code));
        }

        Ok(self.value(code))
    }

    #[inline]
    fn value(&self, code: u32) -> u64
    {
        let value = match &self.storage {
            TableStorage::Indexed(values) => values.get(code as usize),
            TableStorage::Sparse(map) => map.get(&code),
        };

        value.copied().unwrap_or(self.default)
    }

    /// значения блока; часть блока за пределами кодового пространства заполняется значением по умолчанию
    pub fn chunk(&self, chunk: u32, chunk_shift: u32) -> Vec<u64>
    {
        let first = crate::code_for!(chunk, chunk_shift, 0);

        (first .. first + (1 << chunk_shift))
            .map(|code| match code < CODEPOINT_LIMIT {
                true => self.value(code),
                false => self.default,
            })
            .collect()
    }

    /// количество блоков, покрывающих кодовое пространство
    pub fn chunks(&self, chunk_shift: u32) -> u32
    {
        (CODEPOINT_LIMIT + (1 << chunk_shift) - 1) >> chunk_shift
    }

    /// последний кодпоинт со значением, отличным от значения по умолчанию
    pub fn last_significant(&self) -> Option<u32>
    {
        match &self.storage {
            TableStorage::Indexed(values) => values
                .iter()
                .rposition(|&value| value != self.default)
                .map(|code| code as u32),
            TableStorage::Sparse(map) => map
                .iter()
                .rev()
                .find(|(_, &value)| value != self.default)
                .map(|(&code, _)| code),
        }
    }

    /// все пары (кодпоинт, значение) кодового пространства
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_
    {
        (0 .. CODEPOINT_LIMIT).map(|code| (code, self.value(code)))
    }
}
