//! каноническая композиция через "магический" ключ
//!
//! пара кодпоинтов (первый, второй) сворачивается в одно число:
//!
//! ```text
//! key = (first + (first >> 2)) * second
//! ```
//!
//! на данных UCD формула не дает коллизий, но это свойство текущих данных, а не формулы -
//! поэтому уникальность ключей проверяется при каждой сборке, коллизия - ошибка сборки.

use std::collections::{BTreeMap, HashMap, HashSet};

use unicode_tables_source::Unicode;

use crate::error::{Result, TableError};

/// количество бит под результат композиции в "запеченной" записи
pub const COMPOSED_BITS: u32 = 21;

/// ключ пары кодпоинтов
#[inline]
pub fn magic_key(first: u32, second: u32) -> u64
{
    let first = first as u64;

    (first + (first >> 2)) * second as u64
}

/// пара канонической композиции
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionPair
{
    pub composed: u32,
    pub first: u32,
    pub second: u32,
    /// исключение композиции: пара участвует в проверке ключей, но не комбинируется
    pub excluded: bool,
}

impl CompositionPair
{
    #[inline]
    pub fn key(&self) -> u64
    {
        magic_key(self.first, self.second)
    }
}

/// таблица композиций, доступная по ключу пары
#[derive(Debug, Clone)]
pub struct CanonicalComposition
{
    by_key: HashMap<u64, CompositionPair>,
    by_composed: HashMap<u32, (u32, u32)>,
    forward: HashSet<u32>,
    backward: HashSet<u32>,
}

impl CanonicalComposition
{
    /// собрать таблицу из четверок (результат, первый, второй, исключение)
    ///
    /// слоги хангыль в таблицу не попадают: их композиция вычисляется
    pub fn build(
        pairs: impl IntoIterator<Item = (u32, u32, u32, bool)>,
        is_hangul: fn(u32) -> bool,
    ) -> Result<Self>
    {
        let mut table = Self {
            by_key: HashMap::new(),
            by_composed: HashMap::new(),
            forward: HashSet::new(),
            backward: HashSet::new(),
        };

        for (composed, first, second, excluded) in pairs {
            if is_hangul(composed) {
                continue;
            }

            let pair = CompositionPair {
                composed,
                first,
                second,
                excluded,
            };

            let key = pair.key();

            if let Some(existing) = table.by_key.get(&key) {
                if *existing == pair {
                    continue;
                }

                return Err(TableError::MagicKeyCollision {
                    key,
                    existing: (existing.first, existing.second),
                    colliding: (first, second),
                });
            }

            table.by_key.insert(key, pair);

            if !excluded {
                table.by_composed.insert(composed, (first, second));
                table.forward.insert(first);
                table.backward.insert(second);
            }
        }

        tracing::debug!(
            pairs = table.by_key.len(),
            composable = table.by_composed.len(),
            "composition table built"
        );

        Ok(table)
    }

    /// таблица для канонических пар UCD; исключения - полные исключения композиции
    pub fn from_unicode(unicode: &Unicode, is_hangul: fn(u32) -> bool) -> Result<Self>
    {
        Self::build(
            unicode.canonical_pairs().map(|(composed, first, second)| {
                (
                    composed,
                    first,
                    second,
                    unicode.is_full_composition_exclusion(composed),
                )
            }),
            is_hangul,
        )
    }

    /// результат композиции пары
    pub fn compose(&self, first: u32, second: u32) -> Option<u32>
    {
        let pair = self.by_key.get(&magic_key(first, second))?;

        // ключ нашелся, но это может быть другая пара
        match pair.first == first && pair.second == second && !pair.excluded {
            true => Some(pair.composed),
            false => None,
        }
    }

    /// обратная операция: из какой пары получен кодпоинт
    pub fn decompose(&self, composed: u32) -> Option<(u32, u32)>
    {
        self.by_composed.get(&composed).copied()
    }

    /// может ли кодпоинт быть первым в паре?
    pub fn combines_forward(&self, code: u32) -> bool
    {
        self.forward.contains(&code)
    }

    /// может ли кодпоинт быть вторым в паре?
    pub fn combines_backward(&self, code: u32) -> bool
    {
        self.backward.contains(&code)
    }

    /// количество пар, включая исключения
    pub fn len(&self) -> usize
    {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.by_key.is_empty()
    }

    /// комбинируемые пары, по возрастанию ключа
    pub fn entries(&self) -> Vec<(u64, CompositionPair)>
    {
        self.by_key
            .iter()
            .filter(|(_, pair)| !pair.excluded)
            .map(|(&key, &pair)| (key, pair))
            .collect::<BTreeMap<u64, CompositionPair>>()
            .into_iter()
            .collect()
    }

    /// записи для сгенерированной таблицы: ключ << 21 | результат, по возрастанию ключа
    pub fn baked(&self) -> Vec<u64>
    {
        self.entries()
            .iter()
            .map(|(key, pair)| key << COMPOSED_BITS | pair.composed as u64)
            .collect()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn never(_: u32) -> bool
    {
        false
    }

    #[test]
    fn key()
    {
        assert_eq!(magic_key(0x41, 0x301), (0x41 + 0x10) * 0x301);
        assert_ne!(magic_key(0x41, 0x301), magic_key(0x301, 0x41));
    }

    #[test]
    fn collision()
    {
        // (8 + 2) * 3 = (4 + 1) * 6 = 30
        let result = CanonicalComposition::build([(0x100, 8, 3, false), (0x101, 4, 6, false)], never);

        assert_eq!(
            result.err(),
            Some(TableError::MagicKeyCollision {
                key: 30,
                existing: (8, 3),
                colliding: (4, 6),
            })
        );

        // исключенные пары тоже проверяются
        let result = CanonicalComposition::build([(0x100, 8, 3, false), (0x101, 4, 6, true)], never);
        assert!(result.is_err());
    }

    #[test]
    fn excluded_pairs_do_not_compose()
    {
        let table =
            CanonicalComposition::build([(0xC1, 0x41, 0x301, false), (0x2ADC, 0x2ADD, 0x338, true)], never)
                .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.compose(0x41, 0x301), Some(0xC1));
        assert_eq!(table.compose(0x2ADD, 0x338), None);
        assert_eq!(table.decompose(0x2ADC), None);
        assert!(!table.combines_forward(0x2ADD));
        assert_eq!(table.baked(), vec![magic_key(0x41, 0x301) << 21 | 0xC1]);
    }
}
