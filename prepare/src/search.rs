//! поиск места для значений блока в таблице значений
//!
//! для каждого модификатора-кандидата: строим шаблон хранимых значений, обрезаем хвост из нулей
//! (если есть поле длины), ищем шаблон в уже записанных значениях целиком, затем - перекрытие
//! хвоста таблицы с началом шаблона. записывается только то, что не нашлось.

use crate::addenda::{Addenda, FieldKind, Modifier, SearchSpace};
use crate::error::{Result, TableError};
use crate::tables::IntegerWidth;

/// результат поиска для одного модификатора
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement
{
    /// модификатор, позиция уже подставлена
    pub modifier: Modifier,
    /// значения, которые нужно дописать в конец таблицы
    pub insert: Vec<u64>,
}

impl Placement
{
    #[inline]
    pub fn position(&self) -> u64
    {
        self.modifier.position
    }

    #[inline]
    pub fn inserted_len(&self) -> usize
    {
        self.insert.len()
    }

    /// ключ выбора лучшего кандидата: меньше записанных значений, затем меньшая маска, затем меньший сдвиг
    #[inline]
    pub(crate) fn key(&self) -> (usize, u64, u64)
    {
        (self.inserted_len(), self.modifier.mask, self.modifier.shift)
    }
}

/// итог перебора пространства модификаторов
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome
{
    pub best: Option<Placement>,
    /// отброшенные кандидаты с причиной
    pub rejected: Vec<(Modifier, String)>,
    /// сколько кандидатов проверено
    pub tried: usize,
}

/// контекст поиска одной таблицы
#[derive(Debug, Clone, Copy)]
pub struct RangeSearch<'a>
{
    pub addenda: &'a Addenda,
    pub chunk_mask: u64,
    pub values_width: IntegerWidth,
}

impl<'a> RangeSearch<'a>
{
    /// перебрать пространство модификаторов и выбрать лучший
    ///
    /// перебор прекращается, как только найден кандидат без вставки с минимальными маской и сдвигом:
    /// лучше него в этом пространстве ничего нет
    pub fn search(&self, target: &[u64], values: &[u64], space: &SearchSpace) -> SearchOutcome
    {
        let floor = (0, space.lowest(FieldKind::Mask), space.lowest(FieldKind::Shift));
        let mut outcome = SearchOutcome::default();

        for modifier in space.iter() {
            outcome.tried += 1;

            match self.place(target, values, modifier) {
                Ok(placement) => {
                    let better = match &outcome.best {
                        Some(best) => placement.key() < best.key(),
                        None => true,
                    };

                    if better {
                        outcome.best = Some(placement);
                    }
                }
                Err(TableError::InvalidModifier { modifier, reason }) => {
                    outcome.rejected.push((modifier, reason))
                }
                Err(e) => outcome.rejected.push((modifier, e.to_string())),
            }

            if matches!(&outcome.best, Some(best) if best.key() == floor) {
                break;
            }
        }

        outcome
    }

    /// найти место для блока с заданным модификатором
    pub fn place(&self, target: &[u64], values: &[u64], mut modifier: Modifier) -> Result<Placement>
    {
        for kind in [FieldKind::Mask, FieldKind::Shift] {
            if let Some(field) = self.addenda.field(kind) {
                if !field.contains(modifier.get(kind)) {
                    return Err(invalid(
                        modifier,
                        format!("{} {} is out of the field range", kind, modifier.get(kind)),
                    ));
                }
            }
        }

        let mut pattern = stored_pattern(target, &modifier, self.values_width)?;

        if let Some(field) = self.addenda.field(FieldKind::MaxLength) {
            right_trim(&mut pattern);

            let length = pattern.len() as u64;

            if !field.contains(length) {
                return Err(invalid(
                    modifier,
                    format!("length {} does not fit the max_length field", length),
                ));
            }

            modifier.max_length = Some(length);
        }

        let (position, insert) = match find_existing(values, &pattern) {
            Some(position) => (position, vec![]),
            None => {
                let overlap = measure_overlap(values, &pattern);
                let insert = pattern[overlap ..].iter().map(|v| v.unwrap_or(0)).collect();

                (values.len() - overlap, insert)
            }
        };

        let position = position as u64;

        if let Some(field) = self.addenda.field(FieldKind::Position) {
            if !field.contains(position) {
                return Err(invalid(
                    modifier,
                    format!("position {} does not fit the position field", position),
                ));
            }
        }

        modifier.position = position;

        Ok(Placement { modifier, insert })
    }
}

/// шаблон хранимых значений: ячейка j = i & mask хранит target[i] - shift
///
/// ячейки, на которые не ссылается ни одно смещение, - произвольные (None)
pub fn stored_pattern(
    target: &[u64],
    modifier: &Modifier,
    width: IntegerWidth,
) -> Result<Vec<Option<u64>>>
{
    let chunk_mask = target.len().saturating_sub(1) as u64;
    let mut pattern = vec![None; modifier.slots(chunk_mask)];

    for (i, &value) in target.iter().enumerate() {
        let slot = (i as u64 & modifier.mask) as usize;

        let stored = match value.checked_sub(modifier.shift) {
            Some(stored) => stored,
            None => {
                return Err(invalid(
                    *modifier,
                    format!("value {:#X} at {} is below the shift", value, i),
                ))
            }
        };

        if !width.fits(stored) {
            return Err(invalid(
                *modifier,
                format!("value {:#X} does not fit {}", stored, width),
            ));
        }

        match pattern[slot] {
            Some(existing) if existing != stored => {
                return Err(invalid(
                    *modifier,
                    format!("slot {} needs both {:#X} and {:#X}", slot, existing, stored),
                ))
            }
            _ => pattern[slot] = Some(stored),
        }
    }

    Ok(pattern)
}

/// отбросить хвост из нулей и произвольных ячеек, оставив хотя бы одну ячейку
pub fn right_trim(pattern: &mut Vec<Option<u64>>)
{
    while pattern.len() > 1 && matches!(pattern.last(), Some(None | Some(0))) {
        pattern.pop();
    }
}

/// наименьшая позиция, с которой шаблон полностью совпадает с таблицей
pub fn find_existing(values: &[u64], pattern: &[Option<u64>]) -> Option<usize>
{
    if pattern.len() > values.len() {
        return None;
    }

    (0 ..= values.len() - pattern.len()).find(|&position| matches_at(&values[position ..], pattern))
}

/// длина наибольшего хвоста таблицы, совпадающего с началом шаблона
pub fn measure_overlap(values: &[u64], pattern: &[Option<u64>]) -> usize
{
    (1 ..= values.len().min(pattern.len()))
        .rev()
        .find(|&length| matches_at(&values[values.len() - length ..], &pattern[.. length]))
        .unwrap_or(0)
}

#[inline]
fn matches_at(values: &[u64], pattern: &[Option<u64>]) -> bool
{
    pattern
        .iter()
        .zip(values)
        .all(|(expected, &value)| expected.map_or(true, |expected| expected == value))
}

#[inline]
fn invalid(modifier: Modifier, reason: String) -> TableError
{
    TableError::InvalidModifier { modifier, reason }
}
