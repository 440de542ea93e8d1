//! битовая раскладка записи индекса
//!
//! запись индекса - целое число фиксированной разрядности, разбитое на поля (позиция, маска, сдвиг,
//! длина). поля идут подряд, без разрывов, начиная со старших битов; младшее поле начинается с нулевого бита.
//!
//! значение кодпоинта восстанавливается так:
//!
//! ```text
//! values[position + (remaining & mask)] + shift
//! ```
//!
//! где remaining - смещение кодпоинта в блоке. если есть поле max_length, то ячейки блока
//! с номером >= max_length не хранятся и читаются как 0.

mod addendum;

pub use addendum::{Addendum, Candidates, FieldKind};

use crate::error::{Result, TableError};
use crate::tables::IntegerWidth;

/// значения полей одной записи индекса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifier
{
    pub position: u64,
    pub mask: u64,
    pub shift: u64,
    pub max_length: Option<u64>,
}

impl Modifier
{
    /// значение поля
    pub fn get(&self, kind: FieldKind) -> u64
    {
        match kind {
            FieldKind::Position => self.position,
            FieldKind::Mask => self.mask,
            FieldKind::Shift => self.shift,
            FieldKind::MaxLength => self.max_length.unwrap_or(0),
        }
    }

    /// заменить значение поля
    pub fn set(&mut self, kind: FieldKind, value: u64)
    {
        match kind {
            FieldKind::Position => self.position = value,
            FieldKind::Mask => self.mask = value,
            FieldKind::Shift => self.shift = value,
            FieldKind::MaxLength => self.max_length = Some(value),
        }
    }

    /// количество ячеек таблицы значений, к которым обращается блок
    #[inline]
    pub fn slots(&self, chunk_mask: u64) -> usize
    {
        (self.mask & chunk_mask) as usize + 1
    }

    /// прочитать значение для кодпоинта со смещением remaining в блоке
    pub fn decode_slot(&self, values: &[u64], remaining: u32) -> Option<u64>
    {
        let slot = remaining as u64 & self.mask;

        if let Some(max_length) = self.max_length {
            if slot >= max_length {
                return Some(self.shift);
            }
        }

        let index = usize::try_from(self.position + slot).ok()?;

        values.get(index).map(|&value| value + self.shift)
    }
}

/// описание поля для генерации кода
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout
{
    pub kind: FieldKind,
    pub bits: u32,
    pub offset: u32,
}

/// набор полей записи индекса
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addenda
{
    container: IntegerWidth,
    members: Vec<Addendum>,
    bits: u32,
}

impl Addenda
{
    /// собрать раскладку: поля перечислены от старших битов к младшим
    pub fn new(container: IntegerWidth, members: Vec<Addendum>) -> Result<Self>
    {
        let violation = |reason: String| Err(TableError::PlacementViolation(reason));

        let mut bits = 0;

        for (i, member) in members.iter().enumerate() {
            if member.bits == 0 {
                return violation(format!("field {} has zero width", member.kind));
            }

            if members[.. i].iter().any(|m| m.kind == member.kind) {
                return violation(format!("field {} is listed twice", member.kind));
            }

            if member.min > member.max || member.max > member.field_mask() {
                return violation(format!(
                    "field {}: range {} ..= {} does not fit {} bits",
                    member.kind, member.min, member.max, member.bits
                ));
            }

            bits += member.bits;
        }

        if bits > container.bits() {
            return violation(format!(
                "fields take {} bits, container {} has {}",
                bits,
                container,
                container.bits()
            ));
        }

        if !members.iter().any(|m| m.kind == FieldKind::Position) {
            return violation("position field is missing".to_owned());
        }

        let mut cumulative = 0;
        let mut placed = Vec::with_capacity(members.len());

        for member in members {
            cumulative += member.bits;
            let offset = bits - cumulative;

            match member.placement {
                Some(placement) if placement != offset => {
                    return violation(format!(
                        "field {} is expected at bit {}, but placed at bit {}",
                        member.kind, placement, offset
                    ))
                }
                _ => placed.push(member.at(offset)),
            }
        }

        Ok(Self {
            container,
            members: placed,
            bits,
        })
    }

    #[inline]
    pub fn container(&self) -> IntegerWidth
    {
        self.container
    }

    /// суммарная ширина полей
    #[inline]
    pub fn bits(&self) -> u32
    {
        self.bits
    }

    pub fn members(&self) -> &[Addendum]
    {
        &self.members
    }

    pub fn field(&self, kind: FieldKind) -> Option<&Addendum>
    {
        self.members.iter().find(|m| m.kind == kind)
    }

    #[inline]
    pub fn has(&self, kind: FieldKind) -> bool
    {
        self.field(kind).is_some()
    }

    /// маска всех битов, занятых полями
    pub fn mask(&self) -> u64
    {
        self.members
            .iter()
            .fold(0, |acc, m| acc | (m.field_mask() << offset(m)))
    }

    /// запись с минимальными значениями всех полей
    pub fn min(&self) -> u64
    {
        self.members
            .iter()
            .fold(0, |acc, m| acc | (m.min << offset(m)))
    }

    /// запись с максимальными значениями всех полей
    pub fn max(&self) -> u64
    {
        self.members
            .iter()
            .fold(0, |acc, m| acc | (m.max << offset(m)))
    }

    /// упаковать значения полей; не перечисленные поля получают минимальное значение
    pub fn modifier(&self, fields: &[(FieldKind, u64)]) -> Result<u64>
    {
        let mut entry = 0;

        for member in self.members.iter() {
            let value = fields
                .iter()
                .find(|(kind, _)| *kind == member.kind)
                .map_or(member.min, |&(_, value)| value);

            entry |= self.pack_field(member, value)?;
        }

        Ok(entry)
    }

    /// упаковать модификатор в запись индекса
    pub fn pack(&self, modifier: &Modifier) -> Result<u64>
    {
        self.members.iter().try_fold(0, |entry, member| {
            Ok(entry | self.pack_field(member, modifier.get(member.kind))?)
        })
    }

    fn pack_field(&self, member: &Addendum, value: u64) -> Result<u64>
    {
        if !member.contains(value) {
            return Err(TableError::FieldOverflow {
                field: member.kind,
                value,
            });
        }

        Ok(value << offset(member))
    }

    /// распаковать запись индекса
    ///
    /// поля, которых нет в раскладке: маска - полная маска блока, сдвиг - 0, длина не ограничена
    pub fn unpack(&self, entry: u64, chunk_mask: u64) -> Modifier
    {
        let mut modifier = self.base(chunk_mask);

        for member in self.members.iter() {
            modifier.set(member.kind, (entry >> offset(member)) & member.field_mask());
        }

        modifier
    }

    /// модификатор, с которого начинается перебор: все поля, имеющиеся в раскладке, - минимальные
    pub fn base(&self, chunk_mask: u64) -> Modifier
    {
        let mut modifier = Modifier {
            position: 0,
            mask: chunk_mask,
            shift: 0,
            max_length: None,
        };

        for member in self.members.iter() {
            modifier.set(member.kind, member.min);
        }

        modifier
    }

    /// пространство поиска - декартово произведение вариантов перебираемых полей
    pub fn search_space(&self, chunk_mask: u64) -> SearchSpace
    {
        SearchSpace {
            base: self.base(chunk_mask),
            axes: self
                .members
                .iter()
                .filter(|m| m.kind.is_generable())
                .map(|m| (m.kind, m.candidates(chunk_mask)))
                .collect(),
        }
    }

    /// описание полей для генерации кода, от старших к младшим
    pub fn layout(&self) -> Vec<FieldLayout>
    {
        self.members
            .iter()
            .map(|m| FieldLayout {
                kind: m.kind,
                bits: m.bits,
                offset: offset(m),
            })
            .collect()
    }
}

#[inline]
fn offset(member: &Addendum) -> u32
{
    member.placement.unwrap_or(0)
}

/// декартово произведение вариантов значений полей
///
/// варианты каждой оси материализуются только при начале перебора
#[derive(Debug, Clone)]
pub struct SearchSpace
{
    base: Modifier,
    axes: Vec<(FieldKind, Candidates)>,
}

impl SearchSpace
{
    /// количество комбинаций
    pub fn size(&self) -> usize
    {
        self.axes
            .iter()
            .map(|(_, candidates)| candidates.clone().count())
            .product()
    }

    /// наименьшее значение поля среди кандидатов
    pub fn lowest(&self, kind: FieldKind) -> u64
    {
        match self.axes.iter().find(|(axis, _)| *axis == kind) {
            Some((_, candidates)) => candidates.clone().min().unwrap_or(0),
            None => self.base.get(kind),
        }
    }

    /// оставить на оси только значения, удовлетворяющие условию
    pub fn filter_axis(mut self, kind: FieldKind, predicate: impl Fn(u64) -> bool) -> Self
    {
        for (axis, candidates) in self.axes.iter_mut() {
            if *axis == kind {
                let values: Vec<u64> = candidates.clone().filter(|&v| predicate(v)).collect();
                *candidates = Candidates::from_values(values);
            }
        }

        self
    }

    /// начать перебор
    pub fn iter(&self) -> Combinations
    {
        let axes: Vec<(FieldKind, Vec<u64>)> = self
            .axes
            .iter()
            .map(|(kind, candidates)| (*kind, candidates.clone().collect()))
            .collect();

        let exhausted = axes.iter().any(|(_, values)| values.is_empty());

        Combinations {
            base: self.base,
            counters: vec![0; axes.len()],
            axes,
            exhausted,
        }
    }
}

/// перебор комбинаций, последняя ось меняется быстрее всех
#[derive(Debug, Clone)]
pub struct Combinations
{
    base: Modifier,
    axes: Vec<(FieldKind, Vec<u64>)>,
    counters: Vec<usize>,
    exhausted: bool,
}

impl Iterator for Combinations
{
    type Item = Modifier;

    fn next(&mut self) -> Option<Modifier>
    {
        if self.exhausted {
            return None;
        }

        let mut modifier = self.base;

        for ((kind, values), &counter) in self.axes.iter().zip(self.counters.iter()) {
            modifier.set(*kind, values[counter]);
        }

        // следующая комбинация
        self.exhausted = true;

        for i in (0 .. self.axes.len()).rev() {
            self.counters[i] += 1;

            match self.counters[i] < self.axes[i].1.len() {
                true => {
                    self.exhausted = false;
                    break;
                }
                false => self.counters[i] = 0,
            }
        }

        Some(modifier)
    }
}

impl IntoIterator for &SearchSpace
{
    type Item = Modifier;
    type IntoIter = Combinations;

    fn into_iter(self) -> Combinations
    {
        self.iter()
    }
}
