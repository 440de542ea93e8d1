use serde::Deserialize;

/// поле записи индекса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind
{
    /// позиция блока в таблице значений
    Position,
    /// маска, накладываемая на смещение кодпоинта в блоке
    Mask,
    /// сдвиг, прибавляемый к прочитанному значению
    Shift,
    /// количество хранимых значений блока, остальные читаются как 0
    MaxLength,
}

impl FieldKind
{
    pub fn name(&self) -> &'static str
    {
        match self {
            Self::Position => "position",
            Self::Mask => "mask",
            Self::Shift => "shift",
            Self::MaxLength => "max_length",
        }
    }

    /// перебирается ли значение поля при поиске?
    pub fn is_generable(&self) -> bool
    {
        matches!(self, Self::Mask | Self::Shift)
    }
}

impl core::fmt::Display for FieldKind
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result
    {
        f.pad(self.name())
    }
}

/// битовое поле записи индекса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addendum
{
    pub kind: FieldKind,
    /// ширина поля в битах
    pub bits: u32,
    /// минимальное значение
    pub min: u64,
    /// максимальное значение (включительно)
    pub max: u64,
    /// явно заданное смещение поля, проверяется при сборке Addenda
    pub placement: Option<u32>,
}

impl Addendum
{
    fn new(kind: FieldKind, bits: u32) -> Self
    {
        let max = match bits {
            0 => 0,
            64 .. => u64::MAX,
            _ => (1 << bits) - 1,
        };

        Self {
            kind,
            bits,
            min: 0,
            max,
            placement: None,
        }
    }

    pub fn position(bits: u32) -> Self
    {
        Self::new(FieldKind::Position, bits)
    }

    pub fn mask(bits: u32) -> Self
    {
        Self::new(FieldKind::Mask, bits)
    }

    pub fn shift(bits: u32) -> Self
    {
        Self::new(FieldKind::Shift, bits)
    }

    pub fn max_length(bits: u32) -> Self
    {
        Self::new(FieldKind::MaxLength, bits)
    }

    /// сузить диапазон значений поля
    pub fn with_range(mut self, min: u64, max: u64) -> Self
    {
        self.min = min;
        self.max = max;
        self
    }

    /// ожидаемое смещение поля
    pub fn at(mut self, offset: u32) -> Self
    {
        self.placement = Some(offset);
        self
    }

    /// маска поля, без учета смещения
    #[inline]
    pub fn field_mask(&self) -> u64
    {
        match self.bits {
            64 .. => u64::MAX,
            bits => (1 << bits) - 1,
        }
    }

    #[inline]
    pub fn contains(&self, value: u64) -> bool
    {
        (self.min ..= self.max).contains(&value)
    }

    /// варианты значений поля для поиска
    ///
    /// chunk_mask - маска смещения кодпоинта в блоке, от нее считается полная маска
    pub fn candidates(&self, chunk_mask: u64) -> Candidates
    {
        let values = match self.kind {
            FieldKind::Shift => CandidateValues::Range(self.min .. self.max),
            FieldKind::Mask => {
                let mut list = Vec::with_capacity(3);

                // полная маска может оказаться вне разрешенного диапазона поля
                for value in [chunk_mask & self.field_mask(), self.min, self.max] {
                    if self.contains(value) && !list.contains(&value) {
                        list.push(value);
                    }
                }

                CandidateValues::List(list.into_iter())
            }
            FieldKind::Position | FieldKind::MaxLength => CandidateValues::List(vec![].into_iter()),
        };

        Candidates { values }
    }
}

#[derive(Debug, Clone)]
enum CandidateValues
{
    Range(core::ops::Range<u64>),
    List(std::vec::IntoIter<u64>),
}

/// ленивый конечный перебор значений поля; клонированием перебор можно начать заново
#[derive(Debug, Clone)]
pub struct Candidates
{
    values: CandidateValues,
}

impl Candidates
{
    /// готовый список значений
    pub(crate) fn from_values(values: Vec<u64>) -> Self
    {
        Self {
            values: CandidateValues::List(values.into_iter()),
        }
    }
}

impl Iterator for Candidates
{
    type Item = u64;

    fn next(&mut self) -> Option<u64>
    {
        match &mut self.values {
            CandidateValues::Range(range) => range.next(),
            CandidateValues::List(list) => list.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>)
    {
        match &self.values {
            CandidateValues::Range(range) => range.size_hint(),
            CandidateValues::List(list) => list.size_hint(),
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn shift_candidates()
    {
        let shift = Addendum::shift(2);

        assert_eq!(shift.max, 3);
        assert_eq!(shift.candidates(0x1F).collect::<Vec<_>>(), vec![0, 1, 2]);

        let shift = Addendum::shift(8).with_range(4, 6);
        assert_eq!(shift.candidates(0x1F).collect::<Vec<_>>(), vec![4, 5]);
    }

    #[test]
    fn mask_candidates()
    {
        // полная маска совпадает с максимумом поля
        let mask = Addendum::mask(5);
        assert_eq!(mask.candidates(0x1F).collect::<Vec<_>>(), vec![0x1F, 0]);

        // поле шире блока: полная маска обрезается по блоку
        let mask = Addendum::mask(6);
        assert_eq!(mask.candidates(0x0F).collect::<Vec<_>>(), vec![0x0F, 0, 0x3F]);

        // поле уже блока
        let mask = Addendum::mask(3);
        assert_eq!(mask.candidates(0x1F).collect::<Vec<_>>(), vec![7, 0]);

        // полная маска блока вне диапазона поля
        let mask = Addendum::mask(4).with_range(0, 3);
        assert_eq!(mask.candidates(0x0F).collect::<Vec<_>>(), vec![0, 3]);
    }

    #[test]
    fn restartable()
    {
        let candidates = Addendum::shift(3).candidates(0xF);
        let again = candidates.clone();

        assert_eq!(candidates.count(), 7);
        assert_eq!(again.count(), 7);
    }

    #[test]
    fn not_generable()
    {
        assert_eq!(Addendum::position(16).candidates(0xF).count(), 0);
        assert_eq!(Addendum::max_length(6).candidates(0xF).count(), 0);
        assert_eq!(Addendum::position(16).at(16).placement, Some(16));
    }
}
