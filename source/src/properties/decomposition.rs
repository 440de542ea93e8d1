use super::{parse_code, PropertiesError};

/// декомпозиция
/// берется из UCD: 5 колонка UnicodeData.txt
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decomposition
{
    /// декомпозиция
    pub codes: Vec<u32>,
    /// тег декомпозиции
    pub tag: Option<DecompositionTag>,
}

impl TryFrom<&str> for Decomposition
{
    type Error = PropertiesError;

    fn try_from(value: &str) -> Result<Self, Self::Error>
    {
        let value = value.trim();

        let (tag_string, decomposition_string) = match value.starts_with('<') {
            true => value
                .split_once(' ')
                .ok_or_else(|| PropertiesError::UnknownPropertyValue(value.to_owned()))?,
            false => ("", value),
        };

        let tag = match !tag_string.is_empty() {
            true => Some(DecompositionTag::try_from(tag_string)?),
            false => None,
        };

        let codes = decomposition_string
            .split_whitespace()
            .map(parse_code)
            .collect::<Result<Vec<u32>, _>>()?;

        // тег без самой декомпозиции не имеет смысла
        if tag.is_some() && codes.is_empty() {
            return Err(PropertiesError::UnknownPropertyValue(value.to_owned()));
        }

        Ok(Self { codes, tag })
    }
}

/// тег декомпозиции
/// берется из UCD: 5 колонка UnicodeData.txt
/// наличие тега означает, что декомпозиция - не каноническая, а декомпозиция совместимости
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum DecompositionTag
{
    /// вариант шрифта
    Font = 0,
    /// неразрывная версия пробела или дефиса
    NoBreak = 1,
    /// начальная форма представления (арабский)
    Initial = 2,
    /// средняя форма представления (арабский)
    Medial = 3,
    /// конечная форма представления (арабский)
    Final = 4,
    /// изолированная форма представления (арабский)
    Isolated = 5,
    /// окруженная форма
    Circle = 6,
    /// надстрочная форма
    Super = 7,
    /// подстрочная форма
    Sub = 8,
    /// вертикальная форма представления
    Vertical = 9,
    /// совместимый символ широкого формата (или зэнкаку)
    Wide = 10,
    /// совместимый символ узкого формата (или ханкаку)
    Narrow = 11,
    /// малая вариантная форма (совместимость CNS (Chinese National Standard))
    Small = 12,
    /// вариант шрифта в квадрате CJK
    Square = 13,
    /// форма обыкновенной дроби
    Fraction = 14,
    /// неопределенный символ для обеспечения совместимости
    Compat = 15,
}

impl DecompositionTag
{
    const ALL: [(DecompositionTag, &'static str); 16] = [
        (Self::Font, "<font>"),
        (Self::NoBreak, "<noBreak>"),
        (Self::Initial, "<initial>"),
        (Self::Medial, "<medial>"),
        (Self::Final, "<final>"),
        (Self::Isolated, "<isolated>"),
        (Self::Circle, "<circle>"),
        (Self::Super, "<super>"),
        (Self::Sub, "<sub>"),
        (Self::Vertical, "<vertical>"),
        (Self::Wide, "<wide>"),
        (Self::Narrow, "<narrow>"),
        (Self::Small, "<small>"),
        (Self::Square, "<square>"),
        (Self::Fraction, "<fraction>"),
        (Self::Compat, "<compat>"),
    ];

    /// запись тега в UnicodeData.txt
    pub fn abbr(&self) -> &'static str
    {
        Self::ALL[*self as usize].1
    }
}

impl TryFrom<&str> for DecompositionTag
{
    type Error = PropertiesError;

    #[inline]
    fn try_from(abbr: &str) -> Result<Self, Self::Error>
    {
        Self::ALL
            .iter()
            .find(|(_, a)| *a == abbr)
            .map(|(tag, _)| *tag)
            .ok_or_else(|| PropertiesError::UnknownPropertyValue(abbr.to_owned()))
    }
}

impl From<DecompositionTag> for u8
{
    #[inline]
    fn from(value: DecompositionTag) -> Self
    {
        value as u8
    }
}

impl core::fmt::Display for DecompositionTag
{
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result
    {
        f.write_str(self.abbr())
    }
}
