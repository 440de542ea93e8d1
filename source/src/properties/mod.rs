use std::str::FromStr;

use serde::Deserialize;

mod canonical_combining_class;
mod decomposition;
mod idna;

pub use canonical_combining_class::CanonicalCombiningClass;
pub use decomposition::Decomposition;
pub use decomposition::DecompositionTag;
pub use idna::IdnaStatus;

/// Кодпоинт Unicode
/// источник - UCD, UnicodeData.txt
///
/// нас интересуют только свойства, из которых собираются таблицы:
/// CCC и декомпозиция
#[derive(Debug, Clone)]
pub struct Codepoint
{
    /// код символа
    pub code: u32,
    /// название
    pub name: String,
    /// класс канонического комбинирования (canonical combining class)
    pub ccc: CanonicalCombiningClass,
    /// тег декомпозиции
    pub decomposition_tag: Option<DecompositionTag>,
    /// декомпозиция (одноуровневая, как в UnicodeData.txt)
    pub decomposition: Vec<u32>,
}

impl Codepoint
{
    #[inline]
    pub fn is_starter(&self) -> bool
    {
        self.ccc.is_starter()
    }

    #[inline]
    pub fn is_nonstarter(&self) -> bool
    {
        self.ccc.is_non_starter()
    }

    /// каноническая декомпозиция из двух кодпоинтов (без тега)
    #[inline]
    pub fn canonical_pair(&self) -> Option<(u32, u32)>
    {
        match self.decomposition.len() == 2 && self.decomposition_tag.is_none() {
            true => Some((self.decomposition[0], self.decomposition[1])),
            false => None,
        }
    }
}

/// свойство, для которого собирается таблица
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind
{
    /// класс канонического комбинирования
    CanonicalCombiningClass,
    /// полная каноническая декомпозиция (NFD)
    CanonicalDecomposition,
    /// полная декомпозиция совместимости (NFKD)
    CompatibilityDecomposition,
    /// статус и маппинг IDNA (UTS #46)
    IdnaMapping,
}

impl PropertyKind
{
    pub const ALL: [PropertyKind; 4] = [
        Self::CanonicalCombiningClass,
        Self::CanonicalDecomposition,
        Self::CompatibilityDecomposition,
        Self::IdnaMapping,
    ];

    /// короткое имя - используется в конфигурации и в названиях файлов
    pub fn name(&self) -> &'static str
    {
        match self {
            Self::CanonicalCombiningClass => "canonical_combining_class",
            Self::CanonicalDecomposition => "canonical_decomposition",
            Self::CompatibilityDecomposition => "compatibility_decomposition",
            Self::IdnaMapping => "idna_mapping",
        }
    }

    /// большинство кодпоинтов имеют значение по умолчанию?
    /// для таких свойств исходные данные удобнее хранить в виде словаря
    pub fn is_sparse(&self) -> bool
    {
        matches!(
            self,
            Self::CanonicalDecomposition | Self::CompatibilityDecomposition
        )
    }
}

impl FromStr for PropertyKind
{
    type Err = PropertiesError;

    fn from_str(value: &str) -> Result<Self, Self::Err>
    {
        Self::ALL
            .iter()
            .find(|kind| kind.name() == value)
            .copied()
            .ok_or_else(|| PropertiesError::UnknownProperty(value.to_owned()))
    }
}

impl core::fmt::Display for PropertyKind
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result
    {
        f.write_str(self.name())
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum PropertiesError
{
    #[error("unknown property value: {0:?}")]
    UnknownPropertyValue(String),

    #[error("unknown property: {0:?}")]
    UnknownProperty(String),

    #[error("codepoint out of range: {0:#X}")]
    CodepointOutOfRange(u32),

    #[error("malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("unmatched range start U+{0:04X}")]
    UnmatchedRange(u32),

    #[error("cannot read {path}: {reason}")]
    Io { path: String, reason: String },
}

impl From<core::num::ParseIntError> for PropertiesError
{
    fn from(e: core::num::ParseIntError) -> Self
    {
        Self::UnknownPropertyValue(e.to_string())
    }
}

/// разобрать кодпоинт в шестнадцатеричной записи, проверив, что он лежит в пределах кодового пространства
pub(crate) fn parse_code(value: &str) -> Result<u32, PropertiesError>
{
    let code = u32::from_str_radix(value.trim(), 16)?;

    match code < crate::CODEPOINT_LIMIT {
        true => Ok(code),
        false => Err(PropertiesError::CodepointOutOfRange(code)),
    }
}
