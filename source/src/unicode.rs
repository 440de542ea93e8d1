use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::composition_exclusions::composition_exclusions;
use crate::hangul::decompose_hangul;
use crate::properties::*;

/// файл UCD с основными свойствами кодпоинтов
pub const UNICODE_DATA_FILE: &str = "UnicodeData.txt";
/// файл UCD с исключениями композиции
pub const COMPOSITION_EXCLUSIONS_FILE: &str = "CompositionExclusions.txt";
/// файл UTS #46 с таблицей IDNA
pub const IDNA_MAPPING_FILE: &str = "IdnaMappingTable.txt";

/// свойства кодпоинтов, разобранные из UCD
///
/// кодпоинты, отсутствующие в таблице, - стартеры без декомпозиции
pub struct Unicode
{
    codepoints: BTreeMap<u32, Codepoint>,
    exclusions: BTreeSet<u32>,
}

impl Unicode
{
    /// прочитать UnicodeData.txt и CompositionExclusions.txt из папки с данными UCD
    pub fn load(dir: &Path) -> Result<Self, PropertiesError>
    {
        let unicode_data = read(&dir.join(UNICODE_DATA_FILE))?;
        let exclusions = read(&dir.join(COMPOSITION_EXCLUSIONS_FILE))?;

        Self::parse(&unicode_data, &exclusions)
    }

    /// разбор UnicodeData.txt и CompositionExclusions.txt
    pub fn parse(unicode_data: &str, exclusions: &str) -> Result<Self, PropertiesError>
    {
        let unicode = Self {
            codepoints: unicode_data_table(unicode_data)?,
            exclusions: composition_exclusions(exclusions)?,
        };

        tracing::debug!(
            codepoints = unicode.codepoints.len(),
            exclusions = unicode.exclusions.len(),
            "parsed UCD"
        );

        Ok(unicode)
    }

    pub fn get(&self, code: u32) -> Option<&Codepoint>
    {
        self.codepoints.get(&code)
    }

    /// все записанные кодпоинты, по возрастанию
    pub fn codepoints(&self) -> impl Iterator<Item = &Codepoint>
    {
        self.codepoints.values()
    }

    /// CCC кодпоинта; для отсутствующих в таблице - 0
    pub fn ccc(&self, code: u32) -> CanonicalCombiningClass
    {
        match self.codepoints.get(&code) {
            Some(codepoint) => codepoint.ccc,
            None => CanonicalCombiningClass::NotReordered,
        }
    }

    /// входит ли кодпоинт в список исключений композиции?
    pub fn is_composition_exclusion(&self, code: u32) -> bool
    {
        self.exclusions.contains(&code)
    }

    /// полное исключение композиции (Full_Composition_Exclusion):
    /// исключения из списка, синглтоны и декомпозиции, начинающиеся с нестартера
    pub fn is_full_composition_exclusion(&self, code: u32) -> bool
    {
        let codepoint = match self.codepoints.get(&code) {
            Some(codepoint) => codepoint,
            None => return false,
        };

        if codepoint.decomposition.is_empty() || codepoint.decomposition_tag.is_some() {
            return false;
        }

        self.is_composition_exclusion(code)
            || codepoint.decomposition.len() == 1
            || codepoint.is_nonstarter()
            || self.ccc(codepoint.decomposition[0]).is_non_starter()
    }

    /// канонические декомпозиции из двух кодпоинтов: (кодпоинт, первый, второй)
    pub fn canonical_pairs(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_
    {
        self.codepoints.values().filter_map(|codepoint| {
            codepoint
                .canonical_pair()
                .map(|(first, second)| (codepoint.code, first, second))
        })
    }

    /// полная каноническая декомпозиция (NFD). пустая, если кодпоинт не декомпозируется
    pub fn canonical_decomposition(&self, code: u32) -> Vec<u32>
    {
        self.decompose(code, true)
    }

    /// полная декомпозиция совместимости (NFKD). пустая, если кодпоинт не декомпозируется
    pub fn compatibility_decomposition(&self, code: u32) -> Vec<u32>
    {
        self.decompose(code, false)
    }

    /// построить развернутую декомпозицию символа
    fn decompose(&self, code: u32, canonical: bool) -> Vec<u32>
    {
        if let Some(hangul) = decompose_hangul(code) {
            return hangul;
        }

        let codepoint = match self.codepoints.get(&code) {
            Some(codepoint) => codepoint,
            None => return vec![],
        };

        // хотим получить каноническую декомпозицию, у элемента - декомпозиция совместимости
        if canonical && codepoint.decomposition_tag.is_some() {
            return vec![];
        }

        let mut result = vec![];

        for &element in codepoint.decomposition.iter() {
            let decomposition = self.decompose(element, canonical);

            match decomposition.is_empty() {
                true => result.push(element),
                false => result.extend(decomposition),
            }
        }

        // канонический порядок: нестартеры между стартерами сортируются по CCC (сортировка устойчивая)
        let mut start = 0;

        for i in 0 ..= result.len() {
            if i == result.len() || self.ccc(result[i]).is_starter() {
                result[start .. i].sort_by_key(|&c| self.ccc(c));
                start = i + 1;
            }
        }

        result
    }
}

/// разбор UnicodeData.txt из UCD и составление таблицы свойств символов Unicode
fn unicode_data_table(data: &str) -> Result<BTreeMap<u32, Codepoint>, PropertiesError>
{
    let mut map = BTreeMap::new();

    // пригодится, когда встретим диапазоны
    let mut range_start: Option<Codepoint> = None;

    for (i, line) in data.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let props: Vec<&str> = line.split(';').collect();

        if props.len() < 6 {
            return Err(PropertiesError::MalformedLine {
                line: i + 1,
                reason: format!("expected at least 6 fields, got {}", props.len()),
            });
        }

        let code = parse_code(props[0])?;
        let name = props[1].to_owned();
        let ccc = CanonicalCombiningClass::try_from(props[3])?;
        let decomposition = Decomposition::try_from(props[5])?;

        let codepoint = Codepoint {
            code,
            name,
            ccc,
            decomposition_tag: decomposition.tag,
            decomposition: decomposition.codes,
        };

        // диапазоны: CJK, хангыль, тангутский, суррогаты, Private Use
        if codepoint.name.starts_with('<') && codepoint.name.ends_with("First>") {
            range_start = Some(codepoint);
            continue;
        }

        if codepoint.name.starts_with('<') && codepoint.name.ends_with("Last>") {
            let group = range_start
                .take()
                .ok_or(PropertiesError::UnmatchedRange(codepoint.code))?;

            // свойства диапазона одинаковы, хранить их для каждого кодпоинта имеет смысл,
            // только если они отличаются от значений по умолчанию
            if group.ccc.is_non_starter() || !group.decomposition.is_empty() {
                for code in group.code ..= codepoint.code {
                    let mut codepoint = group.clone();
                    codepoint.code = code;
                    map.insert(code, codepoint);
                }
            }

            continue;
        }

        if let Some(group) = &range_start {
            return Err(PropertiesError::UnmatchedRange(group.code));
        }

        map.insert(codepoint.code, codepoint);
    }

    if let Some(group) = &range_start {
        return Err(PropertiesError::UnmatchedRange(group.code));
    }

    Ok(map)
}

/// прочитать файл с данными UCD
pub(crate) fn read(path: &Path) -> Result<String, PropertiesError>
{
    std::fs::read_to_string(path).map_err(|e| PropertiesError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
