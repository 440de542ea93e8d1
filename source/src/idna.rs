use std::ops::RangeInclusive;
use std::path::Path;

use crate::properties::{parse_code, IdnaStatus, PropertiesError};
use crate::unicode::read;
use crate::IDNA_MAPPING_FILE;

/// запись IdnaMappingTable.txt (UTS #46)
///
/// ```text
/// 0041          ; mapped                 ; 0061          # 1.1  LATIN CAPITAL LETTER A
/// 0000..002C    ; disallowed_STD3_valid                  # 1.1  <control-0000>..COMMA
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IdnaRecord
{
    /// диапазон кодпоинтов
    pub range: RangeInclusive<u32>,
    /// статус
    pub status: IdnaStatus,
    /// маппинг (пустой для статусов без маппинга и для deviation, отображаемого в пустую строку)
    pub mapping: Vec<u32>,
}

/// прочитать IdnaMappingTable.txt из папки с данными
pub fn load(dir: &Path) -> Result<Vec<IdnaRecord>, PropertiesError>
{
    idna_mapping_table(&read(&dir.join(IDNA_MAPPING_FILE))?)
}

/// разбор IdnaMappingTable.txt
pub fn idna_mapping_table(data: &str) -> Result<Vec<IdnaRecord>, PropertiesError>
{
    let mut records = vec![];

    for (i, line) in data.lines().enumerate() {
        let line = match line.split_once('#') {
            Some((line, _)) => line,
            None => line,
        };

        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(';').map(str::trim).collect();

        if fields.len() < 2 {
            return Err(PropertiesError::MalformedLine {
                line: i + 1,
                reason: format!("expected at least 2 fields, got {}", fields.len()),
            });
        }

        let range = match fields[0].split_once("..") {
            Some((first, last)) => parse_code(first)? ..= parse_code(last)?,
            None => {
                let code = parse_code(fields[0])?;
                code ..= code
            }
        };

        if range.is_empty() {
            return Err(PropertiesError::MalformedLine {
                line: i + 1,
                reason: format!("empty range {}", fields[0]),
            });
        }

        let status = IdnaStatus::try_from(fields[1])?;

        // третья колонка - маппинг, четвертая (статус IDNA2008) нас не интересует
        let mapping = match fields.get(2) {
            Some(mapping) if status.has_mapping() => mapping
                .split_whitespace()
                .map(parse_code)
                .collect::<Result<Vec<u32>, _>>()?,
            _ => vec![],
        };

        records.push(IdnaRecord {
            range,
            status,
            mapping,
        });
    }

    tracing::debug!(count = records.len(), "parsed IDNA mapping records");

    Ok(records)
}
