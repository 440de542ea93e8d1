use unicode_tables_source::properties::IdnaStatus;
use unicode_tables_source::IdnaRecord;

use crate::encode::Expansions;
use crate::error::{Result, TableError};

/// количество бит под статус
pub const STATUS_BITS: u32 = 3;
/// количество бит под длину маппинга
pub const MAPPING_LENGTH_BITS: u32 = 5;
/// смещение позиции маппинга в таблице расширений
pub const MAPPING_POSITION_SHIFT: u32 = STATUS_BITS + MAPPING_LENGTH_BITS;
/// количество бит под позицию маппинга (значение - 32 бита)
pub const MAPPING_POSITION_BITS: u32 = 32 - MAPPING_POSITION_SHIFT;

/// закодировать статус и маппинг IDNA
///
/// ```text
/// pppp pppp pppp pppp pppp pppp  lllll sss
/// ```
///
/// s - статус, l - длина маппинга, p - его позиция в таблице расширений
pub fn encode_idna(code: u32, record: &IdnaRecord, expansions: &mut Expansions) -> Result<u64>
{
    let status = u8::from(record.status) as u64;

    if record.mapping.is_empty() {
        return Ok(status);
    }

    let length = record.mapping.len() as u64;

    if length >= 1 << MAPPING_LENGTH_BITS {
        return Err(TableError::Unencodable {
            code,
            reason: format!("IDNA mapping of {} code points", length),
        });
    }

    let position = expansions.insert(&record.mapping) as u64;

    pack(code, status, length, position)
}

/// собрать значение; позиция должна поместиться в оставшиеся биты
fn pack(code: u32, status: u64, length: u64, position: u64) -> Result<u64>
{
    if position >= 1 << MAPPING_POSITION_BITS {
        return Err(TableError::Unencodable {
            code,
            reason: format!("IDNA mapping at expansion position 0x{:X}", position),
        });
    }

    Ok(status | length << STATUS_BITS | position << MAPPING_POSITION_SHIFT)
}

/// прочитать значение обратно: (статус, маппинг)
pub fn decode_idna(value: u64, expansions: &Expansions) -> (u8, Vec<u32>)
{
    let status = (value & ((1 << STATUS_BITS) - 1)) as u8;
    let length = (value >> STATUS_BITS) & ((1 << MAPPING_LENGTH_BITS) - 1);
    let position = value >> MAPPING_POSITION_SHIFT;

    let mapping = match length {
        0 => vec![],
        _ => expansions
            .get(position as usize, length as usize)
            .map(<[u32]>::to_vec)
            .unwrap_or_default(),
    };

    (status, mapping)
}

/// статус по умолчанию - disallowed, код 0
pub const DEFAULT_STATUS: IdnaStatus = IdnaStatus::Disallowed;

#[cfg(test)]
mod tests
{
    use super::*;

    /// таблица расширений больше, чем адресует значение
    #[test]
    fn mapping_position_bound()
    {
        let last = (1 << MAPPING_POSITION_BITS) - 1;

        let value = pack(0x41, 1, 1, last).unwrap();

        assert_eq!(value >> MAPPING_POSITION_SHIFT, last);
        assert!(value <= u32::MAX as u64);

        assert!(matches!(
            pack(0x41, 1, 1, last + 1),
            Err(TableError::Unencodable { code: 0x41, .. })
        ));
    }
}
