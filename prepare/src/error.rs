use crate::addenda::{FieldKind, Modifier};

/// ошибки сборки таблиц
///
/// все, кроме InvalidModifier, фатальны: частично собранная таблица не имеет смысла
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError
{
    /// конкретный модификатор не может воспроизвести блок - перебор продолжается
    #[error("modifier {modifier:?} cannot encode the chunk: {reason}")]
    InvalidModifier { modifier: Modifier, reason: String },

    /// ни один из вариантов модификатора не подошел
    #[error(
        "no viable modifier for chunk U+{first:04X}..=U+{last:04X} ({} candidates rejected)",
        .rejected.len()
    )]
    NoViableModifier {
        first: u32,
        last: u32,
        rejected: Vec<(Modifier, String)>,
    },

    /// формула ключа композиции дает коллизию на текущих данных
    #[error(
        "magic key collision {key:#X}: U+{:04X} + U+{:04X} and U+{:04X} + U+{:04X}",
        .existing.0, .existing.1, .colliding.0, .colliding.1
    )]
    MagicKeyCollision {
        key: u64,
        existing: (u32, u32),
        colliding: (u32, u32),
    },

    /// заранее оцененной емкости буфера не хватило
    #[error("capacity {capacity} of the {width} buffer exceeded")]
    CapacityExceeded { capacity: usize, width: &'static str },

    /// поля записи индекса размещены с разрывами / пересечениями
    #[error("addenda placement violation: {0}")]
    PlacementViolation(String),

    /// значение не помещается в элемент буфера
    #[error("value {value:#X} does not fit into {width}")]
    ValueOverflow { value: u64, width: &'static str },

    /// значение поля вне его диапазона
    #[error("value {value:#X} is out of range of the {field:?} field")]
    FieldOverflow { field: FieldKind, value: u64 },

    #[error("chunk size must be a power of two >= 2, got 1 << {0}")]
    InvalidChunkSize(u32),

    #[error("codepoint out of range: {0:#X}")]
    CodepointOutOfRange(u32),

    #[error("unknown integer width: {0:?}")]
    UnknownIntegerWidth(String),

    /// проверка собранной таблицы не сошлась с исходными данными
    #[error("U+{code:04X}: expected {expected:#X}, decoded {actual:#X}")]
    Mismatch { code: u32, expected: u64, actual: u64 },

    /// запись индекса ссылается за пределы таблицы значений
    #[error("index entry {entry:#X} of U+{code:04X} points past the values table")]
    BrokenEntry { code: u32, entry: u64 },

    /// значение свойства не укладывается ни в один из вариантов кодирования
    #[error("U+{code:04X} cannot be encoded: {reason}")]
    Unencodable { code: u32, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("settings are already initialized")]
    AlreadyInitialized,
}

pub type Result<T> = std::result::Result<T, TableError>;
