//! исходные данные для таблиц: разбор файлов UCD (UnicodeData.txt, CompositionExclusions.txt)
//! и таблицы IDNA (IdnaMappingTable.txt), уже скачанных в локальную папку

pub mod hangul;
pub mod idna;
pub mod properties;

mod composition_exclusions;
mod unicode;

pub use composition_exclusions::composition_exclusions;
pub use idna::{idna_mapping_table, IdnaRecord};
pub use properties::{PropertiesError, PropertyKind};
pub use unicode::{Unicode, COMPOSITION_EXCLUSIONS_FILE, IDNA_MAPPING_FILE, UNICODE_DATA_FILE};

/// размер кодового пространства Unicode: U+0000 ..= U+10FFFF
pub const CODEPOINT_LIMIT: u32 = 0x110000;
