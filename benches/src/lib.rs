//! наборы данных для бенчмарков

use unicode_tables_prepare::addenda::FieldKind;
use unicode_tables_prepare::config::{FieldConfig, TableConfig};
use unicode_tables_prepare::dataset::Dataset;
use unicode_tables_prepare::tables::IntegerWidth;
use unicode_tables_prepare::CanonicalComposition;
use unicode_tables_source::hangul::is_hangul_syllable;
use unicode_tables_source::{PropertyKind, Unicode, CODEPOINT_LIMIT};

const UNICODE_DATA: &str = include_str!("../../source/tests/data/UnicodeData.txt");
const EXCLUSIONS: &str = include_str!("../../source/tests/data/CompositionExclusions.txt");

/// разобранные тестовые данные UCD
pub fn unicode() -> Unicode
{
    match Unicode::parse(UNICODE_DATA, EXCLUSIONS) {
        Ok(unicode) => unicode,
        Err(e) => panic!("test data: {}", e),
    }
}

/// таблица композиций тестовых данных
pub fn composition(unicode: &Unicode) -> CanonicalComposition
{
    match CanonicalComposition::from_unicode(unicode, is_hangul_syllable) {
        Ok(composition) => composition,
        Err(e) => panic!("test data: {}", e),
    }
}

/// наборы данных: классы комбинирования из тестовых данных и синтетика
pub fn datasets() -> Vec<(&'static str, Dataset)>
{
    let unicode = unicode();
    let kind = PropertyKind::CanonicalCombiningClass;

    let build = |f: &dyn Fn(u32) -> u64| match Dataset::from_fn(kind, 0, f) {
        Ok(dataset) => dataset,
        Err(e) => panic!("dataset: {}", e),
    };

    vec![
        ("ccc", build(&|code| u64::from(unicode.ccc(code)))),
        // возрастающие значения - блоки отличаются на константу
        ("ramp", build(&|code| match code {
            0x1000 ..= 0x2FFF => ((code >> 3) & 0x7F) as u64,
            _ => 0,
        })),
        // короткие повторяющиеся серии
        ("runs", build(&|code| match code < 0x20000 {
            true => (code % 7 == 0) as u64 * (code % 5) as u64,
            false => 0,
        })),
    ]
}

/// настройки таблицы с заданным размером блока и третьим полем записи индекса
pub fn table_config(chunk_shift: u32, tail: FieldKind) -> TableConfig
{
    let tail = match tail {
        FieldKind::MaxLength => FieldConfig::new(tail, chunk_shift + 1),
        _ => FieldConfig::new(tail, 8),
    };

    TableConfig {
        name: format!("bench_{}", chunk_shift),
        property: PropertyKind::CanonicalCombiningClass,
        chunk_shift,
        index_width: IntegerWidth::U32,
        values_width: IntegerWidth::U8,
        index_capacity: (CODEPOINT_LIMIT >> chunk_shift) as usize + 1,
        values_capacity: 0x10000,
        fields: vec![
            FieldConfig::new(FieldKind::Position, 16),
            FieldConfig::new(FieldKind::Mask, chunk_shift),
            tail,
        ],
    }
}
