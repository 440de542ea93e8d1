use pretty_assertions::assert_eq;
use proptest::prelude::*;

use unicode_tables_prepare::addenda::FieldKind;
use unicode_tables_prepare::config::{FieldConfig, TableConfig};
use unicode_tables_prepare::dataset::Dataset;
use unicode_tables_prepare::encode::{encode_property, Sources};
use unicode_tables_prepare::tables::{CompiledTable, IntegerWidth, TablePairs};
use unicode_tables_prepare::{CanonicalComposition, TableError};
use unicode_tables_source::hangul::is_hangul_syllable;
use unicode_tables_source::{idna_mapping_table, PropertyKind, Unicode, CODEPOINT_LIMIT};

const UNICODE_DATA: &str = include_str!("../../source/tests/data/UnicodeData.txt");
const EXCLUSIONS: &str = include_str!("../../source/tests/data/CompositionExclusions.txt");
const IDNA: &str = include_str!("../../source/tests/data/IdnaMappingTable.txt");

/// блоки по 16 кодпоинтов, запись индекса: позиция, маска, сдвиг
fn config(fields: Vec<FieldConfig>) -> TableConfig
{
    TableConfig {
        name: "test".to_owned(),
        property: PropertyKind::CanonicalCombiningClass,
        chunk_shift: 4,
        index_width: IntegerWidth::U32,
        values_width: IntegerWidth::U8,
        index_capacity: (CODEPOINT_LIMIT >> 4) as usize,
        values_capacity: 0x10000,
        fields,
    }
}

fn shifted() -> TableConfig
{
    config(vec![
        FieldConfig::new(FieldKind::Position, 16),
        FieldConfig::new(FieldKind::Mask, 4),
        FieldConfig::new(FieldKind::Shift, 8),
    ])
}

fn dataset(pairs: impl IntoIterator<Item = (u32, u64)>) -> Dataset
{
    Dataset::from_sparse(PropertyKind::CanonicalCombiningClass, 0, pairs).unwrap()
}

fn compile(dataset: &Dataset, config: &TableConfig) -> CompiledTable
{
    TablePairs::compile(dataset, config).unwrap()
}

/// два соседних комбинирующих символа
#[test]
fn combining_marks_boundary()
{
    let dataset = dataset([(0x300, 230), (0x301, 230)]);
    let table = compile(&dataset, &shifted());

    assert_eq!(table.boundary, 0x310);
    assert_eq!(table.index().len(), 0x31);
    assert_eq!(table.get(0x300), Ok(230));
    assert_eq!(table.get(0x301), Ok(230));
    assert_eq!(table.get(0x302), Ok(0));
    assert_eq!(table.get(0x500), Ok(0));
    assert_eq!(table.get(0x10FFFF), Ok(0));

    table.verify(&dataset).unwrap();
}

/// одинаковые блоки ссылаются на одну и ту же позицию
#[test]
fn identical_chunks_share_position()
{
    let values = (0 .. 16).map(|i| 1 + (i * 7) % 13);
    let dataset = dataset(
        values
            .clone()
            .enumerate()
            .map(|(i, v)| (0x10 + i as u32, v))
            .chain(values.enumerate().map(|(i, v)| (0x30 + i as u32, v))),
    );

    let table = compile(&dataset, &shifted());

    assert_eq!(table.index()[1], table.index()[3]);
    assert!(table.stats.cached >= 1);
    assert_eq!(table.boundary, 0x40);

    table.verify(&dataset).unwrap();
}

/// блок, отличающийся от предыдущего на константу, не требует новых значений
#[test]
fn shifted_chunk_reuses_values()
{
    let dataset = dataset(
        (0 .. 16)
            .map(|i| (0x10 + i, 10 + i as u64))
            .chain((0 .. 16).map(|i| (0x20 + i, 11 + i as u64))),
    );

    let config = shifted();
    let table = compile(&dataset, &config);
    let addenda = config.addenda().unwrap();

    // нулевой блок - одно значение, первый перекрывается с ним и дописывает остальные
    assert_eq!(table.values(), (0 .. 16).collect::<Vec<u64>>());

    let first = addenda.unpack(table.index()[1], config.chunk_mask());
    let second = addenda.unpack(table.index()[2], config.chunk_mask());

    assert_eq!((first.position, first.shift), (0, 10));
    assert_eq!((second.position, second.shift), (0, 11));

    table.verify(&dataset).unwrap();
}

/// хвост из нулей не записывается, если в записи индекса есть длина
#[test]
fn max_length_cuts_zero_tail()
{
    let config = config(vec![
        FieldConfig::new(FieldKind::Position, 16),
        FieldConfig::new(FieldKind::Mask, 4),
        FieldConfig::new(FieldKind::MaxLength, 5),
    ]);

    let dataset = dataset([(0x20, 5), (0x21, 6), (0x40, 5), (0x41, 6), (0x42, 7)]);
    let table = compile(&dataset, &config);

    // [0], [5, 6], затем 7 дописывается к уже записанным 5, 6
    assert_eq!(table.values(), [0, 5, 6, 7]);
    assert_eq!(table.get(0x2F), Ok(0));

    table.verify(&dataset).unwrap();
}

/// сэкономленные значения считаются и в байтах таблицы значений
#[test]
fn saved_bytes()
{
    let mut config = shifted();
    config.values_width = IntegerWidth::U16;

    let dataset = dataset(
        (0 .. 16).flat_map(|i| [(0x10 + i, 300 + i as u64), (0x30 + i, 300 + i as u64)]),
    );
    let table = compile(&dataset, &config);

    assert!(table.stats.saved_values >= 16);
    assert_eq!(table.stats.saved_bytes, table.stats.saved_values * 2);

    table.verify(&dataset).unwrap();
}

/// пустой набор данных дает пустую таблицу
#[test]
fn default_only()
{
    let table = compile(&dataset([]), &shifted());

    assert_eq!(table.boundary, 0);
    assert!(table.index().is_empty());
    assert!(table.values().is_empty());
    assert_eq!(table.get(0x41), Ok(0));
}

#[test]
fn idempotent()
{
    let unicode = Unicode::parse(UNICODE_DATA, EXCLUSIONS).unwrap();
    let dataset = Dataset::from_fn(PropertyKind::CanonicalCombiningClass, 0, |code| {
        u64::from(unicode.ccc(code))
    })
    .unwrap();

    let first = compile(&dataset, &shifted());
    let second = compile(&dataset, &shifted());

    assert_eq!(first, second);
    first.verify(&dataset).unwrap();
}

/// все свойства на тестовых данных собираются и читаются обратно без потерь
#[test]
fn properties_round_trip()
{
    let unicode = Unicode::parse(UNICODE_DATA, EXCLUSIONS).unwrap();
    let idna = idna_mapping_table(IDNA).unwrap();
    let composition = CanonicalComposition::from_unicode(&unicode, is_hangul_syllable).unwrap();

    let sources = Sources {
        unicode: &unicode,
        idna: &idna,
        composition: &composition,
        is_hangul: is_hangul_syllable,
    };

    let config = unicode_tables_prepare::Config::from_toml(include_str!("../tables.toml")).unwrap();

    for table_config in config.tables.iter() {
        let encoded = encode_property(table_config.property, &sources).unwrap();
        let table = compile(&encoded.dataset, table_config);

        table.verify(&encoded.dataset).unwrap();

        // модификатор каждой записи индекса помещается в свои поля
        let addenda = table_config.addenda().unwrap();

        for &entry in table.index() {
            let modifier = addenda.unpack(entry, table_config.chunk_mask());
            assert_eq!(addenda.pack(&modifier), Ok(entry));
        }
    }
}

#[test]
fn capacity_exceeded()
{
    let mut config = shifted();
    config.index_capacity = 4;

    assert!(matches!(
        TablePairs::compile(&dataset([(0x300, 230)]), &config),
        Err(TableError::CapacityExceeded { capacity: 4, .. })
    ));
}

#[test]
fn placement_violation()
{
    let config = config(vec![
        FieldConfig::new(FieldKind::Position, 16),
        FieldConfig::new(FieldKind::Mask, 4),
        FieldConfig::new(FieldKind::Mask, 4),
    ]);

    assert!(matches!(
        TablePairs::compile(&dataset([]), &config),
        Err(TableError::PlacementViolation(_))
    ));
}

/// значение не помещается в u8, а сдвига нет
#[test]
fn no_viable_modifier()
{
    let config = config(vec![
        FieldConfig::new(FieldKind::Position, 16),
        FieldConfig::new(FieldKind::Mask, 4),
    ]);

    match TablePairs::compile(&dataset([(0x12, 0x1FF)]), &config) {
        Err(TableError::NoViableModifier {
            first,
            last,
            rejected,
        }) => {
            assert_eq!((first, last), (0x10, 0x1F));
            assert!(!rejected.is_empty());
        }
        result => panic!("unexpected result: {:?}", result),
    }
}

/// полная маска блока не разрешена полем: ищутся только маски из диапазона
#[test]
fn mask_outside_field_range()
{
    let mut mask = FieldConfig::new(FieldKind::Mask, 4);
    mask.max = Some(3);

    let config = config(vec![FieldConfig::new(FieldKind::Position, 16), mask]);

    // период 4 укладывается в маску 3
    let dataset = dataset([(0x300, 1), (0x304, 1), (0x308, 1), (0x30C, 1)]);
    let table = compile(&dataset, &config);
    let addenda = config.addenda().unwrap();

    assert_eq!(addenda.unpack(table.index()[0x30], config.chunk_mask()).mask, 3);
    table.verify(&dataset).unwrap();

    // без полной маски блок не кодируется, но это результат перебора, а не ошибка упаковки
    match TablePairs::compile(&crate::dataset([(0x300, 1), (0x301, 2)]), &config) {
        Err(TableError::NoViableModifier { first, rejected, .. }) => {
            assert_eq!(first, 0x300);
            assert!(rejected.iter().all(|(modifier, _)| modifier.mask <= 3));
        }
        result => panic!("unexpected result: {:?}", result),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn sparse_round_trip(pairs in prop::collection::btree_map(0u32 .. 0x400, 0u64 .. 40, 0 .. 64))
    {
        let dataset = dataset(pairs.clone());
        let table = compile(&dataset, &shifted());

        for code in 0 .. 0x420 {
            prop_assert_eq!(table.get(code), Ok(pairs.get(&code).copied().unwrap_or(0)));
        }

        prop_assert_eq!(table.get(0x10FFFF), Ok(0));
        prop_assert!(table.boundary <= 0x400);
    }
}
