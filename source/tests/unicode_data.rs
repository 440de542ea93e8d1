use pretty_assertions::assert_eq;

use unicode_tables_source::properties::{CanonicalCombiningClass, DecompositionTag, IdnaStatus};
use unicode_tables_source::{idna_mapping_table, PropertiesError, PropertyKind, Unicode};

const UNICODE_DATA: &str = include_str!("./data/UnicodeData.txt");
const EXCLUSIONS: &str = include_str!("./data/CompositionExclusions.txt");
const IDNA: &str = include_str!("./data/IdnaMappingTable.txt");

fn unicode() -> Unicode
{
    Unicode::parse(UNICODE_DATA, EXCLUSIONS).unwrap()
}

#[test]
fn combining_classes()
{
    let unicode = unicode();

    assert_eq!(unicode.ccc(0x0301), CanonicalCombiningClass::Above);
    assert_eq!(unicode.ccc(0x0327), CanonicalCombiningClass::from(202));
    assert_eq!(unicode.ccc(0x0041), CanonicalCombiningClass::NotReordered);
    // отсутствует в таблице
    assert_eq!(unicode.ccc(0x10000), CanonicalCombiningClass::NotReordered);
}

#[test]
fn canonical_decompositions()
{
    let unicode = unicode();

    // рекурсивная декомпозиция + канонический порядок нестартеров
    assert_eq!(unicode.canonical_decomposition(0x1E08), vec![0x43, 0x327, 0x301]);
    // синглтон, раскрывающийся дальше
    assert_eq!(unicode.canonical_decomposition(0x212B), vec![0x41, 0x30A]);
    // декомпозиция совместимости не является канонической
    assert!(unicode.canonical_decomposition(0xFB01).is_empty());
    assert!(unicode.canonical_decomposition(0x0041).is_empty());
    // хангыль - алгоритмически
    assert_eq!(unicode.canonical_decomposition(0xAC00), vec![0x1100, 0x1161]);
    assert_eq!(
        unicode.canonical_decomposition(0xAC01),
        vec![0x1100, 0x1161, 0x11A8]
    );
}

#[test]
fn compatibility_decompositions()
{
    let unicode = unicode();

    assert_eq!(unicode.compatibility_decomposition(0xFB01), vec![0x66, 0x69]);
    assert_eq!(unicode.compatibility_decomposition(0x00A8), vec![0x20, 0x308]);
    assert_eq!(unicode.compatibility_decomposition(0x00C1), vec![0x41, 0x301]);
    assert_eq!(
        unicode.get(0xFB01).unwrap().decomposition_tag,
        Some(DecompositionTag::Compat)
    );
}

#[test]
fn ranges_with_default_properties_are_not_stored()
{
    let unicode = unicode();

    assert!(unicode.get(0xAC00).is_none());
    assert!(unicode.get(0xB000).is_none());
    assert!(unicode.get(0xD7A3).is_none());
}

#[test]
fn composition_pairs()
{
    let unicode = unicode();
    let pairs: Vec<(u32, u32, u32)> = unicode.canonical_pairs().collect();

    assert!(pairs.contains(&(0x00C1, 0x0041, 0x0301)));
    assert!(pairs.contains(&(0x1E08, 0x00C7, 0x0301)));
    assert!(pairs.contains(&(0x2ADC, 0x2ADD, 0x0338)));
    // синглтоны и декомпозиции совместимости - не пары
    assert!(!pairs.iter().any(|p| p.0 == 0x212B || p.0 == 0xFB01 || p.0 == 0x0340));
}

#[test]
fn composition_exclusions()
{
    let unicode = unicode();

    assert!(unicode.is_composition_exclusion(0x2ADC));
    assert!(unicode.is_full_composition_exclusion(0x2ADC));
    assert!(unicode.is_full_composition_exclusion(0x1D15E));
    // синглтон
    assert!(unicode.is_full_composition_exclusion(0x212B));
    // нестартер
    assert!(unicode.is_full_composition_exclusion(0x0344));

    assert!(!unicode.is_full_composition_exclusion(0x00C1));
    assert!(!unicode.is_full_composition_exclusion(0xFB01));
    assert!(!unicode.is_full_composition_exclusion(0x0041));
}

#[test]
fn idna()
{
    let records = idna_mapping_table(IDNA).unwrap();

    let a = records.iter().find(|r| r.range.contains(&0x41)).unwrap();
    assert_eq!(a.status, IdnaStatus::Mapped);
    assert_eq!(a.mapping, vec![0x61]);

    let zwj = records.iter().find(|r| r.range.contains(&0x200D)).unwrap();
    assert_eq!(zwj.status, IdnaStatus::Deviation);
    assert!(zwj.mapping.is_empty());
}

#[test]
fn property_kinds()
{
    assert_eq!(
        "canonical_combining_class".parse::<PropertyKind>(),
        Ok(PropertyKind::CanonicalCombiningClass)
    );
    assert_eq!(
        "idna_mapping".parse::<PropertyKind>(),
        Ok(PropertyKind::IdnaMapping)
    );
    assert_eq!(
        "script".parse::<PropertyKind>(),
        Err(PropertiesError::UnknownProperty("script".to_owned()))
    );

    for kind in PropertyKind::ALL {
        assert_eq!(kind.name().parse::<PropertyKind>(), Ok(kind));
    }
}

#[test]
fn malformed_data()
{
    let unmatched = "AC00;<Hangul Syllable, First>;Lo;0;L;;;;;N;;;;;\n0041;A;Lu;0;L;;;;;N;;;;;\n";

    assert_eq!(
        Unicode::parse(unmatched, "").err(),
        Some(PropertiesError::UnmatchedRange(0xAC00))
    );

    assert!(matches!(
        Unicode::parse("0041;A;Lu", "").err(),
        Some(PropertiesError::MalformedLine { line: 1, .. })
    ));

    assert_eq!(
        Unicode::parse("", "110000 # out of range").err(),
        Some(PropertiesError::CodepointOutOfRange(0x110000))
    );
}
