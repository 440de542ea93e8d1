//! значения свойств в том виде, в котором они хранятся в таблицах

mod decomposition;
mod expansions;
mod idna;

pub use decomposition::*;
pub use expansions::Expansions;
pub use idna::*;

use unicode_tables_source::{IdnaRecord, PropertyKind, Unicode, CODEPOINT_LIMIT};

use crate::composition::CanonicalComposition;
use crate::dataset::Dataset;
use crate::error::Result;

/// исходные данные всех свойств
pub struct Sources<'a>
{
    pub unicode: &'a Unicode,
    pub idna: &'a [IdnaRecord],
    pub composition: &'a CanonicalComposition,
    pub is_hangul: fn(u32) -> bool,
}

/// закодированное свойство: значения для компилятора и таблица расширений
pub struct EncodedProperty
{
    pub dataset: Dataset,
    pub expansions: Expansions,
}

/// закодировать свойство для всего кодового пространства
pub fn encode_property(kind: PropertyKind, sources: &Sources) -> Result<EncodedProperty>
{
    let mut expansions = Expansions::new();

    let dataset = match kind {
        PropertyKind::CanonicalCombiningClass => Dataset::from_sparse(
            kind,
            0,
            sources
                .unicode
                .codepoints()
                .map(|codepoint| (codepoint.code, u64::from(codepoint.ccc))),
        )?,
        PropertyKind::CanonicalDecomposition | PropertyKind::CompatibilityDecomposition => {
            let context = DecompositionContext {
                unicode: sources.unicode,
                composition: sources.composition,
                is_hangul: sources.is_hangul,
                canonical: kind == PropertyKind::CanonicalDecomposition,
            };

            let mut values = vec![];

            // кодпоинты, отсутствующие в UnicodeData.txt, не декомпозируются и не участвуют в композиции
            for code in 0 .. CODEPOINT_LIMIT {
                if sources.unicode.get(code).is_none() && !(sources.is_hangul)(code) {
                    continue;
                }

                values.push((code, encode_decomposition(&context, code, &mut expansions)?));
            }

            Dataset::from_sparse(kind, MARKER_NONE, values)?
        }
        PropertyKind::IdnaMapping => {
            let mut values = vec![];

            for record in sources.idna {
                for code in record.range.clone() {
                    values.push((code, encode_idna(code, record, &mut expansions)?));
                }
            }

            Dataset::from_sparse(kind, u8::from(DEFAULT_STATUS) as u64, values)?
        }
    };

    tracing::debug!(
        property = %kind,
        expansions = expansions.len(),
        "property encoded"
    );

    Ok(EncodedProperty {
        dataset,
        expansions,
    })
}
