use unicode_tables_source::Unicode;

use crate::composition::CanonicalComposition;
use crate::encode::Expansions;
use crate::error::{Result, TableError};

/// нет декомпозиции
pub const MARKER_NONE: u64 = 0;
/// декомпозиция в один кодпоинт
pub const MARKER_SINGLETON: u64 = 1;
/// декомпозиция, вынесенная в таблицу расширений
pub const MARKER_EXPANSION: u64 = 2;
/// слог хангыль, декомпозиция вычисляется
pub const MARKER_HANGUL: u64 = 3;

/// маска маркера
pub const MARKER_MASK: u64 = 0b111;
/// кодпоинт может быть первым в паре композиции
pub const FLAG_COMBINES_FORWARD: u64 = 1 << 3;
/// кодпоинт может быть вторым в паре композиции
pub const FLAG_COMBINES_BACKWARD: u64 = 1 << 4;

/// смещение данных значения (кодпоинт синглтона / длина расширения)
pub const PAYLOAD_SHIFT: u32 = 8;
/// количество бит под длину расширения
pub const EXPANSION_LENGTH_BITS: u32 = 5;
/// смещение позиции расширения
pub const EXPANSION_POSITION_SHIFT: u32 = PAYLOAD_SHIFT + EXPANSION_LENGTH_BITS;
/// количество бит под позицию расширения (значение - 32 бита)
pub const EXPANSION_POSITION_BITS: u32 = 32 - EXPANSION_POSITION_SHIFT;

/// что нужно знать для кодирования декомпозиций
pub struct DecompositionContext<'a>
{
    pub unicode: &'a Unicode,
    pub composition: &'a CanonicalComposition,
    pub is_hangul: fn(u32) -> bool,
    /// каноническая декомпозиция (NFD) или совместимости (NFKD)
    pub canonical: bool,
}

type Encoder = fn(&DecompositionContext, u32, &[u32], &mut Expansions) -> Option<u64>;

/// закодировать декомпозицию кодпоинта
///
/// формат значения:
///
/// ```text
/// ppppp pppp pppp pppp pppp  lllll  ___  b f mmm
/// ```
///
/// m - маркер, f / b - флаги композиции; для синглтона старшие 24 бита - кодпоинт,
/// для расширения - длина (l) и позиция (p) в таблице расширений
pub fn encode_decomposition(
    context: &DecompositionContext,
    code: u32,
    expansions: &mut Expansions,
) -> Result<u64>
{
    let decomposition = match context.canonical {
        true => context.unicode.canonical_decomposition(code),
        false => context.unicode.compatibility_decomposition(code),
    };

    let encoders: [Encoder; 4] = [
        hangul,    // слог хангыль
        identity,  // нет декомпозиции
        singleton, // синглтон
        expansion, // все остальное
    ];

    encoders
        .iter()
        .find_map(|f| f(context, code, &decomposition, expansions))
        .ok_or_else(|| TableError::Unencodable {
            code,
            reason: format!("decomposition of {} code points", decomposition.len()),
        })
}

/// флаги участия в композиции
fn flags(context: &DecompositionContext, code: u32) -> u64
{
    let mut flags = 0;

    if context.composition.combines_forward(code) {
        flags |= FLAG_COMBINES_FORWARD;
    }

    if context.composition.combines_backward(code) {
        flags |= FLAG_COMBINES_BACKWARD;
    }

    flags
}

/// слог хангыль
fn hangul(context: &DecompositionContext, code: u32, _: &[u32], _: &mut Expansions) -> Option<u64>
{
    match (context.is_hangul)(code) {
        true => Some(MARKER_HANGUL),
        false => None,
    }
}

/// нет декомпозиции: остаются только флаги композиции
fn identity(
    context: &DecompositionContext,
    code: u32,
    decomposition: &[u32],
    _: &mut Expansions,
) -> Option<u64>
{
    if !decomposition.is_empty() {
        return None;
    }

    Some(MARKER_NONE | flags(context, code))
}

/// декомпозиция в один кодпоинт
fn singleton(
    context: &DecompositionContext,
    code: u32,
    decomposition: &[u32],
    _: &mut Expansions,
) -> Option<u64>
{
    if decomposition.len() != 1 {
        return None;
    }

    Some(MARKER_SINGLETON | flags(context, code) | (decomposition[0] as u64) << PAYLOAD_SHIFT)
}

/// декомпозиция из нескольких кодпоинтов
fn expansion(
    context: &DecompositionContext,
    code: u32,
    decomposition: &[u32],
    expansions: &mut Expansions,
) -> Option<u64>
{
    let length = decomposition.len() as u64;

    if length < 2 || length >= 1 << EXPANSION_LENGTH_BITS {
        return None;
    }

    let position = expansions.insert(decomposition) as u64;

    if position >= 1 << EXPANSION_POSITION_BITS {
        return None;
    }

    Some(
        MARKER_EXPANSION
            | flags(context, code)
            | length << PAYLOAD_SHIFT
            | position << EXPANSION_POSITION_SHIFT,
    )
}

/// прочитать значение обратно: (маркер, флаги, декомпозиция)
pub fn decode_decomposition(value: u64, expansions: &Expansions) -> (u64, u64, Vec<u32>)
{
    let marker = value & MARKER_MASK;
    let flags = value & (FLAG_COMBINES_FORWARD | FLAG_COMBINES_BACKWARD);

    let decomposition = match marker {
        MARKER_SINGLETON => vec![(value >> PAYLOAD_SHIFT) as u32],
        MARKER_EXPANSION => {
            let length = (value >> PAYLOAD_SHIFT) & ((1 << EXPANSION_LENGTH_BITS) - 1);
            let position = value >> EXPANSION_POSITION_SHIFT;

            expansions
                .get(position as usize, length as usize)
                .map(<[u32]>::to_vec)
                .unwrap_or_default()
        }
        _ => vec![],
    };

    (marker, flags, decomposition)
}
