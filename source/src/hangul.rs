//! алгоритмическая декомпозиция / композиция слогов хангыль
//!
//! слоги хангыль не имеют записанной декомпозиции в UnicodeData.txt, она вычисляется.
//! для компилятора таблиц это внешний предикат - кодпоинты этого диапазона
//! не хранятся в таблицах декомпозиции, а помечаются маркером.

/// начало блока слогов хангыль
pub const HANGUL_S_BASE: u32 = 0xAC00;
/// начало блока ведущих согласных чамо
pub const HANGUL_L_BASE: u32 = 0x1100;
/// начало блока гласных чамо
pub const HANGUL_V_BASE: u32 = 0x1161;
/// начало блока завершающих согласных (на 1 меньше первой из них)
pub const HANGUL_T_BASE: u32 = 0x11A7;
/// количество ведущих согласных
pub const HANGUL_L_COUNT: u32 = 19;
/// количество гласных
pub const HANGUL_V_COUNT: u32 = 21;
/// количество завершающих согласных (на 1 больше)
pub const HANGUL_T_COUNT: u32 = 28;
/// количество гласных * количество завершающих согласных
pub const HANGUL_N_COUNT: u32 = 588;
/// количество слогов хангыль в Unicode
pub const HANGUL_S_COUNT: u32 = 11172;

/// является ли кодпоинт слогом хангыль?
#[inline]
pub fn is_hangul_syllable(code: u32) -> bool
{
    code.wrapping_sub(HANGUL_S_BASE) < HANGUL_S_COUNT
}

/// декомпозиция слога хангыль на 2 или 3 чамо
pub fn decompose_hangul(code: u32) -> Option<Vec<u32>>
{
    if !is_hangul_syllable(code) {
        return None;
    }

    let s = code - HANGUL_S_BASE;

    let l = HANGUL_L_BASE + s / HANGUL_N_COUNT;
    let v = HANGUL_V_BASE + (s % HANGUL_N_COUNT) / HANGUL_T_COUNT;
    let t = s % HANGUL_T_COUNT;

    Some(match t {
        0 => vec![l, v],
        _ => vec![l, v, HANGUL_T_BASE + t],
    })
}

/// последовательность (предполагаются 2 стартера) - чамо хангыль
pub fn compose_hangul(first: u32, second: u32) -> Option<u32>
{
    // кейс L, V
    let l = first.wrapping_sub(HANGUL_L_BASE);

    if l < HANGUL_L_COUNT {
        let v = second.wrapping_sub(HANGUL_V_BASE);

        if v < HANGUL_V_COUNT {
            return Some(HANGUL_S_BASE + l * HANGUL_N_COUNT + v * HANGUL_T_COUNT);
        }
    }

    // кейс LV, T
    let lv = first.wrapping_sub(HANGUL_S_BASE);

    if lv < HANGUL_S_COUNT && lv % HANGUL_T_COUNT == 0 {
        let t = second.wrapping_sub(HANGUL_T_BASE);

        if t > 0 && t < HANGUL_T_COUNT {
            return Some(first + t);
        }
    }

    None
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn syllables()
    {
        assert!(!is_hangul_syllable(0xABFF));
        assert!(is_hangul_syllable(0xAC00));
        assert!(is_hangul_syllable(0xD7A3));
        assert!(!is_hangul_syllable(0xD7A4));
    }

    #[test]
    fn round_trip()
    {
        // 한 = ᄒ + ᅡ + ᆫ
        assert_eq!(decompose_hangul(0xD55C), Some(vec![0x1112, 0x1161, 0x11AB]));
        assert_eq!(compose_hangul(0x1112, 0x1161), Some(0xD558));
        assert_eq!(compose_hangul(0xD558, 0x11AB), Some(0xD55C));

        // 가 = ᄀ + ᅡ
        assert_eq!(decompose_hangul(0xAC00), Some(vec![0x1100, 0x1161]));
        assert_eq!(compose_hangul(0x0041, 0x0301), None);
    }
}
