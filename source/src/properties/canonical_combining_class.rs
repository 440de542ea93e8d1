use super::PropertiesError;

/// класс канонического комбинирования (Canonical Combining Class, CCC)
/// берется из UCD: третья колонка UnicodeData.txt
///
/// значение по умолчанию - 0 (Not_Reordered), ему соответствуют стартеры
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalCombiningClass(u8);

#[allow(non_upper_case_globals)]
impl CanonicalCombiningClass
{
    pub const NotReordered: Self = Self(0);
    pub const Overlay: Self = Self(1);
    pub const Nukta: Self = Self(7);
    pub const Virama: Self = Self(9);
    pub const Below: Self = Self(220);
    pub const Above: Self = Self(230);
    pub const IotaSubscript: Self = Self(240);
}

impl CanonicalCombiningClass
{
    #[inline]
    pub fn is_starter(&self) -> bool
    {
        self.0 == 0
    }

    #[inline]
    pub fn is_non_starter(&self) -> bool
    {
        self.0 != 0
    }

    #[inline]
    pub fn u8(&self) -> u8
    {
        self.0
    }
}

macro_rules! from_into {
    ($($type:ty),+) => {
        $(
            impl From<CanonicalCombiningClass> for $type
            {
                #[inline]
                fn from(value: CanonicalCombiningClass) -> Self
                {
                    value.0 as $type
                }
            }
        )+
    }
}

from_into!(u8, u16, u32, u64);

impl From<u8> for CanonicalCombiningClass
{
    #[inline]
    fn from(value: u8) -> Self
    {
        Self(value)
    }
}

impl TryFrom<&str> for CanonicalCombiningClass
{
    type Error = PropertiesError;

    fn try_from(value: &str) -> Result<Self, Self::Error>
    {
        match value.trim().parse::<u8>() {
            Ok(ccc) => Ok(Self(ccc)),
            Err(_) => Err(PropertiesError::UnknownPropertyValue(value.to_owned())),
        }
    }
}
