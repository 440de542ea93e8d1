use super::PropertiesError;

/// статус кодпоинта в IDNA (UTS #46)
/// берется из IdnaMappingTable.txt, вторая колонка
///
/// 3 бита. нулевое значение - disallowed: так помечены все неназначенные кодпоинты,
/// поэтому оно же является значением по умолчанию
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IdnaStatus
{
    #[default]
    Disallowed = 0,
    Valid = 1,
    Ignored = 2,
    Mapped = 3,
    Deviation = 4,
    DisallowedStd3Valid = 5,
    DisallowedStd3Mapped = 6,
}

impl IdnaStatus
{
    /// может ли статус сопровождаться маппингом?
    pub fn has_mapping(&self) -> bool
    {
        matches!(
            self,
            Self::Mapped | Self::Deviation | Self::DisallowedStd3Mapped
        )
    }
}

impl TryFrom<&str> for IdnaStatus
{
    type Error = PropertiesError;

    fn try_from(value: &str) -> Result<Self, Self::Error>
    {
        Ok(match value.trim() {
            "disallowed" => Self::Disallowed,
            "valid" => Self::Valid,
            "ignored" => Self::Ignored,
            "mapped" => Self::Mapped,
            "deviation" => Self::Deviation,
            "disallowed_STD3_valid" => Self::DisallowedStd3Valid,
            "disallowed_STD3_mapped" => Self::DisallowedStd3Mapped,
            _ => return Err(PropertiesError::UnknownPropertyValue(value.to_owned())),
        })
    }
}

impl From<IdnaStatus> for u8
{
    #[inline]
    fn from(value: IdnaStatus) -> Self
    {
        value as u8
    }
}
