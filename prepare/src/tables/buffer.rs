use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Result, TableError};

/// разрядность элементов таблицы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegerWidth
{
    U8,
    U16,
    U32,
    U64,
}

impl IntegerWidth
{
    #[inline]
    pub fn bits(&self) -> u32
    {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
            Self::U32 => 32,
            Self::U64 => 64,
        }
    }

    #[inline]
    pub fn bytes(&self) -> usize
    {
        self.bits() as usize / 8
    }

    #[inline]
    pub fn max_value(&self) -> u64
    {
        u64::MAX >> (64 - self.bits())
    }

    #[inline]
    pub fn fits(&self, value: u64) -> bool
    {
        value <= self.max_value()
    }

    /// название типа в сгенерированном коде
    pub fn name(&self) -> &'static str
    {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
        }
    }
}

impl FromStr for IntegerWidth
{
    type Err = TableError;

    fn from_str(value: &str) -> Result<Self>
    {
        Ok(match value {
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            _ => return Err(TableError::UnknownIntegerWidth(value.to_owned())),
        })
    }
}

impl core::fmt::Display for IntegerWidth
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result
    {
        f.write_str(self.name())
    }
}

/// хранилище буфера - вектор элементов выбранной разрядности
#[derive(Debug, Clone, PartialEq, Eq)]
enum Storage
{
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
}

macro_rules! storage {
    ($storage: expr, $vec: ident => $expr: expr) => {
        match $storage {
            Storage::U8($vec) => $expr,
            Storage::U16($vec) => $expr,
            Storage::U32($vec) => $expr,
            Storage::U64($vec) => $expr,
        }
    };
}

/// буфер целых чисел фиксированной разрядности и фиксированной емкости
///
/// используется как для индекса, так и для значений таблицы. порядок добавления элементов
/// и есть их индекс. емкость - заранее сделанная оценка сверху, буфер никогда не расширяется:
/// выход за ее пределы - ошибка оценки, а не данных
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedBuffer
{
    width: IntegerWidth,
    capacity: usize,
    storage: Storage,
}

impl TypedBuffer
{
    pub fn new(width: IntegerWidth, capacity: usize) -> Self
    {
        let storage = match width {
            IntegerWidth::U8 => Storage::U8(Vec::with_capacity(capacity)),
            IntegerWidth::U16 => Storage::U16(Vec::with_capacity(capacity)),
            IntegerWidth::U32 => Storage::U32(Vec::with_capacity(capacity)),
            IntegerWidth::U64 => Storage::U64(Vec::with_capacity(capacity)),
        };

        Self {
            width,
            capacity,
            storage,
        }
    }

    /// записать значение в следующую ячейку, возвращает новую длину буфера
    pub fn append(&mut self, value: u64) -> Result<usize>
    {
        if self.len() >= self.capacity {
            return Err(TableError::CapacityExceeded {
                capacity: self.capacity,
                width: self.width.name(),
            });
        }

        if !self.width.fits(value) {
            return Err(TableError::ValueOverflow {
                value,
                width: self.width.name(),
            });
        }

        match &mut self.storage {
            Storage::U8(vec) => vec.push(value as u8),
            Storage::U16(vec) => vec.push(value as u16),
            Storage::U32(vec) => vec.push(value as u32),
            Storage::U64(vec) => vec.push(value),
        }

        Ok(self.len())
    }

    /// записать несколько значений подряд
    pub fn extend(&mut self, values: &[u64]) -> Result<usize>
    {
        for &value in values {
            self.append(value)?;
        }

        Ok(self.len())
    }

    #[inline]
    pub fn at(&self, index: usize) -> Option<u64>
    {
        storage!(&self.storage, vec => vec.get(index).map(|&v| v as u64))
    }

    #[inline]
    pub fn len(&self) -> usize
    {
        storage!(&self.storage, vec => vec.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool
    {
        self.len() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize
    {
        self.capacity
    }

    #[inline]
    pub fn width(&self) -> IntegerWidth
    {
        self.width
    }

    /// записанные значения, [0, len)
    pub fn result(&self) -> Vec<u64>
    {
        storage!(&self.storage, vec => vec.iter().map(|&v| v as u64).collect())
    }

    /// размер записанных данных в байтах
    pub fn size(&self) -> usize
    {
        self.len() * self.width.bytes()
    }

    /// отрезать хвост - используется только при обрезке таблицы по последнему значимому блоку
    pub(crate) fn truncate(&mut self, len: usize)
    {
        storage!(&mut self.storage, vec => vec.truncate(len))
    }
}
