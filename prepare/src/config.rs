use std::path::Path;

use serde::Deserialize;
use unicode_tables_source::PropertyKind;

use crate::addenda::{Addenda, Addendum, FieldKind};
use crate::error::{Result, TableError};
use crate::tables::IntegerWidth;

/// наибольший размер блока: 1 << 20 кодпоинтов - больше кодового пространства не бывает
pub const MAX_CHUNK_SHIFT: u32 = 20;

/// конфигурация набора таблиц (tables.toml)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config
{
    /// версия Unicode, для которой собираются таблицы (пишется в заголовок результата)
    pub unicode_version: String,
    #[serde(rename = "table")]
    pub tables: Vec<TableConfig>,
}

impl Config
{
    pub fn from_toml(source: &str) -> Result<Self>
    {
        let config: Self = toml::from_str(source).map_err(|e| TableError::Config(e.to_string()))?;

        for table in config.tables.iter() {
            table.validate()?;
        }

        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self>
    {
        let source = std::fs::read_to_string(path)
            .map_err(|e| TableError::Config(format!("{}: {}", path.display(), e)))?;

        Self::from_toml(&source)
    }

    pub fn table(&self, name: &str) -> Option<&TableConfig>
    {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// поле записи индекса
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig
{
    pub kind: FieldKind,
    pub bits: u32,
    #[serde(default)]
    pub min: Option<u64>,
    #[serde(default)]
    pub max: Option<u64>,
    /// ожидаемое смещение поля, если его нужно зафиксировать
    #[serde(default)]
    pub placement: Option<u32>,
}

impl FieldConfig
{
    pub fn new(kind: FieldKind, bits: u32) -> Self
    {
        Self {
            kind,
            bits,
            min: None,
            max: None,
            placement: None,
        }
    }

    fn addendum(&self) -> Addendum
    {
        let mut addendum = match self.kind {
            FieldKind::Position => Addendum::position(self.bits),
            FieldKind::Mask => Addendum::mask(self.bits),
            FieldKind::Shift => Addendum::shift(self.bits),
            FieldKind::MaxLength => Addendum::max_length(self.bits),
        };

        if self.min.is_some() || self.max.is_some() {
            addendum = addendum.with_range(
                self.min.unwrap_or(addendum.min),
                self.max.unwrap_or(addendum.max),
            );
        }

        match self.placement {
            Some(offset) => addendum.at(offset),
            None => addendum,
        }
    }
}

/// настройки сборки одной таблицы
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig
{
    /// название таблицы, из него же получается имя файла
    pub name: String,
    pub property: PropertyKind,
    /// размер блока - 1 << chunk_shift
    pub chunk_shift: u32,
    pub index_width: IntegerWidth,
    pub values_width: IntegerWidth,
    /// оценка сверху количества записей индекса
    pub index_capacity: usize,
    /// оценка сверху количества значений
    pub values_capacity: usize,
    /// поля записи индекса, от старших битов к младшим
    pub fields: Vec<FieldConfig>,
}

impl TableConfig
{
    /// размер блока должен быть степенью двойки >= 2
    pub fn validate(&self) -> Result<()>
    {
        if self.chunk_shift == 0 || self.chunk_shift > MAX_CHUNK_SHIFT {
            return Err(TableError::InvalidChunkSize(self.chunk_shift));
        }

        self.addenda().map(|_| ())
    }

    #[inline]
    pub fn chunk_size(&self) -> u32
    {
        1 << self.chunk_shift
    }

    #[inline]
    pub fn chunk_mask(&self) -> u64
    {
        self.chunk_size() as u64 - 1
    }

    /// раскладка записи индекса
    pub fn addenda(&self) -> Result<Addenda>
    {
        Addenda::new(
            self.index_width,
            self.fields.iter().map(FieldConfig::addendum).collect(),
        )
    }
}
