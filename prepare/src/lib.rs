//! сборка компактных таблиц свойств Unicode: индекс блоков + общий массив значений,
//! записи индекса - упакованные модификаторы (позиция, маска, сдвиг, длина)

pub mod addenda;
pub mod composition;
pub mod config;
pub mod dataset;
pub mod encode;
pub mod error;
pub mod output;
pub mod search;
pub mod settings;
pub mod tables;

pub use addenda::{Addenda, Addendum, FieldKind, Modifier};
pub use composition::{magic_key, CanonicalComposition};
pub use config::{Config, TableConfig};
pub use dataset::{Dataset, TableStorage};
pub use error::{Result, TableError};
pub use settings::Settings;
pub use tables::{CompiledTable, IntegerWidth, TablePairs, TypedBuffer};
