mod buffer;
mod compiled;
mod pairs;

pub use buffer::{IntegerWidth, TypedBuffer};
pub use compiled::{CompiledTable, TableStats};
pub use pairs::TablePairs;

/// получить кодпоинт по содержащему его блоку и смещению
#[macro_export]
macro_rules! code_for {
    ($chunk: expr, $shift: expr, $offset: expr) => {
        ($chunk << $shift) + $offset
    };
}

/// индекс блока для кодпоинта
#[macro_export]
macro_rules! chunk_for {
    ($code: expr, $shift: expr) => {
        $code >> $shift
    };
}
