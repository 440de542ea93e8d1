//! собранные таблицы в виде исходного кода на Rust

use std::fmt::Write;

use indoc::writedoc;

use crate::addenda::FieldKind;
use crate::composition::{CanonicalComposition, COMPOSED_BITS};
use crate::encode::Expansions;
use crate::tables::{CompiledTable, IntegerWidth};

pub use self::format::{const_name, fn_name, format_num_vec};
pub use self::stats::log_stats;

mod format;
mod stats;

/// длина строки в файле с подготовленными данными
pub const FORMAT_STRING_LENGTH: usize = 120;

/// заголовок файла
pub fn render_header(unicode_version: &str) -> String
{
    let mut output = String::new();

    _ = writedoc!(
        output,
        "
        // таблицы свойств Unicode {}
        // файл сгенерирован, не редактируйте его вручную

        ",
        unicode_version,
    );

    output
}

/// таблица: индекс, значения, раскладка записи индекса и функция чтения значения
pub fn render_table(table: &CompiledTable) -> String
{
    let name = const_name(&table.name);
    let result = table.index_width.max(table.values_width);
    let mut output = String::new();

    _ = writedoc!(
        output,
        "
        // {name}: блок - {chunk} кодпоинтов, {index} записей индекса, {values} значений, {bytes} байт
        //
        // запись индекса ({index_width}):
        ",
        name = table.name,
        chunk = 1u32 << table.chunk_shift,
        index = table.index.len(),
        values = table.values.len(),
        bytes = table.stats.total_bytes(),
        index_width = table.index_width,
    );

    for field in table.layout() {
        _ = writeln!(
            output,
            "//   {:<10} биты {:>2} ..= {:>2}",
            field.kind,
            field.offset,
            field.offset + field.bits - 1
        );
    }

    _ = writedoc!(
        output,
        "
        //
        // значение: {NAME}_VALUES[position + (code & chunk_mask & mask)] + shift
        // за границей {NAME}_BOUNDARY записей индекса нет, значение - {NAME}_DEFAULT

        pub const {NAME}_CHUNK_SHIFT: u32 = {shift};
        pub const {NAME}_BOUNDARY: u32 = 0x{boundary:X};
        pub const {NAME}_DEFAULT: {result} = {default};

        pub static {NAME}_INDEX: [{index_width}; {index_len}] = [{index}];

        pub static {NAME}_VALUES: [{values_width}; {values_len}] = [{values}];

        ",
        NAME = name,
        shift = table.chunk_shift,
        boundary = table.boundary,
        result = result,
        default = table.default,
        index_width = table.index_width,
        index_len = table.index.len(),
        index = format_num_vec(table.index(), FORMAT_STRING_LENGTH),
        values_width = table.values_width,
        values_len = table.values.len(),
        values = format_num_vec(table.values(), FORMAT_STRING_LENGTH),
    );

    render_lookup(&mut output, table, &name, result);

    output
}

/// функция чтения значения из таблицы
fn render_lookup(output: &mut String, table: &CompiledTable, name: &str, result: IntegerWidth)
{
    let field = |kind: FieldKind| table.layout().into_iter().find(|f| f.kind == kind);
    let extract = |offset: u32, bits: u32| {
        format!("(entry >> {}) & 0x{:X}", offset, u64::MAX >> (64 - bits))
    };

    _ = writedoc!(
        output,
        "
        /// значение свойства {table_name} для кодпоинта
        #[inline]
        pub fn {fn_name}(code: u32) -> {result}
        {{
            let chunk = (code >> {NAME}_CHUNK_SHIFT) as usize;

            if chunk >= {NAME}_INDEX.len() {{
                return {NAME}_DEFAULT;
            }}

            let entry = {NAME}_INDEX[chunk] as u64;
        ",
        table_name = table.name,
        fn_name = fn_name(&table.name),
        result = result,
        NAME = name,
    );

    let chunk_mask = table.chunk_mask();

    if let Some(position) = field(FieldKind::Position) {
        _ = writeln!(
            output,
            "    let position = ({}) as usize;",
            extract(position.offset, position.bits)
        );
    }

    let slot = match field(FieldKind::Mask) {
        Some(mask) => format!(
            "(code as u64) & 0x{:X} & ({})",
            chunk_mask,
            extract(mask.offset, mask.bits)
        ),
        None => format!("(code as u64) & 0x{:X}", chunk_mask),
    };

    let shift = match field(FieldKind::Shift) {
        Some(shift) => extract(shift.offset, shift.bits),
        None => "0".to_owned(),
    };

    _ = writeln!(output, "    let slot = {};", slot);
    _ = writeln!(output, "    let shift = {};", shift);

    if let Some(max_length) = field(FieldKind::MaxLength) {
        _ = writeln!(output);
        _ = writeln!(
            output,
            "    if slot >= {} {{",
            extract(max_length.offset, max_length.bits)
        );
        _ = writeln!(output, "        return shift as {};", result);
        _ = writeln!(output, "    }}");
    }

    _ = writedoc!(
        output,
        "

            ({NAME}_VALUES[position + slot as usize] as u64 + shift) as {result}
        }}

        ",
        NAME = name,
        result = result,
    );
}

/// таблица композиций: отсортированные по ключу записи key << 21 | composed
pub fn render_composition(composition: &CanonicalComposition) -> String
{
    let baked = composition.baked();
    let mut output = String::new();

    _ = writedoc!(
        output,
        "
        // композиции: ключ пары (first + (first >> 2)) * second, сдвинутый на {bits} бит, | результат
        // записи отсортированы по ключу

        pub const COMPOSED_BITS: u32 = {bits};

        pub static COMPOSITIONS: [u64; {len}] = [{data}];

        ",
        bits = COMPOSED_BITS,
        len = baked.len(),
        data = format_num_vec(&baked, FORMAT_STRING_LENGTH),
    );

    output
}

/// таблица расширений
pub fn render_expansions(name: &str, expansions: &Expansions) -> String
{
    let data: Vec<u64> = expansions.data().iter().map(|&c| c as u64).collect();
    let mut output = String::new();

    _ = writedoc!(
        output,
        "
        pub static {NAME}_EXPANSIONS: [u32; {len}] = [{data}];

        ",
        NAME = const_name(name),
        len = data.len(),
        data = format_num_vec(&data, FORMAT_STRING_LENGTH),
    );

    output
}
