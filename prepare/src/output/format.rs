/// числа массива через запятую, построчно: строка без отступа не длиннее line_width
pub fn format_num_vec(input: &[u64], line_width: usize) -> String
{
    let mut lines: Vec<String> = vec![];

    for item in input.iter().map(|&number| literal(number)) {
        match lines.last_mut() {
            Some(line) if line.len() + item.len() <= line_width => line.push_str(&item),
            _ => lines.push(item),
        }
    }

    let mut output: String = lines.iter().map(|line| format!("\n    {}", line)).collect();
    output.push('\n');

    output
}

/// элемент массива; ноль - без префикса
fn literal(number: u64) -> String
{
    match number {
        0 => "0, ".to_owned(),
        _ => format!("0x{:X}, ", number),
    }
}

/// название константы: ccc -> CCC, nfd-expansions -> NFD_EXPANSIONS
pub fn const_name(name: &str) -> String
{
    name.chars()
        .map(|c| match c.is_ascii_alphanumeric() {
            true => c.to_ascii_uppercase(),
            false => '_',
        })
        .collect()
}

/// название функции: CCC -> ccc
pub fn fn_name(name: &str) -> String
{
    const_name(name).to_ascii_lowercase()
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn numbers()
    {
        assert_eq!(format_num_vec(&[0, 0x1F, 0xE6], 120), "\n    0, 0x1F, 0xE6, \n");
        assert_eq!(format_num_vec(&[1, 2, 3], 10), "\n    0x1, 0x2, \n    0x3, \n");
        assert_eq!(format_num_vec(&[], 120), "\n");

        // слишком длинный элемент занимает строку целиком
        assert_eq!(format_num_vec(&[u64::MAX, 0], 8), "\n    0xFFFFFFFFFFFFFFFF, \n    0, \n");
    }

    #[test]
    fn names()
    {
        assert_eq!(const_name("nfd-expansions"), "NFD_EXPANSIONS");
        assert_eq!(fn_name("IDNA"), "idna");
    }
}
