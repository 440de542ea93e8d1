use std::collections::HashMap;

/// дополнительная таблица для последовательностей кодпоинтов, не помещающихся в значение
///
/// одинаковые последовательности записываются один раз
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansions
{
    data: Vec<u32>,
    positions: HashMap<Vec<u32>, usize>,
}

impl Expansions
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// записать последовательность, вернуть ее позицию в таблице
    pub fn insert(&mut self, sequence: &[u32]) -> usize
    {
        if let Some(&position) = self.positions.get(sequence) {
            return position;
        }

        let position = self.data.len();

        self.data.extend_from_slice(sequence);
        self.positions.insert(sequence.to_vec(), position);

        position
    }

    /// последовательность по позиции и длине
    pub fn get(&self, position: usize, length: usize) -> Option<&[u32]>
    {
        self.data.get(position .. position + length)
    }

    pub fn data(&self) -> &[u32]
    {
        &self.data
    }

    pub fn len(&self) -> usize
    {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn deduplicated()
    {
        let mut expansions = Expansions::new();

        assert_eq!(expansions.insert(&[0x66, 0x69]), 0);
        assert_eq!(expansions.insert(&[0x20, 0x308]), 2);
        assert_eq!(expansions.insert(&[0x66, 0x69]), 0);
        assert_eq!(expansions.len(), 4);
        assert_eq!(expansions.get(2, 2), Some(&[0x20, 0x308][..]));
        assert_eq!(expansions.get(3, 2), None);
    }
}
