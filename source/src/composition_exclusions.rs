use std::collections::BTreeSet;

use crate::properties::{parse_code, PropertiesError};

/// разбор CompositionExclusions.txt из UCD
/// исключения композиции не могут быть вычислены, этот список составляется консорциумом Unicode в ручном режиме
pub fn composition_exclusions(data: &str) -> Result<BTreeSet<u32>, PropertiesError>
{
    let mut exclusions = BTreeSet::new();

    for line in data.lines() {
        let line = match line.split_once('#') {
            Some((line, _)) => line,
            None => line,
        };

        if line.trim().is_empty() {
            continue;
        }

        exclusions.insert(parse_code(line)?);
    }

    tracing::debug!(count = exclusions.len(), "parsed composition exclusions");

    Ok(exclusions)
}
