//! общие настройки запуска: задаются один раз, дальше передаются явно

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::error::{Result, TableError};

static SETTINGS: OnceLock<Settings> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings
{
    /// каталог с файлами UCD
    pub data_dir: PathBuf,
    /// каталог для сгенерированных таблиц
    pub output_dir: PathBuf,
    pub unicode_version: String,
}

impl Settings
{
    /// путь к сгенерированному файлу таблицы
    pub fn output_file(&self, table: &str) -> PathBuf
    {
        self.output_dir.join(format!("{}.rs.txt", table))
    }
}

/// задать настройки; повторный вызов - ошибка, даже с теми же значениями
pub fn init(settings: Settings) -> Result<&'static Settings>
{
    let mut fresh = false;

    let stored = SETTINGS.get_or_init(|| {
        fresh = true;
        settings
    });

    match fresh {
        true => Ok(stored),
        false => Err(TableError::AlreadyInitialized),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn init_once()
    {
        let settings = Settings {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("out"),
            unicode_version: "15.1.0".to_owned(),
        };

        let stored = init(settings.clone()).unwrap();

        assert_eq!(stored, &settings);
        assert_eq!(init(settings), Err(TableError::AlreadyInitialized));

        assert_eq!(stored.output_file("ccc"), PathBuf::from("out/ccc.rs.txt"));
    }
}
