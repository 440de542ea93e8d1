use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use unicode_tables_prepare::composition::CanonicalComposition;
use unicode_tables_prepare::config::Config;
use unicode_tables_prepare::encode::{encode_property, Sources};
use unicode_tables_prepare::output::{
    log_stats, render_composition, render_expansions, render_header, render_table,
};
use unicode_tables_prepare::settings::{self, Settings};
use unicode_tables_prepare::tables::TablePairs;
use unicode_tables_source::hangul::is_hangul_syllable;
use unicode_tables_source::{idna, PropertyKind, Unicode};

/// файл с таблицей композиций
const COMPOSITION_TABLE: &str = "composition";

#[derive(Parser, Debug)]
#[command(name = "unicode-tables-prepare")]
#[command(about = "Compiles Unicode property tables into compact Rust sources")]
struct Args
{
    /// настройки таблиц
    #[arg(long, default_value = "tables.toml")]
    config: PathBuf,

    /// каталог с UnicodeData.txt, CompositionExclusions.txt и IdnaMappingTable.txt
    #[arg(long, default_value = "./../data/ucd")]
    data: PathBuf,

    /// куда писать сгенерированные таблицы
    #[arg(long, default_value = "./../data")]
    output: PathBuf,

    /// собрать только эту таблицу
    #[arg(long)]
    table: Option<String>,
}

fn main() -> anyhow::Result<()>
{
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "unicode_tables_prepare=info".into()),
        )
        .init();

    let args = Args::parse();

    let config = Config::load(&args.config)
        .with_context(|| format!("reading {}", args.config.display()))?;

    let settings = settings::init(Settings {
        data_dir: args.data,
        output_dir: args.output,
        unicode_version: config.unicode_version.clone(),
    })?;

    let tables: Vec<_> = match &args.table {
        Some(name) => match config.table(name) {
            Some(table) => vec![table],
            None => bail!("no table \"{}\" in {}", name, args.config.display()),
        },
        None => config.tables.iter().collect(),
    };

    let unicode = Unicode::load(&settings.data_dir)
        .with_context(|| format!("loading UCD from {}", settings.data_dir.display()))?;

    let idna = match tables.iter().any(|t| t.property == PropertyKind::IdnaMapping) {
        true => idna::load(&settings.data_dir).context("loading IDNA mapping table")?,
        false => vec![],
    };

    let composition = CanonicalComposition::from_unicode(&unicode, is_hangul_syllable)
        .context("building the composition table")?;

    tracing::info!(
        unicode = %settings.unicode_version,
        tables = tables.len(),
        compositions = composition.len(),
        "sources loaded"
    );

    let sources = Sources {
        unicode: &unicode,
        idna: &idna,
        composition: &composition,
        is_hangul: is_hangul_syllable,
    };

    fs::create_dir_all(&settings.output_dir)
        .with_context(|| format!("creating {}", settings.output_dir.display()))?;

    for config in tables {
        let encoded = encode_property(config.property, &sources)
            .with_context(|| format!("encoding {}", config.property))?;

        let table = TablePairs::compile(&encoded.dataset, config)
            .with_context(|| format!("compiling table {}", config.name))?;

        table
            .verify(&encoded.dataset)
            .with_context(|| format!("verifying table {}", config.name))?;

        let mut source = render_header(&settings.unicode_version);
        source.push_str(&render_table(&table));

        if !encoded.expansions.is_empty() {
            source.push_str(&render_expansions(&config.name, &encoded.expansions));
        }

        write(settings, &config.name, &source)?;
        log_stats(&table, encoded.expansions.len());
    }

    if args.table.is_none() {
        let mut source = render_header(&settings.unicode_version);
        source.push_str(&render_composition(&composition));

        write(settings, COMPOSITION_TABLE, &source)?;
    }

    Ok(())
}

/// записать сгенерированный файл таблицы
fn write(settings: &Settings, table: &str, source: &str) -> anyhow::Result<()>
{
    let path = settings.output_file(table);

    fs::write(&path, source).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "written");

    Ok(())
}
