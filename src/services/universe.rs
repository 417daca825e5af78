//! Instrument universe sources.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::services::error::ProviderError;
use crate::services::market_data::UniverseProvider;

const SYMBOL_HEADERS: [&str; 2] = ["symbol", "ticker"];

/// Map exchange-style class suffixes to the data provider's (`BRK.B` -> `BRK-B`).
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_ascii_uppercase().replace('.', "-")
}

/// Normalize, drop blanks and de-duplicate while keeping first-seen order.
pub fn normalize_symbols<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|s| normalize_symbol(s.as_ref()))
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// A fixed list of symbols, e.g. from `SCREENER_SYMBOLS`.
#[derive(Debug, Clone)]
pub struct StaticUniverse {
    symbols: Vec<String>,
}

impl StaticUniverse {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            symbols: normalize_symbols(symbols),
        }
    }
}

#[async_trait]
impl UniverseProvider for StaticUniverse {
    async fn symbols(&self) -> Result<Vec<String>, ProviderError> {
        Ok(self.symbols.clone())
    }
}

/// Symbols read from a CSV file.
///
/// Uses the `Symbol`/`Ticker` column when the first row names one, otherwise
/// the first column of every row.
#[derive(Debug, Clone)]
pub struct FileUniverse {
    path: PathBuf,
}

impl FileUniverse {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn read_symbols(&self) -> Result<Vec<String>, ProviderError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let mut records = reader.records();
        let first = match records.next() {
            Some(record) => record?,
            None => return Ok(Vec::new()),
        };

        let header_column = first
            .iter()
            .position(|field| SYMBOL_HEADERS.contains(&field.to_ascii_lowercase().as_str()));
        let column = header_column.unwrap_or(0);

        let mut raw = Vec::new();
        if header_column.is_none() {
            raw.extend(first.get(column).map(str::to_string));
        }
        for record in records {
            let record = record?;
            raw.extend(record.get(column).map(str::to_string));
        }

        Ok(normalize_symbols(raw))
    }
}

#[async_trait]
impl UniverseProvider for FileUniverse {
    async fn symbols(&self) -> Result<Vec<String>, ProviderError> {
        let universe = self.clone();
        tokio::task::spawn_blocking(move || universe.read_symbols())
            .await
            .map_err(|e| ProviderError::Io(std::io::Error::other(e.to_string())))?
    }
}
