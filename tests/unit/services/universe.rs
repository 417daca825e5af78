//! Unit tests for universe sources

use stagescan::services::{
    normalize_symbol, normalize_symbols, FileUniverse, StaticUniverse, UniverseProvider,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn universe_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_normalize_symbol() {
    assert_eq!(normalize_symbol("BRK.B"), "BRK-B");
    assert_eq!(normalize_symbol("  msft "), "MSFT");
    assert_eq!(normalize_symbol("BF.B"), "BF-B");
}

#[test]
fn test_normalize_symbols_dedups_in_order() {
    let symbols = normalize_symbols(["aapl", "BRK.B", "", "AAPL", "brk-b", "MSFT"]);
    assert_eq!(symbols, vec!["AAPL", "BRK-B", "MSFT"]);
}

#[test]
fn test_static_universe() {
    let universe = StaticUniverse::new(vec!["spy", "qqq"]);
    let symbols = tokio_test::block_on(universe.symbols()).unwrap();
    assert_eq!(symbols, vec!["SPY", "QQQ"]);
}

#[test]
fn test_file_with_symbol_header() {
    let file = universe_file("Security,Symbol,Sector\nApple,AAPL,Tech\nBerkshire,BRK.B,Financials\n");
    let symbols = FileUniverse::new(file.path()).read_symbols().unwrap();
    assert_eq!(symbols, vec!["AAPL", "BRK-B"]);
}

#[test]
fn test_file_without_header_uses_first_column() {
    let file = universe_file("aapl\nmsft,extra\n\nnvda\n");
    let symbols = FileUniverse::new(file.path()).read_symbols().unwrap();
    assert_eq!(symbols, vec!["AAPL", "MSFT", "NVDA"]);
}

#[test]
fn test_empty_file() {
    let file = universe_file("");
    let symbols = FileUniverse::new(file.path()).read_symbols().unwrap();
    assert!(symbols.is_empty());
}

#[tokio::test]
async fn test_missing_file_is_an_error() {
    let universe = FileUniverse::new("/nonexistent/universe.csv");
    assert!(universe.symbols().await.is_err());
}
