//! Ticker symbol to company-name resolution.
//!
//! The directory is an explicit, read-only dependency injected into the
//! coordinator rather than process-wide static data, so the coordinator stays
//! testable in isolation. A bundled S&P 500 subset is available via
//! [`SymbolDirectory::sp500`] for callers that do not bring their own table.

use crate::Result;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static SP500: Lazy<SymbolDirectory> = Lazy::new(|| {
    let names: HashMap<String, String> = serde_json::from_str(include_str!("../data/sp500.json"))
        .expect("bundled symbol table is valid JSON");
    SymbolDirectory::new(names)
});

/// Read-only lookup table from ticker symbol to human-readable company name.
#[derive(Debug, Clone, Default)]
pub struct SymbolDirectory {
    names: HashMap<String, String>,
}

impl SymbolDirectory {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    /// Parses a directory from a JSON object of `{ "SYMBOL": "Company Name" }`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let names: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self::new(names))
    }

    /// The bundled S&P 500 subset.
    pub fn sp500() -> &'static SymbolDirectory {
        &SP500
    }

    pub fn name_of(&self, symbol: &str) -> Option<&str> {
        self.names
            .get(&symbol.trim().to_uppercase())
            .map(String::as_str)
    }

    /// Resolves a comma-separated symbol string to a comma-separated string
    /// of company names. Lookup is case-insensitive; symbols with no entry
    /// are silently dropped, so the result may be empty.
    pub fn resolve_names(&self, symbols: &str) -> String {
        symbols
            .split(',')
            .map(|symbol| symbol.trim().to_uppercase())
            .filter(|symbol| !symbol.is_empty())
            .filter_map(|symbol| self.names.get(&symbol))
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> SymbolDirectory {
        SymbolDirectory::new(HashMap::from([
            ("AAPL".to_string(), "Apple Inc.".to_string()),
            ("MSFT".to_string(), "Microsoft Corp.".to_string()),
            ("DAL".to_string(), "Delta Air Lines, Inc.".to_string()),
        ]))
    }

    #[test]
    fn resolves_case_insensitive_with_whitespace() {
        let names = directory().resolve_names(" aapl , MsFt ");
        assert_eq!(names, "Apple Inc., Microsoft Corp.");
    }

    #[test]
    fn drops_unresolved_symbols_silently() {
        let names = directory().resolve_names("AAPL,ZZZZ,DAL");
        assert_eq!(names, "Apple Inc., Delta Air Lines, Inc.");
    }

    #[test]
    fn all_unresolved_yields_empty_string() {
        assert_eq!(directory().resolve_names("FOO,BAR"), "");
        assert_eq!(directory().resolve_names(""), "");
    }

    #[test]
    fn bundled_directory_loads() {
        let sp500 = SymbolDirectory::sp500();
        assert!(!sp500.is_empty());
        assert_eq!(sp500.name_of("aapl"), Some("Apple Inc."));
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        assert!(SymbolDirectory::from_json_str("not json").is_err());
    }
}
