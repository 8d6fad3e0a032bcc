//! Locale and currency registry
//!
//! Thin collaborators around the engine: per-locale symbol tables and
//! default patterns, and per-currency display metadata. The data is embedded
//! TOML, parsed once into a process-wide registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::types::DecimalSymbols;

/// Error type for registry data loading
#[derive(Debug, Clone, PartialEq)]
pub enum LocaleError {
    /// The specified locale was not found
    NotFound(String),
    /// An error occurred while parsing the embedded data
    ParseError(String),
}

impl fmt::Display for LocaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleError::NotFound(locale) => write!(f, "Locale not found: {}", locale),
            LocaleError::ParseError(msg) => write!(f, "Error parsing locale data: {}", msg),
        }
    }
}

impl std::error::Error for LocaleError {}

type Result<T> = std::result::Result<T, LocaleError>;

/// Display metadata for one currency
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyInfo {
    pub symbol: String,
    /// Conventional count of fraction digits for amounts in this currency
    pub fraction_digits: u32,
}

#[derive(Debug, Clone)]
struct LocaleEntry {
    symbols: DecimalSymbols,
    decimal_pattern: String,
    currency_pattern: String,
    percent_pattern: String,
}

impl Default for LocaleEntry {
    fn default() -> Self {
        LocaleEntry {
            symbols: DecimalSymbols::default(),
            decimal_pattern: "#,##0.###".to_string(),
            currency_pattern: "¤#,##0.00".to_string(),
            percent_pattern: "#,##0%".to_string(),
        }
    }
}

struct LocaleRegistry {
    locales: HashMap<String, LocaleEntry>,
    currencies: HashMap<String, CurrencyInfo>,
}

static LOCALE_REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    fn new() -> Self {
        let mut registry = LocaleRegistry {
            locales: HashMap::new(),
            currencies: HashMap::new(),
        };
        if let Err(e) = registry.load_embedded_data() {
            // Keep going with whatever loaded; lookups just come back empty.
            eprintln!("Failed to load embedded locale data: {}", e);
        }
        registry
    }

    fn load_embedded_data(&mut self) -> Result<()> {
        let symbols_toml = include_str!("locale/symbols.toml");
        self.parse_locales(symbols_toml)?;
        let currencies_toml = include_str!("locale/currencies.toml");
        self.parse_currencies(currencies_toml)?;
        Ok(())
    }

    fn parse_locales(&mut self, toml_str: &str) -> Result<()> {
        let parsed: toml::Value =
            toml::from_str(toml_str).map_err(|e| LocaleError::ParseError(e.to_string()))?;
        let table = parsed
            .as_table()
            .ok_or_else(|| LocaleError::ParseError("Root is not a table".to_string()))?;

        let mut base = LocaleEntry::default();
        if let Some(value) = table.get("base") {
            apply_overlay(&mut base, value)?;
        }

        for (locale_id, value) in table {
            if locale_id == "base" {
                continue;
            }
            let mut entry = base.clone();
            apply_overlay(&mut entry, value)?;
            self.locales.insert(locale_id.to_string(), entry);
        }
        Ok(())
    }

    fn parse_currencies(&mut self, toml_str: &str) -> Result<()> {
        let parsed: toml::Value =
            toml::from_str(toml_str).map_err(|e| LocaleError::ParseError(e.to_string()))?;
        let table = parsed
            .as_table()
            .ok_or_else(|| LocaleError::ParseError("Root is not a table".to_string()))?;
        for (code, value) in table {
            let entry = value
                .as_table()
                .ok_or_else(|| LocaleError::ParseError(format!("{} is not a table", code)))?;
            let symbol = entry
                .get("symbol")
                .and_then(|v| v.as_str())
                .ok_or_else(|| {
                    LocaleError::ParseError(format!("Missing or invalid symbol in {}", code))
                })?;
            let fraction_digits = entry
                .get("fraction_digits")
                .and_then(|v| v.as_integer())
                .unwrap_or(2);
            self.currencies.insert(
                code.to_string(),
                CurrencyInfo {
                    symbol: symbol.to_string(),
                    fraction_digits: fraction_digits.clamp(0, 9) as u32,
                },
            );
        }
        Ok(())
    }

    fn get() -> &'static Self {
        LOCALE_REGISTRY.get_or_init(Self::new)
    }
}

/// Apply one locale's overlay table onto an entry
fn apply_overlay(entry: &mut LocaleEntry, value: &toml::Value) -> Result<()> {
    let table = value
        .as_table()
        .ok_or_else(|| LocaleError::ParseError("Locale entry is not a table".to_string()))?;

    let mut set_char = |key: &str, slot: &mut char| {
        if let Some(s) = table.get(key).and_then(|v| v.as_str()) {
            if let Some(c) = s.chars().next() {
                *slot = c;
            }
        }
    };
    set_char("decimal", &mut entry.symbols.decimal_separator);
    set_char("group", &mut entry.symbols.grouping_separator);
    set_char("monetary_decimal", &mut entry.symbols.monetary_decimal_separator);
    set_char("monetary_group", &mut entry.symbols.monetary_grouping_separator);
    set_char("pattern_separator", &mut entry.symbols.pattern_separator);
    set_char("percent", &mut entry.symbols.percent);
    set_char("per_mille", &mut entry.symbols.per_mille);
    set_char("zero_digit", &mut entry.symbols.zero_digit);
    set_char("digit", &mut entry.symbols.digit);
    set_char("minus", &mut entry.symbols.minus_sign);
    set_char("plus", &mut entry.symbols.plus_sign);
    set_char("pad_escape", &mut entry.symbols.pad_escape);

    let mut set_string = |key: &str, slot: &mut String| {
        if let Some(s) = table.get(key).and_then(|v| v.as_str()) {
            *slot = s.to_string();
        }
    };
    set_string("exponent", &mut entry.symbols.exponent_separator);
    set_string("infinity", &mut entry.symbols.infinity);
    set_string("nan", &mut entry.symbols.nan);
    set_string("currency", &mut entry.symbols.currency_symbol);
    set_string("intl_currency", &mut entry.symbols.international_currency_symbol);
    set_string("decimal_pattern", &mut entry.decimal_pattern);
    set_string("currency_pattern", &mut entry.currency_pattern);
    set_string("percent_pattern", &mut entry.percent_pattern);

    Ok(())
}

/// Symbol table for a locale identifier such as `en_US` or `de_DE`
pub fn symbols_for(locale_id: &str) -> Option<DecimalSymbols> {
    LocaleRegistry::get()
        .locales
        .get(locale_id)
        .map(|e| e.symbols.clone())
}

/// Default decimal pattern for a locale
pub fn decimal_pattern_for(locale_id: &str) -> Option<String> {
    LocaleRegistry::get()
        .locales
        .get(locale_id)
        .map(|e| e.decimal_pattern.clone())
}

/// Default currency pattern for a locale
pub fn currency_pattern_for(locale_id: &str) -> Option<String> {
    LocaleRegistry::get()
        .locales
        .get(locale_id)
        .map(|e| e.currency_pattern.clone())
}

/// Default percent pattern for a locale
pub fn percent_pattern_for(locale_id: &str) -> Option<String> {
    LocaleRegistry::get()
        .locales
        .get(locale_id)
        .map(|e| e.percent_pattern.clone())
}

/// Display metadata for an ISO currency code
pub fn currency_info(code: &str) -> Option<CurrencyInfo> {
    LocaleRegistry::get().currencies.get(code).cloned()
}

/// All registered locale identifiers
pub fn available_locales() -> Vec<String> {
    LocaleRegistry::get().locales.keys().cloned().collect()
}
