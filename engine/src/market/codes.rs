//! Market code normalization
//!
//! Accepts canonical 3-letter codes, free-text aliases (city names, airport
//! codes), and as a last resort tests the first and last 3 letters of the
//! cleaned input against both tables. Anything else is
//! [`MarketError::UnknownMarket`] - never a guessed market.

use crate::market::directory::MarketDirectory;
use crate::market::MarketError;

/// Normalize raw market text to a canonical market code
///
/// # Example
/// ```
/// use trip_econ_core_rs::market::{normalize_market_code, MarketDirectory};
///
/// let dir = MarketDirectory::standard();
/// assert_eq!(normalize_market_code(&dir, "gta").unwrap(), "GTA");
/// assert_eq!(normalize_market_code(&dir, "Chicago, IL").unwrap(), "CHI");
/// assert!(normalize_market_code(&dir, "Narnia").is_err());
/// ```
pub fn normalize_market_code(
    directory: &MarketDirectory,
    input: &str,
) -> Result<String, MarketError> {
    let cleaned = clean(input);

    if let Some(code) = lookup(directory, &cleaned) {
        return Ok(code);
    }

    // Salvage pass: inputs like "CHI - downtown" or "metro GTA" carry the
    // code at one end of the cleaned text.
    if cleaned.len() > 3 {
        let head = &cleaned[..3];
        let tail = &cleaned[cleaned.len() - 3..];
        for candidate in [head, tail] {
            if let Some(code) = lookup(directory, candidate) {
                return Ok(code);
            }
        }
    }

    Err(MarketError::UnknownMarket {
        input: input.to_string(),
    })
}

/// Uppercase and strip everything outside A-Z0-9
fn clean(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// One cleaned token against the code table, then the alias table
fn lookup(directory: &MarketDirectory, token: &str) -> Option<String> {
    if directory.markets.contains_key(token) {
        return Some(token.to_string());
    }
    directory.aliases.get(token).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_code_any_case() {
        let dir = MarketDirectory::standard();
        assert_eq!(normalize_market_code(&dir, "GTA").unwrap(), "GTA");
        assert_eq!(normalize_market_code(&dir, "gta").unwrap(), "GTA");
    }

    #[test]
    fn test_alias_with_punctuation() {
        let dir = MarketDirectory::standard();
        assert_eq!(normalize_market_code(&dir, "New York").unwrap(), "NYC");
        assert_eq!(normalize_market_code(&dir, "el-paso").unwrap(), "ELP");
        assert_eq!(normalize_market_code(&dir, "Fort Worth").unwrap(), "DAL");
    }

    #[test]
    fn test_head_and_tail_salvage() {
        let dir = MarketDirectory::standard();
        // Code at the head of a longer string
        assert_eq!(normalize_market_code(&dir, "CHI yard 4").unwrap(), "CHI");
        // Code at the tail
        assert_eq!(normalize_market_code(&dir, "metro GTA").unwrap(), "GTA");
        // Airport alias at the tail
        assert_eq!(normalize_market_code(&dir, "hub YYZ").unwrap(), "GTA");
    }

    #[test]
    fn test_unknown_input_fails_with_original_text() {
        let dir = MarketDirectory::standard();
        let err = normalize_market_code(&dir, "Narnia").unwrap_err();
        assert_eq!(
            err,
            MarketError::UnknownMarket {
                input: "Narnia".to_string()
            }
        );
    }

    #[test]
    fn test_empty_input_fails() {
        let dir = MarketDirectory::standard();
        assert!(normalize_market_code(&dir, "  ").is_err());
    }
}
