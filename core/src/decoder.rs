use crate::patterns::SymbolTable;
use crate::types::{symbols_to_string, MorseSymbol};
use std::sync::Arc;

/// Character produced for symbol strings missing from the table.
pub const UNKNOWN: char = '?';

/// Translates between text and Morse symbol strings using a [`SymbolTable`].
///
/// Decoding never fails: unmapped codes come out as [`UNKNOWN`].
#[derive(Debug, Clone)]
pub struct MorseDecoder {
    table: Arc<SymbolTable>,
}

impl Default for MorseDecoder {
    fn default() -> Self {
        Self::new(SymbolTable::international())
    }
}

impl MorseDecoder {
    pub fn new(table: Arc<SymbolTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// Symbol string for one character, or an empty string if it has none.
    pub fn encode_symbol(&self, character: char) -> String {
        self.table
            .symbol_for(character)
            .map(str::to_string)
            .unwrap_or_default()
    }

    pub fn decode_symbol(&self, code: &str) -> char {
        self.table.char_for(code).unwrap_or(UNKNOWN)
    }

    pub fn decode_symbols(&self, symbols: &[MorseSymbol]) -> char {
        self.decode_symbol(&symbols_to_string(symbols))
    }

    /// Encode text as space-separated symbol strings. Whitespace and
    /// unmapped characters are dropped.
    pub fn encode_message(&self, message: &str) -> String {
        message
            .chars()
            .filter(|c| !c.is_whitespace())
            .filter_map(|c| self.table.symbol_for(c))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Decode space-separated symbol strings into text with no separators.
    pub fn decode_message(&self, codes: &str) -> String {
        codes
            .split(' ')
            .filter(|code| !code.is_empty())
            .map(|code| self.decode_symbol(code))
            .collect()
    }
}
