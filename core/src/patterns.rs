// Morse symbol tables - character <-> symbol string mapping
use crate::error::{Error, Result};
use crate::types::MorseSymbol;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, LazyLock};

type Entries = &'static [(char, &'static str)];

// Letter patterns
const LETTERS: Entries = &[
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
];

// Number patterns
const DIGITS: Entries = &[
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
];

// Punctuation patterns. '?' (..--..) is left out because it is the unknown marker.
const PUNCTUATION: Entries = &[
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('\'', ".----."),
    ('!', "-.-.--"),
    ('/', "-..-."),
    ('(', "-.--."),
    (')', "-.--.-"),
    ('&', ".-..."),
    (':', "---..."),
    (';', "-.-.-."),
    ('=', "-...-"),
    ('+', ".-.-."),
    ('-', "-....-"),
    ('_', "..--.-"),
    ('"', ".-..-."),
    ('$', "...-..-"),
    ('@', ".--.-."),
];

static INTERNATIONAL: LazyLock<Arc<SymbolTable>> =
    LazyLock::new(|| Arc::new(SymbolTable::from_static(&[LETTERS, DIGITS])));

static INTERNATIONAL_WITH_PUNCTUATION: LazyLock<Arc<SymbolTable>> =
    LazyLock::new(|| Arc::new(SymbolTable::from_static(&[LETTERS, DIGITS, PUNCTUATION])));

/// Bidirectional mapping between characters and Morse symbol strings.
///
/// Keys are stored uppercased and lookups are case-insensitive. No two
/// characters share a symbol string, so the reverse map is a true inverse.
/// Tables are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    forward: BTreeMap<char, String>,
    reverse: HashMap<String, char>,
}

impl SymbolTable {
    /// Build a custom table, checking that it is a valid bidirectional mapping.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        let mut table = Self {
            forward: BTreeMap::new(),
            reverse: HashMap::new(),
        };

        for (character, symbol) in entries {
            let symbol = symbol.into();

            if character.is_whitespace() || character.is_control() {
                return Err(Error::InvalidCharacter { character });
            }
            if symbol.is_empty() {
                return Err(Error::EmptySymbol { character });
            }
            if !symbol.chars().all(|c| MorseSymbol::from_char(c).is_some()) {
                return Err(Error::InvalidSymbol { character, symbol });
            }

            let key = normalize(character);
            if table.forward.contains_key(&key) {
                return Err(Error::DuplicateCharacter { character: key });
            }
            if let Some(&first) = table.reverse.get(&symbol) {
                return Err(Error::DuplicateSymbol {
                    symbol,
                    first,
                    second: key,
                });
            }

            table.reverse.insert(symbol.clone(), key);
            table.forward.insert(key, symbol);
        }

        Ok(table)
    }

    /// Parse a table from a JSON object such as `{"A": ".-", "B": "-..."}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;

        let mut entries = Vec::with_capacity(raw.len());
        for (key, symbol) in raw {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(character), None) => entries.push((character, symbol)),
                _ => return Err(Error::InvalidKey { key }),
            }
        }

        Self::new(entries)
    }

    // Built-in tables are checked by tests, so they skip validation.
    fn from_static(groups: &[Entries]) -> Self {
        let mut forward = BTreeMap::new();
        let mut reverse = HashMap::new();
        for &(character, symbol) in groups.iter().copied().flatten() {
            forward.insert(character, symbol.to_string());
            reverse.insert(symbol.to_string(), character);
        }
        Self { forward, reverse }
    }

    /// The international Morse alphabet: letters A-Z and digits 0-9.
    pub fn international() -> Arc<SymbolTable> {
        INTERNATIONAL.clone()
    }

    /// The international alphabet plus the common ITU punctuation marks.
    pub fn international_with_punctuation() -> Arc<SymbolTable> {
        INTERNATIONAL_WITH_PUNCTUATION.clone()
    }

    /// Symbol string for a character, ignoring case.
    pub fn symbol_for(&self, character: char) -> Option<&str> {
        self.forward.get(&normalize(character)).map(String::as_str)
    }

    /// Character for an exact symbol string.
    pub fn char_for(&self, symbol: &str) -> Option<char> {
        self.reverse.get(symbol).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.forward.iter().map(|(c, s)| (*c, s.as_str()))
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// Uppercase a character, keeping it as-is when the uppercase form isn't a
/// single character.
fn normalize(character: char) -> char {
    let mut upper = character.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => character,
    }
}
