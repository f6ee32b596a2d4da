/// Failures when building a custom symbol table or loading configuration.
///
/// The event surface of the interpreter never fails; these only come out of
/// constructors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("empty symbol string for {character:?}")]
    EmptySymbol { character: char },

    #[error("symbol string {symbol:?} for {character:?} contains characters other than '.' and '-'")]
    InvalidSymbol { character: char, symbol: String },

    #[error("{character:?} cannot be mapped")]
    InvalidCharacter { character: char },

    #[error("{character:?} is mapped more than once")]
    DuplicateCharacter { character: char },

    #[error("{symbol:?} is shared by {first:?} and {second:?}")]
    DuplicateSymbol {
        symbol: String,
        first: char,
        second: char,
    },

    #[error("symbol table keys must be single characters, got {key:?}")]
    InvalidKey { key: String },

    #[error("invalid JSON")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
