use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchError {
    /// No rule in the table accepted the statement.
    UnrecognizedStatement { text: String },
    /// A rule accepted the statement's shape but not its operator keyword.
    AmbiguousOperator { keyword: String, text: String },
}

impl MatchError {
    pub fn text(&self) -> &str {
        match self {
            MatchError::UnrecognizedStatement { text }
            | MatchError::AmbiguousOperator { text, .. } => text,
        }
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::UnrecognizedStatement { text } => {
                write!(f, "unrecognized statement '{text}'")
            }
            MatchError::AmbiguousOperator { keyword, text } => {
                write!(f, "unknown operator '{keyword}' in '{text}'")
            }
        }
    }
}

impl std::error::Error for MatchError {}
