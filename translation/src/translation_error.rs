use std::fmt;

use emission::{Code, SyntaxError};
use parsing::MatchError;

use crate::patterns::{format_examples, relevant_categories, PatternCategory};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TranslationErrorKind {
    EmptyInput,
    UnrecognizedStatement,
    AmbiguousOperator,
    RejectedInput,
    InvalidOutput,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationError {
    pub kind: TranslationErrorKind,
    /// 1-based position of the failing statement, when one statement is to blame.
    pub statement_index: Option<usize>,
    /// The offending text, verbatim.
    pub text: String,
    pub reason: String,
}

impl TranslationError {
    pub fn empty_input(text: &str) -> Self {
        TranslationError {
            kind: TranslationErrorKind::EmptyInput,
            statement_index: None,
            text: String::from(text),
            reason: format!(
                "nothing to translate, try an instruction such as:\n{}",
                format_examples(&[PatternCategory::Arithmetic, PatternCategory::Assignment])
            ),
        }
    }
    pub fn rejected(text: &str, reason: &str) -> Self {
        TranslationError {
            kind: TranslationErrorKind::RejectedInput,
            statement_index: None,
            text: String::from(text),
            reason: String::from(reason),
        }
    }
    pub fn unmatched(statement_index: usize, error: MatchError) -> Self {
        let hint = format_examples(&relevant_categories(error.text()));
        let (kind, reason) = match &error {
            MatchError::UnrecognizedStatement { .. } => (
                TranslationErrorKind::UnrecognizedStatement,
                format!("no supported pattern matches, try one of:\n{hint}"),
            ),
            MatchError::AmbiguousOperator { keyword, .. } => (
                TranslationErrorKind::AmbiguousOperator,
                format!(
                    "'{keyword}' is not a known comparison, use 'greater than', 'less than' or 'equals'"
                ),
            ),
        };
        TranslationError {
            kind,
            statement_index: Some(statement_index),
            text: String::from(error.text()),
            reason,
        }
    }
    pub fn invalid_output(
        statement_index: usize,
        statement: &str,
        code: &Code,
        error: SyntaxError,
    ) -> Self {
        TranslationError {
            kind: TranslationErrorKind::InvalidOutput,
            statement_index: Some(statement_index),
            text: String::from(statement),
            reason: format!("generated code is not valid ({error}):\n{code}"),
        }
    }
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.statement_index {
            Some(index) => write!(f, "statement {index} '{}': {}", self.text, self.reason),
            None => write!(f, "{}", self.reason),
        }
    }
}

impl std::error::Error for TranslationError {}
