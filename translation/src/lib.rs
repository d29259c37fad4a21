mod args;
mod patterns;
mod translation_error;
mod translator;
mod validation;
mod warnings;

pub use args::TranslationArgs;
pub use patterns::{format_examples, relevant_categories, supported_patterns, PatternCategory};
pub use translation_error::{TranslationError, TranslationErrorKind};
pub use translator::{SessionPolicy, SharedTranslator, Translation, Translator};
pub use validation::{validate_input, MAX_INPUT_LENGTH};
pub use warnings::{check_instruction, Severity, TranslationWarning, WarningKind, MAX_REPEAT_COUNT};
