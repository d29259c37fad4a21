use once_cell::sync::Lazy;
use regex::Regex;

use crate::TranslationError;

pub const MAX_INPUT_LENGTH: usize = 1000;

static UNSAFE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\bimport\s+os\b",
        r"\bexec\b",
        r"\beval\b",
        r"\b__\w*__\b",
        r"\bopen\s*\(",
    ]
    .into_iter()
    .map(|pattern| Regex::new(&format!("(?i){pattern}")).unwrap())
    .collect()
});

/// Reject input before any statement is matched.
pub fn validate_input(input: &str) -> Result<(), TranslationError> {
    if input.trim().is_empty() {
        return Err(TranslationError::empty_input(input));
    }
    let length = input.chars().count();
    if length > MAX_INPUT_LENGTH {
        return Err(TranslationError::rejected(
            input,
            &format!("input is too long ({length} characters, at most {MAX_INPUT_LENGTH} allowed)"),
        ));
    }
    if let Some(pattern) = UNSAFE_PATTERNS
        .iter()
        .find(|pattern| pattern.is_match(input))
    {
        return Err(TranslationError::rejected(
            input,
            &format!("input contains potentially unsafe content matching '{pattern}'"),
        ));
    }
    Ok(())
}
