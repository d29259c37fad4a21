use itertools::Itertools;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum PatternCategory {
    #[strum(serialize = "Arithmetic Operations")]
    Arithmetic,
    #[strum(serialize = "Variable Assignment")]
    Assignment,
    #[strum(serialize = "Conditional Statements")]
    Conditional,
    #[strum(serialize = "Data Operations")]
    Data,
    #[strum(serialize = "Loop Operations")]
    Loop,
}

impl PatternCategory {
    /// Sentences that translate on their own, without earlier declarations.
    pub fn examples(&self) -> &'static [&'static str] {
        match self {
            PatternCategory::Arithmetic => &[
                "add 5 and 3",
                "multiply x by 2",
                "calculate 10 plus 7",
                "subtract 3 from 8",
                "divide total by count",
                "calculate the sum of 4 and 6",
                "7 * 6",
            ],
            PatternCategory::Assignment => &[
                "set x to 10",
                "create variable name with value hello",
                "assign 42 to answer",
                "x = 5",
                "total = price * 2",
            ],
            PatternCategory::Conditional => &[
                "if x greater than 5 then print yes",
                "when count equals 0 do print empty",
                "if temperature less than 32 then print freezing else print not freezing",
            ],
            PatternCategory::Data => &[
                "create list with 1, 2, 3",
                "make a list of red, green and blue",
                "create dictionary with name John and age 25",
                "add 4 to list numbers",
                "remove red from colors",
                "get 0 from numbers",
            ],
            PatternCategory::Loop => &[
                "repeat 5 times print hello",
                "for each item in numbers print item",
            ],
        }
    }
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            PatternCategory::Arithmetic => &[
                "add", "plus", "sum", "multiply", "times", "divide", "divided", "subtract",
                "minus", "calculate", "product",
            ],
            PatternCategory::Assignment => &["set", "create", "assign", "variable", "value"],
            PatternCategory::Conditional => &["if", "when", "then", "else", "condition"],
            PatternCategory::Data => &[
                "list", "array", "dictionary", "dict", "data", "append", "remove", "get",
            ],
            PatternCategory::Loop => &["repeat", "loop", "for", "while", "each", "times"],
        }
    }
}

pub fn supported_patterns() -> Vec<(PatternCategory, &'static [&'static str])> {
    PatternCategory::iter()
        .map(|category| (category, category.examples()))
        .collect()
}

/// Categories whose vocabulary appears in the text, or every category when none does.
pub fn relevant_categories(text: &str) -> Vec<PatternCategory> {
    let words = text
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .map(str::to_lowercase)
        .collect_vec();
    let relevant = PatternCategory::iter()
        .filter(|category| {
            category
                .keywords()
                .iter()
                .any(|keyword| words.iter().any(|word| word == keyword))
        })
        .collect_vec();
    if relevant.is_empty() {
        PatternCategory::iter().collect()
    } else {
        relevant
    }
}

/// A human-readable list of example sentences for the given categories.
pub fn format_examples(categories: &[PatternCategory]) -> String {
    categories
        .iter()
        .map(|category| {
            let examples = category
                .examples()
                .iter()
                .map(|example| format!("  - {example}"))
                .join("\n");
            format!("{category}:\n{examples}")
        })
        .join("\n")
}
