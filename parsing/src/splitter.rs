use itertools::Itertools;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// The start of a statement: a leading keyword followed by the shape of its construct.
static STATEMENT_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)^(?:
            set\s+\w+\s+to\s
            | if\s+\S+\s+(?:greater|less|equals)
            | when\s+\S+\s+(?:greater|less|equals)
            | add\s+\S+\s+and\s
            | subtract\s+\S+\s+from\s
            | multiply\s+\S+\s+by\s
            | divide\s+\S+\s+by\s
            | create\s+(?:a\s+|new\s+)?(?:variable|list|dict|dictionary)\b
            | repeat\s+\d+\s+times?\b
            | for\s+each\s+\w+\s+in\s
        )",
    )
    .unwrap()
});

pub struct StatementSplitter {}

impl StatementSplitter {
    /// Divide raw input into statements, preserving their order.
    pub fn split(input: &str) -> Vec<String> {
        let lines = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect_vec();
        let statements = match lines.as_slice() {
            [] => Vec::new(),
            [line] => StatementSplitter::split_line(line),
            lines => lines.iter().map(|line| String::from(*line)).collect(),
        };
        debug!("split input into {} statement(s)", statements.len());
        statements
    }

    /// Find statements that were concatenated without a separator.
    fn split_line(line: &str) -> Vec<String> {
        let boundaries = StatementSplitter::boundaries(line);
        std::iter::once(0)
            .chain(boundaries.iter().cloned())
            .chain(std::iter::once(line.len()))
            .tuple_windows()
            .map(|(start, end)| line[start..end].trim())
            .filter(|statement| !statement.is_empty())
            .map(String::from)
            .collect()
    }

    fn boundaries(line: &str) -> Vec<usize> {
        line.char_indices()
            .tuple_windows()
            .filter(|((_, previous), (index, _))| {
                !previous.is_whitespace() && STATEMENT_START.is_match(&line[*index..])
            })
            .map(|(_, (index, _))| index)
            .collect()
    }
}
