mod instruction_nodes;
mod match_error;
mod pattern_matcher;
mod splitter;

pub use instruction_nodes::*;
pub use match_error::MatchError;
pub use pattern_matcher::{is_identifier, is_keyword, is_reserved, PatternMatcher};
pub use splitter::StatementSplitter;
