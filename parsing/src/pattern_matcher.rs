use itertools::Itertools;
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{
    Action, Arithmetic, ArithmeticOperator, Assignment, Boolean, CollectionLiteral,
    CollectionOperation, CollectionOperationKind, Comparator, Conditional, Instruction, Literal,
    Loop, LoopKind, MatchError, Name, Number, Operand,
};

const IDENTIFIER: &str = "[A-Za-z_][A-Za-z0-9_]*";
/// Decimal literals without leading zeros on integers, so `007` stays text.
const NUMBER: &str = r"[+-]?(?:0|[1-9]\d*|\d+\.\d+)";
/// A symbolic arithmetic operand: anything up to whitespace, `=` or an operator.
const SYMBOLIC_OPERAND: &str = r"[^\s=+*/-]+";
const RESULT_NAME: &str = "result";
const ITEM_NAME: &str = "item";
/// Keywords that are values, so they may appear as call arguments.
const CONSTANTS: [&str; 3] = ["False", "None", "True"];

const KEYWORDS: [&str; 35] = [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];
/// Builtins that every generated action or loop relies on.
const SHADOWED_BUILTINS: [&str; 2] = ["print", "range"];

static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{IDENTIFIER}$")).unwrap());
static NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("^{NUMBER}$")).unwrap());
static QUOTED_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^"(?P<inner>[^"\\]*)"$"#).unwrap());
static CONDITION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?P<lhs>"[^"]*"|\S+)\s+(?P<comparator>.+?)\s+(?P<rhs>"[^"]*"|\S+)$"#).unwrap()
});
static EMBEDDED_ELSE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\selse\s").unwrap());
static PRINT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^print\s+(?P<token>.+)$").unwrap());
static PASS_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^pass$").unwrap());
static CALL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"^(?P<function>{IDENTIFIER})\(\s*(?P<argument>{IDENTIFIER}|{NUMBER}|"[^"\\]*")?\s*\)$"#
    ))
    .unwrap()
});
static ITEM_SEPARATOR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*,\s*(?:and\s+)?|\s+and\s+").unwrap());
static PAIR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<key>[^\s:=]+)\s*(?:[:=]\s*|\s+)(?P<value>.+)$").unwrap());

pub fn is_identifier(token: &str) -> bool {
    IDENTIFIER_PATTERN.is_match(token)
}

pub fn is_keyword(token: &str) -> bool {
    KEYWORDS.contains(&token)
}

/// Names that cannot be bound without breaking the generated program.
pub fn is_reserved(token: &str) -> bool {
    is_keyword(token) || SHADOWED_BUILTINS.contains(&token)
}

/// Why a rule whose pattern matched still declined the statement.
enum RuleFailure {
    /// The captures do not form valid operands or actions.
    Shape,
    /// The operator keyword is not in the known mapping.
    Operator(String),
}

type Build = fn(&Captures) -> Result<Instruction, RuleFailure>;

struct Rule {
    name: &'static str,
    pattern: Regex,
    build: Build,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, build: Build) -> Self {
        Rule {
            name,
            pattern: Regex::new(&format!("(?i)^{pattern}$")).unwrap(),
            build,
        }
    }
}

/// Most specific rules first so that a general pattern never shadows a detailed one.
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(
            "if-then-else",
            r"if\s+(?P<condition>.+?)\s+then\s+(?P<then>.+?)\s+else\s+(?P<else>.+)",
            build_conditional,
        ),
        Rule::new(
            "when-do-else",
            r"when\s+(?P<condition>.+?)\s+(?:do|then)\s+(?P<then>.+?)\s+else\s+(?P<else>.+)",
            build_conditional,
        ),
        Rule::new(
            "if-then",
            r"if\s+(?P<condition>.+?)\s+then\s+(?P<then>.+)",
            build_conditional,
        ),
        Rule::new(
            "when-do",
            r"when\s+(?P<condition>.+?)\s+do\s+(?P<then>.+)",
            build_conditional,
        ),
        Rule::new(
            "when-then",
            r"when\s+(?P<condition>.+?)\s+then\s+(?P<then>.+)",
            build_conditional,
        ),
        Rule::new(
            "add-and",
            r"(?P<operator>add)\s+(?P<lhs>\S+)\s+and\s+(?P<rhs>\S+)",
            build_arithmetic,
        ),
        Rule::new(
            "subtract-from",
            r"(?P<operator>subtract)\s+(?P<rhs>\S+)\s+from\s+(?P<lhs>\S+)",
            build_arithmetic,
        ),
        Rule::new(
            "multiply-by",
            r"(?P<operator>multiply)\s+(?P<lhs>\S+)\s+(?:by|and)\s+(?P<rhs>\S+)",
            build_arithmetic,
        ),
        Rule::new(
            "divide-by",
            r"(?P<operator>divide)\s+(?P<lhs>\S+)\s+by\s+(?P<rhs>\S+)",
            build_arithmetic,
        ),
        Rule::new(
            "natural-arithmetic",
            r"(?:calculate\s+)?(?P<lhs>\S+)\s+(?P<operator>plus|minus|times|divided\s+by)\s+(?P<rhs>\S+)",
            build_arithmetic,
        ),
        Rule::new(
            "sum-of",
            r"(?:calculate\s+)?(?:the\s+)?(?P<operator>sum|product)\s+(?:of\s+)?(?P<lhs>\S+)\s+and\s+(?P<rhs>\S+)",
            build_arithmetic,
        ),
        Rule::new(
            "assign-arithmetic",
            &format!(
                r"(?P<destination>{IDENTIFIER})\s*=\s*(?P<lhs>{SYMBOLIC_OPERAND})\s*(?P<operator>[-+*/])\s*(?P<rhs>{SYMBOLIC_OPERAND})"
            ),
            build_arithmetic,
        ),
        Rule::new(
            "symbolic-arithmetic",
            &format!(
                r"(?:calculate\s+)?(?P<lhs>{SYMBOLIC_OPERAND})\s*(?P<operator>[-+*/])\s*(?P<rhs>{SYMBOLIC_OPERAND})"
            ),
            build_arithmetic,
        ),
        Rule::new(
            "set-to",
            r"set\s+(?P<name>\S+)\s+to\s+(?P<value>.+)",
            build_assignment,
        ),
        Rule::new(
            "create-variable",
            r"create\s+(?:a\s+)?variable\s+(?P<name>\S+)\s+with\s+value\s+(?P<value>.+)",
            build_assignment,
        ),
        Rule::new(
            "assign-to",
            r"assign\s+(?P<value>.+)\s+to\s+(?P<name>\S+)",
            build_assignment,
        ),
        Rule::new(
            "equals-assignment",
            r"(?P<name>[^\s=]+)\s*=\s*(?P<value>[^=\s].*)",
            build_assignment,
        ),
        Rule::new(
            "create-list",
            r"(?:create|make)\s+(?:a\s+|new\s+)?list(?:\s+(?:with|of|containing)\s+(?P<items>.+))?",
            build_list,
        ),
        Rule::new(
            "create-dict",
            r"(?:create|make)\s+(?:a\s+|new\s+)?(?:dict|dictionary)(?:\s+with\s+(?P<items>.+))?",
            build_dict,
        ),
        Rule::new(
            "add-to-list",
            r"add\s+(?P<value>.+?)\s+to\s+(?:the\s+)?(?:list\s+)?(?P<collection>\S+)",
            build_append,
        ),
        Rule::new(
            "remove-from-list",
            r"remove\s+(?P<value>.+?)\s+from\s+(?:the\s+)?(?:list\s+)?(?P<collection>\S+)",
            build_remove,
        ),
        Rule::new(
            "get-from",
            r"get\s+(?P<value>.+?)\s+from\s+(?:the\s+)?(?:list\s+|dict\s+|dictionary\s+)?(?P<collection>\S+)",
            build_get,
        ),
        Rule::new(
            "repeat-times",
            r"repeat\s+(?P<count>\d+)\s+times?\b\s*:?\s*(?P<body>.*)",
            build_repeat,
        ),
        Rule::new(
            "for-each",
            &format!(
                r"for\s+each\s+(?P<item>{IDENTIFIER})\s+in\s+(?P<collection>{IDENTIFIER})\b\s*:?\s*(?P<body>.*)"
            ),
            build_for_each,
        ),
    ]
});

fn parse_operand(token: &str) -> Option<Operand> {
    if NUMBER_PATTERN.is_match(token) {
        Some(Number::new(token).into())
    } else if let Some(value) = parse_boolean(token) {
        Some(Boolean { value }.into())
    } else if let Some(captures) = QUOTED_PATTERN.captures(token) {
        Some(Literal::Text(String::from(&captures["inner"])).into())
    } else if is_identifier(token) {
        Some(Operand::Word(Name::from(token)))
    } else {
        None
    }
}

fn parse_boolean(token: &str) -> Option<bool> {
    match token.to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_literal(value: &str) -> Literal {
    let value = value.trim();
    if NUMBER_PATTERN.is_match(value) {
        Number::new(value).into()
    } else if let Some(value) = parse_boolean(value) {
        Boolean { value }.into()
    } else if let Some(captures) = QUOTED_PATTERN.captures(value) {
        Literal::Text(String::from(&captures["inner"]))
    } else {
        Literal::Text(String::from(value))
    }
}

/// Operands that are emitted without resolution must be numbers or bindable names.
fn parse_direct_operand(token: &str) -> Result<Operand, RuleFailure> {
    match parse_operand(token) {
        Some(operand @ Operand::Literal(Literal::Number(_))) => Ok(operand),
        Some(Operand::Word(name)) if !is_reserved(&name) => Ok(Operand::Word(name)),
        _ => Err(RuleFailure::Shape),
    }
}

fn parse_name(token: &str) -> Result<Name, RuleFailure> {
    if is_identifier(token) && !is_reserved(token) {
        Ok(Name::from(token))
    } else {
        Err(RuleFailure::Shape)
    }
}

fn parse_action(text: &str) -> Result<Action, RuleFailure> {
    let text = text.trim();
    if let Some(captures) = PRINT_PATTERN.captures(text) {
        Ok(Action::Print(String::from(captures["token"].trim())))
    } else if PASS_PATTERN.is_match(text) {
        Ok(Action::pass())
    } else if let Some(captures) = CALL_PATTERN.captures(text) {
        let argument = captures.name("argument").map_or("", |argument| argument.as_str());
        if is_reserved(&captures["function"]) && &captures["function"] != "print" {
            Err(RuleFailure::Shape)
        } else if is_keyword(argument) && !CONSTANTS.contains(&argument) {
            Err(RuleFailure::Shape)
        } else {
            Ok(Action::Raw(String::from(text)))
        }
    } else {
        Err(RuleFailure::Shape)
    }
}

fn parse_body(text: Option<&str>) -> Result<Action, RuleFailure> {
    match text.map(str::trim) {
        None | Some("") => Ok(Action::pass()),
        Some(text) => parse_action(text),
    }
}

fn parse_condition(text: &str) -> Result<(Operand, Comparator, Operand), RuleFailure> {
    let captures = CONDITION_PATTERN
        .captures(text.trim())
        .ok_or(RuleFailure::Shape)?;
    let lhs = match parse_operand(&captures["lhs"]) {
        Some(Operand::Word(name)) if is_reserved(&name) => return Err(RuleFailure::Shape),
        Some(operand) => operand,
        None => return Err(RuleFailure::Shape),
    };
    let rhs = parse_operand(&captures["rhs"]).ok_or(RuleFailure::Shape)?;
    let keyword = &captures["comparator"];
    let comparator = Comparator::from_keyword(keyword)
        .ok_or_else(|| RuleFailure::Operator(String::from(keyword)))?;
    Ok((lhs, comparator, rhs))
}

fn build_conditional(captures: &Captures) -> Result<Instruction, RuleFailure> {
    let (lhs, comparator, rhs) = parse_condition(&captures["condition"])?;
    let else_action = captures
        .name("else")
        .map(|text| parse_action(text.as_str()))
        .transpose()?;
    // An else branch that the else-rules rejected must not leak into the then branch.
    if else_action.is_none() && EMBEDDED_ELSE_PATTERN.is_match(&captures["then"]) {
        return Err(RuleFailure::Shape);
    }
    Ok(Conditional {
        lhs,
        comparator,
        rhs,
        then_action: parse_action(&captures["then"])?,
        else_action,
    }
    .into())
}

fn build_arithmetic(captures: &Captures) -> Result<Instruction, RuleFailure> {
    let operator =
        ArithmeticOperator::from_phrase(&captures["operator"]).ok_or(RuleFailure::Shape)?;
    Ok(Arithmetic {
        operator,
        lhs: parse_direct_operand(&captures["lhs"])?,
        rhs: parse_direct_operand(&captures["rhs"])?,
        destination: match captures.name("destination") {
            Some(destination) => parse_name(destination.as_str())?,
            None => Name::from(RESULT_NAME),
        },
    }
    .into())
}

fn build_assignment(captures: &Captures) -> Result<Instruction, RuleFailure> {
    Ok(Assignment {
        name: parse_name(&captures["name"])?,
        value: parse_literal(&captures["value"]),
    }
    .into())
}

fn split_items(text: Option<&str>) -> Vec<&str> {
    text.map_or_else(Vec::new, |text| {
        ITEM_SEPARATOR_PATTERN
            .split(text.trim())
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect_vec()
    })
}

fn build_list(captures: &Captures) -> Result<Instruction, RuleFailure> {
    let items = split_items(captures.name("items").map(|items| items.as_str()));
    Ok(CollectionLiteral::list(items.into_iter().map(parse_literal).collect()).into())
}

fn build_dict(captures: &Captures) -> Result<Instruction, RuleFailure> {
    let pairs = split_items(captures.name("items").map(|items| items.as_str()))
        .into_iter()
        .map(|item| {
            let pair = PAIR_PATTERN.captures(item).ok_or(RuleFailure::Shape)?;
            let key = match parse_literal(&pair["key"]) {
                Literal::Text(key) => key,
                Literal::Number(Number { value }) => value,
                Literal::Boolean(_) => return Err(RuleFailure::Shape),
            };
            Ok((key, parse_literal(&pair["value"])))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CollectionLiteral::dict(pairs).into())
}

fn build_collection_operation(
    captures: &Captures,
    kind: CollectionOperationKind,
) -> Result<Instruction, RuleFailure> {
    Ok(CollectionOperation {
        kind,
        collection: parse_name(&captures["collection"])?,
        value: parse_literal(&captures["value"]),
    }
    .into())
}

fn build_append(captures: &Captures) -> Result<Instruction, RuleFailure> {
    build_collection_operation(captures, CollectionOperationKind::Append)
}

fn build_remove(captures: &Captures) -> Result<Instruction, RuleFailure> {
    build_collection_operation(captures, CollectionOperationKind::Remove)
}

fn build_get(captures: &Captures) -> Result<Instruction, RuleFailure> {
    build_collection_operation(
        captures,
        CollectionOperationKind::Get {
            destination: Name::from(ITEM_NAME),
        },
    )
}

fn build_repeat(captures: &Captures) -> Result<Instruction, RuleFailure> {
    let count = captures["count"]
        .parse::<u64>()
        .map_err(|_| RuleFailure::Shape)?;
    Ok(Loop {
        kind: LoopKind::Repeat { count },
        body: parse_body(captures.name("body").map(|body| body.as_str()))?,
    }
    .into())
}

fn build_for_each(captures: &Captures) -> Result<Instruction, RuleFailure> {
    Ok(Loop {
        kind: LoopKind::ForEach {
            item: parse_name(&captures["item"])?,
            collection: parse_name(&captures["collection"])?,
        },
        body: parse_body(captures.name("body").map(|body| body.as_str()))?,
    }
    .into())
}

pub struct PatternMatcher {}

impl PatternMatcher {
    /// Classify one statement with the first rule that accepts it.
    pub fn match_statement(statement: &str) -> Result<Instruction, MatchError> {
        let trimmed = statement.trim();
        let text = trimmed.strip_suffix('.').unwrap_or(trimmed).trim_end();
        let mut operator_failure = None;
        for rule in RULES.iter() {
            let Some(captures) = rule.pattern.captures(text) else {
                continue;
            };
            match (rule.build)(&captures) {
                Ok(instruction) => {
                    debug!("matched '{text}' with rule {}", rule.name);
                    return Ok(instruction);
                }
                Err(RuleFailure::Shape) => {
                    debug!("rule {} declined '{text}'", rule.name);
                }
                Err(RuleFailure::Operator(keyword)) => {
                    debug!("rule {} found unknown operator '{keyword}'", rule.name);
                    operator_failure.get_or_insert(keyword);
                }
            }
        }
        Err(match operator_failure {
            Some(keyword) => MatchError::AmbiguousOperator {
                keyword,
                text: String::from(statement),
            },
            None => MatchError::UnrecognizedStatement {
                text: String::from(statement),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{CollectionKind, Element};
    use test_case::test_case;

    fn word(name: &str) -> Operand {
        Operand::Word(Name::from(name))
    }

    fn print(token: &str) -> Action {
        Action::Print(String::from(token))
    }

    #[test_case(
        "set age to 25",
        Assignment{name: Name::from("age"), value: Number::new("25").into()}.into();
        "set number"
    )]
    #[test_case(
        "set name to John",
        Assignment{name: Name::from("name"), value: Literal::Text(String::from("John"))}.into();
        "set text"
    )]
    #[test_case(
        "SET flag TO true",
        Assignment{name: Name::from("flag"), value: Boolean{value: true}.into()}.into();
        "uppercase keywords with boolean"
    )]
    #[test_case(
        r#"set greeting to "hello world""#,
        Assignment{name: Name::from("greeting"), value: Literal::Text(String::from("hello world"))}.into();
        "quoted text"
    )]
    #[test_case(
        "create variable price with value 9.99",
        Assignment{name: Name::from("price"), value: Number::new("9.99").into()}.into();
        "create variable"
    )]
    #[test_case(
        "assign 42 to answer",
        Assignment{name: Name::from("answer"), value: Number::new("42").into()}.into();
        "assign to"
    )]
    #[test_case(
        "set x to 3.",
        Assignment{name: Name::from("x"), value: Number::new("3").into()}.into();
        "trailing period"
    )]
    #[test_case(
        "set x to 007",
        Assignment{name: Name::from("x"), value: Literal::Text(String::from("007"))}.into();
        "leading zeros stay text"
    )]
    #[test_case(
        "set x to 0",
        Assignment{name: Name::from("x"), value: Number::new("0").into()}.into();
        "zero"
    )]
    #[test_case(
        "x = 5",
        Assignment{name: Name::from("x"), value: Number::new("5").into()}.into();
        "equals sign"
    )]
    #[test_case(
        "x = -5",
        Assignment{name: Name::from("x"), value: Number::new("-5").into()}.into();
        "equals sign with negative number"
    )]
    #[test_case(
        "greeting=hello",
        Assignment{name: Name::from("greeting"), value: Literal::Text(String::from("hello"))}.into();
        "equals sign without spaces"
    )]
    fn test_match_assignment(statement: &str, expected: Instruction) {
        assert_eq!(PatternMatcher::match_statement(statement), Ok(expected))
    }

    #[test_case(
        "add 10 and 5",
        ArithmeticOperator::Add,
        Number::new("10").into(),
        Number::new("5").into();
        "add and"
    )]
    #[test_case(
        "subtract 5 from 20",
        ArithmeticOperator::Subtract,
        Number::new("20").into(),
        Number::new("5").into();
        "subtract from reorders operands"
    )]
    #[test_case(
        "multiply x by 2",
        ArithmeticOperator::Multiply,
        word("x"),
        Number::new("2").into();
        "multiply by"
    )]
    #[test_case(
        "divide total by count",
        ArithmeticOperator::Divide,
        word("total"),
        word("count");
        "divide by"
    )]
    #[test_case(
        "a plus b",
        ArithmeticOperator::Add,
        word("a"),
        word("b");
        "plus"
    )]
    #[test_case(
        "8 minus 3",
        ArithmeticOperator::Subtract,
        Number::new("8").into(),
        Number::new("3").into();
        "minus keeps operand order"
    )]
    #[test_case(
        "calculate 6 times 7",
        ArithmeticOperator::Multiply,
        Number::new("6").into(),
        Number::new("7").into();
        "calculate times"
    )]
    #[test_case(
        "10 divided by 4",
        ArithmeticOperator::Divide,
        Number::new("10").into(),
        Number::new("4").into();
        "divided by"
    )]
    #[test_case(
        "sum 4 and 6",
        ArithmeticOperator::Add,
        Number::new("4").into(),
        Number::new("6").into();
        "sum"
    )]
    #[test_case(
        "calculate the sum of a and b",
        ArithmeticOperator::Add,
        word("a"),
        word("b");
        "calculate the sum of"
    )]
    #[test_case(
        "the product of x and 3",
        ArithmeticOperator::Multiply,
        word("x"),
        Number::new("3").into();
        "product of"
    )]
    #[test_case(
        "a + b",
        ArithmeticOperator::Add,
        word("a"),
        word("b");
        "symbolic add"
    )]
    #[test_case(
        "10 - 4",
        ArithmeticOperator::Subtract,
        Number::new("10").into(),
        Number::new("4").into();
        "symbolic subtract"
    )]
    #[test_case(
        "7*6",
        ArithmeticOperator::Multiply,
        Number::new("7").into(),
        Number::new("6").into();
        "symbolic multiply without spaces"
    )]
    #[test_case(
        "calculate total / count",
        ArithmeticOperator::Divide,
        word("total"),
        word("count");
        "calculate symbolic divide"
    )]
    fn test_match_arithmetic(
        statement: &str,
        operator: ArithmeticOperator,
        lhs: Operand,
        rhs: Operand,
    ) {
        let expected = Arithmetic {
            operator,
            lhs,
            rhs,
            destination: Name::from("result"),
        };
        assert_eq!(
            PatternMatcher::match_statement(statement),
            Ok(expected.into())
        )
    }

    #[test_case(
        "if age greater than 18 then print adult",
        Conditional{
            lhs: word("age"),
            comparator: Comparator::GreaterThan,
            rhs: Number::new("18").into(),
            then_action: print("adult"),
            else_action: None,
        };
        "if then"
    )]
    #[test_case(
        "if score less than 60 then print fail else print pass",
        Conditional{
            lhs: word("score"),
            comparator: Comparator::LessThan,
            rhs: Number::new("60").into(),
            then_action: print("fail"),
            else_action: Some(print("pass")),
        };
        "if then else"
    )]
    #[test_case(
        "when count equals 0 do print empty",
        Conditional{
            lhs: word("count"),
            comparator: Comparator::Equals,
            rhs: Number::new("0").into(),
            then_action: print("empty"),
            else_action: None,
        };
        "when do"
    )]
    #[test_case(
        "when name equals Bob then print hi",
        Conditional{
            lhs: word("name"),
            comparator: Comparator::Equals,
            rhs: word("Bob"),
            then_action: print("hi"),
            else_action: None,
        };
        "when then"
    )]
    #[test_case(
        "when x equals 1 do print one else print other",
        Conditional{
            lhs: word("x"),
            comparator: Comparator::Equals,
            rhs: Number::new("1").into(),
            then_action: print("one"),
            else_action: Some(print("other")),
        };
        "when do else"
    )]
    #[test_case(
        "if temperature less than 32 then print freezing else print not freezing",
        Conditional{
            lhs: word("temperature"),
            comparator: Comparator::LessThan,
            rhs: Number::new("32").into(),
            then_action: print("freezing"),
            else_action: Some(print("not freezing")),
        };
        "multi-word else token"
    )]
    #[test_case(
        "If X Greater Than 5 Then pass",
        Conditional{
            lhs: word("X"),
            comparator: Comparator::GreaterThan,
            rhs: Number::new("5").into(),
            then_action: Action::pass(),
            else_action: None,
        };
        "mixed case with pass"
    )]
    #[test_case(
        "if x greater than 1 then show(True)",
        Conditional{
            lhs: word("x"),
            comparator: Comparator::GreaterThan,
            rhs: Number::new("1").into(),
            then_action: Action::Raw(String::from("show(True)")),
            else_action: None,
        };
        "constant call argument"
    )]
    #[test_case(
        "if x greater than 1 then show(x)",
        Conditional{
            lhs: word("x"),
            comparator: Comparator::GreaterThan,
            rhs: Number::new("1").into(),
            then_action: Action::Raw(String::from("show(x)")),
            else_action: None,
        };
        "raw call action"
    )]
    fn test_match_conditional(statement: &str, expected: Conditional) {
        assert_eq!(
            PatternMatcher::match_statement(statement),
            Ok(expected.into())
        )
    }

    #[test_case(
        "create list with 1, 2, 3",
        CollectionLiteral::list(vec![
            Number::new("1").into(),
            Number::new("2").into(),
            Number::new("3").into(),
        ]);
        "list of numbers"
    )]
    #[test_case(
        "create a list with apple, banana and cherry",
        CollectionLiteral::list(vec![
            Literal::Text(String::from("apple")),
            Literal::Text(String::from("banana")),
            Literal::Text(String::from("cherry")),
        ]);
        "list with and"
    )]
    #[test_case(
        "create list",
        CollectionLiteral::list(Vec::new());
        "empty list"
    )]
    #[test_case(
        "create dictionary with name John and age 25",
        CollectionLiteral::dict(vec![
            (String::from("name"), Literal::Text(String::from("John"))),
            (String::from("age"), Number::new("25").into()),
        ]);
        "dictionary with pairs"
    )]
    #[test_case(
        "create dict with city: Paris, open: true",
        CollectionLiteral::dict(vec![
            (String::from("city"), Literal::Text(String::from("Paris"))),
            (String::from("open"), Boolean{value: true}.into()),
        ]);
        "dict with colons"
    )]
    fn test_match_collection(statement: &str, expected: CollectionLiteral) {
        assert_eq!(
            PatternMatcher::match_statement(statement),
            Ok(expected.into())
        )
    }

    #[test_case(
        "add 5 to list numbers",
        CollectionOperation{
            kind: CollectionOperationKind::Append,
            collection: Name::from("numbers"),
            value: Number::new("5").into(),
        };
        "append"
    )]
    #[test_case(
        "add banana to fruits",
        CollectionOperation{
            kind: CollectionOperationKind::Append,
            collection: Name::from("fruits"),
            value: Literal::Text(String::from("banana")),
        };
        "append without list keyword"
    )]
    #[test_case(
        "remove apple from the list fruits",
        CollectionOperation{
            kind: CollectionOperationKind::Remove,
            collection: Name::from("fruits"),
            value: Literal::Text(String::from("apple")),
        };
        "remove"
    )]
    #[test_case(
        "get 0 from numbers",
        CollectionOperation{
            kind: CollectionOperationKind::Get{destination: Name::from("item")},
            collection: Name::from("numbers"),
            value: Number::new("0").into(),
        };
        "get index"
    )]
    #[test_case(
        "get name from dict person",
        CollectionOperation{
            kind: CollectionOperationKind::Get{destination: Name::from("item")},
            collection: Name::from("person"),
            value: Literal::Text(String::from("name")),
        };
        "get key"
    )]
    fn test_match_collection_operation(statement: &str, expected: CollectionOperation) {
        assert_eq!(
            PatternMatcher::match_statement(statement),
            Ok(expected.into())
        )
    }

    #[test_case("x = a + b", "x", ArithmeticOperator::Add; "add")]
    #[test_case("total=price*2", "total", ArithmeticOperator::Multiply; "multiply without spaces")]
    fn test_arithmetic_assigns_to_named_destination(
        statement: &str,
        destination: &str,
        operator: ArithmeticOperator,
    ) {
        let Ok(Instruction::Arithmetic(arithmetic)) = PatternMatcher::match_statement(statement)
        else {
            panic!("expected arithmetic")
        };
        assert_eq!(arithmetic.destination, destination);
        assert_eq!(arithmetic.operator, operator);
    }

    #[test_case(
        "repeat 3 times print hello",
        Loop{kind: LoopKind::Repeat{count: 3}, body: print("hello")};
        "repeat print"
    )]
    #[test_case(
        "repeat 2 times",
        Loop{kind: LoopKind::Repeat{count: 2}, body: Action::pass()};
        "repeat without body"
    )]
    #[test_case(
        "repeat 1 time: print once",
        Loop{kind: LoopKind::Repeat{count: 1}, body: print("once")};
        "singular time with colon"
    )]
    #[test_case(
        "for each item in numbers print item",
        Loop{
            kind: LoopKind::ForEach{item: Name::from("item"), collection: Name::from("numbers")},
            body: print("item"),
        };
        "for each"
    )]
    fn test_match_loop(statement: &str, expected: Loop) {
        assert_eq!(
            PatternMatcher::match_statement(statement),
            Ok(expected.into())
        )
    }

    #[test_case("bogus statement"; "unknown words")]
    #[test_case("set to 5"; "missing name")]
    #[test_case("set if to 5"; "reserved name")]
    #[test_case("add 1 and two words"; "too many operands")]
    #[test_case("if x greater than 1 then increment x"; "unsupported action")]
    #[test_case("if x greater than 1 then print a else increment x"; "unsupported else action")]
    #[test_case("create dict with lonely"; "dict item without value")]
    #[test_case("for each if in numbers print x"; "reserved loop variable")]
    #[test_case("add 08 and 1"; "leading zero operand")]
    #[test_case("if x greater than 1 then show(if)"; "keyword call argument")]
    #[test_case("repeat 2 times show(else)"; "keyword call argument in loop body")]
    #[test_case("if = 5"; "reserved assignment target")]
    #[test_case("add 5 to list for"; "reserved collection")]
    #[test_case("x == 5"; "comparison is not assignment")]
    fn test_unrecognized_statement(statement: &str) {
        assert_eq!(
            PatternMatcher::match_statement(statement),
            Err(MatchError::UnrecognizedStatement {
                text: String::from(statement)
            })
        )
    }

    #[test_case("if x bigger than 5 then print big", "bigger than"; "unknown comparator")]
    #[test_case("when y is equal to 2 do print two", "is equal to"; "verbose comparator")]
    fn test_ambiguous_operator(statement: &str, keyword: &str) {
        assert_eq!(
            PatternMatcher::match_statement(statement),
            Err(MatchError::AmbiguousOperator {
                keyword: String::from(keyword),
                text: String::from(statement)
            })
        )
    }

    #[test]
    fn test_else_rule_takes_priority() {
        let Ok(Instruction::Conditional(conditional)) =
            PatternMatcher::match_statement("if a equals b then print yes else print no")
        else {
            panic!("expected a conditional")
        };
        assert_eq!(conditional.then_action, print("yes"));
        assert_eq!(conditional.else_action, Some(print("no")));
    }

    #[test]
    fn test_dict_elements_keep_keys() {
        let Ok(Instruction::CollectionLiteral(collection)) =
            PatternMatcher::match_statement("make dict with x 1")
        else {
            panic!("expected a collection")
        };
        assert_eq!(collection.kind, CollectionKind::Dict);
        assert_eq!(
            collection.elements,
            vec![Element {
                key: Some(String::from("x")),
                value: Number::new("1").into()
            }]
        );
    }
}
