use from_variants::FromVariants;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

pub type Name = String;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Number {
    pub value: String,
}

impl Number {
    pub fn new(value: &str) -> Self {
        Number {
            value: String::from(value),
        }
    }
    pub fn is_zero(&self) -> bool {
        self.value.parse::<f64>().map_or(false, |value| value == 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boolean {
    pub value: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, FromVariants, Serialize, Deserialize)]
pub enum Literal {
    Number(Number),
    Boolean(Boolean),
    Text(String),
}

/// A statement operand whose meaning may depend on the symbol table.
#[derive(Clone, Debug, PartialEq, Eq, FromVariants, Serialize, Deserialize)]
pub enum Operand {
    Literal(Literal),
    /// A bare identifier-shaped word: a reference once declared, otherwise text.
    Word(Name),
}

impl From<Number> for Operand {
    fn from(value: Number) -> Self {
        Operand::Literal(value.into())
    }
}

impl From<Boolean> for Operand {
    fn from(value: Boolean) -> Self {
        Operand::Literal(value.into())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum ArithmeticOperator {
    #[strum(serialize = "add")]
    Add,
    #[strum(serialize = "subtract")]
    Subtract,
    #[strum(serialize = "multiply")]
    Multiply,
    #[strum(serialize = "divide")]
    Divide,
}

impl ArithmeticOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithmeticOperator::Add => "+",
            ArithmeticOperator::Subtract => "-",
            ArithmeticOperator::Multiply => "*",
            ArithmeticOperator::Divide => "/",
        }
    }
    /// Look up the operator named by a phrase such as "plus", "divided by" or "*".
    pub fn from_phrase(phrase: &str) -> Option<Self> {
        match normalize_keyword(phrase).as_str() {
            "plus" | "sum" | "+" => Some(ArithmeticOperator::Add),
            "minus" | "-" => Some(ArithmeticOperator::Subtract),
            "times" | "product" | "*" => Some(ArithmeticOperator::Multiply),
            "divided by" | "/" => Some(ArithmeticOperator::Divide),
            verb => ArithmeticOperator::iter().find(|operator| operator.to_string() == verb),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum Comparator {
    #[strum(serialize = "greater than")]
    GreaterThan,
    #[strum(serialize = "less than")]
    LessThan,
    #[strum(serialize = "equals")]
    Equals,
}

impl Comparator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::GreaterThan => ">",
            Comparator::LessThan => "<",
            Comparator::Equals => "==",
        }
    }
    /// Exact keyword lookup, ignoring case and repeated whitespace.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let keyword = normalize_keyword(keyword);
        Comparator::iter().find(|comparator| comparator.to_string() == keyword)
    }
}

fn normalize_keyword(keyword: &str) -> String {
    keyword
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Print a token that is resolved to a literal or a reference when emitted.
    Print(String),
    /// A simple statement that is already valid in the target grammar.
    Raw(String),
}

impl Action {
    pub fn pass() -> Self {
        Action::Raw(String::from("pass"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub name: Name,
    pub value: Literal,
}

/// Binary arithmetic; operands are stored in evaluation order (`lhs <op> rhs`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arithmetic {
    pub operator: ArithmeticOperator,
    pub lhs: Operand,
    pub rhs: Operand,
    pub destination: Name,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditional {
    pub lhs: Operand,
    pub comparator: Comparator,
    pub rhs: Operand,
    pub then_action: Action,
    pub else_action: Option<Action>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopKind {
    Repeat { count: u64 },
    ForEach { item: Name, collection: Name },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loop {
    pub kind: LoopKind,
    pub body: Action,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionKind {
    List,
    Dict,
}

impl CollectionKind {
    pub fn target_name(&self) -> &'static str {
        match self {
            CollectionKind::List => "new_list",
            CollectionKind::Dict => "new_dict",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub key: Option<String>,
    pub value: Literal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionLiteral {
    pub kind: CollectionKind,
    pub elements: Vec<Element>,
}

impl CollectionLiteral {
    pub fn list(values: Vec<Literal>) -> Self {
        CollectionLiteral {
            kind: CollectionKind::List,
            elements: values
                .into_iter()
                .map(|value| Element { key: None, value })
                .collect(),
        }
    }
    pub fn dict(pairs: Vec<(String, Literal)>) -> Self {
        CollectionLiteral {
            kind: CollectionKind::Dict,
            elements: pairs
                .into_iter()
                .map(|(key, value)| Element {
                    key: Some(key),
                    value,
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionOperationKind {
    Append,
    Remove,
    /// Read one element into `destination`.
    Get { destination: Name },
}

/// An operation on an existing list or dictionary, such as `numbers.append(5)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionOperation {
    pub kind: CollectionOperationKind,
    pub collection: Name,
    pub value: Literal,
}

#[derive(Clone, Debug, PartialEq, Eq, FromVariants, Serialize, Deserialize)]
pub enum Instruction {
    Assignment(Assignment),
    Arithmetic(Arithmetic),
    Conditional(Conditional),
    Loop(Loop),
    CollectionLiteral(CollectionLiteral),
    CollectionOperation(CollectionOperation),
}

impl Instruction {
    /// The identifier this instruction adds to the session, if any.
    pub fn declared_name(&self) -> Option<&Name> {
        match self {
            Instruction::Assignment(Assignment { name, .. }) => Some(name),
            Instruction::Arithmetic(Arithmetic { destination, .. }) => Some(destination),
            Instruction::CollectionOperation(CollectionOperation {
                kind: CollectionOperationKind::Get { destination },
                ..
            }) => Some(destination),
            Instruction::Conditional(_)
            | Instruction::Loop(_)
            | Instruction::CollectionLiteral(_)
            | Instruction::CollectionOperation(_) => None,
        }
    }
}
