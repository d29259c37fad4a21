use std::fmt;

use itertools::Itertools;
use parsing::is_keyword;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    /// 1-based line of the generated code.
    pub line: usize,
    pub message: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for SyntaxError {}

const SYMBOLS: [&str; 21] = [
    "==", "!=", "<=", ">=", "(", ")", "[", "]", "{", "}", ",", ":", "=", "<", ">", "+", "-", "*",
    "/", "%", ".",
];
const COMPARISONS: [&str; 6] = ["==", "!=", "<", ">", "<=", ">="];
/// Keywords that are values rather than statement syntax.
const CONSTANTS: [&str; 3] = ["True", "False", "None"];

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Name(String),
    Number,
    Text,
    Symbol(&'static str),
}

impl Token {
    fn is_symbol(&self, symbol: &str) -> bool {
        matches!(self, Token::Symbol(s) if *s == symbol)
    }
    fn is_name(&self, name: &str) -> bool {
        matches!(self, Token::Name(n) if n == name)
    }
}

fn tokenize(text: &str, line: usize) -> Result<Vec<Token>, SyntaxError> {
    let error = |message: String| SyntaxError { line, message };
    let chars = text.chars().collect_vec();
    let mut tokens = Vec::new();
    let mut position = 0;
    while position < chars.len() {
        let c = chars[position];
        if c == '#' {
            break;
        } else if c.is_whitespace() {
            position += 1;
        } else if c == '"' || c == '\'' {
            position += 1;
            loop {
                match chars.get(position) {
                    None => return Err(error(String::from("unterminated string literal"))),
                    Some('\\') => position += 2,
                    Some(&q) if q == c => break,
                    Some(_) => position += 1,
                }
            }
            position += 1;
            tokens.push(Token::Text);
        } else if c.is_ascii_digit() {
            let start = position;
            while position < chars.len() && (chars[position].is_ascii_digit() || chars[position] == '.') {
                position += 1;
            }
            if chars.get(position).is_some_and(|c| c.is_alphanumeric() || *c == '_') {
                return Err(error(String::from("invalid number literal")));
            }
            let digits = &chars[start..position];
            let points = digits.iter().filter(|c| **c == '.').count();
            // Integers may not have leading zeros, except for zero itself.
            let leading_zero = points == 0
                && digits.len() > 1
                && digits[0] == '0'
                && digits.iter().any(|c| *c != '0');
            if points > 1 || leading_zero {
                return Err(error(String::from("invalid number literal")));
            }
            tokens.push(Token::Number);
        } else if c.is_alphabetic() || c == '_' {
            let start = position;
            while position < chars.len() && (chars[position].is_alphanumeric() || chars[position] == '_') {
                position += 1;
            }
            tokens.push(Token::Name(chars[start..position].iter().collect()));
        } else {
            let rest: String = chars[position..].iter().take(2).collect();
            let symbol = SYMBOLS
                .iter()
                .find(|symbol| rest.starts_with(*symbol))
                .ok_or_else(|| error(format!("unexpected character '{c}'")))?;
            position += symbol.chars().count();
            tokens.push(Token::Symbol(*symbol));
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
    line: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], line: usize) -> Self {
        Parser {
            tokens,
            position: 0,
            line,
        }
    }
    fn error(&self, message: &str) -> SyntaxError {
        SyntaxError {
            line: self.line,
            message: String::from(message),
        }
    }
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }
    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.position);
        self.position += 1;
        token
    }
    fn accept(&mut self, symbol: &str) -> bool {
        if self.peek().is_some_and(|token| token.is_symbol(symbol)) {
            self.position += 1;
            true
        } else {
            false
        }
    }
    fn expect(&mut self, symbol: &str) -> Result<(), SyntaxError> {
        if self.accept(symbol) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{symbol}'")))
        }
    }
    fn expect_end(&self) -> Result<(), SyntaxError> {
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(self.error("unexpected trailing tokens")),
        }
    }
    fn expression(&mut self) -> Result<(), SyntaxError> {
        self.arithmetic()?;
        while COMPARISONS.iter().any(|symbol| self.accept(symbol)) {
            self.arithmetic()?;
        }
        Ok(())
    }
    fn arithmetic(&mut self) -> Result<(), SyntaxError> {
        self.term()?;
        while self.accept("+") || self.accept("-") {
            self.term()?;
        }
        Ok(())
    }
    fn term(&mut self) -> Result<(), SyntaxError> {
        self.unary()?;
        while self.accept("*") || self.accept("/") || self.accept("%") {
            self.unary()?;
        }
        Ok(())
    }
    fn unary(&mut self) -> Result<(), SyntaxError> {
        if self.accept("+") || self.accept("-") {
            self.unary()
        } else {
            self.postfix()
        }
    }
    fn postfix(&mut self) -> Result<(), SyntaxError> {
        self.atom()?;
        loop {
            if self.accept("(") {
                self.sequence(")", false)?;
            } else if self.accept("[") {
                self.expression()?;
                self.expect("]")?;
            } else if self.accept(".") {
                self.name()?;
            } else {
                return Ok(());
            }
        }
    }
    fn name(&mut self) -> Result<(), SyntaxError> {
        match self.advance() {
            Some(Token::Name(name)) if !is_keyword(name) => Ok(()),
            _ => Err(self.error("expected a name")),
        }
    }
    fn atom(&mut self) -> Result<(), SyntaxError> {
        match self.advance() {
            Some(Token::Name(name)) if !is_keyword(name) || CONSTANTS.contains(&name.as_str()) => {
                Ok(())
            }
            Some(Token::Number | Token::Text) => Ok(()),
            Some(Token::Symbol("(")) => {
                self.expression()?;
                self.expect(")")
            }
            Some(Token::Symbol("[")) => self.sequence("]", false),
            Some(Token::Symbol("{")) => self.sequence("}", true),
            Some(Token::Name(name)) => Err(self.error(&format!("unexpected keyword '{name}'"))),
            Some(_) => Err(self.error("expected an expression")),
            None => Err(self.error("unexpected end of line")),
        }
    }
    /// Comma-separated items up to the closing symbol, as in calls and collection literals.
    fn sequence(&mut self, close: &str, pairs: bool) -> Result<(), SyntaxError> {
        loop {
            if self.accept(close) {
                return Ok(());
            }
            self.expression()?;
            if pairs {
                self.expect(":")?;
                self.expression()?;
            }
            if !self.accept(",") {
                return self.expect(close);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineKind {
    Simple,
    If,
    Loop,
    Else,
}

impl LineKind {
    fn opens_block(&self) -> bool {
        !matches!(self, LineKind::Simple)
    }
}

fn check_header(parser: &mut Parser) -> Result<(), SyntaxError> {
    parser.expect(":")?;
    parser.expect_end()
}

fn check_line(tokens: &[Token], line: usize) -> Result<LineKind, SyntaxError> {
    let mut parser = Parser::new(tokens, line);
    let kind = match tokens {
        [] => return Err(parser.error("empty statement")),
        [Token::Name(keyword), ..] if keyword == "if" || keyword == "while" => {
            parser.position = 1;
            parser.expression()?;
            check_header(&mut parser)?;
            if keyword == "if" {
                LineKind::If
            } else {
                LineKind::Loop
            }
        }
        [Token::Name(keyword), ..] if keyword == "elif" => {
            parser.position = 1;
            parser.expression()?;
            check_header(&mut parser)?;
            LineKind::If
        }
        [Token::Name(keyword), ..] if keyword == "else" => {
            parser.position = 1;
            check_header(&mut parser)?;
            LineKind::Else
        }
        [Token::Name(keyword), ..] if keyword == "for" => {
            parser.position = 1;
            parser.name()?;
            match parser.advance() {
                Some(token) if token.is_name("in") => {}
                _ => return Err(parser.error("expected 'in'")),
            }
            parser.expression()?;
            check_header(&mut parser)?;
            LineKind::Loop
        }
        [Token::Name(keyword)] if ["pass", "break", "continue"].contains(&keyword.as_str()) => {
            LineKind::Simple
        }
        [Token::Name(_), Token::Symbol("="), ..] => {
            parser.name()?;
            parser.expect("=")?;
            parser.expression()?;
            parser.expect_end()?;
            LineKind::Simple
        }
        _ => {
            parser.expression()?;
            parser.expect_end()?;
            LineKind::Simple
        }
    };
    Ok(kind)
}

/// A block-structure and expression check over the subset of the target language that is emitted.
pub fn check_syntax(code: &str) -> Result<(), SyntaxError> {
    // Indentation of each open block paired with the kind of its most recent statement.
    let mut blocks: Vec<(usize, Option<LineKind>)> = vec![(0, None)];
    let mut expecting_block = false;
    let mut last_line = 0;
    for (index, text) in code.lines().enumerate() {
        let line = index + 1;
        let error = |message: &str| SyntaxError {
            line,
            message: String::from(message),
        };
        let content = text.trim_start();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }
        last_line = line;
        let indentation = &text[..text.len() - content.len()];
        if indentation.contains('\t') {
            return Err(error("tabs are not allowed in indentation"));
        }
        let depth = indentation.len();
        let current = blocks.last().map_or(0, |(depth, _)| *depth);
        if expecting_block {
            if depth <= current {
                return Err(error("expected an indented block"));
            }
            blocks.push((depth, None));
            expecting_block = false;
        } else if depth > current {
            return Err(error("unexpected indent"));
        } else {
            while blocks.last().is_some_and(|(open, _)| *open > depth) {
                blocks.pop();
            }
            if blocks.last().map_or(true, |(open, _)| *open != depth) {
                return Err(error("unindent does not match any outer indentation level"));
            }
        }
        let tokens = tokenize(content, line)?;
        let kind = check_line(&tokens, line)?;
        let Some((_, previous)) = blocks.last_mut() else {
            return Err(error("unindent does not match any outer indentation level"));
        };
        let is_elif = tokens.first().is_some_and(|token| token.is_name("elif"));
        match (kind, *previous) {
            (LineKind::If, Some(LineKind::If)) if is_elif => {}
            (LineKind::If, _) if is_elif => return Err(error("'elif' without a matching 'if'")),
            (LineKind::Else, Some(LineKind::If | LineKind::Loop)) => {}
            (LineKind::Else, _) => return Err(error("'else' without a matching block")),
            _ => {}
        }
        *previous = Some(kind);
        expecting_block = kind.opens_block();
    }
    if expecting_block {
        return Err(SyntaxError {
            line: last_line,
            message: String::from("expected an indented block"),
        });
    }
    Ok(())
}
