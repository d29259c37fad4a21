use std::fmt;

use parsing::{is_identifier, Name};

use crate::{quote, Scope};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Reference(Name),
    Boolean(bool),
    Text(String),
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Reference(name) => write!(f, "{name}"),
            Resolution::Boolean(true) => write!(f, "True"),
            Resolution::Boolean(false) => write!(f, "False"),
            Resolution::Text(text) => write!(f, "{}", quote(text)),
        }
    }
}

pub struct ActionResolver {}

impl ActionResolver {
    /// Decide whether a free-form token is a reference to a declared name or literal text.
    ///
    /// Nothing is cached: the answer depends on the scope at the moment of the call.
    pub fn resolve(token: &str, scope: &Scope) -> Resolution {
        let token = token.trim();
        match token.to_lowercase().as_str() {
            "true" => return Resolution::Boolean(true),
            "false" => return Resolution::Boolean(false),
            _ => {}
        }
        if is_identifier(token) && scope.is_known(token) {
            return Resolution::Reference(Name::from(token));
        }
        let text = token
            .strip_prefix('"')
            .and_then(|token| token.strip_suffix('"'))
            .unwrap_or(token);
        Resolution::Text(String::from(text))
    }
}
