mod action_resolver;
mod emission;
mod symbol_table;
mod syntax_checker;

pub use action_resolver::{ActionResolver, Resolution};
pub use emission::{quote, Code, Emitter, INDENT};
pub use symbol_table::{Scope, SymbolTable};
pub use syntax_checker::{check_syntax, SyntaxError};
