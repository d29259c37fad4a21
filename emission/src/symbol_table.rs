use std::collections::HashSet;

use itertools::Itertools;
use parsing::Name;

/// Identifiers declared so far in one translation session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolTable {
    names: HashSet<Name>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            names: HashSet::new(),
        }
    }
    /// Returns whether the name was newly declared; redeclaring is not an error.
    pub fn declare(&mut self, name: &str) -> bool {
        self.names.insert(Name::from(name))
    }
    pub fn is_known(&self, name: &str) -> bool {
        self.names.contains(name)
    }
    pub fn len(&self) -> usize {
        self.names.len()
    }
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
    pub fn names(&self) -> Vec<&Name> {
        self.names.iter().sorted().collect()
    }
    pub fn scope(&self) -> Scope<'_> {
        Scope {
            symbol_table: self,
            bound: Vec::new(),
        }
    }
}

/// The session's names plus names bound by an enclosing block, such as a loop variable.
#[derive(Clone, Debug)]
pub struct Scope<'a> {
    symbol_table: &'a SymbolTable,
    bound: Vec<&'a str>,
}

impl<'a> Scope<'a> {
    pub fn bind(&self, name: &'a str) -> Scope<'a> {
        let mut bound = self.bound.clone();
        bound.push(name);
        Scope {
            symbol_table: self.symbol_table,
            bound,
        }
    }
    pub fn is_known(&self, name: &str) -> bool {
        self.bound.iter().any(|bound| *bound == name) || self.symbol_table.is_known(name)
    }
}
