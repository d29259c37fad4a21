use std::{
    fs,
    path::Path,
    sync::{Arc, Mutex},
};

use emission::{check_syntax, Code, Emitter, SymbolTable};
use log::{debug, info};
use parsing::{Instruction, PatternMatcher, StatementSplitter};

use crate::{
    validate_input, warnings::check_instruction, TranslationArgs, TranslationError,
    TranslationWarning,
};

/// How long declared names live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPolicy {
    /// Every call to `translate` starts with an empty symbol table.
    #[default]
    Fresh,
    /// Names declared by a successful call stay visible to later calls.
    Persistent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Translation {
    pub code: Code,
    pub instructions: Vec<Instruction>,
    pub warnings: Vec<TranslationWarning>,
}

impl Translation {
    /// Save the instructions as JSON.
    pub fn export(&self, filename: &str) -> Result<(), String> {
        let json = serde_json::to_string_pretty(&self.instructions).map_err(|e| e.to_string())?;
        fs::write(Path::new(filename), json).map_err(|e| e.to_string())
    }
}

/// Emit one instruction and check that the fragment parses on its own.
fn emit_checked(
    statement_index: usize,
    statement: &str,
    instruction: &Instruction,
    symbol_table: &SymbolTable,
) -> Result<Code, TranslationError> {
    let code = Emitter::emit(instruction, symbol_table);
    check_syntax(&code).map_err(|error| {
        TranslationError::invalid_output(statement_index, statement, &code, error)
    })?;
    Ok(code)
}

#[derive(Clone, Debug)]
pub struct Translator {
    policy: SessionPolicy,
    collect_warnings: bool,
    symbol_table: SymbolTable,
}

impl Translator {
    pub fn new(policy: SessionPolicy) -> Self {
        Translator {
            policy,
            collect_warnings: true,
            symbol_table: SymbolTable::new(),
        }
    }
    pub fn from_args(args: &TranslationArgs) -> Self {
        let policy = if args.persistent_session {
            SessionPolicy::Persistent
        } else {
            SessionPolicy::Fresh
        };
        Translator {
            collect_warnings: !args.no_warnings,
            ..Translator::new(policy)
        }
    }
    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }
    /// Names visible to the next call; always empty for a fresh session.
    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }
    pub fn reset(&mut self) {
        self.symbol_table = SymbolTable::new();
    }
    pub fn translate(&mut self, input: &str) -> Result<Code, TranslationError> {
        self.translate_report(input)
            .map(|translation| translation.code)
    }
    /// Translate every statement of the input, or none of them.
    pub fn translate_report(&mut self, input: &str) -> Result<Translation, TranslationError> {
        validate_input(input)?;
        let statements = StatementSplitter::split(input);
        if statements.is_empty() {
            return Err(TranslationError::empty_input(input));
        }
        let mut symbol_table = match self.policy {
            SessionPolicy::Fresh => SymbolTable::new(),
            SessionPolicy::Persistent => self.symbol_table.clone(),
        };
        let translation = self.translate_statements(&statements, &mut symbol_table)?;
        if self.policy == SessionPolicy::Persistent {
            self.symbol_table = symbol_table;
        }
        info!(
            "translated {} statement(s) with {} warning(s)",
            statements.len(),
            translation.warnings.len()
        );
        Ok(translation)
    }
    fn translate_statements(
        &self,
        statements: &[String],
        symbol_table: &mut SymbolTable,
    ) -> Result<Translation, TranslationError> {
        let mut instructions = Vec::new();
        let mut fragments = Vec::new();
        let mut warnings = Vec::new();
        for (index, statement) in (1..).zip(statements) {
            let instruction = PatternMatcher::match_statement(statement)
                .map_err(|error| TranslationError::unmatched(index, error))?;
            if self.collect_warnings {
                warnings.extend(check_instruction(&instruction, index, symbol_table));
            }
            fragments.push(emit_checked(index, statement, &instruction, symbol_table)?);
            if let Some(name) = instruction.declared_name() {
                if symbol_table.declare(name) {
                    debug!("declared '{name}'");
                }
            }
            instructions.push(instruction);
        }
        Ok(Translation {
            code: fragments.join("\n"),
            instructions,
            warnings,
        })
    }
}

/// A translator that several threads can use; each call holds the lock for its whole input.
#[derive(Clone, Debug)]
pub struct SharedTranslator {
    translator: Arc<Mutex<Translator>>,
}

impl SharedTranslator {
    pub fn new(translator: Translator) -> Self {
        SharedTranslator {
            translator: Arc::new(Mutex::new(translator)),
        }
    }
    pub fn translate(&self, input: &str) -> Result<Code, TranslationError> {
        self.translate_report(input)
            .map(|translation| translation.code)
    }
    pub fn translate_report(&self, input: &str) -> Result<Translation, TranslationError> {
        let mut translator = self
            .translator
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        translator.translate_report(input)
    }
    pub fn is_known(&self, name: &str) -> bool {
        self.translator
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .symbol_table()
            .is_known(name)
    }
}
