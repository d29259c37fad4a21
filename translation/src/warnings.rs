use emission::{ActionResolver, Resolution, Scope, SymbolTable};
use log::warn;
use parsing::{
    is_identifier, Action, Arithmetic, ArithmeticOperator, CollectionOperation, Conditional,
    Instruction, Literal, Loop, LoopKind, Name, Number, Operand,
};
use strum_macros::Display;

pub const MAX_REPEAT_COUNT: u64 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum WarningKind {
    DivisionByZero,
    LargeRepeat,
    UndeclaredVariable,
    TextFallback,
}

impl WarningKind {
    pub fn severity(&self) -> Severity {
        match self {
            WarningKind::DivisionByZero | WarningKind::UndeclaredVariable => Severity::High,
            WarningKind::LargeRepeat => Severity::Medium,
            WarningKind::TextFallback => Severity::Low,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationWarning {
    pub kind: WarningKind,
    pub severity: Severity,
    pub statement_index: usize,
    pub message: String,
}

struct WarningCollector<'a> {
    statement_index: usize,
    symbol_table: &'a SymbolTable,
    warnings: Vec<TranslationWarning>,
}

impl<'a> WarningCollector<'a> {
    fn push(&mut self, kind: WarningKind, message: String) {
        warn!("statement {}: {message}", self.statement_index);
        self.warnings.push(TranslationWarning {
            kind,
            severity: kind.severity(),
            statement_index: self.statement_index,
            message,
        });
    }
    fn check_variable(&mut self, name: &Name, scope: &Scope) {
        if !scope.is_known(name) {
            self.push(
                WarningKind::UndeclaredVariable,
                format!("'{name}' is used as a variable before it is set"),
            );
        }
    }
    fn check_operand(&mut self, operand: &Operand, scope: &Scope) {
        if let Operand::Word(name) = operand {
            self.check_variable(name, scope);
        }
    }
    fn check_action(&mut self, action: &Action, scope: &Scope) {
        let Action::Print(token) = action else {
            return;
        };
        let token = token.trim();
        if is_identifier(token)
            && matches!(ActionResolver::resolve(token, scope), Resolution::Text(_))
        {
            self.push(
                WarningKind::TextFallback,
                format!("'{token}' is not a variable yet, so it is printed as text"),
            );
        }
    }
    fn check_arithmetic(&mut self, arithmetic: &Arithmetic) {
        let scope = self.symbol_table.scope();
        self.check_operand(&arithmetic.lhs, &scope);
        self.check_operand(&arithmetic.rhs, &scope);
        if let (ArithmeticOperator::Divide, Operand::Literal(Literal::Number(divisor))) =
            (arithmetic.operator, &arithmetic.rhs)
        {
            if Number::is_zero(divisor) {
                self.push(
                    WarningKind::DivisionByZero,
                    String::from("division by zero will fail when the code runs"),
                );
            }
        }
    }
    fn check_conditional(&mut self, conditional: &Conditional) {
        let scope = self.symbol_table.scope();
        self.check_operand(&conditional.lhs, &scope);
        self.check_action(&conditional.then_action, &scope);
        if let Some(else_action) = &conditional.else_action {
            self.check_action(else_action, &scope);
        }
    }
    fn check_loop(&mut self, loop_: &Loop) {
        let scope = self.symbol_table.scope();
        match &loop_.kind {
            LoopKind::Repeat { count } => {
                if *count > MAX_REPEAT_COUNT {
                    self.push(
                        WarningKind::LargeRepeat,
                        format!("repeating {count} times may take a long time"),
                    );
                }
                self.check_action(&loop_.body, &scope);
            }
            LoopKind::ForEach { item, collection } => {
                self.check_variable(collection, &scope);
                self.check_action(&loop_.body, &scope.bind(item));
            }
        }
    }
    fn check_collection_operation(&mut self, operation: &CollectionOperation) {
        let scope = self.symbol_table.scope();
        self.check_variable(&operation.collection, &scope);
    }
}

/// Runtime risks of one statement, judged before the statement declares anything.
pub fn check_instruction(
    instruction: &Instruction,
    statement_index: usize,
    symbol_table: &SymbolTable,
) -> Vec<TranslationWarning> {
    let mut collector = WarningCollector {
        statement_index,
        symbol_table,
        warnings: Vec::new(),
    };
    match instruction {
        Instruction::Arithmetic(arithmetic) => collector.check_arithmetic(arithmetic),
        Instruction::Conditional(conditional) => collector.check_conditional(conditional),
        Instruction::Loop(loop_) => collector.check_loop(loop_),
        Instruction::CollectionOperation(operation) => {
            collector.check_collection_operation(operation)
        }
        Instruction::Assignment(_) | Instruction::CollectionLiteral(_) => {}
    }
    collector.warnings
}
