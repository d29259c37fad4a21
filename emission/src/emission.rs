use itertools::Itertools;
use parsing::{
    is_identifier, Action, Arithmetic, Assignment, Boolean, CollectionKind, CollectionLiteral,
    CollectionOperation, CollectionOperationKind, Conditional, Element, Instruction, Literal,
    Loop, LoopKind, Number, Operand,
};

use crate::{ActionResolver, Scope, SymbolTable};

pub type Code = String;

pub const INDENT: &str = "    ";

/// Render text as a double-quoted string literal.
pub fn quote(text: &str) -> Code {
    let escaped: String = text
        .chars()
        .map(|c| match c {
            '\\' => String::from("\\\\"),
            '"' => String::from("\\\""),
            '\n' => String::from("\\n"),
            '\r' => String::from("\\r"),
            '\t' => String::from("\\t"),
            c => c.to_string(),
        })
        .collect();
    format!("\"{escaped}\"")
}

pub struct Emitter<'a> {
    symbol_table: &'a SymbolTable,
}

impl<'a> Emitter<'a> {
    fn line(&self, indentation: usize, code: Code) -> Code {
        format!("{}{code}", INDENT.repeat(indentation))
    }
    fn emit_literal(&self, literal: &Literal) -> Code {
        match literal {
            Literal::Number(Number { value }) => value.clone(),
            Literal::Boolean(Boolean { value: true }) => Code::from("True"),
            Literal::Boolean(Boolean { value: false }) => Code::from("False"),
            Literal::Text(text) => quote(text),
        }
    }
    /// Operands in positions that always denote a variable, such as arithmetic operands.
    fn emit_direct_operand(&self, operand: &Operand) -> Code {
        match operand {
            Operand::Literal(literal) => self.emit_literal(literal),
            Operand::Word(name) => name.clone(),
        }
    }
    fn emit_resolved_operand(&self, operand: &Operand, scope: &Scope) -> Code {
        match operand {
            Operand::Literal(literal) => self.emit_literal(literal),
            Operand::Word(word) => ActionResolver::resolve(word, scope).to_string(),
        }
    }
    fn emit_action(&self, action: &Action, indentation: usize, scope: &Scope) -> Code {
        let code = match action {
            Action::Print(token) => {
                format!("print({})", ActionResolver::resolve(token, scope))
            }
            Action::Raw(statement) => statement.clone(),
        };
        self.line(indentation, code)
    }
    /// Values that name a declared variable refer to it; anything else is a literal.
    fn emit_value(&self, value: &Literal) -> Code {
        match value {
            Literal::Text(text) if is_identifier(text) && self.symbol_table.is_known(text) => {
                text.clone()
            }
            value => self.emit_literal(value),
        }
    }
    fn emit_assignment(&self, assignment: &Assignment, indentation: usize) -> Code {
        let Assignment { name, value } = assignment;
        self.line(indentation, format!("{name} = {}", self.emit_value(value)))
    }
    fn emit_arithmetic(&self, arithmetic: &Arithmetic, indentation: usize) -> Code {
        let Arithmetic {
            operator,
            lhs,
            rhs,
            destination,
        } = arithmetic;
        self.line(
            indentation,
            format!(
                "{destination} = {} {} {}",
                self.emit_direct_operand(lhs),
                operator.symbol(),
                self.emit_direct_operand(rhs)
            ),
        )
    }
    fn emit_conditional(&self, conditional: &Conditional, indentation: usize) -> Code {
        let scope = self.symbol_table.scope();
        let header = format!(
            "if {} {} {}:",
            self.emit_direct_operand(&conditional.lhs),
            conditional.comparator.symbol(),
            self.emit_resolved_operand(&conditional.rhs, &scope)
        );
        let mut lines = vec![
            self.line(indentation, header),
            self.emit_action(&conditional.then_action, indentation + 1, &scope),
        ];
        if let Some(else_action) = &conditional.else_action {
            lines.push(self.line(indentation, Code::from("else:")));
            lines.push(self.emit_action(else_action, indentation + 1, &scope));
        }
        lines.join("\n")
    }
    fn emit_loop(&self, loop_: &Loop, indentation: usize) -> Code {
        let scope = self.symbol_table.scope();
        let (header, body_scope) = match &loop_.kind {
            LoopKind::Repeat { count } => (format!("for _ in range({count}):"), scope),
            LoopKind::ForEach { item, collection } => {
                (format!("for {item} in {collection}:"), scope.bind(item))
            }
        };
        format!(
            "{}\n{}",
            self.line(indentation, header),
            self.emit_action(&loop_.body, indentation + 1, &body_scope)
        )
    }
    fn emit_element(&self, element: &Element) -> Code {
        let value = self.emit_literal(&element.value);
        match &element.key {
            Some(key) => format!("{}: {value}", quote(key)),
            None => value,
        }
    }
    fn emit_collection(&self, collection: &CollectionLiteral, indentation: usize) -> Code {
        let elements = collection
            .elements
            .iter()
            .map(|element| self.emit_element(element))
            .join(", ");
        let literal = match collection.kind {
            CollectionKind::List => format!("[{elements}]"),
            CollectionKind::Dict => format!("{{{elements}}}"),
        };
        self.line(
            indentation,
            format!("{} = {literal}", collection.kind.target_name()),
        )
    }
    fn emit_collection_operation(
        &self,
        operation: &CollectionOperation,
        indentation: usize,
    ) -> Code {
        let CollectionOperation {
            kind,
            collection,
            value,
        } = operation;
        let value = self.emit_value(value);
        let code = match kind {
            CollectionOperationKind::Append => format!("{collection}.append({value})"),
            CollectionOperationKind::Remove => format!("{collection}.remove({value})"),
            CollectionOperationKind::Get { destination } => {
                format!("{destination} = {collection}[{value}]")
            }
        };
        self.line(indentation, code)
    }
    fn emit_instruction(&self, instruction: &Instruction, indentation: usize) -> Code {
        match instruction {
            Instruction::Assignment(assignment) => self.emit_assignment(assignment, indentation),
            Instruction::Arithmetic(arithmetic) => self.emit_arithmetic(arithmetic, indentation),
            Instruction::Conditional(conditional) => {
                self.emit_conditional(conditional, indentation)
            }
            Instruction::Loop(loop_) => self.emit_loop(loop_, indentation),
            Instruction::CollectionLiteral(collection) => {
                self.emit_collection(collection, indentation)
            }
            Instruction::CollectionOperation(operation) => {
                self.emit_collection_operation(operation, indentation)
            }
        }
    }
    /// Render one instruction against the symbol table as it stands right now.
    pub fn emit(instruction: &Instruction, symbol_table: &SymbolTable) -> Code {
        let emitter = Emitter { symbol_table };
        emitter.emit_instruction(instruction, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::check_syntax;
    use parsing::{ArithmeticOperator, Comparator, Name, PatternMatcher};
    use test_case::test_case;

    fn declared(names: &[&str]) -> SymbolTable {
        let mut symbol_table = SymbolTable::new();
        for name in names {
            symbol_table.declare(name);
        }
        symbol_table
    }

    fn emit_statement(statement: &str, symbol_table: &SymbolTable) -> Code {
        let instruction = PatternMatcher::match_statement(statement)
            .expect("statement should be recognized");
        Emitter::emit(&instruction, symbol_table)
    }

    #[test_case("plain", r#""plain""#; "plain text")]
    #[test_case(r#"a "b" c"#, r#""a \"b\" c""#; "inner quotes")]
    #[test_case(r"back\slash", r#""back\\slash""#; "backslash")]
    #[test_case("tab\there", r#""tab\there""#; "tab")]
    #[test_case("", r#""""#; "empty")]
    fn test_quote(text: &str, expected: &str) {
        assert_eq!(quote(text), expected)
    }

    #[test_case("set age to 25", "age = 25"; "number assignment")]
    #[test_case("set name to John", "name = \"John\""; "text assignment")]
    #[test_case("set ready to TRUE", "ready = True"; "boolean assignment")]
    #[test_case("assign false to done", "done = False"; "assign boolean")]
    #[test_case("create variable pi with value 3.14", "pi = 3.14"; "create variable")]
    #[test_case("add 10 and 5", "result = 10 + 5"; "add")]
    #[test_case("subtract 5 from 20", "result = 20 - 5"; "subtract")]
    #[test_case("multiply x by 2", "result = x * 2"; "multiply")]
    #[test_case("divide 9 by 3", "result = 9 / 3"; "divide")]
    #[test_case("a minus b", "result = a - b"; "minus")]
    #[test_case(
        "if age greater than 18 then print adult",
        "if age > 18:\n    print(\"adult\")";
        "if then"
    )]
    #[test_case(
        "if score less than 60 then print fail else print pass",
        "if score < 60:\n    print(\"fail\")\nelse:\n    print(\"pass\")";
        "if then else"
    )]
    #[test_case(
        "when name equals Bob do print hello",
        "if name == \"Bob\":\n    print(\"hello\")";
        "text comparison"
    )]
    #[test_case(
        "if done equals true then print finished",
        "if done == True:\n    print(\"finished\")";
        "boolean comparison"
    )]
    #[test_case(
        "repeat 3 times print hello",
        "for _ in range(3):\n    print(\"hello\")";
        "repeat"
    )]
    #[test_case("repeat 2 times", "for _ in range(2):\n    pass"; "repeat without body")]
    #[test_case(
        "for each item in numbers print item",
        "for item in numbers:\n    print(item)";
        "for each binds item"
    )]
    #[test_case("create list with 1, two, true", "new_list = [1, \"two\", True]"; "list")]
    #[test_case("create list", "new_list = []"; "empty list")]
    #[test_case(
        "create dictionary with name John and age 25",
        "new_dict = {\"name\": \"John\", \"age\": 25}";
        "dict"
    )]
    #[test_case("create dict", "new_dict = {}"; "empty dict")]
    #[test_case("set x to 007", "x = \"007\""; "leading zeros quoted")]
    #[test_case("create list with 09, 0", "new_list = [\"09\", 0]"; "leading zeros in list")]
    #[test_case("x = 5", "x = 5"; "equals sign")]
    #[test_case("sum 4 and 6", "result = 4 + 6"; "sum")]
    #[test_case("calculate the sum of a and b", "result = a + b"; "calculate the sum of")]
    #[test_case("7*6", "result = 7 * 6"; "symbolic")]
    #[test_case("x = a / b", "x = a / b"; "symbolic with destination")]
    #[test_case("add 5 to list numbers", "numbers.append(5)"; "append")]
    #[test_case("remove apple from fruits", "fruits.remove(\"apple\")"; "remove")]
    #[test_case("get 0 from numbers", "item = numbers[0]"; "get index")]
    #[test_case("get name from person", "item = person[\"name\"]"; "get key")]
    fn test_emit_with_empty_symbol_table(statement: &str, expected: &str) {
        assert_eq!(emit_statement(statement, &SymbolTable::new()), expected)
    }

    #[test_case(
        "if x greater than 0 then print x",
        &["x"],
        "if x > 0:\n    print(x)";
        "declared print token"
    )]
    #[test_case(
        "if x greater than 0 then print x",
        &[],
        "if x > 0:\n    print(\"x\")";
        "undeclared print token"
    )]
    #[test_case(
        "if a equals b then print a else print b",
        &["a", "b"],
        "if a == b:\n    print(a)\nelse:\n    print(b)";
        "declared operands"
    )]
    #[test_case("set copy to original", &["original"], "copy = original"; "declared assignment value")]
    #[test_case("set copy to original", &[], "copy = \"original\""; "undeclared assignment value")]
    #[test_case("add x to list numbers", &["x"], "numbers.append(x)"; "declared appended value")]
    #[test_case("get key from table", &["key"], "item = table[key]"; "declared lookup key")]
    fn test_emit_with_declarations(statement: &str, names: &[&str], expected: &str) {
        assert_eq!(emit_statement(statement, &declared(names)), expected)
    }

    #[test]
    fn test_emit_nested_indentation() {
        let emitter = Emitter {
            symbol_table: &SymbolTable::new(),
        };
        let conditional = Conditional {
            lhs: Operand::Word(Name::from("x")),
            comparator: Comparator::GreaterThan,
            rhs: Number::new("1").into(),
            then_action: Action::pass(),
            else_action: Some(Action::pass()),
        };
        assert_eq!(
            emitter.emit_instruction(&conditional.into(), 1),
            "    if x > 1:\n        pass\n    else:\n        pass"
        );
    }

    #[test]
    fn test_emit_constructed_arithmetic() {
        let arithmetic = Arithmetic {
            operator: ArithmeticOperator::Divide,
            lhs: Operand::Word(Name::from("total")),
            rhs: Number::new("0").into(),
            destination: Name::from("result"),
        };
        assert_eq!(
            Emitter::emit(&arithmetic.into(), &SymbolTable::new()),
            "result = total / 0"
        );
    }

    /// One statement per rule of the matcher, each exercising a different capture shape.
    #[test_case("if x greater than 1 then print x else print y"; "if then else")]
    #[test_case("when x equals \"a b\" do print done else pass"; "when do else")]
    #[test_case("if flag equals false then show(flag)"; "if then raw call")]
    #[test_case("when x less than -3 do print \"quoted\""; "when do")]
    #[test_case("when x equals y then print it's \"odd\""; "when then with quotes")]
    #[test_case("add a and 2.5"; "add")]
    #[test_case("subtract b from a"; "subtract")]
    #[test_case("multiply 3 and 4"; "multiply")]
    #[test_case("divide a by b"; "divide")]
    #[test_case("calculate x plus y"; "plus")]
    #[test_case("7 divided by 2"; "divided by")]
    #[test_case("set s to back\\slash \"quote\""; "set text with escapes")]
    #[test_case("create variable v with value +12"; "create variable")]
    #[test_case("assign hello there to greeting"; "assign")]
    #[test_case("create list with \"a\", b and 3"; "list")]
    #[test_case("create dictionary with 'k': v, n=1"; "dict")]
    #[test_case("repeat 10 times: print tick"; "repeat")]
    #[test_case("for each word in words print word"; "for each")]
    #[test_case("set x to 007"; "leading zeros")]
    #[test_case("calculate the sum of x and 1"; "sum of")]
    #[test_case("a - 0.5"; "symbolic")]
    #[test_case("y = x * b"; "symbolic with destination")]
    #[test_case("z = \"a b\""; "equals sign")]
    #[test_case("add it to list xs"; "append")]
    #[test_case("remove \"q\" from xs"; "remove")]
    #[test_case("get 1 from xs"; "get")]
    fn test_emitted_code_is_valid_syntax(statement: &str) {
        for names in [&[][..], &["x", "y", "a", "b", "flag", "it"][..]] {
            let code = emit_statement(statement, &declared(names));
            assert_eq!(check_syntax(&code), Ok(()), "{code}");
        }
    }
}
