use crate::ast::{Expression, Program, Statement};
use crate::error::{CodegenError, CodegenResult};
use crate::symbol_table::{PrimitiveType, SymbolTable};

/// C type used when casting a runtime slot's raw data pointer.
fn c_cast(primitive_type: PrimitiveType) -> &'static str {
    match primitive_type {
        PrimitiveType::Int => "int",
    }
}

/// Lowers a parsed program into C statements against the slot runtime.
/// Pure with respect to its inputs: same tree and table, same output.
pub struct CCodeGen {
    symbol_table: SymbolTable,
}

impl CCodeGen {
    pub fn with_symbol_table(symbol_table: SymbolTable) -> Self {
        Self { symbol_table }
    }

    /// Emit the ordered top-level statements for one compilation unit,
    /// ready to be substituted into the runtime skeleton. Top-level
    /// statements are delimited with `;`; nested expressions are not.
    pub fn compile_program(&self, program: &Program) -> CodegenResult<String> {
        let mut result = String::new();
        result.push_str("// Entrypoint\n");

        for statement in &program.statements {
            result.push_str(&self.compile_statement(statement)?);
            result.push_str(";\n");
        }

        Ok(result)
    }

    fn compile_statement(&self, statement: &Statement) -> CodegenResult<String> {
        match statement {
            Statement::Assignment { name, value } => {
                let variable = self.symbol_table.lookup(name).ok_or_else(|| {
                    CodegenError::UndeclaredVariable { name: name.clone() }
                })?;
                let initializer = self.compile_expression(value)?;

                // Reserve the slot, then store the initializer into it.
                Ok(format!(
                    "create_variable({id}, {size});\n*(({cast}*)VARIABLES[{id}].data) = {init}",
                    id = variable.id,
                    size = variable.primitive_type.size_in_bytes(),
                    cast = c_cast(variable.primitive_type),
                    init = initializer,
                ))
            }
            Statement::Expression(expression) => self.compile_expression(expression),
        }
    }

    fn compile_expression(&self, expression: &Expression) -> CodegenResult<String> {
        match expression {
            Expression::IntegerLiteral(value) => Ok(value.to_string()),
            Expression::VariableRead { name, .. } => {
                // Resolved against the final table, like assignments, so a
                // read and the slot it targets can never disagree when a
                // name is redeclared.
                let variable = self.symbol_table.lookup(name).ok_or_else(|| {
                    CodegenError::UndeclaredVariable { name: name.clone() }
                })?;
                Ok(format!(
                    "*(({cast}*)VARIABLES[{id}].data)",
                    cast = c_cast(variable.primitive_type),
                    id = variable.id,
                ))
            }
            Expression::FunctionCall { callee, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.compile_expression(arg))
                    .collect::<CodegenResult<Vec<String>>>()?;
                Ok(format!("{}({})", callee, args.join(", ")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn compile(source: &str) -> CodegenResult<String> {
        let tokens = Lexer::new(source.to_string()).tokenize();
        let mut parser = Parser::new(tokens);
        let program = parser.parse().unwrap();
        let codegen = CCodeGen::with_symbol_table(parser.into_symbol_table());
        codegen.compile_program(&program)
    }

    #[test]
    fn test_integer_statement() {
        let code = compile("42").unwrap();
        assert_eq!(code, "// Entrypoint\n42;\n");
    }

    #[test]
    fn test_assignment_allocates_then_stores() {
        let code = compile("x : int = 5").unwrap();
        assert_eq!(
            code,
            "// Entrypoint\ncreate_variable(0, 8);\n*((int*)VARIABLES[0].data) = 5;\n"
        );
    }

    #[test]
    fn test_variable_read_dereferences_slot() {
        let code = compile("x : int = 5\nprint(x)").unwrap();
        assert!(code.ends_with("print(*((int*)VARIABLES[0].data));\n"));
    }

    #[test]
    fn test_nested_call_arguments_are_comma_joined() {
        let code = compile("print(add(1 2))").unwrap();
        assert_eq!(code, "// Entrypoint\nprint(add(1, 2));\n");
    }

    #[test]
    fn test_nested_expressions_carry_no_delimiter() {
        let code = compile("print(add(1 2))").unwrap();
        // Exactly one ';' for the single top-level statement.
        assert_eq!(code.matches(';').count(), 1);
    }

    #[test]
    fn test_read_follows_redeclaration() {
        let code = compile("x : int = 1\nprint(x)\nx : int = 2").unwrap();
        // Assignments and reads all resolve through the final table, so
        // everything targets the later slot and slot 0 is never touched.
        assert!(code.contains("print(*((int*)VARIABLES[1].data))"));
        assert!(!code.contains("VARIABLES[0]"));
    }

    #[test]
    fn test_end_to_end_two_statements() {
        let code = compile("x : int = 5\nprint(x)").unwrap();
        assert_eq!(
            code,
            "// Entrypoint\n\
             create_variable(0, 8);\n\
             *((int*)VARIABLES[0].data) = 5;\n\
             print(*((int*)VARIABLES[0].data));\n"
        );
    }
}
