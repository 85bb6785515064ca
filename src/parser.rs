use crate::ast::{Expression, Program, Statement};
use crate::error::{ParseError, ParseResult, SourceLocation};
use crate::lexer::{Token, TokenType};
use crate::symbol_table::{PrimitiveType, SymbolTable};

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    symbol_table: SymbolTable,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            symbol_table: SymbolTable::new(),
        }
    }

    /// Take ownership of the symbol table (consumes the parser)
    pub fn into_symbol_table(self) -> SymbolTable {
        self.symbol_table
    }

    pub fn parse(&mut self) -> ParseResult<Program> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(Program { statements })
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        // A literal followed by ':' starts a declaration; everything else
        // is an expression statement.
        if matches!(self.peek_type(0), Some(TokenType::Literal(_)))
            && matches!(self.peek_type(1), Some(TokenType::Colon))
        {
            self.parse_declaration()
        } else {
            Ok(Statement::Expression(self.parse_expression()?))
        }
    }

    /// `name : type = value`, where the value is a full expression.
    fn parse_declaration(&mut self) -> ParseResult<Statement> {
        let (name, _) = self.expect_literal("variable name")?;
        self.expect(&TokenType::Colon, "':'")?;

        let (type_name, type_location) = self.expect_literal("type name")?;
        let primitive_type = PrimitiveType::from_keyword(&type_name).ok_or(
            ParseError::UnknownType {
                name: type_name,
                location: type_location,
            },
        )?;

        self.expect(&TokenType::Equal, "'='")?;

        // The initializer is parsed before the name becomes visible, so
        // `x : int = x` cannot resolve to the variable being declared.
        let value = self.parse_expression()?;
        self.symbol_table.declare(name.clone(), primitive_type);

        Ok(Statement::Assignment { name, value })
    }

    /// Expression productions, tried in fixed priority order: integer
    /// literal, then variable read, then function call.
    fn parse_expression(&mut self) -> ParseResult<Expression> {
        let token = match self.peek() {
            Some(token) => token,
            None => {
                return Err(ParseError::UnexpectedEof {
                    expected: "expression".to_string(),
                    location: self.eof_location(),
                })
            }
        };
        let location = Self::location(token);

        let text = match &token.token_type {
            TokenType::Literal(text) => text.clone(),
            other => {
                return Err(ParseError::UnrecognizedToken {
                    found: other.to_string(),
                    location,
                })
            }
        };

        if text.chars().all(|c| c.is_ascii_digit()) {
            self.current += 1;
            let value = text.parse().map_err(|_| ParseError::InvalidNumber {
                value: text.clone(),
                location,
            })?;
            return Ok(Expression::IntegerLiteral(value));
        }

        if let Some(variable) = self.symbol_table.lookup(&text) {
            let id = variable.id;
            self.current += 1;
            return Ok(Expression::VariableRead { name: text, id });
        }

        if matches!(self.peek_type(1), Some(TokenType::LeftParen)) {
            return self.parse_function_call(text);
        }

        Err(ParseError::UndeclaredVariable {
            name: text,
            location,
        })
    }

    /// Arguments are whitespace-separated expressions; nested calls consume
    /// their own closing parenthesis.
    fn parse_function_call(&mut self, callee: String) -> ParseResult<Expression> {
        self.current += 1; // consume the callee literal
        let open_location = self.expect(&TokenType::LeftParen, "'('")?;

        let mut args = Vec::new();
        loop {
            match self.peek_type(0) {
                None => {
                    return Err(ParseError::UnbalancedParenthesis {
                        location: open_location,
                    })
                }
                Some(TokenType::RightParen) => {
                    self.current += 1;
                    break;
                }
                Some(_) => args.push(self.parse_expression()?),
            }
        }

        Ok(Expression::FunctionCall { callee, args })
    }

    fn expect(&mut self, expected: &TokenType, description: &str) -> ParseResult<SourceLocation> {
        match self.peek() {
            Some(token) if token.token_type == *expected => {
                let location = Self::location(token);
                self.current += 1;
                Ok(location)
            }
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: description.to_string(),
                found: token.token_type.to_string(),
                location: Self::location(token),
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: description.to_string(),
                location: self.eof_location(),
            }),
        }
    }

    fn expect_literal(&mut self, description: &str) -> ParseResult<(String, SourceLocation)> {
        match self.peek() {
            Some(token) => match &token.token_type {
                TokenType::Literal(text) => {
                    let result = (text.clone(), Self::location(token));
                    self.current += 1;
                    Ok(result)
                }
                other => Err(ParseError::UnexpectedToken {
                    expected: description.to_string(),
                    found: other.to_string(),
                    location: Self::location(token),
                }),
            },
            None => Err(ParseError::UnexpectedEof {
                expected: description.to_string(),
                location: self.eof_location(),
            }),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn peek_type(&self, offset: usize) -> Option<&TokenType> {
        self.tokens.get(self.current + offset).map(|t| &t.token_type)
    }

    fn location(token: &Token) -> SourceLocation {
        SourceLocation {
            line: token.line,
            column: token.column,
        }
    }

    fn eof_location(&self) -> SourceLocation {
        self.tokens
            .last()
            .map(Self::location)
            .unwrap_or(SourceLocation { line: 1, column: 1 })
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(source: &str) -> ParseResult<Program> {
        let tokens = Lexer::new(source.to_string()).tokenize();
        Parser::new(tokens).parse()
    }

    fn parse_with_table(source: &str) -> (ParseResult<Program>, SymbolTable) {
        let tokens = Lexer::new(source.to_string()).tokenize();
        let mut parser = Parser::new(tokens);
        let program = parser.parse();
        (program, parser.into_symbol_table())
    }

    #[test]
    fn test_integer_literal() {
        let program = parse("42").unwrap();
        assert_eq!(
            program.statements,
            vec![Statement::Expression(Expression::IntegerLiteral(42))]
        );
    }

    #[test]
    fn test_declaration_then_read_resolve_to_same_id() {
        let (program, table) = parse_with_table("x : int = 5\nprint(x)");
        let program = program.unwrap();

        let declared_id = table.lookup("x").unwrap().id;
        match &program.statements[1] {
            Statement::Expression(Expression::FunctionCall { callee, args }) => {
                assert_eq!(callee, "print");
                assert_eq!(
                    args[0],
                    Expression::VariableRead {
                        name: "x".to_string(),
                        id: declared_id,
                    }
                );
            }
            other => panic!("Expected function call statement, got {:?}", other),
        }
    }

    #[test]
    fn test_end_to_end_tree_shape() {
        let program = parse("x : int = 5\nprint(x)").unwrap();
        assert_eq!(
            program.statements,
            vec![
                Statement::Assignment {
                    name: "x".to_string(),
                    value: Expression::IntegerLiteral(5),
                },
                Statement::Expression(Expression::FunctionCall {
                    callee: "print".to_string(),
                    args: vec![Expression::VariableRead {
                        name: "x".to_string(),
                        id: 0,
                    }],
                }),
            ]
        );
    }

    #[test]
    fn test_nested_call_argument_order() {
        let program = parse("add(mul(1 2) 3)").unwrap();
        match &program.statements[0] {
            Statement::Expression(Expression::FunctionCall { callee, args }) => {
                assert_eq!(callee, "add");
                assert_eq!(args.len(), 2);
                assert_eq!(
                    args[0],
                    Expression::FunctionCall {
                        callee: "mul".to_string(),
                        args: vec![
                            Expression::IntegerLiteral(1),
                            Expression::IntegerLiteral(2),
                        ],
                    }
                );
                assert_eq!(args[1], Expression::IntegerLiteral(3));
            }
            other => panic!("Expected function call statement, got {:?}", other),
        }
    }

    #[test]
    fn test_declaration_initializer_may_be_a_call() {
        let program = parse("y : int = add(1 2)").unwrap();
        assert_eq!(
            program.statements,
            vec![Statement::Assignment {
                name: "y".to_string(),
                value: Expression::FunctionCall {
                    callee: "add".to_string(),
                    args: vec![
                        Expression::IntegerLiteral(1),
                        Expression::IntegerLiteral(2),
                    ],
                },
            }]
        );
    }

    #[test]
    fn test_initializer_may_read_earlier_variable() {
        let (program, table) = parse_with_table("x : int = 5\ny : int = x");
        program.unwrap();
        assert_eq!(table.lookup("x").unwrap().id, 0);
        assert_eq!(table.lookup("y").unwrap().id, 1);
    }

    #[test]
    fn test_initializer_cannot_reference_own_declaration() {
        let err = parse("x : int = x").unwrap_err();
        assert!(matches!(err, ParseError::UndeclaredVariable { ref name, .. } if name == "x"));
    }

    #[test]
    fn test_redeclaration_rebinds_name() {
        let (program, table) = parse_with_table("x : int = 1\nx : int = 2\nprint(x)");
        let program = program.unwrap();

        // The later declaration wins and the read resolves to its id.
        assert_eq!(table.lookup("x").unwrap().id, 1);
        match &program.statements[2] {
            Statement::Expression(Expression::FunctionCall { args, .. }) => {
                assert_eq!(
                    args[0],
                    Expression::VariableRead {
                        name: "x".to_string(),
                        id: 1,
                    }
                );
            }
            other => panic!("Expected function call statement, got {:?}", other),
        }
    }

    #[test]
    fn test_unbalanced_parenthesis() {
        let err = parse("f(1").unwrap_err();
        match err {
            ParseError::UnbalancedParenthesis { location } => {
                assert_eq!(location.line, 1);
                assert_eq!(location.column, 2);
            }
            other => panic!("Expected unbalanced parenthesis error, got {:?}", other),
        }
    }

    #[test]
    fn test_undeclared_variable_is_an_error() {
        let err = parse("print(y)").unwrap_err();
        assert!(matches!(err, ParseError::UndeclaredVariable { ref name, .. } if name == "y"));
    }

    #[test]
    fn test_stray_punctuation_is_an_error() {
        let err = parse(") 5").unwrap_err();
        match err {
            ParseError::UnrecognizedToken { found, location } => {
                assert_eq!(found, "')'");
                assert_eq!(location.line, 1);
                assert_eq!(location.column, 1);
            }
            other => panic!("Expected unrecognized token error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let err = parse("x : float = 5").unwrap_err();
        assert!(matches!(err, ParseError::UnknownType { ref name, .. } if name == "float"));
    }

    #[test]
    fn test_integer_overflow_is_an_error() {
        let err = parse("99999999999999999999").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { .. }));
    }

    #[test]
    fn test_empty_input() {
        let program = parse("").unwrap();
        assert!(program.statements.is_empty());
    }
}
