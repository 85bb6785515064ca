use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    IntegerLiteral(i64),
    /// A read of a previously declared variable. The id is resolved against
    /// the symbol table at parse time.
    VariableRead {
        name: String,
        id: usize,
    },
    FunctionCall {
        callee: String,
        args: Vec<Expression>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    /// Declaration with an immediate initializer: `name : type = value`.
    Assignment {
        name: String,
        value: Expression,
    },
    Expression(Expression),
}

/// The root of one compilation unit (the entrypoint). Statement order
/// mirrors source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Statement>,
}
