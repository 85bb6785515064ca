use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// Parser Errors
#[derive(Debug)]
pub enum ParseError {
    UnexpectedToken {
        expected: String,
        found: String,
        location: SourceLocation,
    },
    UnexpectedEof {
        expected: String,
        location: SourceLocation,
    },
    UnbalancedParenthesis {
        location: SourceLocation,
    },
    UnrecognizedToken {
        found: String,
        location: SourceLocation,
    },
    UndeclaredVariable {
        name: String,
        location: SourceLocation,
    },
    UnknownType {
        name: String,
        location: SourceLocation,
    },
    InvalidNumber {
        value: String,
        location: SourceLocation,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken {
                expected,
                found,
                location,
            } => {
                write!(f, "{}: Expected {}, found {}", location, expected, found)
            }
            ParseError::UnexpectedEof { expected, location } => {
                write!(
                    f,
                    "{}: Unexpected end of input, expected {}",
                    location, expected
                )
            }
            ParseError::UnbalancedParenthesis { location } => {
                write!(f, "{}: Unbalanced parenthesis, ')' never found", location)
            }
            ParseError::UnrecognizedToken { found, location } => {
                write!(f, "{}: Unrecognized token {}", location, found)
            }
            ParseError::UndeclaredVariable { name, location } => {
                write!(f, "{}: Use of undeclared variable '{}'", location, name)
            }
            ParseError::UnknownType { name, location } => {
                write!(f, "{}: Unknown type '{}'", location, name)
            }
            ParseError::InvalidNumber { value, location } => {
                write!(f, "{}: Invalid number '{}'", location, value)
            }
        }
    }
}

impl std::error::Error for ParseError {}

// Codegen Errors
#[derive(Debug)]
pub enum CodegenError {
    UndeclaredVariable { name: String },
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CodegenError::UndeclaredVariable { name } => {
                write!(f, "Variable '{}' has no symbol table entry", name)
            }
        }
    }
}

impl std::error::Error for CodegenError {}

// Compilation Errors
#[derive(Debug)]
pub enum CompileError {
    ParseError(ParseError),
    CodegenError(CodegenError),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompileError::ParseError(e) => write!(f, "Parse error: {}", e),
            CompileError::CodegenError(e) => write!(f, "Code generation error: {}", e),
            CompileError::IoError(e) => write!(f, "I/O error: {}", e),
            CompileError::JsonError(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        CompileError::ParseError(err)
    }
}

impl From<CodegenError> for CompileError {
    fn from(err: CodegenError) -> Self {
        CompileError::CodegenError(err)
    }
}

impl From<std::io::Error> for CompileError {
    fn from(err: std::io::Error) -> Self {
        CompileError::IoError(err)
    }
}

impl From<serde_json::Error> for CompileError {
    fn from(err: serde_json::Error) -> Self {
        CompileError::JsonError(err)
    }
}

// Result types
pub type ParseResult<T> = Result<T, ParseError>;
pub type CodegenResult<T> = Result<T, CodegenError>;
pub type CompileResult<T> = Result<T, CompileError>;
