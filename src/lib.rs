//! Compiler for the py-squared language.
//!
//! The pipeline runs in strict sequential phases: `lexer` turns the source
//! text into a flat token stream, `parser` builds the syntax tree and fills
//! the symbol table as declarations are seen, and `codegen` lowers the tree
//! into C statements against the slot runtime. `error` centralises the
//! diagnostics shared by all stages.

pub mod ast;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod symbol_table;

use std::fs;
use std::path::Path;

use codegen::CCodeGen;
use error::CompileResult;
use lexer::Lexer;
use parser::Parser;

/// Runtime skeleton the generated statements are substituted into.
pub const RUNTIME_SKELETON: &str = include_str!("../runtime/main.c");

/// Marker in the skeleton that is replaced by the generated statements.
pub const MAIN_MARKER: &str = "// %main";

/// Compile a source string into the ordered top-level C statements for one
/// compilation unit. Every invocation gets its own symbol table, so
/// independent compilations never share state.
pub fn compile_source(source: &str) -> CompileResult<String> {
    let mut lexer = Lexer::new(source.to_string());
    let tokens = lexer.tokenize();

    let mut parser = Parser::new(tokens);
    let program = parser.parse()?;
    let symbol_table = parser.into_symbol_table();

    let codegen = CCodeGen::with_symbol_table(symbol_table);
    Ok(codegen.compile_program(&program)?)
}

/// Compile a source file into a C file. The generated statements are
/// substituted into the runtime skeleton at the `// %main` marker; nothing
/// is written when any phase fails.
pub fn compile_file(input: &Path, output: &Path) -> CompileResult<()> {
    let source = fs::read_to_string(input)?;
    let statements = compile_source(&source)?;

    let c_code = RUNTIME_SKELETON.replace(MAIN_MARKER, &statements);
    fs::write(output, c_code)?;

    Ok(())
}
