use clap::{Arg, ArgAction, Command as ClapCommand};
use std::fs;
use std::path::Path;
use std::process::Command;

use pysq::error::CompileError;
use pysq::lexer::Lexer;
use pysq::parser::Parser;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CompileError> {
    let matches = ClapCommand::new("pysq")
        .version("0.1.0")
        .about("py-squared language compiler")
        .arg(
            Arg::new("input")
                .help("Input .pysq file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output C file")
                .default_value("out.c"),
        )
        .arg(
            Arg::new("dump-tokens")
                .long("dump-tokens")
                .help("Print the token stream as JSON and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dump-ast")
                .long("dump-ast")
                .help("Print the syntax tree as JSON and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("build")
                .short('b')
                .long("build")
                .help("Compile the generated C file with gcc")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let input_file = matches.get_one::<String>("input").unwrap();
    let output_file = matches.get_one::<String>("output").unwrap();

    if matches.get_flag("dump-tokens") {
        let source = fs::read_to_string(input_file)?;
        let tokens = Lexer::new(source).tokenize();
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(());
    }

    if matches.get_flag("dump-ast") {
        let source = fs::read_to_string(input_file)?;
        let tokens = Lexer::new(source).tokenize();
        let program = Parser::new(tokens).parse()?;
        println!("{}", serde_json::to_string_pretty(&program)?);
        return Ok(());
    }

    pysq::compile_file(Path::new(input_file), Path::new(output_file))?;

    if matches.get_flag("build") {
        let executable = Path::new(output_file).with_extension("");
        let status = Command::new("gcc")
            .arg(output_file)
            .arg("-o")
            .arg(&executable)
            .status()?;

        if !status.success() {
            return Err(CompileError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                "gcc compilation failed",
            )));
        }
    }

    println!("Successfully compiled {} to {}", input_file, output_file);

    Ok(())
}
