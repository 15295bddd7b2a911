// src/main.rs
use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use jsontree::decode::{decode_number, decode_string};
use jsontree::{
    format_tree, parse_with_depth, to_exit_code, ParseError, TokenKind, Tokenizer,
    DEFAULT_MAX_DEPTH,
};

#[derive(Parser)]
#[command(name = "jsontree")]
#[command(about = "Parse a JSON file and print its tree", version)]
struct Cli {
    /// Path to the JSON file to parse
    file: PathBuf,

    /// Dump the token stream before parsing
    #[arg(long)]
    tokens: bool,

    /// Maximum container nesting depth before parsing aborts
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Disable ANSI colors in the tree output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let input = match fs::read_to_string(&cli.file) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Error: could not read {}: {err}", cli.file.display());
            return ExitCode::from(1);
        }
    };
    debug!(bytes = input.len(), "read input file");

    if cli.tokens {
        if let Err(err) = dump_tokens(&input) {
            eprintln!("{err}");
            return exit_code_for(&err);
        }
    }

    let started = Instant::now();
    match parse_with_depth(&input, cli.max_depth) {
        Ok(root) => {
            debug!(elapsed_us = started.elapsed().as_micros() as u64, "parse complete");
            let use_color = !cli.no_color && std::io::stdout().is_terminal();
            print!("{}", format_tree(&root, use_color));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            exit_code_for(&err)
        }
    }
}

fn exit_code_for(err: &ParseError) -> ExitCode {
    ExitCode::from(to_exit_code(err.kind()) as u8)
}

// Token-stream demo: one line per token, with decoded payloads for strings
// and numbers.
fn dump_tokens(input: &str) -> Result<(), ParseError> {
    let mut tokenizer = Tokenizer::new(input);
    loop {
        let token = tokenizer.next_token()?;
        println!(
            "{}:{} {:<12} '{}'",
            token.line,
            token.column,
            format!("{:?}", token.kind),
            token.text
        );
        match token.kind {
            TokenKind::Str => match decode_string(token.text, token.line, token.column) {
                Ok(text) => println!("       decoded: \"{text}\""),
                Err(err) => println!("       decode error: {}", err.message()),
            },
            TokenKind::Number => {
                if let Ok(number) = decode_number(token.text, token.line, token.column) {
                    println!("       number: {number}");
                }
            }
            _ => {}
        }
        if token.kind == TokenKind::Eof {
            break;
        }
    }
    Ok(())
}
