//! Monkey CLI - command-line interface for the Monkey programming language.
//!
//! Parses Monkey source from a file, a `-e` argument, or an interactive REPL,
//! then prints either the canonical AST rendering or the parse diagnostics.

use std::env;
use std::fs;
use std::path::Path;

use monkey_lexer::{tokenize, TokenKind};
use monkey_parser::parse;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const VERSION: &str = "0.1.0";

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let mut eval_code: Option<String> = None;
    let mut interactive = false;
    let mut tokens = false;
    let mut file: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];

        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            "-v" | "--version" => {
                print_version();
                return Ok(());
            }
            "-e" | "--eval" => {
                i += 1;
                if i >= args.len() {
                    return Err("-e requires an argument".to_string());
                }
                eval_code = Some(args[i].clone());
            }
            "-i" | "--interactive" => {
                interactive = true;
            }
            "-t" | "--tokens" => {
                tokens = true;
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => {
                file = Some(arg.clone());
                break;
            }
        }
        i += 1;
    }

    if let Some(code) = eval_code {
        if tokens {
            print_tokens(&code);
        } else {
            run_source(&code)?;
        }

        if interactive {
            start_repl(tokens)?;
        }
    } else if let Some(filepath) = file {
        run_file(&filepath, tokens)?;

        if interactive {
            start_repl(tokens)?;
        }
    } else {
        start_repl(tokens)?;
    }

    Ok(())
}

fn print_usage() {
    println!(
        r#"
Monkey v{} - Lexer and parser for the Monkey programming language

Usage:
  monkey [options] [file]

Options:
  -h, --help         Show this help message
  -v, --version      Show version
  -e, --eval         Parse code from the command line
  -t, --tokens       Print the token stream instead of parsing
  -i, --interactive  Start REPL after parsing a file

Examples:
  monkey                      Start interactive REPL
  monkey script.monkey        Parse a script file
  monkey -e "let x = 1 + 2;"  Parse code and print the AST
  monkey -t script.monkey     Print the token stream for a file
  monkey -i script.monkey     Parse a file then start the REPL
"#,
        VERSION
    );
}

fn print_version() {
    println!("Monkey {}", VERSION);
}

/// Parse a source buffer and report the result on stdout/stderr.
fn run_source(source: &str) -> Result<(), String> {
    let outcome = parse(source);

    if !outcome.is_ok() {
        let messages: Vec<String> = outcome.errors.iter().map(|e| e.to_string()).collect();
        return Err(messages.join("\n"));
    }

    println!("{}", outcome.program);
    Ok(())
}

fn run_file(filepath: &str, tokens: bool) -> Result<(), String> {
    let path = Path::new(filepath);

    if !path.exists() {
        return Err(format!("File not found: {}", filepath));
    }

    let code = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    if tokens {
        print_tokens(&code);
        return Ok(());
    }

    run_source(&code).map_err(|e| format!("in {}:\n{}", filepath, e))
}

/// Dump the token stream, one token per line, Eof omitted.
fn print_tokens(source: &str) {
    for tok in tokenize(source) {
        if tok.kind == TokenKind::Eof {
            break;
        }
        println!("{:?} {:?}", tok.kind, tok.literal);
    }
}

fn start_repl(tokens: bool) -> Result<(), String> {
    println!("Monkey v{} - Type 'exit' or Ctrl+D to quit", VERSION);
    println!();

    let mut rl = DefaultEditor::new().map_err(|e| format!("Failed to create editor: {}", e))?;

    loop {
        match rl.readline(">>> ") {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed.is_empty() {
                    continue;
                }

                // Handle exit commands
                if trimmed == "exit" || trimmed == "quit" {
                    println!("Goodbye!");
                    break;
                }

                // Handle special commands
                if trimmed.starts_with('/') {
                    handle_command(trimmed);
                    continue;
                }

                rl.add_history_entry(trimmed).ok(); // Ignore history errors

                if tokens {
                    print_tokens(&line);
                    continue;
                }

                let outcome = parse(&line);
                if outcome.is_ok() {
                    println!("{}", outcome.program);
                } else {
                    for err in &outcome.errors {
                        eprintln!("\t{}", err);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(e) => {
                return Err(format!("Readline error: {}", e));
            }
        }
    }

    Ok(())
}

fn handle_command(cmd: &str) {
    let parts: Vec<&str> = cmd[1..].split_whitespace().collect();
    let command = parts.first().map(|s| s.to_lowercase()).unwrap_or_default();

    match command.as_str() {
        "help" => {
            println!(
                r#"
REPL Commands:
  /help     Show this help
  /clear    Clear the screen
  /exit     Exit the REPL
"#
            );
        }
        "clear" => {
            // ANSI escape code to clear screen
            print!("\x1B[2J\x1B[1;1H");
        }
        "exit" | "quit" => {
            std::process::exit(0);
        }
        _ => {
            println!(
                "Unknown command: /{}. Type /help for available commands.",
                command
            );
        }
    }
}
