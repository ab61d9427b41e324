//! CLI tool to check, inspect, and run jcl scripts.

use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: jcl <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  run     Parse and execute script(s)");
        eprintln!("  tree    Print the parsed atom tree");
        eprintln!("  tokens  Print the token stream");
        eprintln!("  check   Check if script(s) parse");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  jcl run hello.jcl");
        eprintln!("  JCL_LOG=trace jcl tree hello.jcl");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if !matches!(command, "run" | "tree" | "tokens" | "check") {
        eprintln!("Unknown command: {command}");
        return ExitCode::from(2);
    }

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let content = match fs::read(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        if command == "tokens" {
            print_tokens(&content);
            continue;
        }

        let root = match jcl::parse(&content) {
            Ok(root) => root,
            Err(e) => {
                eprintln!("{}", e.report(path, &content));
                had_error = true;
                continue;
            }
        };

        match command {
            "run" => {
                let stdout = io::stdout();
                if let Err(e) = jcl::run(&root, &mut stdout.lock()) {
                    eprintln!("{}", e.report(path, &content));
                    had_error = true;
                }
            }
            "tree" => print!("{}", jcl::format(&root)),
            _ => {
                let commands = root.children().len();
                eprintln!("{path}: valid ({commands} command(s))");
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Log to stderr, filtered by `JCL_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("JCL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_tokens(content: &[u8]) {
    let mut out = io::stdout().lock();
    for token in jcl::Lexer::new(content) {
        let text = String::from_utf8_lossy(token.text(content));
        let line = format!(
            "{} {}..{} {text:?}\n",
            token.kind, token.span.start, token.span.end
        );
        if out.write_all(line.as_bytes()).is_err() {
            return;
        }
    }
}
