use crate::runner;
use std::io::{self, Write};

/// Token-printing shell. Each line is scanned by a fresh lexer; nothing is
/// carried over between lines.
pub fn start() {
    println!("Sprout v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' or press Ctrl+D to quit");
    println!();

    loop {
        print!(">> ");
        if let Err(error) = io::stdout().flush() {
            eprintln!("Error writing prompt: {}", error);
            break;
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                // EOF (Ctrl+D or piped input ended)
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim_end_matches(['\n', '\r']);
                if line.trim().is_empty() {
                    continue;
                }
                if matches!(line.trim(), "exit" | "quit") {
                    println!("Goodbye!");
                    break;
                }

                runner::run(line, None, true);
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }
}
