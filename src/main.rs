use clap::{Arg, ArgAction, Command};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = Command::new("sprout")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tokenizer for the Sprout language")
        .arg(
            Arg::new("file")
                .help("The source file to tokenize")
                .value_name("FILE")
                .index(1)
                .conflicts_with("eval"),
        )
        .arg(
            Arg::new("eval")
                .short('e')
                .long("eval")
                .help("Tokenize the given source text instead of a file")
                .value_name("SOURCE"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print diagnostics, not the token stream")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start the interactive token shell")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let show_tokens = !matches.get_flag("quiet");

    if let Some(file_path) = matches.get_one::<String>("file") {
        run_file(file_path, show_tokens)
    } else if let Some(source) = matches.get_one::<String>("eval") {
        exit_code(sprout::run(source, Some("<eval>"), show_tokens))
    } else {
        // -i and no arguments both land here
        sprout::start_repl();
        ExitCode::SUCCESS
    }
}

fn run_file(path: &str, show_tokens: bool) -> ExitCode {
    let path = Path::new(path);

    match fs::read_to_string(path) {
        Ok(source) => {
            let filename = path.display().to_string();
            exit_code(sprout::run(&source, Some(&filename), show_tokens))
        }
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn exit_code(diagnostics: usize) -> ExitCode {
    if diagnostics == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
