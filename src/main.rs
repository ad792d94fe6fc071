use std::{
    fs::read_to_string,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use clap::{Parser as ClapParser, ValueEnum};
use log::{debug, info, LevelFilter};

use monkeylang::{
    display_error,
    errors::errors::Error,
    lexer::lexer::Lexer,
    parser::parser::Parser,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Print every token of the input
    Tokens,
    /// Print the reconstructed program and any diagnostics
    Ast,
}

/// Tokenizer and parser front end for the monkey language.
///
/// Without FILE, reads one line at a time from stdin.
#[derive(ClapParser, Debug)]
#[command(version, about)]
struct Cli {
    /// Source file to parse once instead of starting the interactive loop
    file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Mode::Ast)]
    mode: Mode,

    #[arg(long, default_value = ">> ")]
    prompt: String,

    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let result = match &cli.file {
        Some(path) => run_file(path, cli.mode),
        None => run_repl(&cli),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the file parsed without diagnostics.
fn run_file(path: &Path, mode: Mode) -> io::Result<bool> {
    let source = read_to_string(path)?;
    let file_name = path.to_string_lossy();
    let start = Instant::now();

    let mut stdout = io::stdout().lock();
    let clean = match mode {
        Mode::Tokens => {
            for token in Lexer::with_file(source.as_str(), &file_name) {
                writeln!(stdout, "{}", token)?;
            }
            true
        }
        Mode::Ast => {
            let mut parser = Parser::new(Lexer::with_file(source.as_str(), &file_name));
            let program = parser.parse_program();
            info!("parsed {} statements in {:?}", program.len(), start.elapsed());

            writeln!(stdout, "{}", program)?;
            report(parser.diagnostics(), &source);
            parser.diagnostics().is_empty()
        }
    };

    Ok(clean)
}

fn run_repl(cli: &Cli) -> io::Result<bool> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "{}", cli.prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(true);
        }
        debug!("read {} bytes", line.len());

        match cli.mode {
            Mode::Tokens => {
                for token in Lexer::new(line.as_str()) {
                    writeln!(stdout, "{}", token)?;
                }
            }
            Mode::Ast => {
                let mut parser = Parser::new(Lexer::new(line.as_str()));
                let program = parser.parse_program();
                if !program.is_empty() {
                    writeln!(stdout, "{}", program)?;
                }
                report(parser.diagnostics(), &line);
            }
        }
    }
}

fn report(diagnostics: &[Error], source: &str) {
    for error in diagnostics {
        eprint!("{}", display_error(error, source));
    }
}
