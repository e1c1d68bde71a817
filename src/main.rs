use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};
use memmap2::Mmap;

use treelox::context::{Diagnostics, StdioContext};
use treelox::error::LoxError;
use treelox::lox::Lox;
use treelox::parser::{self, Parsed};
use treelox::printer::{AstPrinter, RpnPrinter};
use treelox::scanner::Scanner;
use treelox::token::Token;

#[derive(ClapParser, Debug)]
#[command(version, about = "Tree-walking Lox interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Option<Commands>,

    /// Enable logging to treelox.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a file as a Lox program
    Run { filename: PathBuf },

    /// Starts an interactive session (the default)
    Repl,

    /// Tokenizes a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print the tokens as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Parses a file as a single expression and prints its tree
    Parse {
        filename: PathBuf,

        /// Print in reverse Polish notation instead of prefix form
        #[arg(long)]
        rpn: bool,
    },
}

/// Maps the file and decodes it as UTF‑8.
fn read_source(filename: &Path) -> Result<String> {
    info!("Reading file: {:?}", filename);

    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let len = file
        .metadata()
        .context(format!("Failed to stat file {:?}", filename))?
        .len();

    // Mapping a zero-length file fails on some platforms.
    if len == 0 {
        return Ok(String::new());
    }

    // SAFETY: the mapping is read once and copied out before returning; the
    // file is not expected to change underneath us while that happens.
    let mmap = unsafe { Mmap::map(&file) }.context(format!("Failed to map file {:?}", filename))?;

    let source = std::str::from_utf8(&mmap)
        .map_err(LoxError::from)
        .context(format!("File {:?} is not valid UTF-8", filename))?
        .to_owned();

    info!("Read {} bytes from {:?}", len, filename);

    Ok(source)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("treelox.log").context("Failed to create treelox.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("treelox::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized, writing to treelox.log");
    Ok(())
}

/// Prints what the session has not already reported and returns the exit code.
fn report(error: &LoxError) -> i32 {
    match error {
        // Already reported through the interpreter's context.
        LoxError::Runtime(e) => debug!("Runtime debug: {}", e),
        other => eprintln!("{}", other),
    }

    error.exit_code()
}

fn run_file(filename: &Path) -> Result<()> {
    let source = read_source(filename)?;
    let mut lox = Lox::new(Box::new(StdioContext));

    if let Err(e) = lox.run(&source) {
        std::process::exit(report(&e));
    }

    info!("Program executed successfully");
    Ok(())
}

fn run_prompt() -> Result<()> {
    let mut lox = Lox::new(Box::new(StdioContext));
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        if let Err(e) = lox.run_line(&line) {
            report(&e);
        }
    }

    info!("REPL session ended");
    Ok(())
}

fn tokenize(filename: &Path, json: bool) -> Result<()> {
    let source = read_source(filename)?;
    let mut tokens: Vec<Token> = Vec::new();
    let mut tokenized = true;

    for token in Scanner::new(&source) {
        match token {
            Ok(token) => {
                if !json {
                    println!("{}", token);
                }
                tokens.push(token);
            }

            Err(e) => {
                tokenized = false;
                debug!("Tokenization debug: {}", e);
                eprintln!("{}", e);
            }
        }
    }

    if json {
        let rendered =
            serde_json::to_string_pretty(&tokens).context("Failed to serialize tokens")?;
        println!("{}", rendered);
    }

    if !tokenized {
        debug!("Tokenization failed, exiting with code 65");
        std::process::exit(65);
    }

    info!("Tokenization completed successfully");
    Ok(())
}

fn parse(filename: &Path, rpn: bool) -> Result<()> {
    let source = read_source(filename)?;
    let mut diagnostics = Diagnostics::new();

    let tokens = treelox::scanner::scan(&source, &mut diagnostics);
    let parsed = parser::parse(tokens, true, &mut diagnostics);

    if diagnostics.had_error() {
        for diagnostic in diagnostics.iter() {
            eprintln!("{}", diagnostic);
        }
        std::process::exit(65);
    }

    let expr = match parsed {
        Parsed::Expression(expr) => expr,
        Parsed::Statements(_) => bail!("{:?} does not hold a single expression", filename),
    };

    if rpn {
        match RpnPrinter::print(&expr) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(65);
            }
        }
    } else {
        println!("{}", AstPrinter::print(&expr));
    }

    info!("Parse subcommand completed");
    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands.unwrap_or(Commands::Repl) {
        Commands::Run { filename } => run_file(&filename),
        Commands::Repl => run_prompt(),
        Commands::Tokenize { filename, json } => tokenize(&filename, json),
        Commands::Parse { filename, rpn } => parse(&filename, rpn),
    }
}
