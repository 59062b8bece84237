//! `squeak` - parse, resolve and run Squeak scripts from the command line.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use squeak_drv::commands::{
    check::{self, CheckArgs},
    common::EXIT_USAGE_ERROR,
    run::{self, RunArgs},
    tokens::{self, TokensArgs},
};

#[derive(Parser, Debug)]
#[command(name = "squeak")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Parse, resolve and run Squeak scripts")]
struct Cli {
    /// Raise the logging subscriber's default filter by one level.
    #[arg(short, long, global = true, env = "SQUEAK_VERBOSE")]
    verbose: bool,

    /// Override the scanner's refill buffer size.
    #[arg(long, global = true, default_value_t = squeak_lex::DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse, resolve and execute a script.
    Run {
        /// Source file, or '-' to read from stdin.
        path: String,
    },
    /// Parse and resolve only; report errors without executing.
    Check {
        /// Source file, or '-' to read from stdin.
        path: String,
    },
    /// Run the scanner alone and print its token stream.
    Tokens {
        /// Source file, or '-' to read from stdin.
        path: String,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("SQUEAK_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .ok();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run { path } => run::run(RunArgs { path, buffer_size: cli.buffer_size }),
        Commands::Check { path } => check::run(CheckArgs { path, buffer_size: cli.buffer_size }),
        Commands::Tokens { path } => tokens::run(TokensArgs { path, buffer_size: cli.buffer_size }),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            EXIT_USAGE_ERROR
        }
    };

    std::process::exit(exit_code);
}
