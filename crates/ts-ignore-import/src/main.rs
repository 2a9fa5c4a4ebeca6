mod command;
mod error;
mod output;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::output::{Verbosity, format_summary};

#[derive(Parser, Debug)]
#[command(name = "ts-ignore-import")]
#[command(version = env!("TS_IGNORE_IMPORT_VERSION"))]
#[command(
    about = "Adds @ts-ignore comments above imports of external modules in TypeScript declaration files",
    long_about = None
)]
struct Cli {
    /// Declaration files or glob patterns to process (default: index.d.ts)
    #[arg(value_name = "FILES")]
    files: Vec<String>,

    /// Module that should not be ignored, including its sub-paths (repeatable)
    #[arg(long, short = 'a', value_name = "MODULE")]
    allow: Vec<String>,

    /// Gitignore-style pattern of declaration files to leave alone (repeatable, default: node_modules/)
    #[arg(long, short = 's', value_name = "PATTERN")]
    skip: Vec<String>,

    /// Path to the tsconfig.json of the project
    #[arg(long = "ts-config", short = 't', value_name = "PATH")]
    ts_config: Option<PathBuf>,

    /// Directory to run in (default: current directory)
    #[arg(long = "path", short = 'C')]
    path: Option<PathBuf>,

    /// Report what would be ignored without changing any file
    #[arg(long)]
    dry_run: bool,

    /// Report already ignored imports and print diagnostic logs
    #[arg(long)]
    debug: bool,

    /// Print progress details
    #[arg(long, short = 'v', conflicts_with = "silent")]
    verbose: bool,

    /// Print nothing but errors
    #[arg(long)]
    silent: bool,
}

impl Cli {
    fn verbosity(&self) -> Verbosity {
        if self.silent {
            Verbosity::Silent
        } else if self.verbose || self.debug {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match command::run(&cli) {
        Ok(output) => {
            if !cli.silent {
                println!("{}", format_summary(&output, cli.dry_run));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(debug: bool) {
    let default_directive = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("failed to install tracing subscriber: {err}");
    }
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
