//! Faxt CLI - the command-line driver for the fax compiler pipeline.
//!
//! One subcommand, `run`, which lexes, parses and compiles a `.fax` file
//! and prints whichever stage(s) `--emit` asks for (spec §6 / SPEC_FULL §10).

mod config;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;
use error::{FaxtError, Result};
use faxc_drv::{compile_file, render_stage, EmitStage};

/// Faxt - driver for the fax lex/parse/compile pipeline.
#[derive(Parser, Debug)]
#[command(name = "faxt")]
#[command(author = "Fax Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Driver for the fax compiler pipeline", long_about = None)]
struct Cli {
    /// Enable verbose pipeline logging.
    #[arg(short, long, global = true, env = "FAXT_VERBOSE")]
    verbose: bool,

    /// Disable colored diagnostic output.
    #[arg(long, global = true, env = "FAXT_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Compile a `.fax` file and print the requested pipeline stages.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Source file to compile.
    file: PathBuf,

    /// Which stage(s) to print: tokens, ast, bytecode, or all.
    #[arg(long, default_value = "all")]
    emit: EmitArg,
}

#[derive(Clone, Copy, Debug)]
struct EmitArg(EmitStage);

impl std::str::FromStr for EmitArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse().map(EmitArg)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(1);
        }
    };
    let verbose = cli.verbose || config.verbose;
    let no_color = cli.no_color || config.no_color;

    init_logging(verbose);

    match &cli.command {
        Commands::Run(args) => match run(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(FaxtError::Driver(driver_err)) => {
                use std::io::IsTerminal as _;
                let is_tty = std::io::stderr().is_terminal();
                let color = if no_color {
                    faxc_util::ColorConfig::Never
                } else {
                    faxc_util::ColorConfig::Auto
                };
                let mut source_map = faxc_util::SourceMap::new();
                if let Ok(source) = std::fs::read_to_string(&args.file) {
                    source_map.add(
                        faxc_util::Symbol::intern(&args.file.to_string_lossy()),
                        source,
                    );
                }
                let diagnostic = driver_err.to_diagnostic();
                eprintln!("{}", diagnostic.render(&source_map, color, is_tty));
                ExitCode::from(driver_err.exit_code() as u8)
            }
            Err(other) => {
                eprintln!("{other}");
                ExitCode::from(1)
            }
        },
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}

fn run(args: &RunArgs) -> Result<()> {
    tracing::debug!(file = %args.file.display(), "starting pipeline");
    let output = compile_file(&args.file)?;
    print!("{}", render_stage(&output, args.emit.0));
    Ok(())
}
