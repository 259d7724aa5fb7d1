//! Command-line front end.
//!
//! Usage:
//!   protoscope run <files>...     # Run spec scripts and print the report
//!   protoscope eval "code"        # Evaluate a script, print its value
//!   protoscope conformance        # Run the built-in conformance catalogue
//!   protoscope parse <file.js>    # Dump the AST of a script

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{LevelFilter, Log, Metadata, Record};

use protoscope::harness::conformance::conformance_suite;
use protoscope::harness::{SpecReport, SpecRunner};
use protoscope::parser::{parse_to_token_tree, JsParser};
use protoscope::runner::api::{read_script, run_script};
use protoscope::runner::plugin::config::RunnerConfig;
use protoscope::runner::plugin::types::EvalContext;

#[derive(Parser)]
#[command(name = "protoscope")]
#[command(about = "Executable specs for scope chains, receivers and prototypes", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./protoscope.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Run only examples whose full name contains this text
    #[arg(long, global = true)]
    filter: Option<String>,

    /// Stop after the first failing example
    #[arg(long, global = true)]
    fail_fast: bool,

    /// More log output; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run spec scripts
    Run {
        /// Spec files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Evaluate a script and print its completion value
    Eval {
        /// Script source
        code: String,
    },

    /// Run the built-in conformance catalogue
    Conformance,

    /// Parse a script and dump its syntax tree
    Parse {
        /// Input file
        file: PathBuf,
        /// Print the raw token tree instead of the AST
        #[arg(long)]
        tokens: bool,
    },
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
    log::debug!("log level {}", level);
}

fn load_config(cli: &Cli) -> Result<RunnerConfig, String> {
    let mut config = RunnerConfig::discover(cli.config.as_deref()).map_err(|e| e.to_string())?;
    if cli.filter.is_some() {
        config.filter = cli.filter.clone();
    }
    if cli.fail_fast {
        config.fail_fast = true;
    }
    Ok(config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match &cli.command {
        Commands::Run { files } => {
            let runner = SpecRunner::new(config);
            let mut report = SpecReport::new();
            for file in files {
                report.merge(runner.run_file(file));
                if runner.config().fail_fast && !report.is_success() {
                    break;
                }
            }
            finish(&report)
        }
        Commands::Eval { code } => {
            let mut ctx = EvalContext::with_config(config);
            match run_script(code, &mut ctx) {
                Ok(value) => {
                    println!("{}", value);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Conformance => finish(&SpecRunner::new(config).run(&conformance_suite())),
        Commands::Parse { file, tokens } => parse_file(file, *tokens),
    }
}

fn finish(report: &SpecReport) -> ExitCode {
    print!("{}", report);
    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn parse_file(file: &Path, tokens: bool) -> ExitCode {
    let source = match read_script(file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let dump = if tokens {
        parse_to_token_tree(&source)
    } else {
        JsParser::parse_to_ast_from_str(&source)
            .map(|program| format!("{:#?}", program))
            .map_err(|e| e.to_string())
    };
    match dump {
        Ok(dump) => {
            println!("{}", dump);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
