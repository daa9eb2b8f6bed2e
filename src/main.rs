use clap::{Parser as ClapParser, Subcommand};
use docsieve::cli::{self, CliError, CompileOptions, RunOptions};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "docsieve")]
#[command(about = "docsieve - Compile typed where-clauses into document-store predicates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a where-clause and print the predicate document
    Compile {
        /// The where-clause as JSON
        filter: String,

        /// Schema file describing the collection's fields
        #[arg(short, long)]
        schema: PathBuf,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Compile a where-clause and run it against JSON records
    Run {
        /// The where-clause as JSON
        filter: String,

        /// Schema file describing the collection's fields
        #[arg(short, long)]
        schema: PathBuf,

        /// File holding a JSON array of records (reads from stdin if not provided)
        #[arg(short, long)]
        records: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List operators and their null behavior
    Operators,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            filter,
            schema,
            pretty,
        } => run_compile(filter, schema, pretty),
        Commands::Run {
            filter,
            schema,
            records,
            pretty,
        } => run_run(filter, schema, records, pretty),
        Commands::Operators => {
            print!("{}", cli::get_operator_reference());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_compile(filter: String, schema: PathBuf, pretty: bool) -> Result<(), CliError> {
    let options = CompileOptions {
        schema: fs::read_to_string(&schema)?,
        filter,
    };

    let document = cli::execute_compile(&options)?;
    print_json(&document, pretty)
}

fn run_run(
    filter: String,
    schema: PathBuf,
    records: Option<PathBuf>,
    pretty: bool,
) -> Result<(), CliError> {
    let records = match records {
        Some(path) => Some(fs::read_to_string(path)?),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = RunOptions {
        schema: fs::read_to_string(&schema)?,
        filter,
        records,
    };

    let found = cli::execute_run(&options)?;
    info!(matched = found.len(), "run complete");
    print_json(&serde_json::Value::Array(found), pretty)
}

fn print_json(value: &serde_json::Value, pretty: bool) -> Result<(), CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }?;
    println!("{}", json);
    Ok(())
}
