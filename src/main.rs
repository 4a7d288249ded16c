use clap::{Parser as ClapParser, Subcommand};
use sift_lang::cli::{self, CheckOptions, CheckResult, CliError, SqlOptions};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "sift")]
#[command(about = "Sift - filter expressions for JSON records and SQL WHERE clauses")]
#[command(version)]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. "debug", "sift_lang=trace")
    #[arg(long, global = true, env = "SIFT_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a filter and evaluate it against JSON input
    Check {
        /// The filter expression
        filter: String,

        /// JSON input: an object, or an array of objects (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,

        /// Accept eq, ne, gt, ge, lt, le, match and nomatch as operators
        #[arg(long)]
        keyword_operators: bool,
    },

    /// Compile a filter to a parameterized SQL WHERE fragment
    Sql {
        /// The filter expression
        filter: String,

        /// SQL dialect: postgres, mysql, sqlite or ansi
        #[arg(short, long)]
        dialect: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Accept eq, ne, gt, ge, lt, le, match and nomatch as operators
        #[arg(long)]
        keyword_operators: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'sift docs' to list categories)
        category: String,
    },
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to `--log-level`.
fn init_tracing(log_level: &str) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match cli.command {
        Commands::Check {
            filter,
            input,
            pretty,
            syntax_only,
            keyword_operators,
        } => run_check(filter, input, pretty, syntax_only, keyword_operators),
        Commands::Sql {
            filter,
            dialect,
            pretty,
            keyword_operators,
        } => run_sql(filter, dialect, pretty, keyword_operators),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
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

fn run_check(
    filter: String,
    input: Option<String>,
    pretty: bool,
    syntax_only: bool,
    keyword_operators: bool,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !syntax_only && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        filter,
        input,
        syntax_only,
        keyword_operators,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid(rendered) => println!("Syntax is valid: {}", rendered),
        CheckResult::Matched(matched) => println!("{}", matched),
        CheckResult::Filtered(records) => {
            print_json(&serde_json::Value::Array(records), pretty)?;
        }
    }
    Ok(())
}

fn run_sql(
    filter: String,
    dialect: Option<String>,
    pretty: bool,
    keyword_operators: bool,
) -> Result<(), CliError> {
    let options = SqlOptions {
        filter,
        dialect,
        keyword_operators,
    };
    let output = cli::execute_sql(&options)?;
    print_json(&output, pretty)
}
