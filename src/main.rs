use clap::{Parser as ClapParser, Subcommand};
use docsift::{
    FunctionRegistry,
    cli::{self, CheckOptions, CliError, RunOptions},
};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "docsift")]
#[command(about = "docsift - run SELECT ... FROM c WHERE ... queries over JSON documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a query over JSON documents
    Query {
        /// The query, e.g. "SELECT * FROM c WHERE c.age > @age"
        query: String,

        /// JSON input: an array of documents (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Parameter binding as name=value; repeatable
        #[arg(short, long = "param")]
        params: Vec<String>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,

        /// Fail on unrecognized conditions and unbound parameters
        #[arg(long)]
        strict: bool,
    },

    /// Parse a query and show how it groups, without running it
    Check {
        query: String,

        /// Fail on unrecognized conditions
        #[arg(long)]
        strict: bool,
    },

    /// List the functions usable in WHERE clauses
    Functions,
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
        Commands::Query {
            query,
            input,
            params,
            pretty,
            strict,
        } => run_query(query, input, params, pretty, strict),
        Commands::Check { query, strict } => {
            cli::execute_check(&CheckOptions { query, strict }).map(|result| {
                println!("{}", result.describe());
            })
        }
        Commands::Functions => {
            print!("{}", cli::list_functions(&FunctionRegistry::default()));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_query(
    query: String,
    input: Option<String>,
    params: Vec<String>,
    pretty: bool,
    strict: bool,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = RunOptions {
        query,
        input,
        params,
        pretty,
        strict,
    };

    println!("{}", cli::execute_query(&options)?);
    Ok(())
}
