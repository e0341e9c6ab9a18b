mod error_presentation;

use std::{
    fs,
    io::{self, IsTerminal, Read},
    path::PathBuf,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use error_presentation::{CliError, CliResult, render_runtime_error};
use onlinealter_core::{
    ConnectionConfig, DEFAULT_TOOL, DatabaseAdapter, OnlineSchemaChange,
    OnlineSchemaChangeConfig, SchemaBuilder, Statement, SystemToolRunner, group_by_table,
    split_statements,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3306;
const DEFAULT_USER: &str = "root";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Parser)]
#[command(
    name = "onlinealter",
    version,
    about = "Run ALTER TABLE migrations through an online schema-change tool"
)]
struct Cli {
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Batch each table's statements into one online schema-change run.
    Osc(OscArgs),
    /// Execute statements one by one over a plain MySQL connection.
    #[cfg(feature = "mysql")]
    Direct(DirectArgs),
}

#[derive(Debug, Args)]
struct ConnectionArgs {
    #[arg(value_name = "DATABASE")]
    database: String,
    #[arg(long, env = "ONLINEALTER_HOST", default_value = DEFAULT_HOST)]
    host: String,
    #[arg(long, env = "ONLINEALTER_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
    #[arg(long, env = "ONLINEALTER_USER", default_value = DEFAULT_USER)]
    user: String,
    /// Database password. Required; an account without one must pass
    /// `--password ""`.
    #[arg(long, env = "ONLINEALTER_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    /// Read statements from a file instead of stdin.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct OscArgs {
    #[command(flatten)]
    connection: ConnectionArgs,
    /// Path of the online schema-change binary.
    #[arg(long, env = "ONLINEALTER_TOOL", default_value = DEFAULT_TOOL)]
    tool: PathBuf,
    /// Extra tool argument placed before `--alter`; repeatable.
    #[arg(long = "param", value_name = "TOKEN", allow_hyphen_values = true)]
    params: Vec<String>,
    /// Run the real invocation with `--dry-run`.
    #[arg(long)]
    pretend: bool,
}

#[cfg(feature = "mysql")]
#[derive(Debug, Args)]
struct DirectArgs {
    #[command(flatten)]
    connection: ConnectionArgs,
    #[arg(long)]
    socket: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    if let Err(error) = run(cli.command) {
        let exit_code = error.exit_code();
        eprintln!("{}", render_runtime_error(error));
        std::process::exit(exit_code);
    }
}

fn run(command: Command) -> CliResult<()> {
    match command {
        Command::Osc(args) => {
            let statements = read_statements(args.connection.file.as_ref())?;
            let config = OnlineSchemaChangeConfig {
                tool: args.tool,
                params: args.params,
                pretend: args.pretend,
            };
            let mut adapter = OnlineSchemaChange::new(
                connection_config(args.connection, None),
                config,
                SystemToolRunner,
            );
            run_batches(&mut adapter, statements)
        }
        #[cfg(feature = "mysql")]
        Command::Direct(args) => {
            let statements = read_statements(args.connection.file.as_ref())?;
            let mut adapter =
                onlinealter_mysql::connect(&connection_config(args.connection, args.socket))?;
            run_batches(&mut adapter, statements)
        }
    }
}

fn run_batches(adapter: &mut dyn DatabaseAdapter, statements: Vec<Statement>) -> CliResult<()> {
    let batches = group_by_table(statements)?;
    let mut builder = SchemaBuilder::new(adapter);

    for batch in &batches {
        info!(
            table = batch.table(),
            statements = batch.statements().len(),
            "applying batch"
        );
        builder.build(batch.statements())?;
        println!(
            "-- {}: {} statement(s) applied",
            batch.table(),
            batch.statements().len()
        );
    }

    Ok(())
}

fn read_statements(file: Option<&PathBuf>) -> CliResult<Vec<Statement>> {
    let script = match file {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::ReadFile {
            path: path.clone(),
            source,
        })?,
        None if io::stdin().is_terminal() => return Err(CliError::MissingStatementInput),
        None => {
            let mut script = String::new();
            io::stdin()
                .read_to_string(&mut script)
                .map_err(CliError::ReadStdin)?;
            script
        }
    };

    let statements = split_statements(&script);
    if statements.is_empty() {
        return Err(CliError::MissingStatementInput);
    }
    Ok(statements)
}

fn connection_config(args: ConnectionArgs, socket: Option<String>) -> ConnectionConfig {
    ConnectionConfig {
        host: Some(args.host),
        port: Some(args.port),
        user: Some(args.user),
        password: args.password,
        database: args.database,
        socket,
    }
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal());

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
